//! Top level comparison entry points

use tracing::debug;

use crate::context::CompareContext;
use crate::error::{CompareError, CompareResult};
use crate::options::CompareOptions;
use crate::repr::{repr, repr_str};
use crate::value::Value;

/// Compare two values with default options
///
/// ```
/// use tfx_compare::{compare, list};
///
/// assert!(compare(list![1, 2], list![1, 2]).is_ok());
/// let error = compare(list![1, 2, 3], list![1, 2, 4]).unwrap_err();
/// assert!(error.to_string().starts_with("sequence not as expected:"));
/// ```
pub fn compare(x: impl Into<Value>, y: impl Into<Value>) -> CompareResult<()> {
    compare_with(x, y, &CompareOptions::default()).map(|_| ())
}

/// Compare two values
///
/// Returns `Ok(None)` when they are equal. A difference is an
/// [`CompareError::Mismatch`], or `Ok(Some(message))` when
/// [`CompareOptions::raises`] is off.
pub fn compare_with(
    x: impl Into<Value>,
    y: impl Into<Value>,
    options: &CompareOptions,
) -> CompareResult<Option<String>> {
    run(&x.into(), &y.into(), options.clone())
}

/// Builder for comparisons with named operands
///
/// Exactly two operands must be supplied, through any mix of positional
/// arguments, `x`/`y` and `expected`/`actual`. Naming an operand `expected`
/// or `actual` also labels it that way in the message.
///
/// ```
/// use tfx_compare::Compare;
///
/// let error = Compare::new().expected(1).actual(2).run().unwrap_err();
/// assert_eq!(error.to_string(), "1 (expected) != 2 (actual)");
/// ```
#[derive(Default)]
pub struct Compare {
    positional: Vec<Value>,
    named: Vec<(&'static str, Value)>,
    options: CompareOptions,
}

impl Compare {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a positional operand
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn x(self, value: impl Into<Value>) -> Self {
        self.named("x", value)
    }

    pub fn y(self, value: impl Into<Value>) -> Self {
        self.named("y", value)
    }

    pub fn expected(self, value: impl Into<Value>) -> Self {
        self.named("expected", value)
    }

    pub fn actual(self, value: impl Into<Value>) -> Self {
        self.named("actual", value)
    }

    pub fn options(mut self, options: CompareOptions) -> Self {
        self.options = options;
        self
    }

    fn named(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        let value = value.into();
        match self.named.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.named.push((name, value)),
        }
        self
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.named
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, value)| value)
    }

    /// Run the comparison
    pub fn run(self) -> CompareResult<Option<String>> {
        let mut options = self.options.clone();
        if self.get("expected").is_some() && options.x_label.is_none() {
            options.x_label = Some("expected".to_string());
        }
        if self.get("actual").is_some() && options.y_label.is_none() {
            options.y_label = Some("actual".to_string());
        }

        let mut operands: Vec<&Value> = Vec::new();
        operands.extend(self.get("x"));
        operands.extend(self.get("expected"));
        operands.extend(self.positional.iter());
        operands.extend(self.get("y"));
        operands.extend(self.get("actual"));

        match operands.as_slice() {
            [x, y] => run(x, y, options),
            _ => Err(CompareError::Arguments {
                supplied: self.describe_supplied(),
            }),
        }
    }

    fn describe_supplied(&self) -> String {
        let mut supplied = String::new();
        if !self.positional.is_empty() {
            supplied.push_str(&format!(" {}", repr(&Value::list(self.positional.clone()))));
        }
        if !self.named.is_empty() {
            let named: Vec<String> = self
                .named
                .iter()
                .map(|(name, value)| format!("{}: {}", repr_str(name), repr(value)))
                .collect();
            supplied.push_str(&format!(" {{{}}}", named.join(", ")));
        }
        supplied
    }
}

fn run(x: &Value, y: &Value, options: CompareOptions) -> CompareResult<Option<String>> {
    let prefix = options.prefix.clone();
    let suffix = options.suffix.clone();
    let raises = options.raises;

    let mut context = CompareContext::new(options);
    if !context.different(x, y, "")? {
        debug!("Values are equal");
        return Ok(None);
    }

    let mut message = context.into_message();
    if let Some(prefix) = prefix {
        message = format!("{}: {}", prefix, message);
    }
    if let Some(suffix) = suffix {
        message = format!("{}\n{}", message, suffix);
    }
    debug!(length = message.len(), raises, "Values differ");

    if raises {
        Err(CompareError::Mismatch { message })
    } else {
        Ok(Some(message))
    }
}

/// Panic with the comparison message when two values differ
///
/// ```
/// use tfx_compare::{assert_compare, dict, CompareOptions};
///
/// assert_compare!(dict! {"a" => 1}, dict! {"a" => 1});
/// assert_compare!(1, 1.0, CompareOptions::new());
/// ```
#[macro_export]
macro_rules! assert_compare {
    ($x:expr, $y:expr $(,)?) => {
        $crate::assert_compare!($x, $y, $crate::CompareOptions::default())
    };
    ($x:expr, $y:expr, $options:expr $(,)?) => {
        match $crate::compare_with($x, $y, &$options) {
            ::std::result::Result::Ok(::std::option::Option::None) => {}
            ::std::result::Result::Ok(::std::option::Option::Some(message)) => {
                ::std::panic!("{}", message)
            }
            ::std::result::Result::Err(error) => ::std::panic!("{}", error),
        }
    };
}
