//! Per-comparison traversal state

use std::collections::HashSet;

use tracing::trace;

use crate::error::CompareResult;
use crate::options::CompareOptions;
use crate::registry::{Comparer, ComparerRegistry};
use crate::value::Value;

/// Which operand a piece of text describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    X,
    Y,
}

/// State carried through one comparison
///
/// Created for every top level comparison (and for every check made by a
/// [`Comparison`](crate::Comparison)), then thrown away. Comparers call
/// [`CompareContext::different`] for each pair of child values.
pub struct CompareContext {
    options: CompareOptions,
    message: String,
    breadcrumbs: Vec<String>,
    seen: HashSet<(usize, usize)>,
}

impl CompareContext {
    pub fn new(options: CompareOptions) -> Self {
        Self {
            options,
            message: String::new(),
            breadcrumbs: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    pub fn x_label(&self) -> Option<&str> {
        self.options.x_label.as_deref()
    }

    pub fn y_label(&self) -> Option<&str> {
        self.options.y_label.as_deref()
    }

    /// `text` followed by the label of `side`, if there is one
    pub fn label(&self, side: Side, text: &str) -> String {
        let label = match side {
            Side::X => self.x_label(),
            Side::Y => self.y_label(),
        };
        match label {
            Some(label) => format!("{} ({})", text, label),
            None => text.to_string(),
        }
    }

    /// Message accumulated so far
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn into_message(self) -> String {
        self.message
    }

    /// Pick the comparer for a pair of values
    ///
    /// Types shared by both values are tried in `x`'s ancestry order, each
    /// against this comparison's comparers and then the process-wide registry.
    pub fn lookup(&self, x: &Value, y: &Value) -> Comparer {
        let x_type = x.type_of();
        let y_type = y.type_of();
        if self.options.strict && x_type != y_type {
            return Comparer::WithType;
        }

        let y_mro = y_type.mro();
        let registry = ComparerRegistry::global();
        for ty in x_type.mro().iter().filter(|ty| y_mro.contains(ty)) {
            if let Some(comparer) = self.options.comparers.get(ty) {
                return comparer.clone();
            }
            if let Some(comparer) = registry.get(ty) {
                return comparer;
            }
        }

        let plain_iterable = |v: &Value| v.is_iterable() && !v.is_str() && !v.is_mapping();
        if plain_iterable(x) && plain_iterable(y) {
            return Comparer::Generator;
        }
        if x.is_matcher() || y.is_matcher() {
            return Comparer::Simple;
        }
        Comparer::Object
    }

    /// Whether `x` and `y` differ
    ///
    /// On a difference the description is appended to the accumulated message.
    /// A pair of shared values seen before in this comparison is assumed equal.
    /// Errors only come from custom comparers or failing matchers.
    pub fn different(&mut self, x: &Value, y: &Value, breadcrumb: &str) -> CompareResult<bool> {
        if let (Some(x_id), Some(y_id)) = (x.identity(), y.identity()) {
            if !self.seen.insert((x_id, y_id)) {
                trace!(breadcrumb, "Pair already compared, assuming equal");
                return Ok(false);
            }
        }

        let recursed = !self.breadcrumbs.is_empty();
        self.breadcrumbs.push(breadcrumb.to_string());
        let existing = std::mem::take(&mut self.message);

        let outcome = self.dispatch(x, y);

        let mut current = String::new();
        if let Ok(Some((result, specific))) = &outcome {
            if *specific && recursed {
                current = format!("\n\nWhile comparing {}: ", self.breadcrumbs[1..].concat());
            }
            if *specific || !recursed {
                current.push_str(result);
                if self.options.recursive {
                    current.push_str(&self.message);
                }
            }
        }
        self.message = existing + &current;
        self.breadcrumbs.pop();

        outcome.map(|result| result.is_some())
    }

    /// The difference found and whether a type specific comparer found it
    fn dispatch(&mut self, x: &Value, y: &Value) -> CompareResult<Option<(String, bool)>> {
        if !(self.options.strict || self.options.ignore_eq) && x.try_eq(y)? {
            return Ok(None);
        }

        let comparer = self.lookup(x, y);
        trace!(
            breadcrumb = %self.breadcrumbs.concat(),
            comparer = ?comparer,
            "Comparing values"
        );
        let result = comparer.compare(x, y, self)?;
        let specific = !comparer.is_simple();

        if self.options.strict && !specific && x.try_eq(y)? {
            return Ok(None);
        }
        Ok(result
            .filter(|message| !message.is_empty())
            .map(|message| (message, specific)))
    }
}
