//! The [`Comparison`] wrapper and the [`Matcher`] trait
//!
//! A matcher stands in for an expected value and decides equality itself, so
//! it can sit on either side of `==` or anywhere inside a nested structure
//! handed to [`compare`](crate::compare()).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::LazyLock;

use crate::comparers::{compare_mapping, keyed, KeyStyle};
use crate::context::CompareContext;
use crate::error::{CompareError, CompareResult};
use crate::options::CompareOptions;
use crate::repr::repr;
use crate::types::Type;
use crate::value::{upsert, Value};

static COMPARISON_TYPE: LazyLock<Type> = LazyLock::new(|| Type::class("tfx_compare.Comparison"));

/// Marker for failed type checks
const WRONG_TYPE: &str = "wrong type";

/// A value that decides by itself whether another value equals it
pub trait Matcher {
    /// Class reported for the matcher itself
    fn type_of(&self) -> Type;

    /// Whether `other` is equal to this matcher
    fn matches(&self, other: &Value) -> CompareResult<bool>;

    /// Representation, including the reason for the last failed match
    fn describe(&self) -> String;

    /// Representation when nested `indent` spaces deep inside another matcher
    fn describe_nested(&self, indent: usize) -> String {
        let _ = indent;
        self.describe()
    }
}

/// Expected type plus optional expected attributes
///
/// ```
/// use tfx_compare::{Comparison, Object, Type, Value};
///
/// let user = Type::class("myapp.User");
/// let actual: Value = Object::new(user.clone()).with_attr("name", "ann").into();
///
/// assert!(Comparison::of_type(user.clone()).with_attr("name", "ann") == actual);
/// assert!(actual != Comparison::of_type(user).with_attr("name", "bob"));
/// ```
pub struct Comparison {
    expected_type: Type,
    expected_attributes: Option<Vec<(String, Value)>>,
    strict: bool,
    failed: RefCell<Option<String>>,
}

impl Comparison {
    /// Match any value of exactly `ty`
    pub fn of_type(ty: Type) -> Self {
        Self {
            expected_type: ty,
            expected_attributes: None,
            strict: true,
            failed: RefCell::new(None),
        }
    }

    /// Match values of the type declared under a dotted path
    pub fn from_path(path: &str) -> CompareResult<Self> {
        Ok(Self::of_type(Type::resolve(path)?))
    }

    /// Match values with the class and current attributes of `value`
    pub fn like(value: &Value) -> Self {
        Self {
            expected_attributes: value.attributes(),
            ..Self::of_type(value.type_of())
        }
    }

    /// Expect an attribute, replacing any earlier expectation for it
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        upsert(
            self.expected_attributes.get_or_insert_with(Vec::new),
            name.into(),
            value.into(),
        );
        self
    }

    pub fn with_attrs<I, K, V>(self, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        attrs
            .into_iter()
            .fold(self, |comparison, (name, value)| comparison.with_attr(name, value))
    }

    /// When `false`, attributes present on the actual value but not expected are tolerated
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Why the last check failed, if it did
    pub fn failed(&self) -> Option<String> {
        self.failed.borrow().clone()
    }

    /// The type reported for `Comparison` values
    pub fn matcher_type() -> Type {
        COMPARISON_TYPE.clone()
    }

    fn set_failed(&self, failed: Option<String>) {
        *self.failed.borrow_mut() = failed;
    }

    fn check(&self, other: &Value) -> CompareResult<bool> {
        let actual_type = other.type_of();
        if actual_type != self.expected_type {
            self.set_failed(Some(WRONG_TYPE.to_string()));
            return Ok(false);
        }
        let Some(expected) = &self.expected_attributes else {
            self.set_failed(None);
            return Ok(true);
        };

        let actual = if self.strict {
            other
                .attributes()
                .ok_or_else(|| CompareError::Unsupported {
                    type_name: actual_type.qualname().to_string(),
                    operation: "attribute introspection",
                })?
        } else {
            expected
                .iter()
                .filter_map(|(name, _)| other.get_attr(name).map(|value| (name.clone(), value)))
                .collect()
        };

        let mut context =
            CompareContext::new(CompareOptions::new().with_labels("Comparison", "actual"));
        let failed = compare_mapping(
            &keyed(expected.clone()),
            &keyed(actual),
            &mut context,
            None,
            "attributes ",
            KeyStyle::Attribute,
            self.strict,
        )?;
        let matched = failed.is_none();
        self.set_failed(failed);
        Ok(matched)
    }

    fn render(&self, indent: usize) -> String {
        let name = self.expected_type.qualname();
        if let Some(failed) = self.failed.borrow().as_deref() {
            if failed == WRONG_TYPE {
                return format!("<C:{}(failed)>{}</C:{}>", name, failed, name);
            }
            return format!(
                "<C:{}(failed)>\n{}\n</C:{}>",
                name,
                failed.trim_start_matches('\n'),
                name
            );
        }
        let attrs = match &self.expected_attributes {
            Some(attrs) if !attrs.is_empty() => attrs,
            _ => return format!("<C:{}>", name),
        };
        let mut sorted: Vec<&(String, Value)> = attrs.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));

        let mut lines = vec![format!("<C:{}>", name)];
        for (key, value) in sorted {
            let text = match value {
                Value::Matcher(matcher) => matcher.describe_nested(indent + 2),
                other => repr(other),
            };
            lines.push(format!("{}{}: {}", " ".repeat(indent), key, text));
        }
        lines.push(format!("{}</C:{}>", " ".repeat(indent.saturating_sub(2)), name));
        lines.join("\n")
    }
}

impl Matcher for Comparison {
    fn type_of(&self) -> Type {
        Self::matcher_type()
    }

    fn matches(&self, other: &Value) -> CompareResult<bool> {
        self.check(other)
    }

    fn describe(&self) -> String {
        self.render(2)
    }

    fn describe_nested(&self, indent: usize) -> String {
        self.render(indent)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl fmt::Debug for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Errors raised while matching are recorded as the failure reason
impl PartialEq<Value> for Comparison {
    fn eq(&self, other: &Value) -> bool {
        match self.check(other) {
            Ok(matched) => matched,
            Err(error) => {
                self.set_failed(Some(error.to_string()));
                false
            }
        }
    }
}

impl PartialEq<Comparison> for Value {
    fn eq(&self, other: &Comparison) -> bool {
        other == self
    }
}

impl From<Comparison> for Value {
    fn from(comparison: Comparison) -> Self {
        Value::Matcher(Rc::new(comparison))
    }
}

impl From<Rc<Comparison>> for Value {
    fn from(comparison: Rc<Comparison>) -> Self {
        Value::Matcher(comparison)
    }
}
