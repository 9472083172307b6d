//! Matchers for strings, rounded numbers, ranges and sequences

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;

use crate::comparers::compare_sequence;
use crate::comparison::Matcher;
use crate::context::CompareContext;
use crate::error::CompareResult;
use crate::options::CompareOptions;
use crate::repr::{pformat, py_cmp, repr, repr_float};
use crate::types::Type;
use crate::value::Value;

static STRING_TYPE: LazyLock<Type> =
    LazyLock::new(|| Type::class("tfx_compare.StringComparison"));
static ROUND_TYPE: LazyLock<Type> = LazyLock::new(|| Type::class("tfx_compare.RoundComparison"));
static RANGE_TYPE: LazyLock<Type> = LazyLock::new(|| Type::class("tfx_compare.RangeComparison"));
static SEQUENCE_TYPE: LazyLock<Type> =
    LazyLock::new(|| Type::class("tfx_compare.SequenceComparison"));

/// Matches strings that start with a regular expression match
pub struct StringComparison {
    pattern: String,
    regex: Regex,
}

impl StringComparison {
    pub fn new(pattern: &str) -> CompareResult<Self> {
        Ok(Self {
            pattern: pattern.to_string(),
            regex: Regex::new(&format!("^(?:{})", pattern))?,
        })
    }
}

impl Matcher for StringComparison {
    fn type_of(&self) -> Type {
        STRING_TYPE.clone()
    }

    fn matches(&self, other: &Value) -> CompareResult<bool> {
        Ok(match other {
            Value::Str(s) => self.regex.is_match(s),
            _ => false,
        })
    }

    fn describe(&self) -> String {
        format!("<S:{}>", self.pattern)
    }
}

/// Matches numbers equal to a value once both are rounded
pub struct RoundComparison {
    rounded: f64,
    precision: i32,
}

impl RoundComparison {
    pub fn new(value: f64, precision: i32) -> Self {
        Self {
            rounded: round(value, precision),
            precision,
        }
    }
}

/// Round half to even at `precision` decimal places
fn round(value: f64, precision: i32) -> f64 {
    let scale = 10f64.powi(precision);
    (value * scale).round_ties_even() / scale
}

impl Matcher for RoundComparison {
    fn type_of(&self) -> Type {
        ROUND_TYPE.clone()
    }

    fn matches(&self, other: &Value) -> CompareResult<bool> {
        Ok(match other {
            Value::Int(_) | Value::Float(_) => other
                .as_f64()
                .is_some_and(|actual| round(actual, self.precision) == self.rounded),
            _ => false,
        })
    }

    fn describe(&self) -> String {
        format!("<R:{} to {} digits>", repr_float(self.rounded), self.precision)
    }
}

/// Matches values ordered between two inclusive bounds
pub struct RangeComparison {
    lower: Value,
    upper: Value,
}

impl RangeComparison {
    pub fn new(lower: impl Into<Value>, upper: impl Into<Value>) -> Self {
        Self {
            lower: lower.into(),
            upper: upper.into(),
        }
    }
}

impl Matcher for RangeComparison {
    fn type_of(&self) -> Type {
        RANGE_TYPE.clone()
    }

    fn matches(&self, other: &Value) -> CompareResult<bool> {
        let at_most = |a: &Value, b: &Value| {
            matches!(py_cmp(a, b), Some(Ordering::Less | Ordering::Equal))
        };
        Ok(at_most(&self.lower, other) && at_most(other, &self.upper))
    }

    fn describe(&self) -> String {
        format!("<Range: [{}, {}]>", repr(&self.lower), repr(&self.upper))
    }
}

/// Matches iterables containing the expected items
///
/// `ordered` requires the items in the given order, `partial` tolerates
/// additional items in the actual value.
pub struct SequenceComparison {
    expected: Vec<Value>,
    ordered: bool,
    partial: bool,
    name: Option<&'static str>,
    failed: RefCell<Option<String>>,
}

impl SequenceComparison {
    pub fn new<I>(expected: I, ordered: bool, partial: bool) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self {
            expected: expected.into_iter().map(Into::into).collect(),
            ordered,
            partial,
            name: None,
            failed: RefCell::new(None),
        }
    }

    /// Why the last check failed, if it did
    pub fn failed(&self) -> Option<String> {
        self.failed.borrow().clone()
    }

    fn title(&self) -> String {
        match self.name {
            Some(name) => name.to_string(),
            None => format!(
                "SequenceComparison(ordered={}, partial={})",
                if self.ordered { "True" } else { "False" },
                if self.partial { "True" } else { "False" }
            ),
        }
    }

    /// Whether the expected items appear in `actual` in order, each after the last
    fn ordered_scan(&self, actual: &[Value]) -> CompareResult<bool> {
        let mut start = 0;
        for expected in &self.expected {
            let mut found = None;
            for (i, item) in actual.iter().enumerate().skip(start) {
                if expected.try_eq(item)? {
                    found = Some(i);
                    break;
                }
            }
            match found {
                Some(i) => start = i + 1,
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    fn check(&self, actual: &[Value]) -> CompareResult<Option<String>> {
        if self.ordered
            && (self.partial || self.expected.len() == actual.len())
            && self.ordered_scan(actual)?
        {
            return Ok(None);
        }

        let mut matched_actual: Vec<Option<usize>> = Vec::with_capacity(self.expected.len());
        let mut used = vec![false; actual.len()];
        for expected in &self.expected {
            let mut found = None;
            for (i, item) in actual.iter().enumerate() {
                if !used[i] && expected.try_eq(item)? {
                    found = Some(i);
                    break;
                }
            }
            if let Some(i) = found {
                used[i] = true;
            }
            matched_actual.push(found);
        }

        let same: Vec<Value> = self
            .expected
            .iter()
            .zip(&matched_actual)
            .filter(|(_, found)| found.is_some())
            .map(|(item, _)| item.clone())
            .collect();
        let missing: Vec<Value> = self
            .expected
            .iter()
            .zip(&matched_actual)
            .filter(|(_, found)| found.is_none())
            .map(|(item, _)| item.clone())
            .collect();
        let extra: Vec<Value> = actual
            .iter()
            .zip(&used)
            .filter(|(_, used)| !**used)
            .map(|(item, _)| item.clone())
            .collect();

        let positions: Vec<usize> = matched_actual.iter().flatten().copied().collect();
        let in_order = positions.windows(2).all(|pair| pair[0] < pair[1]);

        if missing.is_empty() && (self.partial || extra.is_empty()) {
            if !self.ordered || in_order {
                return Ok(None);
            }
            let mut context =
                CompareContext::new(CompareOptions::new().with_labels("expected", "actual"));
            let mut positions = positions;
            positions.sort_unstable();
            let in_actual_order: Vec<Value> =
                positions.iter().map(|&i| actual[i].clone()).collect();
            let diff = compare_sequence(
                &Value::list(self.expected.clone()),
                &Value::list(in_actual_order),
                &mut context,
            )?;
            return Ok(Some(format!("wrong order\n{}", diff.unwrap_or_default())));
        }

        let mut blocks = Vec::new();
        let mut block = |title: &str, items: Vec<Value>| {
            if !items.is_empty() {
                blocks.push(format!("{}:\n{}", title, pformat(&Value::list(items))));
            }
        };
        if self.partial {
            block("ignored", extra.clone());
        }
        block("same", same);
        block("in expected but not actual", missing);
        if !self.partial {
            block("in actual but not expected", extra);
        }
        Ok(Some(blocks.join("\n\n")))
    }
}

impl Matcher for SequenceComparison {
    fn type_of(&self) -> Type {
        SEQUENCE_TYPE.clone()
    }

    fn matches(&self, other: &Value) -> CompareResult<bool> {
        let actual = match other {
            Value::Str(_) | Value::Bytes(_) => None,
            other => other.iter_items(),
        };
        let Some(actual) = actual else {
            *self.failed.borrow_mut() = Some("bad type".to_string());
            return Ok(false);
        };
        let failed = self.check(&actual)?;
        let matched = failed.is_none();
        *self.failed.borrow_mut() = failed;
        Ok(matched)
    }

    fn describe(&self) -> String {
        let title = self.title();
        match self.failed.borrow().as_deref() {
            Some(failed) => format!("<{}(failed)>\n{}\n</{}>", title, failed, title),
            None => {
                let items: Vec<String> = self.expected.iter().map(repr).collect();
                format!("<{}>{}</{}>", title, items.join(", "), title)
            }
        }
    }
}

/// Matches iterables containing at least the expected items, in any order
pub fn subset<I>(expected: I) -> SequenceComparison
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    SequenceComparison {
        name: Some("Subset"),
        ..SequenceComparison::new(expected, false, true)
    }
}

/// Matches iterables containing exactly the expected items, in any order
pub fn permutation<I>(expected: I) -> SequenceComparison
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    SequenceComparison {
        name: Some("Permutation"),
        ..SequenceComparison::new(expected, false, false)
    }
}

macro_rules! matcher_into_value {
    ($($matcher:ty),*) => {
        $(
            impl From<$matcher> for Value {
                fn from(matcher: $matcher) -> Self {
                    Value::Matcher(Rc::new(matcher))
                }
            }
        )*
    };
}

matcher_into_value!(StringComparison, RoundComparison, RangeComparison, SequenceComparison);
