//! Options controlling a comparison

use std::collections::HashMap;

use serde::Deserialize;

use crate::registry::Comparer;
use crate::types::Type;

/// Options for comparing values
///
/// Built in code with the builder methods, or deserialized from a fixture:
///
/// ```
/// let options: tfx_compare::CompareOptions =
///     serde_json::from_str(r#"{"strict": true, "ignore_attributes": ["id"]}"#).unwrap();
/// assert!(options.strict);
/// assert!(options.recursive);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Require identical types and run type specific comparers even when `==` holds
    pub strict: bool,
    /// Describe nested differences, not just the outermost one
    pub recursive: bool,
    /// Never trust native equality
    pub ignore_eq: bool,
    /// Label used for the first operand instead of `first`
    pub x_label: Option<String>,
    /// Label used for the second operand instead of `second`
    pub y_label: Option<String>,
    /// Comparers consulted before the process-wide registry, for this comparison only
    #[serde(skip)]
    pub comparers: HashMap<Type, Comparer>,
    /// Attributes left out when comparing objects
    pub ignore_attributes: IgnoreAttributes,
    /// Compare blank lines in text
    pub blanklines: bool,
    /// Compare trailing whitespace in text
    pub trailing_whitespace: bool,
    /// Render whitespace visibly in text diffs
    pub show_whitespace: bool,
    /// Put in front of the message as `prefix: message`
    pub prefix: Option<String>,
    /// Appended to the message on a new line
    pub suffix: Option<String>,
    /// Return an error on mismatch rather than the message
    pub raises: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            strict: false,
            recursive: true,
            ignore_eq: false,
            x_label: None,
            y_label: None,
            comparers: HashMap::new(),
            ignore_attributes: IgnoreAttributes::default(),
            blanklines: true,
            trailing_whitespace: true,
            show_whitespace: false,
            prefix: None,
            suffix: None,
            raises: true,
        }
    }
}

impl CompareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn non_recursive(mut self) -> Self {
        self.recursive = false;
        self
    }

    pub fn ignore_eq(mut self) -> Self {
        self.ignore_eq = true;
        self
    }

    pub fn with_labels(self, x_label: &str, y_label: &str) -> Self {
        self.with_x_label(x_label).with_y_label(y_label)
    }

    pub fn with_x_label(mut self, label: &str) -> Self {
        self.x_label = Some(label.to_string());
        self
    }

    pub fn with_y_label(mut self, label: &str) -> Self {
        self.y_label = Some(label.to_string());
        self
    }

    /// Use `comparer` for `ty` during this comparison only
    pub fn with_comparer(mut self, ty: Type, comparer: Comparer) -> Self {
        self.comparers.insert(ty, comparer);
        self
    }

    /// Ignore an attribute on objects of every type
    pub fn ignore_attribute(mut self, name: &str) -> Self {
        self.ignore_attributes.names.push(name.to_string());
        self
    }

    /// Ignore attributes on objects of exactly `ty`
    pub fn ignore_attributes_for(mut self, ty: &Type, names: &[&str]) -> Self {
        self.ignore_attributes
            .per_type
            .entry(ty.qualname().to_string())
            .or_default()
            .extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn without_blanklines(mut self) -> Self {
        self.blanklines = false;
        self
    }

    pub fn without_trailing_whitespace(mut self) -> Self {
        self.trailing_whitespace = false;
        self
    }

    pub fn show_whitespace(mut self) -> Self {
        self.show_whitespace = true;
        self
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = Some(suffix.to_string());
        self
    }

    /// Return the message instead of failing
    pub fn no_raise(mut self) -> Self {
        self.raises = false;
        self
    }
}

/// Attribute names to leave out of object comparisons
///
/// Deserializes from either a list of names applying to every type or a map
/// from qualified type name to names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "IgnoreSpec")]
pub struct IgnoreAttributes {
    names: Vec<String>,
    per_type: HashMap<String, Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IgnoreSpec {
    Names(Vec<String>),
    PerType(HashMap<String, Vec<String>>),
}

impl From<IgnoreSpec> for IgnoreAttributes {
    fn from(spec: IgnoreSpec) -> Self {
        match spec {
            IgnoreSpec::Names(names) => Self {
                names,
                per_type: HashMap::new(),
            },
            IgnoreSpec::PerType(per_type) => Self {
                names: Vec::new(),
                per_type,
            },
        }
    }
}

impl IgnoreAttributes {
    /// Names ignored for values of exactly `ty`
    pub fn for_type(&self, ty: &Type) -> Vec<String> {
        let mut names = self.names.clone();
        if let Some(extra) = self.per_type.get(ty.qualname()) {
            names.extend(extra.iter().cloned());
        }
        names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.per_type.values().all(Vec::is_empty)
    }
}
