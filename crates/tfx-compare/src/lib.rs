//! Structural comparison with readable differences
//!
//! This crate compares nested values (sequences, mappings, sets, objects,
//! exceptions, generators, partial applications and mock call records) and
//! explains where and how they differ:
//!
//! ```
//! use tfx_compare::{compare, dict, tuple};
//!
//! let error = compare(dict! {"x" => tuple![1, 2, 3]}, dict! {"x" => tuple![1, 2, 4]})
//!     .unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     "dict not as expected:\n\
//!      \n\
//!      values differ:\n\
//!      'x': (1, 2, 3) != (1, 2, 4)\n\
//!      \n\
//!      While comparing ['x']: sequence not as expected:\n\
//!      \n\
//!      same:\n\
//!      (1, 2)\n\
//!      \n\
//!      first:\n\
//!      (3,)\n\
//!      \n\
//!      second:\n\
//!      (4,)"
//! );
//! ```
//!
//! # Architecture
//!
//! ```text
//! compare / Compare::run
//!         │
//!         ▼
//!  CompareContext::different ◄──────────┐
//!         │                             │
//!         ▼                             │
//!  lookup: strict type check,           │
//!  per-call comparers, registry,        │
//!  iterable / matcher / object fallback │
//!         │                             │
//!         ▼                             │
//!  comparer (mapping, sequence, ...) ───┘
//! ```
//!
//! Values are dynamic ([`Value`]) and carry a [`Type`] from a declared class
//! hierarchy, which is what comparers are registered against.

pub mod compare;
pub mod comparers;
pub mod comparison;
pub mod context;
pub mod convert;
pub mod error;
pub mod matchers;
pub mod options;
pub mod registry;
pub mod repr;
pub mod text;
pub mod types;
pub mod value;

pub use compare::{compare, compare_with, Compare};
pub use comparison::{Comparison, Matcher};
pub use context::{CompareContext, Side};
pub use convert::{to_value, Diffable};
pub use error::{CompareError, CompareResult};
pub use matchers::{
    permutation, subset, RangeComparison, RoundComparison, SequenceComparison, StringComparison,
};
pub use options::{CompareOptions, IgnoreAttributes};
pub use registry::{register, reset_registry, unregister, CompareFn, Comparer, ComparerRegistry};
pub use text::diff;
pub use types::Type;
pub use value::{Call, Exception, Function, Object, ObjectEq, Partial, Value};
