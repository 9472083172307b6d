//! Comparer registry
//!
//! Maps a [`Type`] to the [`Comparer`] used for values of that type (and its
//! subclasses). One process-wide registry holds the defaults plus anything
//! added with [`register`]; each comparison may overlay extra comparers via
//! [`CompareOptions::with_comparer`](crate::CompareOptions::with_comparer).

use std::fmt;
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use tracing::{debug, instrument};

use crate::comparers;
use crate::context::CompareContext;
use crate::error::CompareResult;
use crate::types::Type;
use crate::value::Value;

/// Signature of a user supplied comparer
///
/// Returns `Ok(None)` when the values are equal or `Ok(Some(message))`
/// describing how they differ.
pub type CompareFn =
    dyn Fn(&Value, &Value, &mut CompareContext) -> CompareResult<Option<String>> + Send + Sync;

static GLOBAL: LazyLock<ComparerRegistry> = LazyLock::new(ComparerRegistry::with_defaults);

/// Strategy used to compare two values
#[derive(Clone)]
pub enum Comparer {
    /// Representation based; the only comparer that is not type specific
    Simple,
    /// Report both representations along with their types
    WithType,
    Sequence,
    Tuple,
    Mapping,
    Set,
    Text,
    Bytes,
    Generator,
    Call,
    Exception,
    Partial,
    Object,
    Custom(Arc<CompareFn>),
}

impl Comparer {
    /// Wrap a closure as a comparer
    pub fn custom<F>(compare: F) -> Self
    where
        F: Fn(&Value, &Value, &mut CompareContext) -> CompareResult<Option<String>>
            + Send
            + Sync
            + 'static,
    {
        Self::Custom(Arc::new(compare))
    }

    pub fn is_simple(&self) -> bool {
        matches!(self, Self::Simple)
    }

    /// Compare `x` and `y`, recursing through `context`
    pub fn compare(
        &self,
        x: &Value,
        y: &Value,
        context: &mut CompareContext,
    ) -> CompareResult<Option<String>> {
        match self {
            Self::Simple => comparers::compare_simple(x, y, context),
            Self::WithType => Ok(Some(comparers::compare_with_type(x, y, context))),
            Self::Sequence => comparers::compare_sequence(x, y, context),
            Self::Tuple => comparers::compare_tuple(x, y, context),
            Self::Mapping => comparers::compare_dict(x, y, context),
            Self::Set => comparers::compare_set(x, y, context),
            Self::Text => comparers::compare_text(x, y, context),
            Self::Bytes => comparers::compare_bytes(x, y, context),
            Self::Generator => comparers::compare_generator(x, y, context),
            Self::Call => comparers::compare_call(x, y, context),
            Self::Exception => comparers::compare_exception(x, y, context),
            Self::Partial => comparers::compare_partial(x, y, context),
            Self::Object => comparers::compare_object(x, y, context),
            Self::Custom(compare) => compare(x, y, context),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::WithType => "with_type",
            Self::Sequence => "sequence",
            Self::Tuple => "tuple",
            Self::Mapping => "mapping",
            Self::Set => "set",
            Self::Text => "text",
            Self::Bytes => "bytes",
            Self::Generator => "generator",
            Self::Call => "call",
            Self::Exception => "exception",
            Self::Partial => "partial",
            Self::Object => "object",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Comparer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Comparer::{}", self.name())
    }
}

/// Type to comparer table
pub struct ComparerRegistry {
    comparers: DashMap<Type, Comparer>,
}

impl ComparerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            comparers: DashMap::new(),
        }
    }

    /// Create a registry holding the default comparers
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.install_defaults();
        registry
    }

    fn install_defaults(&self) {
        let defaults = [
            (Type::dict(), Comparer::Mapping),
            (Type::set(), Comparer::Set),
            (Type::frozenset(), Comparer::Set),
            (Type::list(), Comparer::Sequence),
            (Type::tuple(), Comparer::Tuple),
            (Type::str(), Comparer::Text),
            (Type::bytes(), Comparer::Bytes),
            (Type::int(), Comparer::Simple),
            (Type::float(), Comparer::Simple),
            (Type::generator(), Comparer::Generator),
            (Type::call(), Comparer::Call),
            (Type::base_exception(), Comparer::Exception),
            (Type::partial(), Comparer::Partial),
        ];
        for (ty, comparer) in defaults {
            self.comparers.insert(ty, comparer);
        }
    }

    /// Register a comparer, replacing any existing one for the same type
    #[instrument(skip(self, comparer))]
    pub fn register(&self, ty: Type, comparer: Comparer) {
        debug!(ty = %ty, comparer = ?comparer, "Registering comparer");
        self.comparers.insert(ty, comparer);
    }

    /// Remove the comparer for a type
    pub fn unregister(&self, ty: &Type) -> Option<Comparer> {
        let removed = self.comparers.remove(ty).map(|(_, comparer)| comparer);
        if removed.is_some() {
            debug!(ty = %ty, "Unregistered comparer");
        }
        removed
    }

    /// The comparer registered for exactly this type
    ///
    /// The entry is cloned out so no lock is held while it runs.
    pub fn get(&self, ty: &Type) -> Option<Comparer> {
        self.comparers.get(ty).map(|entry| entry.value().clone())
    }

    pub fn has(&self, ty: &Type) -> bool {
        self.comparers.contains_key(ty)
    }

    pub fn len(&self) -> usize {
        self.comparers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparers.is_empty()
    }

    /// Drop every registration and restore the defaults
    pub fn reset(&self) {
        self.comparers.clear();
        self.install_defaults();
        debug!(count = self.comparers.len(), "Reset comparer registry");
    }

    /// The process-wide registry
    pub fn global() -> &'static ComparerRegistry {
        &GLOBAL
    }
}

impl Default for ComparerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Register a comparer for `ty` in the process-wide registry
///
/// Later registrations for the same type replace earlier ones.
pub fn register(ty: Type, comparer: Comparer) {
    ComparerRegistry::global().register(ty, comparer);
}

/// Remove a comparer from the process-wide registry
pub fn unregister(ty: &Type) -> Option<Comparer> {
    ComparerRegistry::global().unregister(ty)
}

/// Restore the process-wide registry to its defaults
pub fn reset_registry() {
    ComparerRegistry::global().reset();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let registry = ComparerRegistry::with_defaults();
        assert_eq!(registry.len(), 13);
        assert!(matches!(registry.get(&Type::dict()), Some(Comparer::Mapping)));
        assert!(matches!(registry.get(&Type::int()), Some(Comparer::Simple)));
        assert!(registry.get(&Type::bool()).is_none());
    }

    #[test]
    fn test_register_replaces() {
        let registry = ComparerRegistry::new();
        let ty = Type::class("tests.registry.Widget");
        registry.register(ty.clone(), Comparer::Simple);
        registry.register(ty.clone(), Comparer::Object);
        assert_eq!(registry.len(), 1);
        assert!(matches!(registry.get(&ty), Some(Comparer::Object)));
    }

    #[test]
    fn test_unregister() {
        let registry = ComparerRegistry::new();
        let ty = Type::class("tests.registry.Gadget");
        registry.register(ty.clone(), Comparer::Simple);
        assert!(registry.has(&ty));
        assert!(registry.unregister(&ty).is_some());
        assert!(!registry.has(&ty));
        assert!(registry.unregister(&ty).is_none());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let registry = ComparerRegistry::with_defaults();
        registry.register(Type::class("tests.registry.Extra"), Comparer::Simple);
        registry.unregister(&Type::dict());
        registry.reset();
        assert_eq!(registry.len(), 13);
        assert!(registry.has(&Type::dict()));
    }

    #[test]
    fn test_custom_comparer_debug() {
        let comparer = Comparer::custom(|_, _, _| Ok(None));
        assert_eq!(format!("{:?}", comparer), "Comparer::custom");
        assert!(!comparer.is_simple());
        assert!(Comparer::Simple.is_simple());
    }
}
