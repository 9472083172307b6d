//! Class hierarchy used to dispatch comparers
//!
//! Every [`Value`](crate::Value) reports a [`Type`]. Types form a single
//! inheritance chain ending in `object`; comparer lookup walks that chain the
//! same way for every value, so registering a comparer for a base type covers
//! all of its subclasses.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;

use crate::error::{CompareError, CompareResult};

/// Module name that is omitted from qualified names
const BUILTINS: &str = "builtins";

/// Every type ever declared, keyed by qualified name
static TYPES: LazyLock<DashMap<String, Type>> = LazyLock::new(DashMap::new);

static BUILTIN: LazyLock<Builtins> = LazyLock::new(Builtins::declare);

/// A named class with an optional base class
///
/// Two types are the same type when their qualified names match.
#[derive(Clone)]
pub struct Type(Arc<TypeDef>);

struct TypeDef {
    module: String,
    name: String,
    qualname: String,
    base: Option<Type>,
}

impl Type {
    fn declare(module: &str, name: &str, base: Option<Type>) -> Self {
        let qualname = if module.is_empty() || module == BUILTINS {
            name.to_string()
        } else {
            format!("{}.{}", module, name)
        };
        let ty = Self(Arc::new(TypeDef {
            module: module.to_string(),
            name: name.to_string(),
            qualname: qualname.clone(),
            base,
        }));
        TYPES.insert(qualname, ty.clone());
        ty
    }

    /// Declare a type in `module` deriving from `base` (or `object`)
    pub fn new(module: &str, name: &str, base: Option<&Type>) -> Self {
        let base = base.cloned().unwrap_or_else(Type::object);
        Self::declare(module, name, Some(base))
    }

    /// Declare a type from a dotted path such as `"myapp.models.User"`
    pub fn class(path: &str) -> Self {
        let (module, name) = split_path(path);
        Self::new(module, name, None)
    }

    /// Declare a type from a dotted path deriving from `base`
    pub fn subclass(path: &str, base: &Type) -> Self {
        let (module, name) = split_path(path);
        Self::new(module, name, Some(base))
    }

    /// Find a previously declared type by its qualified name
    pub fn resolve(path: &str) -> CompareResult<Self> {
        LazyLock::force(&BUILTIN);
        TYPES
            .get(path)
            .map(|ty| ty.clone())
            .ok_or_else(|| CompareError::UnresolvedType {
                path: path.to_string(),
            })
    }

    /// Short class name, e.g. `dict` or `User`
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Module the type was declared in
    pub fn module(&self) -> &str {
        &self.0.module
    }

    /// Qualified name; builtin types are not prefixed
    pub fn qualname(&self) -> &str {
        &self.0.qualname
    }

    /// Direct base class, `None` only for `object`
    pub fn base(&self) -> Option<&Type> {
        self.0.base.as_ref()
    }

    /// The type followed by all of its ancestors, ending with `object`
    pub fn mro(&self) -> Vec<Type> {
        let mut chain = vec![self.clone()];
        let mut current = self.base();
        while let Some(ty) = current {
            chain.push(ty.clone());
            current = ty.base();
        }
        chain
    }

    /// Whether `self` is `other` or derives from it
    pub fn is_subclass_of(&self, other: &Type) -> bool {
        self.mro().iter().any(|ty| ty == other)
    }

    /// Python style rendering, e.g. `<class 'dict'>`
    pub fn repr(&self) -> String {
        format!("<class '{}'>", self.qualname())
    }

    pub fn object() -> Self {
        BUILTIN.object.clone()
    }

    pub fn none() -> Self {
        BUILTIN.none.clone()
    }

    pub fn bool() -> Self {
        BUILTIN.bool.clone()
    }

    pub fn int() -> Self {
        BUILTIN.int.clone()
    }

    pub fn float() -> Self {
        BUILTIN.float.clone()
    }

    pub fn str() -> Self {
        BUILTIN.str.clone()
    }

    pub fn bytes() -> Self {
        BUILTIN.bytes.clone()
    }

    pub fn list() -> Self {
        BUILTIN.list.clone()
    }

    pub fn tuple() -> Self {
        BUILTIN.tuple.clone()
    }

    pub fn dict() -> Self {
        BUILTIN.dict.clone()
    }

    pub fn set() -> Self {
        BUILTIN.set.clone()
    }

    pub fn frozenset() -> Self {
        BUILTIN.frozenset.clone()
    }

    pub fn generator() -> Self {
        BUILTIN.generator.clone()
    }

    pub fn function() -> Self {
        BUILTIN.function.clone()
    }

    /// The type of types
    pub fn metaclass() -> Self {
        BUILTIN.metaclass.clone()
    }

    pub fn partial() -> Self {
        BUILTIN.partial.clone()
    }

    /// Mock call records
    pub fn call() -> Self {
        BUILTIN.call.clone()
    }

    pub fn base_exception() -> Self {
        BUILTIN.base_exception.clone()
    }

    pub fn exception() -> Self {
        BUILTIN.exception.clone()
    }

    pub fn value_error() -> Self {
        BUILTIN.value_error.clone()
    }

    pub fn type_error() -> Self {
        BUILTIN.type_error.clone()
    }

    pub fn key_error() -> Self {
        BUILTIN.key_error.clone()
    }

    pub fn attribute_error() -> Self {
        BUILTIN.attribute_error.clone()
    }

    pub fn runtime_error() -> Self {
        BUILTIN.runtime_error.clone()
    }
}

fn split_path(path: &str) -> (&str, &str) {
    path.rsplit_once('.').unwrap_or(("", path))
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.qualname() == other.qualname()
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualname().hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({})", self.qualname())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualname())
    }
}

struct Builtins {
    object: Type,
    none: Type,
    bool: Type,
    int: Type,
    float: Type,
    str: Type,
    bytes: Type,
    list: Type,
    tuple: Type,
    dict: Type,
    set: Type,
    frozenset: Type,
    generator: Type,
    function: Type,
    metaclass: Type,
    partial: Type,
    call: Type,
    base_exception: Type,
    exception: Type,
    value_error: Type,
    type_error: Type,
    key_error: Type,
    attribute_error: Type,
    runtime_error: Type,
}

impl Builtins {
    fn declare() -> Self {
        let object = Type::declare(BUILTINS, "object", None);
        let builtin = |name: &str, base: &Type| Type::declare(BUILTINS, name, Some(base.clone()));

        let int = builtin("int", &object);
        let base_exception = builtin("BaseException", &object);
        let exception = builtin("Exception", &base_exception);

        Self {
            none: builtin("NoneType", &object),
            bool: builtin("bool", &int),
            float: builtin("float", &object),
            str: builtin("str", &object),
            bytes: builtin("bytes", &object),
            list: builtin("list", &object),
            tuple: builtin("tuple", &object),
            dict: builtin("dict", &object),
            set: builtin("set", &object),
            frozenset: builtin("frozenset", &object),
            generator: builtin("generator", &object),
            function: builtin("function", &object),
            metaclass: builtin("type", &object),
            partial: Type::declare("functools", "partial", Some(object.clone())),
            call: Type::declare("mock", "Call", Some(object.clone())),
            value_error: builtin("ValueError", &exception),
            type_error: builtin("TypeError", &exception),
            key_error: builtin("KeyError", &exception),
            attribute_error: builtin("AttributeError", &exception),
            runtime_error: builtin("RuntimeError", &exception),
            int,
            base_exception,
            exception,
            object,
        }
    }
}
