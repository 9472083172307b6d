//! Conversions from Rust data into [`Value`]

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::rc::Rc;

use serde::Serialize;

use crate::error::CompareResult;
use crate::types::Type;
use crate::value::{Call, Exception, Function, Object, ObjectEq, Partial, Value};

/// A Rust type that can describe itself as an object with named fields
///
/// ```
/// use tfx_compare::{Diffable, Type, Value};
///
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// impl Diffable for User {
///     fn value_type(&self) -> Type {
///         Type::class("myapp.User")
///     }
///
///     fn fields(&self) -> Vec<(String, Value)> {
///         vec![
///             ("name".to_string(), self.name.as_str().into()),
///             ("age".to_string(), self.age.into()),
///         ]
///     }
/// }
///
/// let user = User { name: "ann".into(), age: 7 };
/// assert_eq!(user.to_value(), user.to_value());
/// ```
pub trait Diffable {
    fn value_type(&self) -> Type;

    fn fields(&self) -> Vec<(String, Value)>;

    /// An object of [`Diffable::value_type`] that is equal to objects with the same fields
    fn to_value(&self) -> Value {
        self.fields()
            .into_iter()
            .fold(
                Object::new(self.value_type()).with_eq(ObjectEq::Attributes),
                |object, (name, value)| object.with_attr(name, value),
            )
            .into()
    }
}

/// Convert anything serializable: maps become dicts, arrays become lists
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> CompareResult<Value> {
    Ok(serde_json::to_value(value)?.into())
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::None,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::list(items),
            serde_json::Value::Object(map) => Value::dict(map),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Int(i64::from(i))
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    match i64::try_from(i) {
                        Ok(i) => Value::Int(i),
                        Err(_) => Value::Float(i as f64),
                    }
                }
            }
        )*
    };
}

from_wide_int!(u64, usize, isize);

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Str(c.to_string())
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Value::None, Into::into)
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Value::tuple([a.into(), b.into()])
    }
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>> From<(A, B, C)> for Value {
    fn from((a, b, c): (A, B, C)) -> Self {
        Value::tuple([a.into(), b.into(), c.into()])
    }
}

impl<K: Into<Value>, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(map: HashMap<K, V, S>) -> Self {
        Value::dict(map)
    }
}

impl<K: Into<Value>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(map: BTreeMap<K, V>) -> Self {
        Value::dict(map)
    }
}

impl<T: Into<Value>, S> From<HashSet<T, S>> for Value {
    fn from(set: HashSet<T, S>) -> Self {
        Value::set(set)
    }
}

impl<T: Into<Value>> From<BTreeSet<T>> for Value {
    fn from(set: BTreeSet<T>) -> Self {
        Value::set(set)
    }
}

impl From<Type> for Value {
    fn from(ty: Type) -> Self {
        Value::Type(ty)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(Rc::new(object))
    }
}

impl From<Exception> for Value {
    fn from(exception: Exception) -> Self {
        Value::Exception(Rc::new(exception))
    }
}

impl From<Partial> for Value {
    fn from(partial: Partial) -> Self {
        Value::Partial(Rc::new(partial))
    }
}

impl From<Call> for Value {
    fn from(call: Call) -> Self {
        Value::Call(Rc::new(call))
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(Rc::new(function))
    }
}

/// Build a list value: `list![1, "two", 3.0]`
#[macro_export]
macro_rules! list {
    () => {
        $crate::Value::list(::std::vec::Vec::<$crate::Value>::new())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Value::list(::std::vec![$($crate::Value::from($item)),+])
    };
}

/// Build a tuple value: `tuple![1, 2]`
#[macro_export]
macro_rules! tuple {
    () => {
        $crate::Value::tuple(::std::vec::Vec::<$crate::Value>::new())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Value::tuple(::std::vec![$($crate::Value::from($item)),+])
    };
}

/// Build a set value: `set![1, 2]`
#[macro_export]
macro_rules! set {
    () => {
        $crate::Value::set(::std::vec::Vec::<$crate::Value>::new())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Value::set(::std::vec![$($crate::Value::from($item)),+])
    };
}

/// Build a dict value: `dict!{"x" => 1, "y" => 2}`
#[macro_export]
macro_rules! dict {
    () => {
        $crate::Value::dict(::std::vec::Vec::<($crate::Value, $crate::Value)>::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Value::dict(::std::vec![$(($crate::Value::from($key), $crate::Value::from($value))),+])
    };
}
