//! Dynamic values understood by the comparison engine
//!
//! [`Value`] is a small object model: scalars, shared containers that can be
//! mutated after construction (so self-referential structures can be built),
//! objects with attribute dictionaries and slots, exceptions, partial
//! applications, mock call records, lazy generators and matchers.

use std::cell::{Ref, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::comparison::Matcher;
use crate::error::CompareResult;
use crate::repr;
use crate::types::Type;

/// A value that can be compared
#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Rc<List>),
    Tuple(Rc<Tuple>),
    Dict(Rc<Dict>),
    Set(Rc<Set>),
    Generator(Rc<Generator>),
    Object(Rc<Object>),
    Exception(Rc<Exception>),
    Partial(Rc<Partial>),
    Call(Rc<Call>),
    Function(Rc<Function>),
    Type(Type),
    Matcher(Rc<dyn Matcher>),
}

/// Mutable ordered sequence
pub struct List {
    class: Type,
    items: RefCell<Vec<Value>>,
}

impl List {
    pub fn class(&self) -> &Type {
        &self.class
    }

    pub fn items(&self) -> Ref<'_, Vec<Value>> {
        self.items.borrow()
    }

    /// Append an item; appending the list to itself creates a cycle
    pub fn push(&self, item: impl Into<Value>) {
        self.items.borrow_mut().push(item.into());
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

/// Immutable sequence, optionally with named fields
pub struct Tuple {
    class: Type,
    fields: Option<Vec<String>>,
    items: Vec<Value>,
}

impl Tuple {
    pub fn class(&self) -> &Type {
        &self.class
    }

    /// Field names of a named tuple
    pub fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }
}

/// Insertion ordered mapping with arbitrary keys
pub struct Dict {
    class: Type,
    entries: RefCell<Vec<(Value, Value)>>,
}

impl Dict {
    pub fn class(&self) -> &Type {
        &self.class
    }

    pub fn entries(&self) -> Ref<'_, Vec<(Value, Value)>> {
        self.entries.borrow()
    }

    /// Insert or replace the value stored under an equal key
    pub fn insert(&self, key: impl Into<Value>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let mut entries = self.entries.borrow_mut();
        match entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &Value) -> Option<Value> {
        self.entries
            .borrow()
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.clone())
    }

    pub fn keys(&self) -> Vec<Value> {
        self.entries.borrow().iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Unordered collection of distinct items
pub struct Set {
    class: Type,
    items: Vec<Value>,
}

impl Set {
    pub fn class(&self) -> &Type {
        &self.class
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn contains(&self, item: &Value) -> bool {
        self.items.iter().any(|existing| existing == item)
    }
}

enum GeneratorState {
    Pending(Box<dyn Iterator<Item = Value>>),
    Drained(Vec<Value>),
}

/// Lazy sequence, drained the first time its items are needed
pub struct Generator {
    state: RefCell<GeneratorState>,
}

impl Generator {
    /// All items produced by the generator
    ///
    /// Drained items are kept, so later calls see the same items.
    pub fn items(&self) -> Vec<Value> {
        let mut state = self.state.borrow_mut();
        let drained = match std::mem::replace(&mut *state, GeneratorState::Drained(Vec::new())) {
            GeneratorState::Pending(iter) => iter.collect(),
            GeneratorState::Drained(items) => items,
        };
        *state = GeneratorState::Drained(drained.clone());
        drained
    }
}

/// How `==` behaves for an [`Object`]
#[derive(Clone)]
pub enum ObjectEq {
    /// Equal only to itself
    Identity,
    /// Equal to objects of the same class with equal attributes
    Attributes,
    /// User supplied equality, which may be lossy
    Custom(Rc<dyn Fn(&Object, &Object) -> bool>),
}

/// An instance of a class, with an attribute dictionary and/or slots
pub struct Object {
    class: Type,
    dict: Option<RefCell<Vec<(String, Value)>>>,
    slots: RefCell<Vec<(String, Option<Value>)>>,
    repr: Option<String>,
    eq: ObjectEq,
}

impl Object {
    /// An object with an (empty) attribute dictionary
    pub fn new(class: Type) -> Self {
        Self {
            class,
            dict: Some(RefCell::new(Vec::new())),
            slots: RefCell::new(Vec::new()),
            repr: None,
            eq: ObjectEq::Identity,
        }
    }

    /// An object without an attribute dictionary whose state lives in unset slots
    pub fn with_slots(class: Type, names: &[&str]) -> Self {
        Self {
            class,
            dict: None,
            slots: RefCell::new(names.iter().map(|n| (n.to_string(), None)).collect()),
            repr: None,
            eq: ObjectEq::Identity,
        }
    }

    /// An object exposing no attributes at all
    pub fn opaque(class: Type) -> Self {
        Self {
            class,
            dict: None,
            slots: RefCell::new(Vec::new()),
            repr: None,
            eq: ObjectEq::Identity,
        }
    }

    pub fn with_attr(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Fill a slot, declaring it if needed
    pub fn with_slot(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        {
            let mut slots = self.slots.borrow_mut();
            match slots.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = Some(value),
                None => slots.push((name, Some(value))),
            }
        }
        self
    }

    pub fn with_repr(mut self, repr: impl Into<String>) -> Self {
        self.repr = Some(repr.into());
        self
    }

    pub fn with_eq(mut self, eq: ObjectEq) -> Self {
        self.eq = eq;
        self
    }

    pub fn class(&self) -> &Type {
        &self.class
    }

    /// Custom representation, if one was given
    pub fn repr(&self) -> Option<&str> {
        self.repr.as_deref()
    }

    /// Set an attribute: declared slots win, then the attribute dictionary
    ///
    /// Objects without a dictionary silently grow one.
    pub fn set_attr(&self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.slots.borrow_mut().iter_mut().find(|(n, _)| *n == name) {
            slot.1 = Some(value);
            return;
        }
        match &self.dict {
            Some(dict) => upsert(&mut dict.borrow_mut(), name, value),
            None => self.slots.borrow_mut().push((name, Some(value))),
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<Value> {
        if let Some(dict) = &self.dict {
            if let Some((_, value)) = dict.borrow().iter().find(|(n, _)| n == name) {
                return Some(value.clone());
            }
        }
        self.slots
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, value)| value.clone())
    }

    /// Dictionary attributes plus filled slots, `None` when the object has neither
    pub fn attributes(&self) -> Option<Vec<(String, Value)>> {
        let slots = self.slots.borrow();
        let mut attrs = match &self.dict {
            Some(dict) => dict.borrow().clone(),
            None if !slots.is_empty() => Vec::new(),
            None => return None,
        };
        for (name, value) in slots.iter() {
            if let Some(value) = value {
                upsert(&mut attrs, name.clone(), value.clone());
            }
        }
        Some(attrs)
    }
}

/// An exception: constructor arguments plus attributes set afterwards
pub struct Exception {
    class: Type,
    args: Vec<Value>,
    attrs: RefCell<Vec<(String, Value)>>,
}

impl Exception {
    pub fn new<I, T>(class: Type, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self {
            class,
            args: args.into_iter().map(Into::into).collect(),
            attrs: RefCell::new(Vec::new()),
        }
    }

    pub fn with_attr(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn set_attr(&self, name: impl Into<String>, value: impl Into<Value>) {
        upsert(&mut self.attrs.borrow_mut(), name.into(), value.into());
    }

    pub fn class(&self) -> &Type {
        &self.class
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn get_attr(&self, name: &str) -> Option<Value> {
        if name == "args" {
            return Some(Value::tuple(self.args.clone()));
        }
        self.attrs
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.clone())
    }

    /// Ancillary attributes with the constructor arguments as `args`
    pub fn attributes(&self) -> Vec<(String, Value)> {
        let mut attrs = self.attrs.borrow().clone();
        upsert(&mut attrs, "args".to_string(), Value::tuple(self.args.clone()));
        attrs
    }
}

/// A callable with some arguments already bound
pub struct Partial {
    func: Value,
    args: Vec<Value>,
    keywords: Vec<(String, Value)>,
}

impl Partial {
    pub fn new<A, K>(func: impl Into<Value>, args: A, keywords: K) -> Self
    where
        A: IntoIterator,
        A::Item: Into<Value>,
        K: IntoIterator<Item = (&'static str, Value)>,
    {
        Self {
            func: func.into(),
            args: args.into_iter().map(Into::into).collect(),
            keywords: keywords
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }

    pub fn func(&self) -> &Value {
        &self.func
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn keywords(&self) -> &[(String, Value)] {
        &self.keywords
    }

    /// `func`, `args` and `keywords` as an attribute mapping
    pub fn attributes(&self) -> Vec<(String, Value)> {
        vec![
            ("func".to_string(), self.func.clone()),
            ("args".to_string(), Value::tuple(self.args.clone())),
            ("keywords".to_string(), keywords_dict(&self.keywords)),
        ]
    }
}

/// A recorded call, as produced by a mock
pub struct Call {
    name: Option<String>,
    args: Vec<Value>,
    kwargs: Vec<(String, Value)>,
    parent: Option<Rc<Call>>,
}

impl Call {
    /// A call made on the mock itself, e.g. `call(1, x=2)`
    pub fn new<A>(args: A, kwargs: Vec<(&str, Value)>) -> Self
    where
        A: IntoIterator,
        A::Item: Into<Value>,
    {
        Self {
            name: None,
            args: args.into_iter().map(Into::into).collect(),
            kwargs: kwargs
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            parent: None,
        }
    }

    /// A call made on a child of the mock, e.g. `call.method(1)`
    pub fn named<A>(name: impl Into<String>, args: A, kwargs: Vec<(&str, Value)>) -> Self
    where
        A: IntoIterator,
        A::Item: Into<Value>,
    {
        Self {
            name: Some(name.into()),
            ..Self::new(args, kwargs)
        }
    }

    /// Chain this call onto the result of `parent`
    pub fn with_parent(mut self, parent: Call) -> Self {
        self.parent = Some(Rc::new(parent));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn kwargs(&self) -> &[(String, Value)] {
        &self.kwargs
    }

    pub fn parent(&self) -> Option<&Rc<Call>> {
        self.parent.as_ref()
    }
}

/// A named callable, equal only to itself
pub struct Function {
    name: String,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Value {
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::list_of(Type::list(), items)
    }

    /// A list whose class derives from `list`
    pub fn list_of<I>(class: Type, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::List(Rc::new(List {
            class,
            items: RefCell::new(items.into_iter().map(Into::into).collect()),
        }))
    }

    pub fn tuple<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Tuple(Rc::new(Tuple {
            class: Type::tuple(),
            fields: None,
            items: items.into_iter().map(Into::into).collect(),
        }))
    }

    /// A named tuple; `class` should derive from `tuple`
    pub fn named_tuple<I>(class: Type, fields: &[&str], items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Tuple(Rc::new(Tuple {
            class,
            fields: Some(fields.iter().map(|f| f.to_string()).collect()),
            items: items.into_iter().map(Into::into).collect(),
        }))
    }

    pub fn dict<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Self::dict_of(Type::dict(), entries)
    }

    /// A dict whose class derives from `dict`
    pub fn dict_of<I, K, V>(class: Type, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let dict = Dict {
            class,
            entries: RefCell::new(Vec::new()),
        };
        for (key, value) in entries {
            dict.insert(key, value);
        }
        Value::Dict(Rc::new(dict))
    }

    pub fn set<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::set_of(Type::set(), items)
    }

    pub fn frozenset<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::set_of(Type::frozenset(), items)
    }

    /// A set whose class derives from `set` or `frozenset`
    pub fn set_of<I>(class: Type, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut distinct: Vec<Value> = Vec::new();
        for item in items {
            let item = item.into();
            if !distinct.contains(&item) {
                distinct.push(item);
            }
        }
        Value::Set(Rc::new(Set {
            class,
            items: distinct,
        }))
    }

    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(data.into())
    }

    /// A generator over `iter`, drained lazily
    pub fn generator<I>(iter: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value> + 'static,
        I::IntoIter: 'static,
    {
        Value::Generator(Rc::new(Generator {
            state: RefCell::new(GeneratorState::Pending(Box::new(
                iter.into_iter().map(Into::into),
            ))),
        }))
    }

    pub fn function(name: impl Into<String>) -> Self {
        Value::Function(Rc::new(Function::new(name)))
    }

    pub fn matcher(matcher: impl Matcher + 'static) -> Self {
        Value::Matcher(Rc::new(matcher))
    }

    /// The class of this value
    pub fn type_of(&self) -> Type {
        match self {
            Value::None => Type::none(),
            Value::Bool(_) => Type::bool(),
            Value::Int(_) => Type::int(),
            Value::Float(_) => Type::float(),
            Value::Str(_) => Type::str(),
            Value::Bytes(_) => Type::bytes(),
            Value::List(list) => list.class.clone(),
            Value::Tuple(tuple) => tuple.class.clone(),
            Value::Dict(dict) => dict.class.clone(),
            Value::Set(set) => set.class.clone(),
            Value::Generator(_) => Type::generator(),
            Value::Object(object) => object.class.clone(),
            Value::Exception(exception) => exception.class.clone(),
            Value::Partial(_) => Type::partial(),
            Value::Call(_) => Type::call(),
            Value::Function(_) => Type::function(),
            Value::Type(_) => Type::metaclass(),
            Value::Matcher(matcher) => matcher.type_of(),
        }
    }

    /// Address of the shared allocation behind reference values
    ///
    /// Scalars have no identity.
    pub fn identity(&self) -> Option<usize> {
        fn addr<T: ?Sized>(rc: &Rc<T>) -> usize {
            Rc::as_ptr(rc) as *const () as usize
        }
        match self {
            Value::List(rc) => Some(addr(rc)),
            Value::Tuple(rc) => Some(addr(rc)),
            Value::Dict(rc) => Some(addr(rc)),
            Value::Set(rc) => Some(addr(rc)),
            Value::Generator(rc) => Some(addr(rc)),
            Value::Object(rc) => Some(addr(rc)),
            Value::Exception(rc) => Some(addr(rc)),
            Value::Partial(rc) => Some(addr(rc)),
            Value::Call(rc) => Some(addr(rc)),
            Value::Function(rc) => Some(addr(rc)),
            Value::Matcher(rc) => Some(addr(rc)),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Rc<List>> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Rc<Dict>> {
        match self {
            Value::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Rc<Object>> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Dict(_))
    }

    pub fn is_matcher(&self) -> bool {
        matches!(self, Value::Matcher(_))
    }

    pub fn is_iterable(&self) -> bool {
        matches!(
            self,
            Value::Str(_)
                | Value::Bytes(_)
                | Value::List(_)
                | Value::Tuple(_)
                | Value::Dict(_)
                | Value::Set(_)
                | Value::Generator(_)
        )
    }

    /// Items produced by iterating the value; dicts yield their keys
    pub fn iter_items(&self) -> Option<Vec<Value>> {
        match self {
            Value::Str(s) => Some(s.chars().map(|c| Value::Str(c.to_string())).collect()),
            Value::Bytes(b) => Some(b.iter().map(|byte| Value::Int(i64::from(*byte))).collect()),
            Value::List(list) => Some(list.items().clone()),
            Value::Tuple(tuple) => Some(tuple.items.clone()),
            Value::Dict(dict) => Some(dict.keys()),
            Value::Set(set) => Some(set.items.clone()),
            Value::Generator(generator) => Some(generator.items()),
            _ => None,
        }
    }

    /// Attribute mapping, `None` for values without introspectable attributes
    pub fn attributes(&self) -> Option<Vec<(String, Value)>> {
        match self {
            Value::Object(object) => object.attributes(),
            Value::Exception(exception) => Some(exception.attributes()),
            Value::Partial(partial) => Some(partial.attributes()),
            Value::Function(_) => Some(Vec::new()),
            _ => None,
        }
    }

    /// Look up a single attribute
    pub fn get_attr(&self, name: &str) -> Option<Value> {
        match self {
            Value::Object(object) => object.get_attr(name),
            Value::Exception(exception) => exception.get_attr(name),
            Value::Partial(partial) => partial
                .attributes()
                .into_iter()
                .find(|(n, _)| n == name)
                .map(|(_, value)| value),
            Value::Tuple(tuple) => {
                let position = tuple.fields.as_ref()?.iter().position(|f| f == name)?;
                tuple.items.get(position).cloned()
            }
            _ => None,
        }
    }

    /// Native equality
    ///
    /// Fails only when a matcher taking part in the check fails.
    pub fn try_eq(&self, other: &Value) -> CompareResult<bool> {
        Equality::default().eq(self, other)
    }

    fn as_number(&self) -> Option<Number> {
        match self {
            Value::Bool(b) => Some(Number::Int(i64::from(*b))),
            Value::Int(i) => Some(Number::Int(*i)),
            Value::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }

    pub(crate) fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::to_f64)
    }
}

pub(crate) fn upsert(attrs: &mut Vec<(String, Value)>, name: String, value: Value) {
    match attrs.iter_mut().find(|(n, _)| *n == name) {
        Some(entry) => entry.1 = value,
        None => attrs.push((name, value)),
    }
}

pub(crate) fn keywords_dict(keywords: &[(String, Value)]) -> Value {
    Value::dict(
        keywords
            .iter()
            .map(|(name, value)| (Value::Str(name.clone()), value.clone())),
    )
}

#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn to_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    fn equals(self, other: Number) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (a, b) => a.to_f64() == b.to_f64(),
        }
    }
}

/// Cycle guarded structural equality
#[derive(Default)]
struct Equality {
    active: HashSet<(usize, usize)>,
}

impl Equality {
    fn eq(&mut self, a: &Value, b: &Value) -> CompareResult<bool> {
        Ok(match (a, b) {
            (Value::Matcher(matcher), other) | (other, Value::Matcher(matcher)) => {
                return matcher.matches(other)
            }
            (Value::None, Value::None) => true,
            (Value::Str(x), Value::Str(y)) => x == y,
            (Value::Bytes(x), Value::Bytes(y)) => x == y,
            (Value::List(x), Value::List(y)) => {
                return self.guarded(a, b, |eq| eq.eq_items(&x.items(), &y.items()))
            }
            (Value::Tuple(x), Value::Tuple(y)) => {
                return self.guarded(a, b, |eq| eq.eq_items(&x.items, &y.items))
            }
            (Value::Dict(x), Value::Dict(y)) => {
                return self.guarded(a, b, |eq| eq.eq_entries(&x.entries(), &y.entries()))
            }
            (Value::Set(x), Value::Set(y)) => {
                return self.guarded(a, b, |eq| eq.eq_unordered(&x.items, &y.items))
            }
            (Value::Object(x), Value::Object(y)) => return self.eq_objects(x, y),
            (Value::Call(x), Value::Call(y)) => return self.eq_calls(x, y),
            (Value::Generator(x), Value::Generator(y)) => Rc::ptr_eq(x, y),
            (Value::Exception(x), Value::Exception(y)) => Rc::ptr_eq(x, y),
            (Value::Partial(x), Value::Partial(y)) => Rc::ptr_eq(x, y),
            (Value::Function(x), Value::Function(y)) => Rc::ptr_eq(x, y),
            (Value::Type(x), Value::Type(y)) => x == y,
            _ => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => x.equals(y),
                _ => false,
            },
        })
    }

    /// Run `check` unless this pair is already being compared further up
    fn guarded(
        &mut self,
        a: &Value,
        b: &Value,
        check: impl FnOnce(&mut Self) -> CompareResult<bool>,
    ) -> CompareResult<bool> {
        let key = match (a.identity(), b.identity()) {
            (Some(x), Some(y)) if x == y => return Ok(true),
            (Some(x), Some(y)) => (x, y),
            _ => return check(self),
        };
        if !self.active.insert(key) {
            return Ok(true);
        }
        let result = check(self);
        self.active.remove(&key);
        result
    }

    fn eq_items(&mut self, a: &[Value], b: &[Value]) -> CompareResult<bool> {
        if a.len() != b.len() {
            return Ok(false);
        }
        for (x, y) in a.iter().zip(b) {
            if !self.eq(x, y)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn eq_unordered(&mut self, a: &[Value], b: &[Value]) -> CompareResult<bool> {
        if a.len() != b.len() {
            return Ok(false);
        }
        for x in a {
            if !self.contains(b, x)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn contains(&mut self, haystack: &[Value], needle: &Value) -> CompareResult<bool> {
        for item in haystack {
            if self.eq(needle, item)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn eq_entries(&mut self, a: &[(Value, Value)], b: &[(Value, Value)]) -> CompareResult<bool> {
        if a.len() != b.len() {
            return Ok(false);
        }
        for (key, value) in a {
            let mut matched = None;
            for (other_key, other_value) in b {
                if self.eq(key, other_key)? {
                    matched = Some(other_value);
                    break;
                }
            }
            match matched {
                Some(other_value) if self.eq(value, other_value)? => {}
                _ => return Ok(false),
            }
        }
        Ok(true)
    }

    fn eq_named(&mut self, a: &[(String, Value)], b: &[(String, Value)]) -> CompareResult<bool> {
        if a.len() != b.len() {
            return Ok(false);
        }
        for (name, value) in a {
            match b.iter().find(|(other, _)| other == name) {
                Some((_, other_value)) if self.eq(value, other_value)? => {}
                _ => return Ok(false),
            }
        }
        Ok(true)
    }

    fn eq_objects(&mut self, x: &Rc<Object>, y: &Rc<Object>) -> CompareResult<bool> {
        if Rc::ptr_eq(x, y) {
            return Ok(true);
        }
        match &x.eq {
            ObjectEq::Identity => Ok(false),
            ObjectEq::Custom(eq) => Ok(eq(x, y)),
            ObjectEq::Attributes => {
                if x.class != y.class {
                    return Ok(false);
                }
                match (x.attributes(), y.attributes()) {
                    (Some(a), Some(b)) => {
                        let (xa, ya) = (Value::Object(x.clone()), Value::Object(y.clone()));
                        self.guarded(&xa, &ya, |eq| eq.eq_named(&a, &b))
                    }
                    _ => Ok(false),
                }
            }
        }
    }

    fn eq_calls(&mut self, x: &Call, y: &Call) -> CompareResult<bool> {
        if x.name != y.name
            || !self.eq_items(&x.args, &y.args)?
            || !self.eq_named(&x.kwargs, &y.kwargs)?
        {
            return Ok(false);
        }
        match (&x.parent, &y.parent) {
            (Some(a), Some(b)) => self.eq_calls(a, b),
            _ => Ok(true),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.try_eq(other).unwrap_or(false)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&repr::repr(self))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&repr::str_of(self))
    }
}
