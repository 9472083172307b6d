//! Textual rendering of values
//!
//! `repr` is the unambiguous form used in every message, `pformat` wraps long
//! containers over several lines with dict keys sorted, and the sort helpers
//! give unordered collections a stable order in reports.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::value::{Call, Value};

/// Width used by [`pformat`] before containers are wrapped
const PFORMAT_WIDTH: usize = 80;

/// Representations longer than this are truncated by [`short_repr`]
const SHORT_REPR_LIMIT: usize = 30;

/// Unambiguous single-line representation
pub fn repr(value: &Value) -> String {
    Renderer::new(false).render(value)
}

/// Informal representation: strings render raw, everything else as [`repr`]
pub fn str_of(value: &Value) -> String {
    match value {
        Value::Str(s) => s.clone(),
        other => repr(other),
    }
}

/// Pretty representation wrapped at 80 columns with dict keys sorted
pub fn pformat(value: &Value) -> String {
    Pretty {
        width: PFORMAT_WIDTH,
        renderer: Renderer::new(true),
    }
    .format(value, 0)
}

/// [`repr`] truncated to 30 characters
pub fn short_repr(value: &Value) -> String {
    let full = repr(value);
    if full.chars().count() > SHORT_REPR_LIMIT {
        let mut short: String = full.chars().take(SHORT_REPR_LIMIT).collect();
        short.push_str("...");
        short
    } else {
        full
    }
}

/// Quote a string, preferring single quotes
pub fn repr_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || ('\u{7f}'..='\u{a0}').contains(&c) => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

pub fn repr_bytes(data: &[u8]) -> String {
    let quote = if data.contains(&b'\'') && !data.contains(&b'"') {
        b'"'
    } else {
        b'\''
    };
    let mut out = String::with_capacity(data.len() + 3);
    out.push('b');
    out.push(quote as char);
    for &byte in data {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if b == quote => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(byte as char),
            _ => out.push_str(&format!("\\x{:02x}", byte)),
        }
    }
    out.push(quote as char);
    out
}

/// Shortest round-tripping float text, e.g. `1.0`, `0.1`, `1e+16`, `nan`
pub fn repr_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let text = format!("{:?}", f);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

/// Natural ordering where one exists: numbers, strings, bytes and sequences of those
pub fn py_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => Some(x.cmp(y)),
        (Value::Bytes(x), Value::Bytes(y)) => Some(x.cmp(y)),
        (Value::List(x), Value::List(y)) => seq_cmp(&x.items(), &y.items()),
        (Value::Tuple(x), Value::Tuple(y)) => seq_cmp(x.items(), y.items()),
        _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
    }
}

fn seq_cmp(a: &[Value], b: &[Value]) -> Option<Ordering> {
    for (x, y) in a.iter().zip(b) {
        if x == y {
            continue;
        }
        return py_cmp(x, y);
    }
    Some(a.len().cmp(&b.len()))
}

/// Items in natural order, or unchanged when some pair cannot be ordered
pub fn sorted_values(items: Vec<Value>) -> Vec<Value> {
    let comparable = items
        .iter()
        .all(|a| items.iter().all(|b| py_cmp(a, b).is_some()));
    if !comparable {
        return items;
    }
    let mut sorted = items;
    sorted.sort_by(|a, b| py_cmp(a, b).unwrap_or(Ordering::Equal));
    sorted
}

/// Items ordered by their informal text
pub fn sorted_by_str(items: Vec<Value>) -> Vec<Value> {
    let mut keyed: Vec<(String, Value)> = items.into_iter().map(|v| (str_of(&v), v)).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, v)| v).collect()
}

struct Renderer {
    sort_dicts: bool,
    active: Vec<usize>,
}

impl Renderer {
    fn new(sort_dicts: bool) -> Self {
        Self {
            sort_dicts,
            active: Vec::new(),
        }
    }

    fn render(&mut self, value: &Value) -> String {
        match value {
            Value::None => "None".to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => repr_float(*f),
            Value::Str(s) => repr_str(s),
            Value::Bytes(b) => repr_bytes(b),
            Value::List(list) => self.nested(value, "[...]", |r| {
                let items = list.items().clone();
                format!("[{}]", r.join(&items))
            }),
            Value::Tuple(tuple) => self.nested(value, "(...)", |r| match tuple.fields() {
                Some(fields) => {
                    let parts: Vec<String> = fields
                        .iter()
                        .zip(tuple.items())
                        .map(|(field, item)| format!("{}={}", field, r.render(item)))
                        .collect();
                    format!("{}({})", tuple.class().name(), parts.join(", "))
                }
                None if tuple.items().len() == 1 => {
                    format!("({},)", r.render(&tuple.items()[0]))
                }
                None => format!("({})", r.join(tuple.items())),
            }),
            Value::Dict(dict) => self.nested(value, "{...}", |r| {
                let entries = r.dict_entries(&dict.entries());
                let parts: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", r.render(k), r.render(v)))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }),
            Value::Set(set) => self.nested(value, "{...}", |r| {
                let items = set.items();
                let name = set.class().name().to_string();
                match (name.as_str(), items.is_empty()) {
                    ("set", true) => "set()".to_string(),
                    ("set", false) => format!("{{{}}}", r.join(items)),
                    (_, true) => format!("{}()", name),
                    (_, false) => format!("{}({{{}}})", name, r.join(items)),
                }
            }),
            Value::Generator(generator) => {
                format!("<generator object at {:p}>", Rc::as_ptr(generator))
            }
            Value::Object(object) => match object.repr() {
                Some(custom) => custom.to_string(),
                None => format!(
                    "<{} object at {:p}>",
                    object.class().qualname(),
                    Rc::as_ptr(object)
                ),
            },
            Value::Exception(exception) => {
                format!("{}({})", exception.class().name(), self.join(exception.args()))
            }
            Value::Partial(partial) => {
                let mut parts = vec![self.render(partial.func())];
                parts.extend(partial.args().iter().map(|arg| self.render(arg)));
                parts.extend(
                    partial
                        .keywords()
                        .iter()
                        .map(|(name, v)| format!("{}={}", name, self.render(v))),
                );
                format!("functools.partial({})", parts.join(", "))
            }
            Value::Call(call) => self.render_call(call),
            Value::Function(function) => format!("<function {}>", function.name()),
            Value::Type(ty) => ty.repr(),
            Value::Matcher(matcher) => matcher.describe(),
        }
    }

    /// Render `value` unless it is already being rendered further up
    fn nested(
        &mut self,
        value: &Value,
        placeholder: &str,
        render: impl FnOnce(&mut Self) -> String,
    ) -> String {
        let Some(id) = value.identity() else {
            return render(self);
        };
        if self.active.contains(&id) {
            return placeholder.to_string();
        }
        self.active.push(id);
        let text = render(self);
        self.active.pop();
        text
    }

    fn join(&mut self, items: &[Value]) -> String {
        items
            .iter()
            .map(|item| self.render(item))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn dict_entries(&self, entries: &[(Value, Value)]) -> Vec<(Value, Value)> {
        let entries = entries.to_vec();
        if !self.sort_dicts {
            return entries;
        }
        let keys = sorted_values(entries.iter().map(|(k, _)| k.clone()).collect());
        keys.into_iter()
            .filter_map(|key| {
                entries
                    .iter()
                    .find(|(k, _)| same_key(k, &key))
                    .cloned()
            })
            .collect()
    }

    fn render_call(&mut self, call: &Call) -> String {
        let mut head = match call.parent() {
            Some(parent) => self.render_call(parent),
            None => "call".to_string(),
        };
        if let Some(name) = call.name() {
            head.push('.');
            head.push_str(name);
        }
        let mut parts: Vec<String> = call.args().iter().map(|arg| self.render(arg)).collect();
        parts.extend(
            call.kwargs()
                .iter()
                .map(|(name, v)| format!("{}={}", name, self.render(v))),
        );
        format!("{}({})", head, parts.join(", "))
    }
}

/// Key identity within a single dict: pointer identity first, then equality
fn same_key(a: &Value, b: &Value) -> bool {
    match (a.identity(), b.identity()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

struct Pretty {
    width: usize,
    renderer: Renderer,
}

impl Pretty {
    fn format(&mut self, value: &Value, indent: usize) -> String {
        let flat = self.renderer.render(value);
        if indent + flat.chars().count() <= self.width {
            return flat;
        }
        match value {
            Value::List(list) => {
                let items = list.items().clone();
                self.wrap(value, "[", "]", &items, indent, false)
            }
            Value::Tuple(tuple) if tuple.fields().is_none() => {
                let items = tuple.items().to_vec();
                self.wrap(value, "(", ")", &items, indent, items.len() == 1)
            }
            Value::Set(set) if set.class().name() == "set" => {
                let items = sorted_values(set.items().to_vec());
                self.wrap(value, "{", "}", &items, indent, false)
            }
            Value::Dict(dict) => {
                let entries = self.renderer.dict_entries(&dict.entries());
                self.wrap_dict(value, &entries, indent)
            }
            _ => flat,
        }
    }

    fn wrap(
        &mut self,
        value: &Value,
        open: &str,
        close: &str,
        items: &[Value],
        indent: usize,
        trailing_comma: bool,
    ) -> String {
        if items.is_empty() {
            return format!("{}{}", open, close);
        }
        let inner = indent + open.len();
        self.enter(value);
        let parts: Vec<String> = items.iter().map(|item| self.format(item, inner)).collect();
        self.leave(value);
        let separator = format!(",\n{}", " ".repeat(inner));
        format!(
            "{}{}{}{}",
            open,
            parts.join(&separator),
            if trailing_comma { "," } else { "" },
            close
        )
    }

    fn wrap_dict(&mut self, value: &Value, entries: &[(Value, Value)], indent: usize) -> String {
        if entries.is_empty() {
            return "{}".to_string();
        }
        let inner = indent + 1;
        self.enter(value);
        let parts: Vec<String> = entries
            .iter()
            .map(|(key, item)| {
                let key = self.renderer.render(key);
                let item = self.format(item, inner + key.chars().count() + 2);
                format!("{}: {}", key, item)
            })
            .collect();
        self.leave(value);
        let separator = format!(",\n{}", " ".repeat(inner));
        format!("{{{}}}", parts.join(&separator))
    }

    fn enter(&mut self, value: &Value) {
        if let Some(id) = value.identity() {
            self.renderer.active.push(id);
        }
    }

    fn leave(&mut self, value: &Value) {
        if value.identity().is_some() {
            self.renderer.active.pop();
        }
    }
}
