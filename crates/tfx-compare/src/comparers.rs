//! Type specific comparers
//!
//! Each function returns `Ok(None)` when the values are equal and
//! `Ok(Some(message))` describing the difference otherwise, recursing into
//! child values through [`CompareContext::different`].

use crate::context::{CompareContext, Side};
use crate::error::CompareResult;
use crate::repr::{pformat, repr, repr_bytes, repr_str, short_repr, sorted_by_str, sorted_values, str_of};
use crate::text;
use crate::types::Type;
use crate::value::{keywords_dict, Value};

/// Strings and bytes up to this length are reported inline
const INLINE_LIMIT: usize = 10;

/// How child breadcrumbs are written for a mapping comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyStyle {
    /// `['key']`
    Item,
    /// `.name`
    Attribute,
}

impl KeyStyle {
    fn breadcrumb(self, key: &Value) -> String {
        match self {
            KeyStyle::Item => format!("[{}]", repr(key)),
            KeyStyle::Attribute => format!(".{}", str_of(key)),
        }
    }
}

/// Representation based comparison
pub fn compare_simple(
    x: &Value,
    y: &Value,
    context: &mut CompareContext,
) -> CompareResult<Option<String>> {
    // Matchers decide equality themselves, even under `ignore_eq`
    if (x.is_matcher() || y.is_matcher()) && x.try_eq(y)? {
        return Ok(None);
    }
    let x_repr = repr(x);
    let y_repr = repr(y);
    if x_repr != y_repr {
        return Ok(Some(format!(
            "{} != {}",
            context.label(Side::X, &x_repr),
            context.label(Side::Y, &y_repr)
        )));
    }
    // Identical text only differs when `==` disagrees
    if x.try_eq(y)? {
        return Ok(None);
    }
    if x.type_of() != y.type_of() {
        return Ok(Some(compare_with_type(x, y, context)));
    }
    match (x.attributes(), y.attributes()) {
        (Some(x_attrs), Some(y_attrs)) if !x_attrs.is_empty() && !y_attrs.is_empty() => {
            compare_mapping(
                &keyed(x_attrs),
                &keyed(y_attrs),
                context,
                Some(&x.type_of()),
                "attributes ",
                KeyStyle::Attribute,
                true,
            )
        }
        _ => Ok(Some(format!(
            "Both {} and {} appear as {}, but are not equal!",
            context.x_label().unwrap_or("x"),
            context.y_label().unwrap_or("y"),
            x_repr
        ))),
    }
}

/// Both representations along with their types
pub fn compare_with_type(x: &Value, y: &Value, context: &mut CompareContext) -> String {
    let describe = |value: &Value| format!("{} ({})", short_repr(value), value.type_of().repr());
    format!(
        "{} != {}",
        context.label(Side::X, &describe(x)),
        context.label(Side::Y, &describe(y))
    )
}

/// Attribute based comparison of two objects of the same type
pub fn compare_object(
    x: &Value,
    y: &Value,
    context: &mut CompareContext,
) -> CompareResult<Option<String>> {
    let x_type = x.type_of();
    if x_type != y.type_of() || matches!(x, Value::Type(_)) {
        return compare_simple(x, y, context);
    }
    let ignored = context.options().ignore_attributes.for_type(&x_type);
    let (x_attrs, y_attrs) = match (
        extract_attrs(x, &ignored),
        extract_attrs(y, &ignored),
    ) {
        (Some(x_attrs), Some(y_attrs)) if !x_attrs.is_empty() && !y_attrs.is_empty() => {
            (keyed(x_attrs), keyed(y_attrs))
        }
        _ => return compare_simple(x, y, context),
    };
    if !context.options().ignore_eq
        && Value::dict(x_attrs.clone()).try_eq(&Value::dict(y_attrs.clone()))?
    {
        return Ok(None);
    }
    compare_mapping(
        &x_attrs,
        &y_attrs,
        context,
        Some(&x_type),
        "attributes ",
        KeyStyle::Attribute,
        true,
    )
}

/// Constructor arguments first, then every other attribute
pub fn compare_exception(
    x: &Value,
    y: &Value,
    context: &mut CompareContext,
) -> CompareResult<Option<String>> {
    if let (Value::Exception(a), Value::Exception(b)) = (x, y) {
        let x_args = Value::tuple(a.args().to_vec());
        let y_args = Value::tuple(b.args().to_vec());
        if !x_args.try_eq(&y_args)? {
            return compare_simple(x, y, context);
        }
    }
    compare_object(x, y, context)
}

pub fn compare_dict(
    x: &Value,
    y: &Value,
    context: &mut CompareContext,
) -> CompareResult<Option<String>> {
    let (Value::Dict(a), Value::Dict(b)) = (x, y) else {
        return compare_simple(x, y, context);
    };
    let x_entries = a.entries().clone();
    let y_entries = b.entries().clone();
    compare_mapping(
        &x_entries,
        &y_entries,
        context,
        Some(&x.type_of()),
        "",
        KeyStyle::Item,
        true,
    )
}

/// Partition keys into same, only in `x`, only in `y` and differing
///
/// `class` names the header line; without it the report starts with a blank
/// line. Keys only present in `y` are ignored unless `check_y_not_x` is set.
pub(crate) fn compare_mapping(
    x: &[(Value, Value)],
    y: &[(Value, Value)],
    context: &mut CompareContext,
    class: Option<&Type>,
    prefix: &str,
    style: KeyStyle,
    check_y_not_x: bool,
) -> CompareResult<Option<String>> {
    let mut x_not_y = Vec::new();
    let mut shared = Vec::new();
    for (key, x_value) in x {
        match lookup(y, key) {
            Some(y_value) => shared.push((key.clone(), x_value.clone(), y_value)),
            None => x_not_y.push(key.clone()),
        }
    }
    let y_not_x: Vec<Value> = y
        .iter()
        .filter(|(key, _)| lookup(x, key).is_none())
        .map(|(key, _)| key.clone())
        .collect();

    shared.sort_by_cached_key(|(key, _, _)| str_of(key));
    let mut same = Vec::new();
    let mut diffs = Vec::new();
    for (key, x_value, y_value) in shared {
        if context.different(&x_value, &y_value, &style.breadcrumb(&key))? {
            diffs.push(format!(
                "{}: {} != {}",
                repr(&key),
                context.label(Side::X, &pformat(&x_value)),
                context.label(Side::Y, &pformat(&y_value))
            ));
        } else {
            same.push(key);
        }
    }

    if x_not_y.is_empty() && (!check_y_not_x || y_not_x.is_empty()) && diffs.is_empty() {
        return Ok(None);
    }

    let mut lines = Vec::new();
    if let Some(class) = class {
        lines.push(format!("{} not as expected:", class.name()));
    }
    if !same.is_empty() {
        lines.push(String::new());
        lines.push(format!("{}same:", prefix));
        lines.push(repr(&Value::list(sorted_values(same))));
    }
    let x_label = context.x_label().unwrap_or("first").to_string();
    let y_label = context.y_label().unwrap_or("second").to_string();
    let mut only_in = |keys: Vec<Value>, entries: &[(Value, Value)], from: &str, not: &str| {
        if keys.is_empty() {
            return;
        }
        lines.push(String::new());
        lines.push(format!("{}in {} but not {}:", prefix, from, not));
        for key in sorted_by_str(keys) {
            let value = lookup(entries, &key).unwrap_or(Value::None);
            lines.push(format!("{}: {}", repr(&key), pformat(&value)));
        }
    };
    only_in(x_not_y, x, &x_label, &y_label);
    if check_y_not_x {
        only_in(y_not_x, y, &y_label, &x_label);
    }
    if !diffs.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "{}differ:",
            if prefix.is_empty() { "values " } else { prefix }
        ));
        lines.extend(diffs);
    }
    Ok(Some(lines.join("\n")))
}

pub fn compare_set(
    x: &Value,
    y: &Value,
    context: &mut CompareContext,
) -> CompareResult<Option<String>> {
    let (Value::Set(a), Value::Set(b)) = (x, y) else {
        return compare_simple(x, y, context);
    };
    let x_not_y: Vec<Value> = a.items().iter().filter(|i| !b.contains(i)).cloned().collect();
    let y_not_x: Vec<Value> = b.items().iter().filter(|i| !a.contains(i)).cloned().collect();
    if x_not_y.is_empty() && y_not_x.is_empty() {
        return Ok(None);
    }

    let x_label = context.x_label().unwrap_or("first");
    let y_label = context.y_label().unwrap_or("second");
    let mut blocks = vec![format!("{} not as expected:", a.class().name())];
    if !x_not_y.is_empty() {
        blocks.push(format!(
            "in {} but not {}:\n{}",
            x_label,
            y_label,
            repr(&Value::list(sorted_by_str(x_not_y)))
        ));
    }
    if !y_not_x.is_empty() {
        blocks.push(format!(
            "in {} but not {}:\n{}",
            y_label,
            x_label,
            repr(&Value::list(sorted_by_str(y_not_x)))
        ));
    }
    Ok(Some(blocks.join("\n\n")))
}

/// Common prefix, then the rest of each side
pub fn compare_sequence(
    x: &Value,
    y: &Value,
    context: &mut CompareContext,
) -> CompareResult<Option<String>> {
    let (Some(x_items), Some(y_items)) = (sequence_items(x), sequence_items(y)) else {
        return compare_simple(x, y, context);
    };

    let mut i = 0;
    while i < x_items.len() && i < y_items.len() {
        if context.different(&x_items[i], &y_items[i], &format!("[{}]", i))? {
            break;
        }
        i += 1;
    }
    if x_items.len() == y_items.len() && i == x_items.len() {
        return Ok(None);
    }

    Ok(Some(format!(
        "sequence not as expected:\n\nsame:\n{}\n\n{}:\n{}\n\n{}:\n{}",
        pformat(&slice(x, &x_items[..i])),
        context.x_label().unwrap_or("first"),
        pformat(&slice(x, &x_items[i..])),
        context.y_label().unwrap_or("second"),
        pformat(&slice(y, &y_items[i..]))
    )))
}

/// Named tuples compare by field, plain tuples as sequences
pub fn compare_tuple(
    x: &Value,
    y: &Value,
    context: &mut CompareContext,
) -> CompareResult<Option<String>> {
    let (Value::Tuple(a), Value::Tuple(b)) = (x, y) else {
        return compare_sequence(x, y, context);
    };
    match (a.fields(), b.fields()) {
        (Some(x_fields), Some(y_fields)) if !x_fields.is_empty() && !y_fields.is_empty() => {
            if x_fields != y_fields {
                return Ok(Some(compare_with_type(x, y, context)));
            }
            let by_field = |fields: &[String], items: &[Value]| -> Vec<(Value, Value)> {
                fields
                    .iter()
                    .zip(items)
                    .map(|(field, item)| (Value::Str(field.clone()), item.clone()))
                    .collect()
            };
            compare_mapping(
                &by_field(x_fields, a.items()),
                &by_field(y_fields, b.items()),
                context,
                Some(a.class()),
                "",
                KeyStyle::Item,
                true,
            )
        }
        _ => compare_sequence(x, y, context),
    }
}

/// Drain both sides into tuples and compare those
pub fn compare_generator(
    x: &Value,
    y: &Value,
    context: &mut CompareContext,
) -> CompareResult<Option<String>> {
    let (Some(x_items), Some(y_items)) = (x.iter_items(), y.iter_items()) else {
        return compare_simple(x, y, context);
    };
    let x_tuple = Value::tuple(x_items);
    let y_tuple = Value::tuple(y_items);
    if !context.options().ignore_eq && x_tuple.try_eq(&y_tuple)? {
        return Ok(None);
    }
    compare_sequence(&x_tuple, &y_tuple, context)
}

pub fn compare_text(
    x: &Value,
    y: &Value,
    context: &mut CompareContext,
) -> CompareResult<Option<String>> {
    let (Value::Str(a), Value::Str(b)) = (x, y) else {
        return compare_simple(x, y, context);
    };
    let options = context.options();
    let (mut a, mut b) = (a.clone(), b.clone());
    if !options.trailing_whitespace {
        a = text::strip_trailing_whitespace(&a);
        b = text::strip_trailing_whitespace(&b);
    }
    if !options.blanklines {
        a = text::drop_blank_lines(&a);
        b = text::drop_blank_lines(&b);
    }
    if a == b {
        return Ok(None);
    }

    if a.contains('\n') || b.contains('\n') {
        let (a, b) = if options.show_whitespace {
            (text::show_whitespace(&a), text::show_whitespace(&b))
        } else {
            (a, b)
        };
        return Ok(Some(format!(
            "\n{}",
            text::diff(&a, &b, context.x_label(), context.y_label())
        )));
    }

    let labelled_x = context.label(Side::X, &repr_str(&a));
    let labelled_y = context.label(Side::Y, &repr_str(&b));
    if a.chars().count() > INLINE_LIMIT || b.chars().count() > INLINE_LIMIT {
        return Ok(Some(format!("\n{}\n!=\n{}", labelled_x, labelled_y)));
    }
    Ok(Some(format!("{} != {}", labelled_x, labelled_y)))
}

pub fn compare_bytes(
    x: &Value,
    y: &Value,
    context: &mut CompareContext,
) -> CompareResult<Option<String>> {
    let (Value::Bytes(a), Value::Bytes(b)) = (x, y) else {
        return compare_simple(x, y, context);
    };
    if a == b {
        return Ok(None);
    }
    let labelled_x = context.label(Side::X, &repr_bytes(a));
    let labelled_y = context.label(Side::Y, &repr_bytes(b));
    if a.len() > INLINE_LIMIT || b.len() > INLINE_LIMIT {
        return Ok(Some(format!("\n{}\n!=\n{}", labelled_x, labelled_y)));
    }
    Ok(Some(format!("{} != {}", labelled_x, labelled_y)))
}

/// Mock calls: identical calls defer to their parents, anything else is a text diff
pub fn compare_call(
    x: &Value,
    y: &Value,
    context: &mut CompareContext,
) -> CompareResult<Option<String>> {
    if x.try_eq(y)? {
        return Ok(None);
    }
    if let (Value::Call(a), Value::Call(b)) = (x, y) {
        let same_call = a.name() == b.name()
            && Value::tuple(a.args().to_vec()).try_eq(&Value::tuple(b.args().to_vec()))?
            && keywords_dict(a.kwargs()).try_eq(&keywords_dict(b.kwargs()))?;
        if same_call {
            if let (Some(x_parent), Some(y_parent)) = (a.parent(), b.parent()) {
                return compare_call(
                    &Value::Call(x_parent.clone()),
                    &Value::Call(y_parent.clone()),
                    context,
                );
            }
        }
    }
    compare_text(&Value::Str(repr(x)), &Value::Str(repr(y)), context)
}

/// Partial applications compare `func`, `args` and `keywords` as attributes
pub fn compare_partial(
    x: &Value,
    y: &Value,
    context: &mut CompareContext,
) -> CompareResult<Option<String>> {
    let (Value::Partial(a), Value::Partial(b)) = (x, y) else {
        return compare_simple(x, y, context);
    };
    let x_attrs = keyed(a.attributes());
    let y_attrs = keyed(b.attributes());
    if Value::dict(x_attrs.clone()).try_eq(&Value::dict(y_attrs.clone()))? {
        return Ok(None);
    }
    compare_mapping(
        &x_attrs,
        &y_attrs,
        context,
        Some(&x.type_of()),
        "attributes ",
        KeyStyle::Attribute,
        true,
    )
}

/// Attributes of `value` minus the ignored names
pub(crate) fn extract_attrs(value: &Value, ignore: &[String]) -> Option<Vec<(String, Value)>> {
    let mut attrs = value.attributes()?;
    attrs.retain(|(name, _)| !ignore.contains(name));
    Some(attrs)
}

/// Attribute pairs keyed by string values
pub(crate) fn keyed(attrs: Vec<(String, Value)>) -> Vec<(Value, Value)> {
    attrs
        .into_iter()
        .map(|(name, value)| (Value::Str(name), value))
        .collect()
}

fn lookup(entries: &[(Value, Value)], key: &Value) -> Option<Value> {
    entries
        .iter()
        .find(|(existing, _)| existing == key)
        .map(|(_, value)| value.clone())
}

fn sequence_items(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::List(list) => Some(list.items().clone()),
        Value::Tuple(tuple) => Some(tuple.items().to_vec()),
        _ => None,
    }
}

/// A slice of `source` with the same kind as `source`
fn slice(source: &Value, items: &[Value]) -> Value {
    match source {
        Value::Tuple(_) => Value::tuple(items.to_vec()),
        _ => Value::list(items.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CompareOptions;
    use crate::value::{Exception, Object, ObjectEq, Partial};
    use std::rc::Rc;
    use crate::{dict, list, set, tuple};

    fn context() -> CompareContext {
        CompareContext::new(CompareOptions::new())
    }

    fn message(x: Value, y: Value, options: CompareOptions) -> Option<String> {
        let mut context = CompareContext::new(options);
        if context.different(&x, &y, "").unwrap() {
            Some(context.into_message())
        } else {
            None
        }
    }

    #[test]
    fn test_simple() {
        let result = compare_simple(&Value::Int(1), &Value::Int(2), &mut context()).unwrap();
        assert_eq!(result.as_deref(), Some("1 != 2"));
    }

    #[test]
    fn test_simple_same_repr() {
        let class = Type::class("tests.comparers.Opaque");
        let a: Value = Object::opaque(class.clone()).with_repr("<Opaque>").into();
        let b: Value = Object::opaque(class).with_repr("<Opaque>").into();
        assert_eq!(
            compare_simple(&a, &b, &mut context()).unwrap().as_deref(),
            Some("Both x and y appear as <Opaque>, but are not equal!")
        );
    }

    #[test]
    fn test_ignore_eq_reports_equal_looking_scalars() {
        let ignore_eq = || CompareOptions::new().ignore_eq();
        assert_eq!(
            message(Value::Int(1), Value::Bool(true), ignore_eq()).as_deref(),
            Some("1 != True")
        );
        assert_eq!(
            message(Value::Int(1), Value::Float(1.0), ignore_eq()).as_deref(),
            Some("1 != 1.0")
        );
        assert!(message(Value::Int(1), Value::Int(1), ignore_eq()).is_none());
    }

    #[test]
    fn test_lossy_opaque_objects_report_their_reprs() {
        let class = Type::class("tests.comparers.Lossy");
        let lossy = |text: &str| -> Value {
            Object::opaque(class.clone())
                .with_repr(text)
                .with_eq(ObjectEq::Custom(Rc::new(|_: &Object, _: &Object| true)))
                .into()
        };
        assert!(message(lossy("<A>"), lossy("<B>"), CompareOptions::new()).is_none());
        for options in [CompareOptions::new().strict(), CompareOptions::new().ignore_eq()] {
            assert_eq!(
                message(lossy("<A>"), lossy("<B>"), options).as_deref(),
                Some("<A> != <B>")
            );
        }
    }

    #[test]
    fn test_with_type() {
        let text = compare_with_type(&tuple![1, 2], &list![1, 2], &mut context());
        assert_eq!(text, "(1, 2) (<class 'tuple'>) != [1, 2] (<class 'list'>)");
    }

    #[test]
    fn test_sequence() {
        let text = message(list![1, 2, 3], list![1, 2, 4], CompareOptions::new()).unwrap();
        assert_eq!(
            text,
            "sequence not as expected:\n\nsame:\n[1, 2]\n\nfirst:\n[3]\n\nsecond:\n[4]"
        );
    }

    #[test]
    fn test_sequence_length_mismatch() {
        let text = message(tuple![1, 2], tuple![1], CompareOptions::new()).unwrap();
        assert_eq!(
            text,
            "sequence not as expected:\n\nsame:\n(1,)\n\nfirst:\n(2,)\n\nsecond:\n()"
        );
    }

    #[test]
    fn test_dict() {
        let text = message(
            dict! {"x" => 1, "y" => 2},
            dict! {"x" => 2, "z" => 3},
            CompareOptions::new(),
        )
        .unwrap();
        assert_eq!(
            text,
            "dict not as expected:\n\n\
             in first but not second:\n'y': 2\n\n\
             in second but not first:\n'z': 3\n\n\
             values differ:\n'x': 1 != 2"
        );
    }

    #[test]
    fn test_dict_same_keys_listed() {
        let text = message(
            dict! {"a" => 1, "b" => 2},
            dict! {"a" => 1, "b" => 3},
            CompareOptions::new(),
        )
        .unwrap();
        assert_eq!(
            text,
            "dict not as expected:\n\nsame:\n['a']\n\nvalues differ:\n'b': 2 != 3"
        );
    }

    #[test]
    fn test_set() {
        let text = message(set![1, 2, 4], set![1, 3, 5], CompareOptions::new()).unwrap();
        assert_eq!(
            text,
            "set not as expected:\n\n\
             in first but not second:\n[2, 4]\n\n\
             in second but not first:\n[3, 5]"
        );
    }

    #[test]
    fn test_set_report_sorts_by_text() {
        let text = message(set![10, 9, 1], set![1], CompareOptions::new()).unwrap();
        assert_eq!(text, "set not as expected:\n\nin first but not second:\n[10, 9]");
    }

    #[test]
    fn test_text_inline_and_block() {
        let short = message("a".into(), "b".into(), CompareOptions::new()).unwrap();
        assert_eq!(short, "'a' != 'b'");

        let long = message(
            "a long string".into(),
            "another long one".into(),
            CompareOptions::new(),
        )
        .unwrap();
        assert_eq!(long, "\n'a long string'\n!=\n'another long one'");
    }

    #[test]
    fn test_text_multiline_diff() {
        let text = message("a\nb\nc".into(), "a\nd\nc".into(), CompareOptions::new()).unwrap();
        assert_eq!(
            text,
            "\n--- first\n+++ second\n@@ -1,3 +1,3 @@\n a\n-b\n+d\n c"
        );
    }

    #[test]
    fn test_text_filters() {
        let options = CompareOptions::new()
            .without_blanklines()
            .without_trailing_whitespace();
        assert!(message("a  \n\nb".into(), "a\nb".into(), options).is_none());
        assert!(message("a  \n\nb".into(), "a\nb".into(), CompareOptions::new()).is_some());
    }

    #[test]
    fn test_bytes() {
        let text = message(Value::bytes(*b"ab"), Value::bytes(*b"ac"), CompareOptions::new());
        assert_eq!(text.as_deref(), Some("b'ab' != b'ac'"));
    }

    #[test]
    fn test_object_attributes() {
        let class = Type::class("tests.comparers.Widget");
        let widget = |x: i64, y: i64| -> Value {
            Object::new(class.clone()).with_attr("x", x).with_attr("y", y).into()
        };
        assert!(message(widget(1, 2), widget(1, 2), CompareOptions::new()).is_none());
        let text = message(widget(1, 2), widget(1, 3), CompareOptions::new()).unwrap();
        assert_eq!(
            text,
            "Widget not as expected:\n\nattributes same:\n['x']\n\nattributes differ:\n'y': 2 != 3"
        );
    }

    #[test]
    fn test_object_ignore_attributes() {
        let class = Type::class("tests.comparers.Row");
        let row = |id: i64| -> Value {
            Object::new(class.clone()).with_attr("id", id).with_attr("name", "a").into()
        };
        let options = CompareOptions::new().ignore_attribute("id");
        assert!(message(row(1), row(2), options).is_none());
    }

    #[test]
    fn test_exception_args_then_attributes() {
        let a: Value = Exception::new(Type::value_error(), ["a"]).into();
        let b: Value = Exception::new(Type::value_error(), ["b"]).into();
        assert_eq!(
            message(a, b, CompareOptions::new()).as_deref(),
            Some("ValueError('a') != ValueError('b')")
        );

        let c: Value = Exception::new(Type::value_error(), ["a"]).with_attr("code", 1).into();
        let d: Value = Exception::new(Type::value_error(), ["a"]).with_attr("code", 2).into();
        let text = message(c, d, CompareOptions::new()).unwrap();
        assert!(text.starts_with("ValueError not as expected:"));
        assert!(text.contains("attributes differ:\n'code': 1 != 2"));
    }

    #[test]
    fn test_partial() {
        let f = Value::function("f");
        let a: Value = Partial::new(f.clone(), [1], []).into();
        let b: Value = Partial::new(f.clone(), [2], []).into();
        let text = message(a, b, CompareOptions::new()).unwrap();
        assert!(text.starts_with("partial not as expected:"));
        assert!(text.contains("attributes differ:\n'args': (1,) != (2,)"));

        let c: Value = Partial::new(f.clone(), [1], []).into();
        let d: Value = Partial::new(f, [1], []).into();
        assert!(message(c, d, CompareOptions::new()).is_none());
    }

    #[test]
    fn test_generator() {
        let text = message(
            Value::generator(vec![1, 2]),
            Value::generator(vec![1, 3]),
            CompareOptions::new(),
        )
        .unwrap();
        assert_eq!(
            text,
            "sequence not as expected:\n\nsame:\n(1,)\n\nfirst:\n(2,)\n\nsecond:\n(3,)"
        );
    }

    #[test]
    fn test_named_tuples() {
        let point = Type::subclass("tests.comparers.Point", &Type::tuple());
        let a = Value::named_tuple(point.clone(), &["x", "y"], [1, 2]);
        let b = Value::named_tuple(point.clone(), &["x", "y"], [1, 3]);
        let text = message(a, b, CompareOptions::new()).unwrap();
        assert!(text.starts_with("Point not as expected:\n\nsame:\n['x']"));
        assert!(text.contains("values differ:\n'y': 2 != 3"));

        let pair = Type::subclass("tests.comparers.Pair", &Type::tuple());
        let c = Value::named_tuple(point, &["x", "y"], [1, 2]);
        let d = Value::named_tuple(pair, &["a", "b"], [1, 3]);
        let text = message(c, d, CompareOptions::new()).unwrap();
        assert!(text.contains("(<class 'tests.comparers.Point'>) != "));
    }
}
