//! End to end behaviour of `compare`

use std::rc::Rc;

use tfx_compare::{
    compare, compare_with, dict, list, set, tuple, Call, Compare, CompareError, CompareOptions,
    Exception, Object, ObjectEq, Type, Value,
};

fn mismatch(result: Result<(), CompareError>) -> String {
    match result {
        Err(CompareError::Mismatch { message }) => message,
        other => panic!("expected a mismatch, got {:?}", other),
    }
}

#[test]
fn test_reflexive() {
    let class = Type::class("tests.compare.Thing");
    let values = vec![
        Value::None,
        Value::Int(3),
        Value::Float(2.5),
        Value::from("text"),
        list![1, list![2, 3]],
        dict! {"a" => set![1, 2]},
        Object::new(class).with_attr("x", 1).into(),
        Exception::new(Type::key_error(), ["k"]).into(),
    ];
    for value in values {
        assert!(compare(value.clone(), value.clone()).is_ok(), "{:?}", value);
    }
}

#[test]
fn test_sequence_mismatch() {
    let message = mismatch(compare(list![1, 2, 3], list![1, 2, 4]));
    assert_eq!(
        message,
        "sequence not as expected:\n\nsame:\n[1, 2]\n\nfirst:\n[3]\n\nsecond:\n[4]"
    );
}

#[test]
fn test_dict_partitions() {
    let message = mismatch(compare(
        dict! {"x" => 1, "y" => 2},
        dict! {"x" => 2, "z" => 3},
    ));
    assert!(message.contains("in first but not second:\n'y': 2"));
    assert!(message.contains("in second but not first:\n'z': 3"));
    assert!(message.contains("values differ:\n'x': 1 != 2"));
}

#[test]
fn test_set_difference() {
    let message = mismatch(compare(set![1, 2, 4], set![1, 3, 5]));
    assert!(message.contains("in first but not second:\n[2, 4]"));
    assert!(message.contains("in second but not first:\n[3, 5]"));
}

#[test]
fn test_strict_type_mismatch() {
    assert!(compare(tuple![1, 2, 3], list![1, 2, 3]).is_ok());
    let error = compare_with(tuple![1, 2, 3], list![1, 2, 3], &CompareOptions::new().strict())
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "(1, 2, 3) (<class 'tuple'>) != [1, 2, 3] (<class 'list'>)"
    );
}

#[test]
fn test_strict_numbers() {
    let strict = CompareOptions::new().strict();
    assert!(compare(1, 1.0).is_ok());
    assert!(compare_with(1, 1, &strict).unwrap().is_none());
    assert_eq!(
        compare_with(1, 1.0, &strict).unwrap_err().to_string(),
        "1 (<class 'int'>) != 1.0 (<class 'float'>)"
    );
}

#[test]
fn test_label_substitution() {
    let options = CompareOptions::new().with_labels("expected", "actual");
    let error = compare_with(1, 2, &options).unwrap_err();
    assert_eq!(error.to_string(), "1 (expected) != 2 (actual)");
}

#[test]
fn test_labels_in_container_reports() {
    let options = CompareOptions::new().with_labels("expected", "actual");
    let message = compare_with(dict! {"a" => 1}, dict! {"a" => 2}, &options)
        .unwrap_err()
        .to_string();
    assert!(message.contains("'a': 1 (expected) != 2 (actual)"));
}

#[test]
fn test_recursive_breadcrumbs() {
    let message = mismatch(compare(
        dict! {"x" => tuple![1, 2, 3]},
        dict! {"x" => tuple![1, 2, 4]},
    ));
    assert!(message.starts_with("dict not as expected:"));
    assert!(message.contains("values differ:\n'x': (1, 2, 3) != (1, 2, 4)"));
    assert!(message.contains("\n\nWhile comparing ['x']: sequence not as expected:"));
}

#[test]
fn test_deep_breadcrumbs() {
    let message = mismatch(compare(
        list![dict! {"a" => list![1, 2]}],
        list![dict! {"a" => list![1, 3]}],
    ));
    assert!(message.contains("While comparing [0]: dict not as expected:"));
    assert!(message.contains("While comparing [0]['a']: sequence not as expected:"));
}

#[test]
fn test_non_recursive() {
    let options = CompareOptions::new().non_recursive();
    let message = compare_with(
        dict! {"x" => tuple![1, 2, 3]},
        dict! {"x" => tuple![1, 2, 4]},
        &options,
    )
    .unwrap_err()
    .to_string();
    assert_eq!(
        message,
        "dict not as expected:\n\nvalues differ:\n'x': (1, 2, 3) != (1, 2, 4)"
    );
}

#[test]
fn test_cycles_terminate() {
    let a = list![1];
    a.as_list().unwrap().push(a.clone());
    let b = list![1];
    b.as_list().unwrap().push(b.clone());
    assert!(compare(a.clone(), b.clone()).is_ok());
    assert!(compare_with(a, b, &CompareOptions::new().ignore_eq()).unwrap().is_none());

    let c = list![2];
    c.as_list().unwrap().push(c.clone());
    let d = list![3];
    d.as_list().unwrap().push(d.clone());
    assert!(compare(c, d).is_err());
}

#[test]
fn test_lossy_equality_is_trusted_unless_strict() {
    let class = Type::class("tests.compare.Lossy");
    let lossy = |x: i64| -> Value {
        Object::new(class.clone())
            .with_attr("x", x)
            .with_eq(ObjectEq::Custom(Rc::new(|_: &Object, _: &Object| true)))
            .into()
    };
    assert!(compare(lossy(1), lossy(2)).is_ok());

    let message = compare_with(lossy(1), lossy(2), &CompareOptions::new().strict())
        .unwrap_err()
        .to_string();
    assert_eq!(
        message,
        "Lossy not as expected:\n\nattributes differ:\n'x': 1 != 2"
    );
    assert!(compare_with(lossy(1), lossy(2), &CompareOptions::new().ignore_eq()).is_err());
}

#[test]
fn test_lossy_opaque_objects_differ_by_repr() {
    let class = Type::class("tests.compare.Handle");
    let handle = |text: &str| -> Value {
        Object::opaque(class.clone())
            .with_repr(text)
            .with_eq(ObjectEq::Custom(Rc::new(|_: &Object, _: &Object| true)))
            .into()
    };
    assert!(compare(handle("<A>"), handle("<B>")).is_ok());
    for options in [CompareOptions::new().strict(), CompareOptions::new().ignore_eq()] {
        let error = compare_with(handle("<A>"), handle("<B>"), &options).unwrap_err();
        assert_eq!(error.to_string(), "<A> != <B>");
    }
    let error = compare_with(1, true, &CompareOptions::new().ignore_eq()).unwrap_err();
    assert_eq!(error.to_string(), "1 != True");
}

#[test]
fn test_objects_compare_by_attributes() {
    let class = Type::class("tests.compare.Point");
    let point = |x: i64| -> Value { Object::new(class.clone()).with_attr("x", x).into() };
    assert!(compare(point(1), point(1)).is_ok());
    let message = mismatch(compare(point(1), point(2)));
    assert_eq!(message, "Point not as expected:\n\nattributes differ:\n'x': 1 != 2");
}

#[test]
fn test_nested_object_breadcrumbs() {
    let class = Type::class("tests.compare.Node");
    let node = |child: Value| -> Value { Object::new(class.clone()).with_attr("child", child).into() };
    let message = mismatch(compare(node(list![1]), node(list![2])));
    assert!(message.contains("While comparing .child: sequence not as expected:"));
}

#[test]
fn test_ignore_attributes_per_type() {
    let row = Type::class("tests.compare.Row");
    let other = Type::class("tests.compare.Other");
    let make = |class: &Type, id: i64| -> Value {
        Object::new(class.clone()).with_attr("id", id).with_attr("v", 1).into()
    };
    let options = CompareOptions::new().ignore_attributes_for(&row, &["id"]);
    assert!(compare_with(make(&row, 1), make(&row, 2), &options).unwrap().is_none());
    assert!(compare_with(make(&other, 1), make(&other, 2), &options).is_err());
}

#[test]
fn test_exceptions_with_different_attributes() {
    let a: Value = Exception::new(Type::value_error(), ["boom"]).with_attr("code", 1).into();
    let b: Value = Exception::new(Type::value_error(), ["boom"]).with_attr("code", 2).into();
    let message = mismatch(compare(a, b));
    assert!(message.starts_with("ValueError not as expected:"));
    assert!(message.contains("attributes same:\n['args']"));
    assert!(message.contains("attributes differ:\n'code': 1 != 2"));

    let c: Value = Exception::new(Type::value_error(), ["boom"]).into();
    let d: Value = Exception::new(Type::value_error(), ["boom"]).into();
    assert!(compare(c, d).is_ok());
}

#[test]
fn test_mock_calls() {
    let a: Value = Call::named("send", [1], vec![("retry", Value::Bool(true))]).into();
    let b: Value = Call::named("send", [1], vec![("retry", Value::Bool(false))]).into();
    let message = mismatch(compare(list![a.clone()], list![b]));
    assert!(message.contains("call.send(1, retry=True)"));
    assert!(message.contains("call.send(1, retry=False)"));

    let same: Value = Call::named("send", [1], vec![("retry", Value::Bool(true))]).into();
    assert!(compare(a, same).is_ok());
}

#[test]
fn test_chained_mock_calls_compare_parents() {
    let chained = |parent_arg: i64| -> Value {
        Call::named("bar", [2], vec![])
            .with_parent(Call::named("foo", [parent_arg], vec![]))
            .into()
    };
    assert!(compare(chained(1), chained(1)).is_ok());
    let message = mismatch(compare(chained(1), chained(9)));
    assert_eq!(message, "\n'call.foo(1)'\n!=\n'call.foo(9)'");
}

#[test]
fn test_text_options() {
    let first = "line one\nline two  \n\nline three";
    let second = "line one\nline two\nline three";
    assert!(compare(first, second).is_err());
    let relaxed = CompareOptions::new()
        .without_trailing_whitespace()
        .without_blanklines();
    assert!(compare_with(first, second, &relaxed).unwrap().is_none());
}

#[test]
fn test_show_whitespace() {
    let options = CompareOptions::new().show_whitespace();
    let message = compare_with("a\tb\nc", "a b\nc", &options).unwrap_err().to_string();
    assert_eq!(
        message,
        "\n--- first\n+++ second\n@@ -1,2 +1,2 @@\n-a\\tb\\n\n+a b\\n\n c"
    );
}

#[test]
fn test_generators_are_drained() {
    assert!(compare(Value::generator(vec![1, 2]), tuple![1, 2]).is_ok());
    let message = mismatch(compare(Value::generator(vec![1, 2]), Value::generator(vec![1])));
    assert_eq!(
        message,
        "sequence not as expected:\n\nsame:\n(1,)\n\nfirst:\n(2,)\n\nsecond:\n()"
    );
}

#[test]
fn test_prefix_suffix_and_raises() {
    let options = CompareOptions::new()
        .with_prefix("config")
        .with_suffix("check the fixture");
    assert_eq!(
        compare_with(1, 2, &options).unwrap_err().to_string(),
        "config: 1 != 2\ncheck the fixture"
    );
    let quiet = options.no_raise();
    assert_eq!(
        compare_with(1, 2, &quiet).unwrap().as_deref(),
        Some("config: 1 != 2\ncheck the fixture")
    );
}

#[test]
fn test_named_operands() {
    let error = Compare::new()
        .expected(list![1])
        .actual(list![2])
        .run()
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "sequence not as expected:\n\nsame:\n[]\n\nexpected:\n[1]\n\nactual:\n[2]"
    );

    let error = Compare::new().arg(1).arg(2).arg(3).run().unwrap_err();
    assert_eq!(
        error.to_string(),
        "Exactly two objects needed, you supplied: [1, 2, 3]"
    );
}

#[test]
fn test_captured_log_records() {
    let records = list![
        tuple!["root", "INFO", "started"],
        tuple!["root", "ERROR", "failed"]
    ];
    let expected = list![
        tuple!["root", "INFO", "started"],
        tuple!["root", "WARNING", "failed"]
    ];
    let error = Compare::new().arg(expected).actual(records).run().unwrap_err();
    let message = error.to_string();
    assert!(message.starts_with("sequence not as expected:"));
    assert!(message.contains("\n\nactual:\n[('root', 'ERROR', 'failed')]"));
    assert!(message.contains("While comparing [1]: sequence not as expected:"));
}

#[test]
fn test_options_from_yaml_fixture() {
    let options: CompareOptions = serde_yaml::from_str(
        "strict: true\nx_label: wanted\ny_label: got\nprefix: fixture\n",
    )
    .unwrap();
    assert_eq!(
        compare_with(1, 2, &options).unwrap_err().to_string(),
        "fixture: 1 (wanted) != 2 (got)"
    );
}

#[test]
fn test_serde_values() {
    #[derive(serde::Serialize)]
    struct Service {
        name: &'static str,
        replicas: u32,
    }

    let actual = tfx_compare::to_value(&Service {
        name: "api",
        replicas: 2,
    })
    .unwrap();
    let message = mismatch(compare(dict! {"name" => "api", "replicas" => 3}, actual));
    assert!(message.contains("'replicas': 3 != 2"));
}

#[test]
#[should_panic(expected = "sequence not as expected")]
fn test_assert_compare_macro() {
    tfx_compare::assert_compare!(list![1], list![2]);
}
