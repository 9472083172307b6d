//! Matchers used as expected values inside comparisons

use tfx_compare::{
    compare, dict, list, permutation, subset, tuple, CompareError, Comparison, Object,
    RangeComparison, RoundComparison, SequenceComparison, StringComparison, Type, Value,
};

fn job_type() -> Type {
    Type::class("tests.matching.Job")
}

fn job(id: i64, state: &str) -> Value {
    Object::new(job_type())
        .with_attr("id", id)
        .with_attr("state", state)
        .with_repr(format!("<Job {}>", id))
        .into()
}

#[test]
fn test_comparison_matches_object() {
    let expected = Comparison::of_type(job_type())
        .with_attr("id", 1)
        .with_attr("state", "done");
    assert!(compare(expected, job(1, "done")).is_ok());
}

#[test]
fn test_comparison_failure_is_reported() {
    let expected = Comparison::of_type(job_type())
        .with_attr("id", 1)
        .with_attr("state", "done");
    let error = compare(expected, job(1, "failed")).unwrap_err();
    let message = error.to_string();
    assert!(message.starts_with("<C:tests.matching.Job(failed)>"));
    assert!(message.contains("attributes differ:\n'state': 'done' (Comparison) != 'failed' (actual)"));
    assert!(message.ends_with("</C:tests.matching.Job> != <Job 1>"));
}

#[test]
fn test_comparison_wrong_type() {
    let error = compare(Comparison::of_type(Type::dict()), job(1, "done")).unwrap_err();
    assert_eq!(
        error.to_string(),
        "<C:dict(failed)>wrong type</C:dict> != <Job 1>"
    );
}

#[test]
fn test_comparisons_nested_in_containers() {
    let any_job = || Comparison::of_type(job_type());
    assert!(compare(
        list![any_job(), any_job()],
        list![job(1, "done"), job(2, "queued")]
    )
    .is_ok());

    let error = compare(
        dict! {"first" => any_job(), "second" => Comparison::of_type(job_type()).with_attr("id", 3)},
        dict! {"first" => job(1, "done"), "second" => job(2, "done")},
    )
    .unwrap_err();
    let message = error.to_string();
    assert!(message.starts_with("dict not as expected:"));
    assert!(message.contains("same:\n['first']"));
    assert!(message.contains("'id': 3 (Comparison) != 2 (actual)"));
}

#[test]
fn test_partial_comparison() {
    let loose = Comparison::of_type(job_type()).with_attr("id", 1).strict(false);
    assert!(compare(loose, job(1, "anything")).is_ok());
    let strict = Comparison::of_type(job_type()).with_attr("id", 1);
    assert!(compare(strict, job(1, "anything")).is_err());
}

#[test]
fn test_comparison_from_path() {
    job_type();
    let expected = Comparison::from_path("tests.matching.Job").unwrap();
    assert!(compare(expected, job(4, "done")).is_ok());

    let error = Comparison::from_path("tests.matching.Missing").unwrap_err();
    assert!(matches!(error, CompareError::UnresolvedType { .. }));
}

#[test]
fn test_scalar_matchers() {
    let record = dict! {
        "message" => "connection refused (errno 111)",
        "elapsed" => 0.1234,
        "attempts" => 3,
    };
    let expected = dict! {
        "message" => StringComparison::new("connection refused").unwrap(),
        "elapsed" => RoundComparison::new(0.123, 3),
        "attempts" => RangeComparison::new(1, 5),
    };
    assert!(compare(expected, record).is_ok());
}

#[test]
fn test_scalar_matcher_failure() {
    let error = compare(list![RangeComparison::new(1, 5)], list![7]).unwrap_err();
    assert_eq!(
        error.to_string(),
        "sequence not as expected:\n\nsame:\n[]\n\nfirst:\n[<Range: [1, 5]>]\n\nsecond:\n[7]"
    );
}

#[test]
fn test_sequence_matchers() {
    assert!(compare(permutation([1, 2, 3]), list![3, 1, 2]).is_ok());
    assert!(compare(subset([1, 3]), tuple![1, 2, 3]).is_ok());
    assert!(compare(SequenceComparison::new([1, 2], true, true), list![1, 0, 2]).is_ok());
    assert!(compare(SequenceComparison::new([1, 2], true, false), list![2, 1]).is_err());
}

#[test]
fn test_sequence_matcher_report() {
    let error = compare(permutation([1, 2]), list![1, 3]).unwrap_err();
    let message = error.to_string();
    assert!(message.starts_with("<Permutation(failed)>\nsame:\n[1]"));
    assert!(message.contains("in expected but not actual:\n[2]"));
    assert!(message.contains("in actual but not expected:\n[3]"));
}
