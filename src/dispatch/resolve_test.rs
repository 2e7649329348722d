use super::*;
use crate::test_utils::expect_status;
use crate::test_utils::CaseBuilder;

fn binding(pairs: &[(&str, &str)]) -> Binding {
    let mut b = Binding::default();
    for (name, value) in pairs {
        b.set(*name, *value);
    }
    b
}

#[test]
fn substitute_should_replace_every_placeholder() {
    let b = binding(&[("id", "42"), ("col", "name")]);

    assert_eq!(substitute("/t/{id}/{col}", &b).unwrap(), "/t/42/name");
}

#[test]
fn substitute_should_pass_templates_without_placeholders_through() {
    assert_eq!(substitute("/plain/path", &Binding::default()).unwrap(), "/plain/path");
}

#[test]
fn substitute_should_keep_unterminated_brace_literal() {
    assert_eq!(substitute("/t/{oops", &Binding::default()).unwrap(), "/t/{oops");
}

#[test]
fn substitute_should_leave_json_structural_braces_alone() {
    let b = binding(&[("val", "7")]);

    assert_eq!(
        substitute(r#"{"a": {"b": {val}}}"#, &b).unwrap(),
        r#"{"a": {"b": 7}}"#
    );
}

#[test]
fn substitute_should_fail_on_missing_binding() {
    let err = substitute("/t/{id}", &Binding::default()).unwrap_err();

    assert_eq!(err, "id");
}

#[test]
fn resolve_should_substitute_uri_and_body() {
    let case = CaseBuilder::new("resolve_case")
        .uri("/t/{id}")
        .uri_parameter("id", &["7"])
        .body_parameter("val", &["hello"])
        .body(r#"{"value": "{val}"}"#)
        .expect(expect_status(200))
        .build();
    let b = binding(&[("id", "7"), ("val", "hello")]);

    let resolved = resolve(&case, &b, 0).unwrap();

    assert_eq!(resolved.uri, "/t/7");
    assert_eq!(resolved.body.as_deref(), Some(r#"{"value": "hello"}"#));
    assert_eq!(resolved.call_index, 0);
    assert_eq!(resolved.case_id, "resolve_case");
}

#[test]
fn resolve_should_fail_when_binding_misses_a_placeholder() {
    let case = CaseBuilder::new("miss")
        .uri("/t/{id}")
        .uri_parameter("id", &["1"])
        .expect(expect_status(200))
        .build();

    let err = resolve(&case, &Binding::default(), 0).unwrap_err();

    assert_eq!(err.field, "uri");
}
