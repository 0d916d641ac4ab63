use textkit::rhp::{self, options::ParseOptions};

#[test]
fn parses_nested_mixed_hash() {
    let opts = ParseOptions::default();
    let json = rhp::to_json_with(
        r#"{:name => "Alice", "age" => 30, tags: [:admin, :staff], meta: {active: true, score: nil}}"#,
        &opts,
        &rhp::serializer::SerializeOptions { pretty: false, indent_width: 2 },
    )
    .unwrap();
    assert_eq!(
        json,
        r#"{"name":"Alice","age":30,"tags":["admin","staff"],"meta":{"active":true,"score":null}}"#
    );
}

#[test]
fn empty_hash_and_array_round_trip() {
    let opts = ParseOptions::default();
    let json = rhp::to_json_with(
        "{a: {}, b: []}",
        &opts,
        &rhp::serializer::SerializeOptions { pretty: false, indent_width: 2 },
    )
    .unwrap();
    assert_eq!(json, r#"{"a":{},"b":[]}"#);
}

#[test]
fn max_depth_is_enforced() {
    let opts = ParseOptions { max_depth: 2, ..ParseOptions::default() };
    let err = rhp::parse("{a: {b: {c: 1}}}", &opts).unwrap_err();
    assert!(matches!(err, rhp::RhpError::RecursionLimitExceeded { .. }));
}

#[test]
fn validate_reports_error_without_panicking() {
    let result = rhp::validate("{a: ");
    match result {
        rhp::ValidateResult::Invalid { valid, error } => {
            assert!(!valid);
            assert!(!error.is_empty());
        }
        rhp::ValidateResult::Valid { .. } => panic!("expected invalid"),
    }
}

#[test]
fn validate_accepts_well_formed_input() {
    let result = rhp::validate(r#"{a: 1, b: "two"}"#);
    assert_eq!(result, rhp::ValidateResult::Valid { valid: true });
}

#[test]
fn pretty_printing_uses_configured_indent_width() {
    let opts = ParseOptions::default();
    let json = rhp::to_json_with(
        "{a: 1}",
        &opts,
        &rhp::serializer::SerializeOptions { pretty: true, indent_width: 4 },
    )
    .unwrap();
    assert_eq!(json, "{\n    \"a\": 1\n}");
}

#[test]
fn preset_json5_allows_nonfinite_literals() {
    let opts = ParseOptions::from_preset(rhp::Preset::Json5);
    let json = rhp::to_json_with(
        "{a: NaN, b: Infinity}",
        &opts,
        &rhp::serializer::SerializeOptions { pretty: false, indent_width: 2 },
    )
    .unwrap();
    assert_eq!(json, r#"{"a":NaN,"b":Infinity}"#);
}
