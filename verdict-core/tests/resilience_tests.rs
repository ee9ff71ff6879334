//! Decoding documents that are incomplete, reordered or partly malformed

use serde_json::json;
use verdict_core::{
    AnyOutcome, CodecOptions, ErrorCategory, ErrorInfo, JsonCodec, NamingPolicy, Outcome, OutcomeView, Status,
    ValueOutcome,
};

fn codec() -> JsonCodec {
    JsonCodec::default()
}

#[test]
fn test_empty_object_fallback_is_deterministic() {
    let first: Outcome = codec().from_str("{}").unwrap();
    let second: Outcome = codec().from_str("{}").unwrap();
    assert_eq!(first, second);

    assert!(first.is_failure());
    assert_eq!(first.status(), &Status::ERROR);
    assert_eq!(first.errors().len(), 1);
    let diagnostic = &first.errors()[0];
    assert_eq!(diagnostic.category(), ErrorCategory::Unexpected);
    assert_eq!(diagnostic.code(), "Outcome.Deserialization");
    assert!(first.messages().is_empty());
}

#[test]
fn test_fallback_applies_to_valued_shape() {
    let outcome: ValueOutcome<i32> = codec().from_str(r#"{"value": 5}"#).unwrap();
    assert_eq!(outcome.value(), Some(&5));
    assert_eq!(outcome.status(), &Status::ERROR);
    assert!(outcome.is_failure());
}

#[test]
fn test_key_order_does_not_matter() {
    let canonical = r#"{
        "value": 42,
        "isSuccess": true,
        "isFailure": false,
        "status": {"code": 200, "description": "OK"},
        "messages": ["ok"]
    }"#;
    let shuffled = r#"{
        "messages": ["ok"],
        "status": {"description": "OK", "code": 200},
        "isFailure": false,
        "value": 42,
        "isSuccess": true
    }"#;
    let a: ValueOutcome<i32> = codec().from_str(canonical).unwrap();
    let b: ValueOutcome<i32> = codec().from_str(shuffled).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_trace_id_is_captured_and_re_emitted() {
    let text = r#"{
        "status": {"code": 400, "description": "Bad Request"},
        "errors": [{"category": "Validation", "code": "ERR", "message": "Error message", "traceId": "abc"}]
    }"#;
    let outcome: Outcome = codec().from_str(text).unwrap();
    let node = &outcome.errors()[0];
    assert_eq!(node.extension("traceId"), Some(&json!("abc")));

    let encoded = codec().to_value(&outcome).unwrap();
    assert_eq!(encoded["errors"][0]["extensions"]["traceId"], json!("abc"));
}

#[test]
fn test_malformed_members_are_repaired() {
    let text = r#"{
        "status": {"code": "not a number"},
        "messages": ["kept", 7, null, {"x": 1}],
        "errors": [
            "not an error",
            {"category": 2, "code": "Good", "message": "kept", "innerErrors": [false, {"code": "Child", "message": "c"}]},
            [1, 2, 3]
        ]
    }"#;
    let outcome: Outcome = codec().from_str(text).unwrap();
    assert_eq!(outcome.status(), &Status::ERROR);
    assert_eq!(outcome.messages(), ["kept".to_string(), "7".to_string()]);
    assert_eq!(outcome.errors().len(), 1);
    let good = &outcome.errors()[0];
    assert_eq!(good.category(), ErrorCategory::Validation);
    assert_eq!(good.inner_errors().len(), 1);
    assert_eq!(good.inner_errors()[0].code(), "Child");
}

#[test]
fn test_wrong_container_kinds_read_as_empty() {
    let outcome: Outcome = codec()
        .from_str(r#"{"status": {"code": 200}, "messages": "one", "errors": {"code": "E"}}"#)
        .unwrap();
    assert!(outcome.is_success());
    assert!(outcome.messages().is_empty());
    assert!(outcome.errors().is_empty());
}

#[test]
fn test_structural_errors_surface() {
    for text in ["[]", "\"outcome\"", "42", "null", "{\"status\": ", "{} trailing"] {
        let err = codec().from_str::<Outcome>(text).unwrap_err();
        assert!(err.is_structural(), "{text}: {err}");
    }
}

#[test]
fn test_malformed_value_is_structural() {
    let err = codec()
        .from_str::<ValueOutcome<u8>>(r#"{"value": 1000, "status": {"code": 200}}"#)
        .unwrap_err();
    assert!(err.is_structural());
}

fn nested_document(depth: usize) -> String {
    let mut text = String::from(r#"{"status": {"code": 400}, "errors": ["#);
    for level in 0..depth {
        text.push_str(&format!(r#"{{"code": "L{level}", "message": "m", "innerErrors": ["#));
    }
    for _ in 0..depth {
        text.push_str("]}");
    }
    text.push_str("]}");
    text
}

fn chain(depth: usize) -> ErrorInfo {
    let mut node = ErrorInfo::validation("Leaf", "leaf");
    for level in 1..depth {
        node = ErrorInfo::validation(format!("L{level}"), "wrap").with_inner(node);
    }
    node
}

#[test]
fn test_deep_tree_decodes_without_limit() {
    let depth = 70;
    let text = nested_document(depth);

    let outcome: Outcome = codec().from_str(&text).unwrap();
    assert_eq!(outcome.errors()[0].depth(), depth);
    assert_eq!(outcome.errors()[0].walk().count(), depth);

    let limited = JsonCodec::new(CodecOptions::default().unbounded_depth(false));
    assert!(limited.from_str::<Outcome>(&text).unwrap_err().is_structural());
}

#[test]
fn test_very_deep_document_decodes() {
    let depth = 100_000;
    let text = nested_document(depth);

    let outcome: Outcome = codec().from_str(&text).unwrap();
    let root = &outcome.errors()[0];
    assert_eq!(root.depth(), depth);
    let (leaf, leaf_depth) = root.walk().last().unwrap();
    assert_eq!(leaf.code(), format!("L{}", depth - 1));
    assert_eq!(leaf_depth, depth - 1);

    let any = codec().decode_any(&text).unwrap();
    assert_eq!(any.errors()[0].depth(), depth);

    let from_bytes: Outcome = codec().from_slice(text.as_bytes()).unwrap();
    assert!(from_bytes == outcome);
}

#[test]
fn test_very_deep_tree_round_trips() {
    let depth = 100_000;
    let outcome = ValueOutcome::<i32>::failure(chain(depth));

    let text = codec().to_string(&outcome).unwrap();
    assert!(text.starts_with(r#"{"value":null,"isSuccess":false"#));

    let back: ValueOutcome<i32> = codec().from_str(&text).unwrap();
    assert_eq!(back.errors()[0].depth(), depth);
    assert!(back == outcome);

    let encoded_again = codec().to_string(&back).unwrap();
    assert!(encoded_again == text);
}

#[test]
fn test_foreign_spellings_are_accepted() {
    let text = r#"{
        "Status": {"Code": 404, "Description": "Not Found"},
        "error-list": [],
        "Errors": [{"Category": "notfound", "Code": "User", "Message": "missing", "inner_errors": []}]
    }"#;
    let outcome: Outcome = codec().from_str(text).unwrap();
    assert_eq!(outcome.status(), &Status::NOT_FOUND);
    assert_eq!(outcome.errors()[0].category(), ErrorCategory::NotFound);
    assert!(outcome.errors()[0].extensions().is_empty());
}

#[test]
fn test_policy_spelling_wins_over_folded_spelling() {
    let exact_first = r#"{
        "status": {"code": 404, "CODE": 500},
        "errors": [{
            "code": "Exact",
            "message": "exact",
            "MESSAGE": "folded",
            "innerErrors": [{"code": "Kept", "message": "kept"}],
            "inner_errors": []
        }],
        "ERRORS": [],
        "messages": ["m"],
        "Messages": ["other"]
    }"#;
    let folded_first = r#"{
        "Messages": ["other"],
        "ERRORS": [],
        "status": {"CODE": 500, "code": 404},
        "errors": [{
            "MESSAGE": "folded",
            "inner_errors": [],
            "code": "Exact",
            "message": "exact",
            "innerErrors": [{"code": "Kept", "message": "kept"}]
        }],
        "messages": ["m"]
    }"#;

    for text in [exact_first, folded_first] {
        let outcome: Outcome = codec().from_str(text).unwrap();
        assert_eq!(outcome.status(), &Status::NOT_FOUND);
        assert_eq!(outcome.messages().to_vec(), vec!["m".to_string()]);
        assert_eq!(outcome.errors().len(), 1);

        let error = &outcome.errors()[0];
        assert_eq!(error.message(), "exact");
        assert_eq!(error.inner_errors().len(), 1);
        assert_eq!(error.inner_errors()[0].code(), "Kept");
        assert!(error.extensions().is_empty());
    }
}

#[test]
fn test_policy_codec_reads_its_own_spelling() {
    let codec = JsonCodec::new(CodecOptions::default().naming_policy(NamingPolicy::SnakeCase));
    let outcome: Outcome = codec
        .from_str(r#"{"status": {"code": 201, "description": "Created"}, "messages": ["m"]}"#)
        .unwrap();
    assert_eq!(outcome.status(), &Status::CREATED);
}

#[test]
fn test_decode_any_picks_shape() {
    let valued = codec()
        .decode_any(r#"{"value": {"id": 1}, "status": {"code": 200}}"#)
        .unwrap();
    assert!(matches!(valued, AnyOutcome::Valued(_)));

    let valueless = codec().decode_any(r#"{"status": {"code": 200}}"#).unwrap();
    assert!(matches!(valueless, AnyOutcome::Valueless(_)));

    assert!(codec().decode_any("[1]").is_err());
}
