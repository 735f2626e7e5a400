use pronunciation_relay::domain::{UpstreamReply, extract_error_message};
use serde_json::{Value, json};

#[test]
fn given_success_status_with_json_when_classifying_then_ok_carries_document() {
    let reply = UpstreamReply::from_response_parts(200, r#"{"text": "seven"}"#);

    assert_eq!(reply, UpstreamReply::Ok(json!({"text": "seven"})));
}

#[test]
fn given_success_status_with_plain_text_when_classifying_then_ok_carries_string() {
    let reply = UpstreamReply::from_response_parts(200, "seven");

    assert_eq!(reply, UpstreamReply::Ok(Value::String("seven".into())));
}

#[test]
fn given_error_status_when_classifying_then_message_is_extracted() {
    let reply = UpstreamReply::from_response_parts(
        401,
        r#"{"error": {"message": "Incorrect API key provided"}}"#,
    );

    assert_eq!(
        reply,
        UpstreamReply::Error {
            status: 401,
            message: "Incorrect API key provided".into()
        }
    );
}

#[test]
fn given_alternate_error_layouts_when_extracting_then_rules_apply_in_order() {
    assert_eq!(extract_error_message(r#"{"error": "quota exceeded"}"#), "quota exceeded");
    assert_eq!(extract_error_message(r#"{"message": "bad key"}"#), "bad key");
    assert_eq!(extract_error_message(r#"{"detail": "not found"}"#), "not found");
    assert_eq!(
        extract_error_message(r#"{"title": "Unauthorized", "detail": ""}"#),
        "Unauthorized"
    );
}

#[test]
fn given_unstructured_body_when_extracting_then_raw_text_is_truncated() {
    let body = "x".repeat(1000);

    assert_eq!(extract_error_message(&body).chars().count(), 300);
    assert_eq!(extract_error_message("  "), "unknown error");
}
