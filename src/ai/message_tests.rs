//! Tests for the chat message model

use super::*;
use proptest::prelude::*;

#[test]
fn test_plain_string_content_deserializes_as_text() {
    let msg: Message = serde_json::from_str(r#"{"role":"user","content":"hello"}"#).unwrap();
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.content, MessageContent::Text("hello".to_string()));
}

#[test]
fn test_structured_content_deserializes_as_parts() {
    let json = r#"{
        "role": "user",
        "content": [
            {"type": "text", "text": "first"},
            {"type": "image", "data": "aGVsbG8=", "mimeType": "image/png"},
            {"type": "input_text", "text": "second"}
        ]
    }"#;
    let msg: Message = serde_json::from_str(json).unwrap();

    match &msg.content {
        MessageContent::Parts(parts) => {
            assert_eq!(parts.len(), 3);
            assert!(matches!(
                &parts[1],
                ContentPart::Image { mime_type: Some(m), .. } if m == "image/png"
            ));
        }
        other => panic!("Expected parts, got {:?}", other),
    }
    assert_eq!(msg.text(), "first\nsecond");
}

#[test]
fn test_extra_client_fields_are_ignored() {
    let json = r#"{"id":"m1","role":"assistant","content":"ok","name":"bot","createdAt":"2024-01-01T00:00:00Z"}"#;
    let msg: Message = serde_json::from_str(json).unwrap();
    assert_eq!(msg, Message::assistant("ok"));
}

#[test]
fn test_file_only_content_normalizes_to_empty() {
    let content = MessageContent::Parts(vec![ContentPart::InputFile {
        data: None,
        mime_type: Some("application/pdf".to_string()),
    }]);
    assert_eq!(content.to_plain_text(), "");
}

#[test]
fn test_unknown_role_is_rejected() {
    let result: Result<Message, _> = serde_json::from_str(r#"{"role":"tool","content":"x"}"#);
    assert!(result.is_err());
}

#[test]
fn test_text_content_serializes_as_bare_string() {
    let json = serde_json::to_value(Message::system("rules")).unwrap();
    assert_eq!(json, serde_json::json!({"role": "system", "content": "rules"}));
}

#[test]
fn test_normalized_flattens_parts() {
    let msg = Message::user(MessageContent::Parts(vec![
        ContentPart::Text {
            text: "a".to_string(),
        },
        ContentPart::InputText {
            text: "b".to_string(),
        },
    ]));
    assert_eq!(msg.normalized(), Message::user("a\nb"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_text_content_normalizes_to_itself(text in ".*") {
        let content = MessageContent::Text(text.clone());
        prop_assert_eq!(content.to_plain_text(), text);
    }
}
