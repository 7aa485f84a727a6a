use crate::{AttrValue, Record, KEY_ATTRIBUTE};
use crate::body::ResponseBody;

fn alice() -> Record {
    Record::new("alice")
        .with("phone", AttrValue::text(""))
        .with("email", AttrValue::text("a@b.com"))
}

#[test]
fn empty_attributes_excludes_key_and_filled_fields() {
    let record = alice();
    assert_eq!(record.empty_attributes(), vec!["phone".to_string()]);
    assert_eq!(record.name(), Some("alice"));
}

#[test]
fn whitespace_only_text_is_blank() {
    let record = Record::new("bob")
        .with("desk", AttrValue::text("   \t"))
        .with("team", AttrValue::text(" ops "));
    assert_eq!(record.empty_attributes(), vec!["desk".to_string()]);
    assert_eq!(record.current_values().get("team"), Some(&serde_json::json!(" ops ")));
    assert!(!record.current_values().contains_key("desk"));
}

#[test]
fn blank_key_is_never_reported_as_empty() {
    let record = Record::new("  ").with("email", AttrValue::text(""));
    assert_eq!(record.empty_attributes(), vec!["email".to_string()]);
}

#[test]
fn numbers_are_never_blank_and_render_as_strings() {
    let record = Record::new("carol")
        .with("age", AttrValue::number(0))
        .with("tags", AttrValue::Other);
    assert!(record.empty_attributes().is_empty());

    let values = record.current_values();
    assert_eq!(values.get("age"), Some(&serde_json::json!("0")));
    assert_eq!(values.get("tags"), Some(&serde_json::Value::Null));
    assert!(!values.contains_key(KEY_ATTRIBUTE));
}

#[test]
fn current_values_skip_blank_and_key() {
    let values = alice().current_values();
    assert_eq!(values.len(), 1);
    assert_eq!(values.get("email"), Some(&serde_json::json!("a@b.com")));
}

#[test]
fn found_body_serializes_success_shape() -> anyhow::Result<()> {
    let body = ResponseBody::found("alice", &alice());
    let json = serde_json::to_value(&body)?;
    assert_eq!(
        json,
        serde_json::json!({
            "status": "SUCCESS",
            "name": "alice",
            "empty_attributes": ["phone"],
            "current_values": {"email": "a@b.com"}
        })
    );
    assert_eq!(body.status(), "SUCCESS");
    Ok(())
}

#[test]
fn not_found_and_error_bodies() -> anyhow::Result<()> {
    let json = serde_json::to_value(ResponseBody::not_found("zed"))?;
    assert_eq!(json["status"], "NOT_FOUND");
    assert_eq!(json["message"], "No record found for name: zed");

    let json = serde_json::to_value(ResponseBody::error("boom"))?;
    assert_eq!(json["status"], "ERROR");
    assert_eq!(json["message"], "Error updating value: boom");
    Ok(())
}

#[test]
fn updated_body_carries_full_record() -> anyhow::Result<()> {
    let record = alice().with("phone", AttrValue::text("555-1234"));
    let body = ResponseBody::updated("alice", "phone", "555-1234", &record);
    let json = serde_json::to_value(&body)?;
    assert_eq!(json["status"], "SUCCESS");
    assert_eq!(json["message"], "Successfully updated phone to 555-1234 for alice");
    assert_eq!(json["updated_values"]["phone"], "555-1234");
    assert_eq!(json["updated_values"]["Name"], "alice");
    Ok(())
}
