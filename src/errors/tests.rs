use super::*;

#[test]
fn no_message_display() {
    assert_eq!(RelayError::NoMessage.to_string(), "no message in update");
}

#[test]
fn validation_joins_every_violation() {
    let err = RelayError::Validation(vec!["no chat id".into(), "no text".into()]);
    assert_eq!(err.to_string(), "invalid send request: no chat id, no text");
}

#[test]
fn validation_single_violation() {
    let err = RelayError::Validation(vec!["no text".into()]);
    assert_eq!(err.to_string(), "invalid send request: no text");
}

#[test]
fn malformed_from_serde() {
    let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: RelayError = serde_err.into();
    assert!(matches!(err, RelayError::MalformedPayload(_)));
    assert!(err.to_string().starts_with("malformed payload:"));
}

#[test]
fn delivery_display() {
    let err = RelayError::delivery("chat 42", "network down");
    assert_eq!(err.to_string(), "delivery to chat 42 failed: network down");
}

#[test]
fn config_is_not_droppable() {
    assert!(!RelayError::Config("missing token".into()).is_droppable());
    assert!(RelayError::NoMessage.is_droppable());
    assert!(RelayError::Validation(vec![]).is_droppable());
    assert!(RelayError::delivery("x", "y").is_droppable());
}

#[test]
fn stream_closed_ends_the_loop() {
    let err = RelayError::StreamClosed("commands topic 'telegram-send'".into());
    assert_eq!(
        err.to_string(),
        "commands topic 'telegram-send' stream closed"
    );
    assert!(!err.is_droppable());
}

#[test]
fn internal_from_anyhow() {
    let err: RelayError = anyhow::anyhow!("something broke").into();
    assert!(matches!(err, RelayError::Internal(_)));
    assert!(err.is_droppable());
}
