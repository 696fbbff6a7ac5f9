//! JSON wire format for the two broker topics.
//!
//! Events go out as flat camelCase objects; send requests come in the same shape and are
//! validated before anything is dispatched.

use crate::bus::events::{EventPayload, SendRequest};
use crate::errors::RelayResult;

pub fn encode_event(payload: &EventPayload) -> RelayResult<String> {
    Ok(serde_json::to_string(payload)?)
}

pub fn decode_event(raw: &str) -> RelayResult<EventPayload> {
    Ok(serde_json::from_str(raw)?)
}

/// Parse and validate a send request.
///
/// Unparseable input yields `MalformedPayload`; a parsed request that breaks any rule
/// yields `Validation` listing every violation.
pub fn decode_send_request(raw: &str) -> RelayResult<SendRequest> {
    let request: SendRequest = serde_json::from_str(raw)?;
    request.validate()?;
    Ok(request)
}
