//! Inbound frame decoding
//!
//! Parses raw text frames into typed requests. Decoding has no side effects;
//! every failure is a typed error the caller can log and drop without tearing
//! down the connection.

use super::frames::{ChatRequest, ReactionRequest, Request};
use serde_json::Value;
use thiserror::Error;

/// Why an inbound frame was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Frame is not JSON at all
    #[error("Frame is not valid JSON")]
    Malformed,
    /// Missing or unrecognized `type` discriminant
    #[error("Unknown frame type")]
    UnknownType,
    /// `chat` frame with missing or blank fields
    #[error("Invalid chat frame")]
    InvalidChat,
    /// `reaction` frame with a bad message id or empty fields
    #[error("Invalid reaction frame")]
    InvalidReaction,
}

/// Decode one inbound text frame.
///
/// Chat text is trimmed only for the emptiness check; the decoded value is the
/// text exactly as received.
pub fn decode(raw: &str) -> Result<Request, DecodeError> {
    let value: Value = serde_json::from_str(raw).map_err(|_| DecodeError::Malformed)?;

    let frame_type = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DecodeError::UnknownType)?;

    match frame_type {
        "chat" => decode_chat(value),
        "reaction" => decode_reaction(value),
        _ => Err(DecodeError::UnknownType),
    }
}

fn decode_chat(value: Value) -> Result<Request, DecodeError> {
    let request: ChatRequest =
        serde_json::from_value(value).map_err(|_| DecodeError::InvalidChat)?;

    if request.sender.trim().is_empty() || request.text.trim().is_empty() {
        return Err(DecodeError::InvalidChat);
    }

    Ok(Request::Chat(request))
}

fn decode_reaction(value: Value) -> Result<Request, DecodeError> {
    let request: ReactionRequest =
        serde_json::from_value(value).map_err(|_| DecodeError::InvalidReaction)?;

    if !request.message_id.is_valid() {
        return Err(DecodeError::InvalidReaction);
    }

    if request.emoji.is_empty() || request.user.is_empty() {
        return Err(DecodeError::InvalidReaction);
    }

    Ok(Request::Reaction(request))
}
