//! JSON frames exchanged over a game channel
//!
//! Client → Server: `{"command":"..."}`
//! Server → Client: `{"type":"welcome","message":"..."}`
//! Server → Client: `{"type":"response","message":"..."}`

use super::SessionError;
use serde::{Deserialize, Serialize};

/// Inbound frame
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientFrame {
    pub command: String,
}

impl ClientFrame {
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Outbound frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    Welcome { message: String },
    Response { message: String },
}

impl ServerFrame {
    pub fn welcome(message: impl Into<String>) -> Self {
        Self::Welcome {
            message: message.into(),
        }
    }

    pub fn response(message: impl Into<String>) -> Self {
        Self::Response {
            message: message.into(),
        }
    }

    #[cfg(test)]
    pub fn message(&self) -> &str {
        match self {
            Self::Welcome { message } | Self::Response { message } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_command() {
        let frame = ClientFrame::parse(r#"{"command":"look"}"#).unwrap();
        assert_eq!(frame.command, "look");

        // Extra fields are tolerated
        let frame = ClientFrame::parse(r#"{"command":"help","sent_at":12}"#).unwrap();
        assert_eq!(frame.command, "help");
    }

    #[test]
    fn test_malformed_frames() {
        for raw in ["not json", "{}", r#"{"command":7}"#, r#"{"cmd":"look"}"#, "[]", ""] {
            let err = ClientFrame::parse(raw).unwrap_err();
            assert!(matches!(err, SessionError::MalformedMessage(_)), "{raw}");
        }
    }

    #[test]
    fn test_server_frame_shape() {
        let welcome = serde_json::to_value(ServerFrame::welcome("Welcome to Northstar!")).unwrap();
        assert_eq!(welcome, json!({"type": "welcome", "message": "Welcome to Northstar!"}));

        let response = serde_json::to_value(ServerFrame::response("ok")).unwrap();
        assert_eq!(response, json!({"type": "response", "message": "ok"}));
    }
}
