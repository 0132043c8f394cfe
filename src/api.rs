//! # Request API
//!
//! Request and response types for services that expose transposition over
//! JSON. The service owns transport, accounts and storage; this module only
//! turns a [`TransposeRequest`] into a [`TransposeResponse`] or an
//! [`ErrorResponse`].
//!
//! ## Typical Usage
//!
//! ```rust
//! use chordshift::api::{handle_request, TransposeRequest};
//!
//! let request: TransposeRequest = serde_json::from_str(r#"{
//!     "song_text": "Am  F\nla la\n",
//!     "original_key": "C",
//!     "target_key": "D"
//! }"#).unwrap();
//!
//! let response = handle_request(&request)?;
//! assert!(response.success);
//! assert_eq!(response.transposed, "Bm  G\nla la\n");
//! # Ok::<(), chordshift::TransposeError>(())
//! ```

use crate::error::{KeyRole, TransposeError};
use crate::transpose::transpose;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransposeRequest {
    pub song_text: String,
    pub original_key: String,
    pub target_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub song_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

/// Successful transposition, echoing the request alongside the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransposeResponse {
    pub success: bool,
    pub original: String,
    pub transposed: String,
    pub original_key: String,
    pub target_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

/// Failure payload. `key` says which key was rejected, when a key was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyRole>,
}

impl From<&TransposeError> for ErrorResponse {
    fn from(e: &TransposeError) -> Self {
        ErrorResponse {
            success: false,
            message: e.to_string(),
            key: e.key_role(),
        }
    }
}

/// Transpose the song in `request`.
///
/// # Errors
/// Returns [`TransposeError::InvalidPitch`] when either key is invalid.
pub fn handle_request(request: &TransposeRequest) -> Result<TransposeResponse, TransposeError> {
    let transposed = transpose(&request.song_text, &request.original_key, &request.target_key)?;
    Ok(TransposeResponse {
        success: true,
        original: request.song_text.clone(),
        transposed,
        original_key: request.original_key.clone(),
        target_key: request.target_key.clone(),
        title: request.song_title.clone(),
        artist: request.artist.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str, from: &str, to: &str) -> TransposeRequest {
        TransposeRequest {
            song_text: text.to_string(),
            original_key: from.to_string(),
            target_key: to.to_string(),
            song_title: None,
            artist: None,
        }
    }

    #[test]
    fn test_handle_request() {
        let mut req = request("G D Em C", "G", "A");
        req.song_title = Some("Cuatro acordes".to_string());
        let response = handle_request(&req).unwrap();
        assert!(response.success);
        assert_eq!(response.original, "G D Em C");
        assert_eq!(response.transposed, "A E F#m D");
        assert_eq!(response.original_key, "G");
        assert_eq!(response.target_key, "A");
        assert_eq!(response.title.as_deref(), Some("Cuatro acordes"));
        assert_eq!(response.artist, None);
    }

    #[test]
    fn test_response_json_fields() {
        let response = handle_request(&request("C", "C", "D")).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "original": "C",
                "transposed": "D",
                "original_key": "C",
                "target_key": "D"
            })
        );
    }

    #[test]
    fn test_request_optional_fields_default() {
        let req: TransposeRequest =
            serde_json::from_str(r#"{"song_text": "C", "original_key": "C", "target_key": "G"}"#).unwrap();
        assert_eq!(req.song_title, None);
        assert_eq!(req.artist, None);
    }

    #[test]
    fn test_error_response() {
        let err = handle_request(&request("C", "C", "X")).unwrap_err();
        let response = ErrorResponse::from(&err);
        assert!(!response.success);
        assert_eq!(response.key, Some(KeyRole::Target));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["key"], "target");
        assert_eq!(json["message"], "Invalid target key: 'X' is not a pitch name");
    }

    #[test]
    fn test_metadata_error_response_has_no_key() {
        let err = TransposeError::MetadataError("bad".to_string());
        let json = serde_json::to_value(ErrorResponse::from(&err)).unwrap();
        assert!(json.get("key").is_none());
    }
}
