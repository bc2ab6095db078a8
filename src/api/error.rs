use serde::Deserialize;
use thiserror::Error;

/// Fallback shown when an object-shaped `detail` carries no message
const OBJECT_FALLBACK_MESSAGE: &str = "An error occurred.";

/// The error payload the authentication service sends on failure.
/// Only `detail` is ever used; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<ErrorDetail>,
}

/// The service presents `detail` in three shapes depending on which
/// layer rejected the request: a plain string, a single object with a
/// `msg` field, or a list of such objects (one per failed field).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Text(String),
    Item(DetailItem),
    Items(Vec<DetailItem>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailItem {
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorDetail {
    /// Normalize to a single display string. `None` means the shape
    /// carried nothing readable and the caller should use its own
    /// fallback message.
    pub fn message(&self) -> Option<String> {
        match self {
            ErrorDetail::Text(s) => Some(s.clone()),
            ErrorDetail::Item(item) => Some(
                item.msg
                    .clone()
                    .unwrap_or_else(|| OBJECT_FALLBACK_MESSAGE.to_string()),
            ),
            ErrorDetail::Items(items) => {
                let msgs: Vec<&str> = items.iter().filter_map(|i| i.msg.as_deref()).collect();
                if msgs.is_empty() {
                    None
                } else {
                    Some(msgs.join(" "))
                }
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed with status {status}")]
    Status {
        status: u16,
        detail: Option<ErrorDetail>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail);
        ApiError::Status {
            status: status.as_u16(),
            detail,
        }
    }

    /// Best human-readable message extractable from the error, if any.
    pub fn detail_message(&self) -> Option<String> {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } => detail.message(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_from(body: &str) -> Option<ErrorDetail> {
        serde_json::from_str::<ErrorBody>(body).ok()?.detail
    }

    #[test]
    fn test_detail_as_string() {
        let detail = detail_from(r#"{"detail": "Email already registered"}"#).unwrap();
        assert_eq!(detail.message().as_deref(), Some("Email already registered"));
    }

    #[test]
    fn test_detail_as_object_with_msg() {
        let detail = detail_from(r#"{"detail": {"msg": "invalid credentials"}}"#).unwrap();
        assert_eq!(detail.message().as_deref(), Some("invalid credentials"));
    }

    #[test]
    fn test_detail_as_object_without_msg() {
        let detail = detail_from(r#"{"detail": {"code": 42}}"#).unwrap();
        assert_eq!(detail.message().as_deref(), Some("An error occurred."));
    }

    #[test]
    fn test_detail_as_array_joins_msgs_with_spaces() {
        let detail =
            detail_from(r#"{"detail": [{"msg": "bad email"}, {"msg": "bad password"}]}"#).unwrap();
        assert_eq!(detail.message().as_deref(), Some("bad email bad password"));
    }

    #[test]
    fn test_detail_as_empty_array_has_no_message() {
        let detail = detail_from(r#"{"detail": []}"#).unwrap();
        assert_eq!(detail.message(), None);
    }

    #[test]
    fn test_unrecognized_shapes_fall_through() {
        // Number is none of the three shapes
        assert!(detail_from(r#"{"detail": 7}"#).is_none());
        // Missing detail entirely
        assert!(detail_from(r#"{"error": "nope"}"#).is_none());
        // Not JSON at all
        assert!(detail_from("<html>502</html>").is_none());
    }

    #[test]
    fn test_from_status_keeps_detail() {
        let err = ApiError::from_status(
            reqwest::StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [{"msg": "bad email"}, {"msg": "bad password"}]}"#,
        );
        assert_eq!(
            err.detail_message().as_deref(),
            Some("bad email bad password")
        );
    }

    #[test]
    fn test_from_status_with_unreadable_body() {
        let err = ApiError::from_status(reqwest::StatusCode::BAD_GATEWAY, "upstream dead");
        assert_eq!(err.detail_message(), None);
        assert!(matches!(err, ApiError::Status { status: 502, .. }));
    }
}
