//! Native bridge - request/response messages between the UI thread and the
//! worker that owns native dialogs and disk I/O.
//!
//! The message types are plain serde values so the same contract works over
//! an in-process channel (what the app uses) or any other transport. A `None`
//! payload always means the user dismissed the dialog; it is never an error.

pub mod host;
pub mod worker;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use host::{BridgeHost, DEFAULT_FILE_NAME, DEFAULT_OPEN_TITLE, DEFAULT_SAVE_TITLE, DialogProvider};
pub use worker::{BridgeClient, spawn_bridge};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum BridgeRequest {
    #[serde(rename_all = "camelCase")]
    OpenDocument {
        #[serde(default)]
        title: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    SaveDocument {
        #[serde(default)]
        file_path: Option<PathBuf>,
        contents: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        default_name: Option<String>,
    },
    GetAppInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenedDocument {
    pub file_path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDocument {
    pub file_path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub version: String,
    pub platform: String,
    pub arch: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "result", rename_all = "camelCase")]
pub enum BridgeResponse {
    Opened(Option<OpenedDocument>),
    Saved(Option<SavedDocument>),
    AppInfo(AppInfo),
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BridgeError {
    #[error("I/O failure: {0}")]
    Io(String),

    #[error("native bridge is not running")]
    Disconnected,
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Io(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeEnvelope {
    pub id: RequestId,
    pub request: BridgeRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeReply {
    pub id: RequestId,
    pub result: Result<BridgeResponse, BridgeError>,
}

/// Where the UI side sends bridge requests.
///
/// Implemented by [`BridgeClient`]; tests substitute a recorder.
pub trait BridgePort {
    fn request(&mut self, request: BridgeRequest) -> Result<RequestId, BridgeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_request_wire_shape() {
        let request = BridgeRequest::SaveDocument {
            file_path: None,
            contents: "{}".to_string(),
            title: Some("Save project".to_string()),
            default_name: Some("project.excalidraw".to_string()),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "op": "saveDocument",
                "filePath": null,
                "contents": "{}",
                "title": "Save project",
                "defaultName": "project.excalidraw"
            })
        );
    }

    #[test]
    fn test_open_request_title_is_optional() {
        let request: BridgeRequest = serde_json::from_value(json!({"op": "openDocument"})).unwrap();
        assert_eq!(request, BridgeRequest::OpenDocument { title: None });
    }

    #[test]
    fn test_cancelled_open_is_null_result() {
        let value = serde_json::to_value(BridgeResponse::Opened(None)).unwrap();
        assert_eq!(value, json!({"op": "opened", "result": null}));
    }

    #[test]
    fn test_opened_document_uses_camel_case() {
        let response = BridgeResponse::Opened(Some(OpenedDocument {
            file_path: PathBuf::from("/tmp/x.excalidraw"),
            contents: "{}".to_string(),
        }));
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["result"]["filePath"], "/tmp/x.excalidraw");
    }

    #[test]
    fn test_io_error_conversion() {
        let err: BridgeError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err, BridgeError::Io("denied".to_string()));
        assert_eq!(err.to_string(), "I/O failure: denied");
    }
}
