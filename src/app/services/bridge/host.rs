use std::path::PathBuf;

use super::{AppInfo, BridgeError, BridgeRequest, BridgeResponse, OpenedDocument, SavedDocument};
use crate::app::infrastructure::fs::{atomic_write, read_text};

pub const DEFAULT_OPEN_TITLE: &str = "Open project";
pub const DEFAULT_SAVE_TITLE: &str = "Save project";
pub const DEFAULT_FILE_NAME: &str = "project.excalidraw";

/// Native file choosers. Returning `None` means the user cancelled.
pub trait DialogProvider {
    fn pick_open(&self, title: &str) -> Option<PathBuf>;
    fn pick_save(&self, title: &str, default_name: &str) -> Option<PathBuf>;
}

/// Serves bridge requests: shows dialogs, reads and writes files.
pub struct BridgeHost<D> {
    dialogs: D,
    info: AppInfo,
}

impl<D: DialogProvider> BridgeHost<D> {
    pub fn new(dialogs: D, info: AppInfo) -> Self {
        Self { dialogs, info }
    }

    pub fn handle(&self, request: BridgeRequest) -> Result<BridgeResponse, BridgeError> {
        match request {
            BridgeRequest::OpenDocument { title } => self.open_document(title.as_deref()),
            BridgeRequest::SaveDocument {
                file_path,
                contents,
                title,
                default_name,
            } => self.save_document(file_path, &contents, title.as_deref(), default_name.as_deref()),
            BridgeRequest::GetAppInfo => Ok(BridgeResponse::AppInfo(self.info.clone())),
        }
    }

    fn open_document(&self, title: Option<&str>) -> Result<BridgeResponse, BridgeError> {
        let title = title.filter(|t| !t.is_empty()).unwrap_or(DEFAULT_OPEN_TITLE);
        let Some(file_path) = self.dialogs.pick_open(title) else {
            return Ok(BridgeResponse::Opened(None));
        };

        let contents = read_text(&file_path)?;
        log::info!("Opened {}", file_path.display());
        Ok(BridgeResponse::Opened(Some(OpenedDocument { file_path, contents })))
    }

    fn save_document(
        &self,
        file_path: Option<PathBuf>,
        contents: &str,
        title: Option<&str>,
        default_name: Option<&str>,
    ) -> Result<BridgeResponse, BridgeError> {
        let target = match file_path {
            Some(path) => path,
            None => {
                let title = title.filter(|t| !t.is_empty()).unwrap_or(DEFAULT_SAVE_TITLE);
                let default_name = default_name.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_FILE_NAME);
                match self.dialogs.pick_save(title, default_name) {
                    Some(path) => path,
                    None => return Ok(BridgeResponse::Saved(None)),
                }
            }
        };

        atomic_write(&target, contents.as_bytes())?;
        log::info!("Saved {}", target.display());
        Ok(BridgeResponse::Saved(Some(SavedDocument { file_path: target })))
    }
}
