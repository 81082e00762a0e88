use std::path::PathBuf;

use crate::app::services::bridge::DialogProvider;

pub const OPEN_EXTENSIONS: [&str; 2] = ["excalidraw", "json"];
pub const SAVE_EXTENSIONS: [&str; 1] = ["excalidraw"];

/// Native file choosers backed by `rfd`.
///
/// Runs on the bridge worker thread, never on the FLTK thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct RfdDialogs;

impl DialogProvider for RfdDialogs {
    fn pick_open(&self, title: &str) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title(title)
            .add_filter("Excalidraw", &OPEN_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
    }

    fn pick_save(&self, title: &str, default_name: &str) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title(title)
            .set_file_name(default_name)
            .add_filter("Excalidraw", &SAVE_EXTENSIONS)
            .save_file()
    }
}
