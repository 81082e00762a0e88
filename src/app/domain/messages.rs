use super::document::{SceneChange, TabId};
use crate::app::services::bridge::BridgeReply;
use crate::app::services::i18n::Lang;

/// All messages that can be sent through the FLTK channel.
/// Widget callbacks, the canvas and the bridge worker send these; the
/// dispatch loop in main hands them to `AppState::handle`.
#[derive(Debug, Clone)]
pub enum Message {
    // File
    TabNew,
    FileOpen,
    FileSave,
    FileSaveAs,
    Quit,

    // Tabs
    TabSwitch(TabId),
    TabClose(TabId),
    TabCloseActive,
    TabNext,
    TabPrevious,

    // Canvas
    SceneChanged(SceneChange),

    // Chrome
    SetLanguage(Lang),
    ShowAbout,

    // Native bridge
    Bridge(BridgeReply),
}
