use std::collections::HashMap;

use crate::app::controllers::tabs::TabManager;
use crate::app::domain::document::{SceneChange, TabId, TabOverrides};
use crate::app::domain::scene::Scene;
use crate::app::services::bridge::{
    AppInfo, BridgePort, BridgeReply, BridgeRequest, BridgeResponse, OpenedDocument, RequestId,
};
use crate::app::services::i18n::{Lang, Localizer, keys};
use crate::app::services::text_ops::extract_filename;
use crate::app::view::{ShellView, shell_view};

/// Something the UI layer has to do after the controller handled an action.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEffect {
    /// Show `scene` in the canvas on behalf of `tab_id`.
    LoadCanvas { tab_id: TabId, scene: Scene },
    /// Show a blocking, already localized message.
    Notice(String),
    /// The UI language changed and should be persisted.
    LanguageChanged(Lang),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingOp {
    Open,
    Save { tab_id: TabId, revision: u64 },
    AppInfo,
}

/// Toolkit-free orchestration of the shell: user actions in, store
/// mutations, bridge requests and UI effects out.
pub struct ShellController<P> {
    tabs: TabManager,
    i18n: Localizer,
    bridge: P,
    pending: HashMap<RequestId, PendingOp>,
    app_info: AppInfo,
    about_open: bool,
}

impl<P: BridgePort> ShellController<P> {
    pub fn new(lang: Lang, bridge: P) -> Self {
        let i18n = Localizer::new(lang);
        Self {
            tabs: TabManager::new(i18n.t(keys::UNTITLED)),
            i18n,
            bridge,
            pending: HashMap::new(),
            app_info: AppInfo::default(),
            about_open: false,
        }
    }

    /// Ask for app info and show the first tab.
    pub fn start(&mut self) -> Vec<ShellEffect> {
        self.send(BridgeRequest::GetAppInfo, PendingOp::AppInfo);
        vec![self.load_active()]
    }

    pub fn new_tab(&mut self) -> Vec<ShellEffect> {
        let id = self.tabs.create_tab(TabOverrides::default(), self.i18n.t(keys::UNTITLED));
        self.tabs.set_active(id);
        vec![self.load_active()]
    }

    pub fn open(&mut self) -> Vec<ShellEffect> {
        let request = BridgeRequest::OpenDocument {
            title: Some(self.i18n.t(keys::OPEN_PROJECT_TITLE).to_string()),
        };
        if self.send(request, PendingOp::Open) {
            Vec::new()
        } else {
            vec![self.notice(keys::OPEN_ERROR)]
        }
    }

    /// Save the active tab to its file, prompting when it has none.
    pub fn save(&mut self) -> Vec<ShellEffect> {
        let file_path = self.tabs.active().file_path.clone();
        self.save_active(file_path)
    }

    /// Save the active tab to a newly chosen file.
    pub fn save_as(&mut self) -> Vec<ShellEffect> {
        self.save_active(None)
    }

    pub fn switch_tab(&mut self, id: TabId) -> Vec<ShellEffect> {
        if id == self.tabs.active_id() || !self.tabs.set_active(id) {
            return Vec::new();
        }
        vec![self.load_active()]
    }

    pub fn next_tab(&mut self) -> Vec<ShellEffect> {
        let id = self.tabs.next_id();
        self.switch_tab(id)
    }

    pub fn previous_tab(&mut self) -> Vec<ShellEffect> {
        let id = self.tabs.prev_id();
        self.switch_tab(id)
    }

    pub fn close_tab(&mut self, id: TabId) -> Vec<ShellEffect> {
        let was_active = self.tabs.active_id() == id;
        if !self.tabs.close_tab(id) {
            return Vec::new();
        }
        if was_active {
            vec![self.load_active()]
        } else {
            Vec::new()
        }
    }

    pub fn close_active_tab(&mut self) -> Vec<ShellEffect> {
        let id = self.tabs.active_id();
        self.close_tab(id)
    }

    pub fn scene_changed(&mut self, change: SceneChange) {
        self.tabs.apply_scene_change(change);
    }

    pub fn set_language(&mut self, lang: Lang) -> Vec<ShellEffect> {
        if lang == self.i18n.lang() {
            return Vec::new();
        }
        self.i18n.set_lang(lang);
        vec![ShellEffect::LanguageChanged(lang)]
    }

    pub fn show_about(&mut self) {
        self.about_open = true;
    }

    pub fn close_about(&mut self) {
        self.about_open = false;
    }

    /// Apply a reply from the native bridge.
    pub fn handle_reply(&mut self, reply: BridgeReply) -> Vec<ShellEffect> {
        let Some(op) = self.pending.remove(&reply.id) else {
            log::warn!("Ignoring reply to unknown request {:?}", reply.id);
            return Vec::new();
        };

        match (op, reply.result) {
            (PendingOp::Open, Ok(BridgeResponse::Opened(None))) => Vec::new(),
            (PendingOp::Open, Ok(BridgeResponse::Opened(Some(doc)))) => self.opened(doc),
            (PendingOp::Open, Err(e)) => {
                log::error!("Failed to open file: {}", e);
                vec![self.notice(keys::OPEN_ERROR)]
            }
            (PendingOp::Save { .. }, Ok(BridgeResponse::Saved(None))) => Vec::new(),
            (PendingOp::Save { tab_id, revision }, Ok(BridgeResponse::Saved(Some(saved)))) => {
                let fallback = self.i18n.t(keys::PROJECT);
                if !self.tabs.mark_saved(tab_id, saved.file_path, revision, fallback) {
                    log::info!("Saved tab {} was closed before the save finished", tab_id);
                }
                Vec::new()
            }
            (PendingOp::Save { .. }, Err(e)) => {
                log::error!("Failed to save file: {}", e);
                vec![self.notice(keys::SAVE_ERROR)]
            }
            (PendingOp::AppInfo, Ok(BridgeResponse::AppInfo(info))) => {
                self.app_info = info;
                Vec::new()
            }
            (PendingOp::AppInfo, Err(e)) => {
                log::warn!("Could not read app info: {}", e);
                Vec::new()
            }
            (op, Ok(response)) => {
                log::warn!("Mismatched bridge response {:?} for {:?}", response, op);
                Vec::new()
            }
        }
    }

    pub fn view(&self) -> ShellView {
        shell_view(&self.tabs, &self.i18n, &self.app_info, self.about_open)
    }

    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    pub fn i18n(&self) -> &Localizer {
        &self.i18n
    }

    pub fn app_info(&self) -> &AppInfo {
        &self.app_info
    }

    pub fn about_open(&self) -> bool {
        self.about_open
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn opened(&mut self, doc: OpenedDocument) -> Vec<ShellEffect> {
        if let Some(existing) = self.tabs.find_by_path(&doc.file_path) {
            return self.switch_tab(existing);
        }

        let scene = match Scene::from_file_contents(&doc.contents) {
            Ok(scene) => scene,
            Err(e) => {
                log::error!("Failed to open {}: {}", doc.file_path.display(), e);
                return vec![self.notice(keys::OPEN_ERROR)];
            }
        };

        let title = extract_filename(&doc.file_path)
            .unwrap_or_else(|| self.i18n.t(keys::PROJECT).to_string());
        let id = self.tabs.create_tab(
            TabOverrides {
                title: Some(title),
                file_path: Some(doc.file_path),
                scene: Some(scene),
                dirty: Some(false),
            },
            self.i18n.t(keys::UNTITLED),
        );
        self.tabs.set_active(id);
        vec![self.load_active()]
    }

    fn save_active(&mut self, file_path: Option<std::path::PathBuf>) -> Vec<ShellEffect> {
        let tab = self.tabs.active();
        let tab_id = tab.id;
        let revision = tab.revision;
        let contents = match tab.scene.to_file_contents() {
            Ok(contents) => contents,
            Err(e) => {
                log::error!("Failed to serialize tab {}: {}", tab_id, e);
                return vec![self.notice(keys::SAVE_ERROR)];
            }
        };

        let request = BridgeRequest::SaveDocument {
            file_path,
            contents,
            title: Some(self.i18n.t(keys::SAVE_PROJECT_TITLE).to_string()),
            default_name: Some(self.i18n.default_file_name()),
        };
        if self.send(request, PendingOp::Save { tab_id, revision }) {
            Vec::new()
        } else {
            vec![self.notice(keys::SAVE_ERROR)]
        }
    }

    fn send(&mut self, request: BridgeRequest, op: PendingOp) -> bool {
        match self.bridge.request(request) {
            Ok(id) => {
                self.pending.insert(id, op);
                true
            }
            Err(e) => {
                log::error!("Bridge request failed: {}", e);
                false
            }
        }
    }

    fn load_active(&self) -> ShellEffect {
        let tab = self.tabs.active();
        ShellEffect::LoadCanvas {
            tab_id: tab.id,
            scene: tab.scene.clone(),
        }
    }

    fn notice(&self, key: &str) -> ShellEffect {
        ShellEffect::Notice(self.i18n.t(key).to_string())
    }
}
