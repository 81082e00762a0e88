//! Presentation model: what the widgets should show, computed from state.
//!
//! Nothing here touches FLTK, so the whole visual tree can be checked in
//! unit tests.

use crate::app::controllers::tabs::TabManager;
use crate::app::domain::document::TabId;
use crate::app::services::bridge::AppInfo;
use crate::app::services::i18n::{Lang, Localizer, keys};
use crate::app::services::text_ops::shorten_path;

const FALLBACK_VERSION: &str = "0.1.0";
const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct TabChip {
    pub id: TabId,
    pub label: String,
    pub active: bool,
    pub closable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileChip {
    pub title: String,
    pub status: String,
    pub dirty: bool,
    /// Shortened path, only once the tab is backed by a file.
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarLabels {
    pub new_tab: String,
    pub open: String,
    pub save: String,
    pub save_as: String,
    pub language: String,
    pub about: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AboutPanel {
    pub title: String,
    pub rows: Vec<(String, String)>,
    pub close: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShellView {
    pub brand: String,
    pub tabs: Vec<TabChip>,
    pub file_chip: FileChip,
    pub toolbar: ToolbarLabels,
    pub languages: Vec<&'static str>,
    pub selected_language: usize,
    pub status: Vec<String>,
    pub about: Option<AboutPanel>,
}

impl ShellView {
    /// Window title for the active tab, e.g. `plan.excalidraw * - Excalidraw Desktop`.
    pub fn window_title(&self) -> String {
        let marker = if self.file_chip.dirty { " *" } else { "" };
        format!("{}{} - {}", self.file_chip.title, marker, self.brand)
    }
}

pub fn shell_view(
    tabs: &TabManager,
    i18n: &Localizer,
    info: &AppInfo,
    about_open: bool,
) -> ShellView {
    let closable = tabs.len() > 1;
    let chips = tabs
        .tabs()
        .iter()
        .map(|tab| TabChip {
            id: tab.id,
            label: if tab.dirty {
                format!("{} *", tab.title)
            } else {
                tab.title.clone()
            },
            active: tab.id == tabs.active_id(),
            closable,
        })
        .collect();

    let active = tabs.active();
    let file_chip = FileChip {
        title: active.title.clone(),
        status: i18n
            .t(if active.dirty { keys::FILE_DIRTY } else { keys::FILE_SAVED })
            .to_string(),
        dirty: active.dirty,
        path: active.file_path.as_deref().map(shorten_path),
    };

    ShellView {
        brand: i18n.t(keys::APP_TITLE).to_string(),
        tabs: chips,
        file_chip,
        toolbar: ToolbarLabels {
            new_tab: i18n.t(keys::NEW_TAB).to_string(),
            open: i18n.t(keys::OPEN).to_string(),
            save: i18n.t(keys::SAVE).to_string(),
            save_as: i18n.t(keys::SAVE_AS).to_string(),
            language: i18n.t(keys::LANGUAGE).to_string(),
            about: i18n.t(keys::ABOUT).to_string(),
        },
        languages: Lang::ALL.iter().map(|lang| lang.label()).collect(),
        selected_language: i18n.lang().index(),
        status: status_pills(i18n, info),
        about: about_open.then(|| about_panel(i18n, info)),
    }
}

fn status_pills(i18n: &Localizer, info: &AppInfo) -> Vec<String> {
    let mut pills = Vec::new();
    if !info.version.is_empty() {
        pills.push(format!("{} v{}", i18n.t(keys::VERSION), info.version));
    }
    if !info.platform.is_empty() && !info.arch.is_empty() {
        pills.push(format!("{}/{}", info.platform, info.arch));
    }
    pills
}

fn about_panel(i18n: &Localizer, info: &AppInfo) -> AboutPanel {
    let or_unknown = |s: &str| if s.is_empty() { UNKNOWN.to_string() } else { s.to_string() };
    let version = if info.version.is_empty() {
        FALLBACK_VERSION
    } else {
        info.version.as_str()
    };

    AboutPanel {
        title: i18n.t(keys::ABOUT_TITLE).to_string(),
        rows: vec![
            (i18n.t(keys::VERSION_LABEL).to_string(), format!("v{}", version)),
            (
                i18n.t(keys::BUILD_LABEL).to_string(),
                format!("{} / {}", or_unknown(&info.platform), or_unknown(&info.arch)),
            ),
        ],
        close: i18n.t(keys::CLOSE).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::document::{SceneChange, SceneOrigin, TabOverrides};
    use crate::app::domain::scene::Scene;
    use std::path::PathBuf;

    fn info() -> AppInfo {
        AppInfo {
            version: "1.2.0".to_string(),
            platform: "linux".to_string(),
            arch: "x64".to_string(),
        }
    }

    #[test]
    fn test_sole_tab_is_not_closable() {
        let tabs = TabManager::new("Untitled");
        let view = shell_view(&tabs, &Localizer::new(Lang::En), &info(), false);
        assert_eq!(view.tabs.len(), 1);
        assert!(!view.tabs[0].closable);
        assert!(view.tabs[0].active);
    }

    #[test]
    fn test_dirty_tab_gets_marker() {
        let mut tabs = TabManager::new("Untitled");
        let second = tabs.create_tab(TabOverrides::default(), "Untitled");
        tabs.set_active(second);
        tabs.apply_scene_change(SceneChange {
            tab_id: second,
            origin: SceneOrigin::UserEdit,
            scene: Scene::empty(),
        });

        let view = shell_view(&tabs, &Localizer::new(Lang::En), &info(), false);
        assert_eq!(view.tabs[0].label, "Untitled");
        assert_eq!(view.tabs[1].label, "Untitled *");
        assert!(view.tabs.iter().all(|chip| chip.closable));
        assert!(view.tabs[1].active);
        assert_eq!(view.file_chip.status, "Unsaved");
        assert!(view.file_chip.dirty);
        assert_eq!(view.window_title(), "Untitled * - Excalidraw Desktop");
    }

    #[test]
    fn test_file_chip_shows_short_path() {
        let mut tabs = TabManager::new("Sem titulo");
        let id = tabs.active_id();
        tabs.mark_saved(id, PathBuf::from("/home/ana/boards/plan.excalidraw"), 0, "Projeto");

        let view = shell_view(&tabs, &Localizer::new(Lang::PtBr), &info(), false);
        assert_eq!(view.file_chip.title, "plan.excalidraw");
        assert_eq!(view.file_chip.status, "Salvo");
        assert_eq!(view.file_chip.path.as_deref(), Some("\u{2026}/boards/plan.excalidraw"));
    }

    #[test]
    fn test_status_pills() {
        let tabs = TabManager::new("Untitled");
        let i18n = Localizer::new(Lang::PtBr);

        let view = shell_view(&tabs, &i18n, &info(), false);
        assert_eq!(view.status, vec!["Versao v1.2.0".to_string(), "linux/x64".to_string()]);

        let partial = AppInfo { platform: "darwin".to_string(), ..Default::default() };
        assert!(shell_view(&tabs, &i18n, &partial, false).status.is_empty());
    }

    #[test]
    fn test_about_panel_fallbacks() {
        let tabs = TabManager::new("Untitled");
        let i18n = Localizer::new(Lang::En);

        assert!(shell_view(&tabs, &i18n, &info(), false).about.is_none());

        let about = shell_view(&tabs, &i18n, &AppInfo::default(), true).about.unwrap();
        assert_eq!(about.title, "About this app");
        assert_eq!(about.rows[0], ("Version".to_string(), "v0.1.0".to_string()));
        assert_eq!(about.rows[1], ("Build".to_string(), "unknown / unknown".to_string()));
        assert_eq!(about.close, "Close");
    }

    #[test]
    fn test_language_options() {
        let tabs = TabManager::new("Sans titre");
        let view = shell_view(&tabs, &Localizer::new(Lang::FrFr), &info(), false);
        assert_eq!(view.languages.len(), 4);
        assert_eq!(view.languages[view.selected_language], "Français");
        assert_eq!(view.toolbar.save_as, "Enregistrer sous");
    }
}
