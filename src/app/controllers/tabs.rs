use std::path::{Path, PathBuf};

use crate::app::domain::document::{SceneChange, SceneOrigin, Tab, TabId, TabOverrides, TabUpdate};
use crate::app::services::text_ops::extract_filename;

/// Ordered collection of open tabs.
///
/// Never empty, and `active_id` always names one of `tabs`.
pub struct TabManager {
    tabs: Vec<Tab>,
    active_id: TabId,
}

impl TabManager {
    pub fn new(untitled: &str) -> Self {
        let first = Tab::new(TabOverrides::default(), untitled);
        Self {
            active_id: first.id,
            tabs: vec![first],
        }
    }

    /// Append a tab built from `overrides`. Does not change the active tab.
    pub fn create_tab(&mut self, overrides: TabOverrides, untitled: &str) -> TabId {
        let tab = Tab::new(overrides, untitled);
        let id = tab.id;
        self.tabs.push(tab);
        id
    }

    /// Remove a tab. The last remaining tab cannot be closed.
    /// If the closed tab was active, the first remaining tab becomes active.
    pub fn close_tab(&mut self, id: TabId) -> bool {
        if self.tabs.len() <= 1 {
            return false;
        }
        let Some(idx) = self.tabs.iter().position(|t| t.id == id) else {
            return false;
        };
        self.tabs.remove(idx);

        if self.active_id == id {
            self.active_id = self.tabs[0].id;
        }
        true
    }

    /// Switch the active tab. Unknown ids are ignored.
    pub fn set_active(&mut self, id: TabId) -> bool {
        if self.tabs.iter().any(|t| t.id == id) {
            self.active_id = id;
            true
        } else {
            false
        }
    }

    /// Apply `producer`'s partial update to the active tab only.
    pub fn update_active_scene<F>(&mut self, producer: F) -> bool
    where
        F: FnOnce(&Tab) -> TabUpdate,
    {
        let active_id = self.active_id;
        match self.tabs.iter_mut().find(|t| t.id == active_id) {
            Some(tab) => {
                let update = producer(tab);
                tab.apply(update);
                true
            }
            None => false,
        }
    }

    /// Record a scene change reported by the canvas.
    ///
    /// Programmatic loads never touch the store. User edits replace the
    /// scene and mark the tab dirty, but only while that tab is active.
    pub fn apply_scene_change(&mut self, change: SceneChange) -> bool {
        match change.origin {
            SceneOrigin::Programmatic => false,
            SceneOrigin::UserEdit => {
                if change.tab_id != self.active_id {
                    log::debug!("Dropping edit for inactive tab {}", change.tab_id);
                    return false;
                }
                let scene = change.scene;
                self.update_active_scene(move |_| TabUpdate {
                    scene: Some(scene),
                    dirty: Some(true),
                    ..Default::default()
                })
            }
        }
    }

    /// A save of tab `id` to `path` succeeded. `revision` is the tab's
    /// revision when its contents were serialized.
    ///
    /// Path and title always follow the save. `dirty` is only cleared if
    /// the tab has not been edited since.
    pub fn mark_saved(&mut self, id: TabId, path: PathBuf, revision: u64, fallback_title: &str) -> bool {
        let Some(tab) = self.tabs.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        let title = extract_filename(&path).unwrap_or_else(|| fallback_title.to_string());
        let unchanged = tab.revision == revision;
        tab.apply(TabUpdate {
            title: Some(title),
            file_path: Some(path),
            dirty: unchanged.then_some(false),
            ..Default::default()
        });
        true
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_id(&self) -> TabId {
        self.active_id
    }

    pub fn active(&self) -> &Tab {
        self.get(self.active_id).unwrap_or(&self.tabs[0])
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    /// Find the tab associated with a file path
    pub fn find_by_path(&self, path: &Path) -> Option<TabId> {
        self.tabs
            .iter()
            .find(|t| t.file_path.as_deref() == Some(path))
            .map(|t| t.id)
    }

    /// Get the next tab id (for tab cycling)
    pub fn next_id(&self) -> TabId {
        let idx = self.active_index();
        self.tabs[(idx + 1) % self.tabs.len()].id
    }

    /// Get the previous tab id (for tab cycling)
    pub fn prev_id(&self) -> TabId {
        let idx = self.active_index();
        let prev = if idx == 0 { self.tabs.len() - 1 } else { idx - 1 };
        self.tabs[prev].id
    }

    fn active_index(&self) -> usize {
        self.tabs
            .iter()
            .position(|t| t.id == self.active_id)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::scene::{Scene, rectangle_element};

    fn edited(scene: &Scene) -> Scene {
        scene.with_element(rectangle_element(0.0, 0.0, 10.0, 10.0))
    }

    fn user_edit(manager: &TabManager) -> SceneChange {
        SceneChange {
            tab_id: manager.active_id(),
            origin: SceneOrigin::UserEdit,
            scene: edited(&manager.active().scene),
        }
    }

    fn assert_invariants(manager: &TabManager) {
        assert!(!manager.is_empty());
        assert!(manager.get(manager.active_id()).is_some());
    }

    #[test]
    fn test_starts_with_one_clean_untitled_tab() {
        let manager = TabManager::new("Untitled");
        assert_eq!(manager.len(), 1);
        let tab = manager.active();
        assert_eq!(tab.title, "Untitled");
        assert!(!tab.dirty);
        assert!(tab.file_path.is_none());
    }

    #[test]
    fn test_create_tab_defaults() {
        let mut manager = TabManager::new("Untitled");
        let id = manager.create_tab(TabOverrides::default(), "Sans titre");
        let tab = manager.get(id).unwrap();
        assert_eq!(tab.title, "Sans titre");
        assert!(!tab.dirty);
        assert!(tab.file_path.is_none());
        assert_ne!(manager.active_id(), id);
    }

    #[test]
    fn test_closing_last_tab_is_noop() {
        let mut manager = TabManager::new("Untitled");
        let id = manager.active_id();
        assert!(!manager.close_tab(id));
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.active_id(), id);
    }

    #[test]
    fn test_closing_active_activates_first_remaining() {
        let mut manager = TabManager::new("Untitled");
        let first = manager.active_id();
        let second = manager.create_tab(TabOverrides::default(), "Untitled");
        let third = manager.create_tab(TabOverrides::default(), "Untitled");

        manager.set_active(third);
        assert!(manager.close_tab(third));
        assert_eq!(manager.active_id(), first);

        manager.set_active(second);
        assert!(manager.close_tab(first));
        assert_eq!(manager.active_id(), second);

        manager.create_tab(TabOverrides::default(), "Untitled");
        assert!(manager.close_tab(second));
        assert_eq!(manager.active_id(), manager.tabs()[0].id);
    }

    #[test]
    fn test_closing_inactive_keeps_active() {
        let mut manager = TabManager::new("Untitled");
        let first = manager.active_id();
        let second = manager.create_tab(TabOverrides::default(), "Untitled");
        assert!(manager.close_tab(second));
        assert_eq!(manager.active_id(), first);
    }

    #[test]
    fn test_closing_unknown_is_noop() {
        let mut manager = TabManager::new("Untitled");
        manager.create_tab(TabOverrides::default(), "Untitled");
        assert!(!manager.close_tab(TabId::new()));
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_set_active_unknown_is_ignored() {
        let mut manager = TabManager::new("Untitled");
        let before = manager.active_id();
        assert!(!manager.set_active(TabId::new()));
        assert_eq!(manager.active_id(), before);
    }

    #[test]
    fn test_update_active_scene_touches_only_active() {
        let mut manager = TabManager::new("Untitled");
        let first = manager.active_id();
        let second = manager.create_tab(TabOverrides::default(), "Untitled");
        manager.set_active(second);

        assert!(manager.update_active_scene(|tab| TabUpdate {
            title: Some(format!("{} 2", tab.title)),
            dirty: Some(true),
            ..Default::default()
        }));

        assert_eq!(manager.get(second).unwrap().title, "Untitled 2");
        assert!(manager.get(second).unwrap().dirty);
        assert_eq!(manager.get(first).unwrap().title, "Untitled");
        assert!(!manager.get(first).unwrap().dirty);
    }

    #[test]
    fn test_programmatic_change_does_not_mark_dirty() {
        let mut manager = TabManager::new("Untitled");
        let change = SceneChange {
            tab_id: manager.active_id(),
            origin: SceneOrigin::Programmatic,
            scene: manager.active().scene.clone(),
        };
        assert!(!manager.apply_scene_change(change));
        assert!(!manager.active().dirty);

        let change = user_edit(&manager);
        assert!(manager.apply_scene_change(change));
        assert!(manager.active().dirty);
        assert_eq!(manager.active().scene.elements.len(), 1);
    }

    #[test]
    fn test_edit_for_inactive_tab_is_dropped() {
        let mut manager = TabManager::new("Untitled");
        let first = manager.active_id();
        let stale = user_edit(&manager);
        let second = manager.create_tab(TabOverrides::default(), "Untitled");
        manager.set_active(second);

        assert!(!manager.apply_scene_change(stale));
        assert!(!manager.get(first).unwrap().dirty);
        assert!(!manager.get(second).unwrap().dirty);
    }

    #[test]
    fn test_mark_saved_sets_path_title_and_clears_dirty() {
        let mut manager = TabManager::new("Untitled");
        let id = manager.active_id();
        let change = user_edit(&manager);
        manager.apply_scene_change(change);

        let revision = manager.active().revision;

        assert!(manager.mark_saved(id, PathBuf::from("/tmp/x.excalidraw"), revision, "Project"));
        let tab = manager.active();
        assert!(!tab.dirty);
        assert_eq!(tab.title, "x.excalidraw");
        assert_eq!(tab.file_path.as_deref(), Some(Path::new("/tmp/x.excalidraw")));
    }

    #[test]
    fn test_mark_saved_after_later_edit_stays_dirty() {
        let mut manager = TabManager::new("Untitled");
        let id = manager.active_id();
        let change = user_edit(&manager);
        manager.apply_scene_change(change);
        let serialized_at = manager.active().revision;

        let change = user_edit(&manager);
        manager.apply_scene_change(change);
        assert_eq!(manager.active().revision, serialized_at + 1);

        assert!(manager.mark_saved(id, PathBuf::from("/tmp/x.excalidraw"), serialized_at, "Project"));
        let tab = manager.active();
        assert!(tab.dirty);
        assert_eq!(tab.title, "x.excalidraw");
        assert_eq!(tab.file_path.as_deref(), Some(Path::new("/tmp/x.excalidraw")));
        assert_eq!(tab.scene.elements.len(), 2);
    }

    #[test]
    fn test_programmatic_change_keeps_revision() {
        let mut manager = TabManager::new("Untitled");
        let change = SceneChange {
            tab_id: manager.active_id(),
            origin: SceneOrigin::Programmatic,
            scene: edited(&manager.active().scene),
        };
        manager.apply_scene_change(change);
        assert_eq!(manager.active().revision, 0);
    }

    #[test]
    fn test_mark_saved_without_file_name_uses_fallback() {
        let mut manager = TabManager::new("Untitled");
        let id = manager.active_id();
        assert!(manager.mark_saved(id, PathBuf::from("/"), 0, "Projeto"));
        assert_eq!(manager.active().title, "Projeto");
    }

    #[test]
    fn test_mark_saved_for_closed_tab_is_noop() {
        let mut manager = TabManager::new("Untitled");
        assert!(!manager.mark_saved(TabId::new(), PathBuf::from("/tmp/a.excalidraw"), 0, "Project"));
        assert!(manager.active().file_path.is_none());
    }

    #[test]
    fn test_find_by_path() {
        let mut manager = TabManager::new("Untitled");
        let id = manager.create_tab(
            TabOverrides {
                file_path: Some(PathBuf::from("/tmp/a.excalidraw")),
                ..Default::default()
            },
            "Untitled",
        );
        assert_eq!(manager.find_by_path(Path::new("/tmp/a.excalidraw")), Some(id));
        assert_eq!(manager.find_by_path(Path::new("/tmp/b.excalidraw")), None);
    }

    #[test]
    fn test_tab_cycling_wraps() {
        let mut manager = TabManager::new("Untitled");
        let first = manager.active_id();
        let second = manager.create_tab(TabOverrides::default(), "Untitled");
        let third = manager.create_tab(TabOverrides::default(), "Untitled");

        assert_eq!(manager.next_id(), second);
        assert_eq!(manager.prev_id(), third);
        manager.set_active(third);
        assert_eq!(manager.next_id(), first);
    }

    #[test]
    fn test_random_create_close_sequences_keep_invariants() {
        // Small deterministic LCG so the sequence is reproducible.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as usize
        };

        let mut manager = TabManager::new("Untitled");
        for _ in 0..2000 {
            let ids: Vec<TabId> = manager.tabs().iter().map(|t| t.id).collect();
            match next() % 4 {
                0 => {
                    manager.create_tab(TabOverrides::default(), "Untitled");
                }
                1 => {
                    let active_before = manager.active_id();
                    let target = ids[next() % ids.len()];
                    let closed = manager.close_tab(target);
                    if closed && target != active_before {
                        assert_eq!(manager.active_id(), active_before);
                    }
                    if closed && target == active_before {
                        assert_eq!(manager.active_id(), manager.tabs()[0].id);
                    }
                }
                2 => {
                    manager.set_active(ids[next() % ids.len()]);
                }
                _ => {
                    manager.close_tab(manager.active_id());
                }
            }
            assert_invariants(&manager);
        }
    }
}
