use fltk::{app::Sender, dialog, prelude::*};

use super::controllers::shell::{ShellController, ShellEffect};
use super::domain::messages::Message;
use super::domain::settings::AppSettings;
use super::services::bridge::BridgeClient;
use crate::ui::dialogs::about::show_about_dialog;
use crate::ui::main_window::MainWidgets;
use crate::ui::menu::build_menu;

/// Main application coordinator: owns the controller and the widgets and
/// turns channel messages into controller calls and redraws.
pub struct AppState {
    pub shell: ShellController<BridgeClient>,
    pub settings: AppSettings,
    pub widgets: MainWidgets,
    pub sender: Sender<Message>,
}

impl AppState {
    pub fn new(
        widgets: MainWidgets,
        bridge: BridgeClient,
        settings: AppSettings,
        sender: Sender<Message>,
    ) -> Self {
        let shell = ShellController::new(settings.language(), bridge);
        Self {
            shell,
            settings,
            widgets,
            sender,
        }
    }

    /// Build the menu, load the first tab and ask for app info.
    pub fn start(&mut self) {
        build_menu(&mut self.widgets.menu, &self.sender, self.shell.i18n());
        let effects = self.shell.start();
        self.apply(effects);
        self.render();
    }

    /// Handle one message. Returns `false` when the app should exit.
    pub fn handle(&mut self, msg: Message) -> bool {
        let effects = match msg {
            Message::TabNew => self.shell.new_tab(),
            Message::FileOpen => self.shell.open(),
            Message::FileSave => self.shell.save(),
            Message::FileSaveAs => self.shell.save_as(),
            Message::Quit => return false,

            Message::TabSwitch(id) => self.shell.switch_tab(id),
            Message::TabClose(id) => self.shell.close_tab(id),
            Message::TabCloseActive => self.shell.close_active_tab(),
            Message::TabNext => self.shell.next_tab(),
            Message::TabPrevious => self.shell.previous_tab(),

            Message::SceneChanged(change) => {
                self.shell.scene_changed(change);
                Vec::new()
            }

            Message::SetLanguage(lang) => self.shell.set_language(lang),
            Message::ShowAbout => {
                self.show_about();
                Vec::new()
            }

            Message::Bridge(reply) => self.shell.handle_reply(reply),
        };

        self.apply(effects);
        self.render();
        true
    }

    fn apply(&mut self, effects: Vec<ShellEffect>) {
        for effect in effects {
            match effect {
                ShellEffect::LoadCanvas { tab_id, scene } => {
                    self.widgets.canvas.load_scene(tab_id, scene);
                }
                ShellEffect::Notice(text) => dialog::alert_default(&text),
                ShellEffect::LanguageChanged(lang) => {
                    self.settings.set_language(lang);
                    if let Err(e) = self.settings.save() {
                        log::error!("Failed to save settings: {}", e);
                    }
                    build_menu(&mut self.widgets.menu, &self.sender, self.shell.i18n());
                }
            }
        }
    }

    fn show_about(&mut self) {
        self.shell.show_about();
        if let Some(panel) = self.shell.view().about {
            show_about_dialog(&panel);
        }
        self.shell.close_about();
    }

    /// Push the current view into the widgets.
    pub fn render(&mut self) {
        let view = self.shell.view();
        let widgets = &mut self.widgets;
        widgets.toolbar.update(&view);
        widgets.tab_bar.rebuild(&view.tabs);
        widgets.status_bar.set_pills(&view.status);
        widgets.wind.set_label(&view.window_title());
    }
}
