// Hide console window on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use fltk::{app, dialog, prelude::*};

use excalidraw_desktop::app::domain::messages::Message;
use excalidraw_desktop::app::domain::settings::AppSettings;
use excalidraw_desktop::app::infrastructure::dialogs::RfdDialogs;
use excalidraw_desktop::app::infrastructure::platform;
use excalidraw_desktop::app::services::bridge::{BridgeHost, spawn_bridge};
use excalidraw_desktop::app::services::i18n::{Localizer, keys};
use excalidraw_desktop::app::state::AppState;
use excalidraw_desktop::ui::main_window::build_main_window;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = app::App::default();
    let (sender, receiver) = app::channel::<Message>();

    let settings = AppSettings::load();
    let i18n = Localizer::new(settings.language());
    log::info!("Starting with language {}", i18n.lang().code());

    let host = BridgeHost::new(RfdDialogs, platform::app_info());
    let bridge = match spawn_bridge(host, move |reply| sender.send(Message::Bridge(reply))) {
        Ok(bridge) => bridge,
        Err(e) => {
            log::error!("Failed to start the native bridge: {}", e);
            dialog::alert_default(&format!("Failed to start: {}", e));
            return;
        }
    };

    let mut widgets = build_main_window(i18n.t(keys::APP_TITLE), &sender);
    widgets.wind.show();

    let mut state = AppState::new(widgets, bridge, settings, sender);
    state.start();

    'events: while app.wait() {
        while let Some(msg) = receiver.recv() {
            if !state.handle(msg) {
                break 'events;
            }
        }
    }
    log::info!("Shutting down");
}
