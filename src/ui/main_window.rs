use fltk::{
    app::Sender,
    group::{Flex, FlexType},
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use crate::app::domain::messages::Message;
use super::canvas::CanvasHost;
use super::status_bar::{STATUS_BAR_HEIGHT, StatusBar};
use super::tab_bar::{TAB_BAR_HEIGHT, TabBar};
use super::theme;
use super::toolbar::{TOOLBAR_HEIGHT, Toolbar};

pub const WINDOW_WIDTH: i32 = 1400;
pub const WINDOW_HEIGHT: i32 = 900;
pub const MIN_WIDTH: i32 = 1000;
pub const MIN_HEIGHT: i32 = 700;
const MENU_HEIGHT: i32 = 26;

pub struct MainWidgets {
    pub wind: Window,
    pub flex: Flex,
    pub menu: MenuBar,
    pub toolbar: Toolbar,
    pub tab_bar: TabBar,
    pub canvas: CanvasHost,
    pub status_bar: StatusBar,
}

pub fn build_main_window(title: &str, sender: &Sender<Message>) -> MainWidgets {
    let mut wind = Window::default()
        .with_size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .with_label(title)
        .center_screen();
    wind.set_xclass("excalidraw-desktop");
    wind.size_range(MIN_WIDTH, MIN_HEIGHT, 0, 0);

    let mut flex = Flex::new(0, 0, WINDOW_WIDTH, WINDOW_HEIGHT, None);
    flex.set_type(FlexType::Column);

    let mut menu = MenuBar::new(0, 0, 0, MENU_HEIGHT, "");
    flex.fixed(&menu, MENU_HEIGHT);

    let toolbar = Toolbar::new(*sender);
    flex.fixed(&toolbar.flex, TOOLBAR_HEIGHT);

    let tab_bar = TabBar::new(0, 0, WINDOW_WIDTH, *sender);
    flex.fixed(&tab_bar.widget, TAB_BAR_HEIGHT);

    let canvas = CanvasHost::new(*sender);

    let status_bar = StatusBar::new();
    flex.fixed(&status_bar.widget, STATUS_BAR_HEIGHT);

    flex.end();
    wind.resizable(&flex);
    wind.end();

    theme::apply_chrome(&mut wind, &mut menu);

    // Closing the window goes through the normal quit path
    let s = *sender;
    wind.set_callback(move |_| {
        if fltk::app::event() == fltk::enums::Event::Close {
            s.send(Message::Quit);
        }
    });

    MainWidgets {
        wind,
        flex,
        menu,
        toolbar,
        tab_bar,
        canvas,
        status_bar,
    }
}
