pub mod canvas;
pub mod dialogs;
pub mod main_window;
pub mod menu;
pub mod status_bar;
pub mod tab_bar;
pub mod theme;
pub mod toolbar;
