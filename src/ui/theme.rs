use fltk::{enums::Color, menu::MenuBar, prelude::*, window::Window};

/// Warm paper background, same as the canvas default.
pub fn paper() -> Color {
    Color::from_rgb(0xf4, 0xf2, 0xef)
}

pub fn chrome_bg() -> Color {
    Color::from_rgb(250, 249, 247)
}

pub fn border() -> Color {
    Color::from_rgb(221, 217, 210)
}

pub fn ink() -> Color {
    Color::from_rgb(30, 30, 30)
}

pub fn muted_ink() -> Color {
    Color::from_rgb(110, 106, 100)
}

pub fn accent() -> Color {
    Color::from_rgb(105, 101, 219)
}

pub fn saved_dot() -> Color {
    Color::from_rgb(47, 158, 68)
}

pub fn dirty_dot() -> Color {
    Color::from_rgb(230, 119, 0)
}

pub fn pill_bg() -> Color {
    Color::from_rgb(235, 232, 227)
}

/// Parse a `#rrggbb` scene color, falling back to `fallback`.
pub fn parse_hex(hex: &str, fallback: Color) -> Color {
    if hex.len() == 7 && hex.starts_with('#') {
        Color::from_hex_str(hex).unwrap_or(fallback)
    } else {
        fallback
    }
}

pub fn apply_chrome(window: &mut Window, menu: &mut MenuBar) {
    window.set_color(chrome_bg());
    window.set_label_color(ink());
    menu.set_color(chrome_bg());
    menu.set_text_color(ink());
    menu.set_selection_color(pill_bg()); // Hover color
    window.redraw();
    menu.redraw();
}
