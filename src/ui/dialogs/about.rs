use fltk::{
    button::Button,
    enums::{Align, Font, FrameType},
    frame::Frame,
    group::{Flex, FlexType},
    prelude::*,
    window::Window,
};

use super::run_dialog;
use crate::app::view::AboutPanel;
use crate::ui::theme;

const ROW_HEIGHT: i32 = 26;

/// Show the About panel modally; returns once it is closed.
pub fn show_about_dialog(panel: &AboutPanel) {
    let height = 130 + ROW_HEIGHT * panel.rows.len() as i32;
    let mut dialog = Window::default()
        .with_size(380, height)
        .with_label(&panel.title)
        .center_screen();
    dialog.make_modal(true);
    dialog.set_color(theme::chrome_bg());

    let mut flex = Flex::new(16, 16, 348, height - 32, None);
    flex.set_type(FlexType::Column);
    flex.set_spacing(8);

    let mut title = Frame::default().with_label(&panel.title);
    title.set_label_size(18);
    title.set_label_font(Font::HelveticaBold);
    title.set_label_color(theme::ink());
    title.set_align(Align::Left | Align::Inside);
    flex.fixed(&title, 32);

    for (label, value) in &panel.rows {
        let mut row = Flex::default();
        row.set_type(FlexType::Row);

        let mut label_frame = Frame::default().with_label(label);
        label_frame.set_label_size(13);
        label_frame.set_label_color(theme::muted_ink());
        label_frame.set_align(Align::Left | Align::Inside);

        let mut value_frame = Frame::default().with_label(value);
        value_frame.set_label_size(13);
        value_frame.set_label_font(Font::Courier);
        value_frame.set_label_color(theme::ink());
        value_frame.set_align(Align::Right | Align::Inside);

        row.end();
        flex.fixed(&row, ROW_HEIGHT);
    }

    // Spacer
    Frame::default();

    let mut buttons = Flex::default();
    buttons.set_type(FlexType::Row);
    Frame::default();
    let mut close_btn = Button::default().with_label(&panel.close);
    close_btn.set_frame(FrameType::RFlatBox);
    close_btn.set_color(theme::pill_bg());
    buttons.fixed(&close_btn, 100);
    buttons.end();
    flex.fixed(&buttons, 32);

    flex.end();
    dialog.end();

    let mut dialog_close = dialog.clone();
    close_btn.set_callback(move |_| {
        dialog_close.hide();
    });

    dialog.show();
    run_dialog(&dialog);
}
