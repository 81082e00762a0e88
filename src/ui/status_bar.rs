use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    draw,
    enums::{Align, Font},
    prelude::*,
    widget::Widget,
};

use crate::ui::theme;

pub const STATUS_BAR_HEIGHT: i32 = 26;

const PILL_H_PADDING: i32 = 10;
const PILL_GAP: i32 = 6;
const PILL_MARGIN: i32 = 4;

/// Footer with right-aligned version/platform pills.
pub struct StatusBar {
    pub widget: Widget,
    pills: Rc<RefCell<Vec<String>>>,
}

impl StatusBar {
    pub fn new() -> Self {
        let pills: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let mut widget = Widget::new(0, 0, 0, STATUS_BAR_HEIGHT, None);

        let draw_pills = pills.clone();
        widget.draw(move |wid| {
            draw::set_draw_color(theme::chrome_bg());
            draw::draw_rectf(wid.x(), wid.y(), wid.w(), wid.h());
            draw::set_draw_color(theme::border());
            draw::draw_line(wid.x(), wid.y(), wid.x() + wid.w(), wid.y());

            draw::set_font(Font::Helvetica, 11);
            let mut right = wid.x() + wid.w() - PILL_MARGIN * 2;
            for pill in draw_pills.borrow().iter().rev() {
                let (tw, _) = draw::measure(pill, false);
                let pw = tw + PILL_H_PADDING * 2;
                let px = right - pw;
                let py = wid.y() + PILL_MARGIN;
                let ph = wid.h() - PILL_MARGIN * 2;

                draw::set_draw_color(theme::pill_bg());
                draw::draw_rectf(px, py, pw, ph);
                draw::set_draw_color(theme::muted_ink());
                draw::draw_text2(pill, px, py, pw, ph, Align::Center);
                right = px - PILL_GAP;
            }
        });

        Self { widget, pills }
    }

    pub fn set_pills(&mut self, pills: &[String]) {
        let mut current = self.pills.borrow_mut();
        if current.as_slice() != pills {
            *current = pills.to_vec();
            drop(current);
            self.widget.redraw();
        }
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}
