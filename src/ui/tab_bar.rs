use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app::Sender,
    draw,
    enums::{Align, Color, Event, Font},
    prelude::*,
    widget::Widget,
};

use crate::app::domain::messages::Message;
use crate::app::view::TabChip;
use crate::ui::theme;

pub const TAB_BAR_HEIGHT: i32 = 34;

const MIN_TAB_WIDTH: i32 = 80;
const MAX_TAB_WIDTH: i32 = 220;
const CLOSE_BTN_SIZE: i32 = 14;
const CLOSE_BTN_MARGIN: i32 = 8;
const TAB_H_PADDING: i32 = 12;
const CORNER_RADIUS: i32 = 6;
const TAB_GAP: i32 = 2;
const PLUS_BTN_WIDTH: i32 = 28;
const PLUS_BTN_MARGIN: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
enum LayoutItem {
    Tab { index: usize, x: i32, width: i32 },
    PlusButton { x: i32 },
}

#[derive(Debug, PartialEq)]
enum HitResult {
    Tab { index: usize, is_close: bool },
    PlusButton,
    None,
}

struct TabBarState {
    chips: Vec<TabChip>,
    layout: Vec<LayoutItem>,
    hover_tab_index: Option<usize>,
    hover_close: bool,
    hover_plus: bool,
    sender: Sender<Message>,
    widget_w: i32,
}

/// Custom-drawn strip of tab chips with close buttons and a "+" button.
pub struct TabBar {
    pub widget: Widget,
    state: Rc<RefCell<TabBarState>>,
}

impl TabBar {
    pub fn new(x: i32, y: i32, w: i32, sender: Sender<Message>) -> Self {
        let state = Rc::new(RefCell::new(TabBarState {
            chips: Vec::new(),
            layout: Vec::new(),
            hover_tab_index: None,
            hover_close: false,
            hover_plus: false,
            sender,
            widget_w: w,
        }));

        let mut widget = Widget::new(x, y, w, TAB_BAR_HEIGHT, None);

        let draw_state = state.clone();
        widget.draw(move |wid| {
            let st = draw_state.borrow();
            draw_tab_bar(wid, &st);
        });

        let handle_state = state.clone();
        widget.handle(move |wid, event| handle_tab_bar(wid, event, &handle_state));

        Self { widget, state }
    }

    pub fn rebuild(&mut self, chips: &[TabChip]) {
        let mut st = self.state.borrow_mut();
        st.widget_w = self.widget.w();
        st.chips = chips.to_vec();
        st.hover_tab_index = None;
        st.hover_close = false;
        st.layout = compute_layout(st.chips.len(), st.widget_w);
        drop(st);
        self.widget.redraw();
    }
}

// --- Layout computation ---

fn compute_layout(tab_count: usize, widget_w: i32) -> Vec<LayoutItem> {
    if tab_count == 0 {
        return vec![LayoutItem::PlusButton { x: PLUS_BTN_MARGIN }];
    }

    let count = tab_count as i32;
    let fixed_width = PLUS_BTN_WIDTH + PLUS_BTN_MARGIN + TAB_GAP * (count - 1);
    let tab_width = ((widget_w - fixed_width) / count).clamp(MIN_TAB_WIDTH, MAX_TAB_WIDTH);

    let mut layout = Vec::with_capacity(tab_count + 1);
    let mut cursor_x = 0;
    for index in 0..tab_count {
        layout.push(LayoutItem::Tab { index, x: cursor_x, width: tab_width });
        cursor_x += tab_width + TAB_GAP;
    }
    layout.push(LayoutItem::PlusButton { x: cursor_x + PLUS_BTN_MARGIN });
    layout
}

// --- Hit-testing ---

fn close_button_origin(x: i32, width: i32, wy: i32) -> (i32, i32) {
    (
        x + width - CLOSE_BTN_MARGIN - CLOSE_BTN_SIZE,
        wy + (TAB_BAR_HEIGHT - CLOSE_BTN_SIZE) / 2,
    )
}

fn hit_test_layout(items: &[LayoutItem], chips: &[TabChip], wy: i32, mx: i32, my: i32) -> HitResult {
    if my < wy || my >= wy + TAB_BAR_HEIGHT {
        return HitResult::None;
    }

    for item in items {
        match *item {
            LayoutItem::Tab { index, x, width } => {
                if mx >= x && mx < x + width {
                    let closable = chips.get(index).is_some_and(|c| c.closable);
                    let (close_x, close_y) = close_button_origin(x, width, wy);
                    let is_close = closable
                        && mx >= close_x
                        && mx <= close_x + CLOSE_BTN_SIZE
                        && my >= close_y
                        && my <= close_y + CLOSE_BTN_SIZE;
                    return HitResult::Tab { index, is_close };
                }
            }
            LayoutItem::PlusButton { x } => {
                if mx >= x && mx < x + PLUS_BTN_WIDTH {
                    return HitResult::PlusButton;
                }
            }
        }
    }
    HitResult::None
}

// --- Truncation ---

fn truncate_to_fit(text: &str, max_width: i32) -> String {
    if max_width <= 0 {
        return String::new();
    }
    draw::set_font(Font::Helvetica, 12);
    let (tw, _) = draw::measure(text, true);
    if tw <= max_width {
        return text.to_string();
    }

    let ellipsis = "...";
    let (ew, _) = draw::measure(ellipsis, true);
    if ew >= max_width {
        return ellipsis.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    for len in (1..chars.len()).rev() {
        let candidate: String = chars[..len].iter().collect();
        let full = format!("{candidate}{ellipsis}");
        let (fw, _) = draw::measure(&full, true);
        if fw <= max_width {
            return full;
        }
    }
    ellipsis.to_string()
}

// --- Drawing ---

fn draw_rounded_top_rect(x: i32, y: i32, w: i32, h: i32, r: i32, color: Color) {
    draw::set_draw_color(color);
    draw::draw_rectf(x, y + r, w, h - r);
    draw::draw_rectf(x + r, y, w - 2 * r, r);
    draw::draw_pie(x, y, 2 * r, 2 * r, 90.0, 180.0);
    draw::draw_pie(x + w - 2 * r, y, 2 * r, 2 * r, 0.0, 90.0);
}

fn draw_tab_bar(wid: &Widget, st: &TabBarState) {
    let wx = wid.x();
    let wy = wid.y();
    let ww = wid.w();
    let wh = wid.h();

    draw::set_draw_color(theme::pill_bg());
    draw::draw_rectf(wx, wy, ww, wh);

    for item in &st.layout {
        match *item {
            LayoutItem::Tab { index, x, width } => {
                let Some(chip) = st.chips.get(index) else {
                    continue;
                };
                let tx = wx + x;

                if chip.active {
                    draw_rounded_top_rect(tx, wy + 3, width, wh - 3, CORNER_RADIUS, theme::paper());
                    draw::set_draw_color(theme::accent());
                    draw::draw_rectf(tx + CORNER_RADIUS, wy + 3, width - 2 * CORNER_RADIUS, 2);
                } else {
                    draw_rounded_top_rect(tx, wy + 5, width, wh - 5, CORNER_RADIUS, theme::chrome_bg());
                }

                let text_color = if chip.active { theme::ink() } else { theme::muted_ink() };
                let reserved = if chip.closable { CLOSE_BTN_MARGIN + CLOSE_BTN_SIZE } else { 0 };
                let display_text = truncate_to_fit(&chip.label, width - 2 * TAB_H_PADDING - reserved);

                draw::set_draw_color(text_color);
                draw::set_font(Font::Helvetica, 12);
                draw::draw_text2(
                    &display_text,
                    tx + TAB_H_PADDING,
                    wy + 3,
                    width - 2 * TAB_H_PADDING - reserved,
                    wh - 3,
                    Align::Left | Align::Inside,
                );

                if !chip.closable {
                    continue;
                }

                let (close_x, close_y) = close_button_origin(tx, width, wy);
                let is_hovered_tab = st.hover_tab_index == Some(index);
                if is_hovered_tab && st.hover_close {
                    draw::set_draw_color(theme::border());
                    draw::draw_rectf(close_x - 2, close_y - 2, CLOSE_BTN_SIZE + 4, CLOSE_BTN_SIZE + 4);
                }

                draw::set_draw_color(if chip.active || is_hovered_tab { text_color } else { theme::muted_ink() });
                draw::set_font(Font::HelveticaBold, 18);
                draw::draw_text2("\u{00d7}", close_x, close_y, CLOSE_BTN_SIZE, CLOSE_BTN_SIZE, Align::Center);
            }
            LayoutItem::PlusButton { x } => {
                let px = wx + x;
                let btn_y = wy + 5;
                let btn_h = wh - 5;
                let bg = if st.hover_plus { theme::border() } else { theme::chrome_bg() };
                draw_rounded_top_rect(px, btn_y, PLUS_BTN_WIDTH, btn_h, CORNER_RADIUS, bg);
                draw::set_draw_color(if st.hover_plus { theme::ink() } else { theme::muted_ink() });
                draw::set_font(Font::HelveticaBold, 16);
                draw::draw_text2("+", px, btn_y, PLUS_BTN_WIDTH, btn_h, Align::Center);
            }
        }
    }
}

// --- Event handling ---

fn handle_tab_bar(wid: &mut Widget, event: Event, state: &Rc<RefCell<TabBarState>>) -> bool {
    match event {
        Event::Push => {
            let st = state.borrow();
            let mx = fltk::app::event_x() - wid.x();
            let my = fltk::app::event_y();
            let button = fltk::app::event_button();

            let hit = hit_test_layout(&st.layout, &st.chips, wid.y(), mx, my);
            let sender = st.sender;

            match hit {
                HitResult::PlusButton if button == 1 => {
                    drop(st);
                    sender.send(Message::TabNew);
                    true
                }
                HitResult::Tab { index, is_close } => {
                    let Some((id, closable)) = st.chips.get(index).map(|c| (c.id, c.closable)) else {
                        return false;
                    };
                    drop(st);

                    // Middle click closes, like a browser
                    if (button == 2 && closable) || (button == 1 && is_close) {
                        sender.send(Message::TabClose(id));
                    } else if button == 1 {
                        sender.send(Message::TabSwitch(id));
                    }
                    true
                }
                _ => false,
            }
        }
        Event::Move => {
            let mut st = state.borrow_mut();
            let mx = fltk::app::event_x() - wid.x();
            let my = fltk::app::event_y();

            let (new_hover, new_close, new_hover_plus) =
                match hit_test_layout(&st.layout, &st.chips, wid.y(), mx, my) {
                    HitResult::Tab { index, is_close } => (Some(index), is_close, false),
                    HitResult::PlusButton => (None, false, true),
                    HitResult::None => (None, false, false),
                };

            if new_hover != st.hover_tab_index || new_close != st.hover_close || new_hover_plus != st.hover_plus {
                st.hover_tab_index = new_hover;
                st.hover_close = new_close;
                st.hover_plus = new_hover_plus;
                drop(st);
                wid.redraw();
            }
            true
        }
        Event::Leave => {
            let mut st = state.borrow_mut();
            if st.hover_tab_index.is_some() || st.hover_close || st.hover_plus {
                st.hover_tab_index = None;
                st.hover_close = false;
                st.hover_plus = false;
                drop(st);
                wid.redraw();
            }
            false
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::document::TabId;

    fn chips(count: usize, closable: bool) -> Vec<TabChip> {
        (0..count)
            .map(|i| TabChip {
                id: TabId::new(),
                label: format!("tab {i}"),
                active: i == 0,
                closable,
            })
            .collect()
    }

    #[test]
    fn test_layout_empty_has_only_plus() {
        assert_eq!(compute_layout(0, 800), vec![LayoutItem::PlusButton { x: PLUS_BTN_MARGIN }]);
    }

    #[test]
    fn test_layout_clamps_tab_width() {
        let layout = compute_layout(2, 2000);
        assert_eq!(layout[0], LayoutItem::Tab { index: 0, x: 0, width: MAX_TAB_WIDTH });
        assert_eq!(
            layout[1],
            LayoutItem::Tab { index: 1, x: MAX_TAB_WIDTH + TAB_GAP, width: MAX_TAB_WIDTH }
        );
        assert_eq!(
            layout[2],
            LayoutItem::PlusButton { x: 2 * (MAX_TAB_WIDTH + TAB_GAP) + PLUS_BTN_MARGIN }
        );

        let crowded = compute_layout(30, 600);
        assert!(crowded.iter().all(|item| match item {
            LayoutItem::Tab { width, .. } => *width == MIN_TAB_WIDTH,
            LayoutItem::PlusButton { .. } => true,
        }));
    }

    #[test]
    fn test_hit_test_tabs_and_plus() {
        let chips = chips(2, true);
        let layout = compute_layout(chips.len(), 2000);
        let wy = 40;

        assert_eq!(
            hit_test_layout(&layout, &chips, wy, 10, wy + 10),
            HitResult::Tab { index: 0, is_close: false }
        );
        assert_eq!(
            hit_test_layout(&layout, &chips, wy, MAX_TAB_WIDTH + TAB_GAP + 5, wy + 10),
            HitResult::Tab { index: 1, is_close: false }
        );

        let plus_x = 2 * (MAX_TAB_WIDTH + TAB_GAP) + PLUS_BTN_MARGIN + 1;
        assert_eq!(hit_test_layout(&layout, &chips, wy, plus_x, wy + 10), HitResult::PlusButton);
        assert_eq!(hit_test_layout(&layout, &chips, wy, 10, wy - 1), HitResult::None);
    }

    #[test]
    fn test_close_button_only_when_closable() {
        let layout = compute_layout(1, 2000);
        let wy = 0;
        let (close_x, close_y) = close_button_origin(0, MAX_TAB_WIDTH, wy);

        let sole = chips(1, false);
        assert_eq!(
            hit_test_layout(&layout, &sole, wy, close_x + 2, close_y + 2),
            HitResult::Tab { index: 0, is_close: false }
        );

        let many = chips(1, true);
        assert_eq!(
            hit_test_layout(&layout, &many, wy, close_x + 2, close_y + 2),
            HitResult::Tab { index: 0, is_close: true }
        );
    }
}
