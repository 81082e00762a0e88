use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app::Sender,
    button::Button,
    draw,
    enums::{Align, Font, FrameType},
    frame::Frame,
    group::{Flex, FlexType},
    menu::Choice,
    prelude::*,
    widget::Widget,
};

use crate::app::domain::messages::Message;
use crate::app::services::i18n::Lang;
use crate::app::view::{FileChip, ShellView};
use crate::ui::theme;

pub const TOOLBAR_HEIGHT: i32 = 44;

const DOT_SIZE: i32 = 8;
const CHIP_PADDING: i32 = 10;

/// Top bar: brand, active-file chip, actions and the language selector.
pub struct Toolbar {
    pub flex: Flex,
    brand: Frame,
    chip: Widget,
    chip_state: Rc<RefCell<Option<FileChip>>>,
    new_tab: Button,
    open: Button,
    save: Button,
    save_as: Button,
    language_label: Frame,
    language: Choice,
    about: Button,
}

impl Toolbar {
    pub fn new(sender: Sender<Message>) -> Self {
        let mut flex = Flex::default().with_size(0, TOOLBAR_HEIGHT);
        flex.set_type(FlexType::Row);
        flex.set_margins(10, 6, 10, 6);
        flex.set_spacing(6);
        flex.set_frame(FrameType::FlatBox);
        flex.set_color(theme::chrome_bg());

        let mut brand = Frame::default();
        brand.set_label_font(Font::HelveticaBold);
        brand.set_label_size(15);
        brand.set_label_color(theme::ink());
        brand.set_align(Align::Left | Align::Inside);
        flex.fixed(&brand, 160);

        let chip_state: Rc<RefCell<Option<FileChip>>> = Rc::new(RefCell::new(None));
        let mut chip = Widget::new(0, 0, 0, 0, None);
        let draw_state = chip_state.clone();
        chip.draw(move |wid| {
            if let Some(chip) = draw_state.borrow().as_ref() {
                draw_file_chip(wid, chip);
            }
        });

        let mut new_tab = toolbar_button();
        new_tab.emit(sender, Message::TabNew);
        flex.fixed(&new_tab, 100);

        let mut open = toolbar_button();
        open.emit(sender, Message::FileOpen);
        flex.fixed(&open, 80);

        let mut save = toolbar_button();
        save.set_color(theme::accent());
        save.set_label_color(fltk::enums::Color::White);
        save.emit(sender, Message::FileSave);
        flex.fixed(&save, 80);

        let mut save_as = toolbar_button();
        save_as.emit(sender, Message::FileSaveAs);
        flex.fixed(&save_as, 110);

        let mut language_label = Frame::default();
        language_label.set_label_size(12);
        language_label.set_label_color(theme::muted_ink());
        language_label.set_align(Align::Right | Align::Inside);
        flex.fixed(&language_label, 60);

        let mut language = Choice::default();
        language.set_callback(move |c| {
            if let Ok(idx) = usize::try_from(c.value())
                && let Some(lang) = Lang::ALL.get(idx)
            {
                sender.send(Message::SetLanguage(*lang));
            }
        });
        flex.fixed(&language, 150);

        let mut about = toolbar_button();
        about.emit(sender, Message::ShowAbout);
        flex.fixed(&about, 90);

        flex.end();

        Self {
            flex,
            brand,
            chip,
            chip_state,
            new_tab,
            open,
            save,
            save_as,
            language_label,
            language,
            about,
        }
    }

    pub fn update(&mut self, view: &ShellView) {
        self.brand.set_label(&view.brand);
        self.new_tab.set_label(&view.toolbar.new_tab);
        self.open.set_label(&view.toolbar.open);
        self.save.set_label(&view.toolbar.save);
        self.save_as.set_label(&view.toolbar.save_as);
        self.language_label.set_label(&view.toolbar.language);
        self.about.set_label(&view.toolbar.about);

        if self.language.size() != view.languages.len() as i32 {
            self.language.clear();
            for label in &view.languages {
                self.language.add_choice(label);
            }
        }
        // set_value does not fire the callback, so no SetLanguage loop
        if self.language.value() != view.selected_language as i32 {
            self.language.set_value(view.selected_language as i32);
        }

        *self.chip_state.borrow_mut() = Some(view.file_chip.clone());
        self.chip.set_tooltip(view.file_chip.path.as_deref().unwrap_or(""));
        self.chip.redraw();
        self.flex.redraw();
    }
}

fn toolbar_button() -> Button {
    let mut button = Button::default();
    button.set_frame(FrameType::RFlatBox);
    button.set_down_frame(FrameType::RFlatBox);
    button.set_color(theme::pill_bg());
    button.set_label_size(13);
    button.set_label_color(theme::ink());
    button.clear_visible_focus();
    button
}

fn draw_file_chip(wid: &Widget, chip: &FileChip) {
    let (x, y, w, h) = (wid.x(), wid.y(), wid.w(), wid.h());

    draw::push_clip(x, y, w, h);
    draw::set_draw_color(theme::paper());
    draw::draw_rectf(x, y, w, h);
    draw::set_draw_color(theme::border());
    draw::draw_rect(x, y, w, h);

    let dot_color = if chip.dirty { theme::dirty_dot() } else { theme::saved_dot() };
    draw::set_draw_color(dot_color);
    draw::draw_pie(x + CHIP_PADDING, y + (h - DOT_SIZE) / 2, DOT_SIZE, DOT_SIZE, 0.0, 360.0);

    let mut text_x = x + CHIP_PADDING + DOT_SIZE + 8;
    let mut segment = |text: &str, font: Font, color| {
        draw::set_font(font, 12);
        draw::set_draw_color(color);
        let (tw, _) = draw::measure(text, false);
        draw::draw_text2(text, text_x, y, tw, h, Align::Left | Align::Inside);
        text_x += tw + 10;
    };

    segment(&chip.title, Font::HelveticaBold, theme::ink());
    segment(&chip.status, Font::Helvetica, theme::muted_ink());
    if let Some(path) = &chip.path {
        segment(path, Font::Courier, theme::muted_ink());
    }
    draw::pop_clip();
}
