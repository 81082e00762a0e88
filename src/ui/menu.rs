use fltk::{
    app::Sender,
    enums::{Key, Shortcut},
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::domain::messages::Message;
use crate::app::services::i18n::{Localizer, keys};

/// Menu paths treat `/` as a submenu separator and `&` as a mnemonic marker.
fn item(menu: &str, label: &str) -> String {
    format!("{}/{}", menu, label.replace('/', "\\/").replace('&', "&&"))
}

/// (Re)build the localized menu bar. Call again after a language change.
pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>, i18n: &Localizer) {
    menu.clear();
    let s = *sender;
    let fl = MenuFlag::Normal;
    let file = i18n.t(keys::FILE_MENU);
    let help = i18n.t(keys::HELP_MENU);

    // File
    menu.add_emit(&item(file, i18n.t(keys::NEW_TAB)), Shortcut::Ctrl | 't', fl, s, Message::TabNew);
    menu.add_emit(&format!("{}...", item(file, i18n.t(keys::OPEN))), Shortcut::Ctrl | 'o', fl, s, Message::FileOpen);
    menu.add_emit(&item(file, i18n.t(keys::SAVE)), Shortcut::Ctrl | 's', fl, s, Message::FileSave);
    menu.add_emit(
        &format!("{}...", item(file, i18n.t(keys::SAVE_AS))),
        Shortcut::Ctrl | Shortcut::Shift | 's',
        MenuFlag::MenuDivider,
        s,
        Message::FileSaveAs,
    );
    menu.add_emit(&item(file, i18n.t(keys::CLOSE_TAB)), Shortcut::Ctrl | 'w', fl, s, Message::TabCloseActive);
    menu.add_emit(&item(file, i18n.t(keys::NEXT_TAB)), Shortcut::Ctrl | Key::Tab, fl, s, Message::TabNext);
    menu.add_emit(
        &item(file, i18n.t(keys::PREVIOUS_TAB)),
        Shortcut::Ctrl | Shortcut::Shift | Key::Tab,
        MenuFlag::MenuDivider,
        s,
        Message::TabPrevious,
    );
    menu.add_emit(&item(file, i18n.t(keys::QUIT)), Shortcut::Ctrl | 'q', fl, s, Message::Quit);

    // Help
    menu.add_emit(&format!("{}...", item(help, i18n.t(keys::ABOUT))), Shortcut::None, fl, s, Message::ShowAbout);

    menu.redraw();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_escapes_path_characters() {
        assert_eq!(item("File", "Save as"), "File/Save as");
        assert_eq!(item("File", "Open/Close"), "File/Open\\/Close");
        assert_eq!(item("Help", "Q&A"), "Help/Q&&A");
    }
}
