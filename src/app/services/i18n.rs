//! UI string tables for the four supported languages.
//!
//! Lookup never fails: a key missing from the active language falls back to
//! English, and a key missing everywhere is returned as-is.

use serde::{Deserialize, Serialize};

/// String keys used by the shell.
pub mod keys {
    pub const APP_TITLE: &str = "appTitle";
    pub const FILE_SAVED: &str = "fileSaved";
    pub const FILE_DIRTY: &str = "fileDirty";
    pub const UNTITLED: &str = "untitled";
    pub const PROJECT: &str = "project";
    pub const VERSION: &str = "version";
    pub const DEFAULT_FILE_NAME: &str = "defaultFileName";
    pub const NEW_TAB: &str = "newTab";
    pub const OPEN: &str = "open";
    pub const SAVE: &str = "save";
    pub const SAVE_AS: &str = "saveAs";
    pub const LANGUAGE: &str = "language";
    pub const OPEN_PROJECT_TITLE: &str = "openProjectTitle";
    pub const SAVE_PROJECT_TITLE: &str = "saveProjectTitle";
    pub const OPEN_ERROR: &str = "openError";
    pub const SAVE_ERROR: &str = "saveError";
    pub const ABOUT: &str = "about";
    pub const ABOUT_TITLE: &str = "aboutTitle";
    pub const VERSION_LABEL: &str = "versionLabel";
    pub const BUILD_LABEL: &str = "buildLabel";
    pub const CLOSE: &str = "close";
    pub const FILE_MENU: &str = "fileMenu";
    pub const HELP_MENU: &str = "helpMenu";
    pub const CLOSE_TAB: &str = "closeTab";
    pub const NEXT_TAB: &str = "nextTab";
    pub const PREVIOUS_TAB: &str = "previousTab";
    pub const QUIT: &str = "quit";
}

pub const FILE_EXTENSION: &str = "excalidraw";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lang {
    PtBr,
    En,
    EsEs,
    FrFr,
}

impl Lang {
    pub const ALL: [Lang; 4] = [Lang::PtBr, Lang::En, Lang::EsEs, Lang::FrFr];

    /// Language used when nothing was stored yet.
    pub const DEFAULT: Lang = Lang::PtBr;

    /// Language consulted when the active one lacks a key.
    pub const FALLBACK: Lang = Lang::En;

    pub fn code(self) -> &'static str {
        match self {
            Lang::PtBr => "pt-BR",
            Lang::En => "en",
            Lang::EsEs => "es-ES",
            Lang::FrFr => "fr-FR",
        }
    }

    /// Name of the language in that language, for the selector.
    pub fn label(self) -> &'static str {
        match self {
            Lang::PtBr => "Português (Brasil)",
            Lang::En => "English",
            Lang::EsEs => "Español",
            Lang::FrFr => "Français",
        }
    }

    pub fn from_code(code: &str) -> Option<Lang> {
        Lang::ALL.into_iter().find(|lang| lang.code() == code)
    }

    pub fn index(self) -> usize {
        Lang::ALL.iter().position(|l| *l == self).unwrap_or(0)
    }
}

/// Map a stored or user-supplied language code onto a supported language.
///
/// Short codes expand to their regional variant (`pt` → `pt-BR`).
pub fn normalize_lang_code(code: &str) -> Option<Lang> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    if let Some(lang) = Lang::from_code(code) {
        return Some(lang);
    }
    match code {
        "es" => Some(Lang::EsEs),
        "fr" => Some(Lang::FrFr),
        "pt" => Some(Lang::PtBr),
        _ => None,
    }
}

type Table = &'static [(&'static str, &'static str)];

const PT_BR: Table = &[
    (keys::APP_TITLE, "Excalidraw Desktop"),
    (keys::FILE_SAVED, "Salvo"),
    (keys::FILE_DIRTY, "Nao salvo"),
    (keys::UNTITLED, "Sem titulo"),
    (keys::PROJECT, "Projeto"),
    (keys::VERSION, "Versao"),
    (keys::DEFAULT_FILE_NAME, "projeto"),
    (keys::NEW_TAB, "Nova aba"),
    (keys::OPEN, "Abrir"),
    (keys::SAVE, "Salvar"),
    (keys::SAVE_AS, "Salvar como"),
    (keys::LANGUAGE, "Idioma"),
    (keys::OPEN_PROJECT_TITLE, "Abrir projeto"),
    (keys::SAVE_PROJECT_TITLE, "Salvar projeto"),
    (keys::OPEN_ERROR, "Nao foi possivel abrir este arquivo. Verifique se e um .excalidraw valido."),
    (keys::SAVE_ERROR, "Nao foi possivel salvar este arquivo. Suas alteracoes continuam abertas."),
    (keys::ABOUT, "Sobre"),
    (keys::ABOUT_TITLE, "Sobre o app"),
    (keys::VERSION_LABEL, "Versao"),
    (keys::BUILD_LABEL, "Build"),
    (keys::CLOSE, "Fechar"),
    (keys::FILE_MENU, "Arquivo"),
    (keys::HELP_MENU, "Ajuda"),
    (keys::CLOSE_TAB, "Fechar aba"),
    (keys::NEXT_TAB, "Proxima aba"),
    (keys::PREVIOUS_TAB, "Aba anterior"),
    (keys::QUIT, "Sair"),
];

const EN: Table = &[
    (keys::APP_TITLE, "Excalidraw Desktop"),
    (keys::FILE_SAVED, "Saved"),
    (keys::FILE_DIRTY, "Unsaved"),
    (keys::UNTITLED, "Untitled"),
    (keys::PROJECT, "Project"),
    (keys::VERSION, "Version"),
    (keys::DEFAULT_FILE_NAME, "project"),
    (keys::NEW_TAB, "New tab"),
    (keys::OPEN, "Open"),
    (keys::SAVE, "Save"),
    (keys::SAVE_AS, "Save as"),
    (keys::LANGUAGE, "Language"),
    (keys::OPEN_PROJECT_TITLE, "Open project"),
    (keys::SAVE_PROJECT_TITLE, "Save project"),
    (keys::OPEN_ERROR, "Could not open this file. Please verify it is a valid .excalidraw file."),
    (keys::SAVE_ERROR, "Could not save this file. Your changes are still open."),
    (keys::ABOUT, "About"),
    (keys::ABOUT_TITLE, "About this app"),
    (keys::VERSION_LABEL, "Version"),
    (keys::BUILD_LABEL, "Build"),
    (keys::CLOSE, "Close"),
    (keys::FILE_MENU, "File"),
    (keys::HELP_MENU, "Help"),
    (keys::CLOSE_TAB, "Close tab"),
    (keys::NEXT_TAB, "Next tab"),
    (keys::PREVIOUS_TAB, "Previous tab"),
    (keys::QUIT, "Quit"),
];

const ES_ES: Table = &[
    (keys::APP_TITLE, "Excalidraw Desktop"),
    (keys::FILE_SAVED, "Guardado"),
    (keys::FILE_DIRTY, "No guardado"),
    (keys::UNTITLED, "Sin titulo"),
    (keys::PROJECT, "Proyecto"),
    (keys::VERSION, "Version"),
    (keys::DEFAULT_FILE_NAME, "proyecto"),
    (keys::NEW_TAB, "Nueva pestaña"),
    (keys::OPEN, "Abrir"),
    (keys::SAVE, "Guardar"),
    (keys::SAVE_AS, "Guardar como"),
    (keys::LANGUAGE, "Idioma"),
    (keys::OPEN_PROJECT_TITLE, "Abrir proyecto"),
    (keys::SAVE_PROJECT_TITLE, "Guardar proyecto"),
    (keys::OPEN_ERROR, "No se pudo abrir este archivo. Verifica que sea un .excalidraw valido."),
    (keys::SAVE_ERROR, "No se pudo guardar este archivo. Tus cambios siguen abiertos."),
    (keys::ABOUT, "Acerca de"),
    (keys::ABOUT_TITLE, "Acerca de la app"),
    (keys::VERSION_LABEL, "Version"),
    (keys::BUILD_LABEL, "Build"),
    (keys::CLOSE, "Cerrar"),
    (keys::FILE_MENU, "Archivo"),
    (keys::HELP_MENU, "Ayuda"),
    (keys::CLOSE_TAB, "Cerrar pestaña"),
    (keys::NEXT_TAB, "Pestaña siguiente"),
    (keys::PREVIOUS_TAB, "Pestaña anterior"),
    (keys::QUIT, "Salir"),
];

const FR_FR: Table = &[
    (keys::APP_TITLE, "Excalidraw Desktop"),
    (keys::FILE_SAVED, "Enregistre"),
    (keys::FILE_DIRTY, "Non enregistre"),
    (keys::UNTITLED, "Sans titre"),
    (keys::PROJECT, "Projet"),
    (keys::VERSION, "Version"),
    (keys::DEFAULT_FILE_NAME, "projet"),
    (keys::NEW_TAB, "Nouvel onglet"),
    (keys::OPEN, "Ouvrir"),
    (keys::SAVE, "Enregistrer"),
    (keys::SAVE_AS, "Enregistrer sous"),
    (keys::LANGUAGE, "Langue"),
    (keys::OPEN_PROJECT_TITLE, "Ouvrir le projet"),
    (keys::SAVE_PROJECT_TITLE, "Enregistrer le projet"),
    (keys::OPEN_ERROR, "Impossible d'ouvrir ce fichier. Verifiez qu'il s'agit d'un .excalidraw valide."),
    (keys::SAVE_ERROR, "Impossible d'enregistrer ce fichier. Vos modifications restent ouvertes."),
    (keys::ABOUT, "A propos"),
    (keys::ABOUT_TITLE, "A propos de l'app"),
    (keys::VERSION_LABEL, "Version"),
    (keys::BUILD_LABEL, "Build"),
    (keys::CLOSE, "Fermer"),
    (keys::FILE_MENU, "Fichier"),
    (keys::HELP_MENU, "Aide"),
    (keys::CLOSE_TAB, "Fermer l'onglet"),
    (keys::NEXT_TAB, "Onglet suivant"),
    (keys::PREVIOUS_TAB, "Onglet precedent"),
    (keys::QUIT, "Quitter"),
];

fn table(lang: Lang) -> Table {
    match lang {
        Lang::PtBr => PT_BR,
        Lang::En => EN,
        Lang::EsEs => ES_ES,
        Lang::FrFr => FR_FR,
    }
}

/// Exact lookup in one language's table.
pub fn lookup(lang: Lang, key: &str) -> Option<&'static str> {
    table(lang).iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Translates keys for the currently selected language.
#[derive(Debug, Clone)]
pub struct Localizer {
    lang: Lang,
}

impl Localizer {
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn set_lang(&mut self, lang: Lang) {
        self.lang = lang;
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        match lookup(self.lang, key).or_else(|| lookup(Lang::FALLBACK, key)) {
            Some(value) => value,
            None => key,
        }
    }

    /// Suggested file name for the save prompt, e.g. `projeto.excalidraw`.
    pub fn default_file_name(&self) -> String {
        format!("{}.{}", self.t(keys::DEFAULT_FILE_NAME), FILE_EXTENSION)
    }
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new(Lang::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_in_active_language() {
        let i18n = Localizer::new(Lang::FrFr);
        assert_eq!(i18n.t(keys::SAVE_AS), "Enregistrer sous");
        assert_eq!(i18n.t(keys::UNTITLED), "Sans titre");
    }

    #[test]
    fn test_unknown_key_returns_key() {
        for lang in Lang::ALL {
            let i18n = Localizer::new(lang);
            assert_eq!(i18n.t("no.such.key"), "no.such.key");
            assert_eq!(i18n.t(""), "");
        }
    }

    #[test]
    fn test_every_language_has_every_english_key() {
        for (key, _) in EN {
            for lang in Lang::ALL {
                assert!(lookup(lang, key).is_some(), "{} missing {}", lang.code(), key);
            }
        }
    }

    #[test]
    fn test_tables_have_the_same_size() {
        for lang in Lang::ALL {
            assert_eq!(table(lang).len(), EN.len(), "{}", lang.code());
        }
    }

    #[test]
    fn test_normalize_short_codes() {
        assert_eq!(normalize_lang_code("es"), Some(Lang::EsEs));
        assert_eq!(normalize_lang_code("fr"), Some(Lang::FrFr));
        assert_eq!(normalize_lang_code("pt"), Some(Lang::PtBr));
        assert_eq!(normalize_lang_code("en"), Some(Lang::En));
        assert_eq!(normalize_lang_code("pt-BR"), Some(Lang::PtBr));
        assert_eq!(normalize_lang_code(" fr-FR "), Some(Lang::FrFr));
    }

    #[test]
    fn test_normalize_unknown_codes() {
        assert_eq!(normalize_lang_code(""), None);
        assert_eq!(normalize_lang_code("de-DE"), None);
        assert_eq!(normalize_lang_code("PT"), None);
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(Localizer::new(Lang::PtBr).default_file_name(), "projeto.excalidraw");
        assert_eq!(Localizer::new(Lang::En).default_file_name(), "project.excalidraw");
        assert_eq!(Localizer::new(Lang::EsEs).default_file_name(), "proyecto.excalidraw");
    }

    #[test]
    fn test_code_roundtrip_and_index() {
        for (i, lang) in Lang::ALL.into_iter().enumerate() {
            assert_eq!(Lang::from_code(lang.code()), Some(lang));
            assert_eq!(lang.index(), i);
        }
    }

    #[test]
    fn test_set_lang_switches_table() {
        let mut i18n = Localizer::default();
        assert_eq!(i18n.t(keys::SAVE), "Salvar");
        i18n.set_lang(Lang::EsEs);
        assert_eq!(i18n.lang(), Lang::EsEs);
        assert_eq!(i18n.t(keys::SAVE), "Guardar");
    }
}
