//! Display strings and locale resolution.
//!
//! The session never renders text itself; the widget asks a
//! [`LocaleProvider`] for a [`Strings`] bundle once at construction and
//! formats status lines through it. Lookup failures degrade through the
//! default locale down to empty text, so something always renders.

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Locale tried when the requested one is unavailable.
pub const DEFAULT_LOCALE: &str = "en";

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("locale '{0}' not found")]
    NotFound(String),
    #[error("locale '{id}' is not valid JSON: {source}")]
    Invalid {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Display text for one locale. Missing keys deserialize to empty strings;
/// the text direction defaults to left-to-right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Strings {
    pub title: String,
    pub start: String,
    pub check: String,
    pub restart: String,
    pub attempts_left: String,
    /// Template with a `{seconds}` placeholder, used for both the count-up
    /// and the countdown display.
    pub time: String,
    pub win_message: String,
    pub game_over_message: String,
    /// Template with `{correct}` and `{total}` placeholders.
    pub correct_count_message: String,
    /// `ltr` or `rtl`.
    pub dir: String,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            title: String::new(),
            start: String::new(),
            check: String::new(),
            restart: String::new(),
            attempts_left: String::new(),
            time: String::new(),
            win_message: String::new(),
            game_over_message: String::new(),
            correct_count_message: String::new(),
            dir: "ltr".to_string(),
        }
    }
}

impl Strings {
    pub fn time_text(&self, seconds: u32) -> String {
        self.time.replace("{seconds}", &seconds.to_string())
    }

    pub fn attempts_text(&self, left: u32) -> String {
        format!("{}: {}", self.attempts_left, left)
    }

    pub fn correct_count_text(&self, correct: usize, total: usize) -> String {
        self.correct_count_message
            .replace("{correct}", &correct.to_string())
            .replace("{total}", &total.to_string())
    }
}

/// Injected capability for looking up display strings by locale id.
pub trait LocaleProvider {
    fn fetch_locale(&self, id: &str) -> Result<Strings, LocaleError>;
}

/// Locales compiled into the binary from `lang/*.json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledLocales;

impl BundledLocales {
    fn raw(id: &str) -> Option<&'static str> {
        match id {
            "en" => Some(include_str!("../../lang/en.json")),
            "fa" => Some(include_str!("../../lang/fa.json")),
            _ => None,
        }
    }
}

impl LocaleProvider for BundledLocales {
    fn fetch_locale(&self, id: &str) -> Result<Strings, LocaleError> {
        let raw = Self::raw(id).ok_or_else(|| LocaleError::NotFound(id.to_string()))?;
        serde_json::from_str(raw).map_err(|source| LocaleError::Invalid {
            id: id.to_string(),
            source,
        })
    }
}

/// Resolve display strings: the requested locale, then the default, then
/// empty text. Never fails.
pub fn resolve(provider: &impl LocaleProvider, requested: Option<&str>) -> Strings {
    if let Some(id) = requested {
        match provider.fetch_locale(id) {
            Ok(strings) => return strings,
            Err(err) => warn!("{err}, falling back to '{DEFAULT_LOCALE}'"),
        }
    }
    match provider.fetch_locale(DEFAULT_LOCALE) {
        Ok(strings) => strings,
        Err(err) => {
            warn!("{err}, rendering empty text");
            Strings::default()
        }
    }
}
