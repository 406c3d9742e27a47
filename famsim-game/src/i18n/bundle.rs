use crate::i18n::locales::{BASE_LANG, load_translations};
use serde_json::Value;
use std::cell::RefCell;

pub struct I18nBundle {
    pub lang: String,
    pub translations: Value,
    pub fallback: Value,
}

fn build_bundle(lang: &str) -> Option<I18nBundle> {
    let fallback = load_translations(BASE_LANG)?;
    let translations = load_translations(lang)?;

    Some(I18nBundle {
        lang: lang.to_string(),
        translations,
        fallback,
    })
}

fn fallback_bundle() -> I18nBundle {
    let fallback = load_translations(BASE_LANG).unwrap_or(Value::Object(serde_json::Map::new()));

    I18nBundle {
        lang: BASE_LANG.to_string(),
        translations: fallback.clone(),
        fallback,
    }
}

// One bundle per thread; the terminal front end drives everything from a
// single-threaded runtime.
thread_local! {
    pub(super) static CURRENT: RefCell<I18nBundle> = RefCell::new(
        build_bundle(BASE_LANG).unwrap_or_else(fallback_bundle)
    );
}

pub(super) fn with_bundle<R>(f: impl FnOnce(&I18nBundle) -> R) -> R {
    CURRENT.with(|cell| f(&cell.borrow()))
}

fn replace_bundle(bundle: I18nBundle) {
    CURRENT.with(|cell| cell.replace(bundle));
}

/// Switch the active language.
///
/// Returns `false` and keeps the current bundle when the code is unknown.
pub fn set_lang(lang: &str) -> bool {
    match build_bundle(lang) {
        Some(bundle) => {
            log::debug!("switching locale to {lang}");
            replace_bundle(bundle);
            true
        }
        None => {
            log::warn!("unsupported locale '{lang}', keeping {}", current_lang());
            false
        }
    }
}

/// Get the current active language code
#[must_use]
pub fn current_lang() -> String {
    with_bundle(|bundle| bundle.lang.clone())
}
