use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocaleMeta {
    pub code: &'static str,
    pub name: &'static str,
}

/// Base locale; every key must exist here.
pub const BASE_LANG: &str = "zh";

pub const LOCALE_META: &[LocaleMeta] = &[
    LocaleMeta {
        code: "zh",
        name: "中文",
    },
    LocaleMeta {
        code: "en",
        name: "English",
    },
];

const LOCALE_TABLE: &[(&str, &str)] = &[
    ("zh", include_str!("../../i18n/zh.json")),
    ("en", include_str!("../../i18n/en.json")),
];

/// Supported locales with their native names.
#[must_use]
pub const fn locales() -> &'static [LocaleMeta] {
    LOCALE_META
}

#[must_use]
pub fn is_supported(lang: &str) -> bool {
    LOCALE_META.iter().any(|m| m.code == lang)
}

pub(super) fn load_translations(lang: &str) -> Option<Value> {
    let bundle = LOCALE_TABLE
        .iter()
        .find_map(|(code, data)| (*code == lang).then_some(*data))?;

    serde_json::from_str(bundle).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_locale_loads() {
        for meta in locales() {
            let value = load_translations(meta.code).expect("locale parses");
            assert!(value.is_object(), "{} should be an object", meta.code);
        }
        assert!(load_translations("tlh").is_none());
        assert!(is_supported("en"));
        assert!(!is_supported("fr"));
    }
}
