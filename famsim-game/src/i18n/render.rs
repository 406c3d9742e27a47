use crate::i18n::bundle::with_bundle;
use serde_json::Value;
use std::collections::BTreeMap;

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    let mut current = obj;
    for k in key.split('.') {
        current = current.get(k)?;
    }
    Some(current)
}

fn render_value(value: &Value, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let mut text = value.as_str()?.to_string();

    if let Some(args_map) = args {
        for (k, v) in args_map {
            let ph1 = format!("{{{{{k}}}}}");
            let ph2 = format!("{{{k}}}");
            text = text.replace(&ph1, v);
            text = text.replace(&ph2, v);
        }
    }
    Some(text)
}

fn resolve(key: &str, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    with_bundle(|bundle| {
        get_nested_value(&bundle.translations, key)
            .and_then(|v| render_value(v, args))
            .or_else(|| get_nested_value(&bundle.fallback, key).and_then(|v| render_value(v, args)))
    })
}

/// Translate a key to the current language
///
/// Falls back to the base locale, then to the key itself.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate a key with variable substitution
///
/// Variables in the translated string use the format {key} or {{key}}.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    resolve(key, args).unwrap_or_else(|| key.to_string())
}

/// Shorthand for [`tr`] with inline pairs.
#[must_use]
pub fn tr_pairs(key: &str, pairs: &[(&str, &str)]) -> String {
    let args: BTreeMap<&str, &str> = pairs.iter().copied().collect();
    tr(key, Some(&args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolation_handles_braced_forms() {
        let value = Value::String("你好，{name}！{{name}}！".into());
        let mut args = BTreeMap::new();
        args.insert("name", "张伟");
        let resolved = render_value(&value, Some(&args)).unwrap();
        assert_eq!(resolved, "你好，张伟！张伟！");
    }

    #[test]
    fn missing_key_echoes_key() {
        assert_eq!(t("no.such.key"), "no.such.key");
        assert_eq!(t("common.ok"), "确定");
        assert_eq!(tr_pairs("header.day", &[("day", "7")]), "第7天");
    }
}
