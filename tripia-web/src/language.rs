use std::collections::HashMap;

use tripia_shared::{Language, LanguageRegistry};

use crate::storage::BrowserStorage;

/// Information about a supported language
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LanguageInfo {
    pub language: Language,
    pub code: &'static str,
    pub flag: &'static str,
    pub translation: &'static str,
    pub native_name: &'static str,
}

fn flag(language: Language) -> &'static str {
    match language {
        Language::PtBr => "🇧🇷",
        Language::En => "🇺🇸",
    }
}

fn translation(language: Language) -> &'static str {
    match language {
        Language::PtBr => include_str!("../translations/pt-BR.json"),
        Language::En => include_str!("../translations/en.json"),
    }
}

/// Supported languages in display order.
pub fn supported_languages() -> Vec<LanguageInfo> {
    LanguageRegistry::<BrowserStorage>::list_supported()
        .into_iter()
        .map(|option| LanguageInfo {
            language: option.language,
            code: option.code,
            flag: flag(option.language),
            translation: translation(option.language),
            native_name: option.label,
        })
        .collect()
}

/// Translation tables keyed by locale code, as the i18n provider expects.
pub fn translations() -> HashMap<&'static str, &'static str> {
    supported_languages()
        .into_iter()
        .map(|info| (info.code, info.translation))
        .collect()
}

/// Language registry over the browser's local storage.
pub fn registry() -> LanguageRegistry<BrowserStorage> {
    LanguageRegistry::new(BrowserStorage::open())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn lookup<'a>(table: &'a Value, path: &str) -> Option<&'a Value> {
        path.split('.').try_fold(table, |node, key| node.get(key))
    }

    #[test]
    fn brazilian_portuguese_is_listed_first() {
        let languages = supported_languages();
        assert_eq!(languages[0].code, "pt-BR");
        assert_eq!(languages[1].code, "en");
        assert_eq!(languages[1].native_name, "English");
        assert_eq!(languages.len(), 2);
    }

    #[test]
    fn every_table_has_the_same_keys() {
        fn leaves(value: &Value, prefix: &str, out: &mut Vec<String>) {
            if let Value::Object(map) = value {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    leaves(child, &path, out);
                }
            } else {
                out.push(prefix.to_string());
            }
        }

        let tables: Vec<Value> = supported_languages()
            .iter()
            .map(|info| serde_json::from_str(info.translation).unwrap())
            .collect();
        let mut reference = Vec::new();
        leaves(&tables[0], "", &mut reference);
        for table in &tables[1..] {
            for key in &reference {
                assert!(lookup(table, key).is_some(), "missing {key}");
            }
        }
    }

    #[test]
    fn translation_map_covers_every_language() {
        let map = translations();
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("pt-BR"));
    }
}
