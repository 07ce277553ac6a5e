//! Bundled string tables.

use std::collections::HashMap;

use tracing::warn;

use super::config::Language;
use crate::domain::ports::LocaleProvider;

const EN: &str = include_str!("../../locales/en.toml");
const RU: &str = include_str!("../../locales/ru.toml");

/// String table for one language with English fallback.
#[derive(Debug, Clone)]
pub struct Locale {
    language: Language,
    strings: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Locale {
    /// Loads the bundled table for `language`.
    #[must_use]
    pub fn load(language: Language) -> Self {
        let fallback = parse_table(EN);
        let strings = match language {
            Language::En => HashMap::new(),
            Language::Ru => parse_table(RU),
        };

        Self {
            language,
            strings,
            fallback,
        }
    }

    /// Returns the active language.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }
}

impl LocaleProvider for Locale {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.strings
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map(String::as_str)
    }
}

/// Parses a TOML table into dotted keys (`[danger.alerts] title` → `danger.alerts.title`).
fn parse_table(source: &str) -> HashMap<String, String> {
    let mut out = HashMap::new();
    match toml::from_str::<toml::Table>(source) {
        Ok(table) => flatten(&table, "", &mut out),
        Err(e) => warn!(error = %e, "Failed to parse locale table"),
    }
    out
}

fn flatten(table: &toml::Table, prefix: &str, out: &mut HashMap<String, String>) {
    for (key, value) in table {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::String(text) => {
                out.insert(path, text.clone());
            }
            toml::Value::Table(inner) => flatten(inner, &path, out),
            _ => {}
        }
    }
}
