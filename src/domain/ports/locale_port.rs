//! Locale provider port definition.

/// Supplies display strings by key.
pub trait LocaleProvider: Send + Sync {
    /// Returns the string for `key`, if the active language has one.
    fn lookup(&self, key: &str) -> Option<&str>;

    /// Returns the string for `key`, or `default` when missing.
    fn text<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.lookup(key).unwrap_or(default)
    }
}

/// Provider without any translations; every lookup falls back to defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStrings;

impl LocaleProvider for DefaultStrings {
    fn lookup(&self, _key: &str) -> Option<&str> {
        None
    }
}
