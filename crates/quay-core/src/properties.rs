//! `key=value` metadata record parser.
//!
//! Installed packages describe themselves through a small properties file
//! (`name=Arduino AVR Boards`, `version=1.6.3`). Entry order is preserved
//! so a rewrite keeps the record diffable. Blank lines and `#` comments are
//! skipped on parse and dropped on write.

/// An ordered set of `key=value` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a properties record.
    ///
    /// Lines without `=` are ignored; the value is everything after the
    /// first `=`, so values may themselves contain `=`.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut entries = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                entries.push((key.trim().to_string(), value.trim().to_string()));
            }
        }
        Self { entries }
    }

    /// Get the first value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key` to `value`, replacing the first existing entry in place or
    /// appending when absent.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render back to record form, one `key=value` line per entry.
    #[must_use]
    pub fn to_record(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let props = Properties::parse("name=USBHost\nversion=1.0.0\n");
        assert_eq!(props.get("name"), Some("USBHost"));
        assert_eq!(props.get("version"), Some("1.0.0"));
        assert_eq!(props.get("missing"), None);
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let props = Properties::parse("# header\n\nname=WiFi101\n  \nversion=0.15.3\n");
        assert_eq!(props.get("name"), Some("WiFi101"));
        assert_eq!(props.get("version"), Some("0.15.3"));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let props = Properties::parse("sentence=a=b=c\n");
        assert_eq!(props.get("sentence"), Some("a=b=c"));
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut props = Properties::parse("name=WiFi101\nversion=1.0001\nauthor=x\n");
        props.set("version", "0.16.0");
        assert_eq!(
            props.to_record(),
            "name=WiFi101\nversion=0.16.0\nauthor=x\n"
        );
    }

    #[test]
    fn test_set_appends_when_absent() {
        let mut props = Properties::new();
        props.set("version", "1.0.0");
        assert_eq!(props.to_record(), "version=1.0.0\n");
    }

    #[test]
    fn test_lines_without_equals_ignored() {
        let props = Properties::parse("garbage line\nversion=1.0.0\n");
        assert_eq!(props.get("version"), Some("1.0.0"));
        assert_eq!(props.get("garbage line"), None);
    }
}
