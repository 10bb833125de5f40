//! Table names accepted by the raw table endpoint
//!
//! Two steps: characters outside `[A-Za-z0-9_]` are dropped silently, then
//! the result must be one of [`KNOWN_TABLES`]. Only a `TableName` is ever
//! interpolated into SQL.

/// Tables the raw dump endpoint may read
pub const KNOWN_TABLES: &[&str] = &["items", "items_tags", "profiles", "config"];

/// Default and maximum row limits for table dumps
pub const DEFAULT_TABLE_LIMIT: i64 = 100;
pub const MAX_TABLE_LIMIT: i64 = 1000;

/// A table name that passed sanitizing and the allow-list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(&'static str);

impl TableName {
    /// Drop every character outside `[A-Za-z0-9_]`.
    pub fn sanitize(raw: &str) -> String {
        raw.chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect()
    }

    /// Sanitize `raw` and look it up in [`KNOWN_TABLES`].
    ///
    /// Returns the sanitized name as the error when it is not a known table.
    pub fn resolve(raw: &str) -> Result<Self, String> {
        let sanitized = Self::sanitize(raw);
        KNOWN_TABLES
            .iter()
            .copied()
            .find(|known| *known == sanitized)
            .map(Self)
            .ok_or(sanitized)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Double-quoted identifier for SQL interpolation.
    pub fn quoted(&self) -> String {
        quote_ident(self.0)
    }
}

/// Quote an introspected identifier after stripping disallowed characters.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", TableName::sanitize(name))
}

/// Clamp a requested row limit into `1..=MAX_TABLE_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_TABLE_LIMIT).clamp(1, MAX_TABLE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injection_is_stripped() {
        assert_eq!(TableName::sanitize("items; DROP TABLE x"), "itemsDROPTABLEx");
        assert_eq!(TableName::sanitize("items_tags"), "items_tags");
        assert_eq!(TableName::sanitize("pro-files\""), "profiles");
    }

    #[test]
    fn stripped_injection_is_not_a_known_table() {
        let err = TableName::resolve("items; DROP TABLE x").unwrap_err();
        assert_eq!(err, "itemsDROPTABLEx");
    }

    #[test]
    fn known_tables_resolve() {
        assert_eq!(TableName::resolve("items").unwrap().as_str(), "items");
        assert_eq!(TableName::resolve("con fig").unwrap().as_str(), "config");
        assert_eq!(TableName::resolve("profiles").unwrap().quoted(), "\"profiles\"");
    }

    #[test]
    fn case_matters() {
        assert!(TableName::resolve("ITEMS").is_err());
    }

    #[test]
    fn limits_are_clamped() {
        assert_eq!(clamp_limit(None), DEFAULT_TABLE_LIMIT);
        assert_eq!(clamp_limit(Some(10)), 10);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-5)), 1);
        assert_eq!(clamp_limit(Some(50_000)), MAX_TABLE_LIMIT);
    }

    #[test]
    fn quoting_cannot_break_out() {
        assert_eq!(quote_ident("a\"; drop"), "\"adrop\"");
    }
}
