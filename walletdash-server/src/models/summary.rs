//! Aggregates recomputed on every request

use serde::Serialize;

use super::binary::{printable_label, to_hex};
use super::ItemKind;

/// Item count for one kind code
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KindSummary {
    pub kind: ItemKind,
    pub kind_code: i64,
    pub count: i64,
}

impl KindSummary {
    pub fn new(kind_code: i64, count: i64) -> Self {
        Self {
            kind: ItemKind::from_code(kind_code),
            kind_code,
            count,
        }
    }
}

/// Item count for one (category, name, kind) group
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategorySummary {
    /// Hex-encoded category
    pub category: String,
    /// Printable text extracted from the item name, or `Unknown`
    pub credential_type: String,
    pub count: i64,
    pub kind: ItemKind,
    pub item_ids: Vec<i64>,
}

impl CategorySummary {
    pub fn new(category: &[u8], name: &[u8], kind_code: i64, count: i64, item_ids: Vec<i64>) -> Self {
        Self {
            category: to_hex(category),
            credential_type: printable_label(name),
            count,
            kind: ItemKind::from_code(kind_code),
            item_ids,
        }
    }
}

/// Total across kind summaries.
pub fn total_count(summaries: &[KindSummary]) -> i64 {
    summaries.iter().map(|s| s.count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_with_unprintable_name_is_unknown() {
        let summary = CategorySummary::new(&[0x01], &[0x00, 0x02, 0x7f], 2, 4, vec![1, 2, 3, 4]);
        assert_eq!(summary.credential_type, "Unknown");
        assert_eq!(summary.category, "01");
        assert_eq!(summary.kind, ItemKind::Credential);
    }

    #[test]
    fn category_json_shape() {
        let summary = CategorySummary::new(b"cred", b"\x00drivers_license", 2, 1, vec![9]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["category"], "63726564");
        assert_eq!(json["credential_type"], "drivers_license");
        assert_eq!(json["kind"], "Credential");
        assert_eq!(json["item_ids"], serde_json::json!([9]));
    }

    #[test]
    fn totals_add_up() {
        let rows = vec![KindSummary::new(1, 3), KindSummary::new(2, 5), KindSummary::new(9, 1)];
        assert_eq!(total_count(&rows), 9);
        assert_eq!(rows[2].kind.label(), "Type 9");
    }
}
