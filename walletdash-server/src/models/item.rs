//! Wallet item as presented to the dashboard

use serde::Serialize;

use super::binary::{best_effort_text, to_hex};
use super::ItemKind;

/// A wallet item with binary columns rendered for display
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Item {
    pub id: i64,
    pub kind: ItemKind,
    pub kind_code: i64,
    pub profile_id: i64,
    /// Hex-encoded category
    pub category: String,
    pub name: String,
    pub value: String,
}

impl Item {
    /// Render raw column values.
    pub fn render(
        id: i64,
        kind_code: i64,
        profile_id: i64,
        category: &[u8],
        name: &[u8],
        value: &[u8],
    ) -> Self {
        let kind = ItemKind::from_code(kind_code);
        Self {
            id,
            kind,
            kind_code: kind.code(),
            profile_id,
            category: to_hex(category),
            name: best_effort_text(name),
            value: best_effort_text(value),
        }
    }
}
