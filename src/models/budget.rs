use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Category;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub category_id: String,
    /// Monthly cap.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    /// Derived from transactions when displayed; never authoritative.
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub spent: Decimal,
}

impl Budget {
    pub fn new(category_id: String, amount: Decimal) -> Self {
        Self {
            category_id,
            amount,
            spent: Decimal::ZERO,
        }
    }

    pub fn category(&self) -> Option<&'static Category> {
        Category::lookup_by_id(&self.category_id)
    }
}
