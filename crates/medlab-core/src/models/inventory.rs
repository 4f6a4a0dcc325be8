//! Inventory models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::labels::{label_enum, Tone};
use super::record::{Checks, EntityKind, FieldError, FieldValue, Record};

/// Stock at or below `MEDIUM_STOCK_FACTOR * min_stock` (and above the
/// minimum) is reported as medium.
pub const MEDIUM_STOCK_FACTOR: f64 = 1.5;

label_enum! {
    /// Derived stock level.
    pub enum StockStatus {
        Low => "Low",
        Medium => "Medium",
        Good => "Good",
    }
}

impl StockStatus {
    /// Classify a stock level against its minimum.
    pub fn classify(current: u32, min: u32) -> Self {
        if current <= min {
            StockStatus::Low
        } else if f64::from(current) <= f64::from(min) * MEDIUM_STOCK_FACTOR {
            StockStatus::Medium
        } else {
            StockStatus::Good
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            StockStatus::Low => Tone::Danger,
            StockStatus::Medium => Tone::Warning,
            StockStatus::Good => Tone::Success,
        }
    }
}

/// A consumable, reagent or piece of equipment held in stock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Item id (e.g. "INV001")
    pub id: String,
    pub name: String,
    /// "Consumables", "Reagents", "Equipment", ...
    pub category: String,
    /// Units on hand
    pub current_stock: u32,
    /// Reorder threshold
    pub min_stock: u32,
    /// Storage capacity
    pub max_stock: u32,
    /// Price per unit
    pub unit_price: f64,
    pub supplier: String,
    /// Date the stock count was last changed
    pub last_updated: NaiveDate,
}

impl InventoryItem {
    pub fn new(id: String, name: String, category: String, min_stock: u32, max_stock: u32) -> Self {
        Self {
            id,
            name,
            category,
            current_stock: 0,
            min_stock,
            max_stock,
            unit_price: 0.0,
            supplier: String::new(),
            last_updated: chrono::Utc::now().date_naive(),
        }
    }

    pub fn stock_status(&self) -> StockStatus {
        StockStatus::classify(self.current_stock, self.min_stock)
    }

    /// Needs reordering (same threshold as the Low status).
    pub fn is_low(&self) -> bool {
        self.stock_status() == StockStatus::Low
    }

    /// Value of the units on hand.
    pub fn stock_value(&self) -> f64 {
        f64::from(self.current_stock) * self.unit_price
    }
}

impl Record for InventoryItem {
    const KIND: EntityKind = EntityKind::InventoryItem;
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "category",
        "currentStock",
        "minStock",
        "maxStock",
        "unitPrice",
        "supplier",
        "lastUpdated",
        "stockStatus",
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "category", "supplier"];

    fn id(&self) -> &str {
        &self.id
    }

    fn status_tone(&self) -> Tone {
        self.stock_status().tone()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => FieldValue::text(&self.id),
            "name" => FieldValue::text(&self.name),
            "category" => FieldValue::text(&self.category),
            "currentStock" => self.current_stock.into(),
            "minStock" => self.min_stock.into(),
            "maxStock" => self.max_stock.into(),
            "unitPrice" => self.unit_price.into(),
            "supplier" => FieldValue::text(&self.supplier),
            "lastUpdated" => self.last_updated.into(),
            "stockStatus" => FieldValue::label(self.stock_status()),
            _ => return None,
        })
    }

    fn field_errors(&self) -> Vec<FieldError> {
        Checks::new()
            .require("id", &self.id)
            .require("name", &self.name)
            .require("category", &self.category)
            .ensure(
                self.min_stock <= self.max_stock,
                "minStock",
                "must not exceed the maximum stock",
            )
            .non_negative("unitPrice", self.unit_price)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(current: u32, min: u32) -> InventoryItem {
        let mut item = InventoryItem::new(
            "INV002".into(),
            "Reagent Kit - CBC".into(),
            "Reagents".into(),
            min,
            100,
        );
        item.current_stock = current;
        item.unit_price = 1250.0;
        item
    }

    #[test]
    fn test_low_when_at_or_below_minimum() {
        assert_eq!(item(25, 30).stock_status(), StockStatus::Low);
        assert_eq!(item(30, 30).stock_status(), StockStatus::Low);
    }

    #[test]
    fn test_medium_up_to_one_and_a_half_minimum() {
        assert_eq!(item(31, 30).stock_status(), StockStatus::Medium);
        assert_eq!(item(45, 30).stock_status(), StockStatus::Medium);
        assert_eq!(item(46, 30).stock_status(), StockStatus::Good);
    }

    #[test]
    fn test_stock_value() {
        let item = item(25, 30);
        assert_eq!(item.stock_value(), 31250.0);
        assert!(item.is_low());
    }

    #[test]
    fn test_min_above_max_rejected() {
        let mut item = item(10, 30);
        item.max_stock = 20;
        let err = item.validate().unwrap_err();
        assert_eq!(err.errors[0].field, "minStock");
    }
}
