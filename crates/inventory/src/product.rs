use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chemtrack_core::{DomainError, Entity, ProductId, ValueObject};

use crate::draft::ProductFields;

/// Unit of measure for a tracked chemical.
///
/// The set is fixed; serialized spellings match the stored snapshot format
/// ("kg", "L", "g", "mL").
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "L")]
    Liter,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "mL")]
    Milliliter,
}

impl Unit {
    /// All units, in the order a picker would present them.
    pub const ALL: [Unit; 4] = [Unit::Kilogram, Unit::Liter, Unit::Gram, Unit::Milliliter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kilogram => "kg",
            Unit::Liter => "L",
            Unit::Gram => "g",
            Unit::Milliliter => "mL",
        }
    }
}

impl ValueObject for Unit {}

impl Default for Unit {
    fn default() -> Self {
        Unit::Kilogram
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = DomainError;

    /// Case-insensitive on the canonical spellings ("ml" and "mL" both parse).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" => Ok(Unit::Kilogram),
            "l" => Ok(Unit::Liter),
            "g" => Ok(Unit::Gram),
            "ml" => Ok(Unit::Milliliter),
            other => Err(DomainError::validation(format!("unknown unit: {other}"))),
        }
    }
}

/// A stock movement note attached to a product.
///
/// The shape is persisted for forward compatibility; nothing writes entries
/// yet, so the sequence stays empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLogEntry {
    pub at: DateTime<Utc>,
    pub note: String,
}

/// A tracked chemical product.
///
/// Field names in the serialized form are camelCase to stay compatible with
/// previously stored snapshots (`minStock`, `lastUpdated`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    stock: f64,
    unit: Unit,
    min_stock: f64,
    last_updated: DateTime<Utc>,
    logs: Vec<StockLogEntry>,
}

impl Product {
    /// Build a new product from validated fields.
    ///
    /// Callers are expected to have allocated `id` for uniqueness; see
    /// [`crate::collection::Inventory::allocate_id`].
    pub fn new(id: ProductId, fields: ProductFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            stock: fields.stock,
            unit: fields.unit,
            min_stock: fields.min_stock,
            last_updated: created_at,
            logs: Vec::new(),
        }
    }

    /// The identifier, by value (shadowing the [`Entity`] accessor).
    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stock(&self) -> f64 {
        self.stock
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn min_stock(&self) -> f64 {
        self.min_stock
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn logs(&self) -> &[StockLogEntry] {
        &self.logs
    }

    /// True when stock has fallen below the minimum threshold.
    pub fn is_below_min(&self) -> bool {
        self.stock < self.min_stock
    }

    /// Replace every mutable field and refresh `last_updated`.
    ///
    /// `id` and `logs` are deliberately untouched.
    pub(crate) fn apply_fields(&mut self, fields: &ProductFields, now: DateTime<Utc>) {
        self.name = fields.name.clone();
        self.stock = fields.stock;
        self.unit = fields.unit;
        self.min_stock = fields.min_stock;
        self.last_updated = now;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, stock: f64, unit: Unit, min_stock: f64) -> ProductFields {
        ProductFields {
            name: name.to_string(),
            stock,
            unit,
            min_stock,
        }
    }

    #[test]
    fn unit_parses_canonical_and_lowercase_spellings() {
        assert_eq!("kg".parse::<Unit>().unwrap(), Unit::Kilogram);
        assert_eq!("L".parse::<Unit>().unwrap(), Unit::Liter);
        assert_eq!("mL".parse::<Unit>().unwrap(), Unit::Milliliter);
        assert_eq!("ml".parse::<Unit>().unwrap(), Unit::Milliliter);
        assert_eq!(" g ".parse::<Unit>().unwrap(), Unit::Gram);

        let err = "oz".parse::<Unit>().unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn unit_display_round_trips_through_from_str() {
        for unit in Unit::ALL {
            assert_eq!(unit.to_string().parse::<Unit>().unwrap(), unit);
        }
    }

    #[test]
    fn serialized_form_uses_stored_snapshot_field_names() {
        let product = Product::new(
            ProductId::from_millis(1_700_000_000_000),
            fields("Sulfuric Acid", 50.0, Unit::Liter, 10.0),
            Utc::now(),
        );

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], 1_700_000_000_000_i64);
        assert_eq!(json["name"], "Sulfuric Acid");
        assert_eq!(json["unit"], "L");
        assert_eq!(json["minStock"], 10.0);
        assert!(json.get("lastUpdated").is_some());
        assert_eq!(json["logs"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn serde_round_trip_preserves_every_field() {
        let product = Product::new(
            ProductId::from_millis(42),
            fields("Acetone", 2.5, Unit::Milliliter, 0.5),
            Utc::now(),
        );

        let text = serde_json::to_string(&product).unwrap();
        let decoded: Product = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, product);
    }

    #[test]
    fn below_min_compares_stock_against_threshold() {
        let now = Utc::now();
        let low = Product::new(ProductId::from_millis(1), fields("A", 3.0, Unit::Gram, 5.0), now);
        let ok = Product::new(ProductId::from_millis(2), fields("B", 5.0, Unit::Gram, 5.0), now);

        assert!(low.is_below_min());
        assert!(!ok.is_below_min());
    }

    #[test]
    fn apply_fields_keeps_id_and_logs() {
        let created = Utc::now();
        let mut product = Product::new(
            ProductId::from_millis(7),
            fields("Old", 1.0, Unit::Kilogram, 1.0),
            created,
        );

        let later = created + chrono::Duration::seconds(5);
        product.apply_fields(&fields("New", 9.0, Unit::Liter, 2.0), later);

        assert_eq!(product.id(), ProductId::from_millis(7));
        assert_eq!(product.name(), "New");
        assert_eq!(product.stock(), 9.0);
        assert_eq!(product.unit(), Unit::Liter);
        assert_eq!(product.min_stock(), 2.0);
        assert_eq!(product.last_updated(), later);
        assert!(product.logs().is_empty());
    }
}
