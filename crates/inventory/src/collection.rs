//! Ordered, id-unique product collection.

use chrono::{DateTime, Utc};

use chemtrack_core::{DomainError, DomainResult, ProductId};

use crate::draft::ProductFields;
use crate::product::Product;

/// The authoritative in-memory product collection.
///
/// Insertion order is preserved; no implicit sorting anywhere. Ids are
/// unique within the collection for the process lifetime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    products: Vec<Product>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted snapshot, keeping stored order.
    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Allocate a creation-timestamp id, stepping forward one millisecond at
    /// a time past any id already taken (two creations can share a clock
    /// reading).
    pub fn allocate_id(&self, now: DateTime<Utc>) -> ProductId {
        let mut id = ProductId::at(now);
        while self.contains(id) {
            id = id.next();
        }
        id
    }

    /// Build a new product from validated fields and append it.
    pub fn add(&mut self, fields: ProductFields, now: DateTime<Utc>) -> DomainResult<Product> {
        let id = self.allocate_id(now);
        let product = Product::new(id, fields, now);
        self.insert(product.clone())?;
        Ok(product)
    }

    /// Append a product. A duplicate id is rejected before any change.
    pub fn insert(&mut self, product: Product) -> DomainResult<()> {
        if self.contains(product.id()) {
            return Err(DomainError::conflict(format!(
                "product id already taken: {}",
                product.id()
            )));
        }
        self.products.push(product);
        Ok(())
    }

    /// Replace the mutable fields of the product with `id` and refresh its
    /// `last_updated`. Every other product is untouched. A missing id is an
    /// explicit error, not a silent no-op.
    pub fn update(
        &mut self,
        id: ProductId,
        fields: &ProductFields,
        now: DateTime<Utc>,
    ) -> DomainResult<Product> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(DomainError::NotFound)?;

        product.apply_fields(fields, now);
        Ok(product.clone())
    }

    /// Remove and return the product with `id`, if present.
    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id() == id)?;
        Some(self.products.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::product::Unit;

    use super::*;

    fn fields(name: &str) -> ProductFields {
        ProductFields {
            name: name.to_string(),
            stock: 1.0,
            unit: Unit::Kilogram,
            min_stock: 0.0,
        }
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut inventory = Inventory::new();
        let now = Utc::now();

        for name in ["A", "B", "C"] {
            inventory.add(fields(name), now).unwrap();
        }

        let names: Vec<&str> = inventory.products().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn ids_stay_unique_at_a_fixed_clock() {
        let mut inventory = Inventory::new();
        let now = Utc::now();

        for i in 0..50 {
            inventory.add(fields(&format!("P{i}")), now).unwrap();
        }

        let mut ids: Vec<ProductId> = inventory.products().iter().map(|p| p.id()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn insert_rejects_duplicate_id_without_changing_state() {
        let mut inventory = Inventory::new();
        let now = Utc::now();
        let product = inventory.add(fields("A"), now).unwrap();

        let duplicate = Product::new(product.id(), fields("B"), now);
        let err = inventory.insert(duplicate).unwrap_err();
        match err {
            DomainError::Conflict(_) => {}
            other => panic!("expected Conflict, got {other:?}"),
        }
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.products()[0].name(), "A");
    }

    #[test]
    fn update_touches_only_the_target() {
        let mut inventory = Inventory::new();
        let created = Utc::now();

        let first = inventory.add(fields("First"), created).unwrap();
        let second = inventory.add(fields("Second"), created).unwrap();
        let untouched_before = inventory.get(second.id()).unwrap().clone();

        let later = created + chrono::Duration::seconds(30);
        let updated = inventory
            .update(first.id(), &fields("Renamed"), later)
            .unwrap();

        assert_eq!(updated.name(), "Renamed");
        assert_eq!(updated.last_updated(), later);
        assert_eq!(inventory.get(second.id()).unwrap(), &untouched_before);
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn update_of_unknown_id_is_not_found_and_changes_nothing() {
        let mut inventory = Inventory::new();
        let now = Utc::now();
        inventory.add(fields("Only"), now).unwrap();
        let before = inventory.clone();

        let err = inventory
            .update(ProductId::from_millis(999), &fields("X"), now)
            .unwrap_err();

        assert_eq!(err, DomainError::NotFound);
        assert_eq!(inventory, before);
    }

    #[test]
    fn remove_returns_the_product_and_shrinks_by_one() {
        let mut inventory = Inventory::new();
        let now = Utc::now();
        let product = inventory.add(fields("Gone"), now).unwrap();

        let removed = inventory.remove(product.id()).unwrap();
        assert_eq!(removed.id(), product.id());
        assert!(inventory.is_empty());

        assert!(inventory.remove(product.id()).is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: after any sequence of valid adds, order matches the
        /// add sequence and every id is distinct.
        #[test]
        fn adds_preserve_order_and_id_uniqueness(names in proptest::collection::vec("[A-Za-z]{1,12}", 1..20)) {
            let mut inventory = Inventory::new();
            let now = Utc::now();

            for name in &names {
                inventory.add(fields(name), now).unwrap();
            }

            let got: Vec<String> =
                inventory.products().iter().map(|p| p.name().to_string()).collect();
            prop_assert_eq!(got, names);

            let mut ids: Vec<ProductId> = inventory.products().iter().map(|p| p.id()).collect();
            let count = ids.len();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), count);
        }
    }
}
