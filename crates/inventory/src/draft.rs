//! Transient add/edit draft state and its coercion into validated fields.

use chemtrack_core::{DomainError, DomainResult, ProductId};

use crate::product::{Product, Unit};

/// Raw form input for a product, exactly as typed.
///
/// Quantities stay text until commit; coercion and validation happen in
/// [`ProductDraft::parse`]. `id` is present only when the draft was opened
/// from an existing product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub id: Option<ProductId>,
    pub name: String,
    pub stock: String,
    pub unit: String,
    pub min_stock: String,
}

impl ProductDraft {
    /// Blank add-mode draft: no name, zero stock in kg, threshold 10.
    pub fn blank() -> Self {
        Self {
            id: None,
            name: String::new(),
            stock: "0".to_string(),
            unit: Unit::Kilogram.to_string(),
            min_stock: "10".to_string(),
        }
    }

    /// Draft pre-filled from an existing product, for the edit form.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id()),
            name: product.name().to_string(),
            stock: product.stock().to_string(),
            unit: product.unit().to_string(),
            min_stock: product.min_stock().to_string(),
        }
    }

    /// Coerce raw input into a validated field set.
    ///
    /// Check order matches the form top to bottom: name first, then the two
    /// quantities, then the unit. Rejections happen before any state change,
    /// so a failed commit leaves the collection exactly as it was.
    pub fn parse(&self) -> DomainResult<ProductFields> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }

        let stock = parse_quantity(&self.stock, "stock")?;
        let min_stock = parse_quantity(&self.min_stock, "minimum stock")?;
        if stock < 0.0 || min_stock < 0.0 {
            return Err(DomainError::validation("quantities cannot be negative"));
        }

        let unit = self.unit.parse::<Unit>()?;

        Ok(ProductFields {
            name: name.to_string(),
            stock,
            unit,
            min_stock,
        })
    }
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self::blank()
    }
}

fn parse_quantity(raw: &str, field: &str) -> DomainResult<f64> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| DomainError::validation(format!("{field} is not a number")))?;

    // str::parse accepts "NaN" and "inf"; neither is a usable quantity.
    if !value.is_finite() {
        return Err(DomainError::validation(format!("{field} is not a number")));
    }

    Ok(value)
}

/// Coerced, validated product fields shared by the add and edit paths.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub stock: f64,
    pub unit: Unit,
    pub min_stock: f64,
}

/// Which terminal operation a committed draft maps to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Add,
    Edit,
}

/// The in-progress create/edit form.
///
/// Strictly transient: nothing here is authoritative until a commit
/// succeeds, and discarding it never touches the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    active: bool,
    mode: EditorMode,
    draft: ProductDraft,
}

impl EditorState {
    /// Inactive editor holding a blank add-mode draft.
    pub fn idle() -> Self {
        Self {
            active: false,
            mode: EditorMode::Add,
            draft: ProductDraft::blank(),
        }
    }

    /// Open the form with a blank draft for creating a product.
    pub fn begin_add(&mut self) {
        self.active = true;
        self.mode = EditorMode::Add;
        self.draft = ProductDraft::blank();
    }

    /// Open the form pre-filled from `product`.
    pub fn begin_edit(&mut self, product: &Product) {
        self.active = true;
        self.mode = EditorMode::Edit;
        self.draft = ProductDraft::from_product(product);
    }

    /// Discard whatever is in progress.
    pub fn reset(&mut self) {
        *self = Self::idle();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    /// Mutable draft access for form binding.
    pub fn draft_mut(&mut self) -> &mut ProductDraft {
        &mut self.draft
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::idle()
    }
}
