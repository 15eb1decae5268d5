//! Client-side shopping cart.
//!
//! A cart is an ordered sequence of `(entry id, product id, quantity)`
//! entries. Invariants held by every operation:
//!
//! - at most one entry per product (adding an existing product merges);
//! - every quantity is positive (setting a non-positive quantity removes
//!   the entry, there is no zero-quantity state);
//! - entry ids are unique and stable for the lifetime of the entry.
//!
//! The cart stores product ids only. Names and prices come from the live
//! catalog through [`Cart::view`], so a product deleted from the catalog
//! simply drops out of the view while its entry stays in the cart.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::num::{NonZeroU32, ParseIntError};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::money::{self, Price};
use super::product::Product;
use crate::error::CartError;

/// Stable identifier of a cart entry, assigned when the entry is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartEntry {
    pub id: EntryId,
    pub product_id: ProductId,
    pub quantity: NonZeroU32,
}

/// Outcome of a quantity assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The entry now holds this quantity.
    Updated(NonZeroU32),
    /// The requested quantity was zero or negative; the entry is gone.
    Removed,
}

/// Persisted entry shape. Ids are optional so carts written before ids
/// existed (`[{product_id, quantity}]`) still load.
#[derive(Deserialize)]
struct StoredEntry {
    #[serde(default)]
    id: Option<EntryId>,
    product_id: ProductId,
    quantity: NonZeroU32,
}

/// The cart state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: Vec<CartEntry>,
    next_id: u64,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Look up the entry holding a product.
    #[must_use]
    pub fn find_product(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.product_id == product_id)
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing entry for the product, or appends a new entry
    /// with quantity 1. The product is not checked against the catalog.
    pub fn add(&mut self, product_id: ProductId) -> Result<EntryId, CartError> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.product_id == product_id) {
            entry.quantity = entry
                .quantity
                .checked_add(1)
                .ok_or(CartError::QuantityOverflow)?;
            return Ok(entry.id);
        }

        let id = self.allocate_id();
        self.entries.push(CartEntry {
            id,
            product_id,
            quantity: NonZeroU32::MIN,
        });
        Ok(id)
    }

    /// Set the quantity of an entry; zero or negative removes it.
    pub fn set_quantity(
        &mut self,
        id: EntryId,
        quantity: i64,
    ) -> Result<QuantityChange, CartError> {
        let index = self.position(id).ok_or(CartError::EntryNotFound(id))?;
        self.set_quantity_at(index, quantity)
    }

    /// Positional form of [`Cart::set_quantity`].
    pub fn set_quantity_at(
        &mut self,
        index: usize,
        quantity: i64,
    ) -> Result<QuantityChange, CartError> {
        let len = self.entries.len();
        if index >= len {
            return Err(CartError::IndexOutOfBounds { index, len });
        }

        if quantity <= 0 {
            self.entries.remove(index);
            return Ok(QuantityChange::Removed);
        }

        let quantity = u32::try_from(quantity)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(CartError::QuantityOverflow)?;
        self.entries[index].quantity = quantity;
        Ok(QuantityChange::Updated(quantity))
    }

    /// Remove an entry by id.
    pub fn remove(&mut self, id: EntryId) -> Result<CartEntry, CartError> {
        let index = self.position(id).ok_or(CartError::EntryNotFound(id))?;
        Ok(self.entries.remove(index))
    }

    /// Remove the entry at a position.
    pub fn remove_at(&mut self, index: usize) -> Result<CartEntry, CartError> {
        let len = self.entries.len();
        if index >= len {
            return Err(CartError::IndexOutOfBounds { index, len });
        }
        Ok(self.entries.remove(index))
    }

    /// Remove every entry whose id is listed. Unknown ids are ignored.
    ///
    /// Returns the number of entries removed.
    pub fn remove_entries(&mut self, ids: &[EntryId]) -> usize {
        let ids: HashSet<EntryId> = ids.iter().copied().collect();
        let before = self.entries.len();
        self.entries.retain(|e| !ids.contains(&e.id));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Join the cart against a catalog snapshot.
    ///
    /// Entries whose product is missing from `catalog` are left out of the
    /// lines and the total; they are counted in [`CartView::unmatched`] and
    /// remain in the cart.
    ///
    /// Fails with [`CartError::TotalOverflow`] when a line total or the cart
    /// total does not fit a `Decimal`.
    pub fn view(&self, catalog: &[Product]) -> Result<CartView, CartError> {
        let by_id: HashMap<ProductId, &Product> = catalog.iter().map(|p| (p.id, p)).collect();

        let mut lines = Vec::with_capacity(self.entries.len());
        let mut total = Price::ZERO;
        let mut unmatched = 0;

        for entry in &self.entries {
            let Some(product) = by_id.get(&entry.product_id) else {
                unmatched += 1;
                continue;
            };
            let quantity = entry.quantity.get();
            let line_total =
                money::line_total(product.price, quantity).ok_or(CartError::TotalOverflow)?;
            total = money::checked_sum([total, line_total]).ok_or(CartError::TotalOverflow)?;
            lines.push(CartLine {
                entry_id: entry.id,
                product: (*product).clone(),
                quantity,
                line_total,
            });
        }

        Ok(CartView {
            lines,
            total,
            unmatched,
        })
    }

    /// Serialize to the persisted JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.entries)
    }

    /// Parse the persisted JSON array.
    ///
    /// Entries without an id (or with an id already taken) get a fresh one,
    /// in order. Repeated products are merged into their first entry with the
    /// quantities summed; a sum past `u32::MAX` is a parse error.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let stored: Vec<StoredEntry> = serde_json::from_str(json)?;

        let mut seen = HashSet::with_capacity(stored.len());
        let mut cart = Self {
            entries: Vec::with_capacity(stored.len()),
            next_id: stored
                .iter()
                .filter_map(|e| e.id)
                .map(EntryId::get)
                .max()
                .unwrap_or(0),
        };

        for entry in stored {
            if let Some(existing) = cart
                .entries
                .iter_mut()
                .find(|e| e.product_id == entry.product_id)
            {
                existing.quantity = existing
                    .quantity
                    .checked_add(entry.quantity.get())
                    .ok_or_else(|| {
                        <serde_json::Error as serde::de::Error>::custom(format!(
                            "quantity for product {} exceeds {}",
                            entry.product_id,
                            u32::MAX
                        ))
                    })?;
                continue;
            }

            let id = match entry.id {
                Some(id) if seen.insert(id) => id,
                _ => {
                    let id = cart.allocate_id();
                    seen.insert(id);
                    id
                }
            };
            cart.entries.push(CartEntry {
                id,
                product_id: entry.product_id,
                quantity: entry.quantity,
            });
        }

        Ok(cart)
    }

    fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    fn allocate_id(&mut self) -> EntryId {
        let floor = self.entries.iter().map(|e| e.id.get()).max().unwrap_or(0);
        self.next_id = self.next_id.max(floor) + 1;
        EntryId(self.next_id)
    }
}

/// A cart entry resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub entry_id: EntryId,
    pub product: Product,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub line_total: Price,
}

/// The cart as it should be displayed and checked out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    /// Sum of `line_total` over `lines`.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Price,
    /// Entries skipped because their product is not in the catalog.
    pub unmatched: usize,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
