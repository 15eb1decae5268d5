//! Persisted cart store.
//!
//! Binds the [`Cart`] state machine to client storage. Every mutation
//! re-reads the stored cart, applies the change and writes the whole
//! sequence back; a failed mutation writes nothing.

use std::sync::Arc;

use tracing::debug;

use crate::domain::cart::{Cart, CartEntry, CartView, EntryId, QuantityChange};
use crate::domain::id::ProductId;
use crate::domain::product::Product;
use crate::error::{CartError, Result, StorageError};
use crate::port::outbound::storage::{KeyValueStore, StorageKey};

pub struct CartStore {
    storage: Arc<dyn KeyValueStore>,
    cart: Cart,
}

impl CartStore {
    /// Load the stored cart. A missing cart is empty; a stored cart that
    /// does not parse is [`StorageError::Corrupt`] and is left in place.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let cart = read(storage.as_ref())?;
        Ok(Self { storage, cart })
    }

    /// Delete the stored cart without reading it. This is the way out of a
    /// corrupt cart.
    pub fn reset(storage: &dyn KeyValueStore) -> Result<()> {
        storage.remove(StorageKey::Cart)
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        self.cart.entries()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cart.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Add one unit of a product, merging with an existing entry.
    pub fn add_to_cart(&mut self, product_id: ProductId) -> Result<EntryId> {
        let id = self.mutate(|cart| cart.add(product_id))?;
        debug!(entry_id = %id, product_id = %product_id, "Added to cart");
        Ok(id)
    }

    /// Set an entry's quantity; zero or negative removes it.
    pub fn set_quantity(&mut self, id: EntryId, quantity: i64) -> Result<QuantityChange> {
        let change = self.mutate(|cart| cart.set_quantity(id, quantity))?;
        debug!(entry_id = %id, quantity, ?change, "Set cart quantity");
        Ok(change)
    }

    /// Positional form of [`CartStore::set_quantity`].
    pub fn set_quantity_at(&mut self, index: usize, quantity: i64) -> Result<QuantityChange> {
        let change = self.mutate(|cart| cart.set_quantity_at(index, quantity))?;
        debug!(index, quantity, ?change, "Set cart quantity");
        Ok(change)
    }

    pub fn remove(&mut self, id: EntryId) -> Result<CartEntry> {
        let entry = self.mutate(|cart| cart.remove(id))?;
        debug!(entry_id = %id, product_id = %entry.product_id, "Removed from cart");
        Ok(entry)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<CartEntry> {
        let entry = self.mutate(|cart| cart.remove_at(index))?;
        debug!(index, entry_id = %entry.id, "Removed from cart");
        Ok(entry)
    }

    /// Remove several entries at once; unknown ids are skipped.
    pub fn remove_entries(&mut self, ids: &[EntryId]) -> Result<usize> {
        self.mutate(|cart| Ok(cart.remove_entries(ids)))
    }

    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove(StorageKey::Cart)?;
        self.cart.clear();
        debug!("Cleared cart");
        Ok(())
    }

    /// Resolve the cart against a catalog snapshot. Does not modify storage.
    pub fn compute_view(&self, catalog: &[Product]) -> Result<CartView> {
        Ok(self.cart.view(catalog)?)
    }

    fn mutate<R>(&mut self, apply: impl FnOnce(&mut Cart) -> std::result::Result<R, CartError>) -> Result<R> {
        let mut cart = read(self.storage.as_ref())?;
        let result = apply(&mut cart)?;
        self.storage.set(StorageKey::Cart, &cart.to_json()?)?;
        self.cart = cart;
        Ok(result)
    }
}

fn read(storage: &dyn KeyValueStore) -> Result<Cart> {
    let Some(json) = storage.get(StorageKey::Cart)? else {
        return Ok(Cart::new());
    };
    if json.trim().is_empty() {
        return Ok(Cart::new());
    }
    Cart::from_json(&json).map_err(|source| {
        StorageError::Corrupt {
            key: StorageKey::Cart.as_str().to_string(),
            source,
        }
        .into()
    })
}
