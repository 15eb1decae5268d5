//! Catalog product shapes.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{ProductId, UserId};
use super::money::Price;

/// A product as served by the catalog.
///
/// The cart never stores these; it resolves name and price from the live
/// catalog every time it is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Price,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub seller_id: Option<UserId>,
}

/// Editable product fields, validated before they are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductUpdate {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Price,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl ProductUpdate {
    /// Build a validated update.
    ///
    /// Text fields are trimmed; blank optional fields become `None`.
    pub fn try_new(
        name: &str,
        price: Price,
        category: Option<&str>,
        description: Option<&str>,
    ) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        if price <= Price::ZERO {
            return Err(DomainError::NonPositivePrice { price });
        }

        Ok(Self {
            name: name.to_string(),
            price,
            category: non_blank(category),
            description: non_blank(description),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

/// Payload for creating a product on behalf of a seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProduct {
    #[serde(flatten)]
    pub details: ProductUpdate,
    pub seller_id: UserId,
}

/// Server-side catalog filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub price_min: Option<Price>,
    pub price_max: Option<Price>,
}

impl ProductFilter {
    /// True when no filter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.price_min.is_none() && self.price_max.is_none()
    }

    /// Query string pairs understood by the catalog endpoint.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(min) = self.price_min {
            pairs.push(("price_min", min.to_string()));
        }
        if let Some(max) = self.price_max {
            pairs.push(("price_max", max.to_string()));
        }
        pairs
    }
}
