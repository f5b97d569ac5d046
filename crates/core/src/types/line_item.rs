//! Cart line items.
//!
//! A [`LineItem`] is one product entry in the cart together with its
//! quantity. The serialized field names (`id`, `title`, `image_url`, `price`,
//! `quantity`) are the persisted format and must not change.

use serde::{Deserialize, Deserializer, Serialize};

use super::{Price, ProductId};

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: Price,
    /// Units of this product in the cart. Never negative; stored negatives
    /// from older clients are read back as zero.
    #[serde(deserialize_with = "deserialize_quantity")]
    pub quantity: u32,
}

impl LineItem {
    /// Price of this line (`price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// A product description handed to the cart when adding it.
///
/// Any `quantity` present in the source data is ignored; a newly added line
/// always starts at one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLineItem {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: Price,
}

impl NewLineItem {
    /// Create a new product description.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }

    /// Turn the description into a cart line with a quantity of one.
    #[must_use]
    pub fn into_line_item(self) -> LineItem {
        LineItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity: 1,
        }
    }
}

impl From<LineItem> for NewLineItem {
    fn from(item: LineItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            image_url: item.image_url,
            price: item.price,
        }
    }
}

fn deserialize_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(u32::try_from(raw.max(0)).unwrap_or(u32::MAX))
}
