//! Serialization of the cart list.
//!
//! The list is stored as a JSON array of line-item records. Decoding also
//! restores the uniqueness invariant for data written by older clients:
//! repeated identifiers are folded into their first occurrence.

use go_marketplace_core::LineItem;
use thiserror::Error;
use tracing::warn;

/// Errors produced while encoding or decoding a stored cart.
#[derive(Debug, Error)]
#[error("Invalid cart data: {0}")]
pub struct CodecError(#[from] serde_json::Error);

/// Encode a cart list for storage.
///
/// # Errors
///
/// Returns `CodecError` if serialization fails.
pub fn encode(items: &[LineItem]) -> Result<String, CodecError> {
    Ok(serde_json::to_string(items)?)
}

/// Decode a stored cart list.
///
/// # Errors
///
/// Returns `CodecError` if the input is not a JSON array of line items.
pub fn decode(raw: &str) -> Result<Vec<LineItem>, CodecError> {
    let items: Vec<LineItem> = serde_json::from_str(raw)?;
    Ok(merge_duplicates(items))
}

fn merge_duplicates(items: Vec<LineItem>) -> Vec<LineItem> {
    let mut merged: Vec<LineItem> = Vec::with_capacity(items.len());
    for item in items {
        match merged.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                warn!(id = %item.id, "Merging duplicate cart line from storage");
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => merged.push(item),
        }
    }
    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use go_marketplace_core::{NewLineItem, Price};

    use super::*;

    fn item(id: &str, quantity: u32) -> LineItem {
        let mut item = NewLineItem::new(id, "Shoe", "u", Price::from_cents(1000)).into_line_item();
        item.quantity = quantity;
        item
    }

    #[test]
    fn test_encode_uses_persisted_field_names() {
        let json = encode(&[item("a", 1)]).unwrap();
        assert_eq!(
            json,
            r#"[{"id":"a","title":"Shoe","image_url":"u","price":10.0,"quantity":1}]"#
        );
    }

    #[test]
    fn test_encoded_price_is_a_json_number() {
        let json = encode(&[item("a", 2)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["price"].as_f64(), Some(10.0));
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(decode("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_preserves_order() {
        let items = vec![item("b", 2), item("a", 1), item("c", 5)];
        let decoded = decode(&encode(&items).unwrap()).unwrap();
        assert_eq!(decoded, items);
    }

    #[test]
    fn test_decode_merges_duplicates_into_first() {
        let raw = r#"[
            {"id":"a","title":"Shoe","image_url":"u","price":10,"quantity":1},
            {"id":"b","title":"Hat","image_url":"h","price":5,"quantity":1},
            {"id":"a","title":"Shoe","image_url":"u","price":10,"quantity":2}
        ]"#;
        let decoded = decode(raw).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded.first().unwrap().id, "a");
        assert_eq!(decoded.first().unwrap().quantity, 3);
        assert_eq!(decoded.get(1).unwrap().id, "b");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(decode("{not json").is_err());
        assert!(decode(r#"{"id":"a"}"#).is_err());
        assert!(decode(r#"[{"id":"a"}]"#).is_err());
    }
}
