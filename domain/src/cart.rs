//! Cart entities and their normalizers.
//!
//! Pricing is the server's job. The totals block is coerced and passed
//! through verbatim — the client never recomputes it from item arithmetic,
//! even when the two would disagree.

use crate::competition::{Competition, RawCompetition};
use crate::raw::{RawNumber, count_or_zero, number_or_zero};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server-computed cart totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Number of line items.
    pub item_count: u32,
    /// Monetary subtotal.
    pub subtotal: f64,
    /// Total tickets across all items.
    pub ticket_count: u32,
}

impl CartTotals {
    /// Normalize a raw totals block.
    #[must_use]
    pub fn from_raw(raw: RawCartTotals) -> Self {
        Self {
            item_count: count_or_zero(raw.item_count.or(raw.total_items).as_ref()),
            subtotal: number_or_zero(raw.subtotal.as_ref()),
            ticket_count: count_or_zero(raw.ticket_count.or(raw.total_tickets).as_ref()),
        }
    }
}

/// Raw totals block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawCartTotals {
    /// Item count under its current name.
    pub item_count: Option<RawNumber>,
    /// Item count under the legacy name.
    pub total_items: Option<RawNumber>,
    /// Monetary subtotal.
    pub subtotal: Option<RawNumber>,
    /// Ticket count under its current name.
    pub ticket_count: Option<RawNumber>,
    /// Ticket count under the legacy name.
    pub total_tickets: Option<RawNumber>,
}

/// A line item in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Identifier.
    pub id: String,
    /// Competition the tickets are for.
    pub competition_id: String,
    /// Denormalized competition snapshot for display, when the server
    /// populated the relation. Re-normalized through the competition
    /// normalizer, which is why that normalizer must be idempotent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition: Option<Competition>,
    /// Tickets in this line.
    pub quantity: u32,
    /// Price per ticket at the time of adding.
    pub unit_price: f64,
    /// Server-computed line subtotal.
    pub subtotal: f64,
}

impl CartItem {
    /// Normalize a raw cart item.
    #[must_use]
    pub fn from_raw(raw: RawCartItem) -> Self {
        let (competition_id, competition) = match raw.competition {
            Some(RawCompetitionRelation::Object(competition)) => {
                let snapshot = Competition::from_raw(*competition);
                (snapshot.id.clone(), Some(snapshot))
            },
            Some(RawCompetitionRelation::Id(id)) => (id, None),
            Some(RawCompetitionRelation::Other(_)) | None => {
                (raw.competition_id.unwrap_or_default(), None)
            },
        };

        Self {
            id: raw.id.or(raw.legacy_id).unwrap_or_default(),
            competition_id,
            competition,
            quantity: count_or_zero(raw.quantity.as_ref()),
            unit_price: number_or_zero(raw.unit_price.or(raw.price).as_ref()),
            subtotal: number_or_zero(raw.subtotal.or(raw.line_total).as_ref()),
        }
    }
}

/// The competition relation on a cart item: a full populated record or a
/// bare id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCompetitionRelation {
    /// The populated form: a whole raw competition record.
    Object(Box<RawCompetition>),
    /// The bare form: just the id.
    Id(String),
    /// Any other shape. Falls back to the flat id field.
    Other(Value),
}

/// Raw cart item record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawCartItem {
    /// Identifier.
    pub id: Option<String>,
    /// Legacy identifier.
    #[serde(rename = "_id")]
    pub legacy_id: Option<String>,
    /// Competition relation, populated or bare.
    pub competition: Option<RawCompetitionRelation>,
    /// Flat competition id used by newer endpoints.
    pub competition_id: Option<String>,
    /// Ticket quantity.
    pub quantity: Option<RawNumber>,
    /// Unit price under its current name.
    pub unit_price: Option<RawNumber>,
    /// Unit price under the legacy name.
    pub price: Option<RawNumber>,
    /// Line subtotal under its current name.
    pub subtotal: Option<RawNumber>,
    /// Line subtotal under the legacy name.
    pub line_total: Option<RawNumber>,
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Identifier.
    pub id: String,
    /// ISO currency code. Empty when the server did not send one.
    pub currency: String,
    /// Line items, in server order.
    pub items: Vec<CartItem>,
    /// Server-computed totals, authoritative over item arithmetic.
    pub totals: CartTotals,
}

impl Cart {
    /// Normalize a raw cart record.
    #[must_use]
    pub fn from_raw(raw: RawCart) -> Self {
        Self {
            id: raw.id.or(raw.legacy_id).unwrap_or_default(),
            currency: raw.currency.unwrap_or_default(),
            items: raw
                .items
                .unwrap_or_default()
                .into_iter()
                .map(CartItem::from_raw)
                .collect(),
            totals: raw.totals.map(CartTotals::from_raw).unwrap_or_default(),
        }
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Raw cart record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawCart {
    /// Identifier.
    pub id: Option<String>,
    /// Legacy identifier.
    #[serde(rename = "_id")]
    pub legacy_id: Option<String>,
    /// ISO currency code.
    pub currency: Option<String>,
    /// Line items.
    pub items: Option<Vec<RawCartItem>>,
    /// Server-computed totals.
    pub totals: Option<RawCartTotals>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can unwrap

    use super::*;
    use serde_json::json;

    fn normalize(value: serde_json::Value) -> Cart {
        Cart::from_raw(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn totals_are_trusted_verbatim_over_item_arithmetic() {
        // Item arithmetic says 2 × 5 = 10, but the server says 8 (e.g. a
        // promo the client knows nothing about). The server wins.
        let cart = normalize(json!({
            "_id": "cart1",
            "currency": "GBP",
            "items": [
                {"_id": "i1", "competition": "c1", "quantity": 2, "unitPrice": 5, "subtotal": 10}
            ],
            "totals": {"itemCount": 1, "subtotal": 8, "ticketCount": 2}
        }));

        assert_eq!(cart.totals.subtotal, 8.0);
        assert_eq!(cart.totals.item_count, 1);
        assert_eq!(cart.totals.ticket_count, 2);
    }

    #[test]
    fn item_competition_dual_shape() {
        let cart = normalize(json!({
            "id": "cart2",
            "items": [
                {"id": "i1", "competition": "c1", "quantity": 1},
                {"id": "i2", "quantity": 1, "competition": {
                    "_id": "c2", "title": "Snapshot", "ticketPrice": "3", "maxTickets": 10
                }}
            ]
        }));

        assert_eq!(cart.items[0].competition_id, "c1");
        assert_eq!(cart.items[0].competition, None);

        assert_eq!(cart.items[1].competition_id, "c2");
        let snapshot = cart.items[1].competition.as_ref().unwrap();
        assert_eq!(snapshot.title, "Snapshot");
        assert_eq!(snapshot.ticket_price, 3.0);
    }

    #[test]
    fn unrecognized_relation_falls_back_to_flat_id() {
        let cart = normalize(json!({
            "id": "cart3",
            "items": [{"id": "i1", "competition": 42, "competitionId": "c3"}]
        }));
        assert_eq!(cart.items[0].competition_id, "c3");
        assert_eq!(cart.items[0].competition, None);
    }

    #[test]
    fn missing_blocks_default_to_zero() {
        let cart = normalize(json!({"id": "cart4"}));
        assert!(cart.is_empty());
        assert_eq!(cart.currency, "");
        assert_eq!(cart.totals, CartTotals::default());

        let cart = normalize(json!({
            "id": "cart5",
            "items": [{"id": "i1", "quantity": "not a number"}]
        }));
        assert_eq!(cart.items[0].quantity, 0);
        assert_eq!(cart.items[0].unit_price, 0.0);
    }

    #[test]
    fn legacy_price_names_resolve() {
        let cart = normalize(json!({
            "id": "cart6",
            "items": [{"id": "i1", "price": "4.5", "lineTotal": 9}],
            "totals": {"totalItems": 1, "subtotal": "9", "totalTickets": 2}
        }));
        assert_eq!(cart.items[0].unit_price, 4.5);
        assert_eq!(cart.items[0].subtotal, 9.0);
        assert_eq!(cart.totals.item_count, 1);
        assert_eq!(cart.totals.ticket_count, 2);
    }

    #[test]
    fn normalization_is_idempotent_including_the_snapshot() {
        let first = normalize(json!({
            "_id": "cart7",
            "currency": "GBP",
            "items": [
                {"_id": "i1", "quantity": 2, "unitPrice": 5, "subtotal": 10, "competition": {
                    "_id": "c1", "title": "Prize", "ticketPrice": "5", "maxTickets": 100,
                    "status": "active"
                }}
            ],
            "totals": {"itemCount": 1, "subtotal": 10, "ticketCount": 2}
        }));

        let reparsed: RawCart =
            serde_json::from_value(serde_json::to_value(&first).unwrap()).unwrap();
        let second = Cart::from_raw(reparsed);
        assert_eq!(first, second);
    }
}
