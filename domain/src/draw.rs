//! Draw entity and its normalizer.

use crate::raw::{RawFlag, RawNumber, RawRef, RawTimestamp, count_or_zero, flag_or, timestamp_or_none};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed or scheduled prize draw.
///
/// The competition and winner relations arrive either populated or as bare
/// ids; normalization always yields the flat id plus whatever denormalized
/// display fields were available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draw {
    /// Identifier.
    pub id: String,
    /// Competition the draw belongs to.
    pub competition_id: String,
    /// Denormalized competition title, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition_title: Option<String>,
    /// Winning user.
    pub winner_id: String,
    /// Winner display name; synthesized from first and last name when the
    /// record carries no explicit name. Empty when nothing is known.
    pub winner_name: String,
    /// Tickets in the draw.
    pub total_tickets: u32,
    /// The winning ticket number.
    pub winning_ticket_number: u32,
    /// Whether the draw is shown in listings. Absent means active.
    pub active: bool,
    /// When the draw took place, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drawn_at: Option<DateTime<Utc>>,
}

impl Draw {
    /// Normalize a raw draw record.
    #[must_use]
    pub fn from_raw(raw: RawDraw) -> Self {
        let flat_title = raw.competition_title.filter(|t| !t.is_empty());
        let (competition_id, competition_title) = match &raw.competition {
            Some(reference) => (reference.id(), reference.title().or(flat_title)),
            None => (raw.competition_id.unwrap_or_default(), flat_title),
        };

        let winner = raw.winner.or(raw.user);
        let (winner_id, winner_name) = match &winner {
            Some(reference) => (
                reference.id(),
                reference
                    .display_name()
                    .or(raw.winner_name)
                    .unwrap_or_default(),
            ),
            None => (
                raw.winner_id.unwrap_or_default(),
                raw.winner_name.unwrap_or_default(),
            ),
        };

        Self {
            id: raw.id.or(raw.legacy_id).unwrap_or_default(),
            competition_id,
            competition_title,
            winner_id,
            winner_name,
            total_tickets: count_or_zero(raw.total_tickets.as_ref()),
            winning_ticket_number: count_or_zero(
                raw.winning_ticket_number.or(raw.ticket_number).as_ref(),
            ),
            active: flag_or(raw.active.or(raw.is_active).as_ref(), true),
            drawn_at: timestamp_or_none(raw.drawn_at.or(raw.draw_date).as_ref()),
        }
    }
}

/// Raw draw record: every field optional, relations dual-shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawDraw {
    /// Identifier.
    pub id: Option<String>,
    /// Legacy identifier.
    #[serde(rename = "_id")]
    pub legacy_id: Option<String>,
    /// Competition relation, populated or bare.
    pub competition: Option<RawRef>,
    /// Flat competition id used by newer endpoints.
    pub competition_id: Option<String>,
    /// Flat denormalized competition title.
    pub competition_title: Option<String>,
    /// Winner relation, populated or bare.
    pub winner: Option<RawRef>,
    /// Winner relation under the legacy name.
    pub user: Option<RawRef>,
    /// Flat winner id used by newer endpoints.
    pub winner_id: Option<String>,
    /// Flat denormalized winner name.
    pub winner_name: Option<String>,
    /// Tickets in the draw.
    pub total_tickets: Option<RawNumber>,
    /// Winning ticket number.
    pub winning_ticket_number: Option<RawNumber>,
    /// Winning ticket number under the legacy name.
    pub ticket_number: Option<RawNumber>,
    /// Active flag.
    pub active: Option<RawFlag>,
    /// Active flag under the legacy name.
    pub is_active: Option<RawFlag>,
    /// Draw timestamp.
    pub drawn_at: Option<RawTimestamp>,
    /// Draw timestamp under the legacy name.
    pub draw_date: Option<RawTimestamp>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can unwrap

    use super::*;
    use serde_json::json;

    fn normalize(value: serde_json::Value) -> Draw {
        Draw::from_raw(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn populated_and_bare_relations_yield_the_same_flat_id() {
        let populated = normalize(json!({
            "_id": "d1",
            "competition": {"_id": "X", "title": "T"},
            "winner": {"_id": "u1", "firstName": "Ada", "lastName": "Lovelace"}
        }));
        let bare = normalize(json!({
            "_id": "d1",
            "competition": "X",
            "winner": "u1"
        }));

        assert_eq!(populated.competition_id, "X");
        assert_eq!(bare.competition_id, "X");
        // Only the populated form carries the denormalized fields.
        assert_eq!(populated.competition_title, Some("T".to_owned()));
        assert_eq!(bare.competition_title, None);
        assert_eq!(populated.winner_name, "Ada Lovelace");
        assert_eq!(bare.winner_name, "");
        assert_eq!(populated.winner_id, bare.winner_id);
    }

    #[test]
    fn active_defaults_true_when_absent() {
        assert!(normalize(json!({"id": "d2"})).active);
        assert!(!normalize(json!({"id": "d3", "active": false})).active);
        assert!(!normalize(json!({"id": "d4", "isActive": "no"})).active);
    }

    #[test]
    fn flat_fields_back_up_the_missing_relation() {
        let draw = normalize(json!({
            "id": "d5",
            "competitionId": "c9",
            "competitionTitle": "Weekend Special",
            "winnerId": "u7",
            "winnerName": "Grace Hopper",
            "totalTickets": "500",
            "ticketNumber": 123
        }));

        assert_eq!(draw.competition_id, "c9");
        assert_eq!(draw.competition_title, Some("Weekend Special".to_owned()));
        assert_eq!(draw.winner_id, "u7");
        assert_eq!(draw.winner_name, "Grace Hopper");
        assert_eq!(draw.total_tickets, 500);
        assert_eq!(draw.winning_ticket_number, 123);
    }

    #[test]
    fn legacy_user_relation_is_accepted() {
        let draw = normalize(json!({
            "id": "d6",
            "user": {"id": "u2", "name": "Explicit Name"}
        }));
        assert_eq!(draw.winner_id, "u2");
        assert_eq!(draw.winner_name, "Explicit Name");
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = normalize(json!({
            "_id": "d7",
            "competition": {"_id": "c1", "title": "Title"},
            "winner": {"_id": "u1", "firstName": "Ada", "lastName": "Lovelace"},
            "totalTickets": 100,
            "winningTicketNumber": 42,
            "active": true,
            "drawnAt": "2026-05-01T18:00:00Z"
        }));

        let reparsed: RawDraw =
            serde_json::from_value(serde_json::to_value(&first).unwrap()).unwrap();
        let second = Draw::from_raw(reparsed);
        assert_eq!(first, second);
    }
}
