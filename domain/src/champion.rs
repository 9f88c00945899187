//! Champion entity and its normalizer.
//!
//! Champions are curated winner success stories: structurally a draw result
//! plus a testimonial and a featured flag, surfaced on the marketing pages.

use crate::raw::{RawFlag, RawRef, RawTimestamp, flag_or, timestamp_or_none};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A curated winner success story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Champion {
    /// Identifier.
    pub id: String,
    /// Competition the story is about.
    pub competition_id: String,
    /// Denormalized competition title, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition_title: Option<String>,
    /// The winning user.
    pub user_id: String,
    /// Winner display name; empty when nothing is known.
    pub user_name: String,
    /// Prize headline.
    pub prize: String,
    /// The winner's testimonial. Empty when not yet collected.
    pub testimonial: String,
    /// Whether the story is featured on the home page.
    pub featured: bool,
    /// When the prize was won, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub won_at: Option<DateTime<Utc>>,
}

impl Champion {
    /// Normalize a raw champion record.
    #[must_use]
    pub fn from_raw(raw: RawChampion) -> Self {
        let flat_title = raw.competition_title.filter(|t| !t.is_empty());
        let (competition_id, competition_title) = match &raw.competition {
            Some(reference) => (reference.id(), reference.title().or(flat_title)),
            None => (raw.competition_id.unwrap_or_default(), flat_title),
        };

        let user = raw.user.or(raw.winner);
        let (user_id, user_name) = match &user {
            Some(reference) => (
                reference.id(),
                reference.display_name().or(raw.user_name).unwrap_or_default(),
            ),
            None => (
                raw.user_id.unwrap_or_default(),
                raw.user_name.unwrap_or_default(),
            ),
        };

        Self {
            id: raw.id.or(raw.legacy_id).unwrap_or_default(),
            competition_id,
            competition_title,
            user_id,
            user_name,
            prize: raw.prize.unwrap_or_default(),
            testimonial: raw.testimonial.or(raw.story).unwrap_or_default(),
            featured: flag_or(raw.featured.or(raw.is_featured).as_ref(), false),
            won_at: timestamp_or_none(raw.won_at.or(raw.win_date).as_ref()),
        }
    }
}

/// Raw champion record: every field optional, relations dual-shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawChampion {
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
    /// Winning user relation, populated or bare.
    pub user: Option<RawRef>,
    /// Winning user relation under the legacy name.
    pub winner: Option<RawRef>,
    /// Flat user id used by newer endpoints.
    pub user_id: Option<String>,
    /// Flat denormalized user name.
    pub user_name: Option<String>,
    /// Prize headline.
    pub prize: Option<String>,
    /// Testimonial under its current name.
    pub testimonial: Option<String>,
    /// Testimonial under the legacy name.
    pub story: Option<String>,
    /// Featured flag.
    pub featured: Option<RawFlag>,
    /// Featured flag under the legacy name.
    pub is_featured: Option<RawFlag>,
    /// Win timestamp.
    pub won_at: Option<RawTimestamp>,
    /// Win timestamp under the legacy name.
    pub win_date: Option<RawTimestamp>,
}
