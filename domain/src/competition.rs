//! Competition entity and its normalizer.

use crate::raw::{
    RawFlag, RawImage, RawNumber, RawTimestamp, count_or_zero, flag_or, number_or_zero,
    timestamp_or_none,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle status of a competition.
///
/// Closed set; see [`CompetitionStatus::from_raw`] for how unknown server
/// values are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionStatus {
    /// Not yet published.
    Draft,
    /// Published but not open for entries yet.
    #[default]
    Upcoming,
    /// Open for entries.
    Active,
    /// Entries closed, winner being drawn.
    Drawing,
    /// Winner drawn and announced.
    Completed,
    /// Cancelled before completion.
    Cancelled,
}

impl CompetitionStatus {
    /// Parse a server status string.
    ///
    /// Unknown values map to [`CompetitionStatus::Upcoming`] rather than
    /// erroring, so a new server-side status never takes a listing down.
    /// The cost is that such values are silently misclassified until the
    /// enum catches up; callers must not treat an unrecognized status as a
    /// failure signal.
    #[must_use]
    pub fn from_raw(value: Option<&str>) -> Self {
        match value.unwrap_or("").trim().to_ascii_lowercase().as_str() {
            "draft" => Self::Draft,
            "active" => Self::Active,
            "drawing" => Self::Drawing,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Upcoming,
        }
    }

    /// The canonical wire string for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Drawing => "drawing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether entries can currently be purchased.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for CompetitionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized image descriptor.
///
/// The source may be a bare URL string or a descriptor object; either way
/// the normalized form always carries a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDescriptor {
    /// Image URL.
    pub url: String,
    /// CDN public id, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    /// Thumbnail URL, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ImageDescriptor {
    fn from_raw(raw: &RawImage) -> Option<Self> {
        raw.url().map(|url| Self {
            url,
            public_id: raw.public_id(),
            thumbnail: raw.thumbnail(),
        })
    }
}

/// The skill question attached to a competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// The question prompt.
    pub prompt: String,
    /// Answer options, in display order.
    pub options: Vec<String>,
    /// The correct option, when the endpoint exposes it (admin views).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    /// Explanation shown after answering, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    /// Normalize a raw question.
    ///
    /// Alternate field names resolve first-match-wins: prompt from `prompt`,
    /// `question`, then `text`; options from `options` then `answers`.
    #[must_use]
    pub fn from_raw(raw: RawQuestion) -> Self {
        let options = raw
            .options
            .or(raw.answers)
            .unwrap_or_default()
            .iter()
            .filter_map(RawAnswerOption::as_text)
            .collect();
        Self {
            prompt: raw.prompt.or(raw.question).or(raw.text).unwrap_or_default(),
            options,
            correct_answer: raw.correct_answer.filter(|a| !a.is_empty()),
            explanation: raw.explanation.filter(|e| !e.is_empty()),
        }
    }
}

/// Raw question record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawQuestion {
    /// Prompt under its current name.
    pub prompt: Option<String>,
    /// Prompt under its pre-rebrand name.
    pub question: Option<String>,
    /// Prompt under the oldest endpoint's name.
    pub text: Option<String>,
    /// Options under their current name.
    pub options: Option<Vec<RawAnswerOption>>,
    /// Options under the legacy name.
    pub answers: Option<Vec<RawAnswerOption>>,
    /// Correct option.
    pub correct_answer: Option<String>,
    /// Post-answer explanation.
    pub explanation: Option<String>,
}

/// An answer option: a bare string or a `{text}`/`{label}` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAnswerOption {
    /// The bare form.
    Text(String),
    /// The object form.
    Object(AnswerOptionFields),
    /// Any other shape. Skipped.
    Other(Value),
}

/// Fields of the object form of an answer option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerOptionFields {
    /// Option text.
    pub text: Option<String>,
    /// Legacy option text field.
    pub label: Option<String>,
}

impl RawAnswerOption {
    fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Object(fields) => fields.text.clone().or_else(|| fields.label.clone()),
            Self::Other(_) => None,
        }
    }
}

/// A prize competition as rendered by listings, detail pages, and carts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    /// Identifier.
    pub id: String,
    /// URL slug, when the server assigns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Prize headline.
    pub prize: String,
    /// Listing category.
    pub category: String,
    /// Price per ticket.
    pub ticket_price: f64,
    /// Total tickets available.
    pub max_tickets: u32,
    /// Tickets sold so far.
    pub sold_tickets: u32,
    /// Lifecycle status.
    pub status: CompetitionStatus,
    /// Whether the competition is featured on the home page.
    pub featured: bool,
    /// Images, in display order.
    pub images: Vec<ImageDescriptor>,
    /// Skill question, when one is attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
    /// Entry deadline, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
}

impl Competition {
    /// Normalize a raw competition record.
    ///
    /// Every numeric field coerces with a zero fallback, the status maps
    /// unknown values to the default, and alternate field names resolve
    /// first-match-wins. Normalizing an already-canonical record yields an
    /// identical record.
    #[must_use]
    pub fn from_raw(raw: RawCompetition) -> Self {
        let images: Vec<ImageDescriptor> = match (raw.images, raw.image) {
            (Some(images), _) => images.iter().filter_map(ImageDescriptor::from_raw).collect(),
            (None, Some(single)) => ImageDescriptor::from_raw(&single).into_iter().collect(),
            (None, None) => Vec::new(),
        };

        Self {
            id: raw.id.or(raw.legacy_id).unwrap_or_default(),
            slug: raw.slug.filter(|s| !s.is_empty()),
            title: raw.title.or(raw.name).unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            prize: raw.prize.or(raw.prize_name).unwrap_or_default(),
            category: raw.category.unwrap_or_default(),
            ticket_price: number_or_zero(raw.ticket_price.or(raw.price).as_ref()),
            max_tickets: count_or_zero(raw.max_tickets.or(raw.total_tickets).as_ref()),
            sold_tickets: count_or_zero(raw.sold_tickets.or(raw.tickets_sold).as_ref()),
            status: CompetitionStatus::from_raw(raw.status.as_deref()),
            featured: flag_or(raw.featured.or(raw.is_featured).as_ref(), false),
            images,
            question: raw.question.map(Question::from_raw),
            ends_at: timestamp_or_none(raw.ends_at.or(raw.end_date).as_ref()),
        }
    }

    /// Tickets still available for purchase.
    #[must_use]
    pub const fn tickets_remaining(&self) -> u32 {
        self.max_tickets.saturating_sub(self.sold_tickets)
    }

    /// Whether every ticket has been sold.
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.max_tickets > 0 && self.sold_tickets >= self.max_tickets
    }
}

/// Raw competition record: every field optional, alternate names included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawCompetition {
    /// Identifier.
    pub id: Option<String>,
    /// Legacy identifier.
    #[serde(rename = "_id")]
    pub legacy_id: Option<String>,
    /// URL slug.
    pub slug: Option<String>,
    /// Title under its current name.
    pub title: Option<String>,
    /// Title under the legacy name.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Prize headline under its current name.
    pub prize: Option<String>,
    /// Prize headline under the legacy name.
    pub prize_name: Option<String>,
    /// Listing category.
    pub category: Option<String>,
    /// Ticket price under its current name.
    pub ticket_price: Option<RawNumber>,
    /// Ticket price under the legacy name.
    pub price: Option<RawNumber>,
    /// Ticket cap under its current name.
    pub max_tickets: Option<RawNumber>,
    /// Ticket cap under the legacy name.
    pub total_tickets: Option<RawNumber>,
    /// Sold count under its current name.
    pub sold_tickets: Option<RawNumber>,
    /// Sold count under the legacy name.
    pub tickets_sold: Option<RawNumber>,
    /// Status string.
    pub status: Option<String>,
    /// Featured flag under its current name.
    pub featured: Option<RawFlag>,
    /// Featured flag under the legacy name.
    pub is_featured: Option<RawFlag>,
    /// Image list.
    pub images: Option<Vec<RawImage>>,
    /// Single-image form used by the oldest endpoints.
    pub image: Option<RawImage>,
    /// Skill question.
    pub question: Option<RawQuestion>,
    /// Entry deadline under its current name.
    pub ends_at: Option<RawTimestamp>,
    /// Entry deadline under the legacy name.
    pub end_date: Option<RawTimestamp>,
}
