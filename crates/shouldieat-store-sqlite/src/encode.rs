//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Contained allergens are
//! stored as compact JSON. UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use shouldieat_core::{
  card::{AllergyCard, CardStatus},
  matcher::ContainAllergen,
  profile::{Severity, UserAllergenEntry},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Severity ────────────────────────────────────────────────────────────────

pub fn encode_severity(s: Severity) -> &'static str {
  match s {
    Severity::Severe => "severe",
    Severity::Moderate => "moderate",
    Severity::Mild => "mild",
  }
}

pub fn decode_severity(s: &str) -> Result<Severity> {
  match s {
    "severe" => Ok(Severity::Severe),
    "moderate" => Ok(Severity::Moderate),
    "mild" => Ok(Severity::Mild),
    other => Err(Error::Decode(format!("unknown severity: {other:?}"))),
  }
}

// ─── CardStatus ──────────────────────────────────────────────────────────────

pub fn encode_status(s: CardStatus) -> &'static str {
  match s {
    CardStatus::Unconfirmed => "unconfirmed",
    CardStatus::Confirmed => "confirmed",
  }
}

pub fn decode_status(s: &str) -> Result<CardStatus> {
  match s {
    "unconfirmed" => Ok(CardStatus::Unconfirmed),
    "confirmed" => Ok(CardStatus::Confirmed),
    other => Err(Error::Decode(format!("unknown card status: {other:?}"))),
  }
}

// ─── Contained allergens ─────────────────────────────────────────────────────

pub fn encode_allergens(allergens: &[ContainAllergen]) -> Result<String> {
  Ok(serde_json::to_string(allergens)?)
}

pub fn decode_allergens(s: &str) -> Result<Vec<ContainAllergen>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `profile_entries` row.
pub struct RawEntry {
  pub item_id:  u32,
  pub severity: String,
}

impl RawEntry {
  /// Decode the row, checking `item_id` against the catalog.
  pub fn into_entry(self) -> Result<UserAllergenEntry> {
    let severity = decode_severity(&self.severity)?;
    Ok(UserAllergenEntry::from_id(self.item_id, severity)?)
  }
}

/// Raw strings read directly from a `cards` row.
pub struct RawCard {
  pub card_id:        String,
  pub food_name:      String,
  pub timestamp:      String,
  pub location:       String,
  pub status:         String,
  pub allergens_json: String,
}

impl RawCard {
  pub fn into_card(self) -> Result<AllergyCard> {
    Ok(AllergyCard {
      id:                  decode_uuid(&self.card_id)?,
      food_name:           self.food_name,
      timestamp:           decode_dt(&self.timestamp)?,
      location:            self.location,
      contained_allergens: decode_allergens(&self.allergens_json)?,
      status:              decode_status(&self.status)?,
    })
  }
}
