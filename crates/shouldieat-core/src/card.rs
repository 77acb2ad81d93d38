//! Allergy cards: dated, located records of one analysed dish.
//!
//! A card is built once from matcher output and is then immutable, with one
//! exception: [`AllergyCard::confirm_subset`] produces a *new* card keeping
//! only the allergens someone confirmed. Only confirmed cards are persisted,
//! and persisted cards are never updated or deleted.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, matcher::ContainAllergen};

/// Where a card is in its (one-way) lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
  /// Freshly built from matcher output.
  #[default]
  Unconfirmed,
  /// Reduced to a confirmed subset; eligible for persistence.
  Confirmed,
}

/// A record of one dish and the user-relevant allergens found in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllergyCard {
  pub id:                  Uuid,
  pub food_name:           String,
  /// When the analysis completed; set once by [`AllergyCard::build`].
  pub timestamp:           DateTime<Utc>,
  pub location:            String,
  pub contained_allergens: Vec<ContainAllergen>,
  #[serde(default)]
  pub status:              CardStatus,
}

impl AllergyCard {
  /// Stamp a fresh identity and the current time onto matcher output. Inputs
  /// are copied verbatim and order is preserved.
  pub fn build(
    food_name: impl Into<String>,
    location: impl Into<String>,
    matched: Vec<ContainAllergen>,
  ) -> Self {
    Self {
      id:                  Uuid::new_v4(),
      food_name:           food_name.into(),
      timestamp:           Utc::now(),
      location:            location.into(),
      contained_allergens: matched,
      status:              CardStatus::Unconfirmed,
    }
  }

  /// Return a confirmed copy that keeps only allergens whose label is in
  /// `confirmed_labels`. An empty set yields a card with no allergens, which
  /// records the dish as confirmed safe. `self` is left untouched.
  pub fn confirm_subset(&self, confirmed_labels: &HashSet<String>) -> Self {
    Self {
      contained_allergens: self
        .contained_allergens
        .iter()
        .filter(|a| confirmed_labels.contains(&a.label))
        .cloned()
        .collect(),
      status: CardStatus::Confirmed,
      ..self.clone()
    }
  }

  pub fn is_confirmed(&self) -> bool { self.status == CardStatus::Confirmed }

  /// Fail with [`Error::UnconfirmedCard`] unless the card may be persisted.
  pub fn ensure_confirmed(&self) -> crate::Result<()> {
    if self.is_confirmed() {
      Ok(())
    } else {
      Err(Error::UnconfirmedCard(self.id))
    }
  }

  /// Labels of the contained allergens, in card order.
  pub fn labels(&self) -> impl Iterator<Item = &str> {
    self.contained_allergens.iter().map(|a| a.label.as_str())
  }
}
