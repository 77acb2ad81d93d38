//! The `ProfileStore` and `CardStore` traits.
//!
//! Both are implemented by storage backends (e.g. `shouldieat-store-sqlite`)
//! and passed explicitly to whatever needs persistence. Higher layers depend
//! on these abstractions, not on a concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  card::AllergyCard,
  profile::{UserAllergenEntry, UserProfile},
};

// ─── Profiles ────────────────────────────────────────────────────────────────

/// Durable storage for the user's allergen profile.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ProfileStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Load the stored profile. An empty profile is returned when nothing has
  /// been stored yet. Stored entries are re-validated against the catalog.
  fn load_profile(
    &self,
  ) -> impl Future<Output = Result<UserProfile, Self::Error>> + Send + '_;

  /// Replace the stored profile wholesale.
  fn save_profile<'a>(
    &'a self,
    profile: &'a UserProfile,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Insert an entry, or replace the severity of an existing entry for the
  /// same item.
  fn upsert_entry(
    &self,
    entry: UserAllergenEntry,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove the entry for `item_id`. Returns `false` if there was none.
  fn remove_entry(
    &self,
    item_id: u32,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Cards ───────────────────────────────────────────────────────────────────

/// Append-only storage for confirmed allergy cards.
///
/// There are no update or delete operations.
pub trait CardStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append a card. Cards that have not been through
  /// [`AllergyCard::confirm_subset`] are rejected. Returns `false`, storing
  /// nothing, when a card with the same id is already stored; of several
  /// concurrent appends of one card exactly one returns `true`.
  fn append_card<'a>(
    &'a self,
    card: &'a AllergyCard,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Every stored card, in the order appended. Empty when none exist.
  fn list_cards(
    &self,
  ) -> impl Future<Output = Result<Vec<AllergyCard>, Self::Error>> + Send + '_;

  /// Retrieve one card by id. Returns `None` if not found.
  fn get_card(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<AllergyCard>, Self::Error>>
  + Send
  + '_;
}
