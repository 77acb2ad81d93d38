//! The user's personal allergen profile.
//!
//! A profile is an ordered set of catalog items, each tagged with how severe
//! the user's reaction is. An item appears at most once; inserting it again
//! replaces its severity.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::{
  Error,
  catalog::{self, AllergenItem},
};

// ─── Severity ────────────────────────────────────────────────────────────────

/// How strongly the user reacts to an allergen.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Severe,
  #[default]
  Moderate,
  Mild,
}

// ─── UserAllergenEntry ───────────────────────────────────────────────────────

/// A catalog item the user reacts to. Identity is the item alone, so two
/// entries for the same item compare equal whatever their severity.
///
/// Serialises by catalog id; deserialising re-validates the id against the
/// catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "EntryRecord", into = "EntryRecord")]
pub struct UserAllergenEntry {
  pub item:     &'static AllergenItem,
  pub severity: Severity,
}

impl UserAllergenEntry {
  pub fn new(item: &'static AllergenItem, severity: Severity) -> Self {
    Self { item, severity }
  }

  /// Build an entry from a catalog id.
  pub fn from_id(item_id: u32, severity: Severity) -> crate::Result<Self> {
    let item =
      catalog::find_by_id(item_id).ok_or(Error::UnknownAllergenItem(item_id))?;
    Ok(Self::new(item, severity))
  }

  /// Build an entry from a catalog name (case-insensitive).
  pub fn from_name(name: &str, severity: Severity) -> crate::Result<Self> {
    let item = catalog::find_by_name(name)
      .ok_or_else(|| Error::UnknownAllergenName(name.to_owned()))?;
    Ok(Self::new(item, severity))
  }
}

impl PartialEq for UserAllergenEntry {
  fn eq(&self, other: &Self) -> bool { self.item == other.item }
}

impl Eq for UserAllergenEntry {}

/// Stored form of a [`UserAllergenEntry`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EntryRecord {
  pub item_id:  u32,
  pub severity: Severity,
}

impl TryFrom<EntryRecord> for UserAllergenEntry {
  type Error = Error;

  fn try_from(r: EntryRecord) -> Result<Self, Self::Error> {
    Self::from_id(r.item_id, r.severity)
  }
}

impl From<UserAllergenEntry> for EntryRecord {
  fn from(e: UserAllergenEntry) -> Self {
    EntryRecord { item_id: e.item.id, severity: e.severity }
  }
}

// ─── UserProfile ─────────────────────────────────────────────────────────────

/// The set of allergens a user has registered, in the order they were added.
///
/// Serialises as a plain list of entries; a stored list with repeated items
/// collapses on load exactly as repeated [`UserProfile::insert`] calls would.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<UserAllergenEntry>", into = "Vec<UserAllergenEntry>")]
pub struct UserProfile {
  entries: Vec<UserAllergenEntry>,
}

impl UserProfile {
  pub fn new() -> Self { Self::default() }

  /// Build a profile from entries; a later entry for the same item replaces
  /// the earlier one.
  pub fn from_entries(
    entries: impl IntoIterator<Item = UserAllergenEntry>,
  ) -> Self {
    let mut profile = Self::new();
    for entry in entries {
      profile.insert(entry);
    }
    profile
  }

  /// Insert or replace. A replaced entry keeps its position.
  pub fn insert(&mut self, entry: UserAllergenEntry) {
    match self.entries.iter_mut().find(|e| **e == entry) {
      Some(existing) => *existing = entry,
      None => self.entries.push(entry),
    }
  }

  /// Add `item` at the default severity. Returns `false` if it was already
  /// present, in which case the existing severity is kept.
  pub fn add(&mut self, item: &'static AllergenItem) -> bool {
    if self.contains(item.id) {
      return false;
    }
    self.entries.push(UserAllergenEntry::new(item, Severity::default()));
    true
  }

  /// Returns `false` if no entry existed for `item_id`.
  pub fn set_severity(&mut self, item_id: u32, severity: Severity) -> bool {
    match self.entries.iter_mut().find(|e| e.item.id == item_id) {
      Some(entry) => {
        entry.severity = severity;
        true
      }
      None => false,
    }
  }

  /// Returns `true` if an entry was removed.
  pub fn remove(&mut self, item_id: u32) -> bool {
    let before = self.entries.len();
    self.entries.retain(|e| e.item.id != item_id);
    self.entries.len() != before
  }

  pub fn get(&self, item_id: u32) -> Option<&UserAllergenEntry> {
    self.entries.iter().find(|e| e.item.id == item_id)
  }

  pub fn contains(&self, item_id: u32) -> bool { self.get(item_id).is_some() }

  /// Catalog names of every registered item, exactly as the catalog spells
  /// them.
  pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.entries.iter().map(|e| e.item.name)
  }

  pub fn entries(&self) -> &[UserAllergenEntry] { &self.entries }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl From<Vec<UserAllergenEntry>> for UserProfile {
  fn from(entries: Vec<UserAllergenEntry>) -> Self {
    Self::from_entries(entries)
  }
}

impl From<UserProfile> for Vec<UserAllergenEntry> {
  fn from(profile: UserProfile) -> Self { profile.entries }
}
