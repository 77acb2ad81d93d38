//! Reduction of recognizer warnings to the allergens relevant to one user.
//!
//! Filtering is exact string membership against the profile's catalog names:
//! the recognizer is asked to answer with canonical catalog names, so no
//! fuzzy matching is attempted here. Each kept warning is still passed through
//! [`resolve`] to attach a display category.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{category::Category, profile::UserProfile, resolve::resolve};

// ─── ContainAllergen ─────────────────────────────────────────────────────────

/// One user-relevant allergen found in a dish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainAllergen {
  /// The warning text as the recognizer produced it.
  pub label:            String,
  pub matched_category: Category,
  /// Starts `true`; only an explicit user edit clears it.
  pub is_confirmed:     bool,
}

impl ContainAllergen {
  pub fn new(label: impl Into<String>) -> Self {
    let label = label.into();
    let matched_category = resolve(&label);
    Self { label, matched_category, is_confirmed: true }
  }

  /// Return a copy with the confirmation flag set to `confirmed`.
  pub fn with_confirmed(self, confirmed: bool) -> Self {
    Self { is_confirmed: confirmed, ..self }
  }
}

// ─── Matching ────────────────────────────────────────────────────────────────

/// Tunables for [`match_warnings_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOptions {
  /// Keep only the first occurrence of each identical warning string. Off by
  /// default, so repeated warnings yield repeated results.
  #[serde(default)]
  pub dedupe_warnings: bool,
}

/// Match `detected_warnings` against `profile` with default options.
pub fn match_warnings<S: AsRef<str>>(
  detected_warnings: &[S],
  profile: &UserProfile,
) -> Vec<ContainAllergen> {
  match_warnings_with(detected_warnings, profile, MatchOptions::default())
}

/// Keep the warnings that name an item in `profile` (case-sensitive, exact),
/// in input order, and attach a resolved category to each.
pub fn match_warnings_with<S: AsRef<str>>(
  detected_warnings: &[S],
  profile: &UserProfile,
  options: MatchOptions,
) -> Vec<ContainAllergen> {
  let names: HashSet<&str> = profile.names().collect();
  if names.is_empty() {
    return Vec::new();
  }

  let mut seen: HashSet<&str> = HashSet::new();
  detected_warnings
    .iter()
    .map(|w| AsRef::<str>::as_ref(w))
    .filter(|w| names.contains(*w))
    .filter(|w| !options.dedupe_warnings || seen.insert(*w))
    .map(ContainAllergen::new)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::profile::{Severity, UserAllergenEntry};

  fn profile(names: &[&str]) -> UserProfile {
    UserProfile::from_entries(
      names
        .iter()
        .map(|n| UserAllergenEntry::from_name(n, Severity::Severe).unwrap()),
    )
  }

  fn labels(matched: &[ContainAllergen]) -> Vec<&str> {
    matched.iter().map(|m| m.label.as_str()).collect()
  }

  #[test]
  fn keeps_profile_items_in_input_order() {
    let registered = profile(&["Milk", "Peanut"]);
    let matched = match_warnings(&["Peanut", "Wheat", "Milk"], &registered);
    assert_eq!(labels(&matched), ["Peanut", "Milk"]);
    assert!(matched.iter().all(|m| m.is_confirmed));
    assert_eq!(matched[1].matched_category, Category::Dairy);
  }

  #[test]
  fn empty_inputs_yield_empty_output() {
    let empty: [&str; 0] = [];
    let nobody = UserProfile::new();
    assert!(match_warnings(&["Peanut", "Milk"], &nobody).is_empty());
    assert!(match_warnings(&empty, &profile(&["Milk"])).is_empty());
  }

  #[test]
  fn membership_is_exact_and_case_sensitive() {
    let warnings = ["milk", "Milk ", "Whole milk", "Milk"];
    let matched = match_warnings(&warnings, &profile(&["Milk"]));
    assert_eq!(labels(&matched), ["Milk"]);
  }

  #[test]
  fn duplicates_are_preserved_by_default() {
    let matched = match_warnings(&["Milk", "Milk"], &profile(&["Milk"]));
    assert_eq!(matched.len(), 2);
  }

  #[test]
  fn duplicates_can_be_collapsed() {
    let options = MatchOptions { dedupe_warnings: true };
    let matched = match_warnings_with(
      &["Milk", "Peanut", "Milk", "Peanut"],
      &profile(&["Milk", "Peanut"]),
      options,
    );
    assert_eq!(labels(&matched), ["Milk", "Peanut"]);
  }

  #[test]
  fn accepts_owned_strings() {
    let warnings = vec!["Shrimp".to_string(), "Salmon".to_string()];
    let matched = match_warnings(&warnings, &profile(&["Shrimp"]));
    assert_eq!(matched[0].matched_category, Category::SeafoodCrustaceans);
  }

  #[test]
  fn category_comes_from_the_resolver() {
    // The catalog files Peanut under peanuts, but the keyword rules do not
    // recognise the singular form.
    let matched = match_warnings(&["Peanut"], &profile(&["Peanut"]));
    assert_eq!(matched[0].matched_category, Category::Additives);
  }

  #[test]
  fn confirmation_flag_can_be_cleared() {
    let flagged = ContainAllergen::new("Milk").with_confirmed(false);
    assert!(!flagged.is_confirmed);
    assert_eq!(flagged.label, "Milk");
  }
}
