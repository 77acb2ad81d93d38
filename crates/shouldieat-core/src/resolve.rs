//! Keyword classification of free-text allergen labels into a [`Category`].
//!
//! The rules in [`RULES`] are evaluated top to bottom against the lower-cased
//! input and the first match wins. Several rules overlap, so the table order
//! is part of the contract: the fish rule excludes "shellfish" so that it
//! falls through to mollusks, and the generic "seafood" rule sits below the
//! specific seafood rules.

use crate::category::Category;

/// The category returned when no rule matches.
pub const FALLBACK: Category = Category::Additives;

/// One keyword predicate of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
  /// The rule applies when the input contains any of these substrings...
  pub any_of:   &'static [&'static str],
  /// ...and none of these.
  pub none_of:  &'static [&'static str],
  pub category: Category,
}

impl Rule {
  const fn new(any_of: &'static [&'static str], category: Category) -> Self {
    Self { any_of, none_of: &[], category }
  }

  const fn except(self, none_of: &'static [&'static str]) -> Self {
    Self { none_of, ..self }
  }

  /// Test the rule against an already lower-cased label.
  pub fn matches(&self, lowered: &str) -> bool {
    self.any_of.iter().any(|k| lowered.contains(k))
      && !self.none_of.iter().any(|k| lowered.contains(k))
  }
}

/// The ordered classification table.
pub static RULES: &[Rule] = &[
  // Seafood
  Rule::new(&["crustaceans", "shrimp", "crab"], Category::SeafoodCrustaceans),
  Rule::new(&["fish"], Category::SeafoodFish).except(&["shellfish"]),
  Rule::new(&["mollusks", "shellfish"], Category::SeafoodMollusks),
  // Generic seafood is filed under crustaceans.
  Rule::new(&["seafood"], Category::SeafoodCrustaceans),
  // Grains & Gluten
  Rule::new(&["peanuts"], Category::GrainsGlutenPeanuts),
  Rule::new(&["tree nuts", "nuts"], Category::GrainsGlutenTreeNuts),
  Rule::new(&["soy", "soya"], Category::GrainsGlutenSoy),
  Rule::new(&["legumes", "beans"], Category::GrainsGlutenLegumes),
  Rule::new(&["seeds"], Category::GrainsGlutenSeeds),
  Rule::new(&["grains", "gluten", "cereal"], Category::GrainsGlutenCereal),
  // Dairy
  Rule::new(&["dairy alternatives"], Category::DairyAlternatives),
  Rule::new(&["dairy", "milk"], Category::Dairy),
  // Everything else
  Rule::new(&["meat"], Category::Meat),
  Rule::new(&["fruits"], Category::Fruits),
  Rule::new(&["vegetables"], Category::Vegetables),
  Rule::new(&["spices", "herbs"], Category::SpicesHerbs),
  Rule::new(&["fermented"], Category::FermentedFood),
];

/// Classify `free_text` into a category. Never fails; unmatched input resolves
/// to [`FALLBACK`].
pub fn resolve(free_text: &str) -> Category {
  let lowered = free_text.to_lowercase();
  RULES
    .iter()
    .find(|rule| rule.matches(&lowered))
    .map_or(FALLBACK, |rule| rule.category)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unmatched_input_falls_back_to_additives() {
    assert_eq!(resolve(""), Category::Additives);
    assert_eq!(resolve("xyz-unknown-term"), Category::Additives);
  }

  #[test]
  fn shellfish_is_not_routed_to_fish() {
    assert_eq!(resolve("Shellfish"), Category::SeafoodMollusks);
    assert_eq!(resolve("Fish"), Category::SeafoodFish);
    assert_eq!(resolve("fish sauce"), Category::SeafoodFish);
  }

  #[test]
  fn specific_seafood_beats_generic_seafood() {
    assert_eq!(resolve("Seafood"), Category::SeafoodCrustaceans);
    assert_eq!(resolve("seafood (fish)"), Category::SeafoodFish);
    assert_eq!(resolve("Seafood: shellfish"), Category::SeafoodMollusks);
  }

  #[test]
  fn grain_family_phrases() {
    assert_eq!(resolve("Tree Nuts"), Category::GrainsGlutenTreeNuts);
    assert_eq!(resolve("Peanuts"), Category::GrainsGlutenPeanuts);
    assert_eq!(resolve("Soybeans"), Category::GrainsGlutenSoy);
    assert_eq!(resolve("Kidney beans"), Category::GrainsGlutenLegumes);
    assert_eq!(resolve("Sesame seeds"), Category::GrainsGlutenSeeds);
    assert_eq!(resolve("Gluten"), Category::GrainsGlutenCereal);
  }

  #[test]
  fn singular_names_without_keywords_fall_back() {
    // "peanut" contains neither "peanuts" nor "nuts".
    assert_eq!(resolve("Peanut"), Category::Additives);
    assert_eq!(resolve("Wheat"), Category::Additives);
  }

  #[test]
  fn dairy_alternatives_precede_dairy() {
    assert_eq!(resolve("Dairy alternatives"), Category::DairyAlternatives);
    assert_eq!(resolve("Milk"), Category::Dairy);
    // "almond milk" carries no "dairy alternatives" phrase.
    assert_eq!(resolve("Almond milk"), Category::Dairy);
  }

  #[test]
  fn remaining_groups() {
    assert_eq!(resolve("Red meat"), Category::Meat);
    assert_eq!(resolve("Citrus fruits"), Category::Fruits);
    assert_eq!(resolve("Vegetables"), Category::Vegetables);
    assert_eq!(resolve("Herbs"), Category::SpicesHerbs);
    assert_eq!(resolve("Fermented soybean paste"), Category::GrainsGlutenSoy);
    assert_eq!(resolve("Fermented food"), Category::FermentedFood);
  }

  #[test]
  fn table_order_is_first_match() {
    // Matches both the fish rule and the seafood rule; fish is listed first.
    let hit = RULES.iter().position(|r| r.matches("fish and seafood"));
    assert_eq!(hit, Some(1));
  }
}
