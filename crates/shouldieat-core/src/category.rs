//! Fine-grained allergen categories and their coarse main groupings.
//!
//! Every [`Category`] belongs to exactly one [`MainCategory`]. The mapping is
//! a plain `match`, so it is total by construction.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

// ─── Category ────────────────────────────────────────────────────────────────

/// A fine-grained catalog category. The display form (`label`) is the
/// reference string shown to users, e.g. `"Seafood - Crustaceans"`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
  #[strum(serialize = "Seafood - Crustaceans")]
  SeafoodCrustaceans,
  #[strum(serialize = "Seafood - Fish")]
  SeafoodFish,
  #[strum(serialize = "Seafood - Mollusks")]
  SeafoodMollusks,
  #[strum(serialize = "Meat")]
  Meat,
  #[strum(serialize = "Fruits")]
  Fruits,
  #[strum(serialize = "Vegetables")]
  Vegetables,
  #[strum(serialize = "Grains & Gluten - Cereal grains")]
  GrainsGlutenCereal,
  #[strum(serialize = "Grains & Gluten - Legumes")]
  GrainsGlutenLegumes,
  #[strum(serialize = "Grains & Gluten - Peanuts")]
  GrainsGlutenPeanuts,
  #[strum(serialize = "Grains & Gluten - Seeds")]
  GrainsGlutenSeeds,
  #[strum(serialize = "Grains & Gluten - Tree nuts")]
  GrainsGlutenTreeNuts,
  #[strum(serialize = "Grains & Gluten - Soy")]
  GrainsGlutenSoy,
  #[strum(serialize = "Dairy Alternatives")]
  DairyAlternatives,
  #[strum(serialize = "Additives")]
  Additives,
  #[strum(serialize = "Spices/Herbs")]
  SpicesHerbs,
  #[strum(serialize = "Fermented food")]
  FermentedFood,
  #[strum(serialize = "Dairy")]
  Dairy,
}

impl Category {
  /// The user-facing label, e.g. `"Grains & Gluten - Soy"`.
  pub fn label(self) -> &'static str { self.into() }

  /// The coarse grouping this category belongs to.
  pub fn main_category(self) -> MainCategory {
    match self {
      Self::SeafoodCrustaceans | Self::SeafoodFish | Self::SeafoodMollusks => {
        MainCategory::Seafood
      }
      Self::Meat => MainCategory::Meat,
      Self::Fruits => MainCategory::Fruits,
      Self::Vegetables => MainCategory::Vegetables,
      Self::GrainsGlutenCereal
      | Self::GrainsGlutenLegumes
      | Self::GrainsGlutenPeanuts
      | Self::GrainsGlutenSeeds
      | Self::GrainsGlutenTreeNuts
      | Self::GrainsGlutenSoy => MainCategory::GrainsGluten,
      Self::DairyAlternatives => MainCategory::DairyAlternatives,
      Self::Additives => MainCategory::Additives,
      Self::SpicesHerbs => MainCategory::SpicesHerbs,
      Self::FermentedFood => MainCategory::FermentedFood,
      Self::Dairy => MainCategory::Dairy,
    }
  }

  /// The short name within the main category, e.g. `"Crustaceans"`.
  pub fn sub_category(self) -> &'static str {
    match self {
      Self::SeafoodCrustaceans => "Crustaceans",
      Self::SeafoodFish => "Fish",
      Self::SeafoodMollusks => "Mollusks",
      Self::Meat => "Meat",
      Self::Fruits => "Fruits",
      Self::Vegetables => "Vegetables",
      Self::GrainsGlutenCereal => "Cereal grains",
      Self::GrainsGlutenLegumes => "Legumes",
      Self::GrainsGlutenPeanuts => "Peanuts",
      Self::GrainsGlutenSeeds => "Seeds",
      Self::GrainsGlutenTreeNuts => "Tree nuts",
      Self::GrainsGlutenSoy => "Soy",
      Self::DairyAlternatives => "Alternative Milk",
      Self::Additives => "Additives",
      Self::SpicesHerbs => "Spices",
      Self::FermentedFood => "Fermented food",
      Self::Dairy => "Dairy",
    }
  }
}

// ─── MainCategory ────────────────────────────────────────────────────────────

/// A coarse grouping of categories, used to lay out the allergen picker.
///
/// Parsing via [`std::str::FromStr`] accepts the display name in any ASCII
/// case, e.g. `"grains & gluten"`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum MainCategory {
  #[strum(serialize = "Seafood")]
  Seafood,
  #[strum(serialize = "Meat")]
  Meat,
  #[strum(serialize = "Fruits")]
  Fruits,
  #[strum(serialize = "Vegetables")]
  Vegetables,
  #[strum(serialize = "Grains & Gluten")]
  GrainsGluten,
  #[strum(serialize = "Dairy Alternatives")]
  DairyAlternatives,
  #[strum(serialize = "Additives")]
  Additives,
  #[strum(serialize = "Spices/Herbs")]
  SpicesHerbs,
  #[strum(serialize = "Fermented food")]
  FermentedFood,
  #[strum(serialize = "Dairy")]
  Dairy,
}

impl MainCategory {
  pub fn name(self) -> &'static str { self.into() }

  /// Parse a display name such as `"grains & gluten"` (ASCII
  /// case-insensitive, surrounding whitespace ignored).
  pub fn from_name(name: &str) -> crate::Result<Self> {
    name
      .trim()
      .parse()
      .map_err(|_| crate::Error::UnknownMainCategory(name.to_owned()))
  }
}
