//! The allergen catalog: a fixed reference table of known allergen items.
//!
//! The table is declared once in [`ALLERGEN_ITEMS`]. Every grouping and lookup
//! index is derived from it on first use and never changes afterwards.

use std::{
  collections::{BTreeMap, HashMap},
  hash::{Hash, Hasher},
  sync::LazyLock,
};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::category::{Category, MainCategory};

// ─── Item metadata ───────────────────────────────────────────────────────────

/// How exposure to the allergen typically causes a reaction.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum ReactionType {
  Ingestion,
  #[strum(serialize = "Cross-reaction")]
  CrossReaction,
  Histamine,
  #[strum(serialize = "Ingestion/Contact")]
  IngestionOrContact,
}

/// Population-level risk of the allergen, independent of any one user.
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
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
  High,
  Medium,
  Low,
}

// ─── AllergenItem ────────────────────────────────────────────────────────────

/// One entry of the catalog. Identity is the `id` alone.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AllergenItem {
  pub id:            u32,
  pub name:          &'static str,
  pub category:      Category,
  pub reaction_type: ReactionType,
  pub risk_level:    RiskLevel,
}

impl AllergenItem {
  const fn new(
    id: u32,
    name: &'static str,
    category: Category,
    reaction_type: ReactionType,
    risk_level: RiskLevel,
  ) -> Self {
    Self { id, name, category, reaction_type, risk_level }
  }

  pub fn main_category(&self) -> MainCategory { self.category.main_category() }
}

impl PartialEq for AllergenItem {
  fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl Eq for AllergenItem {}

impl Hash for AllergenItem {
  fn hash<H: Hasher>(&self, state: &mut H) { self.id.hash(state); }
}

// ─── Table ───────────────────────────────────────────────────────────────────

use Category as C;
use ReactionType::{CrossReaction, Histamine, Ingestion, IngestionOrContact};
use RiskLevel::{High, Low, Medium};

/// The canonical table in declaration order. Ids are stable and never reused.
pub static ALLERGEN_ITEMS: [AllergenItem; 67] = [
  // Seafood - Crustaceans
  AllergenItem::new(1, "Crab", C::SeafoodCrustaceans, Ingestion, High),
  AllergenItem::new(2, "Lobster", C::SeafoodCrustaceans, Ingestion, High),
  AllergenItem::new(3, "Shrimp", C::SeafoodCrustaceans, Ingestion, High),
  // Seafood - Fish
  AllergenItem::new(4, "Anchovy", C::SeafoodFish, Ingestion, Medium),
  AllergenItem::new(5, "Cod", C::SeafoodFish, Ingestion, High),
  AllergenItem::new(6, "Mackerel", C::SeafoodFish, Ingestion, High),
  AllergenItem::new(7, "Salmon", C::SeafoodFish, Ingestion, High),
  AllergenItem::new(8, "Tuna", C::SeafoodFish, Ingestion, High),
  // Seafood - Mollusks
  AllergenItem::new(9, "Abalone", C::SeafoodMollusks, Ingestion, Medium),
  AllergenItem::new(10, "Clam", C::SeafoodMollusks, Ingestion, Medium),
  AllergenItem::new(11, "Mussel", C::SeafoodMollusks, Ingestion, Medium),
  AllergenItem::new(12, "Oyster", C::SeafoodMollusks, Ingestion, Medium),
  AllergenItem::new(13, "Snail", C::SeafoodMollusks, Ingestion, Medium),
  AllergenItem::new(14, "Squid", C::SeafoodMollusks, Ingestion, Medium),
  // Meat
  AllergenItem::new(15, "Beef", C::Meat, Ingestion, Low),
  AllergenItem::new(16, "Chicken", C::Meat, Ingestion, Low),
  AllergenItem::new(17, "Lamb", C::Meat, Ingestion, Low),
  AllergenItem::new(18, "Pork", C::Meat, Ingestion, Low),
  // Fruits
  AllergenItem::new(19, "Apple", C::Fruits, CrossReaction, Medium),
  AllergenItem::new(20, "Banana", C::Fruits, CrossReaction, Medium),
  AllergenItem::new(21, "Cherry", C::Fruits, CrossReaction, Medium),
  AllergenItem::new(22, "Kiwi", C::Fruits, CrossReaction, Medium),
  AllergenItem::new(23, "Peach", C::Fruits, CrossReaction, Medium),
  AllergenItem::new(24, "Persimmon", C::Fruits, Ingestion, Low),
  AllergenItem::new(25, "Strawberry", C::Fruits, CrossReaction, Medium),
  // Vegetables
  AllergenItem::new(26, "Bracken", C::Vegetables, Ingestion, Low),
  AllergenItem::new(27, "Burdock", C::Vegetables, Ingestion, Low),
  AllergenItem::new(28, "Celery", C::Vegetables, Ingestion, Medium),
  AllergenItem::new(29, "Eggplant", C::Vegetables, Ingestion, Low),
  AllergenItem::new(30, "Lotus root", C::Vegetables, Ingestion, Low),
  AllergenItem::new(31, "Perilla leaf", C::Vegetables, Ingestion, Medium),
  AllergenItem::new(32, "Tomato", C::Vegetables, Ingestion, Low),
  // Grains & Gluten - Cereal grains
  AllergenItem::new(33, "Barley", C::GrainsGlutenCereal, Ingestion, Low),
  AllergenItem::new(34, "Buckwheat", C::GrainsGlutenCereal, Ingestion, Medium),
  AllergenItem::new(35, "Corn", C::GrainsGlutenCereal, Ingestion, Low),
  AllergenItem::new(36, "Oat", C::GrainsGlutenCereal, Ingestion, Low),
  AllergenItem::new(37, "Rice", C::GrainsGlutenCereal, Ingestion, Low),
  AllergenItem::new(38, "Rye", C::GrainsGlutenCereal, Ingestion, Low),
  AllergenItem::new(39, "Wheat", C::GrainsGlutenCereal, Ingestion, High),
  // Grains & Gluten - Legumes
  AllergenItem::new(40, "Lupin", C::GrainsGlutenLegumes, Ingestion, Medium),
  // Grains & Gluten - Peanuts
  AllergenItem::new(41, "Peanut", C::GrainsGlutenPeanuts, Ingestion, High),
  // Grains & Gluten - Seeds
  AllergenItem::new(42, "Sesame", C::GrainsGlutenSeeds, Ingestion, High),
  // Grains & Gluten - Tree nuts
  AllergenItem::new(43, "Almond", C::GrainsGlutenTreeNuts, Ingestion, High),
  AllergenItem::new(44, "Brazil nut", C::GrainsGlutenTreeNuts, Ingestion, High),
  AllergenItem::new(45, "Cashew", C::GrainsGlutenTreeNuts, Ingestion, High),
  AllergenItem::new(46, "Hazelnut", C::GrainsGlutenTreeNuts, Ingestion, High),
  AllergenItem::new(47, "Macadamia", C::GrainsGlutenTreeNuts, Ingestion, High),
  AllergenItem::new(48, "Pecan", C::GrainsGlutenTreeNuts, Ingestion, High),
  AllergenItem::new(49, "Pine nut", C::GrainsGlutenTreeNuts, Ingestion, High),
  AllergenItem::new(50, "Pistachio", C::GrainsGlutenTreeNuts, Ingestion, High),
  AllergenItem::new(51, "Walnut", C::GrainsGlutenTreeNuts, Ingestion, High),
  // Grains & Gluten - Soy
  AllergenItem::new(52, "Soybean", C::GrainsGlutenSoy, Ingestion, High),
  // Dairy Alternatives
  AllergenItem::new(53, "Almond milk", C::DairyAlternatives, Ingestion, Low),
  AllergenItem::new(54, "Coconut milk", C::DairyAlternatives, Ingestion, Low),
  AllergenItem::new(55, "Oat milk", C::DairyAlternatives, Ingestion, Low),
  // Additives
  AllergenItem::new(56, "Carmine (cochineal)", C::Additives, Ingestion, Medium),
  AllergenItem::new(57, "Gelatin", C::Additives, Ingestion, Medium),
  AllergenItem::new(58, "Sulfite", C::Additives, Ingestion, Medium),
  AllergenItem::new(59, "Stevia", C::Additives, Ingestion, Low),
  // Spices/Herbs
  AllergenItem::new(60, "Basil", C::SpicesHerbs, IngestionOrContact, Low),
  AllergenItem::new(61, "Cinnamon", C::SpicesHerbs, IngestionOrContact, Low),
  AllergenItem::new(62, "Coriander", C::SpicesHerbs, IngestionOrContact, Low),
  AllergenItem::new(63, "Ginger", C::SpicesHerbs, IngestionOrContact, Low),
  AllergenItem::new(64, "Mustard", C::SpicesHerbs, Ingestion, Medium),
  AllergenItem::new(65, "Rosemary", C::SpicesHerbs, IngestionOrContact, Low),
  // Fermented food
  AllergenItem::new(66, "Kimchi", C::FermentedFood, Histamine, Low),
  // Dairy
  AllergenItem::new(67, "Milk", C::Dairy, Ingestion, High),
];

// ─── Derived indexes ─────────────────────────────────────────────────────────

type Group = Vec<&'static AllergenItem>;

static BY_ID: LazyLock<HashMap<u32, &'static AllergenItem>> =
  LazyLock::new(|| ALLERGEN_ITEMS.iter().map(|i| (i.id, i)).collect());

static BY_LOWER_NAME: LazyLock<HashMap<String, &'static AllergenItem>> =
  LazyLock::new(|| {
    ALLERGEN_ITEMS
      .iter()
      .map(|i| (i.name.to_lowercase(), i))
      .collect()
  });

static BY_CATEGORY: LazyLock<HashMap<Category, Group>> = LazyLock::new(|| {
  let mut groups: HashMap<Category, Group> = HashMap::new();
  for item in &ALLERGEN_ITEMS {
    groups.entry(item.category).or_default().push(item);
  }
  groups
});

static BY_MAIN_CATEGORY: LazyLock<BTreeMap<MainCategory, Group>> =
  LazyLock::new(|| {
    let mut groups: BTreeMap<MainCategory, Group> = BTreeMap::new();
    for item in &ALLERGEN_ITEMS {
      groups.entry(item.main_category()).or_default().push(item);
    }
    groups
  });

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Every catalog item in declaration order.
pub fn all_items() -> &'static [AllergenItem] { &ALLERGEN_ITEMS }

pub fn find_by_id(id: u32) -> Option<&'static AllergenItem> {
  BY_ID.get(&id).copied()
}

/// Case-insensitive exact name lookup. `None` is an ordinary outcome.
pub fn find_by_name(name: &str) -> Option<&'static AllergenItem> {
  BY_LOWER_NAME.get(&name.to_lowercase()).copied()
}

/// Items of one fine category, in declaration order.
pub fn items_by_category(
  category: Category,
) -> &'static [&'static AllergenItem] {
  BY_CATEGORY.get(&category).map(Vec::as_slice).unwrap_or(&[])
}

/// Items of one main category, in declaration order.
pub fn items_in_main_category(
  main: MainCategory,
) -> &'static [&'static AllergenItem] {
  BY_MAIN_CATEGORY.get(&main).map(Vec::as_slice).unwrap_or(&[])
}

/// Items of the main category with display name `main` (ASCII
/// case-insensitive). An unrecognised name yields an empty slice.
pub fn items_by_main_category(main: &str) -> &'static [&'static AllergenItem] {
  MainCategory::from_name(main)
    .map(items_in_main_category)
    .unwrap_or(&[])
}

/// Main categories that have at least one item, in declaration order.
pub fn main_categories() -> Vec<MainCategory> {
  BY_MAIN_CATEGORY.keys().copied().collect()
}

/// Case-insensitive substring search over item names. An empty query matches
/// nothing.
pub fn search(query: &str) -> Vec<&'static AllergenItem> {
  if query.is_empty() {
    return Vec::new();
  }
  let needle = query.to_lowercase();
  ALLERGEN_ITEMS
    .iter()
    .filter(|item| item.name.to_lowercase().contains(&needle))
    .collect()
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn ids_and_names_are_unique() {
    let ids: HashSet<_> = ALLERGEN_ITEMS.iter().map(|i| i.id).collect();
    let names: HashSet<_> =
      ALLERGEN_ITEMS.iter().map(|i| i.name.to_lowercase()).collect();
    assert_eq!(ids.len(), ALLERGEN_ITEMS.len());
    assert_eq!(names.len(), ALLERGEN_ITEMS.len());
  }

  #[test]
  fn find_by_name_ignores_case() {
    let item = find_by_name("pEaNuT").unwrap();
    assert_eq!(item.id, 41);
    assert_eq!(item.category, Category::GrainsGlutenPeanuts);
    assert_eq!(find_by_name("Lotus Root").unwrap().name, "Lotus root");
  }

  #[test]
  fn find_by_name_miss_is_none() {
    assert!(find_by_name("Durian").is_none());
    assert!(find_by_name("").is_none());
  }

  #[test]
  fn find_by_id_roundtrips_every_item() {
    for item in all_items() {
      assert_eq!(find_by_id(item.id).unwrap().name, item.name);
    }
    assert!(find_by_id(0).is_none());
    assert!(find_by_id(68).is_none());
  }

  #[test]
  fn category_groups_preserve_declaration_order() {
    let names: Vec<_> = items_by_category(Category::SeafoodCrustaceans)
      .iter()
      .map(|i| i.name)
      .collect();
    assert_eq!(names, ["Crab", "Lobster", "Shrimp"]);
  }

  #[test]
  fn every_item_is_grouped_once() {
    let by_category: usize =
      Category::iter().map(|c| items_by_category(c).len()).sum();
    let by_main: usize = MainCategory::iter()
      .map(|m| items_in_main_category(m).len())
      .sum();
    assert_eq!(by_category, ALLERGEN_ITEMS.len());
    assert_eq!(by_main, ALLERGEN_ITEMS.len());
  }

  #[test]
  fn main_category_lookup_by_display_name() {
    let seafood = items_by_main_category("Seafood");
    assert_eq!(seafood.len(), 14);
    assert_eq!(seafood[0].name, "Crab");
    assert_eq!(seafood[13].name, "Squid");

    assert_eq!(items_by_main_category("grains & gluten").len(), 20);
    assert!(items_by_main_category("Sweets").is_empty());
  }

  #[test]
  fn main_categories_follow_declaration_order() {
    let mains = main_categories();
    assert_eq!(mains.first(), Some(&MainCategory::Seafood));
    assert_eq!(mains.last(), Some(&MainCategory::Dairy));
    assert_eq!(mains.len(), 10);
  }

  #[test]
  fn search_is_substring_and_case_insensitive() {
    let names: Vec<_> = search("MILK").iter().map(|i| i.name).collect();
    assert_eq!(names, ["Almond milk", "Coconut milk", "Oat milk", "Milk"]);
    assert!(search("").is_empty());
    assert!(search("zzz").is_empty());
  }

  #[test]
  fn equality_is_by_id() {
    let a = *find_by_id(67).unwrap();
    let b = AllergenItem { risk_level: RiskLevel::Low, ..a };
    assert_eq!(a, b);
  }
}
