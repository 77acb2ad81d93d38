//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::HashSet;

use shouldieat_core::{
  card::AllergyCard,
  matcher::ContainAllergen,
  profile::{Severity, UserAllergenEntry, UserProfile},
  store::{CardStore, ProfileStore},
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn entry(name: &str, severity: Severity) -> UserAllergenEntry {
  UserAllergenEntry::from_name(name, severity).unwrap()
}

fn confirmed_card(food: &str, labels: &[&str]) -> AllergyCard {
  let card = AllergyCard::build(
    food,
    "Current location",
    labels.iter().map(|l| ContainAllergen::new(*l)).collect(),
  );
  let keep: HashSet<String> = labels.iter().map(|l| l.to_string()).collect();
  card.confirm_subset(&keep)
}

fn id_severity_pairs(profile: &UserProfile) -> Vec<(u32, Severity)> {
  profile.entries().iter().map(|e| (e.item.id, e.severity)).collect()
}

// ─── Profile ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_loads_empty_profile() {
  let s = store().await;
  let profile = s.load_profile().await.unwrap();
  assert!(profile.is_empty());
}

#[tokio::test]
async fn save_and_load_profile_preserves_order_and_severity() {
  let s = store().await;
  let profile = UserProfile::from_entries([
    entry("Milk", Severity::Severe),
    entry("Peanut", Severity::Mild),
    entry("Shrimp", Severity::Moderate),
  ]);
  s.save_profile(&profile).await.unwrap();

  let loaded = s.load_profile().await.unwrap();
  assert_eq!(loaded.names().collect::<Vec<_>>(), ["Milk", "Peanut", "Shrimp"]);
  assert_eq!(id_severity_pairs(&loaded), id_severity_pairs(&profile));
}

#[tokio::test]
async fn save_profile_replaces_previous_contents() {
  let s = store().await;
  s.save_profile(&UserProfile::from_entries([entry("Milk", Severity::Severe)]))
    .await
    .unwrap();
  s.save_profile(&UserProfile::from_entries([entry("Oat", Severity::Mild)]))
    .await
    .unwrap();

  let loaded = s.load_profile().await.unwrap();
  assert_eq!(loaded.names().collect::<Vec<_>>(), ["Oat"]);
}

#[tokio::test]
async fn upsert_appends_then_replaces_severity_in_place() {
  let s = store().await;
  s.upsert_entry(entry("Milk", Severity::Moderate)).await.unwrap();
  s.upsert_entry(entry("Wheat", Severity::Moderate)).await.unwrap();
  s.upsert_entry(entry("Milk", Severity::Severe)).await.unwrap();

  let loaded = s.load_profile().await.unwrap();
  assert_eq!(loaded.len(), 2);
  assert_eq!(loaded.names().collect::<Vec<_>>(), ["Milk", "Wheat"]);
  assert_eq!(loaded.entries()[0].severity, Severity::Severe);
}

#[tokio::test]
async fn remove_entry_reports_whether_anything_was_removed() {
  let s = store().await;
  let milk = entry("Milk", Severity::Severe);
  s.upsert_entry(milk).await.unwrap();

  assert!(s.remove_entry(milk.item.id).await.unwrap());
  assert!(!s.remove_entry(milk.item.id).await.unwrap());
  assert!(s.load_profile().await.unwrap().is_empty());
}

// ─── Cards ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_cards_is_empty_initially() {
  let s = store().await;
  assert!(s.list_cards().await.unwrap().is_empty());
}

#[tokio::test]
async fn append_and_list_cards_in_order() {
  let s = store().await;
  let first = confirmed_card("Pad Thai", &["Peanut", "Shrimp"]);
  let second = confirmed_card("Caesar salad", &[]);
  s.append_card(&first).await.unwrap();
  s.append_card(&second).await.unwrap();

  let cards = s.list_cards().await.unwrap();
  assert_eq!(cards.len(), 2);
  assert_eq!(cards[0], first);
  assert_eq!(cards[1], second);
  assert!(cards[1].contained_allergens.is_empty());
}

#[tokio::test]
async fn get_card_round_trips_every_field() {
  let s = store().await;
  let card = confirmed_card("Bibimbap", &["Soybean", "Sesame"]);
  s.append_card(&card).await.unwrap();

  let fetched = s.get_card(card.id).await.unwrap().unwrap();
  assert_eq!(fetched, card);
  assert!(fetched.is_confirmed());
}

#[tokio::test]
async fn get_card_missing_returns_none() {
  let s = store().await;
  assert!(s.get_card(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn unconfirmed_card_is_rejected() {
  let s = store().await;
  let card =
    AllergyCard::build("Ramen", "Tokyo", vec![ContainAllergen::new("Egg")]);

  let err = s.append_card(&card).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(shouldieat_core::Error::UnconfirmedCard(id)) if id == card.id
  ));
  assert!(s.list_cards().await.unwrap().is_empty());
}

#[tokio::test]
async fn appending_the_same_card_twice_stores_it_once() {
  let s = store().await;
  let card = confirmed_card("Pho", &["Fish"]);
  assert!(s.append_card(&card).await.unwrap());
  assert!(!s.append_card(&card).await.unwrap());
  assert_eq!(s.list_cards().await.unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_appends_of_one_card_store_it_once() {
  let s = store().await;
  let card = confirmed_card("Pho", &["Fish"]);

  let (a, b) = tokio::join!(s.append_card(&card), s.append_card(&card));
  let mut outcomes = [a.unwrap(), b.unwrap()];
  outcomes.sort();
  assert_eq!(outcomes, [false, true]);
  assert_eq!(s.list_cards().await.unwrap(), [card]);
}
