//! [`SqliteStore`], the SQLite implementation of [`ProfileStore`] and
//! [`CardStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use shouldieat_core::{
  card::AllergyCard,
  profile::{UserAllergenEntry, UserProfile},
  store::{CardStore, ProfileStore},
};

use crate::{
  Error, Result,
  encode::{
    RawCard, RawEntry, encode_allergens, encode_dt, encode_severity,
    encode_status, encode_uuid,
  },
  schema::SCHEMA,
};

const CARD_COLUMNS: &str =
  "card_id, food_name, timestamp, location, status, allergens_json";

fn raw_card(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawCard> {
  Ok(RawCard {
    card_id:        row.get(0)?,
    food_name:      row.get(1)?,
    timestamp:      row.get(2)?,
    location:       row.get(3)?,
    status:         row.get(4)?,
    allergens_json: row.get(5)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A profile and card store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ProfileStore impl ───────────────────────────────────────────────────────

impl ProfileStore for SqliteStore {
  type Error = Error;

  async fn load_profile(&self) -> Result<UserProfile> {
    let raws: Vec<RawEntry> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT item_id, severity FROM profile_entries ORDER BY position",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawEntry { item_id: row.get(0)?, severity: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let entries = raws
      .into_iter()
      .map(RawEntry::into_entry)
      .collect::<Result<Vec<_>>>()?;
    Ok(UserProfile::from_entries(entries))
  }

  async fn save_profile(&self, profile: &UserProfile) -> Result<()> {
    let at_str = encode_dt(Utc::now());
    let rows: Vec<(u32, &'static str)> = profile
      .entries()
      .iter()
      .map(|e| (e.item.id, encode_severity(e.severity)))
      .collect();
    let count = rows.len();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM profile_entries", [])?;
        for (position, (item_id, severity)) in rows.into_iter().enumerate() {
          tx.execute(
            "INSERT INTO profile_entries (
               item_id, severity, position, recorded_at
             ) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![item_id, severity, position as i64, at_str],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::debug!(entries = count, "saved allergen profile");
    Ok(())
  }

  async fn upsert_entry(&self, entry: UserAllergenEntry) -> Result<()> {
    let item_id      = entry.item.id;
    let severity_str = encode_severity(entry.severity);
    let at_str       = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO profile_entries (
             item_id, severity, position, recorded_at
           ) VALUES (
             ?1, ?2,
             (SELECT COALESCE(MAX(position), -1) + 1 FROM profile_entries),
             ?3
           )
           ON CONFLICT(item_id) DO UPDATE SET severity = excluded.severity",
          rusqlite::params![item_id, severity_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(item_id, severity = severity_str, "upserted profile entry");
    Ok(())
  }

  async fn remove_entry(&self, item_id: u32) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM profile_entries WHERE item_id = ?1",
          rusqlite::params![item_id],
        )?;
        Ok(n > 0)
      })
      .await?;
    Ok(removed)
  }
}

// ─── CardStore impl ──────────────────────────────────────────────────────────

impl CardStore for SqliteStore {
  type Error = Error;

  async fn append_card(&self, card: &AllergyCard) -> Result<bool> {
    card.ensure_confirmed()?;

    let id_str        = encode_uuid(card.id);
    let food_name     = card.food_name.clone();
    let timestamp_str = encode_dt(card.timestamp);
    let location      = card.location.clone();
    let status_str    = encode_status(card.status);
    let allergens_str = encode_allergens(&card.contained_allergens)?;

    // Duplicate detection happens inside the insert itself.
    let inserted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "INSERT INTO cards (
             card_id, food_name, timestamp, location, status, allergens_json
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
           ON CONFLICT(card_id) DO NOTHING",
          rusqlite::params![
            id_str,
            food_name,
            timestamp_str,
            location,
            status_str,
            allergens_str,
          ],
        )?;
        Ok(n > 0)
      })
      .await?;
    if !inserted {
      tracing::debug!(card_id = %card.id, "card already stored");
      return Ok(false);
    }

    tracing::info!(
      card_id = %card.id,
      allergens = card.contained_allergens.len(),
      "appended allergy card"
    );
    Ok(true)
  }

  async fn list_cards(&self) -> Result<Vec<AllergyCard>> {
    let raws: Vec<RawCard> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {CARD_COLUMNS} FROM cards ORDER BY seq"))?;
        let rows = stmt
          .query_map([], raw_card)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCard::into_card).collect()
  }

  async fn get_card(&self, id: Uuid) -> Result<Option<AllergyCard>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawCard> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CARD_COLUMNS} FROM cards WHERE card_id = ?1"),
              rusqlite::params![id_str],
              raw_card,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCard::into_card).transpose()
  }
}
