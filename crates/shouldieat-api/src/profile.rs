//! Handlers for the user's allergen profile.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/profile` | Entries in registration order |
//! | `PUT`    | `/profile/allergens` | Body: `{"name":"Milk","severity":"severe"}` or `{"item_id":67}` |
//! | `DELETE` | `/profile/allergens/{item_id}` | 404 if the item was not registered |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use serde::{Deserialize, Serialize};
use shouldieat_core::{
  catalog::AllergenItem,
  profile::{Severity, UserAllergenEntry, UserProfile},
  store::{CardStore, ProfileStore},
};

use crate::{ApiState, error::ApiError};

/// A profile entry with its catalog item expanded.
#[derive(Debug, Serialize)]
pub struct EntryView {
  pub item:     &'static AllergenItem,
  pub severity: Severity,
}

fn view(profile: &UserProfile) -> Vec<EntryView> {
  profile
    .entries()
    .iter()
    .map(|e| EntryView { item: e.item, severity: e.severity })
    .collect()
}

// ─── Get ─────────────────────────────────────────────────────────────────────

/// `GET /profile`
pub async fn get_profile<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<EntryView>>, ApiError>
where
  S: ProfileStore + CardStore,
{
  let profile = state
    .store
    .load_profile()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(view(&profile)))
}

// ─── Upsert ──────────────────────────────────────────────────────────────────

/// Identifies a catalog item by name (case-insensitive) or by id.
#[derive(Debug, Deserialize)]
pub struct UpsertBody {
  pub name:     Option<String>,
  pub item_id:  Option<u32>,
  #[serde(default)]
  pub severity: Severity,
}

impl UpsertBody {
  fn into_entry(self) -> Result<UserAllergenEntry, ApiError> {
    let entry = match (self.name, self.item_id) {
      (Some(name), None) => UserAllergenEntry::from_name(&name, self.severity),
      (None, Some(id)) => UserAllergenEntry::from_id(id, self.severity),
      _ => {
        return Err(ApiError::BadRequest(
          "exactly one of `name` or `item_id` is required".into(),
        ));
      }
    };
    entry.map_err(|e| ApiError::NotFound(e.to_string()))
  }
}

/// `PUT /profile/allergens`: insert, or replace the severity of an existing
/// entry. Responds with the updated profile.
pub async fn upsert_allergen<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<UpsertBody>,
) -> Result<Json<Vec<EntryView>>, ApiError>
where
  S: ProfileStore + CardStore,
{
  let entry = body.into_entry()?;
  state
    .store
    .upsert_entry(entry)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  tracing::info!(
    item = entry.item.name,
    severity = %entry.severity,
    "profile entry saved"
  );

  let profile = state
    .store
    .load_profile()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(view(&profile)))
}

// ─── Remove ──────────────────────────────────────────────────────────────────

/// `DELETE /profile/allergens/{item_id}`
pub async fn remove_allergen<S>(
  State(state): State<ApiState<S>>,
  Path(item_id): Path<u32>,
) -> Result<StatusCode, ApiError>
where
  S: ProfileStore + CardStore,
{
  let removed = state
    .store
    .remove_entry(item_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !removed {
    return Err(ApiError::NotFound(format!(
      "item {item_id} is not in the profile"
    )));
  }
  tracing::info!(item_id, "profile entry removed");
  Ok(StatusCode::NO_CONTENT)
}
