//! Handlers for `/cards` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/cards/confirm` | Body: `{"card":{..},"confirmed_labels":["Peanut"]}` |
//! | `GET`  | `/cards` | Append order |
//! | `GET`  | `/cards/{id}` | 404 if not found |

use std::collections::HashSet;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use shouldieat_core::{
  card::AllergyCard,
  store::{CardStore, ProfileStore},
};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── Confirm ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ConfirmBody {
  pub card:             AllergyCard,
  /// An empty list records the dish as confirmed safe.
  #[serde(default)]
  pub confirmed_labels: HashSet<String>,
}

/// `POST /cards/confirm`: reduce the card to the confirmed labels and append
/// it to the history.
pub async fn confirm<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<ConfirmBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ProfileStore + CardStore,
{
  if body.card.is_confirmed() {
    return Err(ApiError::BadRequest(format!(
      "card {} has already been confirmed",
      body.card.id
    )));
  }

  let confirmed = body.card.confirm_subset(&body.confirmed_labels);
  let appended = state
    .store
    .append_card(&confirmed)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !appended {
    return Err(ApiError::BadRequest(format!(
      "card {} has already been confirmed",
      confirmed.id
    )));
  }

  let dropped =
    body.card.contained_allergens.len() - confirmed.contained_allergens.len();
  tracing::info!(
    card_id = %confirmed.id,
    kept = confirmed.contained_allergens.len(),
    dropped,
    "card confirmed"
  );
  Ok((StatusCode::CREATED, Json(confirmed)))
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /cards`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<AllergyCard>>, ApiError>
where
  S: ProfileStore + CardStore,
{
  let cards = state
    .store
    .list_cards()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(cards))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /cards/{id}`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<AllergyCard>, ApiError>
where
  S: ProfileStore + CardStore,
{
  let card = state
    .store
    .get_card(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("card {id} not found")))?;
  Ok(Json(card))
}
