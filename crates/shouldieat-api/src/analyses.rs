//! Handlers that turn recognizer output into an unconfirmed allergy card.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/analyses` | Body: `{"food_name":"Pad Thai","warnings":["Peanut"]}` |
//! | `POST` | `/analyses/reply` | Body: `{"reply":"<raw model text>"}`; 422 if unparseable |
//!
//! Neither endpoint persists anything. The returned card is confirmed and
//! stored through `POST /cards/confirm`.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shouldieat_core::{
  card::AllergyCard,
  matcher::match_warnings_with,
  store::{CardStore, ProfileStore},
};

use crate::{ApiState, error::ApiError, recognition::RecognitionReply};

async fn analyse<S>(
  state: &ApiState<S>,
  food_name: String,
  location: Option<String>,
  warnings: &[String],
) -> Result<AllergyCard, ApiError>
where
  S: ProfileStore + CardStore,
{
  let profile = state
    .store
    .load_profile()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let matched = match_warnings_with(warnings, &profile, state.options);
  tracing::debug!(
    warnings = warnings.len(),
    matched = matched.len(),
    "matched warnings against profile"
  );

  let location = location
    .filter(|l| !l.trim().is_empty())
    .unwrap_or_else(|| state.default_location.to_string());
  Ok(AllergyCard::build(food_name, location, matched))
}

// ─── From warnings ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalysisBody {
  pub food_name: String,
  pub location:  Option<String>,
  #[serde(default)]
  pub warnings:  Vec<String>,
}

/// `POST /analyses`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<AnalysisBody>,
) -> Result<Json<AllergyCard>, ApiError>
where
  S: ProfileStore + CardStore,
{
  let card =
    analyse(&state, body.food_name, body.location, &body.warnings).await?;
  Ok(Json(card))
}

// ─── From a raw reply ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReplyBody {
  pub reply:    String,
  pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReplyAnalysis {
  pub card:               AllergyCard,
  pub detected_items:     Vec<String>,
  pub ingredient_summary: String,
}

/// `POST /analyses/reply`
pub async fn from_reply<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<ReplyBody>,
) -> Result<Json<ReplyAnalysis>, ApiError>
where
  S: ProfileStore + CardStore,
{
  let reply = RecognitionReply::parse(&body.reply)?;
  let ingredient_summary = reply.ingredient_summary();
  let card = analyse(
    &state,
    reply.food_name,
    body.location,
    &reply.allergy_warnings,
  )
  .await?;

  Ok(Json(ReplyAnalysis {
    card,
    detected_items: reply.detected_items,
    ingredient_summary,
  }))
}
