//! Handler for `POST /checklist`.
//!
//! Builds the staff-facing checklist for an unconfirmed card. Clients call it
//! once without translations to learn which strings to translate, then again
//! with the engine's responses to get rendered text.

use axum::Json;
use serde::{Deserialize, Serialize};
use shouldieat_core::{
  card::AllergyCard,
  checklist::{
    ChecklistTranslation, RenderedChecklist, StaffChecklist, StaffLanguage,
    TranslationRequest,
  },
};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct TranslationResponse {
  pub client_id:   String,
  pub target_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ChecklistBody {
  pub card:      AllergyCard,
  pub language:  Option<StaffLanguage>,
  #[serde(default)]
  pub responses: Vec<TranslationResponse>,
}

#[derive(Debug, Serialize)]
pub struct ChecklistView {
  pub translation_requests: Vec<TranslationRequest>,
  pub rendered:             RenderedChecklist,
}

/// `POST /checklist`
pub async fn handler(
  Json(body): Json<ChecklistBody>,
) -> Result<Json<ChecklistView>, ApiError> {
  if body.card.is_confirmed() {
    return Err(ApiError::BadRequest(format!(
      "card {} is already confirmed",
      body.card.id
    )));
  }

  if body.language.is_none() && !body.responses.is_empty() {
    return Err(ApiError::BadRequest(
      "`responses` require a `language`".into(),
    ));
  }

  let checklist = StaffChecklist::from_card(&body.card);
  let translation = body.language.map(|language| {
    ChecklistTranslation::from_responses(
      language,
      body.responses.into_iter().map(|r| (r.client_id, r.target_text)),
    )
  });

  Ok(Json(ChecklistView {
    translation_requests: checklist.translation_requests(),
    rendered:             checklist.render(translation.as_ref()),
  }))
}
