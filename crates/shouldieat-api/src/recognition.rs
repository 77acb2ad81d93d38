//! Parsing of the vision model's text reply.
//!
//! The model is prompted to answer with a JSON object but frequently wraps it
//! in a Markdown code fence. [`RecognitionReply::parse`] strips a leading
//! ` ```json ` and a trailing ` ``` ` before decoding.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// What the recognizer says about one photographed dish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionReply {
  pub food_name:        String,
  pub detected_items:   Vec<String>,
  /// Candidate allergens, ideally spelled as catalog names.
  pub allergy_warnings: Vec<String>,
  #[serde(default)]
  pub ingredients:      Vec<String>,
}

impl RecognitionReply {
  /// Decode a raw reply. Any failure is reported as
  /// [`ApiError::RecognitionFailed`].
  pub fn parse(raw: &str) -> Result<Self, ApiError> {
    let cleaned = strip_fences(raw);
    serde_json::from_str(cleaned).map_err(|e| {
      tracing::warn!(error = %e, "unparseable recognizer reply");
      ApiError::RecognitionFailed(format!("unparseable recognizer reply: {e}"))
    })
  }

  pub fn ingredient_summary(&self) -> String { self.ingredients.join(", ") }
}

fn strip_fences(raw: &str) -> &str {
  let mut s = raw.trim();
  if let Some(rest) = s.strip_prefix(FENCE_OPEN) {
    s = rest;
  }
  if let Some(rest) = s.strip_suffix(FENCE_CLOSE) {
    s = rest;
  }
  s.trim()
}
