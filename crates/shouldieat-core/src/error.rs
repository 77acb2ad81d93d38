//! Error types for `shouldieat-core`.
//!
//! Classification and matching are total and never produce these; they only
//! arise at the persistence boundary, where stored values are re-validated
//! against the catalog.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown allergen item id: {0}")]
  UnknownAllergenItem(u32),

  #[error("unknown allergen name: {0:?}")]
  UnknownAllergenName(String),

  #[error("unknown main category: {0:?}")]
  UnknownMainCategory(String),

  #[error("card {0} has not been confirmed")]
  UnconfirmedCard(Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
