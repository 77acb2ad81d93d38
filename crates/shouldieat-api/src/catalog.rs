//! Read-only handlers over the allergen catalog and the category resolver.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/catalog` | Every item, declaration order |
//! | `GET`  | `/catalog/search?q=` | Case-insensitive substring search |
//! | `GET`  | `/catalog/main/{main}` | 404 for an unknown main category |
//! | `GET`  | `/categories` | Each category with its main and sub names |
//! | `GET`  | `/resolve?text=` | Keyword classification of free text |

use axum::{
  Json,
  extract::{Path, Query},
};
use serde::{Deserialize, Serialize};
use shouldieat_core::{
  catalog::{self, AllergenItem},
  category::{Category, MainCategory},
  resolve::resolve,
};
use strum::IntoEnumIterator as _;

use crate::error::ApiError;

/// `GET /catalog`
pub async fn list() -> Json<&'static [AllergenItem]> {
  Json(catalog::all_items())
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  #[serde(default)]
  pub q: String,
}

/// `GET /catalog/search?q=<text>`
pub async fn search(
  Query(params): Query<SearchParams>,
) -> Json<Vec<&'static AllergenItem>> {
  Json(catalog::search(params.q.trim()))
}

// ─── Main category ───────────────────────────────────────────────────────────

/// `GET /catalog/main/{main}`
pub async fn by_main_category(
  Path(main): Path<String>,
) -> Result<Json<&'static [&'static AllergenItem]>, ApiError> {
  let main = MainCategory::from_name(&main)
    .map_err(|e| ApiError::NotFound(e.to_string()))?;
  Ok(Json(catalog::items_in_main_category(main)))
}

// ─── Categories ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CategoryView {
  pub category:      Category,
  pub label:         &'static str,
  pub main_category: &'static str,
  pub sub_category:  &'static str,
}

impl From<Category> for CategoryView {
  fn from(category: Category) -> Self {
    Self {
      category,
      label: category.label(),
      main_category: category.main_category().name(),
      sub_category: category.sub_category(),
    }
  }
}

/// `GET /categories`
pub async fn categories() -> Json<Vec<CategoryView>> {
  Json(Category::iter().map(CategoryView::from).collect())
}

// ─── Resolve ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
  #[serde(default)]
  pub text: String,
}

/// `GET /resolve?text=<free text>`. Always answers, falling back to the
/// default category.
pub async fn resolve_text(
  Query(params): Query<ResolveParams>,
) -> Json<CategoryView> {
  Json(resolve(&params.text).into())
}
