//! JSON REST API for ShouldIEat.
//!
//! Exposes an axum [`Router`] backed by any store implementing both
//! [`ProfileStore`] and [`CardStore`]. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", shouldieat_api::api_router(ApiState::new(store.clone())))
//! ```

pub mod analyses;
pub mod cards;
pub mod catalog;
pub mod checklist;
pub mod error;
pub mod profile;
pub mod recognition;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use shouldieat_core::{
  matcher::MatchOptions,
  store::{CardStore, ProfileStore},
};

pub use error::ApiError;
pub use recognition::RecognitionReply;

/// The location stamped on cards whose request does not name one.
pub const DEFAULT_LOCATION: &str = "Current location";

// ─── State ───────────────────────────────────────────────────────────────────

/// Shared state threaded through the API handlers.
pub struct ApiState<S> {
  pub store:            Arc<S>,
  pub options:          MatchOptions,
  pub default_location: Arc<str>,
}

impl<S> ApiState<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store,
      options: MatchOptions::default(),
      default_location: Arc::from(DEFAULT_LOCATION),
    }
  }

  pub fn with_options(self, options: MatchOptions) -> Self {
    Self { options, ..self }
  }

  pub fn with_default_location(self, location: impl Into<Arc<str>>) -> Self {
    Self { default_location: location.into(), ..self }
  }
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:            Arc::clone(&self.store),
      options:          self.options,
      default_location: Arc::clone(&self.default_location),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: ProfileStore + CardStore + 'static,
{
  Router::new()
    // Catalog
    .route("/catalog", get(catalog::list))
    .route("/catalog/search", get(catalog::search))
    .route("/catalog/main/{main}", get(catalog::by_main_category))
    .route("/categories", get(catalog::categories))
    .route("/resolve", get(catalog::resolve_text))
    // Profile
    .route("/profile", get(profile::get_profile::<S>))
    .route("/profile/allergens", put(profile::upsert_allergen::<S>))
    .route(
      "/profile/allergens/{item_id}",
      delete(profile::remove_allergen::<S>),
    )
    // Analyses
    .route("/analyses", post(analyses::create::<S>))
    .route("/analyses/reply", post(analyses::from_reply::<S>))
    // Cards
    .route("/cards", get(cards::list::<S>))
    .route("/cards/confirm", post(cards::confirm::<S>))
    .route("/cards/{id}", get(cards::get_one::<S>))
    // Staff checklist
    .route("/checklist", post(checklist::handler))
    .with_state(state)
}
