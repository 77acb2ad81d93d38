//! HTTP server for ShouldIEat.
//!
//! Mounts the JSON API from `shouldieat-api` under `/api`, adds a liveness
//! probe, and traces every request.

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::{MatchedPath, Request},
  routing::get,
};
use serde::Deserialize;
use shouldieat_api::{ApiState, DEFAULT_LOCATION, api_router};
use shouldieat_core::{
  matcher::MatchOptions,
  store::{CardStore, ProfileStore},
};
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SHOULDIEAT_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:             String,
  #[serde(default = "default_port")]
  pub port:             u16,
  #[serde(default = "default_store_path")]
  pub store_path:       PathBuf,
  /// Collapse repeated identical warnings before matching.
  #[serde(default)]
  pub dedupe_warnings:  bool,
  #[serde(default = "default_location")]
  pub default_location: String,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("shouldieat.db") }

fn default_location() -> String { DEFAULT_LOCATION.to_string() }

impl ServerConfig {
  pub fn match_options(&self) -> MatchOptions {
    MatchOptions { dedupe_warnings: self.dedupe_warnings }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the top-level [`Router`] for `store`.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: ProfileStore + CardStore + 'static,
{
  let state = ApiState::new(store)
    .with_options(config.match_options())
    .with_default_location(config.default_location.as_str());

  Router::new()
    .route("/health", get(|| async { "ok" }))
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
      let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or(request.uri().path());
      tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %path
      )
    }))
}

// ─── Integration tests ───────────────────────────────────────────────────────
