//! Handler for `GET /random`.
//!
//! | Query              | Population                          |
//! |--------------------|-------------------------------------|
//! | (none)             | base-canon categories               |
//! | `include_lds=true` | the whole corpus                    |
//! | `category=<name>`  | one category; wins over `include_lds` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use scripture_core::{Engine, model::Scripture, store::ScriptureStore};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
pub struct RandomParams {
  #[serde(default)]
  pub include_lds: bool,
  pub category:    Option<String>,
}

pub async fn handler<S>(
  State(engine): State<Arc<Engine<S>>>,
  Query(params): Query<RandomParams>,
) -> Result<Json<Scripture>, ApiError>
where
  S: ScriptureStore,
{
  let scripture = match params.category.as_deref() {
    Some(name) => engine.sample_category(name).await?,
    None => engine.sample(params.include_lds).await?,
  };
  Ok(Json(scripture))
}
