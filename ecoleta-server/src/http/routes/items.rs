//! Item catalog endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::{Item, ItemRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Item response with fully-qualified image URL
#[derive(Serialize)]
pub struct ItemResponse {
    pub id: i64,
    pub title: String,
    pub image_url: String,
}

impl ItemResponse {
    fn from_item(item: Item, state: &AppState) -> Self {
        Self {
            id: item.id,
            title: item.title,
            image_url: state.asset_url(&item.image),
        }
    }
}

/// GET /items - the full catalog
async fn list_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let items = ItemRepo::new(&state.pool).list().await?;

    Ok(Json(
        items
            .into_iter()
            .map(|item| ItemResponse::from_item(item, &state))
            .collect(),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/items", get(list_items))
}
