//! Collection point endpoints: search, show, register

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::{Point, PointRepo};
use crate::http::error::ApiError;
use crate::http::extractors::ValidPointId;
use crate::http::server::AppState;
use crate::models::{ItemIds, NewPoint, ValidationError};

/// Registration images are small photos; anything bigger is a client bug.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Point response with fully-qualified image URL
#[derive(Serialize)]
pub struct PointResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub city: String,
    pub uf: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: String,
    pub created_at: String,
}

impl PointResponse {
    fn from_point(point: Point, state: &AppState) -> Self {
        Self {
            id: point.id,
            name: point.name,
            email: point.email,
            whatsapp: point.whatsapp,
            city: point.city,
            uf: point.uf,
            latitude: point.latitude,
            longitude: point.longitude,
            image_url: state.asset_url(&point.image),
            created_at: point.created_at.to_rfc3339(),
        }
    }
}

/// Item title as nested in the show response
#[derive(Serialize)]
pub struct ItemTitle {
    pub title: String,
}

/// Show response: the point plus the titles of items it accepts
#[derive(Serialize)]
pub struct ShowPointResponse {
    pub point: PointResponse,
    pub items: Vec<ItemTitle>,
}

/// Search query: `?city=Rio do Sul&uf=SC&items=1,2`
#[derive(Deserialize)]
pub struct SearchParams {
    pub city: String,
    pub uf: String,
    pub items: String,
}

/// GET /points - distinct points in a city/uf matching any requested item
async fn search_points(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<PointResponse>>, ApiError> {
    let items = ItemIds::parse(&params.items)?;

    let points = PointRepo::new(&state.pool)
        .search(params.city.trim(), params.uf.trim(), &items)
        .await?;

    Ok(Json(
        points
            .into_iter()
            .map(|p| PointResponse::from_point(p, &state))
            .collect(),
    ))
}

/// GET /points/{id} - a single point with its item titles
async fn show_point(
    State(state): State<Arc<AppState>>,
    ValidPointId(id): ValidPointId,
) -> Result<Json<ShowPointResponse>, ApiError> {
    let (point, titles) = PointRepo::new(&state.pool).get_with_items(id).await?;

    Ok(Json(ShowPointResponse {
        point: PointResponse::from_point(point, &state),
        items: titles.into_iter().map(|title| ItemTitle { title }).collect(),
    }))
}

/// Text fields plus the image payload collected from the multipart form.
#[derive(Default)]
struct RegistrationForm {
    name: String,
    email: String,
    whatsapp: String,
    city: String,
    uf: String,
    latitude: String,
    longitude: String,
    items: String,
    image: Option<(String, Bytes)>,
}

impl RegistrationForm {
    fn set(&mut self, field: &str, value: String) {
        match field {
            "name" => self.name = value,
            "email" => self.email = value,
            "whatsapp" => self.whatsapp = value,
            "city" => self.city = value,
            "uf" => self.uf = value,
            "latitude" => self.latitude = value,
            "longitude" => self.longitude = value,
            "items" => self.items = value,
            // unknown fields are ignored
            _ => {}
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
            let name = field.name().unwrap_or_default().to_owned();
            if name == "image" {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                form.image = Some((file_name, bytes));
            } else {
                let value = field.text().await.map_err(bad_multipart)?;
                form.set(&name, value);
            }
        }

        Ok(form)
    }
}

fn bad_multipart(err: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::Multipart {
        message: format!("malformed multipart body: {}", err),
    }
}

/// POST /points - register a point with its item associations.
///
/// Every field is validated before the upload is persisted or the
/// database is touched.
async fn create_point(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PointResponse>), ApiError> {
    let form = RegistrationForm::from_multipart(multipart).await?;

    let items = ItemIds::parse(&form.items)?;
    let point = NewPoint::new(
        &form.name,
        &form.email,
        &form.whatsapp,
        &form.city,
        &form.uf,
        &form.latitude,
        &form.longitude,
    )?;
    let (original_name, bytes) = form
        .image
        .ok_or(ApiError::Validation(ValidationError::Empty {
            field: "image",
        }))?;

    let stored = state.uploads.store(&original_name, &bytes).await?;

    let created = PointRepo::new(&state.pool)
        .create(&point, &stored, &items)
        .await?;

    tracing::info!(id = created.id, city = %created.city, "point registered");

    Ok((
        StatusCode::CREATED,
        Json(PointResponse::from_point(created, &state)),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/points", get(search_points).post(create_point))
        .route("/points/{id}", get(show_point))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
