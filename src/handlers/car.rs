use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{Car, CarList, CarPatch, NewCar};
use crate::repository::CarRepository;

pub fn router() -> Router<CarRepository> {
    Router::new()
        .route("/cars", get(list_cars).post(create_car))
        .route("/cars/:id", get(get_car).put(update_car).delete(delete_car))
}

// Only a plain run of ASCII digits can name a car.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    Some(raw)
        .filter(|raw| !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|raw| raw.parse::<i64>().ok())
        .ok_or_else(|| AppError::NotFound(raw.to_string()))
}

/// Decodes a request body that must be a JSON object. Derived struct
/// deserializers also accept arrays by position, so the body goes through a
/// map first and fields are only ever matched by key.
fn decode_object<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    let object: Map<String, Value> = serde_json::from_slice(body)?;
    Ok(serde_json::from_value(Value::Object(object))?)
}

async fn list_cars(State(repository): State<CarRepository>) -> Result<Json<CarList>, AppError> {
    let results = repository.list().await?;
    Ok(Json(CarList { results }))
}

async fn get_car(
    State(repository): State<CarRepository>,
    Path(id): Path<String>,
) -> Result<Json<Car>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(repository.get_by_id(id).await?))
}

/// Bodies are decoded from raw bytes so a missing or wrong `Content-Type`
/// header does not change the outcome.
async fn create_car(
    State(repository): State<CarRepository>,
    body: Bytes,
) -> Result<Json<Car>, AppError> {
    let new_car: NewCar = decode_object(&body)?;
    new_car.validate()?;

    tracing::info!("{} Creating car: {} {}", API_NAME, new_car.make, new_car.model);

    Ok(Json(repository.create(&new_car).await?))
}

async fn update_car(
    State(repository): State<CarRepository>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Car>, AppError> {
    let id = parse_id(&id)?;
    let patch: CarPatch = decode_object(&body)?;
    patch.validate()?;

    tracing::info!("{} Updating car {}", API_NAME, id);

    Ok(Json(repository.update(id, &patch).await?))
}

async fn delete_car(
    State(repository): State<CarRepository>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    repository.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
