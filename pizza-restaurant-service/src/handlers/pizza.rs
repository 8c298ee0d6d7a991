use axum::{Router, extract::State, response::Json, routing::get};
use diesel::prelude::*;
use tracing::instrument;

use crate::error::ApiError;
use crate::models;
use crate::schema::pizzas;
use crate::serializer::*;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/pizzas", get(list_pizzas))
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "List of pizzas", body = [PizzaData]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(State(state): State<AppState>) -> Result<Json<Vec<PizzaData>>, ApiError> {
    let results = state
        .store
        .run(|conn| {
            Ok(pizzas::table
                .order(pizzas::id)
                .select(models::Pizza::as_select())
                .load(conn)?)
        })
        .await?;

    Ok(Json(results.iter().map(serialize_pizza).collect()))
}
