use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use diesel::prelude::*;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::models;
use crate::schema::{pizzas, restaurant_pizzas, restaurants};
use crate::serializer::*;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

/// Ids outside the key range cannot match a row and read as missing.
pub(crate) fn find_restaurant(
    conn: &mut SqliteConnection,
    id: i64,
) -> QueryResult<Option<models::Restaurant>> {
    let Ok(id) = i32::try_from(id) else {
        return Ok(None);
    };

    restaurants::table
        .find(id)
        .select(models::Restaurant::as_select())
        .first(conn)
        .optional()
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "List of restaurants", body = [RestaurantData]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantData>>, ApiError> {
    let results = state
        .store
        .run(|conn| {
            Ok(restaurants::table
                .order(restaurants::id)
                .select(models::Restaurant::as_select())
                .load(conn)?)
        })
        .await?;

    Ok(Json(results.iter().map(serialize_restaurant).collect()))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    responses(
        (status = 200, description = "Restaurant with its pizzas", body = RestaurantDetails),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
    ),
    params(
        ("id" = i64, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i64>,
) -> Result<Json<RestaurantDetails>, ApiError> {
    let details = state
        .store
        .run(move |conn| {
            let restaurant =
                find_restaurant(conn, restaurant_id)?.ok_or(ApiError::RestaurantNotFound)?;

            let menu = models::RestaurantPizza::belonging_to(&restaurant)
                .inner_join(pizzas::table)
                .order(restaurant_pizzas::id)
                .select((
                    models::RestaurantPizza::as_select(),
                    models::Pizza::as_select(),
                ))
                .load::<(models::RestaurantPizza, models::Pizza)>(conn)?;

            Ok(serialize_restaurant_details(&restaurant, &menu))
        })
        .await?;

    Ok(Json(details))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    responses(
        (status = 204, description = "Restaurant deleted", body = MessageResponse),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
    ),
    params(
        ("id" = i64, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i64>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let removed = state
        .store
        .run(move |conn| {
            conn.immediate_transaction::<_, ApiError, _>(|conn| {
                let restaurant =
                    find_restaurant(conn, restaurant_id)?.ok_or(ApiError::RestaurantNotFound)?;

                let removed = diesel::delete(models::RestaurantPizza::belonging_to(&restaurant))
                    .execute(conn)?;
                diesel::delete(restaurants::table.find(restaurant.id)).execute(conn)?;

                Ok(removed)
            })
        })
        .await?;

    info!(restaurant_id, removed_pizzas = removed, "restaurant deleted");

    Ok((
        StatusCode::NO_CONTENT,
        Json(MessageResponse {
            message: "Restaurant deleted".to_string(),
        }),
    ))
}
