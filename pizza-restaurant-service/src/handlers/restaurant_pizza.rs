use axum::{Router, extract::State, http::StatusCode, response::Json, routing::post};
use diesel::prelude::*;
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models;
use crate::schema::{pizzas, restaurant_pizzas};
use crate::serializer::*;

use super::restaurant::find_restaurant;
use super::AppState;

pub const MIN_PRICE: i32 = 1;
pub const MAX_PRICE: i32 = 30;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    pub pizza_id: Option<i64>,
    pub restaurant_id: Option<i64>,
    /// Whole number between 1 and 30
    #[schema(value_type = Option<i32>, minimum = 1, maximum = 30)]
    pub price: Option<serde_json::Value>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

fn find_pizza(conn: &mut SqliteConnection, id: i64) -> QueryResult<Option<models::Pizza>> {
    let Ok(id) = i32::try_from(id) else {
        return Ok(None);
    };

    pizzas::table
        .find(id)
        .select(models::Pizza::as_select())
        .first(conn)
        .optional()
}

/// Missing, non-integral and out-of-range prices all fail the same way.
fn validate_price(price: Option<&serde_json::Value>) -> Result<i32, ApiError> {
    let price = price
        .and_then(serde_json::Value::as_i64)
        .and_then(|price| i32::try_from(price).ok())
        .ok_or(ApiError::Validation)?;

    if !(MIN_PRICE..=MAX_PRICE).contains(&price) {
        return Err(ApiError::Validation);
    }

    Ok(price)
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Pizza priced at restaurant", body = CreatedRestaurantPizza),
        (status = 400, description = "Price missing or out of range", body = ErrorsResponse),
        (status = 404, description = "Pizza or restaurant not found", body = ErrorsResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    Json(payload): Json<CreateRestaurantPizzaRequest>,
) -> Result<(StatusCode, Json<CreatedRestaurantPizza>), ApiError> {
    let created = state
        .store
        .run(move |conn| {
            conn.immediate_transaction::<_, ApiError, _>(|conn| {
                let pizza = match payload.pizza_id {
                    Some(id) => find_pizza(conn, id)?,
                    None => None,
                };
                let restaurant = match payload.restaurant_id {
                    Some(id) => find_restaurant(conn, id)?,
                    None => None,
                };
                let (Some(pizza), Some(restaurant)) = (pizza, restaurant) else {
                    return Err(ApiError::PizzaOrRestaurantNotFound);
                };

                let price = validate_price(payload.price.as_ref())?;

                let restaurant_pizza = diesel::insert_into(restaurant_pizzas::table)
                    .values(models::NewRestaurantPizza {
                        price,
                        restaurant_id: restaurant.id,
                        pizza_id: pizza.id,
                    })
                    .returning(models::RestaurantPizza::as_returning())
                    .get_result(conn)?;

                Ok(serialize_created_restaurant_pizza(
                    &restaurant_pizza,
                    &pizza,
                    &restaurant,
                ))
            })
        })
        .await?;

    info!(
        id = created.id,
        restaurant_id = created.restaurant_id,
        pizza_id = created.pizza_id,
        "restaurant pizza created"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::*;
    use serde_json::json;

    fn payload(pizza_id: i32, restaurant_id: i32, price: serde_json::Value) -> CreateRestaurantPizzaRequest {
        CreateRestaurantPizzaRequest {
            pizza_id: Some(pizza_id.into()),
            restaurant_id: Some(restaurant_id.into()),
            price: Some(price),
        }
    }

    #[test]
    fn test_validate_price_accepts_bounds() {
        assert_eq!(validate_price(Some(&json!(1))).unwrap(), 1);
        assert_eq!(validate_price(Some(&json!(15))).unwrap(), 15);
        assert_eq!(validate_price(Some(&json!(30))).unwrap(), 30);
    }

    #[test]
    fn test_validate_price_rejects_out_of_range() {
        for price in [json!(0), json!(31), json!(-5), json!(i64::MAX)] {
            assert!(matches!(
                validate_price(Some(&price)),
                Err(ApiError::Validation)
            ));
        }
    }

    #[test]
    fn test_validate_price_rejects_missing_and_non_integers() {
        assert!(matches!(validate_price(None), Err(ApiError::Validation)));
        for price in [json!(null), json!(12.5), json!("12"), json!(true)] {
            assert!(matches!(
                validate_price(Some(&price)),
                Err(ApiError::Validation)
            ));
        }
    }

    fn count_rows(store: &crate::store::Store) -> i64 {
        let mut conn = connection(store);
        restaurant_pizzas::table
            .count()
            .get_result(&mut *conn)
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_restaurant_pizza() {
        let (_dir, store) = setup_store();
        let (restaurant, pizza) = {
            let mut conn = connection(&store);
            (
                insert_restaurant(&mut conn, "Karen's Pizza Shack", "address1"),
                insert_pizza(&mut conn, "Emma", "Dough, Tomato Sauce, Cheese"),
            )
        };

        let (status, Json(created)) = create_restaurant_pizza(
            State(AppState::new(store.clone())),
            Json(payload(pizza.id, restaurant.id, json!(15))),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.price, 15);
        assert_eq!(created.pizza_id, pizza.id);
        assert_eq!(created.restaurant_id, restaurant.id);
        assert_eq!(created.pizza, serialize_pizza(&pizza));
        assert_eq!(created.restaurant, serialize_restaurant(&restaurant));
        assert_eq!(count_rows(&store), 1);
    }

    #[tokio::test]
    async fn test_create_restaurant_pizza_price_bounds() {
        let (_dir, store) = setup_store();
        let (restaurant, pizza) = {
            let mut conn = connection(&store);
            (
                insert_restaurant(&mut conn, "Karen's Pizza Shack", "address1"),
                insert_pizza(&mut conn, "Emma", "Dough, Tomato Sauce, Cheese"),
            )
        };
        let state = AppState::new(store.clone());

        for price in [1, 30] {
            let (status, _) = create_restaurant_pizza(
                State(state.clone()),
                Json(payload(pizza.id, restaurant.id, json!(price))),
            )
            .await
            .unwrap();
            assert_eq!(status, StatusCode::CREATED);
        }

        for price in [0, 31] {
            let result = create_restaurant_pizza(
                State(state.clone()),
                Json(payload(pizza.id, restaurant.id, json!(price))),
            )
            .await;
            assert!(matches!(result, Err(ApiError::Validation)));
        }

        assert_eq!(count_rows(&store), 2);
    }

    #[tokio::test]
    async fn test_create_restaurant_pizza_missing_price() {
        let (_dir, store) = setup_store();
        let (restaurant, pizza) = {
            let mut conn = connection(&store);
            (
                insert_restaurant(&mut conn, "Karen's Pizza Shack", "address1"),
                insert_pizza(&mut conn, "Emma", "Dough, Tomato Sauce, Cheese"),
            )
        };

        let result = create_restaurant_pizza(
            State(AppState::new(store)),
            Json(CreateRestaurantPizzaRequest {
                pizza_id: Some(pizza.id.into()),
                restaurant_id: Some(restaurant.id.into()),
                price: None,
            }),
        )
        .await;

        assert!(matches!(result, Err(ApiError::Validation)));
    }

    #[tokio::test]
    async fn test_create_restaurant_pizza_not_found_before_validation() {
        let (_dir, store) = setup_store();
        let (restaurant, pizza) = {
            let mut conn = connection(&store);
            (
                insert_restaurant(&mut conn, "Karen's Pizza Shack", "address1"),
                insert_pizza(&mut conn, "Emma", "Dough, Tomato Sauce, Cheese"),
            )
        };
        let state = AppState::new(store.clone());

        let cases = [
            payload(pizza.id + 100, restaurant.id, json!(10)),
            payload(pizza.id, restaurant.id + 100, json!(10)),
            payload(pizza.id + 100, restaurant.id, json!(0)),
            payload(pizza.id, restaurant.id + 100, json!(99)),
            CreateRestaurantPizzaRequest {
                pizza_id: None,
                restaurant_id: Some(restaurant.id.into()),
                price: None,
            },
            CreateRestaurantPizzaRequest {
                pizza_id: Some(9_999_999_999),
                restaurant_id: Some(restaurant.id.into()),
                price: Some(json!(10)),
            },
            CreateRestaurantPizzaRequest {
                pizza_id: Some(pizza.id.into()),
                restaurant_id: Some(i64::from(i32::MIN) - 1),
                price: Some(json!(10)),
            },
        ];
        for case in cases {
            let result = create_restaurant_pizza(State(state.clone()), Json(case)).await;
            assert!(matches!(result, Err(ApiError::PizzaOrRestaurantNotFound)));
        }

        assert_eq!(count_rows(&store), 0);
    }
}
