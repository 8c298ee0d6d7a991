use serde::Serialize;
use utoipa::ToSchema;

use crate::models;

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct RestaurantData {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct PizzaData {
    pub id: i32,
    pub name: String,
    /// Free-form ingredient list
    pub ingredients: String,
}

/// A price entry as listed under its restaurant. Carries the pizza but not
/// the restaurant it belongs to.
#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct RestaurantPizzaData {
    pub id: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
    pub price: i32,
    pub pizza: PizzaData,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct RestaurantDetails {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<RestaurantPizzaData>,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct CreatedRestaurantPizza {
    pub id: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
    pub price: i32,
    pub pizza: PizzaData,
    pub restaurant: RestaurantData,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorsResponse {
    pub errors: Vec<String>,
}

pub fn serialize_restaurant(restaurant: &models::Restaurant) -> RestaurantData {
    RestaurantData {
        id: restaurant.id,
        name: restaurant.name.clone(),
        address: restaurant.address.clone(),
    }
}

pub fn serialize_pizza(pizza: &models::Pizza) -> PizzaData {
    PizzaData {
        id: pizza.id,
        name: pizza.name.clone(),
        ingredients: pizza.ingredients.clone(),
    }
}

pub fn serialize_restaurant_pizza(
    restaurant_pizza: &models::RestaurantPizza,
    pizza: &models::Pizza,
) -> RestaurantPizzaData {
    RestaurantPizzaData {
        id: restaurant_pizza.id,
        restaurant_id: restaurant_pizza.restaurant_id,
        pizza_id: restaurant_pizza.pizza_id,
        price: restaurant_pizza.price,
        pizza: serialize_pizza(pizza),
    }
}

pub fn serialize_restaurant_details(
    restaurant: &models::Restaurant,
    restaurant_pizzas: &[(models::RestaurantPizza, models::Pizza)],
) -> RestaurantDetails {
    RestaurantDetails {
        id: restaurant.id,
        name: restaurant.name.clone(),
        address: restaurant.address.clone(),
        restaurant_pizzas: restaurant_pizzas
            .iter()
            .map(|(rp, pizza)| serialize_restaurant_pizza(rp, pizza))
            .collect(),
    }
}

pub fn serialize_created_restaurant_pizza(
    restaurant_pizza: &models::RestaurantPizza,
    pizza: &models::Pizza,
    restaurant: &models::Restaurant,
) -> CreatedRestaurantPizza {
    CreatedRestaurantPizza {
        id: restaurant_pizza.id,
        restaurant_id: restaurant_pizza.restaurant_id,
        pizza_id: restaurant_pizza.pizza_id,
        price: restaurant_pizza.price,
        pizza: serialize_pizza(pizza),
        restaurant: serialize_restaurant(restaurant),
    }
}
