use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::models::{NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, Restaurant};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

const RESTAURANTS: [(&str, &str); 3] = [
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const PIZZAS: [(&str, &str); 3] = [
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

// (restaurant index, pizza index, price)
const PRICES: [(usize, usize, i32); 3] = [(0, 0, 1), (1, 1, 4), (2, 2, 5)];

#[derive(Debug, PartialEq)]
pub struct SeedSummary {
    pub restaurants: usize,
    pub pizzas: usize,
    pub restaurant_pizzas: usize,
}

/// Replaces every row in the three tables with the sample data set.
pub fn run(conn: &mut SqliteConnection) -> QueryResult<SeedSummary> {
    conn.immediate_transaction(|conn| {
        diesel::delete(restaurant_pizzas::table).execute(conn)?;
        diesel::delete(pizzas::table).execute(conn)?;
        diesel::delete(restaurants::table).execute(conn)?;

        let seeded_restaurants = RESTAURANTS
            .iter()
            .map(|&(name, address)| {
                diesel::insert_into(restaurants::table)
                    .values(NewRestaurant { name, address })
                    .returning(Restaurant::as_returning())
                    .get_result(conn)
            })
            .collect::<QueryResult<Vec<_>>>()?;

        let seeded_pizzas = PIZZAS
            .iter()
            .map(|&(name, ingredients)| {
                diesel::insert_into(pizzas::table)
                    .values(NewPizza { name, ingredients })
                    .returning(Pizza::as_returning())
                    .get_result(conn)
            })
            .collect::<QueryResult<Vec<_>>>()?;

        let new_prices = PRICES
            .iter()
            .map(|&(r, p, price)| NewRestaurantPizza {
                price,
                restaurant_id: seeded_restaurants[r].id,
                pizza_id: seeded_pizzas[p].id,
            })
            .collect::<Vec<_>>();
        let inserted = diesel::insert_into(restaurant_pizzas::table)
            .values(&new_prices)
            .execute(conn)?;

        Ok(SeedSummary {
            restaurants: seeded_restaurants.len(),
            pizzas: seeded_pizzas.len(),
            restaurant_pizzas: inserted,
        })
    })
}
