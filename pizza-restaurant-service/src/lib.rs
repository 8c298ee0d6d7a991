use diesel_migrations::{embed_migrations, EmbeddedMigrations};

pub mod error;
pub mod handlers;
pub mod models;
pub mod schema;
pub mod seed;
pub mod serializer;
pub mod store;

pub use handlers::{router, AppState};
pub use store::Store;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");
