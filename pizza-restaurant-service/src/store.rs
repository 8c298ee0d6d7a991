use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError};
use diesel::SqliteConnection;
use diesel_migrations::MigrationHarness;

use crate::error::ApiError;
use crate::MIGRATIONS;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Shared handle to the database, cloned into every request.
///
/// Each call to [`Store::run`] checks out one pooled connection on a blocking
/// thread and hands it back to the pool when the closure returns.
#[derive(Clone)]
pub struct Store {
    pool: DbPool,
}

impl Store {
    pub fn connect(database_url: &str, pool_size: u32) -> Result<Self, PoolError> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(pool_size)
            .connection_customizer(Box::new(ConnectionOptions))
            .build(manager)?;

        Ok(Self { pool })
    }

    pub fn run_migrations(&self) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
        let mut pooled = self.pool.get()?;
        let conn: &mut SqliteConnection = &mut pooled;
        let applied = conn.run_pending_migrations(MIGRATIONS)?;
        Ok(applied.len())
    }

    pub async fn run<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut *conn)
        })
        .await?
    }
}
