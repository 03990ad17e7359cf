use std::time::Duration;

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use thiserror::Error;

/// Backend selected at runtime from the configured URL: Postgres in
/// dev/prod, the embedded SQLite file otherwise (local/CI runs).
#[derive(diesel::MultiConnection)]
pub enum AnyConnection {
    Postgresql(diesel::PgConnection),
    Sqlite(diesel::SqliteConnection),
}

pub type DbPool = Pool<ConnectionManager<AnyConnection>>;

pub const BOOTSTRAP_ATTEMPTS: u32 = 5;
pub const BOOTSTRAP_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum DbError {
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("query error: {0}")]
    Query(#[from] diesel::result::Error),
}

/// Build the pool without eagerly establishing a connection; availability is
/// probed separately by `wait_for_database` so startup can retry.
pub fn create_pool(database_url: &str) -> DbPool {
    let manager = ConnectionManager::<AnyConnection>::new(database_url);
    Pool::builder()
        .connection_timeout(Duration::from_secs(5))
        .build_unchecked(manager)
}

/// Bounded startup probe: in a compose environment the database may come up
/// after the service. Retries `attempts` times with a fixed `delay`, then
/// fails startup with the last error.
pub fn wait_for_database(pool: &DbPool, attempts: u32, delay: Duration) -> Result<(), DbError> {
    let mut attempt = 1u32;
    loop {
        match pool.get() {
            Ok(_) => return Ok(()),
            Err(e) if attempt >= attempts => return Err(e.into()),
            Err(e) => {
                log::warn!("database not ready (attempt {}/{}): {}", attempt, attempts, e);
                std::thread::sleep(delay);
                attempt += 1;
            }
        }
    }
}

const CREATE_ORDERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS orders (
    id TEXT PRIMARY KEY,
    product_id TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    status TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL
)";

/// Create the orders table when absent. The DDL is portable across both
/// supported backends; migration tooling is out of scope.
pub fn init_schema(pool: &DbPool) -> Result<(), DbError> {
    let mut conn = pool.get()?;
    diesel::sql_query(CREATE_ORDERS_TABLE).execute(&mut conn)?;
    Ok(())
}

/// Unit-of-work helper: runs `f` on a pooled connection inside a
/// transaction. Commits iff `f` returns `Ok`; any `Err` rolls the write
/// back. The connection returns to the pool on every exit path.
pub fn with_transaction<T, E, F>(pool: &DbPool, f: F) -> Result<T, E>
where
    F: FnOnce(&mut AnyConnection) -> Result<T, E>,
    E: From<diesel::result::Error> + From<r2d2::Error>,
{
    let mut conn = pool.get()?;
    (&mut *conn).transaction(f)
}
