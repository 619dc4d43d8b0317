use robostore_core::ServiceError;
use robostore_sql::SQLStore;

/// SQL DDL statements to initialize the shop database schema.
///
/// Each table stores the full JSON document in a `data` TEXT column,
/// with indexed columns extracted for efficient filtering and
/// uniqueness. All three tables are append-only.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS customers (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        email TEXT UNIQUE,
        created_at TEXT
    )",
    "CREATE TABLE IF NOT EXISTS robots (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        serial TEXT,
        model TEXT,
        version TEXT,
        created TEXT
    )",
    "CREATE TABLE IF NOT EXISTS orders (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        customer_id TEXT,
        robot_serial TEXT,
        created_at TEXT
    )",
    // The dispatcher filters orders by requested serial on every robot
    // intake; robots are filtered by created for the weekly report.
    "CREATE INDEX IF NOT EXISTS idx_orders_robot_serial ON orders(robot_serial)",
    "CREATE INDEX IF NOT EXISTS idx_robots_created ON robots(created)",
];

/// Create tables and indexes if they do not exist.
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), ServiceError> {
    for ddl in SCHEMA {
        sql.exec(ddl, &[])
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
    }
    Ok(())
}
