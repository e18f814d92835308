use std::str::FromStr;

use chrono::{Days, Local, Months, NaiveDate};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::error::RepositoryResult;
use crate::models::ProjectStatus;

/// Database connection pool
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a connection pool, creating the database file if it is missing
    pub async fn connect(url: &str) -> RepositoryResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // A second connection to `sqlite::memory:` would open a separate, empty database
        let in_memory = url.contains(":memory:");
        let pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { 5 })
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> RepositoryResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Insert the sample customers and projects when the store has no customers yet
    ///
    /// Returns whether anything was inserted.
    pub async fn seed(&self) -> RepositoryResult<bool> {
        let customers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        if customers > 0 {
            return Ok(false);
        }

        let today = Local::now().date_naive();
        let mut tx = self.pool.begin().await?;

        let mut customer_ids = Vec::with_capacity(SEED_CUSTOMERS.len());
        for name in SEED_CUSTOMERS {
            let id = sqlx::query("INSERT INTO customers (name) VALUES (?)")
                .bind(name)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid();
            customer_ids.push(id);
        }

        let projects = [
            (
                "P001",
                "Sample Project",
                today,
                add_months(today, 3),
                "John Doe",
                customer_ids[0],
                "Development",
                300000.0,
                ProjectStatus::NotStarted,
            ),
            (
                "P002",
                "Website Redesign",
                today - Days::new(10),
                add_months(today, 2),
                "Jane Smith",
                customer_ids[1],
                "Web Design",
                150000.0,
                ProjectStatus::Ongoing,
            ),
            (
                "P003",
                "Database Migration",
                today.checked_sub_months(Months::new(1)).unwrap_or(today),
                today + Days::new(15),
                "Mike Johnson",
                customer_ids[2],
                "Database Services",
                200000.0,
                ProjectStatus::Ongoing,
            ),
        ];

        for (number, name, start, end, manager, customer_id, service, price, status) in projects {
            sqlx::query(
                r#"
                INSERT INTO projects
                    (project_number, name, start_date, end_date, project_manager, customer_id, service, total_price, status)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(number)
            .bind(name)
            .bind(start)
            .bind(end)
            .bind(manager)
            .bind(customer_id)
            .bind(service)
            .bind(price)
            .bind(status.to_string())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::info!("Seeded sample customers and projects");

        Ok(true)
    }
}

const SEED_CUSTOMERS: [&str; 3] = ["Sample Customer", "Tech Corp", "Data Inc"];

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// Connect, migrate and seed the store named in the configuration
pub async fn init(config: &Config) -> RepositoryResult<Database> {
    let db = Database::connect(config.connection_string()).await?;
    db.migrate().await?;
    db.seed().await?;

    Ok(db)
}

/// Empty, migrated in-memory store for tests
#[cfg(test)]
pub async fn test_database() -> Database {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    db.migrate().await.unwrap();
    db
}
