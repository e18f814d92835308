use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{Project, ProjectDetails, ProjectInput, ProjectRow, ProjectStatus};

/// Data access for projects
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// All projects ordered by project number
    async fn list_all(&self) -> RepositoryResult<Vec<Project>>;

    async fn get(&self, project_number: &str) -> RepositoryResult<Option<Project>>;

    /// Project together with its customer's name
    async fn get_details(&self, project_number: &str) -> RepositoryResult<Option<ProjectDetails>>;

    /// Insert a project under the next free project number
    async fn create(&self, input: ProjectInput) -> RepositoryResult<Project>;

    /// Persist every field except the project number; `false` if no row matched
    async fn update(&self, project: &Project) -> RepositoryResult<bool>;

    async fn next_project_number(&self) -> RepositoryResult<String>;
}

/// Number that follows the highest existing one, `P001` for an empty store
///
/// The maximum is taken over the parsed integers, so `P1000` follows `P999`
/// even though it sorts before it as a string.
pub fn next_project_number<'a, I>(existing: I) -> RepositoryResult<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut highest: Option<u32> = None;
    for number in existing {
        let parsed = parse_project_number(number)?;
        highest = Some(highest.map_or(parsed, |h| h.max(parsed)));
    }

    match highest {
        None => Ok("P001".to_string()),
        Some(n) => n
            .checked_add(1)
            .map(|next| format!("P{:03}", next))
            .ok_or_else(|| RepositoryError::InvalidProjectNumber(format!("P{}", n))),
    }
}

fn parse_project_number(number: &str) -> RepositoryResult<u32> {
    number
        .strip_prefix('P')
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| RepositoryError::InvalidProjectNumber(number.to_string()))
}

/// A rejected customer reference becomes `UnknownCustomer`
fn customer_violation(err: sqlx::Error, customer_id: i64) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            RepositoryError::UnknownCustomer(customer_id)
        }
        _ => err.into(),
    }
}

impl TryFrom<ProjectRow> for Project {
    type Error = RepositoryError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let status = ProjectStatus::from_str(&row.status)
            .map_err(|_| RepositoryError::InvalidStatus(row.status.clone()))?;

        Ok(Project {
            project_number: row.project_number,
            name: row.name,
            start_date: row.start_date,
            end_date: row.end_date,
            project_manager: row.project_manager,
            customer_id: row.customer_id,
            service: row.service,
            total_price: row.total_price,
            status,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProjectDetailsRow {
    #[sqlx(flatten)]
    project: ProjectRow,
    customer_name: String,
}

const PROJECT_COLUMNS: &str = "p.project_number, p.name, p.start_date, p.end_date, \
     p.project_manager, p.customer_id, p.service, p.total_price, p.status";

pub struct SqliteProjectRepository {
    pool: SqlitePool,
}

impl SqliteProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqliteProjectRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects p \
             ORDER BY LENGTH(p.project_number) ASC, p.project_number ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Project::try_from).collect()
    }

    async fn get(&self, project_number: &str) -> RepositoryResult<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects p WHERE p.project_number = ?"
        ))
        .bind(project_number)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Project::try_from).transpose()
    }

    async fn get_details(&self, project_number: &str) -> RepositoryResult<Option<ProjectDetails>> {
        let row = sqlx::query_as::<_, ProjectDetailsRow>(&format!(
            "SELECT {PROJECT_COLUMNS}, c.name AS customer_name \
             FROM projects p \
             JOIN customers c ON c.customer_id = p.customer_id \
             WHERE p.project_number = ?"
        ))
        .bind(project_number)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(ProjectDetails {
                project: Project::try_from(r.project)?,
                customer_name: r.customer_name,
            })),
            None => Ok(None),
        }
    }

    async fn create(&self, input: ProjectInput) -> RepositoryResult<Project> {
        let mut tx = self.pool.begin().await?;

        let existing: Vec<String> = sqlx::query_scalar("SELECT project_number FROM projects")
            .fetch_all(&mut *tx)
            .await?;
        let project_number = next_project_number(existing.iter().map(String::as_str))?;

        let project = Project {
            project_number,
            name: input.name,
            start_date: input.start_date,
            end_date: input.end_date,
            project_manager: input.project_manager,
            customer_id: input.customer_id,
            service: input.service,
            total_price: input.total_price,
            status: input.status,
        };

        sqlx::query(
            r#"
            INSERT INTO projects
                (project_number, name, start_date, end_date, project_manager, customer_id, service, total_price, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&project.project_number)
        .bind(&project.name)
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(&project.project_manager)
        .bind(project.customer_id)
        .bind(&project.service)
        .bind(project.total_price)
        .bind(project.status.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|err| customer_violation(err, project.customer_id))?;

        tx.commit().await?;

        tracing::info!(project_number = %project.project_number, "Created project");
        Ok(project)
    }

    async fn update(&self, project: &Project) -> RepositoryResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET name = ?, start_date = ?, end_date = ?, project_manager = ?,
                customer_id = ?, service = ?, total_price = ?, status = ?
            WHERE project_number = ?
            "#,
        )
        .bind(&project.name)
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(&project.project_manager)
        .bind(project.customer_id)
        .bind(&project.service)
        .bind(project.total_price)
        .bind(project.status.to_string())
        .bind(&project.project_number)
        .execute(&self.pool)
        .await
        .map_err(|err| customer_violation(err, project.customer_id))?;

        let updated = result.rows_affected() > 0;
        if updated {
            tracing::info!(project_number = %project.project_number, "Updated project");
        }
        Ok(updated)
    }

    async fn next_project_number(&self) -> RepositoryResult<String> {
        let existing: Vec<String> = sqlx::query_scalar("SELECT project_number FROM projects")
            .fetch_all(&self.pool)
            .await?;

        next_project_number(existing.iter().map(String::as_str))
    }
}
