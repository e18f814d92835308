use std::sync::Arc;

use crate::error::{RepositoryError, ServiceError, ServiceResult};
use crate::models::{Project, ProjectDetails, ProjectInput};
use crate::repositories::ProjectRepository;

/// Service layer for project business rules
pub struct ProjectService<R: ProjectRepository> {
    repository: Arc<R>,
}

impl<R: ProjectRepository> Clone for ProjectService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_all(&self) -> ServiceResult<Vec<Project>> {
        self.repository.list_all().await.map_err(|e| {
            ServiceError::unexpected("Failed to retrieve projects. Please try again later.", e)
        })
    }

    pub async fn get(&self, project_number: &str) -> ServiceResult<Project> {
        let project_number = require_number(project_number)?;

        self.repository
            .get(project_number)
            .await
            .map_err(|e| retrieve_failed(project_number, e))?
            .ok_or_else(|| not_found(project_number))
    }

    /// Like [`ProjectService::get`], with the customer name resolved
    pub async fn get_details(&self, project_number: &str) -> ServiceResult<ProjectDetails> {
        let project_number = require_number(project_number)?;

        self.repository
            .get_details(project_number)
            .await
            .map_err(|e| retrieve_failed(project_number, e))?
            .ok_or_else(|| not_found(project_number))
    }

    /// Validate and persist a new project
    ///
    /// Validation errors are returned as-is; store failures are wrapped.
    pub async fn create(&self, input: Option<ProjectInput>) -> ServiceResult<Project> {
        let input = input.ok_or(ServiceError::MissingInput)?;
        input.validate()?;

        self.repository.create(input).await.map_err(|e| match e {
            RepositoryError::UnknownCustomer(id) => customer_not_found(id),
            e => ServiceError::unexpected("Failed to create project. Please try again later.", e),
        })
    }

    /// Save edits made to an existing project
    pub async fn update(&self, project: &Project) -> ServiceResult<()> {
        ProjectInput::from(project).validate()?;

        let updated = self.repository.update(project).await.map_err(|e| match e {
            RepositoryError::UnknownCustomer(id) => customer_not_found(id),
            e => ServiceError::unexpected(
                format!(
                    "Failed to save project {}. Please try again later.",
                    project.project_number
                ),
                e,
            ),
        })?;

        if !updated {
            return Err(not_found(&project.project_number));
        }
        Ok(())
    }
}

fn require_number(project_number: &str) -> ServiceResult<&str> {
    let trimmed = project_number.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation("Project number cannot be empty."));
    }
    Ok(trimmed)
}

fn not_found(project_number: &str) -> ServiceError {
    ServiceError::NotFound(format!("Project with number {} not found.", project_number))
}

fn customer_not_found(customer_id: i64) -> ServiceError {
    ServiceError::NotFound(format!("Customer with ID {} not found.", customer_id))
}

fn retrieve_failed(project_number: &str, source: RepositoryError) -> ServiceError {
    ServiceError::unexpected(
        format!(
            "Failed to retrieve project {}. Please try again later.",
            project_number
        ),
        source,
    )
}
