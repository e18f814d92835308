use chrono::{Local, NaiveDate};

use crate::error::ServiceError;
use crate::models::ProjectStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub project_number: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub project_manager: String,
    pub customer_id: i64,
    pub service: String,
    pub total_price: f64,
    pub status: ProjectStatus,
}

impl Project {
    /// Days left until the end date, never negative
    pub fn remaining_days(&self) -> i64 {
        self.remaining_days_at(today())
    }

    pub fn remaining_days_at(&self, today: NaiveDate) -> i64 {
        (self.end_date - today).num_days().max(0)
    }

    /// An ongoing project whose end date has passed
    pub fn is_behind_schedule(&self) -> bool {
        self.is_behind_schedule_at(today())
    }

    pub fn is_behind_schedule_at(&self, today: NaiveDate) -> bool {
        self.status == ProjectStatus::Ongoing && today > self.end_date
    }
}

/// Project joined with the name of its customer
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetails {
    pub project: Project,
    pub customer_name: String,
}

/// Row shape of the `projects` table; `status` is decoded separately
#[derive(sqlx::FromRow, Debug)]
pub struct ProjectRow {
    pub project_number: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub project_manager: String,
    pub customer_id: i64,
    pub service: String,
    pub total_price: f64,
    pub status: String,
}

/// Fields supplied by the user when creating a project
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInput {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub project_manager: String,
    pub customer_id: i64,
    pub service: String,
    pub total_price: f64,
    pub status: ProjectStatus,
}

impl ProjectInput {
    /// Check the business rules in a fixed order, reporting the first violation
    pub fn validate(&self) -> Result<(), ServiceError> {
        self.check(true)
    }

    /// Same rules, minus the customer id, for a customer that is not stored yet
    pub fn validate_with_pending_customer(&self) -> Result<(), ServiceError> {
        self.check(false)
    }

    fn check(&self, customer_stored: bool) -> Result<(), ServiceError> {
        if self.name.trim().is_empty() {
            return Err(ServiceError::validation("Project name cannot be empty."));
        }
        if self.project_manager.trim().is_empty() {
            return Err(ServiceError::validation("Project manager cannot be empty."));
        }
        if customer_stored && self.customer_id <= 0 {
            return Err(ServiceError::validation("Customer ID must be valid."));
        }
        if self.service.trim().is_empty() {
            return Err(ServiceError::validation("Service cannot be empty."));
        }
        if self.start_date > self.end_date {
            return Err(ServiceError::validation("Start date must be before end date."));
        }
        if !self.total_price.is_finite() || self.total_price < 0.0 {
            return Err(ServiceError::validation("Total price cannot be negative."));
        }

        Ok(())
    }
}

impl From<&Project> for ProjectInput {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            start_date: project.start_date,
            end_date: project.end_date,
            project_manager: project.project_manager.clone(),
            customer_id: project.customer_id,
            service: project.service.clone(),
            total_price: project.total_price,
            status: project.status,
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_input() -> ProjectInput {
        ProjectInput {
            name: "Website Redesign".to_string(),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 3, 1),
            project_manager: "Jane Smith".to_string(),
            customer_id: 1,
            service: "Web Design".to_string(),
            total_price: 150000.0,
            status: ProjectStatus::Ongoing,
        }
    }

    fn project(status: ProjectStatus, end_date: NaiveDate) -> Project {
        Project {
            project_number: "P001".to_string(),
            name: "Sample Project".to_string(),
            start_date: date(2024, 1, 1),
            end_date,
            project_manager: "John Doe".to_string(),
            customer_id: 1,
            service: "Development".to_string(),
            total_price: 300000.0,
            status,
        }
    }

    fn validation_message(input: &ProjectInput) -> String {
        match input.validate() {
            Err(ServiceError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid_input().validate().is_ok());

        let mut same_day = valid_input();
        same_day.end_date = same_day.start_date;
        same_day.total_price = 0.0;
        assert!(same_day.validate().is_ok());
    }

    #[test]
    fn test_rules_are_checked_in_order() {
        let mut input = valid_input();
        input.name = "   ".to_string();
        input.project_manager = String::new();
        assert_eq!(validation_message(&input), "Project name cannot be empty.");

        input.name = "Named".to_string();
        assert_eq!(validation_message(&input), "Project manager cannot be empty.");

        input.project_manager = "Mike Johnson".to_string();
        input.customer_id = 0;
        input.service = String::new();
        assert_eq!(validation_message(&input), "Customer ID must be valid.");

        input.customer_id = 3;
        assert_eq!(validation_message(&input), "Service cannot be empty.");

        input.service = "Database Services".to_string();
        input.start_date = date(2024, 5, 1);
        input.total_price = -1.0;
        assert_eq!(validation_message(&input), "Start date must be before end date.");

        input.start_date = date(2024, 1, 1);
        assert_eq!(validation_message(&input), "Total price cannot be negative.");

        input.total_price = f64::NAN;
        assert_eq!(validation_message(&input), "Total price cannot be negative.");
    }

    #[test]
    fn test_pending_customer_skips_only_the_id_rule() {
        let mut input = valid_input();
        input.customer_id = 0;
        assert!(input.validate().is_err());
        assert!(input.validate_with_pending_customer().is_ok());

        input.end_date = date(2023, 12, 1);
        assert!(matches!(
            input.validate_with_pending_customer(),
            Err(ServiceError::Validation(msg)) if msg == "Start date must be before end date."
        ));
    }

    #[test]
    fn test_remaining_days_never_negative() {
        let p = project(ProjectStatus::Ongoing, date(2024, 3, 1));
        assert_eq!(p.remaining_days_at(date(2024, 2, 20)), 10);
        assert_eq!(p.remaining_days_at(date(2024, 3, 1)), 0);
        assert_eq!(p.remaining_days_at(date(2024, 4, 1)), 0);
    }

    #[test]
    fn test_behind_schedule_only_when_ongoing_and_overdue() {
        let overdue = date(2024, 3, 2);
        assert!(project(ProjectStatus::Ongoing, date(2024, 3, 1)).is_behind_schedule_at(overdue));
        assert!(!project(ProjectStatus::Ongoing, date(2024, 3, 1)).is_behind_schedule_at(date(2024, 3, 1)));
        assert!(!project(ProjectStatus::Completed, date(2024, 3, 1)).is_behind_schedule_at(overdue));
        assert!(!project(ProjectStatus::NotStarted, date(2024, 3, 1)).is_behind_schedule_at(overdue));
    }
}
