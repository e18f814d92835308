use std::io::{BufRead, Write};

use anyhow::Result;
use crossterm::style::Stylize;

use crate::models::ProjectDetails;
use crate::ui::Console;

impl<I: BufRead, O: Write> Console<I, O> {
    /// List every project, optionally drilling into one of them
    pub(super) async fn list_projects(&mut self) -> Result<()> {
        self.clear()?;
        self.print_section_title("List of Projects")?;

        let projects = match self.projects.list_all().await {
            Ok(projects) => projects,
            Err(err) => {
                self.print_error(&err)?;
                return self.pause();
            }
        };

        if projects.is_empty() {
            writeln!(self.output, "No projects found.")?;
            return self.pause();
        }

        for p in &projects {
            writeln!(
                self.output,
                "{} - {} ({} to {}) - {}",
                p.project_number,
                p.name,
                p.start_date.format("%Y-%m-%d"),
                p.end_date.format("%Y-%m-%d"),
                p.status
            )?;
        }

        writeln!(self.output)?;
        let input = self.prompt("Enter project number to view details or 0 to go back")?;
        if input.is_empty() || input == "0" {
            return Ok(());
        }

        match self.projects.get_details(&input).await {
            Ok(details) => self.show_project_details(details).await,
            Err(err) => {
                self.print_error(&err)?;
                self.pause()
            }
        }
    }

    async fn show_project_details(&mut self, details: ProjectDetails) -> Result<()> {
        self.clear()?;
        let project = &details.project;
        self.print_section_title(&format!("Project Details ({})", project.project_number))?;

        writeln!(self.output, "Name: {}", project.name)?;
        writeln!(
            self.output,
            "Duration: {} to {}",
            project.start_date.format("%Y-%m-%d"),
            project.end_date.format("%Y-%m-%d")
        )?;
        writeln!(self.output, "Manager: {}", project.project_manager)?;
        writeln!(self.output, "Customer: {}", details.customer_name)?;
        writeln!(self.output, "Service: {}", project.service)?;
        writeln!(self.output, "Total Price: {:.2} SEK", project.total_price)?;
        writeln!(self.output, "Status: {}", project.status)?;
        writeln!(self.output, "Remaining Days: {}", project.remaining_days())?;
        if project.is_behind_schedule() {
            let warning = "This project is behind schedule.";
            if self.styled {
                writeln!(self.output, "{}", warning.red().bold())?;
            } else {
                writeln!(self.output, "{}", warning)?;
            }
        }

        writeln!(self.output)?;
        if self.confirm("Edit Project?")? {
            self.edit_project(details.project).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::ui::tests::{console, output};

    #[tokio::test]
    async fn test_list_shows_seeded_projects() {
        let (_db, mut console) = console("1\n0\n4\n").await;
        console.run().await.unwrap();

        let out = output(&console);
        assert!(out.contains("===== List of Projects ====="));
        assert!(out.contains("P001 - Sample Project ("));
        assert!(out.contains(") - NotStarted"));
        assert!(out.contains("P003 - Database Migration ("));
    }

    #[tokio::test]
    async fn test_details_view_resolves_customer() {
        let (_db, mut console) = console("1\nP002\nn\n4\n").await;
        console.run().await.unwrap();

        let out = output(&console);
        assert!(out.contains("===== Project Details (P002) ====="));
        assert!(out.contains("Customer: Tech Corp"));
        assert!(out.contains("Total Price: 150000.00 SEK"));
        assert!(out.contains("Status: Ongoing"));
        assert!(!out.contains("behind schedule"));
    }

    #[tokio::test]
    async fn test_unknown_project_reports_not_found() {
        let (_db, mut console) = console("1\nP404\n\n4\n").await;
        console.run().await.unwrap();

        assert!(output(&console).contains("Error: Project with number P404 not found."));
    }

    #[tokio::test]
    async fn test_empty_store_says_so() {
        let db = crate::db::test_database().await;
        let projects = crate::services::ProjectService::new(
            crate::repositories::SqliteProjectRepository::new(db.get_pool().clone()),
        );
        let customers = crate::services::CustomerService::new(
            crate::repositories::SqliteCustomerRepository::new(db.get_pool().clone()),
        );
        let input = std::io::Cursor::new(b"1\n\n4\n".to_vec());
        let mut console = crate::ui::Console::new(input, Vec::new(), projects, customers);
        console.run().await.unwrap();

        assert!(output(&console).contains("No projects found."));
    }
}
