use std::io::{BufRead, Write};

use anyhow::Result;

use crate::error::ServiceResult;
use crate::models::{Customer, Project, ProjectInput, ProjectStatus};
use crate::ui::Console;

/// Customer picked in the wizard; a new one is stored only when the project is
#[derive(Debug, Clone, PartialEq)]
enum CustomerChoice {
    Existing(i64),
    New(String),
}

impl CustomerChoice {
    fn check(&self, input: &ProjectInput) -> ServiceResult<()> {
        match self {
            CustomerChoice::Existing(_) => input.validate(),
            CustomerChoice::New(_) => input.validate_with_pending_customer(),
        }
    }
}

impl<I: BufRead, O: Write> Console<I, O> {
    /// Collect the fields of a new project and hand them to the service
    pub(super) async fn create_project(&mut self) -> Result<()> {
        self.clear()?;
        self.print_section_title("Create a New Project")?;

        let name = self.prompt_text("Name", None)?;
        let start_date = self.prompt_date("Start Date", None)?;
        let end_date = self.prompt_date("End Date", None)?;
        let project_manager = self.prompt_text("Manager", None)?;
        let Some(choice) = self.select_customer(None).await? else {
            return self.pause();
        };
        let service = self.prompt_text("Service", None)?;
        let total_price = self.prompt_price("Total Price (SEK)", None)?;
        let status = self.prompt_status(ProjectStatus::default())?;

        let mut input = ProjectInput {
            name,
            start_date,
            end_date,
            project_manager,
            customer_id: match choice {
                CustomerChoice::Existing(id) => id,
                CustomerChoice::New(_) => 0,
            },
            service,
            total_price,
            status,
        };

        if let Err(err) = choice.check(&input) {
            self.print_error(&err)?;
            return self.pause();
        }
        let Some(customer_id) = self.store_customer(choice).await? else {
            return self.pause();
        };
        input.customer_id = customer_id;

        match self.projects.create(Some(input)).await {
            Ok(project) => writeln!(self.output, "Project {} created.", project.project_number)?,
            Err(err) => self.print_error(&err)?,
        }
        self.pause()
    }

    pub(super) async fn edit_project_menu(&mut self) -> Result<()> {
        self.clear()?;
        self.print_section_title("Edit an Existing Project")?;

        let input = self.prompt("Enter project number to edit")?;
        if input.is_empty() {
            return Ok(());
        }

        match self.projects.get(&input).await {
            Ok(project) => self.edit_project(project).await,
            Err(err) => {
                self.print_error(&err)?;
                self.pause()
            }
        }
    }

    /// Walk through every field, then persist only on an explicit yes
    pub(super) async fn edit_project(&mut self, mut project: Project) -> Result<()> {
        self.clear()?;
        self.print_section_title(&format!("Editing: {}", project.project_number))?;

        project.name = self.prompt_text("Name", Some(&project.name))?;
        project.start_date = self.prompt_date("Start Date", Some(project.start_date))?;
        project.end_date = self.prompt_date("End Date", Some(project.end_date))?;
        project.project_manager = self.prompt_text("Manager", Some(&project.project_manager))?;
        let Some(choice) = self.select_customer(Some(project.customer_id)).await? else {
            return self.pause();
        };
        if let CustomerChoice::Existing(id) = &choice {
            project.customer_id = *id;
        }
        project.service = self.prompt_text("Service", Some(&project.service))?;
        project.total_price = self.prompt_price("Total Price (SEK)", Some(project.total_price))?;
        project.status = self.prompt_status(project.status)?;

        if !self.confirm("Save?")? {
            writeln!(self.output, "Changes discarded.")?;
            return self.pause();
        }

        if let Err(err) = choice.check(&ProjectInput::from(&project)) {
            self.print_error(&err)?;
            return self.pause();
        }
        let Some(customer_id) = self.store_customer(choice).await? else {
            return self.pause();
        };
        project.customer_id = customer_id;

        match self.projects.update(&project).await {
            Ok(()) => writeln!(self.output, "Saved.")?,
            Err(err) => self.print_error(&err)?,
        }
        self.pause()
    }

    /// Pick an existing customer by id or name a new one
    ///
    /// Returns `None` when the customer list cannot be loaded.
    async fn select_customer(&mut self, current: Option<i64>) -> Result<Option<CustomerChoice>> {
        let customers = match self.customers.list_all().await {
            Ok(customers) => customers,
            Err(err) => {
                self.print_error(&err)?;
                return Ok(None);
            }
        };

        writeln!(self.output, "Customers:")?;
        for c in &customers {
            writeln!(self.output, "  {}. {}", c.customer_id, c.name)?;
        }

        loop {
            let input = self.prompt_with_default(
                "Customer ID (or 'n' for a new customer)",
                current.as_ref(),
            )?;

            if input.is_empty() {
                match current {
                    Some(id) => return Ok(Some(CustomerChoice::Existing(id))),
                    None => continue,
                }
            }

            if input.eq_ignore_ascii_case("n") {
                let name = self.prompt("Customer name")?;
                match Customer::validate_name(&name) {
                    Ok(name) => return Ok(Some(CustomerChoice::New(name.to_string()))),
                    Err(err) => {
                        self.print_error(&err)?;
                        continue;
                    }
                }
            }

            let Ok(id) = input.parse::<i64>() else {
                writeln!(self.output, "Please enter a customer ID.")?;
                continue;
            };
            match self.customers.get(id).await {
                Ok(customer) => return Ok(Some(CustomerChoice::Existing(customer.customer_id))),
                Err(err) => self.print_error(&err)?,
            }
        }
    }

    /// Resolve the choice to a stored customer id, creating a new customer if needed
    async fn store_customer(&mut self, choice: CustomerChoice) -> Result<Option<i64>> {
        let name = match choice {
            CustomerChoice::Existing(id) => return Ok(Some(id)),
            CustomerChoice::New(name) => name,
        };

        match self.customers.create(&name).await {
            Ok(customer) => {
                writeln!(
                    self.output,
                    "Customer {} created with ID {}.",
                    customer.name, customer.customer_id
                )?;
                Ok(Some(customer.customer_id))
            }
            Err(err) => {
                self.print_error(&err)?;
                Ok(None)
            }
        }
    }
}
