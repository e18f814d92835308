//! Menu-driven console front end.
//!
//! The console reads whole lines from any `BufRead` and writes to any `Write`,
//! so the same flows run against a terminal or a scripted buffer.

mod project_wizard;
mod projects;
mod prompt;

use std::io::{BufRead, Write};

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    execute,
    style::Stylize,
    terminal::{Clear, ClearType},
};

use crate::error::ServiceError;
use crate::repositories::{SqliteCustomerRepository, SqliteProjectRepository};
use crate::services::{CustomerService, ProjectService};

pub type Projects = ProjectService<SqliteProjectRepository>;
pub type Customers = CustomerService<SqliteCustomerRepository>;

// Represents the current screen in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    MainMenu,
    ListProjects,
    CreateProject,
    EditProject,
}

pub struct Console<I, O> {
    input: I,
    output: O,
    projects: Projects,
    customers: Customers,
    // Colors and screen clearing, only for a real terminal
    styled: bool,
}

impl<I: BufRead, O: Write> Console<I, O> {
    pub fn new(input: I, output: O, projects: Projects, customers: Customers) -> Self {
        Self {
            input,
            output,
            projects,
            customers,
            styled: false,
        }
    }

    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    /// Run the menu loop until the user exits or input ends
    pub async fn run(&mut self) -> Result<()> {
        match self.run_screens().await {
            Err(err) if err.is::<prompt::InputClosed>() => {
                tracing::debug!("Input closed, leaving menu loop");
                Ok(())
            }
            other => other,
        }
    }

    async fn run_screens(&mut self) -> Result<()> {
        let mut screen = Screen::MainMenu;
        loop {
            screen = match screen {
                Screen::MainMenu => match self.main_menu()? {
                    Some(next) => next,
                    None => return Ok(()),
                },
                Screen::ListProjects => {
                    self.list_projects().await?;
                    Screen::MainMenu
                }
                Screen::CreateProject => {
                    self.create_project().await?;
                    Screen::MainMenu
                }
                Screen::EditProject => {
                    self.edit_project_menu().await?;
                    Screen::MainMenu
                }
            };
        }
    }

    /// Show the menu and map the selection to a screen; `None` means exit
    fn main_menu(&mut self) -> Result<Option<Screen>> {
        self.clear()?;
        self.print_header("Project Management System")?;

        for (number, text) in [
            (1, "View All Projects"),
            (2, "Create a New Project"),
            (3, "Edit an Existing Project"),
            (4, "Exit"),
        ] {
            writeln!(self.output, "{}. {}", number, text)?;
        }

        let choice = self.prompt("Select an option")?;
        Ok(match choice.as_str() {
            "1" => Some(Screen::ListProjects),
            "2" => Some(Screen::CreateProject),
            "3" => Some(Screen::EditProject),
            "4" => None,
            _ => Some(Screen::MainMenu),
        })
    }

    fn clear(&mut self) -> Result<()> {
        if self.styled {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    fn print_header(&mut self, header: &str) -> Result<()> {
        let line = "═".repeat(header.chars().count() + 8);
        let lines = [
            format!("╔{}╗", line),
            format!("║    {}    ║", header),
            format!("╚{}╝", line),
        ];
        for l in lines {
            if self.styled {
                writeln!(self.output, "{}", l.cyan().bold())?;
            } else {
                writeln!(self.output, "{}", l)?;
            }
        }
        Ok(())
    }

    fn print_section_title(&mut self, title: &str) -> Result<()> {
        let text = format!("===== {} =====", title);
        if self.styled {
            writeln!(self.output, "\n{}", text.yellow())?;
        } else {
            writeln!(self.output, "\n{}", text)?;
        }
        Ok(())
    }

    /// Report a failed operation; the menu loop carries on afterwards
    fn print_error(&mut self, err: &ServiceError) -> Result<()> {
        tracing::debug!(error = %err, "Operation failed");
        if self.styled {
            writeln!(self.output, "{}", err.to_string().red())?;
        } else {
            writeln!(self.output, "Error: {}", err)?;
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.prompt("Press Enter to continue...")?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::{test_database, Database};
    use std::io::{self, Cursor};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Console over a seeded in-memory store, fed with the given script
    pub(crate) async fn console(script: &str) -> (Database, Console<Cursor<Vec<u8>>, Vec<u8>>) {
        let db = test_database().await;
        db.seed().await.unwrap();
        let projects = ProjectService::new(SqliteProjectRepository::new(db.get_pool().clone()));
        let customers = CustomerService::new(SqliteCustomerRepository::new(db.get_pool().clone()));
        let input = Cursor::new(script.as_bytes().to_vec());
        let console = Console::new(input, Vec::new(), projects, customers);
        (db, console)
    }

    pub(crate) fn output(console: &Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.output.clone()).unwrap()
    }

    #[tokio::test]
    async fn test_exit_option_stops_loop() {
        let (_db, mut console) = console("4\n").await;
        console.run().await.unwrap();

        let out = output(&console);
        assert!(out.contains("║    Project Management System    ║"));
        assert!(out.contains("1. View All Projects"));
        assert_eq!(out.matches("Select an option").count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_choice_redisplays_menu() {
        let (_db, mut console) = console("9\n\n4\n").await;
        console.run().await.unwrap();

        assert_eq!(output(&console).matches("Select an option").count(), 3);
    }

    #[tokio::test]
    async fn test_end_of_input_exits_cleanly() {
        let (_db, mut console) = console("").await;
        assert!(console.run().await.is_ok());
    }

    #[tokio::test]
    async fn test_reported_error_stays_below_default_log_level() {
        let (_db, mut console) = console("").await;
        let logs = Captured::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            console
                .print_error(&ServiceError::validation("Service cannot be empty."))
                .unwrap()
        });

        assert!(output(&console).contains("Error: Service cannot be empty."));
        assert!(logs.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_plain_output_has_no_escape_codes() {
        let (_db, mut console) = console("1\n0\n4\n").await;
        console.run().await.unwrap();

        assert!(!output(&console).contains('\u{1b}'));
    }
}
