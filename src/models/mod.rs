mod customer;
mod project;
mod status;

pub use customer::Customer;
pub use project::{Project, ProjectDetails, ProjectInput, ProjectRow};
pub use status::ProjectStatus;
