mod customer;
mod project;

pub use customer::CustomerService;
pub use project::ProjectService;
