mod customer;
mod project;

pub use customer::{CustomerRepository, SqliteCustomerRepository};
pub use project::{ProjectRepository, SqliteProjectRepository};

#[cfg(test)]
pub use customer::MockCustomerRepository;
#[cfg(test)]
pub use project::MockProjectRepository;
