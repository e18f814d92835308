use crate::error::ServiceError;

#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
}

impl Customer {
    /// Trimmed customer name, or a validation error when it is blank
    pub fn validate_name(name: &str) -> Result<&str, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("Customer name cannot be empty."));
        }
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_trims_and_rejects_blank() {
        assert_eq!(Customer::validate_name("  Nordic AB ").unwrap(), "Nordic AB");
        for blank in ["", " ", "\t"] {
            assert!(matches!(
                Customer::validate_name(blank),
                Err(ServiceError::Validation(msg)) if msg == "Customer name cannot be empty."
            ));
        }
    }
}
