use robostore_core::{ListParams, ListResult, ServiceError, new_id, now_stamp};
use robostore_sql::Value;

use crate::model::Customer;
use crate::model::customer::is_valid_email;

use super::ShopService;

// User-facing messages are fixed Russian strings; clients match on
// error codes, not on these.
const MSG_EMAIL_EXISTS: &str =
    "Email уже существует. Пожалуйста, используйте другой email.";
const MSG_EMAIL_INVALID: &str = "Введите корректный email адрес.";

impl ShopService {
    pub fn create_customer(&self, email: String) -> Result<Customer, ServiceError> {
        if !is_valid_email(&email) {
            return Err(ServiceError::Validation(MSG_EMAIL_INVALID.into()));
        }

        // Duplicate pre-check for a clean message; the UNIQUE column
        // still backstops races with a Conflict.
        let existing = self.count_records("customers", &[("email", Value::Text(email.clone()))])?;
        if existing > 0 {
            return Err(ServiceError::Conflict(MSG_EMAIL_EXISTS.into()));
        }

        let record = Customer {
            id: new_id(),
            email: email.clone(),
            created_at: Some(now_stamp()),
        };

        self.insert_record(
            "customers",
            &record.id,
            &record,
            &[
                ("email", Value::Text(email)),
                ("created_at", Value::Text(record.created_at.clone().unwrap_or_default())),
            ],
        )
        .map_err(|e| match e {
            ServiceError::Conflict(_) => ServiceError::Conflict(MSG_EMAIL_EXISTS.into()),
            other => other,
        })?;

        Ok(record)
    }

    pub fn get_customer(&self, id: &str) -> Result<Customer, ServiceError> {
        self.get_record("customers", id)
    }

    pub fn list_customers(&self, params: &ListParams) -> Result<ListResult<Customer>, ServiceError> {
        let limit = params.limit.min(500);
        self.list_records("customers", &[], "created_at DESC, id", limit, params.offset)
    }
}
