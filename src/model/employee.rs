use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": "E001",
        "full_name": "Alice Smith",
        "email": "alice@company.com",
        "department": "Engineering"
    })
)]
pub struct Employee {
    /// Surrogate id assigned by the store
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "E001")]
    pub employee_id: String,

    #[schema(example = "Alice Smith")]
    pub full_name: String,

    #[schema(example = "alice@company.com", format = "email")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,
}

/// Create payload. Every field is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewEmployee {
    #[validate(length(min = 1, max = 50, message = "employee_id must be 1-50 characters"))]
    #[schema(example = "E001")]
    pub employee_id: String,

    #[validate(length(min = 1, max = 100, message = "full_name must be 1-100 characters"))]
    #[schema(example = "Alice Smith")]
    pub full_name: String,

    #[validate(
        email(message = "email must be a valid email address"),
        regex(
            path = "*crate::validation::DOTTED_EMAIL_REGEX",
            message = "email must be a valid email address"
        ),
        length(max = 150, message = "email must not exceed 150 characters")
    )]
    #[schema(example = "alice@company.com", format = "email")]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "department must be 1-100 characters"))]
    #[schema(example = "Engineering")]
    pub department: String,
}

impl NewEmployee {
    pub fn into_employee(self, id: u64) -> Employee {
        Employee {
            id,
            employee_id: self.employee_id,
            full_name: self.full_name,
            email: self.email,
            department: self.department,
        }
    }
}
