use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How an employee's pay for a month window is derived: a per-present-day
/// rate, or a flat monthly amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum SalaryType {
    Daily,
    Monthly,
}

/// Database row. Carries the credential hash, so it never derives
/// `Serialize`; responses go through [`EmployeeView`] or [`EmployeeRef`].
#[derive(Debug, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub id_no: String,
    pub name: String,
    pub role: String,
    pub salary_type: SalaryType,
    pub salary_amount: f64,
    pub password: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": 1,
        "idNo": "E100",
        "name": "Jane Doe",
        "role": "Technician",
        "salaryType": "DAILY",
        "salaryAmount": 150.0,
        "createdAt": "2024-01-01T00:00:00Z"
    })
)]
pub struct EmployeeView {
    pub id: i64,
    #[schema(example = "E100")]
    pub id_no: String,
    pub name: String,
    pub role: String,
    pub salary_type: SalaryType,
    pub salary_amount: f64,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeView {
    fn from(emp: Employee) -> Self {
        Self {
            id: emp.id,
            id_no: emp.id_no,
            name: emp.name,
            role: emp.role,
            salary_type: emp.salary_type,
            salary_amount: emp.salary_amount,
            created_at: emp.created_at,
        }
    }
}

/// Identity-only view used by self-service responses.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRef {
    pub id: i64,
    pub id_no: String,
    pub name: String,
    pub role: String,
}

impl From<Employee> for EmployeeRef {
    fn from(emp: Employee) -> Self {
        Self {
            id: emp.id,
            id_no: emp.id_no,
            name: emp.name,
            role: emp.role,
        }
    }
}
