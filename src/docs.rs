use crate::api::attendance::{AttendanceLog, MarkAttendance};
use crate::api::employee::{CreateEmployee, UpdateEmployee};
use crate::api::employee_me::MyAttendanceLog;
use crate::api::salary::{SalaryReport, SalarySummary};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::{EmployeeRef, EmployeeView, SalaryType};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Worktrack API",
        version = "1.0.0",
        description = r#"
## Worktrack: attendance & payroll

Administrators manage employee records, mark daily attendance, and compute
salary owed per month; employees sign in separately to view their own
attendance and salary.

### 🔹 Key Features
- **Employee Management**
  - Create, update, list, and delete employee profiles
- **Attendance**
  - One record per employee per day; marking twice updates in place
- **Salary**
  - Per-employee and whole-company monthly summaries (daily rate × days
    present, or flat monthly amount)

### 🔐 Security
Endpoints are protected with **JWT Bearer authentication**. Admin tokens and
employee self-service tokens carry different roles; each endpoint accepts
exactly one of them.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::attendance_by_employee,

        crate::api::salary::salary_for_employee,
        crate::api::salary::salary_report,

        crate::api::employee_me::my_attendance,
        crate::api::employee_me::my_salary
    ),
    components(
        schemas(
            CreateEmployee,
            UpdateEmployee,
            EmployeeView,
            EmployeeRef,
            SalaryType,
            MarkAttendance,
            AttendanceRecord,
            AttendanceStatus,
            AttendanceLog,
            MyAttendanceLog,
            SalarySummary,
            SalaryReport
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Salary", description = "Salary reporting APIs"),
        (name = "Employee self-service", description = "Employee-scoped views"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
