use crate::model::employee::SalaryType;

/// Salary owed for a window. DAILY employees earn their rate once per day
/// marked present; MONTHLY employees earn the flat amount regardless of the
/// present-day count.
pub fn compute_salary(salary_type: SalaryType, salary_amount: f64, present_days: i64) -> f64 {
    match salary_type {
        SalaryType::Daily => salary_amount * present_days as f64,
        SalaryType::Monthly => salary_amount,
    }
}
