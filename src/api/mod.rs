pub mod attendance;
pub mod employee;
pub mod employee_me;
pub mod salary;
