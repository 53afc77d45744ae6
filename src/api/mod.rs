pub mod employee;
pub mod salary;
pub mod salary_adjustment;
