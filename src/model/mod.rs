pub mod employee;
pub mod money;
pub mod role;
pub mod salary_adjustment;
