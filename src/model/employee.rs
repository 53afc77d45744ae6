use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "first_name": "John",
        "last_name": "Doe",
        "position": "Backend Engineer",
        "base_salary": 10000000.0
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "John")]
    pub first_name: String,

    #[schema(example = "Doe")]
    pub last_name: String,

    #[schema(example = "Backend Engineer", nullable = true)]
    pub position: Option<String>,

    /// `None` until an admin configures it.
    #[schema(example = 10000000.0, value_type = Option<f64>, nullable = true)]
    pub base_salary: Option<Decimal>,
}
