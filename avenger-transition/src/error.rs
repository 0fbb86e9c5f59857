use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransitionError {
    #[error("Invalid transition cost table: `{0}`")]
    InvalidCostTable(#[from] serde_json::Error),

    #[error("Invalid cost for transition `{name}`: {cost}")]
    InvalidCost { name: String, cost: f64 },
}
