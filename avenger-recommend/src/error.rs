use avenger_spec::error::SpecError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Specification error: `{0}`")]
    SpecError(#[from] SpecError),

    #[error("Invalid seed encoding: `{0}`")]
    InvalidSeed(SpecError),

    #[error("Invalid generator options: `{0}`")]
    InvalidOptions(#[from] serde_json::Error),
}
