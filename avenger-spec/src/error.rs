use thiserror::Error;

use crate::channel::Channel;

#[derive(Error, Debug)]
pub enum SpecError {
    #[error("No statistics available for field: `{0}`")]
    MissingStatistics(String),

    #[error("Field `{0}` is binned but its statistics mark it as not binnable")]
    NotBinnable(String),

    #[error("Invalid field definition for `{field}`: {reason}")]
    InvalidFieldDef { field: String, reason: String },

    #[error("Channel `{channel}` does not accept field `{field}`")]
    ChannelMismatch { channel: Channel, field: String },

    #[error("JSON error: `{0}`")]
    JsonError(#[from] serde_json::Error),
}
