pub mod channel;
pub mod error;
pub mod field;
pub mod spec;
pub mod stats;

pub use crate::channel::Channel;
pub use crate::error::SpecError;
pub use crate::field::{FieldDef, FieldType};
pub use crate::spec::{Encoding, MarkType, Specification, Transform};
pub use crate::stats::{FieldStats, StatisticsMap};
