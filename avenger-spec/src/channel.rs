use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, VariantNames};

use crate::field::FieldDef;

/// Encoding slot of a chart specification
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, EnumIter, VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Channel {
    X,
    Y,
    Row,
    Column,
    Color,
    Size,
    Shape,
    Text,
    Detail,
}

/// What kind of fields a channel can display, and how
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelAffinity {
    pub dimension: bool,
    pub measure: bool,
    pub positional: bool,
    pub facet: bool,
    pub retinal: bool,
}

const fn affinity(dimension: bool, measure: bool) -> ChannelAffinity {
    ChannelAffinity {
        dimension,
        measure,
        positional: false,
        facet: false,
        retinal: false,
    }
}

impl Channel {
    pub const fn affinity(&self) -> ChannelAffinity {
        match self {
            Channel::X | Channel::Y => ChannelAffinity {
                positional: true,
                ..affinity(true, true)
            },
            Channel::Row | Channel::Column => ChannelAffinity {
                facet: true,
                ..affinity(true, false)
            },
            Channel::Color => ChannelAffinity {
                retinal: true,
                ..affinity(true, true)
            },
            Channel::Size => ChannelAffinity {
                retinal: true,
                ..affinity(false, true)
            },
            Channel::Shape => ChannelAffinity {
                retinal: true,
                ..affinity(true, false)
            },
            Channel::Text => affinity(false, true),
            Channel::Detail => affinity(true, false),
        }
    }

    pub fn is_positional(&self) -> bool {
        self.affinity().positional
    }

    pub fn is_facet(&self) -> bool {
        self.affinity().facet
    }

    pub fn is_retinal(&self) -> bool {
        self.affinity().retinal
    }

    /// Whether the channel can display the field's dimension/measure role
    pub fn accepts(&self, def: &FieldDef) -> bool {
        let affinity = self.affinity();
        if def.is_dimension() {
            affinity.dimension
        } else {
            affinity.measure
        }
    }

    /// Upper case token used in transition rule names, e.g. `COLUMN`
    pub fn rule_token(&self) -> String {
        self.to_string().to_uppercase()
    }
}
