use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, VariantNames};

use crate::channel::Channel;
use crate::error::SpecError;
use crate::field::FieldDef;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, EnumIter, VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MarkType {
    Point,
    Bar,
    Line,
    Area,
    Text,
    Tick,
}

impl MarkType {
    /// Channels a mark of this type can render
    pub fn supported_channels(&self) -> &'static [Channel] {
        use Channel::*;
        match self {
            MarkType::Point => &[Row, Column, X, Y, Size, Color, Shape, Detail],
            MarkType::Bar => &[Row, Column, X, Y, Size, Color, Detail],
            MarkType::Line | MarkType::Area | MarkType::Tick => {
                &[Row, Column, X, Y, Color, Detail]
            }
            MarkType::Text => &[Row, Column, Text, Color, Size],
        }
    }

    pub fn supports(&self, channel: Channel) -> bool {
        self.supported_channels().contains(&channel)
    }

    /// Upper case token used in transition rule names, e.g. `AREA`
    pub fn rule_token(&self) -> String {
        self.to_string().to_uppercase()
    }
}

/// Channel to field mapping. Iteration always follows channel declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Encoding {
    channels: BTreeMap<Channel, FieldDef>,
}

impl Encoding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, channel: Channel, def: FieldDef) -> Self {
        self.channels.insert(channel, def);
        self
    }

    /// Bind `def` to `channel`, returning the previous binding if there was one
    pub fn insert(&mut self, channel: Channel, def: FieldDef) -> Option<FieldDef> {
        self.channels.insert(channel, def)
    }

    pub fn remove(&mut self, channel: Channel) -> Option<FieldDef> {
        self.channels.remove(&channel)
    }

    pub fn get(&self, channel: Channel) -> Option<&FieldDef> {
        self.channels.get(&channel)
    }

    pub fn contains(&self, channel: Channel) -> bool {
        self.channels.contains_key(&channel)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Channel, FieldDef> {
        self.channels.iter()
    }

    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.channels.keys().copied()
    }

    /// Whether any bound field carries an aggregate
    pub fn is_aggregate(&self) -> bool {
        self.channels.values().any(|def| def.is_aggregate())
    }

    /// Fail if any binding is a role its channel cannot display
    pub fn check_affinity(&self) -> Result<(), SpecError> {
        for (channel, def) in self.iter() {
            def.validate()?;
            if !channel.accepts(def) {
                return Err(SpecError::ChannelMismatch {
                    channel: *channel,
                    field: def.field.clone(),
                });
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Encoding {
    type Item = (&'a Channel, &'a FieldDef);
    type IntoIter = btree_map::Iter<'a, Channel, FieldDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.iter()
    }
}

impl FromIterator<(Channel, FieldDef)> for Encoding {
    fn from_iter<T: IntoIterator<Item = (Channel, FieldDef)>>(iter: T) -> Self {
        Self {
            channels: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl Transform {
    pub fn is_empty(&self) -> bool {
        self.filter.is_none()
    }
}

/// A complete chart: mark type, data transform and channel bindings.
///
/// Specifications are values; two specifications describe the same chart exactly
/// when they compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Specification {
    pub mark: MarkType,
    #[serde(default, skip_serializing_if = "Transform::is_empty")]
    pub transform: Transform,
    #[serde(default)]
    pub encoding: Encoding,
}

impl Specification {
    pub fn new(mark: MarkType, encoding: Encoding) -> Self {
        Self {
            mark,
            transform: Transform::default(),
            encoding,
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.transform.filter = Some(filter.into());
        self
    }

    /// Parse a specification and validate every field definition in it
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        let spec: Self = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<(), SpecError> {
        self.encoding.iter().try_for_each(|(_, def)| def.validate())
    }
}
