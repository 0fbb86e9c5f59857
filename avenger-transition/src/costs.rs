use std::collections::HashMap;

use avenger_spec::{Channel, MarkType};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::error::TransitionError;
use crate::rule::TransitionRule;

/// Cost of replacing one mark type with another, per unordered pair
const MARKTYPE_COSTS: &[(MarkType, MarkType, f64)] = &[
    (MarkType::Area, MarkType::Bar, 0.03),
    (MarkType::Area, MarkType::Line, 0.02),
    (MarkType::Area, MarkType::Point, 0.04),
    (MarkType::Area, MarkType::Text, 0.08),
    (MarkType::Area, MarkType::Tick, 0.04),
    (MarkType::Bar, MarkType::Line, 0.04),
    (MarkType::Bar, MarkType::Point, 0.02),
    (MarkType::Bar, MarkType::Text, 0.06),
    (MarkType::Bar, MarkType::Tick, 0.04),
    (MarkType::Line, MarkType::Point, 0.03),
    (MarkType::Line, MarkType::Text, 0.07),
    (MarkType::Line, MarkType::Tick, 0.05),
    (MarkType::Point, MarkType::Text, 0.05),
    (MarkType::Point, MarkType::Tick, 0.01),
    (MarkType::Text, MarkType::Tick, 0.04),
];

// No SORT entry: sort changes are recognized but carry no cost.
const TRANSFORM_COSTS: &[(&str, f64)] = &[
    ("SCALE", 0.6),
    ("BIN", 0.62),
    ("AGGREGATE", 0.63),
    ("SETTYPE", 0.64),
    ("FILTER", 0.65),
];

const MOVE_COSTS: &[(&str, f64)] = &[
    ("MOVE", 4.51),
    ("MOVE_X_Y", 4.5),
    ("MOVE_Y_X", 4.5),
    ("MOVE_ROW_COLUMN", 4.5),
    ("MOVE_COLUMN_ROW", 4.5),
];

fn add_remove_cost(channel: Channel) -> f64 {
    match channel {
        Channel::X | Channel::Y => 4.59,
        Channel::Size | Channel::Shape => 4.58,
        Channel::Color => 4.57,
        Channel::Row | Channel::Column => 4.55,
        Channel::Text => 4.54,
        Channel::Detail => 4.53,
    }
}

lazy_static! {
    pub static ref DEFAULT_TRANSITION_COSTS: TransitionCosts = TransitionCosts::default();
}

/// Name to cost tables for the three kinds of transitions.
///
/// Mark type rules are named `<SOURCE>_<DESTINATION>` (e.g. `AREA_POINT`), so a table
/// may give the two directions of a pair different costs. A missing entry means no
/// transition of that kind is defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionCosts {
    pub marktype: HashMap<String, f64>,
    pub transform: HashMap<String, f64>,
    pub encoding: HashMap<String, f64>,
}

impl Default for TransitionCosts {
    fn default() -> Self {
        let marktype = MARKTYPE_COSTS
            .iter()
            .flat_map(|(a, b, cost)| {
                [
                    (marktype_rule_name(*a, *b), *cost),
                    (marktype_rule_name(*b, *a), *cost),
                ]
            })
            .collect();

        let transform = TRANSFORM_COSTS
            .iter()
            .map(|(name, cost)| (name.to_string(), *cost))
            .collect();

        let mut encoding: HashMap<String, f64> = MOVE_COSTS
            .iter()
            .map(|(name, cost)| (name.to_string(), *cost))
            .collect();
        for channel in Channel::iter() {
            let cost = add_remove_cost(channel);
            encoding.insert(format!("ADD_{}", channel.rule_token()), cost);
            encoding.insert(format!("REMOVE_{}", channel.rule_token()), cost);
        }

        Self {
            marktype,
            transform,
            encoding,
        }
    }
}

pub fn marktype_rule_name(source: MarkType, destination: MarkType) -> String {
    format!("{}_{}", source.rule_token(), destination.rule_token())
}

fn lookup(table: &HashMap<String, f64>, name: &str) -> Option<TransitionRule> {
    table.get(name).map(|cost| TransitionRule::new(name, *cost))
}

impl TransitionCosts {
    /// Load cost tables from JSON. Tables left out of the document keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TransitionError> {
        let costs: Self = serde_json::from_str(json)?;
        costs.validate()?;
        Ok(costs)
    }

    fn validate(&self) -> Result<(), TransitionError> {
        let entries = self
            .marktype
            .iter()
            .chain(self.transform.iter())
            .chain(self.encoding.iter());
        for (name, cost) in entries {
            if !cost.is_finite() || *cost < 0.0 {
                return Err(TransitionError::InvalidCost {
                    name: name.clone(),
                    cost: *cost,
                });
            }
        }
        Ok(())
    }

    pub fn marktype_rule(&self, name: &str) -> Option<TransitionRule> {
        lookup(&self.marktype, name)
    }

    pub fn transform_rule(&self, name: &str) -> Option<TransitionRule> {
        lookup(&self.transform, name)
    }

    pub fn encoding_rule(&self, name: &str) -> Option<TransitionRule> {
        lookup(&self.encoding, name)
    }
}
