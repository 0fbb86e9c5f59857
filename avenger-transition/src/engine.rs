use std::collections::{BTreeMap, BTreeSet};

use avenger_spec::{Channel, FieldDef, Specification};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::debug;

use crate::costs::{marktype_rule_name, TransitionCosts, DEFAULT_TRANSITION_COSTS};
use crate::rule::{TransitionRule, TransitionSet};

/// Per-channel transform directive compared between two specifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "UPPERCASE")]
pub enum TransformDimension {
    Scale,
    Aggregate,
    Bin,
    Sort,
}

impl TransformDimension {
    pub fn differs(&self, source: &FieldDef, destination: &FieldDef) -> bool {
        match self {
            TransformDimension::Scale => source.scale != destination.scale,
            TransformDimension::Aggregate => source.aggregate != destination.aggregate,
            TransformDimension::Bin => source.is_binned() != destination.is_binned()
                || (source.is_binned() && source.bin != destination.bin),
            TransformDimension::Sort => source.sort != destination.sort,
        }
    }
}

/// Same field, read as the same semantic type
fn same_field(a: &FieldDef, b: &FieldDef) -> bool {
    a.field == b.field && a.field_type == b.field_type
}

/// Diffs pairs of specifications against a set of cost tables.
///
/// Every method is a pure function of its arguments. A lookup that finds no cost
/// entry yields no rule, so aggregated costs only ever sum defined rules.
#[derive(Debug, Clone, Copy)]
pub struct TransitionEngine<'a> {
    costs: &'a TransitionCosts,
}

impl Default for TransitionEngine<'static> {
    fn default() -> Self {
        Self {
            costs: &DEFAULT_TRANSITION_COSTS,
        }
    }
}

impl<'a> TransitionEngine<'a> {
    pub fn new(costs: &'a TransitionCosts) -> Self {
        Self { costs }
    }

    pub fn costs(&self) -> &TransitionCosts {
        self.costs
    }

    /// The rule for replacing the source mark type with the destination's, if the
    /// mark types differ and the table defines that ordered pair.
    pub fn marktype_transition(
        &self,
        source: &Specification,
        destination: &Specification,
    ) -> Option<TransitionRule> {
        if source.mark == destination.mark {
            return None;
        }
        let name = marktype_rule_name(source.mark, destination.mark);
        let rule = self.costs.marktype_rule(&name);
        if rule.is_none() {
            debug!(rule = %name, "no marktype transition defined");
        }
        rule
    }

    pub fn marktype_transition_set(
        &self,
        source: &Specification,
        destination: &Specification,
    ) -> Vec<TransitionRule> {
        self.marktype_transition(source, destination)
            .into_iter()
            .collect()
    }

    /// The rule for a change of one transform dimension on a channel bound in both
    /// specifications. Dimensions without a cost entry (`SORT` by default) yield `None`
    /// even when they differ.
    pub fn transform_transition(
        &self,
        source: &Specification,
        destination: &Specification,
        channel: Channel,
        dimension: TransformDimension,
    ) -> Option<TransitionRule> {
        let from = source.encoding.get(channel)?;
        let to = destination.encoding.get(channel)?;
        if !dimension.differs(from, to) {
            return None;
        }
        self.costs.transform_rule(&dimension.to_string())
    }

    /// A `FILTER` rule when the filters differ in presence or content
    pub fn transform_filter_transition(
        &self,
        source: &Specification,
        destination: &Specification,
    ) -> Option<TransitionRule> {
        if source.transform.filter == destination.transform.filter {
            return None;
        }
        self.costs.transform_rule("FILTER")
    }

    /// Every transform and filter rule between the two specifications, channel by
    /// channel in channel order, filter last.
    pub fn transform_transition_set(
        &self,
        source: &Specification,
        destination: &Specification,
    ) -> Vec<TransitionRule> {
        let channels: BTreeSet<Channel> = source
            .encoding
            .channels()
            .chain(destination.encoding.channels())
            .collect();

        let mut rules: Vec<TransitionRule> = channels
            .into_iter()
            .flat_map(|channel| {
                TransformDimension::iter().filter_map(move |dimension| {
                    self.transform_transition(source, destination, channel, dimension)
                })
            })
            .collect();
        rules.extend(self.transform_filter_transition(source, destination));
        rules
    }

    /// A `SETTYPE` rule when a channel bound in both specifications changes its field
    /// or the field's semantic type.
    pub fn settype_transition(
        &self,
        source: &Specification,
        destination: &Specification,
        channel: Channel,
    ) -> Option<TransitionRule> {
        let from = source.encoding.get(channel)?;
        let to = destination.encoding.get(channel)?;
        if same_field(from, to) {
            return None;
        }
        self.costs.transform_rule("SETTYPE")
    }

    fn move_transition(&self, from: Channel, to: Channel) -> Option<TransitionRule> {
        let name = format!("MOVE_{}_{}", from.rule_token(), to.rule_token());
        self.costs
            .encoding_rule(&name)
            .or_else(|| self.costs.encoding_rule("MOVE"))
            .map(|rule| TransitionRule::new(name, rule.cost))
    }

    fn channel_transition(&self, action: &str, channel: Channel) -> Option<TransitionRule> {
        let name = format!("{action}_{}", channel.rule_token());
        let rule = self.costs.encoding_rule(&name);
        if rule.is_none() {
            debug!(rule = %name, "no encoding transition defined");
        }
        rule
    }

    /// Structural operations turning the source's channel bindings into the
    /// destination's.
    ///
    /// Fields are matched by name and type first: a field on the same channel is
    /// unchanged and a field found on another channel costs one move. Channels bound
    /// in both that still differ cost a `SETTYPE` when the field itself changed; a
    /// field that only changed its type stays structurally in place. Whatever is
    /// left is removed from the source or added from the destination.
    pub fn encoding_transition_set(
        &self,
        source: &Specification,
        destination: &Specification,
    ) -> Vec<TransitionRule> {
        let mut from: BTreeMap<Channel, &FieldDef> =
            source.encoding.iter().map(|(c, d)| (*c, d)).collect();
        let mut to: BTreeMap<Channel, &FieldDef> =
            destination.encoding.iter().map(|(c, d)| (*c, d)).collect();

        from.retain(|channel, def| {
            let unchanged = to.get(channel).is_some_and(|other| same_field(def, other));
            if unchanged {
                to.remove(channel);
            }
            !unchanged
        });

        let mut rules = Vec::new();

        let sources: Vec<Channel> = from.keys().copied().collect();
        for channel in sources {
            let Some(def) = from.get(&channel).copied() else {
                continue;
            };
            // each destination channel absorbs at most one moved field
            let Some(target) = to
                .iter()
                .find(|(_, other)| same_field(def, other))
                .map(|(target, _)| *target)
            else {
                continue;
            };
            from.remove(&channel);
            to.remove(&target);
            rules.extend(self.move_transition(channel, target));
        }

        let shared: Vec<Channel> = from
            .keys()
            .filter(|channel| to.contains_key(channel))
            .copied()
            .collect();
        for channel in shared {
            let (Some(old), Some(new)) = (from.remove(&channel), to.remove(&channel)) else {
                continue;
            };
            if old.field != new.field {
                rules.extend(self.settype_transition(source, destination, channel));
            }
        }

        for channel in from.keys() {
            rules.extend(self.channel_transition("REMOVE", *channel));
        }
        for channel in to.keys() {
            rules.extend(self.channel_transition("ADD", *channel));
        }
        rules
    }

    /// Mark type, transform and encoding transitions between two specifications.
    /// Identical specifications produce an empty set.
    ///
    /// The set can also be empty for specifications that differ: a channel that keeps
    /// its field and only changes the field's type is not a structural change. Use
    /// [`TransitionEngine::settype_transition`] to detect it.
    #[tracing::instrument(skip_all)]
    pub fn transition_set(
        &self,
        source: &Specification,
        destination: &Specification,
    ) -> TransitionSet {
        if source == destination {
            return TransitionSet::default();
        }
        let set = TransitionSet {
            marktype: self.marktype_transition_set(source, destination),
            transform: self.transform_transition_set(source, destination),
            encoding: self.encoding_transition_set(source, destination),
        };
        debug!(rules = set.len(), cost = set.cost(), "computed transition set");
        set
    }
}

pub fn marktype_transition(
    source: &Specification,
    destination: &Specification,
) -> Option<TransitionRule> {
    TransitionEngine::default().marktype_transition(source, destination)
}

pub fn marktype_transition_set(
    source: &Specification,
    destination: &Specification,
) -> Vec<TransitionRule> {
    TransitionEngine::default().marktype_transition_set(source, destination)
}

pub fn transform_transition(
    source: &Specification,
    destination: &Specification,
    channel: Channel,
    dimension: TransformDimension,
) -> Option<TransitionRule> {
    TransitionEngine::default().transform_transition(source, destination, channel, dimension)
}

pub fn transform_filter_transition(
    source: &Specification,
    destination: &Specification,
) -> Option<TransitionRule> {
    TransitionEngine::default().transform_filter_transition(source, destination)
}

pub fn transform_transition_set(
    source: &Specification,
    destination: &Specification,
) -> Vec<TransitionRule> {
    TransitionEngine::default().transform_transition_set(source, destination)
}

pub fn settype_transition(
    source: &Specification,
    destination: &Specification,
    channel: Channel,
) -> Option<TransitionRule> {
    TransitionEngine::default().settype_transition(source, destination, channel)
}

pub fn encoding_transition_set(
    source: &Specification,
    destination: &Specification,
) -> Vec<TransitionRule> {
    TransitionEngine::default().encoding_transition_set(source, destination)
}

pub fn transition_set(source: &Specification, destination: &Specification) -> TransitionSet {
    TransitionEngine::default().transition_set(source, destination)
}
