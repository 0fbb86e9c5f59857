//! Per-channel admission rules, checked while a field is being placed.

use avenger_spec::error::SpecError;
use avenger_spec::field::FieldType;
use avenger_spec::{Channel, Encoding, FieldDef, StatisticsMap};

use crate::options::GenerateOptions;

/// Whether `def` may be bound to the free `channel` of the partially built `encoding`
pub fn can_assign(
    channel: Channel,
    encoding: &Encoding,
    def: &FieldDef,
    stats: &StatisticsMap,
    opts: &GenerateOptions,
) -> Result<bool, SpecError> {
    if encoding.contains(channel) || !channel.accepts(def) {
        return Ok(false);
    }
    match channel {
        Channel::Color => color_rule(encoding, def, stats, opts),
        Channel::Shape => shape_rule(encoding, def, stats, opts),
        Channel::Size => Ok(retinal_rule(encoding, opts)),
        _ => Ok(true),
    }
}

fn retinal_rule(encoding: &Encoding, opts: &GenerateOptions) -> bool {
    !opts.omit_multiple_retinal_encodings || !encoding.channels().any(|c| c.is_retinal())
}

fn color_rule(
    encoding: &Encoding,
    def: &FieldDef,
    stats: &StatisticsMap,
    opts: &GenerateOptions,
) -> Result<bool, SpecError> {
    if !retinal_rule(encoding, opts) {
        return Ok(false);
    }
    Ok(def.is_measure() || def.cardinality(stats)? <= opts.max_cardinality_for_color)
}

fn shape_rule(
    encoding: &Encoding,
    def: &FieldDef,
    stats: &StatisticsMap,
    opts: &GenerateOptions,
) -> Result<bool, SpecError> {
    if !retinal_rule(encoding, opts) {
        return Ok(false);
    }
    if def.is_binned() && def.field_type == FieldType::Quantitative {
        return Ok(false);
    }
    if def.time_unit.is_some() && def.field_type == FieldType::Temporal {
        return Ok(false);
    }
    Ok(def.cardinality(stats)? <= opts.max_cardinality_for_shape)
}
