//! Mark type selection for a finished encoding.

use avenger_spec::error::SpecError;
use avenger_spec::field::{Aggregate, FieldType};
use avenger_spec::{Channel, Encoding, FieldDef, MarkType, StatisticsMap};

use crate::options::GenerateOptions;

/// Whether `mark` can render `encoding`: every bound channel must be supported by the
/// mark and the mark's own rule must hold.
pub fn satisfies_mark(
    encoding: &Encoding,
    mark: MarkType,
    stats: &StatisticsMap,
    opts: &GenerateOptions,
) -> Result<bool, SpecError> {
    if !encoding.channels().all(|channel| mark.supports(channel)) {
        return Ok(false);
    }
    if !facets_rule(encoding, stats, opts)? {
        return Ok(false);
    }
    let satisfied = match mark {
        MarkType::Point => point_rule(encoding),
        MarkType::Bar => bar_rule(encoding, opts),
        MarkType::Line => line_rule(encoding),
        MarkType::Area => area_rule(encoding, opts),
        MarkType::Text => text_rule(encoding, opts),
        MarkType::Tick => tick_rule(encoding),
    };
    Ok(satisfied)
}

/// Mark types from `opts.marktypes` that can render `encoding`, in option order
pub fn marktypes_for(
    encoding: &Encoding,
    stats: &StatisticsMap,
    opts: &GenerateOptions,
) -> Result<Vec<MarkType>, SpecError> {
    let mut marks = Vec::new();
    for &mark in &opts.marktypes {
        if satisfies_mark(encoding, mark, stats, opts)? {
            marks.push(mark);
        }
    }
    Ok(marks)
}

fn facets_rule(
    encoding: &Encoding,
    stats: &StatisticsMap,
    opts: &GenerateOptions,
) -> Result<bool, SpecError> {
    for channel in [Channel::Row, Channel::Column] {
        if let Some(def) = encoding.get(channel) {
            if def.cardinality(stats)? > opts.max_cardinality_for_facets {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

fn is_dim(def: Option<&FieldDef>) -> bool {
    def.is_some_and(|d| d.is_dimension())
}

fn point_rule(encoding: &Encoding) -> bool {
    let (x, y) = (encoding.get(Channel::X), encoding.get(Channel::Y));
    match (x, y) {
        (Some(_), Some(_)) => {
            if is_dim(x) && is_dim(y) {
                // shape and a discrete color are unreadable on a discrete grid
                if encoding.contains(Channel::Shape) {
                    return false;
                }
                if is_dim(encoding.get(Channel::Color)) {
                    return false;
                }
            }
            true
        }
        (None, None) => false,
        // dot plots already passed the encoding rules
        _ => !encoding.contains(Channel::Shape),
    }
}

fn tick_rule(encoding: &Encoding) -> bool {
    let (x, y) = (encoding.get(Channel::X), encoding.get(Channel::Y));
    if x.is_none() && y.is_none() {
        return false;
    }
    if encoding.is_aggregate() {
        return false;
    }
    let (x_dim, y_dim) = (is_dim(x), is_dim(y));
    (!x_dim && (y.is_none() || y_dim)) || (!y_dim && (x.is_none() || x_dim))
}

fn bar_rule(encoding: &Encoding, opts: &GenerateOptions) -> bool {
    let (x, y) = (encoding.get(Channel::X), encoding.get(Channel::Y));
    if x.is_none() && y.is_none() {
        return false;
    }
    if opts.omit_size_on_bar && encoding.contains(Channel::Size) {
        return false;
    }
    let x_aggregate = x.and_then(|d| d.aggregate);
    let y_aggregate = y.and_then(|d| d.aggregate);

    // exactly one axis is aggregated, and the other one is a dimension or absent
    if x_aggregate.is_some() == y_aggregate.is_some() {
        return false;
    }
    let x_dim_or_none = x.is_none() || is_dim(x);
    let y_dim_or_none = y.is_none() || is_dim(y);
    if x_dim_or_none == y_dim_or_none {
        return false;
    }
    let aggregate = x_aggregate.or(y_aggregate);
    !(opts.omit_stacked_average
        && aggregate == Some(Aggregate::Mean)
        && encoding.contains(Channel::Color))
}

fn line_rule(encoding: &Encoding) -> bool {
    let x_is_time_unit = encoding
        .get(Channel::X)
        .is_some_and(|d| d.field_type == FieldType::Temporal && d.time_unit.is_some());
    let y_is_aggregate = encoding
        .get(Channel::Y)
        .is_some_and(|d| d.field_type == FieldType::Quantitative && d.is_aggregate());
    x_is_time_unit && y_is_aggregate
}

fn area_rule(encoding: &Encoding, opts: &GenerateOptions) -> bool {
    if !line_rule(encoding) {
        return false;
    }
    let y_is_mean = encoding
        .get(Channel::Y)
        .is_some_and(|d| d.aggregate == Some(Aggregate::Mean));
    !(opts.omit_stacked_average && y_is_mean && encoding.contains(Channel::Color))
}

fn text_rule(encoding: &Encoding, opts: &GenerateOptions) -> bool {
    let has_facet = encoding.contains(Channel::Row) || encoding.contains(Channel::Column);
    let text_is_aggregate = encoding
        .get(Channel::Text)
        .is_some_and(|d| d.is_aggregate());
    has_facet
        && text_is_aggregate
        && !encoding.contains(Channel::X)
        && !encoding.contains(Channel::Y)
        && !encoding.contains(Channel::Size)
        && (!opts.always_generate_table_as_heatmap || !encoding.contains(Channel::Color))
}
