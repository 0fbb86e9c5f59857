//! Filters applied to every complete candidate encoding.
//!
//! Each rule is an independent predicate over one encoding; a candidate survives
//! only if every rule in [`ENCODING_RULES`] accepts it. Rules that concern plots
//! with positional axes accept text tables unconditionally, since those are judged
//! by the text mark's rules alone.

use avenger_spec::error::SpecError;
use avenger_spec::field::FieldType;
use avenger_spec::{Channel, Encoding, FieldDef, MarkType, StatisticsMap};

use crate::marks::satisfies_mark;
use crate::options::GenerateOptions;

pub type EncodingRule =
    fn(&Encoding, &StatisticsMap, &GenerateOptions) -> Result<bool, SpecError>;

pub const ENCODING_RULES: &[(&str, EncodingRule)] = &[
    ("text_table", text_table_rule),
    ("positional", positional_rule),
    ("facets_after_positions", facets_after_positions_rule),
    ("aggregate_with_all_dims_on_facets", aggregate_with_all_dims_on_facets_rule),
    ("occlusion", occlusion_rule),
    ("transpose", transpose_rule),
    ("dot_plot", dot_plot_rule),
];

/// Name of the first rule that rejects `encoding`, or `None` when it is a valid candidate
pub fn first_failing_rule(
    encoding: &Encoding,
    stats: &StatisticsMap,
    opts: &GenerateOptions,
) -> Result<Option<&'static str>, SpecError> {
    for (name, rule) in ENCODING_RULES {
        if !rule(encoding, stats, opts)? {
            return Ok(Some(*name));
        }
    }
    Ok(None)
}

fn is_text_table(encoding: &Encoding) -> bool {
    encoding.contains(Channel::Text)
}

fn has_facet(encoding: &Encoding) -> bool {
    encoding.contains(Channel::Row) || encoding.contains(Channel::Column)
}

/// True when the encoding aggregates something and every dimension sits on a facet
pub fn is_aggregate_with_all_dims_on_facets(encoding: &Encoding) -> bool {
    has_facet(encoding)
        && encoding.is_aggregate()
        && !encoding
            .iter()
            .any(|(channel, def)| def.is_dimension() && !channel.is_facet())
}

pub fn text_table_rule(
    encoding: &Encoding,
    stats: &StatisticsMap,
    opts: &GenerateOptions,
) -> Result<bool, SpecError> {
    if !is_text_table(encoding) {
        return Ok(true);
    }
    satisfies_mark(encoding, MarkType::Text, stats, opts)
}

pub fn positional_rule(
    encoding: &Encoding,
    _stats: &StatisticsMap,
    _opts: &GenerateOptions,
) -> Result<bool, SpecError> {
    Ok(is_text_table(encoding)
        || encoding.contains(Channel::X)
        || encoding.contains(Channel::Y))
}

pub fn facets_after_positions_rule(
    encoding: &Encoding,
    _stats: &StatisticsMap,
    _opts: &GenerateOptions,
) -> Result<bool, SpecError> {
    if is_text_table(encoding) || !has_facet(encoding) {
        return Ok(true);
    }
    Ok(encoding.contains(Channel::X) && encoding.contains(Channel::Y))
}

pub fn aggregate_with_all_dims_on_facets_rule(
    encoding: &Encoding,
    _stats: &StatisticsMap,
    opts: &GenerateOptions,
) -> Result<bool, SpecError> {
    if is_text_table(encoding) || !opts.omit_non_text_aggr_with_all_dims_on_facets {
        return Ok(true);
    }
    Ok(!is_aggregate_with_all_dims_on_facets(encoding))
}

/// Without density statistics a raw discrete x discrete scatter hides overlapping points
pub fn occlusion_rule(
    encoding: &Encoding,
    stats: &StatisticsMap,
    _opts: &GenerateOptions,
) -> Result<bool, SpecError> {
    if is_text_table(encoding) {
        return Ok(true);
    }
    let (Some(x), Some(y)) = (encoding.get(Channel::X), encoding.get(Channel::Y)) else {
        return Ok(true);
    };
    if !(x.is_dimension() && y.is_dimension()) || encoding.is_aggregate() {
        return Ok(true);
    }
    Ok(stats.has_occlusion(&x.field) && stats.has_occlusion(&y.field))
}

pub fn transpose_rule(
    encoding: &Encoding,
    _stats: &StatisticsMap,
    opts: &GenerateOptions,
) -> Result<bool, SpecError> {
    if is_text_table(encoding) || !opts.omit_transpose {
        return Ok(true);
    }
    let (Some(x), Some(y)) = (encoding.get(Channel::X), encoding.get(Channel::Y)) else {
        return Ok(true);
    };
    if x.is_dimension() != y.is_dimension() {
        return Ok(dimension_measure_orientation(x, y));
    }
    if x.field_type == FieldType::Temporal || y.field_type == FieldType::Temporal {
        return Ok(!(y.field_type == FieldType::Temporal && x.field_type != FieldType::Temporal));
    }
    // same roles on both axes: keep one of the two orderings
    Ok(x.field <= y.field)
}

/// Horizontal bars for nominal/ordinal dimensions, vertical ones for binned or
/// time-unit dimensions.
fn dimension_measure_orientation(x: &FieldDef, y: &FieldDef) -> bool {
    if y.field_type.is_discrete() && x.is_measure() {
        return true;
    }
    y.is_measure() && !x.field_type.is_discrete() && x.is_dimension()
}

pub fn dot_plot_rule(
    encoding: &Encoding,
    _stats: &StatisticsMap,
    opts: &GenerateOptions,
) -> Result<bool, SpecError> {
    if is_text_table(encoding) {
        return Ok(true);
    }
    let (x, y) = (encoding.get(Channel::X), encoding.get(Channel::Y));
    if x.is_some() == y.is_some() {
        return Ok(true);
    }
    if opts.omit_dot_plot {
        return Ok(false);
    }
    if opts.omit_transpose && y.is_some() {
        return Ok(false);
    }
    if opts.omit_dot_plot_with_extra_encoding && encoding.len() > 1 {
        return Ok(false);
    }
    if opts.omit_one_dimension_count && x.or(y).is_some_and(|d| d.is_count()) {
        return Ok(false);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use avenger_spec::field::{Aggregate, Bin, TimeUnit};
    use avenger_spec::stats::OcclusionStats;
    use avenger_spec::FieldStats;

    fn check(rule: EncodingRule, encoding: &Encoding) -> bool {
        rule(encoding, &StatisticsMap::default(), &GenerateOptions::default()).unwrap()
    }

    fn ordinal(name: &str) -> FieldDef {
        FieldDef::new(name, FieldType::Ordinal)
    }

    fn mean(name: &str) -> FieldDef {
        FieldDef::new(name, FieldType::Quantitative).with_aggregate(Aggregate::Mean)
    }

    #[test]
    fn test_aggregate_with_all_dims_on_facets() {
        let all_on_facets = Encoding::new()
            .with(Channel::X, mean("a"))
            .with(Channel::Y, mean("b"))
            .with(Channel::Row, ordinal("o"));
        assert!(is_aggregate_with_all_dims_on_facets(&all_on_facets));
        assert!(!check(aggregate_with_all_dims_on_facets_rule, &all_on_facets));

        let opts = GenerateOptions {
            omit_non_text_aggr_with_all_dims_on_facets: false,
            ..Default::default()
        };
        assert!(aggregate_with_all_dims_on_facets_rule(
            &all_on_facets,
            &StatisticsMap::default(),
            &opts
        )
        .unwrap());

        let dim_on_axis = all_on_facets.clone().with(Channel::Color, ordinal("p"));
        assert!(!is_aggregate_with_all_dims_on_facets(&dim_on_axis));

        let text_table = Encoding::new()
            .with(Channel::Row, ordinal("o"))
            .with(Channel::Text, mean("a"));
        assert!(check(aggregate_with_all_dims_on_facets_rule, &text_table));
    }

    #[test]
    fn test_occlusion_rule() {
        let grid = Encoding::new()
            .with(Channel::X, ordinal("o1"))
            .with(Channel::Y, ordinal("o2"));
        assert!(!check(occlusion_rule, &grid));

        let with_measure = grid.clone().with(Channel::Size, mean("q"));
        assert!(check(occlusion_rule, &with_measure));

        let stats: StatisticsMap = ["o1", "o2"]
            .into_iter()
            .map(|name| {
                (name, FieldStats::new(4).with_occlusion(OcclusionStats { max_overlap: 12 }))
            })
            .collect();
        assert!(occlusion_rule(&grid, &stats, &GenerateOptions::default()).unwrap());
    }

    #[test]
    fn test_transpose_rule() {
        let binned = FieldDef::new("q", FieldType::Quantitative).with_bin(Bin::Flag(true));
        let year = FieldDef::new("t", FieldType::Temporal).with_time_unit(TimeUnit::Year);
        let raw_time = FieldDef::new("t", FieldType::Temporal);
        let quant = FieldDef::new("q", FieldType::Quantitative);

        let vertical = |x: &FieldDef, y: &FieldDef| {
            check(
                transpose_rule,
                &Encoding::new().with(Channel::X, x.clone()).with(Channel::Y, y.clone()),
            )
        };

        assert!(vertical(&binned, &FieldDef::count()));
        assert!(!vertical(&FieldDef::count(), &binned));
        assert!(vertical(&year, &FieldDef::count()));
        assert!(!vertical(&FieldDef::count(), &year));
        assert!(vertical(&FieldDef::count(), &ordinal("o")));
        assert!(!vertical(&ordinal("o"), &FieldDef::count()));
        assert!(vertical(&raw_time, &quant));
        assert!(!vertical(&quant, &raw_time));
        assert!(vertical(&ordinal("a"), &ordinal("b")));
        assert!(!vertical(&ordinal("b"), &ordinal("a")));
    }

    #[test]
    fn test_positional_and_facet_rules() {
        let facet_only = Encoding::new()
            .with(Channel::X, FieldDef::new("q", FieldType::Quantitative))
            .with(Channel::Row, ordinal("o"));
        assert!(check(positional_rule, &facet_only));
        assert!(!check(facets_after_positions_rule, &facet_only));

        let colored = Encoding::new().with(Channel::Color, ordinal("o"));
        assert!(!check(positional_rule, &colored));
    }

    #[test]
    fn test_dot_plot_rule() {
        let on_x = Encoding::new().with(Channel::X, FieldDef::count());
        let on_y = Encoding::new().with(Channel::Y, FieldDef::count());
        assert!(check(dot_plot_rule, &on_x));
        assert!(!check(dot_plot_rule, &on_y));
        assert!(!check(dot_plot_rule, &on_x.clone().with(Channel::Color, ordinal("o"))));

        let opts = GenerateOptions {
            omit_one_dimension_count: true,
            ..Default::default()
        };
        assert!(!dot_plot_rule(&on_x, &StatisticsMap::default(), &opts).unwrap());
    }

    #[test]
    fn test_first_failing_rule() {
        let grid = Encoding::new()
            .with(Channel::X, ordinal("a"))
            .with(Channel::Y, ordinal("b"));
        let failing =
            first_failing_rule(&grid, &StatisticsMap::default(), &GenerateOptions::default())
                .unwrap();
        assert_eq!(failing, Some("occlusion"));
    }
}
