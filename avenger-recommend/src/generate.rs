use avenger_spec::error::SpecError;
use avenger_spec::{Encoding, FieldDef, Specification, StatisticsMap};
use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::channel_rules::can_assign;
use crate::encoding_rules::first_failing_rule;
use crate::error::RecommendError;
use crate::marks::marktypes_for;
use crate::options::GenerateOptions;

/// Enumerate every valid assignment of `fields` to the channels left free by `seed`.
///
/// Each field is tried on each channel of `opts.channels` that admits it; every
/// complete assignment is then checked against the encoding rules. The result is
/// deduplicated and keeps the order in which candidates were found.
#[tracing::instrument(skip_all, fields(fields = fields.len(), seed = seed.len()))]
pub fn generate_encodings(
    seed: &Encoding,
    fields: &[FieldDef],
    stats: &StatisticsMap,
    opts: &GenerateOptions,
) -> Result<Vec<Encoding>, RecommendError> {
    seed.check_affinity().map_err(RecommendError::InvalidSeed)?;
    for def in fields {
        def.validate()?;
        if def.is_binned() {
            // surfaces missing or non-binnable statistics before the search starts
            def.cardinality(stats)?;
        }
    }

    let mut candidates = IndexSet::new();
    let mut current = seed.clone();
    assign_field(0, fields, &mut current, stats, opts, &mut candidates)?;

    debug!(candidates = candidates.len(), "generated encodings");
    Ok(candidates.into_iter().collect())
}

fn assign_field(
    index: usize,
    fields: &[FieldDef],
    current: &mut Encoding,
    stats: &StatisticsMap,
    opts: &GenerateOptions,
    candidates: &mut IndexSet<Encoding>,
) -> Result<(), SpecError> {
    let Some(def) = fields.get(index) else {
        match first_failing_rule(current, stats, opts)? {
            Some(rule) => trace!(rule, ?current, "candidate rejected"),
            None => {
                candidates.insert(current.clone());
            }
        }
        return Ok(());
    };

    for &channel in &opts.channels {
        if !can_assign(channel, current, def, stats, opts)? {
            continue;
        }
        current.insert(channel, def.clone());
        assign_field(index + 1, fields, current, stats, opts, candidates)?;
        current.remove(channel);
    }
    Ok(())
}

/// Candidate specifications: every generated encoding paired with each mark type
/// able to render it.
#[tracing::instrument(skip_all, fields(fields = fields.len()))]
pub fn generate(
    seed: &Encoding,
    fields: &[FieldDef],
    stats: &StatisticsMap,
    opts: &GenerateOptions,
) -> Result<Vec<Specification>, RecommendError> {
    let mut specs = IndexSet::new();
    for encoding in generate_encodings(seed, fields, stats, opts)? {
        let marks = marktypes_for(&encoding, stats, opts)?;
        if marks.is_empty() {
            trace!(?encoding, "no mark type can render encoding");
        }
        for mark in marks {
            specs.insert(Specification::new(mark, encoding.clone()));
        }
    }

    debug!(specifications = specs.len(), "generated specifications");
    Ok(specs.into_iter().collect())
}
