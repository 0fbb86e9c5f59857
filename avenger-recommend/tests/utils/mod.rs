use avenger_spec::field::{Aggregate, Bin, TimeUnit};
use avenger_spec::stats::OcclusionStats;
use avenger_spec::{FieldDef, FieldStats, FieldType, StatisticsMap};

pub struct Fixture {
    pub fields: Vec<FieldDef>,
    pub stats: StatisticsMap,
}

fn ordinal(name: &str) -> FieldDef {
    FieldDef::new(name, FieldType::Ordinal)
}

fn mean(name: &str) -> FieldDef {
    FieldDef::new(name, FieldType::Quantitative).with_aggregate(Aggregate::Mean)
}

/// Field sets named after their shape: `#` is a count, `B(Q)` a binned quantitative
/// field, `YR(T)` a year-truncated temporal field and `A(Q)` an aggregated one.
pub fn fixture(name: &str) -> Fixture {
    let (fields, stats): (Vec<FieldDef>, Vec<(&str, FieldStats)>) = match name {
        "#" => (vec![FieldDef::count()], vec![]),
        "#xB(Q)" => (
            vec![
                FieldDef::new("2", FieldType::Quantitative).with_bin(Bin::Flag(true)),
                FieldDef::count(),
            ],
            vec![("2", FieldStats::new(40))],
        ),
        "#xT" => (
            vec![FieldDef::new("2", FieldType::Temporal), FieldDef::count()],
            vec![("2", FieldStats::new(30))],
        ),
        "#xYR(T)" => (
            vec![
                FieldDef::new("2", FieldType::Temporal).with_time_unit(TimeUnit::Year),
                FieldDef::count(),
            ],
            vec![("2", FieldStats::new(12))],
        ),
        "QxT" => (
            vec![
                FieldDef::new("1", FieldType::Quantitative),
                FieldDef::new("2", FieldType::Temporal),
            ],
            vec![("1", FieldStats::new(100)), ("2", FieldStats::new(30))],
        ),
        "OxOxQ" => (
            vec![
                ordinal("1"),
                ordinal("2"),
                FieldDef::new("3", FieldType::Quantitative),
            ],
            vec![
                ("1", FieldStats::new(5)),
                ("2", FieldStats::new(4)),
                ("3", FieldStats::new(100)),
            ],
        ),
        "OxOxA(Q)" => (
            vec![ordinal("1"), ordinal("2"), mean("3")],
            vec![
                ("1", FieldStats::new(5)),
                ("2", FieldStats::new(4)),
                ("3", FieldStats::new(100)),
            ],
        ),
        "OxA(Q)xA(Q)" => (
            vec![ordinal("1"), mean("2"), mean("3")],
            vec![
                ("1", FieldStats::new(5)),
                ("2", FieldStats::new(100)),
                ("3", FieldStats::new(80)),
            ],
        ),
        _ => panic!("unknown fixture {name}"),
    };
    Fixture {
        fields,
        stats: stats.into_iter().collect(),
    }
}

/// Attach point-density statistics to every field of the fixture
pub fn with_occlusion(mut fixture: Fixture) -> Fixture {
    let names: Vec<String> = fixture.fields.iter().map(|f| f.field.clone()).collect();
    for name in names {
        if let Ok(stats) = fixture.stats.get(&name) {
            let stats = stats
                .clone()
                .with_occlusion(OcclusionStats { max_overlap: 25 });
            fixture.stats.insert(name, stats);
        }
    }
    fixture
}
