use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::error::SpecError;
use crate::stats::StatisticsMap;

/// Name of the pseudo-field that stands in for a record count
pub const COUNT_FIELD: &str = "*";

/// Number of bins assumed when a binned field does not say otherwise
pub const DEFAULT_MAXBINS: u32 = 10;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldType {
    Quantitative,
    Ordinal,
    Nominal,
    Temporal,
}

impl FieldType {
    /// Nominal and ordinal types are always discrete
    pub fn is_discrete(&self) -> bool {
        matches!(self, FieldType::Nominal | FieldType::Ordinal)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Aggregate {
    Count,
    Sum,
    Mean,
    Median,
    Min,
    Max,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TimeUnit {
    Year,
    Quarter,
    Month,
    Date,
    Day,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    /// Number of distinct values the unit can take, when that is independent of the data
    pub fn fixed_cardinality(&self) -> Option<u32> {
        match self {
            TimeUnit::Year => None,
            TimeUnit::Quarter => Some(4),
            TimeUnit::Month => Some(12),
            TimeUnit::Date => Some(31),
            TimeUnit::Day => Some(7),
            TimeUnit::Hours => Some(24),
            TimeUnit::Minutes | TimeUnit::Seconds => Some(60),
        }
    }
}

/// Binning directive, written either as `true`/`false` or as `{"maxbins": n}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bin {
    Flag(bool),
    Params { maxbins: u32 },
}

impl Bin {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Bin::Flag(false))
    }

    pub fn maxbins(&self) -> u32 {
        match self {
            Bin::Params { maxbins } => *maxbins,
            Bin::Flag(_) => DEFAULT_MAXBINS,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScaleType {
    Linear,
    Log,
    Pow,
    Sqrt,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScaleDef {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub scale_type: Option<ScaleType>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// A field bound (or about to be bound) to an encoding channel, together with the
/// transform directives that apply to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub field: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<Aggregate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin: Option<Bin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<TimeUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<ScaleDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
}

impl FieldDef {
    pub fn new(field: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            field: field.into(),
            field_type,
            aggregate: None,
            bin: None,
            time_unit: None,
            scale: None,
            sort: None,
        }
    }

    /// The `count(*)` pseudo-field
    pub fn count() -> Self {
        Self::new(COUNT_FIELD, FieldType::Quantitative).with_aggregate(Aggregate::Count)
    }

    pub fn with_aggregate(mut self, aggregate: Aggregate) -> Self {
        self.aggregate = Some(aggregate);
        self
    }

    pub fn with_bin(mut self, bin: Bin) -> Self {
        self.bin = Some(bin);
        self
    }

    pub fn with_time_unit(mut self, time_unit: TimeUnit) -> Self {
        self.time_unit = Some(time_unit);
        self
    }

    pub fn with_scale(mut self, scale_type: ScaleType) -> Self {
        self.scale = Some(ScaleDef {
            scale_type: Some(scale_type),
        });
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn is_count(&self) -> bool {
        self.aggregate == Some(Aggregate::Count)
    }

    pub fn is_binned(&self) -> bool {
        self.bin.is_some_and(|b| b.is_enabled())
    }

    pub fn is_aggregate(&self) -> bool {
        self.aggregate.is_some()
    }

    /// Discrete values: nominal/ordinal fields, binned fields and temporal fields
    /// truncated to a time unit.
    pub fn is_dimension(&self) -> bool {
        self.field_type.is_discrete()
            || self.is_binned()
            || (self.field_type == FieldType::Temporal && self.time_unit.is_some())
    }

    pub fn is_measure(&self) -> bool {
        !self.is_dimension()
    }

    /// Estimated number of distinct values this field definition produces
    pub fn cardinality(&self, stats: &StatisticsMap) -> Result<u32, SpecError> {
        if self.field == COUNT_FIELD {
            return Ok(1);
        }
        if let Some(bin) = self.bin.filter(|b| b.is_enabled()) {
            let field_stats = stats.get(&self.field)?;
            if !field_stats.binnable {
                return Err(SpecError::NotBinnable(self.field.clone()));
            }
            return Ok(bin.maxbins().min(field_stats.cardinality.max(1)));
        }
        if self.field_type == FieldType::Temporal {
            if let Some(n) = self.time_unit.and_then(|unit| unit.fixed_cardinality()) {
                return Ok(n);
            }
        }
        Ok(stats.get(&self.field)?.cardinality)
    }

    /// Reject combinations of directives that cannot describe a real column
    pub fn validate(&self) -> Result<(), SpecError> {
        let invalid = |reason: &str| {
            Err(SpecError::InvalidFieldDef {
                field: self.field.clone(),
                reason: reason.to_string(),
            })
        };
        if self.field.is_empty() {
            return invalid("field name is empty");
        }
        if self.field == COUNT_FIELD && !self.is_count() {
            return invalid("`*` may only be used with the count aggregate");
        }
        if self.is_binned() && self.field_type != FieldType::Quantitative {
            return invalid("only quantitative fields can be binned");
        }
        if self.time_unit.is_some() && self.field_type != FieldType::Temporal {
            return invalid("time units only apply to temporal fields");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::FieldStats;

    #[test]
    fn test_dimension_classification() {
        assert!(FieldDef::new("a", FieldType::Nominal).is_dimension());
        assert!(FieldDef::new("a", FieldType::Ordinal).is_dimension());
        assert!(FieldDef::new("a", FieldType::Quantitative).is_measure());
        assert!(FieldDef::new("a", FieldType::Quantitative)
            .with_bin(Bin::Flag(true))
            .is_dimension());
        assert!(FieldDef::new("a", FieldType::Quantitative)
            .with_bin(Bin::Flag(false))
            .is_measure());
        assert!(FieldDef::new("a", FieldType::Temporal).is_measure());
        assert!(FieldDef::new("a", FieldType::Temporal)
            .with_time_unit(TimeUnit::Year)
            .is_dimension());
        assert!(FieldDef::count().is_measure());
    }

    #[test]
    fn test_cardinality() -> Result<(), SpecError> {
        let mut stats = StatisticsMap::default();
        stats.insert("origin", FieldStats::new(3));
        stats.insert("hp", FieldStats::new(94));
        stats.insert("year", FieldStats::new(12));

        assert_eq!(FieldDef::new("origin", FieldType::Nominal).cardinality(&stats)?, 3);
        assert_eq!(FieldDef::count().cardinality(&stats)?, 1);
        assert_eq!(
            FieldDef::new("hp", FieldType::Quantitative)
                .with_bin(Bin::Flag(true))
                .cardinality(&stats)?,
            DEFAULT_MAXBINS
        );
        assert_eq!(
            FieldDef::new("year", FieldType::Temporal)
                .with_time_unit(TimeUnit::Month)
                .cardinality(&stats)?,
            12
        );
        assert_eq!(
            FieldDef::new("year", FieldType::Temporal)
                .with_time_unit(TimeUnit::Year)
                .cardinality(&stats)?,
            12
        );
        assert!(matches!(
            FieldDef::new("missing", FieldType::Nominal).cardinality(&stats),
            Err(SpecError::MissingStatistics(name)) if name == "missing"
        ));
        Ok(())
    }

    #[test]
    fn test_not_binnable() {
        let mut stats = StatisticsMap::default();
        stats.insert("id", FieldStats::new(1000).with_binnable(false));
        let def = FieldDef::new("id", FieldType::Quantitative).with_bin(Bin::Params { maxbins: 20 });
        assert!(matches!(def.cardinality(&stats), Err(SpecError::NotBinnable(_))));
    }

    #[test]
    fn test_validate() {
        assert!(FieldDef::count().validate().is_ok());
        assert!(FieldDef::new("*", FieldType::Quantitative).validate().is_err());
        assert!(FieldDef::new("", FieldType::Nominal).validate().is_err());
        assert!(FieldDef::new("o", FieldType::Ordinal)
            .with_bin(Bin::Flag(true))
            .validate()
            .is_err());
        assert!(FieldDef::new("q", FieldType::Quantitative)
            .with_time_unit(TimeUnit::Year)
            .validate()
            .is_err());
    }

    #[test]
    fn test_field_def_json() -> Result<(), serde_json::Error> {
        let def: FieldDef = serde_json::from_str(
            r#"{"type": "quantitative", "field": "Acceleration", "scale": {"type": "log"}, "bin": {"maxbins": 5}}"#,
        )?;
        assert_eq!(
            def,
            FieldDef::new("Acceleration", FieldType::Quantitative)
                .with_scale(ScaleType::Log)
                .with_bin(Bin::Params { maxbins: 5 })
        );

        let unit: FieldDef =
            serde_json::from_str(r#"{"type": "temporal", "field": "Year", "timeUnit": "year"}"#)?;
        assert_eq!(unit.time_unit, Some(TimeUnit::Year));

        assert!(serde_json::from_str::<FieldDef>(r#"{"type": "geo", "field": "a"}"#).is_err());
        Ok(())
    }
}
