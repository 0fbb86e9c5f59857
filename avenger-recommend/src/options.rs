use avenger_spec::{Channel, MarkType};
use serde::{Deserialize, Serialize};

use crate::error::RecommendError;

/// Knobs of the candidate generator. Every field has a default, so a partial JSON
/// object such as `{"omitNonTextAggrWithAllDimsOnFacets": false}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateOptions {
    /// Channels tried for each field, in this order
    pub channels: Vec<Channel>,
    /// Mark types considered when turning encodings into specifications
    pub marktypes: Vec<MarkType>,
    /// Drop aggregated, non-text charts whose dimensions all sit on row/column
    pub omit_non_text_aggr_with_all_dims_on_facets: bool,
    /// At most one of color, size and shape per chart
    pub omit_multiple_retinal_encodings: bool,
    /// Keep only one orientation of charts that differ by swapping x and y
    pub omit_transpose: bool,
    pub omit_dot_plot: bool,
    pub omit_dot_plot_with_extra_encoding: bool,
    pub omit_one_dimension_count: bool,
    pub omit_size_on_bar: bool,
    /// Stacked bars/areas of averages are misleading when split by color
    pub omit_stacked_average: bool,
    pub always_generate_table_as_heatmap: bool,
    pub max_cardinality_for_color: u32,
    pub max_cardinality_for_shape: u32,
    pub max_cardinality_for_facets: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            channels: vec![
                Channel::X,
                Channel::Y,
                Channel::Row,
                Channel::Column,
                Channel::Size,
                Channel::Shape,
                Channel::Color,
                Channel::Text,
                Channel::Detail,
            ],
            marktypes: vec![
                MarkType::Point,
                MarkType::Bar,
                MarkType::Line,
                MarkType::Area,
                MarkType::Text,
                MarkType::Tick,
            ],
            omit_non_text_aggr_with_all_dims_on_facets: true,
            omit_multiple_retinal_encodings: true,
            omit_transpose: true,
            omit_dot_plot: false,
            omit_dot_plot_with_extra_encoding: true,
            omit_one_dimension_count: false,
            omit_size_on_bar: true,
            omit_stacked_average: true,
            always_generate_table_as_heatmap: true,
            max_cardinality_for_color: 20,
            max_cardinality_for_shape: 6,
            max_cardinality_for_facets: 10,
        }
    }
}

impl GenerateOptions {
    pub fn from_json(json: &str) -> Result<Self, RecommendError> {
        Ok(serde_json::from_str(json)?)
    }
}
