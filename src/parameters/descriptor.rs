//! Parameter metadata used to drive automated sweeps.

use serde::Serialize;

/// Value type of a tunable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    /// Whole numbers, e.g. a q-gram size
    Integer,
    /// Real numbers, e.g. a combination threshold
    Float,
}

/// Describes one tunable parameter: its domain and a free-text explanation.
///
/// Serializes to the flat JSON object consumed by sweep drivers:
///
/// ```json
/// {"class":"integer","name":"Q-gram Size","defaultValue":"6",
///  "minValue":"2","maxValue":"6","stepValue":"1","description":"..."}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    /// Value type tag
    #[serde(rename = "class")]
    pub parameter_type: ParameterType,
    /// Human-readable parameter name
    pub name: String,
    /// Default value, rendered as text
    pub default_value: String,
    /// Smallest grid value, rendered as text
    pub min_value: String,
    /// Largest grid value, rendered as text
    pub max_value: String,
    /// Grid step, rendered as text
    pub step_value: String,
    /// Explanation of the parameter's effect
    pub description: String,
}

impl ParameterDescriptor {
    /// Describe a parameter from its default and grid domain.
    pub fn new<T: super::SearchValue>(
        name: impl Into<String>,
        default: T,
        min: T,
        max: T,
        step: T,
        description: impl Into<String>,
    ) -> Self {
        Self {
            parameter_type: T::TYPE,
            name: name.into(),
            default_value: default.to_string(),
            min_value: min.to_string(),
            max_value: max.to_string(),
            step_value: step.to_string(),
            description: description.into(),
        }
    }
}
