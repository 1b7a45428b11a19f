//! Params command handler.

use crate::blocking::BlockingMethodKind;
use crate::pipeline::MethodDescription;
use anyhow::{Context, Result};

/// Describe a method and its tunable parameters as pretty JSON.
pub fn parameters_document(kind: BlockingMethodKind) -> Result<String> {
    let method = kind.default_method();
    let document = serde_json::json!({
        "method": method.method_name(),
        "info": method.method_info(),
        "parameters": method.parameter_configuration(),
    });
    serde_json::to_string_pretty(&document).context("Failed to serialize parameters")
}

/// Run the params command.
pub fn run_params(kind: BlockingMethodKind) -> Result<()> {
    println!("{}", parameters_document(kind)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_q_grams_parameters() {
        let document: serde_json::Value =
            serde_json::from_str(&parameters_document(BlockingMethodKind::ExtendedQGrams).unwrap())
                .unwrap();
        let parameters = document["parameters"].as_array().unwrap();
        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters[0]["name"], "Q-gram Size");
        assert_eq!(parameters[1]["class"], "float");
    }

    #[test]
    fn test_standard_is_parameter_free() {
        let document: serde_json::Value =
            serde_json::from_str(&parameters_document(BlockingMethodKind::Standard).unwrap())
                .unwrap();
        assert!(document["parameters"].as_array().unwrap().is_empty());
    }
}
