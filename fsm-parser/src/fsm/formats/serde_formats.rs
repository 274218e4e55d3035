//! serde backed formats
//!
//! The element tree derives `Serialize`, so JSON and YAML output are a direct serde dump:
//! text nodes become strings, elements become maps with `kind`, `attributes` and `children`.

use super::registry::{FormatError, Formatter};
use crate::fsm::elements::Node;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, tree: &Node) -> Result<String, FormatError> {
        serde_json::to_string_pretty(tree)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Pretty printed JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, tree: &Node) -> Result<String, FormatError> {
        serde_yaml::to_string(tree).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "YAML"
    }
}
