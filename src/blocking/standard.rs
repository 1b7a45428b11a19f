//! Standard (token) blocking: every token is a blocking key.

use super::{KeyGenerator, KeySet, tokenizer};
use crate::parameters::ParameterDescriptor;
use crate::pipeline::MethodDescription;

/// Parameter-free blocking on whitespace tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardBlocking;

impl StandardBlocking {
    /// Create the method
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl KeyGenerator for StandardBlocking {
    fn blocking_keys(&self, attribute_value: &str) -> KeySet {
        tokenizer::tokens(attribute_value)
            .map(str::to_string)
            .collect()
    }
}

impl MethodDescription for StandardBlocking {
    fn method_name(&self) -> &'static str {
        "Standard Blocking"
    }

    fn method_info(&self) -> String {
        format!(
            "{}: it creates one block for every token in the attribute values of at least two entities.",
            self.method_name()
        )
    }

    fn parameter_descriptors(&self) -> Vec<ParameterDescriptor> {
        Vec::new()
    }

    fn method_configuration(&self) -> String {
        "Parameter-free method".to_string()
    }
}
