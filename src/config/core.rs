use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::algebra::{EngineLimits, Vocabulary};
use crate::io::output::OutputFormat;

/// Root configuration structure for stepwise
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StepwiseConfig {
    /// Unknowns the parser accepts
    #[serde(default)]
    pub symbols: SymbolsConfig,

    /// Engine resource limits
    #[serde(default)]
    pub limits: EngineLimits,

    /// Keyword rules for domain labels
    #[serde(default)]
    pub domain: DomainConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl StepwiseConfig {
    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary::new(self.symbols.unknowns.iter().cloned())
    }

    /// Check the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.symbols.unknowns.is_empty() {
            return Err("symbols.unknowns must name at least one unknown".to_string());
        }
        if let Some(bad) = self
            .symbols
            .unknowns
            .iter()
            .find(|u| u.is_empty() || !u.chars().all(|c| c.is_ascii_lowercase()))
        {
            return Err(format!(
                "symbols.unknowns entry {bad:?} must be lowercase ASCII letters"
            ));
        }
        if self.limits.max_exponent == 0 {
            return Err("limits.max_exponent must be at least 1".to_string());
        }
        if self.limits.max_terms == 0 {
            return Err("limits.max_terms must be at least 1".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymbolsConfig {
    #[serde(default = "default_unknowns")]
    pub unknowns: Vec<String>,
}

impl Default for SymbolsConfig {
    fn default() -> Self {
        Self {
            unknowns: default_unknowns(),
        }
    }
}

fn default_unknowns() -> Vec<String> {
    vec!["x".to_string(), "y".to_string(), "z".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DomainConfig {
    /// Label mapped to the keywords that select it
    #[serde(default)]
    pub keywords: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: OutputFormat,
}
