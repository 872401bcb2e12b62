//! Specification-limit tables.
//!
//! Maps process parameter names to their [`SpecificationLimits`]. Tables are
//! plain values passed to whoever needs them; nothing here is global.
//!
//! ## TOML layout
//!
//! ```toml
//! [parameters."CQA - Purity (%)"]
//! lower = 97.5
//! upper = 100.0
//! ```
//!
//! Every entry is validated at load time, so a table never holds inverted
//! or non-finite limits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capability::SpecificationLimits;
use crate::error::{Result, SpcError};

/// Looks up specification limits for a named parameter.
///
/// Returning `None` means the parameter has no formal specification (for
/// example a material-age counter), not that the lookup failed.
pub trait SpecLimitSource {
    fn spec_limits(&self, parameter: &str) -> Option<SpecificationLimits>;
}

/// Parameter name → specification limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecLimitTable {
    #[serde(default)]
    parameters: BTreeMap<String, SpecificationLimits>,
}

impl SpecLimitTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits for the downstream ion-exchange control strategy.
    pub fn cpv_defaults() -> Self {
        let entries = [
            ("CQA - Purity (%)", 97.5, 100.0),
            ("CQA - Step Yield (%)", 85.0, 100.0),
            ("CPP - IEX Pool Conductivity (mS/cm)", 14.0, 16.5),
            ("CPP - IEX Load Density (g/L)", 23.0, 28.0),
            ("CPP - Elution Buffer pH", 6.4, 6.6),
            ("CMA - Resin Age (cycles)", 0.0, 250.0),
        ];
        let parameters = entries
            .into_iter()
            .map(|(name, lower, upper)| (name.to_string(), SpecificationLimits { lower, upper }))
            .collect();
        Self { parameters }
    }

    /// Parses and validates a table from TOML.
    ///
    /// # Errors
    ///
    /// - [`SpcError::Config`] on malformed TOML or missing fields
    /// - [`SpcError::InvalidSpecification`] naming the first bad entry
    ///
    /// # Examples
    ///
    /// ```
    /// use bioproc_spc::config::SpecLimitTable;
    ///
    /// let table = SpecLimitTable::from_toml_str(r#"
    ///     [parameters."CPP - Elution Buffer pH"]
    ///     lower = 6.4
    ///     upper = 6.6
    /// "#).unwrap();
    /// assert_eq!(table.get("CPP - Elution Buffer pH").unwrap().upper, 6.6);
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let table: Self = toml::from_str(contents)?;
        for (name, limits) in &table.parameters {
            limits.validate().map_err(|e| match e {
                SpcError::InvalidSpecification { reason } => {
                    SpcError::invalid_spec(format!("{name}: {reason}"))
                }
                other => other,
            })?;
        }
        debug!(parameters = table.len(), "spec limit table loaded");
        Ok(table)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Adds or replaces the limits for `name`.
    ///
    /// # Errors
    ///
    /// [`SpcError::InvalidSpecification`] if `limits` fails validation; the
    /// table is left unchanged.
    pub fn insert(&mut self, name: impl Into<String>, limits: SpecificationLimits) -> Result<()> {
        limits.validate()?;
        self.parameters.insert(name.into(), limits);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<SpecificationLimits> {
        self.parameters.get(name).copied()
    }

    /// Like [`get`](Self::get), but a missing entry is an error.
    pub fn require(&self, name: &str) -> Result<SpecificationLimits> {
        self.get(name).ok_or_else(|| {
            SpcError::invalid_spec(format!("no specification limits configured for {name}"))
        })
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }
}

impl SpecLimitSource for SpecLimitTable {
    fn spec_limits(&self, parameter: &str) -> Option<SpecificationLimits> {
        self.get(parameter)
    }
}
