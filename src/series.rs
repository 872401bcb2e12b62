//! Batch-indexed measurement series.
//!
//! A [`MeasurementSeries`] is an ordered list of `(batch id, value)` pairs,
//! one per manufacturing batch, in process order. Identifiers are unique and
//! every value is finite; both are checked on insertion so downstream
//! computations never see NaN.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::error::{Result, SpcError};

/// One batch observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub id: String,
    pub value: f64,
}

/// Ordered, identifier-unique sequence of observations.
///
/// # Examples
///
/// ```
/// use bioproc_spc::MeasurementSeries;
///
/// let series = MeasurementSeries::from_pairs([
///     ("B0100", 98.4),
///     ("B0101", 98.7),
///     ("B0102", 98.5),
/// ]).unwrap();
/// assert_eq!(series.len(), 3);
/// assert_eq!(series.values(), vec![98.4, 98.7, 98.5]);
///
/// // Repeated identifiers are rejected.
/// assert!(MeasurementSeries::from_pairs([("B0100", 1.0), ("B0100", 2.0)]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeasurementSeries {
    observations: Vec<Observation>,
    #[serde(skip)]
    ids: HashSet<String>,
}

impl MeasurementSeries {
    /// Creates an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a series from `(id, value)` pairs, preserving order.
    ///
    /// # Errors
    ///
    /// - [`SpcError::DuplicateIdentifier`] if an id repeats
    /// - [`SpcError::NonFiniteValue`] if a value is NaN or infinite
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut series = Self::new();
        for (id, value) in pairs {
            series.push(id, value)?;
        }
        Ok(series)
    }

    /// Builds a series from bare values, labelling batches `{prefix}{index}`.
    ///
    /// Handy for data that arrives without batch ids.
    pub fn from_values(prefix: &str, values: &[f64]) -> Result<Self> {
        Self::from_pairs(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (format!("{prefix}{i}"), v)),
        )
    }

    /// Appends one observation at the end of the series.
    pub fn push(&mut self, id: impl Into<String>, value: f64) -> Result<()> {
        let id = id.into();
        if !value.is_finite() {
            return Err(SpcError::NonFiniteValue { id });
        }
        if !self.ids.insert(id.clone()) {
            return Err(SpcError::DuplicateIdentifier { id });
        }
        self.observations.push(Observation { id, value });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// Values in process order.
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    pub fn get(&self, id: &str) -> Option<&Observation> {
        if !self.ids.contains(id) {
            return None;
        }
        self.observations.iter().find(|o| o.id == id)
    }

    /// Fails with [`SpcError::InsufficientData`] unless at least `required`
    /// observations are present.
    pub(crate) fn require(&self, required: usize) -> Result<()> {
        if self.len() < required {
            return Err(SpcError::insufficient(required, self.len()));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a MeasurementSeries {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

/// Supplies ordered observations for a named process parameter.
///
/// Implementations may be backed by a historian, a LIMS export, or
/// synthetic data; the engine makes no assumption about origin.
pub trait MeasurementSource {
    fn fetch(&self, parameter: &str) -> Result<MeasurementSeries>;
}

/// Map-backed [`MeasurementSource`].
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    series: BTreeMap<String, MeasurementSeries>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, parameter: impl Into<String>, series: MeasurementSeries) {
        self.series.insert(parameter.into(), series);
    }

    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }
}

impl MeasurementSource for InMemorySource {
    fn fetch(&self, parameter: &str) -> Result<MeasurementSeries> {
        self.series
            .get(parameter)
            .cloned()
            .ok_or_else(|| SpcError::UnknownParameter {
                name: parameter.to_string(),
            })
    }
}
