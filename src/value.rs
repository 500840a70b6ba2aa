use std::fmt;
use std::ops::Not;

use crate::error::{FuzzyError, Result};
use crate::ops::Connective;

/// Membership degrees sampled over some universe.
///
/// A crisp input fuzzifies to a single degree, an output universe to one
/// degree per sample point. Values over different universes never combine:
/// every binary operation checks lengths and fails with
/// [`FuzzyError::LengthMismatch`] instead of truncating.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FuzzyValue {
    degree: Vec<f64>,
}

impl FuzzyValue {
    /// Degrees outside `[0, 1]` are clamped. NaN becomes zero.
    pub fn new(degree: impl IntoIterator<Item = f64>) -> Self {
        let degree = degree
            .into_iter()
            .map(|d| if d.is_nan() { 0. } else { d.clamp(0., 1.) })
            .collect();

        Self { degree }
    }

    pub fn zeros(len: usize) -> Self {
        Self { degree: vec![0.; len] }
    }

    pub fn degree(&self) -> &[f64] {
        &self.degree
    }

    pub fn len(&self) -> usize {
        self.degree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degree.is_empty()
    }

    /// The strongest degree, zero for an empty value.
    pub fn strength(&self) -> f64 {
        self.degree.iter().copied().fold(0., f64::max)
    }

    /// Elementwise minimum.
    pub fn and(&self, other: &Self) -> Result<Self> {
        self.combine(other, Connective::Min)
    }

    /// Elementwise maximum.
    pub fn or(&self, other: &Self) -> Result<Self> {
        self.combine(other, Connective::Max)
    }

    /// Elementwise complement, `1 - degree`.
    pub fn complement(&self) -> Self {
        Self {
            degree: self.degree.iter().map(|d| 1. - d).collect(),
        }
    }

    /// Caps every degree at `max_degree`.
    pub fn clip(&self, max_degree: f64) -> Self {
        Self::new(self.degree.iter().map(|d| d.min(max_degree)))
    }

    /// Same as [`FuzzyValue::or`], named for aggregation sites.
    pub fn maximum(&self, other: &Self) -> Result<Self> {
        self.or(other)
    }

    fn combine(&self, other: &Self, op: Connective) -> Result<Self> {
        if self.len() != other.len() {
            return Err(FuzzyError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }

        Ok(Self {
            degree: op
                .call(self.degree.iter().copied(), other.degree.iter().copied())
                .collect(),
        })
    }
}

impl From<f64> for FuzzyValue {
    fn from(degree: f64) -> Self {
        Self::new(Some(degree))
    }
}

impl Not for &FuzzyValue {
    type Output = FuzzyValue;

    fn not(self) -> FuzzyValue {
        self.complement()
    }
}

impl Not for FuzzyValue {
    type Output = FuzzyValue;

    fn not(self) -> FuzzyValue {
        self.complement()
    }
}

impl fmt::Display for FuzzyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FuzzyValue: {:?}", self.degree)
    }
}

#[test]
fn test_fuzzy_value_operations() {
    let a = FuzzyValue::new([0.6, 0.1, 1.]);
    let b = FuzzyValue::new([0.4, 0.3, 0.]);

    assert_eq!(a.and(&b).unwrap().degree(), &[0.4, 0.1, 0.]);
    assert_eq!(a.or(&b).unwrap().degree(), &[0.6, 0.3, 1.]);
    assert_eq!(a.maximum(&b).unwrap(), a.or(&b).unwrap());
    assert_eq!((!&b).degree(), &[0.6, 0.7, 1.]);
    let halves = FuzzyValue::new([0.5, 0.25, 1.]);
    assert_eq!(!!halves.clone(), halves);
    assert_eq!(a.clip(0.5).degree(), &[0.5, 0.1, 0.5]);
    assert_eq!(a.strength(), 1.);
}

#[test]
fn test_mismatched_universes() {
    let short = FuzzyValue::from(0.5);
    let long = FuzzyValue::zeros(3);

    assert_eq!(
        short.and(&long),
        Err(FuzzyError::LengthMismatch { left: 1, right: 3 })
    );
    assert_eq!(
        long.or(&short),
        Err(FuzzyError::LengthMismatch { left: 3, right: 1 })
    );
}

#[test]
fn test_degrees_are_clamped() {
    let v = FuzzyValue::new([-0.5, 1.5, f64::NAN]);

    assert_eq!(v.degree(), &[0., 1., 0.]);
    assert_eq!(FuzzyValue::default().strength(), 0.);
}
