use std::fmt;

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;
use crate::membership::MembershipFunction;
use crate::value::FuzzyValue;

/// A named, bounded domain with linguistic categories.
///
/// The definition itself only holds membership functions. [`FuzzyVariable::fuzzify`]
/// returns a separate view carrying one [`FuzzyValue`] per category, so any
/// number of fuzzifications can run against the same definition at once.
#[derive(Clone, Debug)]
pub struct FuzzyVariable {
    name: String,
    min: f64,
    max: f64,
    // Registration order doubles as the tie-break order
    categories: Vec<(String, MembershipFunction)>,
    fuzzy_values: Option<Vec<FuzzyValue>>,
}

impl FuzzyVariable {
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> Result<Self> {
        let name = name.into();

        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(FuzzyError::InvalidRange { variable: name, min, max });
        }

        Ok(Self {
            name,
            min,
            max,
            categories: Vec::new(),
            fuzzy_values: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Category labels in registration order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(label, _)| label.as_str())
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.position(category).is_some()
    }

    pub fn is_fuzzified(&self) -> bool {
        self.fuzzy_values.is_some()
    }

    pub fn add_membership_function(&mut self, category: impl Into<String>, func: MembershipFunction) -> Result<()> {
        let category = category.into();

        if self.has_category(&category) {
            return Err(FuzzyError::DuplicateCategory {
                variable: self.name.clone(),
                category,
            });
        }

        self.categories.push((category, func));

        Ok(())
    }

    pub fn add_triangular_membership_function(
        &mut self,
        category: impl Into<String>,
        a: f64,
        b: f64,
        c: f64,
    ) -> Result<()> {
        self.add_membership_function(category, MembershipFunction::triangular(a, b, c)?)
    }

    /// Builder form of [`FuzzyVariable::add_triangular_membership_function`].
    pub fn with_triangular(mut self, category: impl Into<String>, a: f64, b: f64, c: f64) -> Result<Self> {
        self.add_triangular_membership_function(category, a, b, c)?;

        Ok(self)
    }

    /// Builder form of [`FuzzyVariable::add_membership_function`].
    pub fn with_membership_function(mut self, category: impl Into<String>, func: MembershipFunction) -> Result<Self> {
        self.add_membership_function(category, func)?;

        Ok(self)
    }

    /// Fuzzifies a single crisp value into length-1 fuzzy values.
    pub fn fuzzify(&self, crisp_value: f64) -> Result<Self> {
        self.fuzzify_points(&[crisp_value])
    }

    /// Fuzzifies every sample point, e.g. a whole output universe.
    pub fn fuzzify_points(&self, points: &[f64]) -> Result<Self> {
        if self.categories.is_empty() {
            return Err(FuzzyError::NoMembershipFunctions {
                variable: self.name.clone(),
            });
        }

        let fuzzy_values = self.categories.iter().map(|(_, mf)| mf.evaluate(points)).collect();

        Ok(self.with_fuzzy_values(fuzzy_values))
    }

    /// Fuzzifies `resolution` evenly spaced points spanning `[min, max]`.
    pub fn fuzzify_universe(&self, resolution: usize) -> Result<Self> {
        self.fuzzify_points(&self.universe(resolution))
    }

    pub fn universe(&self, resolution: usize) -> Vec<f64> {
        Linspace::new(self.min, self.max, resolution).collect()
    }

    /// The fuzzy value computed for `category` by the last fuzzification.
    pub fn is_(&self, category: &str) -> Result<&FuzzyValue> {
        let fuzzy_values = self.computed()?;
        let index = self.position(category).ok_or_else(|| FuzzyError::UnknownCategory {
            variable: self.name.clone(),
            category: category.to_owned(),
        })?;

        Ok(&fuzzy_values[index])
    }

    pub fn is_not(&self, category: &str) -> Result<FuzzyValue> {
        Ok(self.is_(category)?.complement())
    }

    /// `(category, value)` pairs in registration order.
    pub fn fuzzy_values(&self) -> Result<impl Iterator<Item = (&str, &FuzzyValue)>> {
        let fuzzy_values = self.computed()?;

        Ok(self.categories().zip(fuzzy_values))
    }

    /// Category with the strongest degree; ties go to the first registered.
    pub fn max_membership_category(&self) -> Result<&str> {
        let mut best: Option<(&str, f64)> = None;

        for (category, value) in self.fuzzy_values()? {
            let strength = value.strength();

            match best {
                Some((_, top)) if top >= strength => {},
                _ => best = Some((category, strength)),
            }
        }

        best.map(|(category, _)| category)
            .ok_or_else(|| FuzzyError::NoMembershipFunctions {
                variable: self.name.clone(),
            })
    }

    /// A view of this definition carrying `fuzzy_values`, one per category.
    pub(crate) fn with_fuzzy_values(&self, fuzzy_values: Vec<FuzzyValue>) -> Self {
        debug_assert_eq!(fuzzy_values.len(), self.categories.len());

        Self {
            name: self.name.clone(),
            min: self.min,
            max: self.max,
            categories: self.categories.clone(),
            fuzzy_values: Some(fuzzy_values),
        }
    }

    pub(crate) fn position(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|(label, _)| label == category)
    }

    fn computed(&self) -> Result<&[FuzzyValue]> {
        self.fuzzy_values
            .as_deref()
            .ok_or_else(|| FuzzyError::UnfuzzifiedAccess {
                variable: self.name.clone(),
            })
    }
}

impl fmt::Display for FuzzyVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FuzzyVariable<{}, {}, {}>", self.name, self.min, self.max)?;

        if let Some(fuzzy_values) = &self.fuzzy_values {
            for ((category, _), value) in self.categories.iter().zip(fuzzy_values) {
                write!(f, " {category}: {:?}", value.degree())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
fn service_level() -> FuzzyVariable {
    FuzzyVariable::new("service_level", 0., 100.)
        .and_then(|v| v.with_triangular("POOR", 0., 0., 50.))
        .and_then(|v| v.with_triangular("GOOD", 10., 50., 90.))
        .and_then(|v| v.with_triangular("EXCELLENT", 75., 100., 100.))
        .unwrap()
}

#[test]
fn test_fuzzify() {
    let definition = service_level();
    let view = definition.fuzzify(30.).unwrap();

    assert_eq!(view.is_("POOR").unwrap().degree(), &[0.4]);
    assert_eq!(view.is_("GOOD").unwrap().degree(), &[0.5]);
    assert_eq!(view.is_("EXCELLENT").unwrap().degree(), &[0.]);
    assert_eq!(view.is_not("GOOD").unwrap().degree(), &[0.5]);
    assert_eq!(view.is_not("EXCELLENT").unwrap().degree(), &[1.]);
    assert!(matches!(view.is_not("AMAZING"), Err(FuzzyError::UnknownCategory { .. })));
    assert!(matches!(definition.is_not("POOR"), Err(FuzzyError::UnfuzzifiedAccess { .. })));
    assert_eq!(view.max_membership_category().unwrap(), "GOOD");

    // The definition stays untouched
    assert!(!definition.is_fuzzified());
    assert!(view.is_fuzzified());
}

#[test]
fn test_peak_has_full_membership() {
    let view = service_level().fuzzify(50.).unwrap();

    assert_eq!(view.is_("GOOD").unwrap().degree(), &[1.]);
    assert_eq!(view.is_("POOR").unwrap().degree(), &[0.]);
}

#[test]
fn test_query_errors() {
    let definition = service_level();

    assert_eq!(
        definition.is_("POOR"),
        Err(FuzzyError::UnfuzzifiedAccess {
            variable: "service_level".into()
        })
    );
    assert!(matches!(
        definition.max_membership_category(),
        Err(FuzzyError::UnfuzzifiedAccess { .. })
    ));

    let view = definition.fuzzify(10.).unwrap();

    assert_eq!(
        view.is_("AMAZING"),
        Err(FuzzyError::UnknownCategory {
            variable: "service_level".into(),
            category: "AMAZING".into(),
        })
    );
}

#[test]
fn test_configuration_errors() {
    let mut empty = FuzzyVariable::new("empty", 0., 1.).unwrap();

    assert!(matches!(empty.fuzzify(0.5), Err(FuzzyError::NoMembershipFunctions { .. })));

    empty.add_triangular_membership_function("LOW", 0., 0., 1.).unwrap();

    assert_eq!(
        empty.add_triangular_membership_function("LOW", 0., 0.5, 1.),
        Err(FuzzyError::DuplicateCategory {
            variable: "empty".into(),
            category: "LOW".into(),
        })
    );
    assert!(matches!(
        FuzzyVariable::new("backwards", 5., 5.),
        Err(FuzzyError::InvalidRange { .. })
    ));
    assert!(FuzzyVariable::new("unbounded", 0., f64::INFINITY).is_err());
}

#[test]
fn test_max_membership_ties_go_to_first_registered() {
    let view = FuzzyVariable::new("tie", 0., 10.)
        .and_then(|v| v.with_triangular("LEFT", 0., 5., 10.))
        .and_then(|v| v.with_triangular("RIGHT", 0., 5., 10.))
        .and_then(|v| v.fuzzify(2.5))
        .unwrap();

    assert_eq!(view.max_membership_category().unwrap(), "LEFT");
}

#[test]
fn test_fuzzify_universe() {
    let view = service_level().fuzzify_universe(5).unwrap();

    assert_eq!(view.is_("POOR").unwrap().degree(), &[1., 0.5, 0., 0., 0.]);
    assert_eq!(view.is_("GOOD").unwrap().degree(), &[0., 0.375, 1., 0.375, 0.]);
    assert_eq!(view.is_("EXCELLENT").unwrap().degree(), &[0., 0., 0., 0., 1.]);
}
