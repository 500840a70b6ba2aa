use std::collections::HashMap;

use crate::error::{FuzzyError, Result};
use crate::value::FuzzyValue;
use crate::variable::FuzzyVariable;

/// Crisp values keyed by input variable name.
#[derive(Clone, Debug, Default)]
pub struct Inputs(pub(crate) HashMap<String, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    // Replaces any value already given for `name`
    pub fn add(&mut self, name: impl Into<String>, val: f64) -> &mut Self {
        self.0.insert(name.into(), val);
        self
    }

    pub fn with(mut self, name: impl Into<String>, val: f64) -> Self {
        self.add(name, val);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Inputs {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Inputs(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// The fuzzified input variables handed to every rule during one call.
#[derive(Clone, Debug, Default)]
pub struct FuzzifiedInputs(pub(crate) HashMap<String, FuzzyVariable>);

impl FuzzifiedInputs {
    pub fn get(&self, name: &str) -> Result<&FuzzyVariable> {
        self.0.get(name).ok_or_else(|| FuzzyError::UnknownVariable { name: name.to_owned() })
    }

    /// Shorthand for `get(variable)?.is_(category)`.
    pub fn is_(&self, variable: &str, category: &str) -> Result<&FuzzyValue> {
        self.get(variable)?.is_(category)
    }

    pub fn is_not(&self, variable: &str, category: &str) -> Result<FuzzyValue> {
        self.get(variable)?.is_not(category)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[test]
fn test_inputs() {
    let mut inputs = Inputs::new();

    inputs.add("service_level", 30.).add("food_quality", 80.);
    inputs.add("service_level", 40.);

    assert_eq!(inputs.get("service_level"), Some(40.));
    assert_eq!(inputs.get("food_quality"), Some(80.));
    assert_eq!(inputs.get("ambience"), None);

    let collected: Inputs = [("service_level", 30.)].into_iter().collect();

    assert_eq!(collected.get("service_level"), Some(30.));
}

#[test]
fn test_fuzzified_lookup() {
    let view = FuzzyVariable::new("food_quality", 0., 100.)
        .and_then(|v| v.with_triangular("BAD", 0., 0., 50.))
        .and_then(|v| v.fuzzify(20.))
        .unwrap();
    let fuzzified = FuzzifiedInputs(HashMap::from([("food_quality".to_owned(), view)]));

    assert_eq!(fuzzified.is_("food_quality", "BAD").unwrap().degree(), &[0.6]);
    assert!((fuzzified.is_not("food_quality", "BAD").unwrap().degree()[0] - 0.4).abs() < 1e-12);
    assert_eq!(
        fuzzified.get("ambience").unwrap_err(),
        FuzzyError::UnknownVariable { name: "ambience".into() }
    );
}
