use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::error::{FuzzyError, Result};
use crate::inputs::{FuzzifiedInputs, Inputs};
use crate::ops::DefuzzificationOp;
use crate::rules::Rules;
use crate::value::FuzzyValue;
use crate::variable::FuzzyVariable;

/// Number of output universe samples used for defuzzification.
pub const DEFAULT_RESOLUTION: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Sample points spanning the output variable's range, at least 2
    pub resolution: usize,
    pub defuzzification: DefuzzificationOp,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            defuzzification: DefuzzificationOp::Centroid,
        }
    }
}

/// Mamdani inference over a fixed set of input variables, one output
/// variable and an ordered list of rules.
///
/// The engine holds configuration only. Every call fuzzifies into fresh
/// views, so a shared engine can serve concurrent callers.
#[derive(Debug)]
pub struct InferenceEngine {
    inputs: Vec<FuzzyVariable>,
    output: FuzzyVariable,
    rules: Rules,
    config: EngineConfig,
}

impl InferenceEngine {
    pub fn new(inputs: Vec<FuzzyVariable>, output: FuzzyVariable, rules: Rules) -> Result<Self> {
        let mut seen = HashSet::with_capacity(inputs.len());

        for var in &inputs {
            if !seen.insert(var.name()) {
                return Err(FuzzyError::DuplicateVariable {
                    name: var.name().to_owned(),
                });
            }
        }

        Ok(Self {
            inputs,
            output,
            rules,
            config: EngineConfig::default(),
        })
    }

    pub fn with_config(mut self, config: EngineConfig) -> Result<Self> {
        if config.resolution < 2 {
            return Err(FuzzyError::InvalidResolution(config.resolution));
        }

        self.config = config;

        Ok(self)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn inputs(&self) -> &[FuzzyVariable] {
        &self.inputs
    }

    pub fn output(&self) -> &FuzzyVariable {
        &self.output
    }

    /// Fuzzifies the inputs, fires every rule and ORs the results per output
    /// category.
    ///
    /// The returned view of the output variable holds each category's
    /// aggregated firing strength; categories no rule names stay at zero.
    pub fn run_rules(&self, crisp_values: &Inputs) -> Result<FuzzyVariable> {
        let crisp = self.crisp_values_in_order(crisp_values)?;

        // Fuzzify inputs
        let mut fuzzified = HashMap::with_capacity(self.inputs.len());

        for (var, crisp_value) in self.inputs.iter().zip(crisp) {
            fuzzified.insert(var.name().to_owned(), var.fuzzify(crisp_value)?);
        }

        let fuzzified = FuzzifiedInputs(fuzzified);
        let n_categories = self.output.categories().count();
        let mut aggregated = vec![FuzzyValue::zeros(1); n_categories];

        // Apply rules
        for (i, rule) in self.rules.0.iter().enumerate() {
            let (category, value) = rule(&fuzzified)?;
            let Some(index) = self.output.position(&category) else {
                debug!(rule = i, %category, "rule names an unknown output category");

                return Err(FuzzyError::UnknownCategory {
                    variable: self.output.name().to_owned(),
                    category,
                });
            };

            trace!(rule = i, %category, strength = value.strength(), "rule fired");

            aggregated[index] = aggregated[index].maximum(&value)?;
        }

        Ok(self.output.with_fuzzy_values(aggregated))
    }

    /// Crisp prediction: clips each output category at its aggregated
    /// strength, unions the clipped sets and defuzzifies the union.
    pub fn predict(&self, crisp_values: &Inputs) -> Result<f64> {
        let strengths = self.run_rules(crisp_values)?;
        let universe = self.output.universe(self.config.resolution);
        let shapes = self.output.fuzzify_points(&universe)?;
        let mut aggregation = FuzzyValue::zeros(universe.len());

        for ((category, shape), (_, strength)) in shapes.fuzzy_values()?.zip(strengths.fuzzy_values()?) {
            let clipped = shape.clip(strength.strength());

            trace!(%category, strength = strength.strength(), "clipped output category");

            aggregation = aggregation.or(&clipped)?;
        }

        if aggregation.strength() == 0. {
            debug!(output = self.output.name(), "aggregated output membership is empty");

            return Err(FuzzyError::DegenerateAggregate {
                variable: self.output.name().to_owned(),
            });
        }

        let crisp = self.config.defuzzification.call(&universe, aggregation.degree());

        debug!(
            output = self.output.name(),
            method = ?self.config.defuzzification,
            crisp,
            "defuzzified"
        );

        Ok(crisp)
    }

    /// Categorical prediction: the output category with the strongest
    /// aggregated rule firing, ties going to the first declared category.
    pub fn predict_categorical(&self, crisp_values: &Inputs) -> Result<String> {
        let strengths = self.run_rules(crisp_values)?;
        let category = strengths.max_membership_category()?.to_owned();

        debug!(output = self.output.name(), %category, "predicted category");

        Ok(category)
    }

    /// One crisp value per declared input, or every missing name at once.
    fn crisp_values_in_order(&self, crisp_values: &Inputs) -> Result<Vec<f64>> {
        let mut values = Vec::with_capacity(self.inputs.len());
        let mut missing = Vec::new();

        for var in &self.inputs {
            match crisp_values.get(var.name()) {
                Some(value) => values.push(value),
                None => missing.push(var.name().to_owned()),
            }
        }

        if missing.is_empty() {
            return Ok(values);
        }

        debug!(?missing, "missing crisp input values");

        Err(FuzzyError::MissingInput { variables: missing })
    }
}

#[test]
fn test_tipping() {
    let service_level = FuzzyVariable::new("service_level", 0., 100.)
        .and_then(|v| v.with_triangular("POOR", 0., 0., 50.))
        .and_then(|v| v.with_triangular("GOOD", 10., 50., 90.))
        .and_then(|v| v.with_triangular("EXCELLENT", 75., 100., 100.))
        .unwrap();
    let food_quality = FuzzyVariable::new("food_quality", 0., 100.)
        .and_then(|v| v.with_triangular("BAD", 0., 0., 50.))
        .and_then(|v| v.with_triangular("DELICIOUS", 50., 100., 100.))
        .unwrap();
    let tip_percentage = FuzzyVariable::new("tip_percentage", 0., 30.)
        .and_then(|v| v.with_triangular("CHEAP", 0., 6., 12.))
        .and_then(|v| v.with_triangular("AVERAGE", 10., 15., 20.))
        .and_then(|v| v.with_triangular("GENEROUS", 18., 24., 30.))
        .unwrap();
    let mut rules = Rules::with_capacity(5);

    rules
        .add_is("service_level", "POOR", "CHEAP")
        .add_is("food_quality", "BAD", "CHEAP")
        .add_is("service_level", "GOOD", "AVERAGE")
        .add_is("service_level", "EXCELLENT", "GENEROUS")
        .add_is("food_quality", "DELICIOUS", "GENEROUS");

    let engine = InferenceEngine::new(vec![service_level, food_quality], tip_percentage, rules).unwrap();
    let inputs = Inputs::new().with("service_level", 30.).with("food_quality", 80.);

    let strengths = engine.run_rules(&inputs).unwrap();

    assert_eq!(strengths.is_("CHEAP").unwrap().degree(), &[0.4]);
    assert_eq!(strengths.is_("AVERAGE").unwrap().degree(), &[0.5]);
    assert!((strengths.is_("GENEROUS").unwrap().degree()[0] - 0.6).abs() < 1e-12);

    let tip = engine.predict(&inputs).unwrap();

    assert!((tip - 15.88).abs() < 0.01, "{tip}");
    assert_eq!(engine.predict_categorical(&inputs).unwrap(), "GENEROUS");
}

#[test]
fn test_config_validation() {
    let output = FuzzyVariable::new("out", 0., 1.)
        .and_then(|v| v.with_triangular("HIGH", 0., 1., 1.))
        .unwrap();
    let engine = InferenceEngine::new(Vec::new(), output, Rules::new()).unwrap();

    assert_eq!(engine.config().resolution, DEFAULT_RESOLUTION);

    let err = engine
        .with_config(EngineConfig {
            resolution: 1,
            ..EngineConfig::default()
        })
        .unwrap_err();

    assert_eq!(err, FuzzyError::InvalidResolution(1));
}
