use fuzzy_mamdani::{
    DefuzzificationOp, EngineConfig, FuzzyError, FuzzyVariable, InferenceEngine, Inputs, MembershipFunction, Rules,
};

const POOR: &str = "POOR";
const GOOD: &str = "GOOD";
const EXCELLENT: &str = "EXCELLENT";

const BAD: &str = "BAD";
const DELICIOUS: &str = "DELICIOUS";

const CHEAP: &str = "CHEAP";
const AVERAGE: &str = "AVERAGE";
const GENEROUS: &str = "GENEROUS";

fn variables() -> (FuzzyVariable, FuzzyVariable, FuzzyVariable) {
    let mut service_level = FuzzyVariable::new("service_level", 0., 100.).unwrap();
    let mut food_quality = FuzzyVariable::new("food_quality", 0., 100.).unwrap();
    let mut tip_percentage = FuzzyVariable::new("tip_percentage", 0., 30.).unwrap();

    service_level.add_triangular_membership_function(POOR, 0., 0., 50.).unwrap();
    service_level.add_triangular_membership_function(GOOD, 10., 50., 90.).unwrap();
    service_level.add_triangular_membership_function(EXCELLENT, 75., 100., 100.).unwrap();

    food_quality.add_triangular_membership_function(BAD, 0., 0., 50.).unwrap();
    food_quality.add_triangular_membership_function(DELICIOUS, 50., 100., 100.).unwrap();

    tip_percentage.add_triangular_membership_function(CHEAP, 0., 6., 12.).unwrap();
    tip_percentage.add_triangular_membership_function(AVERAGE, 10., 15., 20.).unwrap();
    tip_percentage.add_triangular_membership_function(GENEROUS, 18., 24., 30.).unwrap();

    (service_level, food_quality, tip_percentage)
}

fn rules() -> Rules {
    let mut rules = Rules::new();

    rules
        .add(|inputs| Ok((CHEAP.into(), inputs.is_("service_level", POOR)?.clone())))
        .add(|inputs| Ok((CHEAP.into(), inputs.is_("food_quality", BAD)?.clone())))
        .add(|inputs| Ok((AVERAGE.into(), inputs.is_("service_level", GOOD)?.clone())))
        .add(|inputs| Ok((GENEROUS.into(), inputs.is_("service_level", EXCELLENT)?.clone())))
        .add(|inputs| Ok((GENEROUS.into(), inputs.is_("food_quality", DELICIOUS)?.clone())));

    rules
}

fn engine_with(rules: Rules) -> InferenceEngine {
    let (service_level, food_quality, tip_percentage) = variables();

    InferenceEngine::new(vec![service_level, food_quality], tip_percentage, rules).unwrap()
}

fn inputs(service_level: f64, food_quality: f64) -> Inputs {
    Inputs::new()
        .with("service_level", service_level)
        .with("food_quality", food_quality)
}

#[test]
fn test_predict() {
    let engine = engine_with(rules());
    let tip = engine.predict(&inputs(30., 80.)).unwrap();

    assert!((tip - 15.88).abs() < 0.01, "got {tip}");
}

#[test]
fn test_predict_categorical() {
    let engine = engine_with(rules());

    assert_eq!(engine.predict_categorical(&inputs(30., 80.)).unwrap(), GENEROUS);
    assert_eq!(engine.predict_categorical(&inputs(5., 10.)).unwrap(), CHEAP);
    assert_eq!(engine.predict_categorical(&inputs(50., 50.)).unwrap(), AVERAGE);
}

#[test]
fn test_predict_is_deterministic() {
    let engine = engine_with(rules());
    let first = engine.predict(&inputs(63.3, 41.)).unwrap();

    for _ in 0..10 {
        assert_eq!(engine.predict(&inputs(63.3, 41.)).unwrap(), first);
    }
}

#[test]
fn test_combined_rules_match_separate_rules() {
    // OR inside a rule and OR across rules aggregate the same way
    let mut combined = Rules::new();

    combined
        .add(|inputs| {
            let poor = inputs.is_("service_level", POOR)?;
            let bad = inputs.is_("food_quality", BAD)?;

            Ok((CHEAP.into(), poor.or(bad)?))
        })
        .add(|inputs| Ok((AVERAGE.into(), inputs.is_("service_level", GOOD)?.clone())))
        .add(|inputs| {
            let excellent = inputs.is_("service_level", EXCELLENT)?;
            let delicious = inputs.is_("food_quality", DELICIOUS)?;

            Ok((GENEROUS.into(), excellent.or(delicious)?))
        });

    let separate = engine_with(rules());
    let combined = engine_with(combined);

    for (service_level, food_quality) in [(30., 80.), (0., 0.), (95., 10.), (45., 55.)] {
        let crisp = inputs(service_level, food_quality);

        assert_eq!(separate.predict(&crisp).unwrap(), combined.predict(&crisp).unwrap());
    }
}

#[test]
fn test_missing_input() {
    let engine = engine_with(rules());
    let err = engine
        .predict(&Inputs::new().with("service_level", 30.))
        .unwrap_err();

    assert_eq!(
        err,
        FuzzyError::MissingInput {
            variables: vec!["food_quality".into()]
        }
    );
    assert!(err.to_string().contains("food_quality"));
    assert!(matches!(
        engine.predict_categorical(&Inputs::new()),
        Err(FuzzyError::MissingInput { variables }) if variables == ["service_level", "food_quality"]
    ));
}

#[test]
fn test_unknown_output_category() {
    let mut rules = rules();

    rules.add(|inputs| Ok(("LAVISH".into(), inputs.is_("service_level", EXCELLENT)?.clone())));

    let engine = engine_with(rules);
    let expected = FuzzyError::UnknownCategory {
        variable: "tip_percentage".into(),
        category: "LAVISH".into(),
    };

    assert_eq!(engine.predict(&inputs(30., 80.)).unwrap_err(), expected);
    assert_eq!(engine.predict_categorical(&inputs(30., 80.)).unwrap_err(), expected);
}

#[test]
fn test_rule_errors_propagate() {
    let mut rules = Rules::new();

    rules.add(|inputs| Ok((CHEAP.into(), inputs.is_("ambience", POOR)?.clone())));

    assert_eq!(
        engine_with(rules).predict(&inputs(30., 80.)).unwrap_err(),
        FuzzyError::UnknownVariable { name: "ambience".into() }
    );

    let mut rules = Rules::new();

    rules.add(|inputs| Ok((CHEAP.into(), inputs.is_("service_level", "TERRIBLE")?.clone())));

    assert!(matches!(
        engine_with(rules).predict(&inputs(30., 80.)),
        Err(FuzzyError::UnknownCategory { variable, .. }) if variable == "service_level"
    ));
}

#[test]
fn test_degenerate_aggregate() {
    // Nothing fires below EXCELLENT's support
    let mut rules = Rules::new();

    rules.add_is("service_level", EXCELLENT, GENEROUS);

    let engine = engine_with(rules);

    assert_eq!(
        engine.predict(&inputs(30., 80.)).unwrap_err(),
        FuzzyError::DegenerateAggregate {
            variable: "tip_percentage".into()
        }
    );
    // Categorical prediction still answers, first declared category wins the tie
    assert_eq!(engine.predict_categorical(&inputs(30., 80.)).unwrap(), CHEAP);
}

#[test]
fn test_engine_keeps_definitions_untouched() {
    let engine = engine_with(rules());

    engine.predict(&inputs(30., 80.)).unwrap();

    assert!(engine.inputs().iter().all(|var| !var.is_fuzzified()));
    assert!(!engine.output().is_fuzzified());
}

#[test]
fn test_duplicate_input_variable() {
    let (service_level, _, tip_percentage) = variables();
    let err = InferenceEngine::new(vec![service_level.clone(), service_level], tip_percentage, rules()).unwrap_err();

    assert_eq!(
        err,
        FuzzyError::DuplicateVariable {
            name: "service_level".into()
        }
    );
}

#[test]
fn test_alternate_defuzzification() {
    let engine = engine_with(rules())
        .with_config(EngineConfig {
            resolution: 301,
            defuzzification: DefuzzificationOp::MeanOfMaximum,
        })
        .unwrap();
    // GENEROUS fires at full strength and peaks alone at 24
    let tip = engine.predict(&inputs(100., 100.)).unwrap();

    assert!((tip - 24.).abs() < 0.05, "got {tip}");
}

#[test]
fn test_custom_membership_function() {
    let (service_level, food_quality, mut tip_percentage) = variables();

    tip_percentage
        .add_membership_function("NONE", MembershipFunction::new(|x| if x < 1. { 1. } else { 0. }))
        .unwrap();

    let mut rules = Rules::new();

    rules.add(|inputs| Ok(("NONE".into(), inputs.is_not("food_quality", DELICIOUS)?)));

    let engine = InferenceEngine::new(vec![service_level, food_quality], tip_percentage, rules).unwrap();

    assert_eq!(engine.predict_categorical(&inputs(0., 0.)).unwrap(), "NONE");
    assert!(engine.predict(&inputs(0., 0.)).unwrap() < 1.);
}

#[test]
fn test_concurrent_predictions() {
    let engine = engine_with(rules());
    let expected: Vec<f64> = (0..8)
        .map(|i| engine.predict(&inputs(i as f64 * 12., 100. - i as f64 * 12.)).unwrap())
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = &engine;

                scope.spawn(move || engine.predict(&inputs(i as f64 * 12., 100. - i as f64 * 12.)).unwrap())
            })
            .collect();

        for (handle, expected) in handles.into_iter().zip(expected) {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_defuzzification_methods_on_tipping_aggregate() {
    let with_method = |defuzzification| {
        engine_with(rules())
            .with_config(EngineConfig {
                defuzzification,
                ..EngineConfig::default()
            })
            .unwrap()
            .predict(&inputs(30., 80.))
            .unwrap()
    };

    // CHEAP clipped at 0.4, AVERAGE at 0.5, GENEROUS at 0.6
    let bisector = with_method(DefuzzificationOp::Bisector);
    let smallest = with_method(DefuzzificationOp::SmallestOfMaximum);
    let largest = with_method(DefuzzificationOp::LargestOfMaximum);
    let mean = with_method(DefuzzificationOp::MeanOfMaximum);

    assert!((bisector - 16.2).abs() < 0.01, "got {bisector}");
    assert!((smallest - 21.62).abs() < 0.01, "got {smallest}");
    assert!((largest - 26.40).abs() < 0.01, "got {largest}");
    assert!((mean - 24.01).abs() < 0.01, "got {mean}");
    assert!(with_method(DefuzzificationOp::Centroid) < bisector);
}

#[test]
fn test_output_spanning_full_float_range() {
    let x = FuzzyVariable::new("x", 0., 1.)
        .and_then(|v| v.with_triangular("HIGH", 0., 1., 1.))
        .unwrap();
    let y = FuzzyVariable::new("y", -f64::MAX, f64::MAX)
        .and_then(|v| v.with_triangular("MID", -1e306, 0., 1e306))
        .unwrap();
    let mut rules = Rules::new();

    rules.add_is("x", "HIGH", "MID");

    let engine = InferenceEngine::new(vec![x], y, rules).unwrap();
    let crisp = engine.predict(&Inputs::new().with("x", 1.)).unwrap();

    assert!(crisp.is_finite());
    assert!(crisp.abs() < 1e299, "got {crisp}");
}
