use thiserror::Error;

/// Errors raised while configuring variables or running inference.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FuzzyError {
    #[error("missing crisp values for input variables: {}", .variables.join(", "))]
    MissingInput { variables: Vec<String> },

    #[error("category '{category}' is not defined for variable '{variable}'")]
    UnknownCategory { variable: String, category: String },

    #[error("'{name}' is not an input variable")]
    UnknownVariable { name: String },

    #[error("variable '{variable}' has no fuzzy values, fuzzify it first")]
    UnfuzzifiedAccess { variable: String },

    #[error("variable '{variable}' has no membership functions")]
    NoMembershipFunctions { variable: String },

    #[error("membership function for '{category}' already defined on variable '{variable}'")]
    DuplicateCategory { variable: String, category: String },

    #[error("input variable '{name}' declared more than once")]
    DuplicateVariable { name: String },

    #[error("fuzzy values cover different universes ({left} vs {right} points)")]
    LengthMismatch { left: usize, right: usize },

    #[error("aggregated membership of '{variable}' is zero everywhere, cannot defuzzify")]
    DegenerateAggregate { variable: String },

    #[error("invalid range [{min}, {max}] for variable '{variable}'")]
    InvalidRange { variable: String, min: f64, max: f64 },

    #[error("invalid membership function: {0}")]
    InvalidMembershipFunction(String),

    #[error("universe resolution must be at least 2 points, got {0}")]
    InvalidResolution(usize),
}

pub type Result<T, E = FuzzyError> = std::result::Result<T, E>;

#[test]
fn test_missing_input_message() {
    let err = FuzzyError::MissingInput {
        variables: vec!["food_quality".into(), "ambience".into()],
    };

    assert_eq!(
        err.to_string(),
        "missing crisp values for input variables: food_quality, ambience"
    );
}
