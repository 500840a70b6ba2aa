//! Mamdani fuzzy inference.
//!
//! Crisp inputs are fuzzified through each [`FuzzyVariable`]'s membership
//! functions, [`Rules`] turn the fuzzified inputs into firing strengths for
//! output categories, and the [`InferenceEngine`] aggregates those strengths
//! per category with OR (max). From there it either clips and unions the
//! output categories over a sampled universe and defuzzifies the result
//! ([`InferenceEngine::predict`]), or picks the strongest category outright
//! ([`InferenceEngine::predict_categorical`]).
//!
//! ```
//! use fuzzy_mamdani::{FuzzyVariable, InferenceEngine, Inputs, Rules};
//!
//! # fn main() -> fuzzy_mamdani::Result<()> {
//! let service = FuzzyVariable::new("service", 0., 10.)?
//!     .with_triangular("POOR", 0., 0., 5.)?
//!     .with_triangular("GOOD", 5., 10., 10.)?;
//! let tip = FuzzyVariable::new("tip", 0., 30.)?
//!     .with_triangular("LOW", 0., 5., 10.)?
//!     .with_triangular("HIGH", 20., 25., 30.)?;
//!
//! let mut rules = Rules::new();
//! rules.add_is("service", "POOR", "LOW").add_is("service", "GOOD", "HIGH");
//!
//! let engine = InferenceEngine::new(vec![service], tip, rules)?;
//! let inputs = Inputs::new().with("service", 9.);
//!
//! assert_eq!(engine.predict_categorical(&inputs)?, "HIGH");
//! assert!((engine.predict(&inputs)? - 25.).abs() < 0.01);
//! # Ok(())
//! # }
//! ```

mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
mod ops;
mod rules;
mod value;
mod variable;

pub use error::{FuzzyError, Result};
pub use inference::{EngineConfig, InferenceEngine, DEFAULT_RESOLUTION};
pub use inputs::{FuzzifiedInputs, Inputs};
pub use membership::MembershipFunction;
pub use ops::DefuzzificationOp;
pub use rules::{Consequence, Rules};
pub use value::FuzzyValue;
pub use variable::FuzzyVariable;
