use std::fmt;

use crate::error::Result;
use crate::inputs::FuzzifiedInputs;
use crate::value::FuzzyValue;

/// What a rule concludes: an output category and how strongly it fires.
pub type Consequence = (String, FuzzyValue);

type RuleFn = dyn Fn(&FuzzifiedInputs) -> Result<Consequence> + Send + Sync;

/// Ordered IF-THEN rules.
///
/// A rule reads the fuzzified inputs and names the output category it
/// supports together with its firing strength. Lookup failures inside a rule
/// propagate with `?`.
#[derive(Default)]
pub struct Rules(pub(crate) Vec<Box<RuleFn>>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    pub fn add<F>(&mut self, rule: F) -> &mut Self
    where
        F: Fn(&FuzzifiedInputs) -> Result<Consequence> + Send + Sync + 'static,
    {
        self.0.push(Box::new(rule));
        self
    }

    /// Rule firing `category` with the degree of `variable` being `term`.
    pub fn add_is(&mut self, variable: &str, term: &str, category: &str) -> &mut Self {
        let (variable, term, category) = (variable.to_owned(), term.to_owned(), category.to_owned());

        self.add(move |inputs| Ok((category.clone(), inputs.is_(&variable, &term)?.clone())))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rules({})", self.0.len())
    }
}

impl<F> FromIterator<F> for Rules
where
    F: Fn(&FuzzifiedInputs) -> Result<Consequence> + Send + Sync + 'static,
{
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Rules(iter.into_iter().map(|rule| Box::new(rule) as Box<RuleFn>).collect())
    }
}
