use std::fmt;
use std::sync::Arc;

use crate::error::{FuzzyError, Result};
use crate::math::interp;
use crate::value::FuzzyValue;

/// Maps a crisp value to a membership degree in `[0, 1]`.
///
/// Cloning is cheap: the shape is shared, which is what lets a fuzzified
/// view of a variable reuse the definition's functions without copying them.
#[derive(Clone)]
pub struct MembershipFunction(Arc<dyn Fn(f64) -> f64 + Send + Sync>);

impl MembershipFunction {
    /// Wraps an arbitrary shape. Degrees it yields are clamped into `[0, 1]`.
    pub fn new(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Triangle rising from `a` to a peak at `b` and falling back to zero at `c`.
    ///
    /// `a == b` or `b == c` make that edge a vertical step: the sloped branch
    /// is skipped, so the triangle starts (or ends) at the peak.
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self> {
        if ![a, b, c].iter().all(|p| p.is_finite()) || a > b || b > c {
            return Err(FuzzyError::InvalidMembershipFunction(format!(
                "triangular parameters must satisfy a <= b <= c, got ({a}, {b}, {c})"
            )));
        }

        Ok(Self::new(move |x| {
            let mut degree = 0.;

            if a != b && a <= x && x <= b {
                degree = (x - a) / (b - a);
            }
            if b != c && b <= x && x <= c {
                degree = (c - x) / (c - b);
            }

            degree
        }))
    }

    /// Shape given by `(x, degree)` knots, linearly interpolated between them
    /// and held constant past either end.
    pub fn piecewise_linear(points: impl IntoIterator<Item = (f64, f64)>) -> Result<Self> {
        let points: Vec<(f64, f64)> = points.into_iter().collect();

        if points.is_empty() {
            return Err(FuzzyError::InvalidMembershipFunction(
                "piecewise linear shape needs at least one point".into(),
            ));
        }
        if points.iter().any(|(x, d)| !x.is_finite() || !(0. ..=1.).contains(d)) {
            return Err(FuzzyError::InvalidMembershipFunction(
                "piecewise linear points need finite x and degrees in [0, 1]".into(),
            ));
        }
        if points.windows(2).any(|w| w[0].0 > w[1].0) {
            return Err(FuzzyError::InvalidMembershipFunction(
                "piecewise linear points must be sorted by x".into(),
            ));
        }

        Ok(Self::new(move |x| interp(x, &points)))
    }

    pub fn degree(&self, x: f64) -> f64 {
        let degree = (self.0)(x);

        if degree.is_nan() {
            0.
        } else {
            degree.clamp(0., 1.)
        }
    }

    /// Evaluates every sample point, one degree per point.
    pub fn evaluate(&self, xs: &[f64]) -> FuzzyValue {
        FuzzyValue::new(xs.iter().map(|x| self.degree(*x)))
    }
}

impl fmt::Debug for MembershipFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MembershipFunction(..)")
    }
}

#[test]
fn test_triangular_membership() {
    let mf = MembershipFunction::triangular(10., 50., 90.).unwrap();

    assert_eq!(mf.degree(10.), 0.);
    assert_eq!(mf.degree(50.), 1.);
    assert_eq!(mf.degree(90.), 0.);
    assert_eq!(mf.degree(30.), 0.5);
    assert_eq!(mf.degree(70.), 0.5);
    assert_eq!(mf.degree(-5.), 0.);
    assert_eq!(mf.degree(120.), 0.);
    assert_eq!(mf.evaluate(&[0., 30., 50.]).degree(), &[0., 0.5, 1.]);
}

#[test]
fn test_degenerate_triangles() {
    let left_step = MembershipFunction::triangular(0., 0., 50.).unwrap();
    let right_step = MembershipFunction::triangular(75., 100., 100.).unwrap();
    let spike = MembershipFunction::triangular(5., 5., 5.).unwrap();

    assert_eq!(left_step.degree(0.), 1.);
    assert_eq!(left_step.degree(30.), 0.4);
    assert_eq!(right_step.degree(100.), 1.);
    assert_eq!(right_step.degree(87.5), 0.5);
    assert_eq!(spike.degree(5.), 0.);
}

#[test]
fn test_invalid_triangles() {
    assert!(matches!(
        MembershipFunction::triangular(5., 1., 10.),
        Err(FuzzyError::InvalidMembershipFunction(_))
    ));
    assert!(MembershipFunction::triangular(0., f64::NAN, 1.).is_err());
}

#[test]
fn test_piecewise_linear_membership() {
    let high = MembershipFunction::piecewise_linear([(175., 0.), (180., 0.2), (185., 0.7), (190., 1.)]).unwrap();

    assert_eq!(high.degree(150.), 0.);
    assert_eq!(high.degree(190.), 1.);
    assert_eq!(high.degree(200.), 1.);
    assert!((high.degree(182.5) - 0.45).abs() < 1e-12);

    assert!(MembershipFunction::piecewise_linear(Vec::new()).is_err());
    assert!(MembershipFunction::piecewise_linear([(1., 0.), (0., 1.)]).is_err());
    assert!(MembershipFunction::piecewise_linear([(0., 1.5)]).is_err());
}

#[test]
fn test_custom_shapes_are_clamped() {
    let wild = MembershipFunction::new(|x| x * 2.);

    assert_eq!(wild.evaluate(&[-1., 0.25, 3.]).degree(), &[0., 0.5, 1.]);
}
