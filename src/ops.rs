use num::Float;

use crate::math::interp;

/// Elementwise connectives used by the fuzzy value algebra: AND is the
/// minimum t-norm, OR the maximum t-conorm.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Connective {
    Min,
    Max,
}

impl Connective {
    pub(crate) fn call<F: Float>(
        self,
        u: impl IntoIterator<Item = F>,
        v: impl IntoIterator<Item = F>,
    ) -> impl Iterator<Item = F> {
        u.into_iter().zip(v).map(move |(u, v)| match self {
            Self::Min => F::min(u, v),
            Self::Max => F::max(u, v),
        })
    }
}

/// Method for defuzzificating the aggregated output membership.
///
/// Every method expects `universe` and `membership` to have the same,
/// non-zero length and a membership that is not zero everywhere; the
/// engine rejects degenerate aggregates before calling in here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DefuzzificationOp {
    /// Discrete center of gravity, `Σ u·μ / Σ μ`
    #[default]
    Centroid,
    /// Bisector of area
    Bisector,
    /// Mean of the values for which the membership function is maximum
    MeanOfMaximum,
    /// Smallest value for which the membership function is maximum
    SmallestOfMaximum,
    /// Largest value for which the membership function is maximum
    LargestOfMaximum,
}

impl DefuzzificationOp {
    pub fn call<F: Float>(self, universe: &[F], membership: &[F]) -> F {
        let points = || universe.iter().copied().zip(membership.iter().copied());

        match self {
            Self::Centroid => {
                let (num, den) = points().fold((F::zero(), F::zero()), |(num, den), (u, m)| {
                    (num + u * m, den + m)
                });

                num / den
            },
            Self::Bisector => {
                if universe.len() < 2 {
                    return universe.first().copied().unwrap_or_else(F::zero);
                }

                let two = F::one() + F::one();
                let areas: Vec<F> = universe
                    .windows(2)
                    .zip(membership.windows(2))
                    .map(|(u, m)| (m[0] + m[1]) * (u[1] - u[0]) / two)
                    .collect();
                let target = areas.iter().copied().fold(F::zero(), |acc, a| acc + a) / two;
                let mut cum_area = F::zero();

                for (i, area) in areas.iter().copied().enumerate() {
                    if cum_area + area >= target {
                        let coords = [(cum_area, universe[i]), (cum_area + area, universe[i + 1])];

                        return interp(target, &coords);
                    }
                    cum_area = cum_area + area;
                }

                universe[universe.len() - 1]
            },
            Self::MeanOfMaximum => {
                let maximum = Self::maximum(membership);
                let (len, sum) = points()
                    .filter(|(_, m)| *m == maximum)
                    .fold((F::zero(), F::zero()), |(len, sum), (u, _)| (len + F::one(), sum + u));

                sum / len
            },
            Self::SmallestOfMaximum => {
                let maximum = Self::maximum(membership);
                points()
                    .filter(|(_, m)| *m == maximum)
                    .map(|(u, _)| u)
                    .fold(F::infinity(), F::min)
            },
            Self::LargestOfMaximum => {
                let maximum = Self::maximum(membership);
                points()
                    .filter(|(_, m)| *m == maximum)
                    .map(|(u, _)| u)
                    .fold(F::neg_infinity(), F::max)
            },
        }
    }

    fn maximum<F: Float>(membership: &[F]) -> F {
        membership.iter().copied().fold(F::zero(), F::max)
    }
}

#[test]
fn test_connectives() {
    let min: Vec<f64> = Connective::Min.call([0.2, 0.9], [0.5, 0.4]).collect();
    let max: Vec<f64> = Connective::Max.call([0.2, 0.9], [0.5, 0.4]).collect();

    assert_eq!(min, vec![0.2, 0.4]);
    assert_eq!(max, vec![0.5, 0.9]);
}

#[test]
fn test_defuzzification_on_symmetric_plateau() {
    let universe = [0., 1., 2., 3., 4.];
    let membership = [0., 0.5, 0.5, 0.5, 0.];

    assert_eq!(DefuzzificationOp::Centroid.call(&universe, &membership), 2.);
    assert_eq!(DefuzzificationOp::Bisector.call(&universe, &membership), 2.);
    assert_eq!(DefuzzificationOp::MeanOfMaximum.call(&universe, &membership), 2.);
    assert_eq!(DefuzzificationOp::SmallestOfMaximum.call(&universe, &membership), 1.);
    assert_eq!(DefuzzificationOp::LargestOfMaximum.call(&universe, &membership), 3.);
}

#[test]
fn test_centroid_is_weighted_mean() {
    let universe = [0., 10.];
    let membership = [1., 0.25];

    assert_eq!(DefuzzificationOp::Centroid.call(&universe, &membership), 2.);
}
