use num::Float;

/// Evenly spaced samples over a closed interval, like `numpy.linspace`.
pub struct Linspace<F> {
    start: F,
    end: F,
    // start and end pre-divided by the step count
    start_part: F,
    end_part: F,
    num_steps: usize,
    index: usize,
    len: usize,
}

impl<F: Float> Linspace<F> {
    pub fn new(min: F, max: F, n: usize) -> Self {
        let num_steps = n.saturating_sub(1).max(1);
        // n - 1 always fits a float mantissa for sane resolutions
        let divisor = F::from(num_steps).unwrap_or_else(F::one);

        Linspace {
            start: min,
            end: max,
            start_part: min / divisor,
            end_part: max / divisor,
            num_steps,
            index: 0,
            len: n,
        }
    }
}

impl<F: Float> Iterator for Linspace<F> {
    type Item = F;

    #[inline]
    fn next(&mut self) -> Option<F> {
        if self.index >= self.len {
            return None;
        }

        let i = self.index;
        self.index += 1;

        // Both ends are exact, the blend below can round past them
        if i == 0 {
            return Some(self.start);
        }
        if i + 1 == self.len {
            return Some(self.end);
        }

        // Weighting pre-divided ends stays finite even when max - min overflows
        let towards_start = F::from(self.num_steps - i).unwrap_or_else(F::zero);
        let towards_end = F::from(i).unwrap_or_else(F::zero);

        Some(self.start_part * towards_start + self.end_part * towards_end)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl<F: Float> ExactSizeIterator for Linspace<F> {}

#[test]
fn test_linspace() {
    let points: Vec<f64> = Linspace::new(0., 30., 7).collect();

    assert_eq!(points, vec![0., 5., 10., 15., 20., 25., 30.]);
    assert_eq!(Linspace::new(0., 30., 1000).len(), 1000);
    assert_eq!(Linspace::new(2., 3., 1).collect::<Vec<f64>>(), vec![2.]);
    assert_eq!(Linspace::<f64>::new(2., 3., 0).next(), None);
}

#[test]
fn test_linspace_over_full_float_range() {
    let points: Vec<f64> = Linspace::new(-f64::MAX, f64::MAX, 1000).collect();

    assert!(points.iter().all(|p| p.is_finite()));
    assert_eq!(points[0], -f64::MAX);
    assert_eq!(points[999], f64::MAX);
    assert!(points.windows(2).all(|w| w[0] < w[1]));
}
