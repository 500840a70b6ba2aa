use num::Float;

/// Similar to numpy.interp, evaluated at a single point.
///
/// `coords` must be sorted by x and non-empty; values beyond either end are
/// held constant.
pub(crate) fn interp<F: Float>(x: F, coords: &[(F, F)]) -> F {
    let Some(&(first_x, first_y)) = coords.first() else {
        return F::zero();
    };

    if x <= first_x {
        return first_y;
    }

    for window in coords.windows(2) {
        let (x1, y1) = window[0];
        let (x2, y2) = window[1];

        if x1 <= x && x <= x2 {
            if x2 == x1 {
                return y2;
            }

            return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
        }
    }

    // Past the last knot
    coords[coords.len() - 1].1
}

#[test]
fn test_interp() {
    let xs = [1., 2., 3.];
    let ys = [3., 2., 0.];
    let coords: Vec<(f64, f64)> = xs.into_iter().zip(ys).collect();
    let out: Vec<f64> = [0., 1., 1.5, 2.72, 3.24]
        .into_iter()
        .map(|x| interp(x, &coords))
        .collect();

    assert_eq!(out, vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let xs = [0., 1., 2., 3., 4.5];
    let ys = [0., 2., 5., 3., 2.];
    let coords: Vec<(f64, f64)> = xs.into_iter().zip(ys).collect();
    let out: Vec<f64> = [2.5, -1., 7.5].into_iter().map(|x| interp(x, &coords)).collect();

    assert_eq!(out, vec![4., 0., 2.]);
    assert_eq!(interp(1., &[] as &[(f64, f64)]), 0.);
}
