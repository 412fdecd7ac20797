//! Newton–Cotes coefficients on the canonical domain [0, 1].
//!
//! A closed rule of degree `d` samples `d + 1` equally spaced points including
//! both ends. An open rule of degree `d` samples the `d - 1` interior points.
//! Coefficients are stated per unit step `h = 1 / d`.
//!
//! A closed rule of degree `d` is exact for polynomials up to `d`, or `d + 1`
//! when `d` is even. An open rule of degree `d` is exact up to `d - 1` when
//! `d` is even and `d - 2` when it is odd. Open degrees 4, 6 and 7 carry
//! negative weights.

pub(crate) const CLOSED_DEGREES: (usize, usize) = (1, 5);
pub(crate) const OPEN_DEGREES: (usize, usize) = (2, 7);

fn closed_coefficients(degree: usize) -> Option<Vec<f64>> {
    let c = match degree {
        1 => vec![0.5, 0.5],
        2 => vec![1.0 / 3.0, 4.0 / 3.0, 1.0 / 3.0],
        3 => vec![3.0 / 8.0, 9.0 / 8.0, 9.0 / 8.0, 3.0 / 8.0],
        4 => vec![14.0, 64.0, 24.0, 64.0, 14.0]
            .into_iter()
            .map(|c| c / 45.0)
            .collect(),
        5 => vec![95.0, 375.0, 250.0, 250.0, 375.0, 95.0]
            .into_iter()
            .map(|c| c / 288.0)
            .collect(),
        _ => return None,
    };
    Some(c)
}

fn open_coefficients(degree: usize) -> Option<Vec<f64>> {
    let c = match degree {
        2 => vec![2.0],
        3 => vec![1.5, 1.5],
        4 => vec![8.0 / 3.0, -4.0 / 3.0, 8.0 / 3.0],
        5 => vec![55.0, 5.0, 5.0, 55.0]
            .into_iter()
            .map(|c| c / 24.0)
            .collect(),
        6 => vec![11.0, -14.0, 26.0, -14.0, 11.0]
            .into_iter()
            .map(|c| c * 3.0 / 10.0)
            .collect(),
        7 => vec![611.0, -453.0, 562.0, 562.0, -453.0, 611.0]
            .into_iter()
            .map(|c| c * 7.0 / 1440.0)
            .collect(),
        _ => return None,
    };
    Some(c)
}

/// Nodes and weights of the closed rule on [0, 1].
pub(crate) fn closed(degree: usize) -> Option<(Vec<f64>, Vec<f64>)> {
    let coeffs = closed_coefficients(degree)?;
    let h = 1.0 / degree as f64;
    let nodes = (0..coeffs.len()).map(|i| i as f64 * h).collect();
    let weights = coeffs.iter().map(|c| c * h).collect();
    Some((nodes, weights))
}

/// Nodes and weights of the open rule on [0, 1].
pub(crate) fn open(degree: usize) -> Option<(Vec<f64>, Vec<f64>)> {
    let coeffs = open_coefficients(degree)?;
    let h = 1.0 / degree as f64;
    let nodes = (0..coeffs.len()).map(|i| (i + 1) as f64 * h).collect();
    let weights = coeffs.iter().map(|c| c * h).collect();
    Some((nodes, weights))
}
