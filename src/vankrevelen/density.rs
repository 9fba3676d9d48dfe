// @file density.rs
// @brief 2d gaussian kernel density estimator

use crate::vankrevelen::error::PlotError;
use crate::vankrevelen::ratio::{RatioRecord, extract_ratios};
use std::f64::consts::TAU;

/// Gaussian kernel density model fitted over a set of 2d points.
///
/// The bandwidth matrix follows Scott's rule: the unbiased sample covariance
/// scaled by `n^(-2/(d + 4))` with d = 2. Fitting fails when the covariance
/// is singular (fewer than two points, identical points, or all points on a
/// line) or when any coordinate is non-finite.
#[derive(Clone, Debug)]
pub struct GaussianKde {
    x: Vec<f64>,
    y: Vec<f64>,
    inv: (f64, f64, f64), // inverse bandwidth matrix (xx, xy, yy)
    norm: f64,
}

impl GaussianKde {
    pub fn fit(x: &[f64], y: &[f64]) -> Result<GaussianKde, PlotError> {
        assert_eq!(x.len(), y.len());

        let n = x.len();
        if n < 2 {
            return Err(PlotError::DensityEstimation(format!(
                "at least two points are required, got {n}"
            )));
        }
        let nf = n as f64;
        let mx = x.iter().sum::<f64>() / nf;
        let my = y.iter().sum::<f64>() / nf;

        let (mut cxx, mut cxy, mut cyy) = (0.0, 0.0, 0.0);
        for (&px, &py) in x.iter().zip(y.iter()) {
            let (dx, dy) = (px - mx, py - my);
            cxx += dx * dx;
            cxy += dx * dy;
            cyy += dy * dy;
        }
        cxx /= nf - 1.0;
        cxy /= nf - 1.0;
        cyy /= nf - 1.0;

        // scott's rule, squared
        let h = nf.powf(-1.0 / 3.0);
        let (hxx, hxy, hyy) = (cxx * h, cxy * h, cyy * h);
        let det = hxx * hyy - hxy * hxy;
        if !det.is_finite() || det <= 0.0 {
            return Err(PlotError::DensityEstimation(
                "degenerate covariance (identical, collinear, or non-finite points)".to_string(),
            ));
        }

        Ok(GaussianKde {
            x: x.to_vec(),
            y: y.to_vec(),
            inv: (hyy / det, -hxy / det, hxx / det),
            norm: 1.0 / (nf * TAU * det.sqrt()),
        })
    }

    /// Evaluate the fitted density at each of the given points.
    pub fn evaluate(&self, x: &[f64], y: &[f64]) -> Vec<f64> {
        assert_eq!(x.len(), y.len());

        let (ixx, ixy, iyy) = self.inv;
        x.iter()
            .zip(y.iter())
            .map(|(&px, &py)| {
                let mut acc = 0.0;
                for (&sx, &sy) in self.x.iter().zip(self.y.iter()) {
                    let (dx, dy) = (px - sx, py - sy);
                    let q = dx * dx * ixx + 2.0 * dx * dy * ixy + dy * dy * iyy;
                    acc += (-0.5 * q).exp();
                }
                acc * self.norm
            })
            .collect()
    }
}

/// Fit a kernel density model over the (O/C, H/C) coordinates of `ratios`
/// and evaluate it back at the same points, in input order.
pub fn kernel_density(ratios: &[RatioRecord]) -> Result<Vec<f64>, PlotError> {
    let (x, y) = extract_ratios(ratios)?;
    let kde = GaussianKde::fit(&x, &y)?;
    Ok(kde.evaluate(&x, &y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_with_center() -> Vec<RatioRecord> {
        vec![
            RatioRecord::new(0.0, 0.0),
            RatioRecord::new(1.0, 0.0),
            RatioRecord::new(0.0, 1.0),
            RatioRecord::new(1.0, 1.0),
            RatioRecord::new(0.5, 0.5),
        ]
    }

    #[test]
    fn densities_are_positive_and_ordered_by_crowding() {
        let d = kernel_density(&square_with_center()).unwrap();
        assert_eq!(d.len(), 5);
        assert!(d.iter().all(|&v| v > 0.0));
        // the center point sees all four corners up close
        assert!(d[4] > d[0]);
        // corners are equivalent by symmetry
        for w in d[..4].windows(2) {
            assert!((w[0] - w[1]).abs() < 1e-12);
        }
    }

    #[test]
    fn estimation_is_deterministic() {
        let ratios = square_with_center();
        assert_eq!(kernel_density(&ratios).unwrap(), kernel_density(&ratios).unwrap());
    }

    #[test]
    fn matches_reference_value_on_a_triangle() {
        // scipy.stats.gaussian_kde on [[0, 1, 0], [0, 0, 1]] evaluates to
        // ~0.2947 at the right-angle corner
        let kde = GaussianKde::fit(&[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0]).unwrap();
        let d = kde.evaluate(&[0.0], &[0.0]);
        assert!((d[0] - 0.2947).abs() < 5e-3, "got {}", d[0]);
    }

    #[test]
    fn single_point_fails() {
        let err = kernel_density(&[RatioRecord::new(0.1, 0.2)]).unwrap_err();
        assert!(matches!(err, PlotError::DensityEstimation(_)));
    }

    #[test]
    fn empty_list_fails() {
        assert!(matches!(kernel_density(&[]), Err(PlotError::DensityEstimation(_))));
    }

    #[test]
    fn collinear_points_fail() {
        let ratios = vec![
            RatioRecord::new(0.0, 0.0),
            RatioRecord::new(0.5, 0.5),
            RatioRecord::new(1.0, 1.0),
        ];
        assert!(matches!(kernel_density(&ratios), Err(PlotError::DensityEstimation(_))));
    }

    #[test]
    fn zero_variance_fails() {
        let ratios = vec![RatioRecord::new(0.4, 1.2); 4];
        assert!(matches!(kernel_density(&ratios), Err(PlotError::DensityEstimation(_))));
    }
}
