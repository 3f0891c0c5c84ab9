// 3x3 helpers for Cramer's rule
//
// glam::DMat3 already provides determinant(); this adds column replacement
// and a solver that reports singular systems as None.

use glam::{DMat3, DVec3};

/// Extension trait for DMat3 used by linear solves.
pub trait Mat3Ext {
    /// Copy of the matrix with column `index` (0, 1 or 2) replaced by `col`.
    fn with_col(&self, index: usize, col: DVec3) -> DMat3;
}

impl Mat3Ext for DMat3 {
    fn with_col(&self, index: usize, col: DVec3) -> DMat3 {
        let mut m = *self;
        match index {
            0 => m.x_axis = col,
            1 => m.y_axis = col,
            _ => m.z_axis = col,
        }
        m
    }
}

/// Solve `m * x = rhs` with Cramer's rule.
///
/// Returns `None` when the determinant is exactly zero (no unique solution).
pub fn solve_cramer(m: &DMat3, rhs: DVec3) -> Option<DVec3> {
    let det = m.determinant();
    if det == 0.0 {
        return None;
    }

    Some(DVec3::new(
        m.with_col(0, rhs).determinant() / det,
        m.with_col(1, rhs).determinant() / det,
        m.with_col(2, rhs).determinant() / det,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_col() {
        let m = DMat3::IDENTITY.with_col(1, DVec3::new(4.0, 5.0, 6.0));
        assert_eq!(m.y_axis, DVec3::new(4.0, 5.0, 6.0));
        assert_eq!(m.x_axis, DVec3::X);
        assert_eq!(m.z_axis, DVec3::Z);
    }

    #[test]
    fn test_solve_cramer() {
        // 2x + y = 5, x + 3y = 10, z = 2
        let m = DMat3::from_cols(
            DVec3::new(2.0, 1.0, 0.0),
            DVec3::new(1.0, 3.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
        );
        let x = solve_cramer(&m, DVec3::new(5.0, 10.0, 2.0)).unwrap();

        assert!((x - DVec3::new(1.0, 3.0, 2.0)).length() < 1e-12);
    }

    #[test]
    fn test_solve_cramer_singular() {
        let m = DMat3::from_cols(DVec3::X, DVec3::X, DVec3::Z);
        assert!(solve_cramer(&m, DVec3::ONE).is_none());
    }
}
