//! Transverse-momentum dependent invariant-mass windows
//!
//! The bounds are roughly twenty times the peak width on either side of
//! the nominal mass, taken from a calibration fit. Both the Λ and the Λ̄
//! hypothesis use the Λ window.

/// Open mass interval `(lower, upper)`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MassWindow {
    pub lower: f64,
    pub upper: f64,
}

impl MassWindow {
    /// Window for the K0S → π⁺π⁻ hypothesis
    pub fn k0_short(pt: f64) -> Self {
        Self {
            lower: 0.430006 - 0.0110029 * pt,
            upper: 0.563707 + 0.0114979 * pt,
        }
    }

    /// Window for the Λ → pπ⁻ and Λ̄ → p̄π⁺ hypotheses
    pub fn lambda(pt: f64) -> Self {
        Self {
            lower: 1.09501 - 5.23272e-3 * pt - 7.52690e-2 * (-3.46339 * pt).exp(),
            upper: 1.13688 + 5.27838e-3 * pt + 8.42220e-2 * (-3.80595 * pt).exp(),
        }
    }

    /// Strict containment, the bounds themselves are outside
    pub fn contains(&self, mass: f64) -> bool {
        self.lower < mass && mass < self.upper
    }
}

/// Invariant masses under the three decay hypotheses
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MassHypotheses {
    pub k0_short: f64,
    pub lambda: f64,
    pub anti_lambda: f64,
}

impl MassHypotheses {
    /// Whether any of the masses is inside its window at transverse
    /// momentum `pt`
    pub fn any_in_window(&self, pt: f64) -> bool {
        let lambda = MassWindow::lambda(pt);
        MassWindow::k0_short(pt).contains(self.k0_short)
            || lambda.contains(self.lambda)
            || lambda.contains(self.anti_lambda)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::mass;

    #[test]
    fn nominal_masses_inside() {
        for pt in [0., 0.1, 1., 5., 20.] {
            assert!(MassWindow::k0_short(pt).contains(mass::K0_SHORT));
            assert!(MassWindow::lambda(pt).contains(mass::LAMBDA));
        }
    }

    #[test]
    fn window_at_one_gev() {
        let w = MassWindow::k0_short(1.);
        assert!((w.lower - 0.4190031).abs() < 1e-9);
        assert!((w.upper - 0.5752049).abs() < 1e-9);
        let w = MassWindow::lambda(1.);
        assert!(w.lower > 1.087 && w.lower < 1.088);
        assert!(w.upper > 1.143 && w.upper < 1.145);
    }

    #[test]
    fn bounds_are_exclusive() {
        let w = MassWindow::k0_short(0.);
        assert!(!w.contains(w.lower));
        assert!(!w.contains(w.upper));
    }

    #[test]
    fn any_hypothesis() {
        let pt = 1.;
        let none = MassHypotheses {
            k0_short: 0.3,
            lambda: 1.3,
            anti_lambda: 1.3,
        };
        assert!(!none.any_in_window(pt));
        assert!(MassHypotheses { anti_lambda: mass::LAMBDA, ..none }.any_in_window(pt));
        assert!(MassHypotheses { k0_short: mass::K0_SHORT, ..none }.any_in_window(pt));
    }
}
