use noisy_float::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A basic four-vector
///
/// The zero component is the energy/time component. The remainder are
/// the spatial components. (De)serialised as `[e, px, py, pz]`.
#[derive(
    Deserialize,
    Serialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    Clone,
    Copy,
    Default,
)]
#[serde(try_from = "[f64; 4]", into = "[f64; 4]")]
pub struct FourVector {
    pt: N64,
    p: [N64; 4],
}

impl FourVector {
    /// On-shell four-vector for the three-momentum `p` and the given mass
    ///
    /// Panics if any component is NaN.
    pub fn on_shell(p: [f64; 3], mass: f64) -> Self {
        let e = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2] + mass * mass).sqrt();
        [n64(e), n64(p[0]), n64(p[1]), n64(p[2])].into()
    }

    /// The spatial norm \sqrt{\sum v_i^2} with i = 1,2,3
    pub fn spatial_norm(&self) -> N64 {
        self.spatial_norm_sq().sqrt()
    }

    /// The square \sum v_i^2 with i = 1,2,3 of the spatial norm
    pub fn spatial_norm_sq(&self) -> N64 {
        self.p.iter().skip(1).map(|e| *e * *e).sum()
    }

    /// The scalar transverse momentum
    pub fn pt(&self) -> N64 {
        self.pt
    }

    pub fn e(&self) -> N64 {
        self.p[0]
    }

    const fn len() -> usize {
        4
    }

    fn update_pt(&mut self) {
        self.pt = (self.p[1] * self.p[1] + self.p[2] * self.p[2]).sqrt();
    }

    /// The invariant mass \sqrt{v_0^2 - \sum v_i^2} with i = 1,2,3
    ///
    /// Slightly negative squares from rounding give zero.
    pub fn m(&self) -> N64 {
        let m_sq = self.m_sq();
        if m_sq > 0. {
            m_sq.sqrt()
        } else {
            n64(0.)
        }
    }

    /// The invariant mass square v_0^2 - \sum v_i^2 with i = 1,2,3
    pub fn m_sq(&self) -> N64 {
        self.p[0] * self.p[0] - self.spatial_norm_sq()
    }

    /// Rapidity along the beam axis, see [crate::kinematics::rapidity]
    pub fn rapidity(&self) -> f64 {
        crate::kinematics::rapidity(self.p[0].raw(), self.p[3].raw())
    }
}

impl From<[N64; 4]> for FourVector {
    fn from(p: [N64; 4]) -> FourVector {
        let mut res = FourVector {
            p,
            pt: Default::default(),
        };
        res.update_pt();
        res
    }
}

impl TryFrom<[f64; 4]> for FourVector {
    type Error = NanComponent;

    fn try_from(p: [f64; 4]) -> Result<FourVector, Self::Error> {
        if let Some(idx) = p.iter().position(|c| c.is_nan()) {
            return Err(NanComponent(idx));
        }
        Ok([n64(p[0]), n64(p[1]), n64(p[2]), n64(p[3])].into())
    }
}

/// A four-vector component is NaN
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
#[error("Four-vector component {0} is NaN")]
pub struct NanComponent(pub usize);

impl From<FourVector> for [f64; 4] {
    fn from(p: FourVector) -> [f64; 4] {
        [p[0].raw(), p[1].raw(), p[2].raw(), p[3].raw()]
    }
}

impl std::ops::Index<usize> for FourVector {
    type Output = N64;

    fn index(&self, i: usize) -> &Self::Output {
        &self.p[i]
    }
}

impl std::ops::AddAssign for FourVector {
    fn add_assign(&mut self, rhs: FourVector) {
        for i in 0..Self::len() {
            self.p[i] += rhs[i]
        }
        self.update_pt();
    }
}

impl std::ops::SubAssign for FourVector {
    fn sub_assign(&mut self, rhs: FourVector) {
        for i in 0..Self::len() {
            self.p[i] -= rhs[i]
        }
        self.update_pt();
    }
}

impl std::ops::Add for FourVector {
    type Output = Self;

    fn add(mut self, rhs: FourVector) -> Self::Output {
        self += rhs;
        self
    }
}

impl std::ops::Sub for FourVector {
    type Output = Self;

    fn sub(mut self, rhs: FourVector) -> Self::Output {
        self -= rhs;
        self
    }
}
