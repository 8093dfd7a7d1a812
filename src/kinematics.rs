//! Kinematic observables of V0 candidates and their daughters
//!
//! Positions are in cm, momenta in GeV, the magnetic field in kG.

use crate::four_vector::FourVector;

/// Returned by [rapidity] if the rapidity is not defined
pub const RAPIDITY_UNDEFINED: f64 = -100.;
/// Returned by [cos_pointing_angle] for degenerate geometries
pub const COS_POINTING_UNDEFINED: f64 = -2.;
/// Returned by [dist_over_total_momentum] for vanishing momenta
pub const DIST_OVER_MOM_UNDEFINED: f64 = 1e5;

const RAPIDITY_EPS: f64 = 1e-13;
const MOMENTUM_EPS: f64 = 1e-10;
const MIN_CURVATURE: f64 = 1e-12;
/// Conversion from GeV and kG to inverse cm
const B2C: f64 = 0.299792458e-3;

pub mod mass {
    pub const PION: f64 = 0.13957039;
    pub const PROTON: f64 = 0.93827208816;
    pub const K0_SHORT: f64 = 0.497611;
    pub const LAMBDA: f64 = 1.115683;
}

pub type Vec3 = [f64; 3];

pub(crate) fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub(crate) fn norm(a: &Vec3) -> f64 {
    dot(a, a).sqrt()
}

pub(crate) fn sub(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub(crate) fn add(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Euclidean distance between two points
pub fn distance(a: &Vec3, b: &Vec3) -> f64 {
    norm(&sub(a, b))
}

/// Transverse momentum
pub fn pt(p: &Vec3) -> f64 {
    p[0].hypot(p[1])
}

/// Rapidity `0.5 ln((E + pz)/(E - pz + ε))` with ε = 1e-13
///
/// Gives [RAPIDITY_UNDEFINED] instead of NaN or infinity whenever
/// the logarithm is ill-defined, which includes particles moving
/// exactly along the beam axis.
pub fn rapidity(e: f64, pz: f64) -> f64 {
    let num = e + pz;
    let den = e - pz;
    if num == 0. || den == 0. || den + RAPIDITY_EPS == 0. {
        return RAPIDITY_UNDEFINED;
    }
    let ratio = num / (den + RAPIDITY_EPS);
    if ratio > 0. && ratio.is_finite() {
        0.5 * ratio.ln()
    } else {
        RAPIDITY_UNDEFINED
    }
}

/// Pseudorapidity of a momentum
pub fn pseudorapidity(p: &Vec3) -> f64 {
    (p[2] / pt(p)).asinh()
}

/// Invariant mass of two daughters under the given mass hypotheses
pub fn invariant_mass(p1: &Vec3, m1: f64, p2: &Vec3, m2: f64) -> f64 {
    let sum = FourVector::on_shell(*p1, m1) + FourVector::on_shell(*p2, m2);
    sum.m().raw()
}

/// Armenteros-Podolanski variables `(alpha, qT)`
///
/// `alpha` is the longitudinal momentum asymmetry of the positive and
/// negative daughter with respect to the V0 direction, `qT` the
/// momentum of the positive daughter transverse to it.
pub fn armenteros(p_pos: &Vec3, p_neg: &Vec3) -> (f64, f64) {
    let v0 = add(p_pos, p_neg);
    let p_v0 = norm(&v0);
    if p_v0 == 0. {
        return (0., norm(p_pos));
    }
    let pl_pos = dot(p_pos, &v0) / p_v0;
    let pl_neg = dot(p_neg, &v0) / p_v0;
    let alpha = if pl_pos + pl_neg != 0. {
        (pl_pos - pl_neg) / (pl_pos + pl_neg)
    } else {
        0.
    };
    let qt = norm(&cross(p_pos, &v0)) / p_v0;
    (alpha, qt)
}

/// Cosine of the angle between the V0 momentum and the line from
/// the primary to the decay vertex
pub fn cos_pointing_angle(decay: &Vec3, primary: &Vec3, p: &Vec3) -> f64 {
    let flight = sub(decay, primary);
    let denom = norm(&flight) * norm(p);
    if denom == 0. {
        return COS_POINTING_UNDEFINED;
    }
    dot(&flight, p) / denom
}

/// Distance of `point` from the straight line through `decay` along `p`
pub fn line_dca(decay: &Vec3, p: &Vec3, point: &Vec3) -> f64 {
    let d = sub(point, decay);
    let p_norm = norm(p);
    if p_norm == 0. {
        return norm(&d);
    }
    norm(&cross(&d, p)) / p_norm
}

/// Transverse radius of a point
pub fn radius(x: &Vec3) -> f64 {
    x[0].hypot(x[1])
}

/// Transverse distance of closest approach of a charged track to a point
///
/// The track is given by its charge, a reference point and its momentum
/// at that point. It is propagated as a helix in the solenoidal field
/// `b` along the beam axis.
pub fn impact_parameter_xy(
    charge: i32,
    reference: &Vec3,
    p: &Vec3,
    b: f64,
    point: &Vec3,
) -> f64 {
    let pt = pt(p);
    let dx = point[0] - reference[0];
    let dy = point[1] - reference[1];
    if pt == 0. {
        return dx.hypot(dy);
    }
    let (ux, uy) = (p[0] / pt, p[1] / pt);
    // signed curvature, positive for counter-clockwise motion
    let c = -f64::from(charge) * b * B2C / pt;
    if c.abs() < MIN_CURVATURE {
        return (ux * dy - uy * dx).abs();
    }
    let r = 1. / c;
    let (cx, cy) = (-uy * r, ux * r);
    ((dx - cx).hypot(dy - cy) - r.abs()).abs()
}

/// Decay length from the primary vertex per unit of total momentum
pub fn dist_over_total_momentum(decay: &Vec3, primary: &Vec3, p: &Vec3) -> f64 {
    let den = norm(p) + MOMENTUM_EPS;
    if den == 0. {
        return DIST_OVER_MOM_UNDEFINED;
    }
    distance(decay, primary) / den
}
