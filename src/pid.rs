use strum::{Display, EnumString};

use crate::event::Track;

/// Returned when no detector response is available
pub const N_SIGMA_UNDEFINED: f32 = -999.;

/// Particle species hypotheses for identification
#[derive(Display, EnumString, Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Species {
    Pion,
    Proton,
}

/// Detector response for particle identification
pub trait PidResponse {
    /// Deviation of the measured TPC signal from the expectation for
    /// `species`, in units of the expected resolution
    fn n_sigma_tpc(&self, track: &Track, species: Species) -> f32;
}

impl<P: PidResponse + ?Sized> PidResponse for &P {
    fn n_sigma_tpc(&self, track: &Track, species: Species) -> f32 {
        (**self).n_sigma_tpc(track, species)
    }
}

/// Use the response stored with each track
#[derive(Copy, Clone, Debug, Default)]
pub struct StoredPid {}

impl PidResponse for StoredPid {
    fn n_sigma_tpc(&self, track: &Track, species: Species) -> f32 {
        match (track.n_sigma_tpc, species) {
            (Some(n), Species::Pion) => n.pion,
            (Some(n), Species::Proton) => n.proton,
            (None, _) => N_SIGMA_UNDEFINED,
        }
    }
}

/// No identification available
#[derive(Copy, Clone, Debug, Default)]
pub struct NoPid {}

impl PidResponse for NoPid {
    fn n_sigma_tpc(&self, _track: &Track, _species: Species) -> f32 {
        N_SIGMA_UNDEFINED
    }
}
