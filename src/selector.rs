use log::{trace, warn};
use strum::Display;

use crate::association::{associate, McMatch};
use crate::config::CandidateCuts;
use crate::event::{Event, Track, V0};
use crate::event_selection::SelectedEvent;
use crate::kinematics::{self, mass};
use crate::mass_window::MassHypotheses;
use crate::pid::{PidResponse, Species};
use crate::record::CandidateRecord;

/// Why a V0 candidate was not kept
#[derive(Display, Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum CandidateRejection {
    PtWindow,
    MissingTrack,
    SameSign,
    NoTpcRefit,
    CrossedRows,
    Kink,
    NoFindableClusters,
    OnFly,
    MassWindow,
    DaughterEta,
}

/// Selection of V0 candidates in events passing the event selection
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CandidateSelector<P> {
    cuts: CandidateCuts,
    pid: P,
}

impl<P: PidResponse> CandidateSelector<P> {
    pub fn new(cuts: CandidateCuts, pid: P) -> Self {
        Self { cuts, pid }
    }

    pub fn cuts(&self) -> &CandidateCuts {
        &self.cuts
    }

    /// Apply all candidate cuts and compute the output record
    pub fn select(
        &self,
        event: &Event,
        selected: &SelectedEvent,
        v0: &V0,
    ) -> Result<CandidateRecord, CandidateRejection> {
        use CandidateRejection::*;

        let cuts = &self.cuts;
        let pt = v0.pt();
        if pt < cuts.min_pt || cuts.max_pt < pt {
            return Err(PtWindow);
        }

        let (Some(pos), Some(neg)) =
            (event.track(v0.pos_index), event.track(v0.neg_index))
        else {
            warn!(
                "Event {}: failed to retrieve daughter tracks {} and {}",
                event.id, v0.pos_index, v0.neg_index
            );
            return Err(MissingTrack);
        };
        if pos.charge == neg.charge {
            return Err(SameSign);
        }
        self.check_track_quality(pos)?;
        self.check_track_quality(neg)?;

        let least_crossed_rows = pos.tpc_crossed_rows.min(neg.tpc_crossed_rows) as i32;
        let least_crossed_rows_over_findable =
            crossed_rows_over_findable(pos).min(crossed_rows_over_findable(neg));

        let pv = &selected.primary_vertex;
        let b = selected.magnetic_field;
        let p_v0 = v0.momentum();
        let masses = MassHypotheses {
            k0_short: kinematics::invariant_mass(
                &v0.pos_momentum,
                mass::PION,
                &v0.neg_momentum,
                mass::PION,
            ),
            lambda: kinematics::invariant_mass(
                &v0.pos_momentum,
                mass::PROTON,
                &v0.neg_momentum,
                mass::PION,
            ),
            anti_lambda: kinematics::invariant_mass(
                &v0.pos_momentum,
                mass::PION,
                &v0.neg_momentum,
                mass::PROTON,
            ),
        };
        let (alpha, qt) = kinematics::armenteros(&v0.pos_momentum, &v0.neg_momentum);
        let p_v0_norm = kinematics::norm(&p_v0);
        let e_k0 = p_v0_norm.hypot(mass::K0_SHORT);
        let e_lambda = p_v0_norm.hypot(mass::LAMBDA);

        let mc = match &event.mc {
            Some(mc) => associate(mc, pos, neg),
            None => McMatch::default(),
        };

        let record = CandidateRecord {
            event_id: event.id,
            centrality: selected.centrality,
            vertex_z: pv[2],
            on_fly: v0.on_fly,
            pt,
            rapidity_k0_short: kinematics::rapidity(e_k0, p_v0[2]),
            rapidity_lambda: kinematics::rapidity(e_lambda, p_v0[2]),
            mass_k0_short: masses.k0_short,
            mass_lambda: masses.lambda,
            mass_anti_lambda: masses.anti_lambda,
            alpha,
            qt,
            least_crossed_rows,
            least_crossed_rows_over_findable,
            chi2: v0.chi2,
            dca_daughters: v0.dca_daughters,
            dca_pos_to_pv: pos.dca_xy(pv, b),
            dca_neg_to_pv: neg.dca_xy(pv, b),
            dca_v0_to_pv: kinematics::line_dca(&v0.decay_vertex, &p_v0, pv),
            cos_pointing_angle: kinematics::cos_pointing_angle(&v0.decay_vertex, pv, &p_v0),
            decay_radius: kinematics::radius(&v0.decay_vertex),
            dist_over_total_momentum: kinematics::dist_over_total_momentum(
                &v0.decay_vertex,
                pv,
                &p_v0,
            ),
            eta_pos: pos.eta(),
            eta_neg: neg.eta(),
            pt_pos: pos.pt(),
            pt_neg: neg.pt(),
            n_sigma_pos_proton: self.pid.n_sigma_tpc(pos, Species::Proton),
            n_sigma_pos_pion: self.pid.n_sigma_tpc(pos, Species::Pion),
            n_sigma_neg_proton: self.pid.n_sigma_tpc(neg, Species::Proton),
            n_sigma_neg_pion: self.pid.n_sigma_tpc(neg, Species::Pion),
            mc,
        };

        if cuts.reject_on_fly && v0.on_fly {
            return Err(OnFly);
        }
        if !masses.any_in_window(pt) {
            trace!("Masses {masses:?} outside of windows at pt = {pt}");
            return Err(MassWindow);
        }
        // NaN pseudorapidities must fail
        if !(record.eta_pos.abs() < cuts.max_daughter_eta
            && record.eta_neg.abs() < cuts.max_daughter_eta)
        {
            return Err(DaughterEta);
        }
        Ok(record)
    }

    fn check_track_quality(&self, track: &Track) -> Result<(), CandidateRejection> {
        use CandidateRejection::*;
        if !track.has_tpc_refit() {
            return Err(NoTpcRefit);
        }
        if track.tpc_crossed_rows < self.cuts.min_crossed_rows {
            return Err(CrossedRows);
        }
        if track.kink_index > 0 {
            return Err(Kink);
        }
        if track.tpc_findable_clusters <= 0 {
            return Err(NoFindableClusters);
        }
        Ok(())
    }
}

fn crossed_rows_over_findable(track: &Track) -> f32 {
    if track.tpc_findable_clusters != 0 {
        track.tpc_crossed_rows / track.tpc_findable_clusters as f32
    } else {
        -1.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventBuilder;
    use crate::mass_window::MassWindow;
    use crate::pid::StoredPid;

    const B: f64 = 5.;

    fn daughter(charge: i32, momentum: [f64; 3]) -> Track {
        Track {
            charge,
            position: [2., 0., 0.],
            momentum,
            tpc_crossed_rows: 80.,
            tpc_findable_clusters: 100,
            status: Track::TPC_REFIT,
            ..Default::default()
        }
    }

    /// Λ with pt = 1 GeV along x decaying perpendicular in its rest frame
    fn lambda_event(pos_rows: f32, neg_rows: f32) -> (Event, V0) {
        let m = mass::LAMBDA;
        let (mp, mpi) = (mass::PROTON, mass::PION);
        let p_star = ((m * m - (mp + mpi).powi(2)) * (m * m - (mp - mpi).powi(2))).sqrt()
            / (2. * m);
        let beta_gamma = 1. / m;
        let e_p = p_star.hypot(mp);
        let e_pi = p_star.hypot(mpi);
        let p_pos = [beta_gamma * e_p, p_star, 0.];
        let p_neg = [beta_gamma * e_pi, -p_star, 0.];

        let mut builder = EventBuilder::new(1);
        let mut pos = daughter(1, p_pos);
        pos.tpc_crossed_rows = pos_rows;
        let mut neg = daughter(-1, p_neg);
        neg.tpc_crossed_rows = neg_rows;
        let pos_index = builder.add_track(pos);
        let neg_index = builder.add_track(neg);
        let v0 = V0 {
            pos_index,
            neg_index,
            on_fly: false,
            chi2: 0.5,
            dca_daughters: 0.1,
            decay_vertex: [2., 0., 0.],
            pos_momentum: p_pos,
            neg_momentum: p_neg,
        };
        builder.add_v0(v0.clone());
        (builder.build(), v0)
    }

    fn selected() -> SelectedEvent {
        SelectedEvent {
            primary_vertex: [0., 0., 0.],
            magnetic_field: B,
            centrality: 42.,
        }
    }

    fn selector() -> CandidateSelector<StoredPid> {
        CandidateSelector::new(CandidateCuts::default(), StoredPid {})
    }

    #[test]
    fn accepted_lambda() {
        let (event, v0) = lambda_event(80., 80.);
        let record = selector().select(&event, &selected(), &v0).unwrap();
        assert!((record.pt - 1.).abs() < 1e-12);
        assert!((record.mass_lambda - mass::LAMBDA).abs() < 1e-9);
        assert!(MassWindow::lambda(record.pt).contains(record.mass_lambda));
        assert_eq!(record.centrality, 42.);
        assert_eq!(record.least_crossed_rows, 80);
        assert!((record.least_crossed_rows_over_findable - 0.8).abs() < 1e-6);
        assert!((record.cos_pointing_angle - 1.).abs() < 1e-12);
        assert!(record.dca_v0_to_pv.abs() < 1e-12);
        assert!((record.decay_radius - 2.).abs() < 1e-12);
        assert!(record.alpha > 0.);
        assert!(record.mass_k0_short < record.mass_lambda);
        assert_eq!(record.mc, McMatch::default());
        assert_eq!(record.n_sigma_pos_proton, crate::pid::N_SIGMA_UNDEFINED);
    }

    #[test]
    fn crossed_rows_boundary() {
        let sel = selector();
        for (pos, neg) in [(69., 80.), (80., 69.)] {
            let (event, v0) = lambda_event(pos, neg);
            assert_eq!(
                sel.select(&event, &selected(), &v0),
                Err(CandidateRejection::CrossedRows)
            );
        }
        let (event, v0) = lambda_event(70., 70.);
        let record = sel.select(&event, &selected(), &v0).unwrap();
        assert_eq!(record.least_crossed_rows, 70);
    }

    #[test]
    fn same_sign_rejected() {
        for charge in [-1, 1] {
            let (mut event, v0) = lambda_event(80., 80.);
            event.tracks[v0.pos_index].charge = charge;
            event.tracks[v0.neg_index].charge = charge;
            assert_eq!(
                selector().select(&event, &selected(), &v0),
                Err(CandidateRejection::SameSign)
            );
        }
    }

    #[test]
    fn on_fly_rejected() {
        let (event, mut v0) = lambda_event(80., 80.);
        v0.on_fly = true;
        assert_eq!(
            selector().select(&event, &selected(), &v0),
            Err(CandidateRejection::OnFly)
        );
    }

    #[test]
    fn track_quality() {
        let sel = selector();
        let check = |modify: fn(&mut Track)| {
            let (mut event, v0) = lambda_event(80., 80.);
            modify(&mut event.tracks[v0.neg_index]);
            sel.select(&event, &selected(), &v0)
        };
        assert_eq!(check(|t| t.status = 0), Err(CandidateRejection::NoTpcRefit));
        assert_eq!(check(|t| t.kink_index = 1), Err(CandidateRejection::Kink));
        assert!(check(|t| t.kink_index = -1).is_ok());
        assert_eq!(
            check(|t| t.tpc_findable_clusters = 0),
            Err(CandidateRejection::NoFindableClusters)
        );
        assert_eq!(
            check(|t| t.momentum[2] = 2.),
            Err(CandidateRejection::DaughterEta)
        );
    }

    #[test]
    fn degenerate_daughter_rejected() {
        let (mut event, v0) = lambda_event(80., 80.);
        event.tracks[v0.neg_index].momentum = [0.; 3];
        assert!(event.tracks[v0.neg_index].eta().is_nan());
        assert_eq!(
            selector().select(&event, &selected(), &v0),
            Err(CandidateRejection::DaughterEta)
        );
    }

    #[test]
    fn other_rejections() {
        let (event, mut v0) = lambda_event(80., 80.);
        let cuts = CandidateCuts {
            min_pt: 2.,
            ..Default::default()
        };
        let sel = CandidateSelector::new(cuts, StoredPid {});
        assert_eq!(
            sel.select(&event, &selected(), &v0),
            Err(CandidateRejection::PtWindow)
        );
        v0.neg_index = 17;
        assert_eq!(
            selector().select(&event, &selected(), &v0),
            Err(CandidateRejection::MissingTrack)
        );
        // wider opening angle: no hypothesis inside its window
        let (event, mut v0) = lambda_event(80., 80.);
        v0.pos_momentum[1] *= 3.;
        v0.neg_momentum[1] *= 3.;
        assert_eq!(
            selector().select(&event, &selected(), &v0),
            Err(CandidateRejection::MassWindow)
        );
    }
}
