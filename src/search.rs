//! Exhaustive design-space search
//!
//! Enumerates a grid of auxiliary-line electrical lengths and conjugate-line
//! branch choices, runs the full synthesis pipeline for each point, and
//! collects every solvable design together with its verification metrics.
//! Grid points are independent: each evaluation starts from the immutable
//! [`LoadSpec`] and its own `(angle, branch)` pair, so results are
//! deterministic in grid-scan order.
//!
//! With the `parallel` feature enabled, [`par_search`] maps the same grid
//! over a Rayon worker pool; the output ordering is identical to
//! [`search`].
//!
//! ## Example
//!
//! ```
//! use dualband_match::search::{search, SearchConfig};
//! use dualband_match::types::{Complex, LoadSpec};
//!
//! let spec = LoadSpec::with_standard_z0(
//!     0.9e9,
//!     1.2e9,
//!     Complex::new(22.4, 16.3),
//!     Complex::new(26.2, 20.3),
//! ).unwrap();
//!
//! let candidates = search(&spec, &SearchConfig::default());
//! assert!(!candidates.is_empty());
//! // Every surviving design is an exact match at f1.
//! assert!(candidates.iter().all(|c| (c.vswr_f1 - 1.0).abs() < 1e-3));
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::synthesis::{
    cancel_susceptance, classify_region, conjugate_match, synthesize_pi_network, transform_load,
    LineBranch, TransformedLoad,
};
use crate::types::{DesignCandidate, LineSection, LoadSpec, Region, STANDARD_SYSTEM_IMPEDANCE};
use crate::verify::{verify_vswr, NetworkParts};

/// Auxiliary-line angle grid step in degrees.
pub const AUX_ANGLE_STEP_DEG: f64 = 5.0;

/// Auxiliary-line angle grid upper bound in degrees (exclusive).
pub const AUX_ANGLE_LIMIT_DEG: f64 = 180.0;

/// Search-space configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Characteristic impedance of the auxiliary line used while scanning,
    /// in ohms. Only its electrical length is varied.
    pub aux_line_z: f64,
    /// Remediate region-C points with an auxiliary shunt stub. When false,
    /// region-C grid points are discarded instead.
    pub allow_aux_stub: bool,
    /// Scan the auxiliary-line angle grid. When false only the zero-length
    /// point is tried, leaving two grid points (one per branch).
    pub scan_aux_line: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            aux_line_z: STANDARD_SYSTEM_IMPEDANCE,
            allow_aux_stub: true,
            scan_aux_line: true,
        }
    }
}

/// One point of the search grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    /// Auxiliary-line electrical length in degrees at the design frequency
    /// (0 means no auxiliary line).
    pub aux_angle_deg: f64,
    /// Conjugate-line branch to take.
    pub branch: LineBranch,
}

/// The full grid in deterministic scan order: auxiliary angles ascending,
/// both branches per angle.
pub fn grid_points(config: &SearchConfig) -> Vec<GridPoint> {
    let angles: Vec<f64> = if config.scan_aux_line {
        (0..)
            .map(|i| i as f64 * AUX_ANGLE_STEP_DEG)
            .take_while(|angle| *angle < AUX_ANGLE_LIMIT_DEG)
            .collect()
    } else {
        vec![0.0]
    };

    let mut points = Vec::with_capacity(angles.len() * 2);
    for angle in angles {
        for branch in [LineBranch::Principal, LineBranch::HalfPeriodLonger] {
            points.push(GridPoint {
                aux_angle_deg: angle,
                branch,
            });
        }
    }
    points
}

/// Run the full pipeline for one grid point.
///
/// Returns `None` when any stage is unsolvable, or when the point lands in
/// region C while auxiliary-stub remediation is disabled. A returned
/// candidate is complete and verified; its region is never [`Region::C`].
pub fn evaluate_grid_point(
    spec: &LoadSpec,
    config: &SearchConfig,
    point: GridPoint,
) -> Option<DesignCandidate> {
    let aux_line = (point.aux_angle_deg > 0.0).then(|| LineSection {
        z_c: config.aux_line_z,
        theta_rad: point.aux_angle_deg.to_radians(),
    });
    let loads = match &aux_line {
        Some(aux) => transform_load(spec, aux),
        None => TransformedLoad::from_spec(spec),
    };

    let conjugate = match conjugate_match(spec, &loads, point.branch) {
        Ok(line) => line,
        Err(err) => {
            trace!(aux_angle_deg = point.aux_angle_deg, branch = ?point.branch, %err,
                "conjugate match unsolvable");
            return None;
        }
    };

    let (region, aux_stub, z_matched) = match classify_region(conjugate.input_z_f1, spec.z0) {
        Region::C => {
            if !config.allow_aux_stub {
                trace!(aux_angle_deg = point.aux_angle_deg, branch = ?point.branch,
                    "region C with remediation disabled");
                return None;
            }
            match cancel_susceptance(conjugate.input_z_f1, spec.p1()) {
                Ok((stub, z)) => (Region::A, Some(stub), z),
                Err(err) => {
                    trace!(aux_angle_deg = point.aux_angle_deg, branch = ?point.branch, %err,
                        "region C remediation failed");
                    return None;
                }
            }
        }
        region => (region, None, conjugate.input_z_f1),
    };

    let pi = match synthesize_pi_network(z_matched, spec.z0, spec.p1()) {
        Ok(pi) => pi,
        Err(err) => {
            trace!(aux_angle_deg = point.aux_angle_deg, branch = ?point.branch, %err,
                "pi network unsolvable");
            return None;
        }
    };

    let line = conjugate.line;
    let (vswr_f1, vswr_f2) = verify_vswr(
        spec,
        &NetworkParts {
            aux_line: aux_line.as_ref(),
            line: &line,
            aux_stub: aux_stub.as_ref(),
            pi: &pi,
        },
    );

    Some(DesignCandidate {
        design_frequency_hz: spec.design_frequency(),
        region,
        aux_line,
        line,
        aux_stub,
        pi,
        vswr_f1,
        vswr_f2,
    })
}

/// Search the whole grid sequentially, returning all solvable designs in
/// grid-scan order.
pub fn search(spec: &LoadSpec, config: &SearchConfig) -> Vec<DesignCandidate> {
    let points = grid_points(config);
    let attempted = points.len();
    let candidates: Vec<DesignCandidate> = points
        .into_iter()
        .filter_map(|point| evaluate_grid_point(spec, config, point))
        .collect();
    debug!(
        attempted,
        solved = candidates.len(),
        "design-space search complete"
    );
    candidates
}

/// Parallel grid search over a Rayon worker pool.
///
/// Output is identical to [`search`], including ordering: the parallel
/// collect preserves grid-scan order.
#[cfg(feature = "parallel")]
pub fn par_search(spec: &LoadSpec, config: &SearchConfig) -> Vec<DesignCandidate> {
    let points = grid_points(config);
    let attempted = points.len();
    let candidates: Vec<DesignCandidate> = points
        .into_par_iter()
        .filter_map(|point| evaluate_grid_point(spec, config, point))
        .collect();
    debug!(
        attempted,
        solved = candidates.len(),
        "parallel design-space search complete"
    );
    candidates
}
