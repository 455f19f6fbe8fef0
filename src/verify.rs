//! Forward verification of a synthesized matching network
//!
//! Recomputes the actual input impedance and VSWR of a finished design at
//! both band frequencies by chaining the transmission-line primitives over
//! the chosen component values: load, optional auxiliary line, conjugate
//! line, optional auxiliary stub, then the pi-network as shunt stub, series
//! line, shunt stub. Each element's electrical length is rescaled from its
//! design-frequency value by `f / (f1 + f2)`.
//!
//! This is a pure re-derivation: it never consults any intermediate
//! impedance computed during synthesis, so a synthesis bug shows up here as
//! a VSWR away from 1.0 rather than being reproduced.

use std::f64::consts::PI;

use crate::tline::{line_input_impedance, shunted_impedance, stub_input_admittance, vswr};
use crate::types::{Complex, DesignCandidate, LineSection, LoadSpec, PiNetwork, ShuntStub};

/// The chosen component values of a synthesized network, borrowed for
/// forward verification.
#[derive(Debug, Clone, Copy)]
pub struct NetworkParts<'a> {
    /// Auxiliary line ahead of the load, if the design uses one.
    pub aux_line: Option<&'a LineSection>,
    /// Conjugate-match line.
    pub line: &'a LineSection,
    /// Region-C remediation stub, if present.
    pub aux_stub: Option<&'a ShuntStub>,
    /// Pi-network.
    pub pi: &'a PiNetwork,
}

impl<'a> NetworkParts<'a> {
    /// Borrow the parts of a finished candidate.
    pub fn of(candidate: &'a DesignCandidate) -> Self {
        Self {
            aux_line: candidate.aux_line.as_ref(),
            line: &candidate.line,
            aux_stub: candidate.aux_stub.as_ref(),
            pi: &candidate.pi,
        }
    }
}

/// Input impedance of the full network at frequency `f`, starting from the
/// load impedance `z_load` the network sees at that frequency.
///
/// Stub elements have design-frequency length pi, so their length at `f` is
/// `pi * f / (f1 + f2)`.
pub fn network_input_impedance(
    spec: &LoadSpec,
    parts: &NetworkParts,
    z_load: Complex,
    f: f64,
) -> Complex {
    let scale = f / spec.design_frequency();
    let mut z = z_load;

    if let Some(aux) = parts.aux_line {
        z = line_input_impedance(z, aux.z_c, aux.theta_rad * scale);
    }
    z = line_input_impedance(z, parts.line.z_c, parts.line.theta_rad * scale);
    if let Some(stub) = parts.aux_stub {
        let y = stub_input_admittance(stub.y_c, PI * scale, stub.kind);
        z = shunted_impedance(z, y);
    }

    let y_port = stub_input_admittance(parts.pi.stub.y_c, PI * scale, parts.pi.stub.kind);
    z = shunted_impedance(z, y_port);
    z = line_input_impedance(z, parts.pi.series.z_c, parts.pi.series.theta_rad * scale);
    shunted_impedance(z, y_port)
}

/// Recompute the standing-wave ratio at f1 and f2 for the given network.
pub fn verify_vswr(spec: &LoadSpec, parts: &NetworkParts) -> (f64, f64) {
    let z_f1 = network_input_impedance(spec, parts, spec.z_load1, spec.f1);
    let z_f2 = network_input_impedance(spec, parts, spec.z_load2, spec.f2);
    (vswr(z_f1, spec.z0), vswr(z_f2, spec.z0))
}

/// Recompute both band VSWRs for a finished candidate, independently of the
/// values stored on it.
pub fn verify_candidate(spec: &LoadSpec, candidate: &DesignCandidate) -> (f64, f64) {
    verify_vswr(spec, &NetworkParts::of(candidate))
}
