//! Core types for dual-band matching-network synthesis
//!
//! This module defines the data model shared by every synthesis stage: the
//! immutable problem statement ([`LoadSpec`]), the component records a design
//! is assembled from ([`LineSection`], [`ShuntStub`], [`PiNetwork`]), the
//! Smith-chart [`Region`] classification, and the finished [`DesignCandidate`]
//! returned by the design-space search.
//!
//! All complex impedance/admittance values use `num_complex::Complex64`.
//! Electrical lengths are stored in radians and are always quoted at the
//! *design frequency* `f1 + f2`; a length `theta` at the design frequency
//! becomes `theta * f / (f1 + f2)` at the actual operating frequency `f`.
//!
//! ## Example
//!
//! ```
//! use dualband_match::types::{Complex, LoadSpec};
//!
//! let spec = LoadSpec::with_standard_z0(
//!     0.9e9,
//!     1.2e9,
//!     Complex::new(22.4, 16.3),
//!     Complex::new(26.2, 20.3),
//! ).unwrap();
//!
//! assert_eq!(spec.design_frequency(), 2.1e9);
//! assert!((spec.p1() + spec.p2() - 1.0).abs() < 1e-15);
//! ```

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Complex impedance/admittance value using f64 precision.
pub type Complex = Complex64;

/// Result type for synthesis operations.
pub type MatchResult<T> = Result<T, SynthesisError>;

/// Conventional system characteristic impedance in ohms.
pub const STANDARD_SYSTEM_IMPEDANCE: f64 = 50.0;

/// Errors that can occur during matching-network synthesis.
///
/// Stage errors are pruning decisions: the design-space search drops the
/// offending grid point and moves on. Only the `LoadSpec` validation errors
/// ever reach a caller directly.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SynthesisError {
    #[error("frequencies must satisfy 0 < f1 < f2, got f1 = {f1} Hz, f2 = {f2} Hz")]
    InvalidFrequencyPair { f1: f64, f2: f64 },

    #[error("system impedance must be positive, got {0} ohm")]
    NonPositiveSystemImpedance(f64),

    #[error("load resistances are equal within 1e-6 ohm; two-frequency conjugate match is undefined")]
    EqualLoadResistances,

    #[error("no real conjugate-line characteristic impedance exists (radicand = {0})")]
    ConjugateLineUnsolvable(f64),

    #[error("no real pi-network series impedance exists (radicand = {0})")]
    PiNetworkUnsolvable(f64),

    #[error("neither an open nor a short stub yields a positive characteristic admittance")]
    NoRealizableStub,
}

/// Immutable problem statement for a dual-band match.
///
/// The load is characterized at two distinct frequencies `f1 < f2`; the goal
/// of synthesis is a network that presents `z0` at both simultaneously.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadSpec {
    /// Lower band frequency in Hz.
    pub f1: f64,
    /// Upper band frequency in Hz.
    pub f2: f64,
    /// Complex load impedance at `f1`, in ohms.
    pub z_load1: Complex,
    /// Complex load impedance at `f2`, in ohms.
    pub z_load2: Complex,
    /// Real system characteristic impedance in ohms.
    pub z0: f64,
}

impl LoadSpec {
    /// Create a validated load specification.
    ///
    /// Requires `0 < f1 < f2` and `z0 > 0`.
    pub fn new(f1: f64, f2: f64, z_load1: Complex, z_load2: Complex, z0: f64) -> MatchResult<Self> {
        if !(f1 > 0.0 && f2 > f1) {
            return Err(SynthesisError::InvalidFrequencyPair { f1, f2 });
        }
        if !(z0 > 0.0) {
            return Err(SynthesisError::NonPositiveSystemImpedance(z0));
        }
        Ok(Self {
            f1,
            f2,
            z_load1,
            z_load2,
            z0,
        })
    }

    /// Create a load specification against the conventional 50 ohm system.
    pub fn with_standard_z0(
        f1: f64,
        f2: f64,
        z_load1: Complex,
        z_load2: Complex,
    ) -> MatchResult<Self> {
        Self::new(f1, f2, z_load1, z_load2, STANDARD_SYSTEM_IMPEDANCE)
    }

    /// Design frequency `f1 + f2`, the common reference for all electrical
    /// lengths.
    pub fn design_frequency(&self) -> f64 {
        self.f1 + self.f2
    }

    /// Fraction `f1 / (f1 + f2)` scaling design-frequency lengths down to f1.
    pub fn p1(&self) -> f64 {
        self.f1 / (self.f1 + self.f2)
    }

    /// Fraction `f2 / (f1 + f2)` scaling design-frequency lengths down to f2.
    pub fn p2(&self) -> f64 {
        self.f2 / (self.f1 + self.f2)
    }
}

/// Smith-chart region of a normalized input impedance `z = Z / Z0`.
///
/// Exactly one region holds for any impedance: `A` when the normalized
/// resistance exceeds 1, else `B` when the normalized conductance exceeds 1,
/// else `C`. Region `C` admits no direct pi-network solution and is handled
/// by shunting an auxiliary stub that cancels the input susceptance, after
/// which the impedance is real and the effective region is `A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    /// Normalized resistance r > 1.
    A,
    /// Normalized conductance g > 1.
    B,
    /// Neither (r <= 1 and g <= 1); needs auxiliary-stub remediation.
    C,
}

/// Termination of a shunt stub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StubKind {
    /// Open-circuit terminated stub: input admittance `j Yc tan(theta)`.
    Open,
    /// Short-circuit terminated stub: input admittance `-j Yc / tan(theta)`.
    Short,
}

/// A lossless series transmission-line section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSection {
    /// Characteristic impedance in ohms.
    pub z_c: f64,
    /// Electrical length in radians at the design frequency.
    pub theta_rad: f64,
}

impl LineSection {
    /// Electrical length in degrees at the design frequency.
    pub fn theta_deg(&self) -> f64 {
        self.theta_rad.to_degrees()
    }
}

/// A shunt stub, open or short terminated.
///
/// Every stub in this topology has electrical length pi at the design
/// frequency (i.e. `p1 * pi` at f1), so only the termination and the
/// characteristic admittance are free parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShuntStub {
    /// Stub termination.
    pub kind: StubKind,
    /// Characteristic admittance in siemens (strictly positive).
    pub y_c: f64,
}

impl ShuntStub {
    /// Characteristic impedance `1 / y_c` in ohms.
    pub fn impedance(&self) -> f64 {
        1.0 / self.y_c
    }
}

/// Symmetric pi-network: a series line flanked by two identical shunt stubs.
///
/// The series line and both stubs all have electrical length pi at the design
/// frequency (`series.theta_rad` is always pi).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PiNetwork {
    /// Series line; `theta_rad` is pi at the design frequency.
    pub series: LineSection,
    /// Shunt stub placed identically at both ports.
    pub stub: ShuntStub,
}

/// A complete, verified matching-network design for one search-grid point.
///
/// Constructed once per solvable grid point and never mutated afterwards.
/// Failed grid points produce no candidate at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignCandidate {
    /// Design frequency `f1 + f2` in Hz.
    pub design_frequency_hz: f64,
    /// Smith-chart region of the conjugate-line output (never [`Region::C`];
    /// remediated candidates report `A`).
    pub region: Region,
    /// Optional auxiliary line ahead of the load (`None` when the scan point
    /// used a zero-length line).
    pub aux_line: Option<LineSection>,
    /// Conjugate-match line.
    pub line: LineSection,
    /// Auxiliary shunt stub inserted for region-C remediation, if any.
    pub aux_stub: Option<ShuntStub>,
    /// Synthesized pi-network.
    pub pi: PiNetwork,
    /// Recomputed standing-wave ratio at f1.
    pub vswr_f1: f64,
    /// Recomputed standing-wave ratio at f2.
    pub vswr_f2: f64,
}

impl DesignCandidate {
    /// Auxiliary-line characteristic impedance in ohms, 0.0 when unused.
    pub fn aux_line_impedance(&self) -> f64 {
        self.aux_line.map_or(0.0, |line| line.z_c)
    }

    /// Auxiliary-line electrical length in degrees, 0.0 when unused.
    pub fn aux_line_angle_deg(&self) -> f64 {
        self.aux_line.map_or(0.0, |line| line.theta_deg())
    }

    /// Conjugate-line electrical length in degrees at the design frequency.
    pub fn line_angle_deg(&self) -> f64 {
        self.line.theta_deg()
    }

    /// Pi-network series-line characteristic impedance in ohms.
    pub fn series_impedance(&self) -> f64 {
        self.pi.series.z_c
    }

    /// Pi-network stub characteristic impedance `1 / Yn` in ohms.
    pub fn stub_impedance(&self) -> f64 {
        self.pi.stub.impedance()
    }

    /// Pi-network stub termination.
    pub fn stub_kind(&self) -> StubKind {
        self.pi.stub.kind
    }

    /// Auxiliary-stub characteristic impedance in ohms, if a remediation stub
    /// is present.
    pub fn aux_stub_impedance(&self) -> Option<f64> {
        self.aux_stub.map(|stub| stub.impedance())
    }

    /// The worse of the two band VSWRs, useful for ranking candidates.
    pub fn worst_vswr(&self) -> f64 {
        self.vswr_f1.max(self.vswr_f2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_invariant() {
        for (f1, f2) in [(0.9e9, 1.2e9), (1.0, 2.0), (433e6, 868e6), (2.4e9, 5.8e9)] {
            let spec = LoadSpec::with_standard_z0(
                f1,
                f2,
                Complex::new(30.0, 10.0),
                Complex::new(40.0, -5.0),
            )
            .unwrap();
            assert!(
                (spec.p1() + spec.p2() - 1.0).abs() < 1e-15,
                "p1 + p2 must be 1, got {}",
                spec.p1() + spec.p2()
            );
            assert!(spec.p1() < spec.p2(), "f1 < f2 implies p1 < p2");
        }
    }

    #[test]
    fn test_spec_rejects_bad_frequencies() {
        let z = Complex::new(30.0, 0.0);
        assert!(matches!(
            LoadSpec::with_standard_z0(1.2e9, 0.9e9, z, z),
            Err(SynthesisError::InvalidFrequencyPair { .. })
        ));
        assert!(matches!(
            LoadSpec::with_standard_z0(0.0, 1.0e9, z, z),
            Err(SynthesisError::InvalidFrequencyPair { .. })
        ));
        assert!(matches!(
            LoadSpec::with_standard_z0(1.0e9, 1.0e9, z, z),
            Err(SynthesisError::InvalidFrequencyPair { .. })
        ));
    }

    #[test]
    fn test_spec_rejects_bad_system_impedance() {
        let z = Complex::new(30.0, 0.0);
        assert!(matches!(
            LoadSpec::new(0.9e9, 1.2e9, z, z, 0.0),
            Err(SynthesisError::NonPositiveSystemImpedance(_))
        ));
        assert!(matches!(
            LoadSpec::new(0.9e9, 1.2e9, z, z, -50.0),
            Err(SynthesisError::NonPositiveSystemImpedance(_))
        ));
    }

    #[test]
    fn test_stub_impedance_is_reciprocal_admittance() {
        let stub = ShuntStub {
            kind: StubKind::Open,
            y_c: 0.02,
        };
        assert!((stub.impedance() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_candidate_accessors_with_no_aux_elements() {
        let candidate = DesignCandidate {
            design_frequency_hz: 2.1e9,
            region: Region::A,
            aux_line: None,
            line: LineSection {
                z_c: 34.4,
                theta_rad: 1.78,
            },
            aux_stub: None,
            pi: PiNetwork {
                series: LineSection {
                    z_c: 45.9,
                    theta_rad: std::f64::consts::PI,
                },
                stub: ShuntStub {
                    kind: StubKind::Open,
                    y_c: 0.005,
                },
            },
            vswr_f1: 1.0,
            vswr_f2: 1.2,
        };
        assert_eq!(candidate.aux_line_impedance(), 0.0);
        assert_eq!(candidate.aux_line_angle_deg(), 0.0);
        assert_eq!(candidate.aux_stub_impedance(), None);
        assert!((candidate.stub_impedance() - 200.0).abs() < 1e-9);
        assert_eq!(candidate.stub_kind(), StubKind::Open);
        assert!((candidate.worst_vswr() - 1.2).abs() < 1e-12);
    }
}
