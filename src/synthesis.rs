//! Dual-band matching synthesis stages
//!
//! Closed-form synthesis of a dual-band matching network from a load known at
//! two frequencies. The network is assembled in four stages, each a pure
//! function from the previous stage's immutable result:
//!
//! ```text
//! load --[optional aux line]--> TransformedLoad
//!      --[conjugate match]----> ConjugateLine (Z1, theta1)
//!      --[region check]-------> Region a/b, or c + auxiliary shunt stub
//!      --[pi synthesis]-------> PiNetwork (series Zm + two identical stubs)
//! ```
//!
//! Electrical lengths are quoted at the design frequency `f1 + f2` and scale
//! by `p1 = f1/(f1+f2)` at f1. Stage failures (no real characteristic
//! impedance, no realizable stub) are returned as errors so a search driver
//! can prune the configuration and keep going.
//!
//! ## Example
//!
//! ```
//! use dualband_match::synthesis::{conjugate_match, LineBranch, TransformedLoad};
//! use dualband_match::types::{Complex, LoadSpec};
//!
//! let spec = LoadSpec::with_standard_z0(
//!     0.9e9,
//!     1.2e9,
//!     Complex::new(22.4, 16.3),
//!     Complex::new(26.2, 20.3),
//! ).unwrap();
//! let loads = TransformedLoad::from_spec(&spec);
//!
//! let line = conjugate_match(&spec, &loads, LineBranch::Principal).unwrap();
//! assert!((line.line.z_c - 34.4119).abs() < 1e-3);
//! assert!((line.line.theta_deg() - 101.9434).abs() < 1e-3);
//! ```

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::tline::{line_input_impedance, shunted_impedance, stub_input_admittance};
use crate::types::{
    Complex, LineSection, LoadSpec, MatchResult, PiNetwork, Region, ShuntStub, StubKind,
    SynthesisError,
};

/// Load resistances closer than this (ohms) make the two-frequency closed
/// form singular.
const RESISTANCE_TOLERANCE: f64 = 1e-6;

/// Angle denominators below this are treated as an exact quarter-wave
/// (theta = pi/2) instead of failing.
const DENOMINATOR_TOLERANCE: f64 = 1e-9;

/// Which of the two physically valid conjugate-line lengths to use.
///
/// The arctangent in the closed form is pi-periodic, so for every solution
/// there is a second one exactly half a design-frequency period longer. Both
/// are electrically valid at the design frequency but behave differently at
/// f1/f2 after scaling, so the design-space search tries both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineBranch {
    /// Principal arctangent solution.
    Principal,
    /// Alternate solution, one half design-period longer.
    HalfPeriodLonger,
}

impl LineBranch {
    /// Additive electrical-length offset in radians.
    pub fn theta_offset(self) -> f64 {
        match self {
            LineBranch::Principal => 0.0,
            LineBranch::HalfPeriodLonger => PI,
        }
    }
}

/// Load impedances after the optional auxiliary line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformedLoad {
    /// Impedance seen at f1, in ohms.
    pub z1: Complex,
    /// Impedance seen at f2, in ohms.
    pub z2: Complex,
}

impl TransformedLoad {
    /// The untransformed loads (no auxiliary line).
    pub fn from_spec(spec: &LoadSpec) -> Self {
        Self {
            z1: spec.z_load1,
            z2: spec.z_load2,
        }
    }
}

/// Result of the conjugate-match stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConjugateLine {
    /// The synthesized line (Z1, theta1 at the design frequency).
    pub line: LineSection,
    /// Input impedance looking into the line at f1; consumed by the region
    /// classifier only, never by verification.
    pub input_z_f1: Complex,
}

/// Transform both load impedances through an auxiliary line.
///
/// The line's electrical length `aux.theta_rad` is quoted at the design
/// frequency and scales by `p1` / `p2` for the two bands.
pub fn transform_load(spec: &LoadSpec, aux: &LineSection) -> TransformedLoad {
    TransformedLoad {
        z1: line_input_impedance(spec.z_load1, aux.z_c, aux.theta_rad * spec.p1()),
        z2: line_input_impedance(spec.z_load2, aux.z_c, aux.theta_rad * spec.p2()),
    }
}

/// Solve the two-frequency conjugate match: a single line (Z1, theta1) that
/// presents conjugate-matchable impedances at both bands.
///
/// Fails when the load resistances coincide (the closed form divides by
/// their difference) or when no real characteristic impedance exists.
pub fn conjugate_match(
    spec: &LoadSpec,
    loads: &TransformedLoad,
    branch: LineBranch,
) -> MatchResult<ConjugateLine> {
    let (r1, x1) = (loads.z1.re, loads.z1.im);
    let (r2, x2) = (loads.z2.re, loads.z2.im);

    if (r2 - r1).abs() < RESISTANCE_TOLERANCE {
        return Err(SynthesisError::EqualLoadResistances);
    }

    let radicand = r1 * r2 + x1 * x2 + (x1 + x2) / (r2 - r1) * (r1 * x2 - r2 * x1);
    if radicand < 0.0 {
        return Err(SynthesisError::ConjugateLineUnsolvable(radicand));
    }
    let z_c = radicand.sqrt();

    let numerator = z_c * (r2 - r1);
    let denominator = r2 * x1 - r1 * x2;
    let mut theta = if denominator.abs() < DENOMINATOR_TOLERANCE {
        FRAC_PI_2
    } else {
        (numerator / denominator).atan()
    };
    // Principal-value correction before the branch offset; the order decides
    // which physical solution each branch selects.
    if theta < 0.0 {
        theta += PI;
    }
    theta += branch.theta_offset();

    let input_z_f1 = line_input_impedance(loads.z1, z_c, theta * spec.p1());
    Ok(ConjugateLine {
        line: LineSection { z_c, theta_rad: theta },
        input_z_f1,
    })
}

/// Classify an input impedance into its Smith-chart region.
///
/// With `z = z_in / z0`: region A when `Re(z) > 1`, else B when
/// `Re(1/z) > 1`, else C. Exactly one region holds for any `z_in`.
pub fn classify_region(z_in: Complex, z0: f64) -> Region {
    let z = z_in / z0;
    let r = z.re;
    let g = z.inv().re;
    if r > 1.0 {
        Region::A
    } else if g > 1.0 {
        Region::B
    } else {
        Region::C
    }
}

/// Pick the stub termination that realizes `target_susceptance` with a
/// positive characteristic admittance at electrical length `theta`.
///
/// Open stubs are preferred; a short stub is used when only its admittance
/// comes out positive. Neither positive is a hard failure: no fabricated
/// placeholder admittance is ever substituted.
fn realizable_stub(target_susceptance: f64, theta: f64) -> MatchResult<ShuntStub> {
    let tan_theta = theta.tan();
    let y_open = if tan_theta.abs() > DENOMINATOR_TOLERANCE {
        target_susceptance / tan_theta
    } else {
        0.0
    };
    let y_short = -target_susceptance * tan_theta;

    if y_open > 0.0 {
        Ok(ShuntStub {
            kind: StubKind::Open,
            y_c: y_open,
        })
    } else if y_short > 0.0 {
        Ok(ShuntStub {
            kind: StubKind::Short,
            y_c: y_short,
        })
    } else {
        Err(SynthesisError::NoRealizableStub)
    }
}

/// Region-C remediation: shunt a stub that cancels the input susceptance,
/// relocating the impedance onto the real axis (effective region A).
///
/// The stub's electrical length is `p1 * pi` at f1 (pi at the design
/// frequency). Returns the stub and the remediated input impedance.
pub fn cancel_susceptance(z_in: Complex, p1: f64) -> MatchResult<(ShuntStub, Complex)> {
    let y_in = z_in.inv();
    let theta = p1 * PI;
    let stub = realizable_stub(-y_in.im, theta)?;
    let y_stub = stub_input_admittance(stub.y_c, theta, stub.kind);
    Ok((stub, shunted_impedance(z_in, y_stub)))
}

/// Synthesize the symmetric pi-network that forces a real, `z0`-matched
/// input impedance at f1.
///
/// First solves the equivalent single line (Z_T1, theta_T1) transforming
/// `z_in` into `z0`, then folds it into a pi of fixed angle `p1 * pi`:
/// series impedance `Zm = Z_T1 sin(theta_T1) / sin(theta_m1)` and identical
/// port stubs realizing `Bn = (cos(theta_m1) - cos(theta_T1)) / (Zm
/// sin(theta_m1))`.
///
/// Fails when the equivalent-line radicand is negative (or non-finite, which
/// covers `Re(z_in) == z0`) or when no realizable stub exists.
pub fn synthesize_pi_network(z_in: Complex, z0: f64, p1: f64) -> MatchResult<PiNetwork> {
    let (r, x) = (z_in.re, z_in.im);

    let radicand = x * x * z0 / (r - z0) + r * z0;
    if !(radicand >= 0.0 && radicand.is_finite()) {
        return Err(SynthesisError::PiNetworkUnsolvable(radicand));
    }
    let z_t1 = radicand.sqrt();

    let numerator = z_t1 * (z0 - r);
    let denominator = x * z0;
    let mut theta_t1 = if denominator.abs() < DENOMINATOR_TOLERANCE {
        FRAC_PI_2
    } else {
        (numerator / denominator).atan()
    };
    if theta_t1 <= 0.0 {
        theta_t1 += PI;
    }

    let theta_m1 = p1 * PI;
    let z_m = z_t1 * theta_t1.sin() / theta_m1.sin();
    let b_n1 = (theta_m1.cos() - theta_t1.cos()) / (z_m * theta_m1.sin());
    let stub = realizable_stub(b_n1, theta_m1)?;

    Ok(PiNetwork {
        series: LineSection {
            z_c: z_m,
            theta_rad: PI,
        },
        stub,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_spec() -> LoadSpec {
        LoadSpec::with_standard_z0(
            0.9e9,
            1.2e9,
            Complex::new(22.4, 16.3),
            Complex::new(26.2, 20.3),
        )
        .unwrap()
    }

    #[test]
    fn test_conjugate_match_known_solution() {
        let spec = scenario_spec();
        let loads = TransformedLoad::from_spec(&spec);
        let result = conjugate_match(&spec, &loads, LineBranch::Principal).unwrap();
        assert!(
            (result.line.z_c - 34.411908893349846).abs() < 1e-9,
            "Z1 = {}",
            result.line.z_c
        );
        assert!(
            (result.line.theta_deg() - 101.94338847615303).abs() < 1e-9,
            "theta1 = {} deg",
            result.line.theta_deg()
        );
    }

    #[test]
    fn test_branch_offset_is_exactly_half_period() {
        let spec = scenario_spec();
        let loads = TransformedLoad::from_spec(&spec);
        let principal = conjugate_match(&spec, &loads, LineBranch::Principal).unwrap();
        let longer = conjugate_match(&spec, &loads, LineBranch::HalfPeriodLonger).unwrap();
        assert_eq!(principal.line.z_c, longer.line.z_c);
        assert!(
            (longer.line.theta_rad - principal.line.theta_rad - PI).abs() < 1e-12,
            "branch must add exactly pi: {} vs {}",
            principal.line.theta_rad,
            longer.line.theta_rad
        );
    }

    #[test]
    fn test_conjugate_match_rejects_equal_resistances() {
        let spec = LoadSpec::with_standard_z0(
            0.9e9,
            1.2e9,
            Complex::new(30.0, 10.0),
            Complex::new(30.0, 5.0),
        )
        .unwrap();
        let loads = TransformedLoad::from_spec(&spec);
        for branch in [LineBranch::Principal, LineBranch::HalfPeriodLonger] {
            assert_eq!(
                conjugate_match(&spec, &loads, branch),
                Err(SynthesisError::EqualLoadResistances)
            );
        }
    }

    #[test]
    fn test_conjugate_match_rejects_negative_radicand() {
        // r1 r2 + x1 x2 = 110 - 10000 < 0 and x1 + x2 = 0 kills the second term.
        let spec = LoadSpec::with_standard_z0(
            0.9e9,
            1.2e9,
            Complex::new(10.0, 100.0),
            Complex::new(11.0, -100.0),
        )
        .unwrap();
        let loads = TransformedLoad::from_spec(&spec);
        assert!(matches!(
            conjugate_match(&spec, &loads, LineBranch::Principal),
            Err(SynthesisError::ConjugateLineUnsolvable(_))
        ));
    }

    #[test]
    fn test_region_classification() {
        // r = 2 > 1.
        assert_eq!(classify_region(Complex::new(100.0, 0.0), 50.0), Region::A);
        // r = 0.5, g = 2 > 1.
        assert_eq!(classify_region(Complex::new(25.0, 0.0), 50.0), Region::B);
        // z = 1 + 2j: r = 1, g = 0.2.
        assert_eq!(classify_region(Complex::new(50.0, 100.0), 50.0), Region::C);
        // On the r = g = 1 boundary neither strict inequality holds.
        assert_eq!(classify_region(Complex::new(50.0, 0.0), 50.0), Region::C);
    }

    #[test]
    fn test_region_classification_is_exhaustive() {
        // Every point lands in exactly one region by construction; spot-check
        // a sweep of the right half plane.
        for re in [5.0_f64, 25.0, 50.0, 75.0, 150.0] {
            for im in [-80.0_f64, -20.0, 0.0, 20.0, 80.0] {
                let region = classify_region(Complex::new(re, im), 50.0);
                assert!(matches!(region, Region::A | Region::B | Region::C));
            }
        }
    }

    #[test]
    fn test_cancel_susceptance_yields_real_impedance() {
        let spec = scenario_spec();
        let z_in = Complex::new(40.0, 25.0); // region C for z0 = 50
        assert_eq!(classify_region(z_in, spec.z0), Region::C);
        let (stub, z_new) = cancel_susceptance(z_in, spec.p1()).unwrap();
        assert!(stub.y_c > 0.0, "stub admittance must be positive");
        assert!(
            z_new.im.abs() < 1e-9,
            "remediated impedance must be real, got {z_new}"
        );
        assert_ne!(classify_region(z_new, spec.z0), Region::C);
    }

    #[test]
    fn test_pi_network_known_solution() {
        // Chain conjugate match -> classify -> pi for the reference scenario.
        let spec = scenario_spec();
        let loads = TransformedLoad::from_spec(&spec);
        let conjugate = conjugate_match(&spec, &loads, LineBranch::Principal).unwrap();
        assert_eq!(classify_region(conjugate.input_z_f1, spec.z0), Region::A);

        let pi = synthesize_pi_network(conjugate.input_z_f1, spec.z0, spec.p1()).unwrap();
        assert!(
            (pi.series.z_c - 45.95136647839257).abs() < 1e-8,
            "Zm = {}",
            pi.series.z_c
        );
        assert_eq!(pi.stub.kind, StubKind::Open);
        assert!(
            (pi.stub.impedance() - 202.13479210868445).abs() < 1e-6,
            "Zn = {}",
            pi.stub.impedance()
        );
        assert_eq!(pi.series.theta_rad, PI);
    }

    #[test]
    fn test_pi_network_rejects_negative_radicand() {
        // R < Z0 with X^2 > R (Z0 - R): term goes negative.
        let result = synthesize_pi_network(Complex::new(10.0, 30.0), 50.0, 0.9e9 / 2.1e9);
        assert!(matches!(
            result,
            Err(SynthesisError::PiNetworkUnsolvable(_))
        ));
    }

    #[test]
    fn test_pi_network_rejects_input_equal_to_z0() {
        // R == Z0 makes the radicand non-finite; must fail, not propagate NaN.
        let result = synthesize_pi_network(Complex::new(50.0, 20.0), 50.0, 0.42857);
        assert!(matches!(
            result,
            Err(SynthesisError::PiNetworkUnsolvable(_))
        ));
    }

    #[test]
    fn test_transform_load_scales_per_band() {
        let spec = scenario_spec();
        let aux = LineSection {
            z_c: 50.0,
            theta_rad: 45.0_f64.to_radians(),
        };
        let loads = transform_load(&spec, &aux);
        // Each band sees its own frequency-scaled length, so the two loads
        // transform differently.
        assert_ne!(loads.z1, spec.z_load1);
        assert_ne!(loads.z2, spec.z_load2);
        let direct1 =
            line_input_impedance(spec.z_load1, 50.0, 45.0_f64.to_radians() * spec.p1());
        assert_eq!(loads.z1, direct1);
    }
}
