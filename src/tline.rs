//! Lossless transmission-line primitives
//!
//! Input impedance of a terminated line, input admittance of open/short
//! stubs, and the reflection-coefficient/VSWR metrics derived from them.
//! Every synthesis and verification stage in this crate is built from these
//! functions, so they share one sign convention: positive electrical length
//! moves toward the generator, open stubs contribute `+j Yc tan(theta)` and
//! short stubs `-j Yc / tan(theta)`.
//!
//! Quarter-wave and half-wave degeneracies are resolved with the physical
//! limits (an open transforms to a short and vice versa) using a large
//! finite sentinel rather than an infinity, so downstream arithmetic stays
//! finite.
//!
//! ## Example
//!
//! ```
//! use dualband_match::tline::{line_input_impedance, vswr};
//! use dualband_match::types::Complex;
//!
//! // A line terminated in its own characteristic impedance is invisible.
//! let z = line_input_impedance(Complex::new(50.0, 0.0), 50.0, 1.234);
//! assert!((z.re - 50.0).abs() < 1e-9 && z.im.abs() < 1e-9);
//!
//! // 100 ohm on a 50 ohm system: |rho| = 1/3, VSWR = 2.
//! assert!((vswr(Complex::new(100.0, 0.0), 50.0) - 2.0).abs() < 1e-12);
//! ```

use crate::types::{Complex, StubKind};

/// Threshold below which `cos(theta)` / `sin(theta)` counts as zero.
const DEGENERATE_TOLERANCE: f64 = 1e-9;

/// Large finite magnitude standing in for the open/short-circuit limits.
const SENTINEL_MAGNITUDE: f64 = 1e9;

/// Input impedance of a lossless line of characteristic impedance `z_c`
/// (ohms) and electrical length `theta` (radians) terminated in `z_load`.
///
/// `Zin = Zc (ZL + j Zc tan(theta)) / (Zc + j ZL tan(theta))`.
///
/// At quarter-wave lengths (`cos(theta)` ~ 0) this reduces to the impedance
/// inverter `Zc^2 / ZL`; a near-short load there returns the large-magnitude
/// open sentinel.
pub fn line_input_impedance(z_load: Complex, z_c: f64, theta: f64) -> Complex {
    if theta.cos().abs() < DEGENERATE_TOLERANCE {
        if z_load.norm() < DEGENERATE_TOLERANCE {
            return Complex::new(SENTINEL_MAGNITUDE, 0.0);
        }
        return Complex::new(z_c * z_c, 0.0) / z_load;
    }
    let t = Complex::new(0.0, theta.tan());
    z_c * (z_load + z_c * t) / (z_c + z_load * t)
}

/// Input admittance of a shunt stub of characteristic admittance `y_c`
/// (siemens) and electrical length `theta` (radians).
///
/// Open stub: `j y_c tan(theta)`. Short stub: `-j y_c / tan(theta)`.
/// Degenerate lengths return the physical limits: a quarter-wave open stub
/// looks like a short (large admittance) and a quarter-wave short stub like
/// an open (zero admittance); at multiples of pi the roles swap.
pub fn stub_input_admittance(y_c: f64, theta: f64, kind: StubKind) -> Complex {
    if theta.cos().abs() < DEGENERATE_TOLERANCE {
        return match kind {
            StubKind::Open => Complex::new(0.0, SENTINEL_MAGNITUDE),
            StubKind::Short => Complex::new(0.0, 0.0),
        };
    }
    if theta.sin().abs() < DEGENERATE_TOLERANCE {
        return match kind {
            StubKind::Open => Complex::new(0.0, 0.0),
            StubKind::Short => Complex::new(0.0, -SENTINEL_MAGNITUDE),
        };
    }
    match kind {
        StubKind::Open => Complex::new(0.0, y_c * theta.tan()),
        StubKind::Short => Complex::new(0.0, -y_c / theta.tan()),
    }
}

/// Impedance seen when a shunt admittance `y_shunt` is placed across `z`.
pub fn shunted_impedance(z: Complex, y_shunt: Complex) -> Complex {
    (z.inv() + y_shunt).inv()
}

/// Reflection coefficient of impedance `z` against a real reference `z0`:
/// `rho = (z - z0) / (z + z0)`.
pub fn reflection_coefficient(z: Complex, z0: f64) -> Complex {
    (z - z0) / (z + z0)
}

/// Voltage standing-wave ratio of `z` against `z0`.
///
/// Returns `f64::INFINITY` for total reflection (`|rho| >= 1`).
pub fn vswr(z: Complex, z0: f64) -> f64 {
    let rho = reflection_coefficient(z, z0).norm();
    if rho >= 1.0 {
        return f64::INFINITY;
    }
    (1.0 + rho) / (1.0 - rho)
}
