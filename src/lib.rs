//! # Dual-Band Impedance Matching Synthesis
//!
//! This crate synthesizes transmission-line matching networks that present a
//! real system impedance Z0 simultaneously at two frequencies, given the
//! complex load impedance at each. The topology is a conjugate-match line
//! followed by a symmetric pi-network of stubs, optionally preceded by an
//! auxiliary line and an auxiliary shunt stub when the intermediate
//! impedance lands in the unmatchable Smith-chart region.
//!
//! ## Pipeline
//!
//! ```text
//! load @ f1,f2 → [aux line] → conjugate line (Z1, θ1)
//!              → region a/b/c check → [aux shunt stub]
//!              → pi network (series Zm + two identical stubs)
//!              → VSWR verification @ f1, f2
//! ```
//!
//! All electrical lengths are quoted at the design frequency `f1 + f2` and
//! scale to each band by `p1 = f1/(f1+f2)` and `p2 = f2/(f1+f2)`. The
//! closed form has branch choices and unsolvable configurations, so
//! [`search`] sweeps a grid of auxiliary-line lengths and branch selections,
//! pruning every grid point where a stage fails and returning the full set
//! of verified [`DesignCandidate`]s.
//!
//! ## Example
//!
//! ```rust
//! use dualband_match::{search, Complex, LoadSpec, SearchConfig};
//!
//! // A load characterized at 0.9 GHz and 1.2 GHz on a 50 Ω system.
//! let spec = LoadSpec::with_standard_z0(
//!     0.9e9,
//!     1.2e9,
//!     Complex::new(22.4, 16.3),
//!     Complex::new(26.2, 20.3),
//! ).unwrap();
//!
//! let candidates = search(&spec, &SearchConfig::default());
//! assert!(!candidates.is_empty());
//!
//! // Pick the design whose stub impedance is closest to 50 Ω.
//! let best = candidates
//!     .iter()
//!     .min_by(|a, b| {
//!         (a.stub_impedance() - 50.0).abs()
//!             .partial_cmp(&(b.stub_impedance() - 50.0).abs())
//!             .unwrap()
//!     })
//!     .unwrap();
//! assert!(best.vswr_f1 < 1.01);
//! println!(
//!     "Z1 = {:.2} Ω @ {:.1}°, Zm = {:.2} Ω, Zn = {:.2} Ω ({:?})",
//!     best.line.z_c,
//!     best.line_angle_deg(),
//!     best.series_impedance(),
//!     best.stub_impedance(),
//!     best.stub_kind(),
//! );
//! ```
//!
//! ## Feature flags
//!
//! - `parallel`: enables [`par_search`], a Rayon-backed parallel map over
//!   the search grid with output identical to [`search`].
//!
//! Out of scope: lossy lines, S/ABCD matrix representations, matching at
//! more than two frequencies, and physical (microstrip) line realization.

pub mod search;
pub mod synthesis;
pub mod tline;
pub mod types;
pub mod verify;

#[cfg(feature = "parallel")]
pub use search::par_search;
pub use search::{grid_points, search, GridPoint, SearchConfig};
pub use synthesis::LineBranch;
pub use types::{
    Complex, DesignCandidate, LineSection, LoadSpec, MatchResult, PiNetwork, Region, ShuntStub,
    StubKind, SynthesisError, STANDARD_SYSTEM_IMPEDANCE,
};
pub use verify::verify_candidate;
