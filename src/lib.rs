//! Exact Earth Mover's Distance between weighted point sets.
//!
//! The distance is computed by reducing the transportation problem to a
//! min-cost maximum-flow problem on a bipartite network and solving it with
//! successive shortest augmenting paths.
//!
//! ## Modules
//!
//! - [`transport`] — Generic optimal transport abstractions
//! - [`emd`] — Network construction, flow solver, and plan extraction
//!
//! ## Usage
//!
//! ```
//! use emdflow::emd::*;
//! let s = vec![Point::from([0., 0.]), Point::from([1., 0.])];
//! let t = vec![Point::from([0., 1.])];
//! let plan = Transport::new(&s, &t).solve().unwrap();
//! assert!(plan.emd() > 0.);
//! ```
pub mod emd;
pub mod transport;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Ground distances, transport costs, and normalized EMD values.
pub type Energy = f64;
/// Point masses as supplied by the caller.
pub type Mass = f64;
/// Integer edge capacities and flows in the transportation network.
pub type Units = u64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and benchmarking.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// FLOW SOLVER PARAMETERS
// ============================================================================
/// Minimal improvement accepted when relaxing a residual edge, relative to
/// the largest arc cost of the network. Float noise around zero-cost
/// residual cycles grows with coordinate magnitude, so the cutoff does too.
pub const RELAXATION_TOLERANCE: Energy = 1e-9;
/// Maximal decimal digits kept when weights are scaled to integer capacities.
pub const QUANTIZE_DIGITS: i32 = 6;
/// Point pair count from which the distance matrix is filled in parallel.
pub const PARALLEL_THRESHOLD: usize = 4096;

// ============================================================================
// RANDOM INSTANCES
// ============================================================================
/// Dimension of randomly generated points.
pub const ARBITRARY_DIMENSION: usize = 2;
/// Upper bound on the size of randomly generated point sets.
pub const ARBITRARY_POINTS: usize = 8;
/// Upper bound on randomly generated integer weights.
pub const ARBITRARY_WEIGHT: u32 = 5;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging at the given level.
#[cfg(feature = "cli")]
pub fn log(level: log::LevelFilter) {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}
