/// Marker trait for types that index the support of a mass distribution.
///
/// Point sets are addressed by position rather than by coordinates, since
/// real-valued points have no total order or hash. The `Copy` bound lets
/// couplings and measures pass indices around freely.
pub trait Support: Copy {}

/// Positions into a point set.
impl Support for usize {}
