//! Lockstep alignment of two recordings of the same program.
//!
//! Positions are sample indices into the interleaved sequences and always
//! land on frame boundaries. Window sizes in [`AlignConfig`](crate::config::AlignConfig)
//! are in frames and are scaled by the channel count here.

pub mod compare;
pub mod refine;
pub mod resync;
pub mod scanner;

pub use compare::Comparator;
pub use refine::find_boundary;
pub use resync::find_resync_offset;
pub use scanner::scan_divergences;
