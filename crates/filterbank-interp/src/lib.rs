//! Umbrella crate for the `filterbank-interp` workspace.
//!
//! Re-exports the strided containers (`fb-core`), kernels and generators
//! (`fb-kernel`) and the interpolation banks (`fb-interp`).

pub use fb_core::*;
pub use fb_interp::*;
pub use fb_kernel::*;
