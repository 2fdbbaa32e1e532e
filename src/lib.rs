//! Gray–Scott reaction-diffusion engine.
//!
//! The library holds the simulation core: an immutable [`Grid`] of two-species
//! [`Cell`]s, the random [`init`] of generation 0, the per-cell [`step`] update,
//! the double-buffered [`Simulation`] lifecycle and the grayscale [`render`]
//! pass into a [`Surface`]. The terminal front end lives in the binary.

pub mod error;
pub mod grid;
pub mod init;
pub mod params;
pub mod render;
pub mod sim;
pub mod step;
pub mod surface;

pub use error::{FrameError, GridError, RenderError};
pub use grid::{Boundary, Cell, Grid};
pub use params::{Params, Tuning};
pub use sim::Simulation;
pub use surface::{Rgba, Surface};
