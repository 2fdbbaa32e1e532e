use clap::{Parser, ValueEnum};
use grayscott_canvas::Boundary;
use std::path::PathBuf;

/// Gray–Scott reaction-diffusion in the terminal.
///
/// Keys: ↑/↓ feed, →/← kill, P/O diffusionA, SPACE pause, R reseed, Q quit.
#[derive(Parser, Debug, Default)]
#[command(version, about)]
pub(crate) struct Args {
    /// feed rate
    #[arg(long)]
    pub(crate) feed: Option<f64>,

    /// kill rate
    #[arg(long)]
    pub(crate) kill: Option<f64>,

    /// diffusion coefficient of species A
    #[arg(long)]
    pub(crate) diffusion_a: Option<f64>,

    /// diffusion coefficient of species B
    #[arg(long)]
    pub(crate) diffusion_b: Option<f64>,

    /// frame cap
    #[arg(long)]
    pub(crate) fps: Option<u32>,

    /// simulation steps per displayed frame
    #[arg(long)]
    pub(crate) steps_per_frame: Option<u32>,

    /// RNG seed for the initial grid (random if omitted)
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// edge handling for neighbor reads
    #[arg(long, value_enum)]
    pub(crate) boundary: Option<BoundaryArg>,

    /// step on a single thread
    #[arg(long)]
    pub(crate) serial: bool,

    /// settings file (JSON); defaults to the per-user data dir
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// log file; defaults to the per-user data dir
    #[arg(long)]
    pub(crate) log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum BoundaryArg {
    /// neighbors wrap around to the opposite edge
    Wrap,
    /// neighbors past the edge read the edge cell
    Clamp,
}

impl From<BoundaryArg> for Boundary {
    fn from(b: BoundaryArg) -> Self {
        match b {
            BoundaryArg::Wrap => Boundary::Wrap,
            BoundaryArg::Clamp => Boundary::Clamp,
        }
    }
}
