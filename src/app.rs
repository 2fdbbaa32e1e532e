use crate::cli::Args;
use crate::config::{load_settings, project_paths, Settings};
use crate::input::{action_for, pending_keys, Action};
use crate::logging;
use crate::term::{draw_line, paint_surface, Terminal};
use anyhow::Context;
use clap::Parser;
use crossterm::style::Color;
use grayscott_canvas::{init, render::render, FrameError, Params, Simulation, Surface};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::mem::{discriminant, Discriminant};
use std::thread;
use std::time::{Duration, Instant};

/// Collapses a run of same-kind frame failures into one warning.
#[derive(Default)]
struct SkipLog {
    kind: Option<Discriminant<FrameError>>,
    repeats: u64,
}

impl SkipLog {
    /// True when `e` starts a new run and should be logged.
    fn record(&mut self, e: &FrameError) -> bool {
        let kind = discriminant(e);
        if self.kind == Some(kind) {
            self.repeats += 1;
            false
        } else {
            self.kind = Some(kind);
            self.repeats = 0;
            true
        }
    }

    /// Ends the current run, returning how many repeats went unlogged.
    fn clear(&mut self) -> Option<u64> {
        self.kind.take().map(|_| std::mem::take(&mut self.repeats))
    }

    fn active(&self) -> bool {
        self.kind.is_some()
    }
}

pub(crate) struct App {
    settings: Settings,
    params: Params,
    sim: Simulation,
    surface: Surface,
    rng: StdRng,
    term: Terminal,
    paused: bool,
    should_quit: bool,
    skips: SkipLog,
    fps: f32,
}

impl App {
    fn init(settings: Settings) -> anyhow::Result<Self> {
        let seed = settings.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);

        let term = Terminal::begin()?;
        let (w, h) = term.pixel_size();
        let grid = init::seed(w, h, &mut rng).context("could not build the initial grid")?;
        log::info!(
            "grid {w}x{h}, seed {seed:#x}, boundary {:?}, parallel {}",
            settings.boundary,
            settings.parallel
        );

        let surface = Surface::for_grid(&grid);
        let sim = Simulation::new(grid, settings.boundary).with_parallel(settings.parallel);

        Ok(Self {
            params: settings.params,
            settings,
            sim,
            surface,
            rng,
            term,
            paused: false,
            should_quit: false,
            skips: SkipLog::default(),
            fps: 0.0,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let frame_dt = Duration::from_secs_f32(1.0 / self.settings.fps() as f32);
        let steps = self.settings.steps();

        let mut fps_timer = Instant::now();
        let mut frames: u32 = 0;

        while !self.should_quit {
            let frame_start = Instant::now();

            for key in pending_keys()? {
                if let Some(action) = action_for(key) {
                    self.apply(action)?;
                }
            }
            if self.should_quit {
                break;
            }

            if self.frame(steps) {
                self.draw()?;
            }

            frames += 1;
            if fps_timer.elapsed() >= Duration::from_millis(500) {
                self.fps = frames as f32 / fps_timer.elapsed().as_secs_f32();
                fps_timer = Instant::now();
                frames = 0;
            }

            thread::sleep(frame_dt.saturating_sub(frame_start.elapsed()));
        }

        log::info!("quit at generation {}", self.sim.generation());
        self.term.end()?;
        Ok(())
    }

    fn apply(&mut self, action: Action) -> anyhow::Result<()> {
        match action {
            Action::Tune(t) => {
                let v = self.params.apply(t);
                log::info!("{} = {v}", t.label());
            }
            Action::TogglePause => {
                self.paused = !self.paused;
                log::debug!("paused: {}", self.paused);
            }
            Action::Reseed => {
                let (w, h) = (self.surface.width(), self.surface.height());
                let grid = init::seed(w, h, &mut self.rng)?;
                self.sim.reset(grid);
                log::info!("reseeded");
            }
            Action::Quit => self.should_quit = true,
        }
        Ok(())
    }

    /// Steps and renders one frame. A failed step leaves the last good
    /// generation on screen; only the first of a run of failures is logged.
    fn frame(&mut self, steps: u32) -> bool {
        if !self.paused {
            let failed = (0..steps).find_map(|_| self.sim.advance(&self.params).err());
            match failed {
                Some(e) => {
                    if self.skips.record(&e) {
                        log::warn!("frame skipped: {e}");
                    }
                }
                None => {
                    if let Some(n) = self.skips.clear() {
                        log::info!("frames resumed after {n} more skipped");
                    }
                }
            }
        }
        match render(self.sim.current(), &mut self.surface) {
            Ok(()) => true,
            Err(e) => {
                log::error!("render failed: {e}");
                false
            }
        }
    }

    fn draw(&mut self) -> anyhow::Result<()> {
        paint_surface(&self.surface, &mut self.term.cur);
        let hud = format!(
            "Gray–Scott  {}  gen:{}  fps:{:>5.1}{}   ↑↓ feed  ←→ kill  P/O dA  SPACE pause  R reseed  Q quit",
            self.params,
            self.sim.generation(),
            self.fps,
            if self.paused { "  [paused]" } else { "" },
        );
        let hud = if self.skips.active() {
            format!("[frame skipped]  {hud}")
        } else {
            hud
        };
        draw_line(&mut self.term.cur, 0, &hud, Color::White, Color::Black);
        self.term.present()
    }
}

pub(crate) fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let paths = project_paths()?;

    let log_path = args.log_file.clone().unwrap_or(paths.log_path);
    logging::init(&log_path)?;

    let settings_path = args.config.clone().unwrap_or(paths.settings_path);
    let mut settings = load_settings(&settings_path);
    settings.apply_args(&args);
    settings.validate()?;

    let mut app = App::init(settings)?;
    app.run()
}
