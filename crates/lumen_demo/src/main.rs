//! # LUMEN Demo
//!
//! Runs the render loop against a headless window:
//!
//! 1. Load configuration (file, then command-line overrides)
//! 2. Start the render worker and wait for its init hook
//! 3. A producer thread enqueues quads; resize events submit viewport tasks
//! 4. The main thread pumps window events until Escape is pressed
//! 5. Close, join, report
//!
//! ```text
//! lumen-demo --config lumen.toml --frame-cap 120 --seconds 5
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use lumen_render::{
    Action, ContextWindow, EventKind, HeadlessWindow, HookResult, Key, LoggingConfig, LumenConfig, LumenResult,
    RenderHooks, RenderWorker, Renderable, WindowEvent,
};
use tracing_subscriber::EnvFilter;

/// How often the main thread pumps window events.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// How often the producer thread enqueues a quad.
const SPAWN_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Parser, Debug)]
#[command(name = "lumen-demo")]
#[command(about = "Runs the LUMEN render loop against a headless window", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides `[render] frame_cap`
    #[arg(long)]
    frame_cap: Option<i32>,

    /// Seconds until a synthetic Escape press closes the window
    #[arg(long, default_value_t = 3)]
    seconds: u64,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("lumen-demo: {err}");
            return ExitCode::FAILURE;
        }
    };

    if cli.print_config {
        return match config.to_toml_string() {
            Ok(text) => {
                print!("{text}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("lumen-demo: {err}");
                ExitCode::FAILURE
            }
        };
    }

    init_logging(&config.logging);

    match run(&config, Duration::from_secs(cli.seconds)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "demo failed");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> LumenResult<LumenConfig> {
    let mut config = match &cli.config {
        Some(path) => LumenConfig::from_path(path)?,
        None => LumenConfig::default(),
    };
    if let Some(cap) = cli.frame_cap {
        config.render.frame_cap = cap;
    }
    config.validate()?;
    Ok(config)
}

/// Installs a stderr subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi)
        .with_thread_names(true)
        .try_init();
}

/// Per-frame work for the demo scene.
#[derive(Default)]
struct SceneHooks {
    frames: u64,
}

impl RenderHooks<HeadlessWindow> for SceneHooks {
    fn init(&mut self, window: &HeadlessWindow) -> HookResult {
        let (width, height) = window.size();
        tracing::info!(width, height, title = %window.config().title, "scene initialised");
        Ok(())
    }

    fn render(&mut self, _: &HeadlessWindow) -> HookResult {
        self.frames += 1;
        tracing::trace!(frame = self.frames, "clear");
        Ok(())
    }
}

/// A drawable that counts how often it was drawn.
struct Quad {
    id: u64,
    draws: Arc<AtomicU64>,
}

impl Renderable<HeadlessWindow> for Quad {
    fn render(&self, _: &HeadlessWindow) -> HookResult {
        self.draws.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(id = self.id, "quad");
        Ok(())
    }
}

fn run(config: &LumenConfig, lifetime: Duration) -> LumenResult<()> {
    let window = Arc::new(HeadlessWindow::new(config.window.clone()));
    let mut worker = RenderWorker::with_config(Arc::clone(&window), SceneHooks::default(), &config.render)?;

    let close = window.close_handle();
    window.on(EventKind::Key, move |event| {
        if let WindowEvent::Key {
            key: Key::Escape,
            action: Action::Press,
            ..
        } = event
        {
            tracing::info!("escape pressed");
            close.request_close();
        }
    });

    let resize_handle = worker.handle();
    window.on(EventKind::FramebufferResize, move |event| {
        if let WindowEvent::FramebufferResize { width, height } = *event {
            // viewport state lives with the context
            let _ = resize_handle.submit(move || tracing::debug!(width, height, "viewport updated"));
        }
    });

    worker.start()?;

    let render_thread = worker.submit_and_wait(|| thread::current().name().map(String::from))?;
    tracing::info!(thread = ?render_thread, "render thread ready");

    let draws = Arc::new(AtomicU64::new(0));
    let producing = Arc::new(AtomicBool::new(true));
    let producer = {
        let handle = worker.handle();
        let draws = Arc::clone(&draws);
        let producing = Arc::clone(&producing);
        thread::spawn(move || {
            let mut id = 0;
            while producing.load(Ordering::Acquire) {
                let quad = Quad {
                    id,
                    draws: Arc::clone(&draws),
                };
                if !handle.enqueue(Arc::new(quad)) {
                    break;
                }
                id += 1;
                thread::sleep(SPAWN_INTERVAL);
            }
            id
        })
    };

    let started = Instant::now();
    let mut resized = false;
    let mut escape_sent = false;
    while !window.exit_requested() {
        window.poll_events();

        let elapsed = started.elapsed();
        if !resized && elapsed >= lifetime / 2 {
            window.push_event(WindowEvent::FramebufferResize {
                width: config.window.width.saturating_mul(2),
                height: config.window.height.saturating_mul(2),
            });
            resized = true;
        }
        if !escape_sent && elapsed >= lifetime {
            window.push_event(WindowEvent::key(Key::Escape, Action::Press));
            escape_sent = true;
        }

        thread::sleep(POLL_INTERVAL);
    }

    let fps = worker.fps();
    producing.store(false, Ordering::Release);
    worker.close();
    let outcome = worker.clean_up();

    let enqueued = producer.join().unwrap_or(0);
    tracing::info!(
        fps,
        frames = window.presented_frames(),
        enqueued,
        drawn = draws.load(Ordering::Relaxed),
        size = ?window.size(),
        "demo finished"
    );
    outcome
}
