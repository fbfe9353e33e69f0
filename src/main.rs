//! Emotion Blob entry point
//!
//! Runs a headless session: the fixed-rate simulation plus a tessellated
//! frame per tick, driven by a recorded key script or the demo autopilot.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use emotion_blob::Settings;
use emotion_blob::input::{KeyScript, KeyState};
use emotion_blob::renderer::{DrawOptions, FrameView, MeshRenderer, draw_frame};
use emotion_blob::sim::{GameEvent, GameState, autopilot, tick};

#[derive(Parser, Debug)]
#[command(name = "emotion-blob", version, about = "Run a headless Emotion Blob session")]
struct Args {
    /// Settings JSON file; missing fields keep their defaults
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for box respawn positions (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,
    /// Number of ticks to run (overrides the settings file)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    ticks: Option<u64>,
    /// Let the demo autopilot play
    #[arg(long, conflicts_with = "replay")]
    autopilot: bool,
    /// Key script to play back, one `<frame> <key> <down|up>` per line
    #[arg(long, value_name = "PATH")]
    replay: Option<PathBuf>,
    /// Print the final state as JSON
    #[arg(long)]
    dump_state: bool,
}

/// What presses the keys
enum Driver {
    Autopilot,
    Script(KeyScript),
}

/// Session totals for the final report
#[derive(Debug, Default)]
struct Stats {
    placements: u32,
    expulsions: u32,
    respawns: u32,
    victories: u32,
}

/// Game instance holding all state
struct Game {
    state: GameState,
    driver: Driver,
    keys: KeyState,
    frame: u64,
    mesh: MeshRenderer,
    draw_options: DrawOptions,
    stats: Stats,
}

impl Game {
    fn new(settings: &Settings, driver: Driver) -> Self {
        Self {
            state: GameState::with_tuning(settings.seed, settings.tuning.clone()),
            driver,
            keys: KeyState::default(),
            frame: 0,
            mesh: MeshRenderer::default(),
            draw_options: settings.draw_options(),
            stats: Stats::default(),
        }
    }

    /// One simulation tick plus one frame
    fn step(&mut self) {
        let input = match &mut self.driver {
            Driver::Autopilot => autopilot::plan(&self.state),
            Driver::Script(script) => {
                script.apply(self.frame, &mut self.keys);
                self.keys.take_tick_input()
            }
        };
        self.frame += 1;

        for event in tick(&mut self.state, &input) {
            self.record(event);
        }

        self.mesh.clear();
        let view = FrameView::from_state(&self.state);
        draw_frame(&view, &self.draw_options, &mut self.mesh);
    }

    fn record(&mut self, event: GameEvent) {
        match event {
            GameEvent::Placed { .. } => self.stats.placements += 1,
            GameEvent::Expelled { .. } => self.stats.expulsions += 1,
            GameEvent::Respawned { .. } => self.stats.respawns += 1,
            GameEvent::Victory => self.stats.victories += 1,
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(ticks) = args.ticks {
        settings.max_ticks = ticks;
    }
    settings.autopilot |= args.autopilot;
    settings.validate()?;

    let driver = match &args.replay {
        Some(path) => {
            let script = KeyScript::load(path)?;
            log::info!("Replaying {} key events from {}", script.events().len(), path.display());
            Driver::Script(script)
        }
        None if settings.autopilot => Driver::Autopilot,
        None => return Err("nothing drives the blob: pass --autopilot or --replay PATH".into()),
    };

    log::info!("Emotion Blob (headless) starting with seed {}", settings.seed);

    let mut game = Game::new(&settings, driver);
    for _ in 0..settings.max_ticks {
        game.step();
    }

    if let Driver::Script(script) = &game.driver {
        if !script.is_finished() {
            log::warn!("Key script still had events after tick {}", settings.max_ticks);
        }
    }

    let view = FrameView::from_state(&game.state);
    log::info!(
        "Ran {} ticks: {} placements, {} expulsions, {} respawns, {} victories",
        settings.max_ticks,
        game.stats.placements,
        game.stats.expulsions,
        game.stats.respawns,
        game.stats.victories,
    );
    log::info!(
        "Last frame: {} triangles, {} text runs, emotions: {}",
        game.mesh.triangle_count(),
        game.mesh.texts.len(),
        view.emotion_list(),
    );

    if args.dump_state {
        println!("{}", serde_json::to_string_pretty(&game.state)?);
    }

    Ok(())
}
