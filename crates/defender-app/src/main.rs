use tracing::{info, warn};

use defender_app::autopilot::Autopilot;
use defender_app::config::AppConfig;
use defender_app::game_loop::{self, Pacing};
use defender_app::persistence::{self, JsonFileStore};
use defender_core::highscores::HighScoreStore;
use defender_sim::engine::{SimConfig, SimulationEngine};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn main() {
    init_tracing();

    let config = AppConfig::from_env();
    info!(
        seed = config.seed,
        max_frames = ?config.max_frames,
        highscores = %config.highscore_path.display(),
        fast_missiles = config.fast_missiles,
        "defender starting"
    );

    let store = JsonFileStore::new(&config.highscore_path);
    let scores = persistence::load_or_empty(&store);

    let mut engine = SimulationEngine::new(SimConfig {
        seed: config.seed,
        tuning: config.tuning(),
    })
    .with_high_scores(scores);

    let mut pilot = Autopilot::new();
    let summary = game_loop::run(&mut engine, &mut pilot, config.max_frames, Pacing::RealTime);
    info!(
        frames = summary.frames,
        phase = ?summary.phase,
        score = summary.score,
        landers_destroyed = summary.landers_destroyed,
        loss_reason = ?summary.loss_reason,
        "run finished"
    );

    if !engine.can_submit_high_score() {
        return;
    }
    if !engine.high_scores().qualifies(summary.score) {
        info!(score = summary.score, "score did not make the table");
        return;
    }
    match engine.submit_high_score(&config.player_name) {
        Some(rank) => info!(rank = rank + 1, "new high score"),
        None => warn!("qualifying score was not ranked"),
    }
    if let Err(e) = store.save(engine.high_scores().entries()) {
        warn!(error = %e, "could not save high scores");
    }
}
