//! Host control loop.

use crate::cli::Command;
use crate::clock::{Clock, Delay, SystemClock, ThreadDelay};
use crate::config::LedtoeConfig;
use crate::controller::GameController;
use crate::input::{ClapArbiter, ClapSettings, InputSource, JoystickArbiter};
use crate::render::{Palette, RenderSink, TerminalSink};
use crate::sim::KeyboardSensors;
use anyhow::{Context, Result};
use ledtoe_tictactoe::{HeuristicAi, MoveStrategy};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info, instrument};

const JOYSTICK_HELP: &str = "arrows move | Enter confirm | r reset | q quit";
const MIC_HELP: &str = "Space clap (1 = next, 2+ = confirm) | r reset | q quit";

/// Builds the game for the chosen modality and runs it until the user quits.
#[instrument(skip(config))]
pub fn run(command: Command, config: &LedtoeConfig, seed: Option<u64>) -> Result<()> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random::<u64>()),
    };
    let ai = HeuristicAi::new(rng);
    let keys = KeyboardSensors::new();

    let mut input: Box<dyn InputSource> = match command {
        Command::Joystick => Box::new(JoystickArbiter::new(keys.clone(), config.joystick())),
        Command::Mic => Box::new(ClapArbiter::new(
            keys.clone(),
            ClapSettings::from(config.microphone()),
        )),
    };
    let help = match command {
        Command::Joystick => JOYSTICK_HELP,
        Command::Mic => MIC_HELP,
    };

    let sink = TerminalSink::enter(Palette::default(), help)
        .context("Failed to initialize terminal")?;
    let mut game = GameController::new(sink, ThreadDelay, ai, config);

    let result = play(&mut game, input.as_mut(), &keys, config);

    if let Err(e) = game.sink_mut().restore() {
        error!(error = %e, "Failed to restore terminal");
    }
    result
}

/// Fixed-rate cooperative loop: pump keys, step the game, sleep.
fn play<R, D, S>(
    game: &mut GameController<R, D, S>,
    input: &mut dyn InputSource,
    keys: &KeyboardSensors,
    config: &LedtoeConfig,
) -> Result<()>
where
    R: RenderSink,
    D: Delay,
    S: MoveStrategy,
{
    let clock = SystemClock::new();
    let mut pacing = ThreadDelay;
    let poll_interval = *config.game().poll_interval_ms();

    game.render();
    info!(poll_interval, "Game loop started");

    loop {
        keys.pump().context("Failed to read terminal events")?;
        if keys.quit_requested() {
            return Ok(());
        }
        game.step(clock.now_ms(), input);
        pacing.delay_ms(poll_interval);
    }
}
