//! Delta-V entry point
//!
//! One logical frame per loop iteration: a bounded input poll, one
//! simulation tick, one full-screen draw, strictly in that order.

use std::time::{Duration, Instant};

use deltav::render::{Compositor, HudLine, Starfield};
use deltav::settings::{Difficulty, Settings};
use deltav::sim::{Command, GameState, TickInput, tick};
use deltav::terminal::{Input, Screen, TerminalError};

fn main() -> Result<(), TerminalError> {
    env_logger::init();

    let config_path = std::env::var("DELTAV_CONFIG").ok();
    let mut settings = Settings::load(config_path.as_deref());

    if let Some(arg) = std::env::args().nth(1) {
        match Difficulty::from_str(&arg) {
            Some(difficulty) => settings.difficulty = difficulty,
            None => {
                eprintln!("usage: deltav [easy|medium|hard]");
                return Ok(());
            }
        }
    }

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    log::info!(
        "starting: seed {seed}, difficulty {}",
        settings.difficulty.as_str()
    );

    let mut screen = Screen::init()?;
    let (term_rows, term_cols) = Screen::size()?;
    // Bottom row is left for the cursor
    let mut rows = term_rows.saturating_sub(1) as i32;
    let mut cols = term_cols as i32;

    let mut state = GameState::new(seed, settings.difficulty, rows, cols);
    let mut stars = Starfield::new(&mut state.rng, cols, settings.star_threshold);

    let timeout = Duration::from_millis(settings.input_timeout_ms);
    let tick_hz = settings.tick_hz();

    loop {
        let frame_start = Instant::now();
        let mut input = TickInput::default();
        match screen.poll(timeout)? {
            Input::Key('q') | Input::Interrupt => break,
            Input::Key(c) => input = TickInput::from_key(c),
            Input::Resize(r, c) => {
                rows = r.saturating_sub(1) as i32;
                cols = c as i32;
                state.resize(rows, cols);
                stars.resize(cols);
            }
            Input::None => {}
        }
        // A keypress returns from the poll early; sleep off the rest of
        // the frame so held keys cannot raise the tick rate
        if let Some(rest) = frame_budget_left(timeout, frame_start.elapsed()) {
            std::thread::sleep(rest);
        }

        tick(&mut state, &input, &settings);
        if matches!(input.command, Some(Command::Restart)) {
            // Each round gets a fresh sky
            stars = Starfield::new(&mut state.rng, cols, settings.star_threshold);
        }

        let hud = build_hud(&state, rows, cols, tick_hz);
        let mut frame = Compositor::new();
        for line in &hud {
            frame.push(line);
        }
        frame.push(&state.crash);
        frame.push(&state.thruster);
        for craft in &state.crafts {
            frame.push(craft);
        }
        frame.push(&stars);

        screen.draw(rows, cols, &frame)?;
    }

    // Restore the terminal before printing the summary
    screen.cleanup()?;
    if !state.playing() {
        println!("SCORE: {}", state.score(tick_hz));
    }
    Ok(())
}

/// Unspent part of the frame budget, or `None` once it is used up.
fn frame_budget_left(budget: Duration, spent: Duration) -> Option<Duration> {
    (spent < budget).then(|| budget - spent)
}

/// Status overlays for the current tick, in draw priority order.
fn build_hud(state: &GameState, rows: i32, cols: i32, tick_hz: f32) -> Vec<HudLine> {
    let mut hud = Vec::new();
    let player = state.player();

    if state.countdown_ticks > 0 {
        let secs = (state.countdown_ticks as f32 / tick_hz).ceil() as u32;
        hud.push(HudLine::centered(
            rows / 2,
            cols / 2,
            format!("Starting in {secs}"),
        ));
    } else if player.docked {
        hud.push(HudLine::centered(
            1,
            cols / 2,
            format!("Docked! Score: {}", state.score(tick_hz)),
        ));
    }

    let elapsed_secs = (state.elapsed_ticks as f32 / tick_hz) as u64;
    hud.push(HudLine::new(
        1,
        1,
        format!(
            "V: {:.2}, {:.2} Time: {elapsed_secs}",
            player.vel.x, player.vel.y
        ),
    ));

    let mut gauge = String::from("Fuel: [");
    for i in 0..10 {
        gauge.push(if player.fuel / 10 > i { '#' } else { ' ' });
    }
    gauge.push(']');
    hud.push(HudLine::new(2, 1, gauge));

    if player.dead {
        hud.push(HudLine::centered(
            rows / 2,
            cols / 2,
            "Craft lost - press r to retry",
        ));
    }

    hud
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_budget_left() {
        let budget = Duration::from_millis(33);
        // An instant keypress leaves nearly the whole frame to sleep off
        assert_eq!(
            frame_budget_left(budget, Duration::from_millis(5)),
            Some(Duration::from_millis(28))
        );
        // A full poll timeout leaves nothing
        assert_eq!(frame_budget_left(budget, budget), None);
        assert_eq!(frame_budget_left(budget, Duration::from_millis(40)), None);
    }
}
