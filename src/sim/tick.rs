//! Fixed timestep simulation tick
//!
//! Per-tick orchestration: countdown gating, command application, craft
//! integration, the pairwise docking/crash state machine and particle pool
//! stepping. Deterministic for a given state and input sequence.

use super::collision::overlap;
use super::state::GameState;
use crate::consts::THRUST_IMPULSE;
use crate::settings::Settings;

/// A single-key command, consumed at most once per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Axis thrust impulse, already scaled to world units per tick
    Thrust(f32, f32),
    /// Force-dead with a crash burst
    SelfDestruct,
    /// Rebuild the round
    Restart,
}

impl Command {
    /// Map a pressed key to a command; unrecognized keys are ignored.
    pub fn from_key(key: char) -> Option<Self> {
        let imp = THRUST_IMPULSE;
        match key {
            'i' | 'w' => Some(Self::Thrust(0.0, imp)),
            'k' | 's' => Some(Self::Thrust(0.0, -imp)),
            'j' | 'a' => Some(Self::Thrust(imp, 0.0)),
            'l' | 'd' => Some(Self::Thrust(-imp, 0.0)),
            'b' => Some(Self::SelfDestruct),
            'r' => Some(Self::Restart),
            _ => None,
        }
    }
}

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub command: Option<Command>,
}

impl TickInput {
    pub fn from_key(key: char) -> Self {
        Self {
            command: Command::from_key(key),
        }
    }
}

enum PairOutcome {
    Dock { mover: usize, target: usize },
    Crash(usize, usize),
}

/// Advance the world by one fixed tick.
pub fn tick(state: &mut GameState, input: &TickInput, settings: &Settings) {
    if matches!(input.command, Some(Command::Restart)) {
        state.restart();
        return;
    }

    // Pre-round countdown gates all physics
    if state.countdown_ticks > 0 {
        state.countdown_ticks -= 1;
        return;
    }

    state.elapsed_ticks += 1;

    match input.command {
        Some(Command::Thrust(dx, dy)) => {
            let GameState {
                crafts,
                thruster,
                rng,
                ..
            } = state;
            crafts[0].apply_thrust(dx, dy, thruster, rng);
        }
        Some(Command::SelfDestruct) => {
            if !state.crafts[0].dead {
                state.crafts[0].dead = true;
                state.spawn_crash_for(0);
            }
        }
        _ => {}
    }

    // Integrate every craft; dead hulls keep drifting as debris
    for craft in &mut state.crafts {
        craft.integrate();
    }

    // Evaluate every ordered pair against the integrated positions, then
    // apply outcomes. A pair that docks is terminal for this tick; a crash
    // kills both sides, so the mirrored pair is skipped on apply.
    let mut outcomes = Vec::new();
    let n = state.crafts.len();
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let (a, b) = (&state.crafts[i], &state.crafts[j]);
            if overlap(a, b, true) {
                if a.vel.x < settings.dock_tol_x && a.vel.y.abs() < settings.dock_tol_y {
                    outcomes.push(PairOutcome::Dock {
                        mover: i,
                        target: j,
                    });
                } else {
                    outcomes.push(PairOutcome::Crash(i, j));
                }
            } else if overlap(a, b, false) {
                outcomes.push(PairOutcome::Crash(i, j));
            }
        }
    }

    for outcome in outcomes {
        match outcome {
            PairOutcome::Dock { mover, target } => {
                if state.crafts[mover].dead || state.crafts[target].dead {
                    continue;
                }
                // Mover inherits the target's velocity; both latch docked
                state.crafts[mover].vel = state.crafts[target].vel;
                state.crafts[mover].docked = true;
                state.crafts[target].docked = true;
            }
            PairOutcome::Crash(i, j) => {
                if state.crafts[i].dead || state.crafts[j].dead {
                    continue;
                }
                state.crafts[i].dead = true;
                state.crafts[j].dead = true;
                state.spawn_crash_for(i);
                state.spawn_crash_for(j);
            }
        }
    }

    if state.crafts[0].docked && state.finish_tick.is_none() {
        state.finish_tick = Some(state.elapsed_ticks);
    }

    state.thruster.step();
    state.crash.step();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::craft::{Craft, GlyphGrid};
    use crate::Settings;
    use glam::Vec2;

    /// A fresh round with the countdown already burned off and the crafts
    /// replaced by a controlled player/station pair.
    fn rigged_state(player_pos: Vec2, player_vel: Vec2, station_pos: Vec2) -> GameState {
        let mut state = GameState::new(1, crate::Difficulty::Easy, 40, 120);
        state.countdown_ticks = 0;

        // Single-port crafts make overlap geometry easy to reason about
        let mut player = Craft::new(GlyphGrid::from_rows(&["#:#"]), player_pos);
        player.vel = player_vel;
        player.fuel = 50;
        let station = Craft::new(GlyphGrid::from_rows(&["#:#"]), station_pos);
        state.crafts = vec![player, station];
        state
    }

    #[test]
    fn test_countdown_gates_physics() {
        let settings = Settings::default();
        let mut state = GameState::new(3, crate::Difficulty::Easy, 24, 80);
        let pos_before = state.player().pos;
        let countdown = state.countdown_ticks;

        tick(&mut state, &TickInput::default(), &settings);
        assert_eq!(state.countdown_ticks, countdown - 1);
        assert_eq!(state.player().pos, pos_before);
        assert_eq!(state.elapsed_ticks, 0);
    }

    #[test]
    fn test_safe_docking() {
        let settings = Settings::default();
        // Ports coincident, approach inside the docking envelope
        let mut state = rigged_state(
            Vec2::new(20.0, 10.0),
            Vec2::new(0.005, 0.02),
            Vec2::new(20.0, 10.0),
        );

        tick(&mut state, &TickInput::default(), &settings);

        assert!(state.crafts[0].docked);
        assert!(state.crafts[1].docked);
        assert_eq!(state.crafts[0].vel, state.crafts[1].vel);
        assert!(!state.playing());
        assert_eq!(state.finish_tick, Some(1));
    }

    #[test]
    fn test_hot_approach_on_port_is_a_crash() {
        let settings = Settings::default();
        // Ports coincide right after integration, but far too fast
        let mut state = rigged_state(
            Vec2::new(19.5, 9.5),
            Vec2::new(0.5, 0.5),
            Vec2::new(20.0, 10.0),
        );

        tick(&mut state, &TickInput::default(), &settings);

        assert!(state.crafts[0].dead);
        assert!(state.crafts[1].dead);
        assert!(!state.crafts[0].docked);
        // One burst per craft, one particle per occupied cell
        assert_eq!(state.crash.live_count(), 6);
    }

    #[test]
    fn test_hull_contact_is_a_crash() {
        let settings = Settings::default();
        // Hull cells overlap, ports do not; velocity inside the envelope
        let mut state = rigged_state(
            Vec2::new(21.0, 10.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(20.0, 10.0),
        );

        tick(&mut state, &TickInput::default(), &settings);

        assert!(state.crafts[0].dead);
        assert!(state.crafts[1].dead);
        assert_eq!(state.crash.live_count(), 6);
    }

    #[test]
    fn test_thrust_command_reaches_player() {
        let settings = Settings::default();
        let mut state = rigged_state(
            Vec2::new(20.0, 30.0),
            Vec2::ZERO,
            Vec2::new(60.0, 5.0),
        );
        let input = TickInput::from_key('j');

        tick(&mut state, &input, &settings);
        assert_eq!(state.player().vel, Vec2::new(THRUST_IMPULSE, 0.0));
        assert_eq!(state.player().fuel, 49);
        assert!(state.thruster.live_count() > 0);
    }

    #[test]
    fn test_self_destruct() {
        let settings = Settings::default();
        let mut state = rigged_state(
            Vec2::new(20.0, 30.0),
            Vec2::ZERO,
            Vec2::new(60.0, 5.0),
        );
        let input = TickInput::from_key('b');

        tick(&mut state, &input, &settings);
        assert!(state.player().dead);
        assert_eq!(state.crash.live_count(), 3);

        // A second press does not burst again
        tick(&mut state, &input, &settings);
        assert_eq!(state.crash.live_count(), 3);
    }

    #[test]
    fn test_restart_key_rebuilds_round() {
        let settings = Settings::default();
        let mut state = rigged_state(
            Vec2::new(20.0, 30.0),
            Vec2::ZERO,
            Vec2::new(60.0, 5.0),
        );
        state.crafts[0].dead = true;
        state.elapsed_ticks = 42;

        tick(&mut state, &TickInput::from_key('r'), &settings);
        assert!(!state.player().dead);
        assert_eq!(state.elapsed_ticks, 0);
        assert_eq!(state.countdown_ticks, crate::consts::COUNTDOWN_TICKS);
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        assert_eq!(Command::from_key('z'), None);
        assert_eq!(Command::from_key('Q'), None);
    }

    #[test]
    fn test_determinism_across_identical_runs() {
        let settings = Settings::default();
        let mut a = GameState::new(4242, crate::Difficulty::Medium, 24, 80);
        let mut b = GameState::new(4242, crate::Difficulty::Medium, 24, 80);

        let keys = ['i', 'i', 'j', 'k', 'l', 'w', 'a'];
        for round in 0..200 {
            let input = TickInput::from_key(keys[round % keys.len()]);
            tick(&mut a, &input, &settings);
            tick(&mut b, &input, &settings);
        }

        assert_eq!(a.player().pos, b.player().pos);
        assert_eq!(a.player().vel, b.player().vel);
        assert_eq!(a.player().fuel, b.player().fuel);
        assert_eq!(a.thruster.live_count(), b.thruster.live_count());
    }
}
