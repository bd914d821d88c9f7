//! Headless play on a simulated clock
//!
//! Drives the simulation at exactly `FRAME_RATE` ticks per simulated second
//! with the autopilot at the controls. Used by the native binary and by
//! determinism tests.

use crate::consts::FRAME_RATE;
use crate::sim::{GameState, autopilot_input, tick};

/// Clock reading for a frame number on the simulated 60 FPS clock
#[inline]
pub fn frame_time_ms(frame: u64) -> u64 {
    frame * 1000 / FRAME_RATE as u64
}

/// Play one autopilot game from `seed` until game over or `max_frames`
pub fn play(seed: u64, max_frames: u64) -> GameState {
    let mut state = GameState::new(seed);
    for frame in 0..max_frames {
        if state.is_game_over() {
            break;
        }
        let input = autopilot_input(&state, frame_time_ms(frame));
        tick(&mut state, &input);
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_time() {
        assert_eq!(frame_time_ms(0), 0);
        assert_eq!(frame_time_ms(60), 1000);
        assert_eq!(frame_time_ms(90), 1500);
    }

    #[test]
    fn test_determinism() {
        let a = play(99999, 3000);
        let b = play(99999, 3000);
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.player, b.player);
    }

    #[test]
    fn test_autopilot_scores() {
        let state = play(7, 60 * 30);
        assert!(state.score > 0);
    }
}
