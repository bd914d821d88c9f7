//! Frame-rate counter
//!
//! Observational only: nothing in the simulation reads it.

use crate::consts::FPS_WINDOW_MS;

#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    /// Frames counted in the current window
    frames: u32,
    /// Start of the current window, `None` until the first frame
    window_start_ms: Option<u64>,
    /// Frames counted in the last completed window
    fps: u32,
}

impl FpsCounter {
    /// Count one frame at clock time `now_ms`
    pub fn frame(&mut self, now_ms: u64) {
        let start = *self.window_start_ms.get_or_insert(now_ms);
        self.frames += 1;
        if now_ms.saturating_sub(start) >= FPS_WINDOW_MS {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start_ms = Some(now_ms);
        }
    }

    /// Frames per second over the last completed window
    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
