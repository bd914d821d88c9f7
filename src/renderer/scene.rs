//! Per-frame draw requests
//!
//! Turns a [`GameState`] into colored rectangles and text items. The GPU
//! pipeline draws the rectangles; the platform layer places the text.

use glam::Vec2;

use super::vertex::Palette;
use crate::Rect;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::settings::Settings;
use crate::sim::GameState;

/// A filled axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColoredRect {
    pub rect: Rect,
    pub color: [f32; 4],
}

/// Which HUD element a text item fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSlot {
    Score,
    Lives,
    Fps,
    GameOverTitle,
    FinalScore,
    HighScoreRank,
    RestartHint,
}

impl TextSlot {
    /// DOM element id for this slot
    pub fn element_id(&self) -> &'static str {
        match self {
            TextSlot::Score => "hud-score",
            TextSlot::Lives => "hud-lives",
            TextSlot::Fps => "hud-fps",
            TextSlot::GameOverTitle => "game-over-title",
            TextSlot::FinalScore => "final-score",
            TextSlot::HighScoreRank => "high-score-rank",
            TextSlot::RestartHint => "restart-hint",
        }
    }
}

/// A line of text at a play-field position
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub slot: TextSlot,
    pub content: String,
    pub pos: Vec2,
    pub color: [f32; 4],
}

/// Everything drawn in one frame, in draw order
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub clear_color: [f32; 4],
    pub rects: Vec<ColoredRect>,
    pub texts: Vec<TextItem>,
}

impl Scene {
    pub fn text(&self, slot: TextSlot) -> Option<&str> {
        self.texts
            .iter()
            .find(|t| t.slot == slot)
            .map(|t| t.content.as_str())
    }
}

/// Build the scene for the current state. `rank` is the leaderboard position
/// the finished run reached, if any.
pub fn build_scene(state: &GameState, settings: &Settings, rank: Option<usize>) -> Scene {
    let palette = Palette::for_settings(settings.high_contrast);
    let mut scene = Scene {
        clear_color: palette.background,
        rects: Vec::with_capacity(1 + state.bullets.capacity() + state.enemies.capacity()),
        texts: Vec::with_capacity(4),
    };

    let mut text = |slot, content: String, x: f32, y: f32| {
        scene.texts.push(TextItem {
            slot,
            content,
            pos: Vec2::new(x, y),
            color: palette.text,
        });
    };

    if state.is_game_over() {
        let mid_x = SCREEN_WIDTH / 2.0;
        let mid_y = SCREEN_HEIGHT / 2.0;
        text(TextSlot::GameOverTitle, "Game Over".to_string(), mid_x - 100.0, mid_y - 50.0);
        text(
            TextSlot::FinalScore,
            format!("Final Score: {}", state.score),
            mid_x - 80.0,
            mid_y + 20.0,
        );
        if let Some(rank) = rank {
            text(
                TextSlot::HighScoreRank,
                format!("New high score! Rank #{}", rank),
                mid_x - 110.0,
                mid_y + 60.0,
            );
        }
        text(
            TextSlot::RestartHint,
            "Press R to restart".to_string(),
            mid_x - 90.0,
            mid_y + 100.0,
        );
        return scene;
    }

    text(TextSlot::Score, format!("Score: {}", state.score), 10.0, 10.0);
    text(TextSlot::Lives, format!("Lives: {}", state.lives), 10.0, 50.0);
    if settings.show_fps {
        text(
            TextSlot::Fps,
            format!("FPS: {}", state.fps.fps()),
            SCREEN_WIDTH - 100.0,
            10.0,
        );
    }

    scene.rects.push(ColoredRect {
        rect: state.player.rect(),
        color: palette.player,
    });
    scene.rects.extend(state.bullets.iter_active().map(|(_, b)| ColoredRect {
        rect: b.rect(),
        color: palette.bullet,
    }));
    scene.rects.extend(state.enemies.iter_active().map(|(_, e)| ColoredRect {
        rect: e.rect(),
        color: palette.enemy,
    }));

    scene
}
