//! Scene assembly
//!
//! Turns a read-only [`GameState`] into a vertex list in arena coordinates.
//! Sprites normally render as DOM images over the canvas; a sprite whose
//! image failed to load is drawn here as a solid quad instead.

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{GameState, Rect};
use glam::Vec2;

/// Which sprites need a GPU fallback quad
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneOptions {
    pub player_fallback: bool,
    pub professor_fallback: bool,
}

const BLOCK_EDGE_THICKNESS: f32 = 2.0;

pub fn build_scene(state: &GameState, options: &SceneOptions) -> Vec<Vertex> {
    let arena = Rect::new(
        0.0,
        0.0,
        state.config.arena_width,
        state.config.arena_height,
    );

    let mut vertices = Vec::with_capacity(6 + state.blocks.len() * 30 + 18);
    vertices.extend(shapes::rect(&arena, colors::BACKGROUND));

    for block in &state.blocks {
        let r = block.rect();
        vertices.extend(shapes::rect(&r, block.grade.color()));
        vertices.extend(shapes::rect_outline(
            &r,
            BLOCK_EDGE_THICKNESS,
            colors::BLOCK_EDGE,
        ));
    }

    if options.professor_fallback {
        vertices.extend(shapes::rect(
            &state.professor.rect(),
            colors::PROFESSOR_FALLBACK,
        ));
    }
    if options.player_fallback {
        vertices.extend(shapes::rect(&state.player.rect(), colors::PLAYER_FALLBACK));
    }

    if state.is_terminal() {
        vertices.extend(shapes::rect(&arena, colors::OVERLAY));
    }

    vertices
}

/// Grade text centered on a falling block, drawn as DOM text over the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockLabel {
    /// Arena coordinates
    pub center: Vec2,
    pub text: &'static str,
}

/// Font size of block labels at arena scale
pub const BLOCK_LABEL_FONT_PX: f32 = 16.0;

pub fn block_labels(state: &GameState) -> Vec<BlockLabel> {
    state
        .blocks
        .iter()
        .map(|block| BlockLabel {
            center: block.rect().center(),
            text: block.grade.label(),
        })
        .collect()
}
