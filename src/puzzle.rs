//! One puzzle instance: a single target draw shared by both images.

use log::debug;
use rand::Rng;

use crate::canvas::Canvas;
use crate::config::{PuzzleConfig, RenderMode};
use crate::error::Result;
use crate::font::FontSet;
use crate::render::render_puzzle;
use crate::target::{select_target, TargetPosition};

/// Question and answer images for the same target.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzlePair {
    pub target: TargetPosition,
    pub question: Canvas,
    pub answer: Canvas,
}

pub struct Puzzle;

impl Puzzle {
    /// Validate `config`, draw the target once, and render both images
    /// with it.
    pub fn generate<R: Rng + ?Sized>(
        config: &PuzzleConfig,
        fonts: &FontSet,
        rng: &mut R,
    ) -> Result<PuzzlePair> {
        let layout = config.validate()?;
        let target = select_target(rng, layout.rows, layout.cols)?;
        debug!("selected target at {target}");
        Self::render_pair(config, fonts, target)
    }

    /// Render both images for a known target.
    pub fn render_pair(
        config: &PuzzleConfig,
        fonts: &FontSet,
        target: TargetPosition,
    ) -> Result<PuzzlePair> {
        Ok(PuzzlePair {
            target,
            question: render_puzzle(config, fonts, target, RenderMode::Question)?,
            answer: render_puzzle(config, fonts, target, RenderMode::Answer)?,
        })
    }
}
