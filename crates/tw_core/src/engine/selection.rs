//! Selection Engine
//!
//! Draws the (body part, side, color) triple for a finished spin. The
//! (body part, side) pair never immediately repeats: the selector remembers
//! the previous pair and removes it from the candidate set before drawing
//! uniformly. Colors are drawn independently and may repeat.

use rand::Rng;

use crate::config::{BodyPart, BodyPartId, ColorDef, GameConfig, Side, SideId};

/// The triple chosen for one completed spin. Immutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub body_part: BodyPart,
    pub side: Side,
    pub color: ColorDef,
}

/// Stateful selector owning the last-pair memory.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    last_pair: Option<(BodyPartId, SideId)>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The (body part, side) pair of the previous selection, if any.
    pub fn last_pair(&self) -> Option<(BodyPartId, SideId)> {
        self.last_pair
    }

    /// Draw the next selection.
    ///
    /// Enumerates the Cartesian product of body parts and sides, removes the
    /// remembered pair, and picks uniformly among the rest; the color is an
    /// independent uniform draw over the full color set. The candidate set is
    /// never empty for a validated [`GameConfig`] (at least two pairs).
    pub fn next_selection<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) -> Selection {
        let mut candidates: Vec<(usize, usize)> =
            Vec::with_capacity(config.body_parts.len() * config.sides.len());

        for (part_idx, part) in config.body_parts.iter().enumerate() {
            for (side_idx, side) in config.sides.iter().enumerate() {
                if self.last_pair == Some((part.id, side.id)) {
                    continue;
                }
                candidates.push((part_idx, side_idx));
            }
        }

        let (part_idx, side_idx) = candidates[rng.gen_range(0..candidates.len())];
        let body_part = config.body_parts[part_idx].clone();
        let side = config.sides[side_idx];
        let color = config.colors[rng.gen_range(0..config.colors.len())].clone();

        self.last_pair = Some((body_part.id, side.id));

        Selection { body_part, side, color }
    }
}
