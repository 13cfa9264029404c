//! RNG module - piece selection
//!
//! The engine never draws randomness itself; it asks a [`PieceSource`] for the
//! next shape. [`UniformSource`] picks each shape independently and uniformly
//! from a seeded PCG generator, so the same seed always yields the same game.
//! [`SequenceSource`] replays a fixed list and is what tests use to pin down
//! exact boards.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::types::ShapeKind;

/// Supplier of the shapes that feed the "next" slot
pub trait PieceSource {
    fn next_shape(&mut self) -> ShapeKind;
}

impl<S: PieceSource + ?Sized> PieceSource for &mut S {
    fn next_shape(&mut self) -> ShapeKind {
        (**self).next_shape()
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_shape(&mut self) -> ShapeKind {
        (**self).next_shape()
    }
}

/// Uniform choice among the seven shapes
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: Pcg32,
    seed: u64,
}

impl UniformSource {
    /// Create a source with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a source seeded from the thread RNG
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this source was created with (for replaying a game)
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for UniformSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl PieceSource for UniformSource {
    fn next_shape(&mut self) -> ShapeKind {
        ShapeKind::ALL[self.rng.random_range(0..ShapeKind::ALL.len())]
    }
}

/// Cycles through a fixed list of shapes
///
/// An empty list yields `T` forever.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    shapes: Vec<ShapeKind>,
    index: usize,
}

impl SequenceSource {
    pub fn new(shapes: impl IntoIterator<Item = ShapeKind>) -> Self {
        Self {
            shapes: shapes.into_iter().collect(),
            index: 0,
        }
    }

    /// A source that only ever yields `kind`
    pub fn repeat(kind: ShapeKind) -> Self {
        Self::new([kind])
    }
}

impl PieceSource for SequenceSource {
    fn next_shape(&mut self) -> ShapeKind {
        let Some(&kind) = self.shapes.get(self.index) else {
            return ShapeKind::T;
        };
        self.index = (self.index + 1) % self.shapes.len();
        kind
    }
}
