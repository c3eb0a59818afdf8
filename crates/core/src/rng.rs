//! RNG module - deterministic brick selection
//!
//! The resolver never picks shapes itself; it asks a [`BrickSource`] handed to
//! it at construction. Two sources ship here:
//!
//! - [`BagSource`]: every shape of the table once per bag, shuffled, then refill
//!   (the "7-bag" rule generalized to any table size)
//! - [`Sequence`]: a fixed cycle of shapes, for scripted games and tests

use crate::shapes::{ShapeId, ShapeTable};

/// Supplies the shape of each newly spawned brick
///
/// The returned id must come from `shapes`, the table passed in. The resolver
/// panics on an id that table does not hold.
pub trait BrickSource {
    fn next_shape(&mut self, shapes: &ShapeTable) -> ShapeId;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Bag randomizer over a whole shape table
#[derive(Debug, Clone)]
pub struct BagSource {
    /// Current bag of shapes
    bag: Vec<ShapeId>,
    /// Index into current bag
    bag_index: usize,
    rng: SimpleRng,
    seed: u32,
}

impl BagSource {
    pub fn new(seed: u32) -> Self {
        Self {
            bag: Vec::new(),
            bag_index: 0,
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    fn shuffled_bag(rng: &mut SimpleRng, shapes: &ShapeTable) -> Vec<ShapeId> {
        let mut bag: Vec<ShapeId> = shapes.ids().collect();
        rng.shuffle(&mut bag);
        bag
    }

    /// Peek at the next shape without consuming it
    pub fn peek(&self, shapes: &ShapeTable) -> ShapeId {
        if let Some(&id) = self.bag.get(self.bag_index) {
            return id;
        }

        // Preview the next bag from a copy of the RNG; the following draw
        // refills from the same state and so yields the same shape.
        let mut preview_rng = self.rng.clone();
        Self::shuffled_bag(&mut preview_rng, shapes)[0]
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Shapes left in the current bag
    pub fn remaining(&self) -> &[ShapeId] {
        &self.bag[self.bag_index.min(self.bag.len())..]
    }
}

impl BrickSource for BagSource {
    fn next_shape(&mut self, shapes: &ShapeTable) -> ShapeId {
        if self.bag_index >= self.bag.len() {
            self.bag = Self::shuffled_bag(&mut self.rng, shapes);
            self.bag_index = 0;
        }

        let id = self.bag[self.bag_index];
        self.bag_index += 1;
        id
    }
}

impl Default for BagSource {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Cycles through a fixed list of shapes
#[derive(Debug, Clone)]
pub struct Sequence {
    ids: Vec<ShapeId>,
    next: usize,
}

impl Sequence {
    /// Panics on an empty list.
    pub fn new(ids: Vec<ShapeId>) -> Self {
        assert!(!ids.is_empty(), "sequence needs at least one shape");
        Self { ids, next: 0 }
    }

    /// Always the same shape
    pub fn repeat(id: ShapeId) -> Self {
        Self::new(vec![id])
    }
}

impl BrickSource for Sequence {
    fn next_shape(&mut self, _shapes: &ShapeTable) -> ShapeId {
        let id = self.ids[self.next];
        self.next = (self.next + 1) % self.ids.len();
        id
    }
}
