//! Where cargo is drawn on the convoy.
//!
//! Purely cosmetic. The simulation never reads these values; a renderer asks
//! which unit holds a cargo unit and where on that unit's sprite it sits,
//! given the direction the unit is facing.

use crate::path::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;

/// Sprite grid units per world unit.
const PIXELS_PER_UNIT: f32 = 16.0;

/// Draw order of the front row of cargo.
const FRONT_SORTING_ORDER: i32 = 10;

/// One of eight compass headings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Heading {
    /// Counter-clockwise from east, matching the octant order of `atan2`.
    const OCTANTS: [Heading; 8] = [
        Heading::East,
        Heading::NorthEast,
        Heading::North,
        Heading::NorthWest,
        Heading::West,
        Heading::SouthWest,
        Heading::South,
        Heading::SouthEast,
    ];

    /// The heading nearest to `direction`, or `None` for a zero or
    /// non-finite vector.
    pub fn from_vector(direction: Vec2) -> Option<Self> {
        if !direction.x.is_finite() || !direction.y.is_finite() || direction.length() == 0.0 {
            return None;
        }
        let octant = (direction.y.atan2(direction.x) / FRAC_PI_4).round() as i32;
        Some(Self::OCTANTS[octant.rem_euclid(8) as usize])
    }

    /// Unit grid offset `(x, y)` of the heading.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Heading::East => (1, 0),
            Heading::NorthEast => (1, 1),
            Heading::North => (0, 1),
            Heading::NorthWest => (-1, 1),
            Heading::West => (-1, 0),
            Heading::SouthWest => (-1, -1),
            Heading::South => (0, -1),
            Heading::SouthEast => (1, -1),
        }
    }

    fn rule(&self) -> SlotRule {
        match self {
            Heading::East => SlotRule::new(3, (-5, -1), 0),
            Heading::West => SlotRule::new(3, (1, -1), 0),
            Heading::North => SlotRule::new(2, (-1, -4), 0),
            Heading::South => SlotRule::new(2, (-1, 1), 0),
            Heading::NorthEast => SlotRule::new(3, (-4, -4), 1),
            Heading::SouthWest => SlotRule::new(3, (0, -1), 1),
            Heading::SouthEast => SlotRule::new(3, (-4, 3), -1),
            Heading::NorthWest => SlotRule::new(3, (0, 0), -1),
        }
    }
}

/// Grid arrangement for one heading. Diagonal headings shear each column
/// up or down by `skew` rows.
#[derive(Clone, Copy, Debug)]
struct SlotRule {
    columns: usize,
    origin: (i32, i32),
    skew: i32,
}

impl SlotRule {
    const fn new(columns: usize, origin: (i32, i32), skew: i32) -> Self {
        Self {
            columns,
            origin,
            skew,
        }
    }

    fn place(&self, slot: usize) -> CargoSlot {
        let column = (slot % self.columns) as i32;
        let row = (slot / self.columns) as i32;
        let x = self.origin.0 + column * 2;
        let y = self.origin.1 + row * 2 + self.skew * column * 2;

        CargoSlot {
            offset: Vec2::new(x as f32 / PIXELS_PER_UNIT, y as f32 / PIXELS_PER_UNIT),
            sorting_order: FRONT_SORTING_ORDER - row,
        }
    }
}

/// Placement of a cargo unit relative to the unit carrying it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CargoSlot {
    pub offset: Vec2,
    pub sorting_order: i32,
}

/// The unit a cargo unit is drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Holder {
    Lead,
    /// Trailing unit by 0-based position behind the lead.
    Trailing(usize),
}

/// Maps cargo indices to holders and slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CargoLayout {
    cargo_per_unit: usize,
}

impl CargoLayout {
    /// Returns `None` when `cargo_per_unit` is zero.
    pub fn new(cargo_per_unit: usize) -> Option<Self> {
        (cargo_per_unit > 0).then_some(Self { cargo_per_unit })
    }

    pub fn cargo_per_unit(&self) -> usize {
        self.cargo_per_unit
    }

    /// Which unit draws cargo unit `index`, and its slot on that unit.
    pub fn holder(&self, index: usize) -> (Holder, usize) {
        let slot = index % self.cargo_per_unit;
        match index / self.cargo_per_unit {
            0 => (Holder::Lead, slot),
            unit => (Holder::Trailing(unit - 1), slot),
        }
    }

    /// Full placement of cargo unit `index` when its holder faces `heading`.
    pub fn place(&self, index: usize, heading: Heading) -> (Holder, CargoSlot) {
        let (holder, slot) = self.holder(index);
        (holder, slot_for(heading, slot))
    }
}

/// Slot `slot` on a unit facing `heading`.
pub fn slot_for(heading: Heading, slot: usize) -> CargoSlot {
    heading.rule().place(slot)
}
