//! Cargo carried by a convoy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a kind of cargo, as demanded by service points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CargoType(pub u16);

impl fmt::Display for CargoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cargo#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoUnit {
    pub kind: CargoType,
}

impl CargoUnit {
    pub fn new(kind: CargoType) -> Self {
        Self { kind }
    }
}

/// Ordered cargo inventory.
///
/// Order only matters for slot layout; the simulation treats cargo as a
/// multiset of types.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cargo {
    units: Vec<CargoUnit>,
}

impl Cargo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn contains(&self, kind: CargoType) -> bool {
        self.units.iter().any(|unit| unit.kind == kind)
    }

    pub fn count_of(&self, kind: CargoType) -> usize {
        self.units.iter().filter(|unit| unit.kind == kind).count()
    }

    pub fn push(&mut self, unit: CargoUnit) {
        self.units.push(unit);
    }

    /// Remove the first unit of `kind`.
    pub fn take(&mut self, kind: CargoType) -> Option<CargoUnit> {
        let index = self.units.iter().position(|unit| unit.kind == kind)?;
        Some(self.units.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CargoUnit> {
        self.units.iter()
    }

    pub fn as_slice(&self) -> &[CargoUnit] {
        &self.units
    }
}

impl FromIterator<CargoUnit> for Cargo {
    fn from_iter<I: IntoIterator<Item = CargoUnit>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().collect(),
        }
    }
}

impl Extend<CargoUnit> for Cargo {
    fn extend<I: IntoIterator<Item = CargoUnit>>(&mut self, iter: I) {
        self.units.extend(iter);
    }
}
