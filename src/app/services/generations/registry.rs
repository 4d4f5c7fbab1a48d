//! Static year to generation lookup
//!
//! The registry is built once on first use and never changes afterwards.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::{Baac2005, Baac2019, GenerationReader};
use crate::constants::{
    BAAC_2005_FIRST_YEAR, BAAC_2005_LAST_YEAR, BAAC_2019_FIRST_YEAR, BAAC_2019_LAST_YEAR,
};
use crate::{Error, Result};

static BAAC_2005: Baac2005 = Baac2005;
static BAAC_2019: Baac2019 = Baac2019;

static REGISTRY: LazyLock<GenerationRegistry> = LazyLock::new(GenerationRegistry::build);

/// Process-wide registry of supported years
pub fn registry() -> &'static GenerationRegistry {
    &REGISTRY
}

/// Mapping from each supported year to the generation that reads it
pub struct GenerationRegistry {
    readers: BTreeMap<u16, &'static dyn GenerationReader>,
}

impl GenerationRegistry {
    fn build() -> Self {
        let mut readers: BTreeMap<u16, &'static dyn GenerationReader> = BTreeMap::new();

        for year in BAAC_2005_FIRST_YEAR..=BAAC_2005_LAST_YEAR {
            readers.insert(year, &BAAC_2005);
        }
        for year in BAAC_2019_FIRST_YEAR..=BAAC_2019_LAST_YEAR {
            readers.insert(year, &BAAC_2019);
        }

        Self { readers }
    }

    /// Generation reading `year`, or [`Error::UnsupportedYear`]
    pub fn reader_for(&self, year: u16) -> Result<&'static dyn GenerationReader> {
        self.readers
            .get(&year)
            .copied()
            .ok_or_else(|| Error::unsupported_year(year))
    }

    pub fn supports(&self, year: u16) -> bool {
        self.readers.contains_key(&year)
    }

    /// Supported years in ascending order
    pub fn years(&self) -> impl Iterator<Item = u16> + '_ {
        self.readers.keys().copied()
    }

    pub fn first_year(&self) -> u16 {
        self.readers
            .keys()
            .next()
            .copied()
            .unwrap_or(BAAC_2005_FIRST_YEAR)
    }

    pub fn last_year(&self) -> u16 {
        self.readers
            .keys()
            .next_back()
            .copied()
            .unwrap_or(BAAC_2019_LAST_YEAR)
    }
}

impl std::fmt::Debug for GenerationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationRegistry")
            .field("first_year", &self.first_year())
            .field("last_year", &self.last_year())
            .finish()
    }
}
