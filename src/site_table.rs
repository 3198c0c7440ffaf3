//! The site table.
//!
//! One row per site; `num_sites` is fixed at [`crate::builder::alloc`]
//! time from the input table collection's allele column, and the
//! ancestral state is always `"0"` by construction (`spec.md` §4.7: "the
//! site's ancestral state is 0 by construction").

use crate::newtypes::{Position, SiteId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteTableRow {
    pub id: SiteId,
    pub position: Position,
    pub ancestral_state: String,
}

#[derive(Debug, Default)]
pub struct SiteTable {
    num_sites: usize,
}

impl SiteTable {
    pub fn new(num_sites: usize) -> Self {
        Self { num_sites }
    }

    pub fn num_rows(&self) -> usize {
        self.num_sites
    }

    pub fn is_valid(&self, site: SiteId) -> bool {
        site.to_usize().is_some_and(|i| i < self.num_sites)
    }

    pub fn row(&self, site: SiteId) -> Option<SiteTableRow> {
        let idx = site.to_usize()?;
        if idx >= self.num_sites {
            return None;
        }
        Some(SiteTableRow {
            id: site,
            position: Position::from(idx),
            ancestral_state: "0".to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = SiteTableRow> + '_ {
        (0..self.num_sites).map(|i| SiteTableRow {
            id: SiteId::from(i),
            position: Position::from(i),
            ancestral_state: "0".to_string(),
        })
    }
}
