//! Territory name assignment
//!
//! Names are drawn per continent without repetition from the continent's
//! pool. Once a pool is exhausted, names fall back to `"<Continent> <n>"` with
//! `n` counting up from 1. Every pooled pick consumes one draw from the run's
//! generator, so regions must be named in id order.

use std::collections::HashSet;

use rand::Rng;

use crate::config::ContinentDefinition;

#[derive(Debug, Clone, Default)]
struct ContinentNames {
    used: HashSet<String>,
    overflow: usize,
}

/// Hands out display names for one generation run
#[derive(Debug, Clone, Default)]
pub struct NameAssigner {
    continents: Vec<ContinentNames>,
}

impl NameAssigner {
    /// Create an assigner for `continent_count` continents, all pools unused
    pub fn new(continent_count: usize) -> Self {
        Self {
            continents: vec![ContinentNames::default(); continent_count],
        }
    }

    /// Name the region `region_id` of continent `continent`
    ///
    /// A continent with an empty pool yields `"<Continent> Territory <id>"`
    /// without consuming a draw.
    pub fn assign<R: Rng + ?Sized>(
        &mut self,
        continent: usize,
        definition: &ContinentDefinition,
        region_id: usize,
        rng: &mut R,
    ) -> String {
        if definition.name_pool.is_empty() {
            return format!("{} Territory {}", definition.name, region_id);
        }
        if continent >= self.continents.len() {
            self.continents.resize_with(continent + 1, ContinentNames::default);
        }
        let state = &mut self.continents[continent];

        let available: Vec<&String> = definition
            .name_pool
            .iter()
            .filter(|name| !state.used.contains(name.as_str()))
            .collect();

        let name = if available.is_empty() {
            loop {
                state.overflow += 1;
                let candidate = format!("{} {}", definition.name, state.overflow);
                if !state.used.contains(&candidate) {
                    break candidate;
                }
            }
        } else {
            available[rng.gen_range(0..available.len())].clone()
        };
        state.used.insert(name.clone());
        name
    }

    /// Number of names handed out so far for a continent
    pub fn used_count(&self, continent: usize) -> usize {
        self.continents
            .get(continent)
            .map(|c| c.used.len())
            .unwrap_or(0)
    }
}
