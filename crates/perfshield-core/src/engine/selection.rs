//! Rules for replacing the incumbent best candidate during a search.
//!
//! A policy only answers "does `candidate` beat `incumbent`?". The incumbent starts as
//! [`Candidate::sentinel`], whose effectiveness is negative infinity, so it is
//! infinitely far from any finite target and the first acceptable candidate always wins.
//! Candidates with a non-finite effectiveness are never accepted.

use super::config::{SearchSpace, SelectionRule};
use crate::core::models::candidate::Candidate;

pub trait SelectionPolicy {
    fn name(&self) -> &'static str;

    /// Returns `true` if `candidate` should replace `incumbent`.
    fn prefers(&self, candidate: &Candidate, incumbent: &Candidate) -> bool;
}

/// Strictly closer to the target, and never below the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorEnforcing {
    pub target_db: f64,
    pub floor_db: f64,
}

impl SelectionPolicy for FloorEnforcing {
    fn name(&self) -> &'static str {
        SelectionRule::FloorEnforcing.as_str()
    }

    fn prefers(&self, candidate: &Candidate, incumbent: &Candidate) -> bool {
        candidate.effectiveness_db.is_finite()
            && candidate.effectiveness_db >= self.floor_db
            && candidate.distance_to(self.target_db) < incumbent.distance_to(self.target_db)
    }
}

/// Strictly closer to the target, or equally close with a strictly larger open area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenAreaTieBreak {
    pub target_db: f64,
}

impl SelectionPolicy for OpenAreaTieBreak {
    fn name(&self) -> &'static str {
        SelectionRule::OpenAreaTieBreak.as_str()
    }

    fn prefers(&self, candidate: &Candidate, incumbent: &Candidate) -> bool {
        if !candidate.effectiveness_db.is_finite() {
            return false;
        }
        let distance = candidate.distance_to(self.target_db);
        let incumbent_distance = incumbent.distance_to(self.target_db);
        distance < incumbent_distance
            || (distance == incumbent_distance
                && candidate.open_area_percent > incumbent.open_area_percent)
    }
}

impl SelectionRule {
    /// Instantiates the rule with the thresholds of `space`.
    pub fn policy(&self, space: &SearchSpace) -> Box<dyn SelectionPolicy> {
        match self {
            Self::FloorEnforcing => Box::new(FloorEnforcing {
                target_db: space.target_db(),
                floor_db: space.floor_db(),
            }),
            Self::OpenAreaTieBreak => Box::new(OpenAreaTieBreak {
                target_db: space.target_db(),
            }),
        }
    }
}
