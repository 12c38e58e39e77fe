use arrayvec::ArrayVec;

use crate::{Combatant, EngineError};

pub const MAX_ROSTER_SIZE: usize = 4;

/// One side's party. Insertion order is the replacement order.
#[derive(Debug, Clone)]
pub struct Roster<C> {
    name: String,
    members: ArrayVec<C, MAX_ROSTER_SIZE>,
}

impl<C: Combatant> Roster<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), members: ArrayVec::new() }
    }

    pub fn from_members(
        name: impl Into<String>,
        members: impl IntoIterator<Item = C>,
    ) -> Result<Self, EngineError> {
        let mut roster = Self::new(name);
        for member in members {
            roster.push(member)?;
        }
        Ok(roster)
    }

    pub fn push(&mut self, member: C) -> Result<(), EngineError> {
        self.members.try_push(member).map_err(|_| EngineError::RosterFull {
            name: self.name.clone(),
            max: MAX_ROSTER_SIZE,
        })
    }

    pub fn remove(&mut self, index: usize) -> Option<C> {
        self.members.pop_at(index)
    }

    /// Panics if either index is out of bounds.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.members.swap(a, b);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.is_full()
    }

    pub fn get(&self, index: usize) -> Option<&C> {
        self.members.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut C> {
        self.members.get_mut(index)
    }

    pub fn members(&self) -> &[C] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.members.iter()
    }

    pub fn first_living_index(&self) -> Option<usize> {
        self.members.iter().position(|m| !m.is_fainted())
    }

    pub fn first_living(&self) -> Option<&C> {
        self.first_living_index().and_then(|i| self.members.get(i))
    }

    /// True when nobody can fight, including the empty roster.
    pub fn is_whited_out(&self) -> bool {
        self.members.iter().all(|m| m.is_fainted())
    }

    pub fn living_count(&self) -> usize {
        self.members.iter().filter(|m| !m.is_fainted()).count()
    }

    pub fn total_sell_price(&self) -> u64 {
        self.members.iter().fold(0u64, |acc, m| acc.saturating_add(m.sell_price()))
    }

    pub fn total_levels(&self) -> u64 {
        self.members.iter().fold(0u64, |acc, m| acc.saturating_add(m.level() as u64))
    }
}
