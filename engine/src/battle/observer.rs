use serde::Serialize;

use super::Side;

/// Presentation hooks, called synchronously from `Battle::advance`.
pub trait BattleObserver {
    /// Attack in flight; `percent` is 0..=100 and purely cosmetic.
    fn on_progress(&mut self, _percent: u8) {}

    /// Fired exactly once per landed hit.
    fn on_landed_attack(&mut self, _attacker: Side, _damage: u32) {}

    /// `side` sent in a replacement after its active combatant fainted.
    fn on_next_combatant(&mut self, _side: Side) {}

    /// Fired once, when one side runs out of combatants.
    fn on_end(&mut self) {}
}

impl BattleObserver for () {}

impl<T: BattleObserver + ?Sized> BattleObserver for &mut T {
    fn on_progress(&mut self, percent: u8) {
        (**self).on_progress(percent);
    }

    fn on_landed_attack(&mut self, attacker: Side, damage: u32) {
        (**self).on_landed_attack(attacker, damage);
    }

    fn on_next_combatant(&mut self, side: Side) {
        (**self).on_next_combatant(side);
    }

    fn on_end(&mut self) {
        (**self).on_end();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleEvent {
    Progress(u8),
    LandedAttack { attacker: Side, damage: u32 },
    NextCombatant(Side),
    End,
}

/// Keeps every callback as a `BattleEvent`; handy for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    pub events: Vec<BattleEvent>,
}

impl EventRecorder {
    pub fn landed_damage(&self) -> impl Iterator<Item = (Side, u32)> + '_ {
        self.events.iter().filter_map(|e| match *e {
            BattleEvent::LandedAttack { attacker, damage } => Some((attacker, damage)),
            _ => None,
        })
    }

    pub fn count(&self, wanted: fn(&BattleEvent) -> bool) -> usize {
        self.events.iter().filter(|e| wanted(*e)).count()
    }
}

impl BattleObserver for EventRecorder {
    fn on_progress(&mut self, percent: u8) {
        self.events.push(BattleEvent::Progress(percent));
    }

    fn on_landed_attack(&mut self, attacker: Side, damage: u32) {
        self.events.push(BattleEvent::LandedAttack { attacker, damage });
    }

    fn on_next_combatant(&mut self, side: Side) {
        self.events.push(BattleEvent::NextCombatant(side));
    }

    fn on_end(&mut self) {
        self.events.push(BattleEvent::End);
    }
}
