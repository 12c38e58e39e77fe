//! The stepped battle state machine.
//!
//! A driver builds a [`Battle`] from two rosters and calls [`Battle::advance`]
//! once per tick until [`Battle::is_settled`]. Each call does one of three
//! things: sends in replacements for fainted combatants (or settles the
//! battle when a side has none left), moves the attack in flight one step,
//! or, when the attack arrives, rolls and applies damage and hands the turn
//! to the other side.

mod lunge;
mod observer;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use lunge::{Lunge, LungeConfig};
pub use observer::{BattleEvent, BattleObserver, EventRecorder};

use crate::{roll_damage, Combatant, Dice, Roster, Terrain};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    pub fn opposite(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rewards {
    /// Sum of sell prices across the losing roster.
    pub gold: u64,
    /// Sum of levels across the losing roster.
    pub score: u64,
}

pub struct Battle<C, O> {
    rosters: [Roster<C>; 2],
    active: [Option<usize>; 2],
    turn: Side,
    lunge: Lunge,
    lunge_config: LungeConfig,
    terrain: Terrain,
    dice: Dice,
    observer: O,
    log: Vec<String>,
    settled: bool,
    loser: Option<Side>,
    advances: u64,
}

impl<C: Combatant, O: BattleObserver> Battle<C, O> {
    pub fn new(side_one: Roster<C>, side_two: Roster<C>, observer: O, terrain: Terrain, dice: Dice) -> Self {
        Self::with_lunge(side_one, side_two, observer, terrain, dice, LungeConfig::default())
    }

    /// If either roster has nobody able to fight, the battle starts (and stays)
    /// settled and no callback ever fires.
    pub fn with_lunge(
        side_one: Roster<C>,
        side_two: Roster<C>,
        observer: O,
        terrain: Terrain,
        dice: Dice,
        lunge_config: LungeConfig,
    ) -> Self {
        let active = [side_one.first_living_index(), side_two.first_living_index()];
        let mut battle = Self {
            rosters: [side_one, side_two],
            active,
            turn: Side::One,
            lunge: Lunge::toward(Side::One, lunge_config),
            lunge_config,
            terrain,
            dice,
            observer,
            log: Vec::new(),
            settled: false,
            loser: None,
            advances: 0,
        };

        if let Some(loser) = battle.exhausted_side() {
            info!(
                side_one = battle.rosters[0].name(),
                side_two = battle.rosters[1].name(),
                "battle settled before it started"
            );
            battle.settled = true;
            battle.loser = Some(loser);
        } else {
            battle.start_turn();
            info!(
                side_one = battle.rosters[0].name(),
                side_two = battle.rosters[1].name(),
                %terrain,
                first = ?battle.turn,
                "battle started"
            );
        }
        battle
    }

    /// One unit of progress. No-op once settled.
    pub fn advance(&mut self) {
        if self.settled {
            return;
        }
        self.advances += 1;

        if self.is_either_active_fainted() {
            self.replace_fainted();
            return;
        }

        let percent = self.lunge.step();
        self.observer.on_progress(percent);

        if self.lunge.has_landed() {
            self.land_attack();
        }
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn is_either_active_fainted(&self) -> bool {
        Side::BOTH
            .into_iter()
            .any(|side| self.active_combatant(side).is_none_or(|c| c.is_fainted()))
    }

    /// The combatant currently fighting for `side`. It may be fainted until the
    /// next `advance` sends in a replacement; `None` once the side is exhausted.
    pub fn active_combatant(&self, side: Side) -> Option<&C> {
        self.active[side.index()].and_then(|i| self.rosters[side.index()].get(i))
    }

    pub fn active_combatant_mut(&mut self, side: Side) -> Option<&mut C> {
        self.active[side.index()].and_then(|i| self.rosters[side.index()].get_mut(i))
    }

    pub fn event_log(&self) -> &[String] {
        &self.log
    }

    pub fn roster(&self, side: Side) -> &Roster<C> {
        &self.rosters[side.index()]
    }

    pub fn turn_owner(&self) -> Side {
        self.turn
    }

    pub fn lunge(&self) -> Lunge {
        self.lunge
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    /// Number of `advance` calls that did work.
    pub fn advances(&self) -> u64 {
        self.advances
    }

    pub fn loser(&self) -> Option<Side> {
        self.loser
    }

    pub fn winner(&self) -> Option<Side> {
        self.loser.map(Side::opposite)
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// `None` until the battle is settled.
    pub fn rewards(&self) -> Option<Rewards> {
        let loser = &self.rosters[self.loser?.index()];
        Some(Rewards { gold: loser.total_sell_price(), score: loser.total_levels() })
    }

    /// Panics if the battle is not settled yet.
    pub fn gold_reward(&self) -> u64 {
        self.settled_rewards().gold
    }

    /// Panics if the battle is not settled yet.
    pub fn score_reward(&self) -> u64 {
        self.settled_rewards().score
    }

    pub fn into_rosters(self) -> (Roster<C>, Roster<C>) {
        let [one, two] = self.rosters;
        (one, two)
    }

    fn settled_rewards(&self) -> Rewards {
        match self.rewards() {
            Some(rewards) => rewards,
            None => panic!("rewards queried before the battle settled"),
        }
    }

    /// Side that cannot field anyone; side two when both are out, so ties favor side one.
    fn exhausted_side(&self) -> Option<Side> {
        [Side::Two, Side::One].into_iter().find(|s| self.active[s.index()].is_none())
    }

    /// Faster active combatant moves first; ties go to side one.
    fn start_turn(&mut self) {
        let speed = |side: Side| self.active_combatant(side).map_or(0, |c| c.speed());
        let first = if speed(Side::One) >= speed(Side::Two) { Side::One } else { Side::Two };
        self.turn = first;
        self.lunge = Lunge::toward(self.turn, self.lunge_config);
    }

    fn replace_fainted(&mut self) {
        let mut replaced = Vec::with_capacity(2);
        for side in Side::BOTH {
            let i = side.index();
            if self.active_combatant(side).is_none_or(|c| c.is_fainted()) {
                self.active[i] = self.rosters[i].first_living_index();
                if self.active[i].is_some() {
                    replaced.push(side);
                }
            }
        }

        if let Some(loser) = self.exhausted_side() {
            self.settle(loser);
            return;
        }

        self.start_turn();
        for side in replaced {
            if let Some(next) = self.active_combatant(side) {
                debug!(?side, next = next.name(), "replacement sent in");
            }
            self.observer.on_next_combatant(side);
        }
    }

    fn settle(&mut self, loser: Side) {
        let winner = loser.opposite();
        let winning = &self.rosters[winner.index()];
        let losing = &self.rosters[loser.index()];
        self.log.push(format!(
            "[END] {} wins with {} standing; {} whited out",
            winning.name(),
            winning.living_count(),
            losing.name()
        ));
        info!(winner = winning.name(), loser = losing.name(), advances = self.advances, "battle settled");
        self.settled = true;
        self.loser = Some(loser);
        self.observer.on_end();
    }

    fn land_attack(&mut self) {
        let attacker_side = self.turn;
        let (Some(ai), Some(di)) = (
            self.active[attacker_side.index()],
            self.active[attacker_side.opposite().index()],
        ) else {
            return;
        };

        let [one, two] = &mut self.rosters;
        let (attackers, defenders) = match attacker_side {
            Side::One => (one, two),
            Side::Two => (two, one),
        };
        let (Some(attacker), Some(defender)) = (attackers.get_mut(ai), defenders.get_mut(di)) else {
            return;
        };

        let scaled_max = attacker.scaled_damage(self.terrain);
        let damage = roll_damage(&mut self.dice, scaled_max);
        attacker.strike(defender, damage);

        self.log.push(format!("[ATTACK][{}] hits {} for {}", attacker.name(), defender.name(), damage));
        debug!(
            attacker = attacker.name(),
            defender = defender.name(),
            damage,
            scaled_max,
            defender_hp = defender.health(),
            "attack landed"
        );
        if defender.is_fainted() {
            self.log.push(format!("[FAINT][{}] fainted", defender.name()));
        }

        self.observer.on_landed_attack(attacker_side, damage);

        self.turn = attacker_side.opposite();
        self.lunge = Lunge::toward(self.turn, self.lunge_config);
    }
}
