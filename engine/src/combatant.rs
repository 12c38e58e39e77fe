use crate::Terrain;

/// What the battle engine needs from a creature.
///
/// Health values are already level-scaled; the engine never looks at base
/// stats. Implementors keep `0 <= health() <= max_health()`.
pub trait Combatant {
    fn name(&self) -> &str;
    fn level(&self) -> u32;
    fn health(&self) -> u32;
    fn max_health(&self) -> u32;
    fn speed(&self) -> u32;

    /// Theoretical maximum damage of one hit under `terrain`.
    fn scaled_damage(&self, terrain: Terrain) -> u32;

    /// Clamps at 0.
    fn take_damage(&mut self, amount: u32);

    /// Clamps at `max_health()`.
    fn heal(&mut self, amount: u32);

    fn sell_price(&self) -> u64;

    fn is_fainted(&self) -> bool {
        self.health() == 0
    }

    /// Deliver `amount` damage to `target`. Override to add side effects
    /// such as draining health.
    fn strike(&mut self, target: &mut Self, amount: u32)
    where
        Self: Sized,
    {
        target.take_damage(amount);
    }
}
