use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub hp: u32,
    pub max_hp: u32,
}

impl Health {
    pub fn new(max_hp: u32) -> Self {
        Self { hp: max_hp, max_hp }
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }
}

/// Apply damage, clamping at 0. Returns true if the creature dropped to 0 this call.
pub fn apply_damage(name: &str, health: &mut Health, dmg: u32, mut log: impl FnMut(String)) -> bool {
    if health.is_fainted() {
        return false;
    }

    let before = health.hp;
    health.hp = health.hp.saturating_sub(dmg);
    log(format!("[DMG][{}] {} → {} (−{})", name, before, health.hp, dmg));

    if health.hp == 0 {
        log(format!("[STATE][{}] drops to 0 HP → fainted", name));
        return true;
    }
    false
}

/// Healing, clamped at max. Works on a fainted creature too.
pub fn heal(name: &str, health: &mut Health, amount: u32, mut log: impl FnMut(String)) {
    if amount == 0 {
        return;
    }
    let before = health.hp;
    let was_fainted = health.is_fainted();
    health.hp = health.hp.saturating_add(amount).min(health.max_hp);
    if was_fainted && health.hp > 0 {
        log(format!(
            "[HEAL][{}] +{} HP ({} → {}) and is back on its feet",
            name, amount, before, health.hp
        ));
    } else {
        log(format!("[HEAL][{}] +{} HP ({} → {})", name, amount, before, health.hp));
    }
}

/// Raise the maximum (level up). The gained amount is added to current hp as well,
/// unless the creature is fainted.
pub fn raise_max(name: &str, health: &mut Health, new_max: u32, mut log: impl FnMut(String)) {
    if new_max <= health.max_hp {
        health.max_hp = new_max;
        health.hp = health.hp.min(new_max);
        return;
    }
    let gained = new_max - health.max_hp;
    health.max_hp = new_max;
    if !health.is_fainted() {
        health.hp = (health.hp + gained).min(new_max);
    }
    log(format!("[GROW][{}] max HP +{} → {}", name, gained, new_max));
}
