use engine::life::*;

fn noop_log(_: String) {}

#[test]
fn damage_clamps_at_zero_and_reports_the_drop() {
    let mut h = Health { hp: 3, max_hp: 10 };
    let mut seen = vec![];
    let dropped = apply_damage("Hero", &mut h, 5, |s| seen.push(s));
    assert!(dropped);
    assert_eq!(h.hp, 0);
    assert!(h.is_fainted());
    assert!(seen.iter().any(|s| s.contains("fainted")));
}

#[test]
fn damage_on_a_fainted_creature_does_nothing() {
    let mut h = Health { hp: 0, max_hp: 10 };
    assert!(!apply_damage("Hero", &mut h, 5, noop_log));
    assert_eq!(h.hp, 0);
}

#[test]
fn partial_damage_does_not_faint() {
    let mut h = Health::new(10);
    assert!(!apply_damage("Hero", &mut h, 4, noop_log));
    assert_eq!(h.hp, 6);
}

#[test]
fn healing_clamps_at_max() {
    let mut h = Health { hp: 7, max_hp: 12 };
    heal("Hero", &mut h, 50, noop_log);
    assert_eq!(h.hp, 12);
}

#[test]
fn healing_a_fainted_creature_revives_it() {
    let mut h = Health { hp: 0, max_hp: 12 };
    let mut seen = vec![];
    heal("Hero", &mut h, 6, |s| seen.push(s));
    assert_eq!(h.hp, 6);
    assert!(!h.is_fainted());
    assert_eq!(seen.len(), 1);
}

#[test]
fn raising_max_adds_the_gain_to_current_health() {
    let mut h = Health { hp: 5, max_hp: 10 };
    raise_max("Hero", &mut h, 14, noop_log);
    assert_eq!(h, Health { hp: 9, max_hp: 14 });

    let mut fainted = Health { hp: 0, max_hp: 10 };
    raise_max("Hero", &mut fainted, 14, noop_log);
    assert_eq!(fainted, Health { hp: 0, max_hp: 14 });
}
