use engine::api::{
    builtin_party, load_battle_config, resolve_party, simulate_battle, simulate_battle_many,
    BattleConfig, PartySource, PartySpec,
};
use engine::content::builtin_parties;
use engine::{Combatant, EngineError, LungeConfig, Side, Terrain, MAX_LEVEL};

fn starter_vs_wild(seed: u64) -> BattleConfig {
    let mut cfg = BattleConfig::new(
        PartySource::builtin("starter_trio"),
        PartySource::builtin("wild_pack"),
    );
    cfg.seed = seed;
    cfg
}

#[test]
fn builtin_parties_parse_and_fit_a_roster() {
    for id in builtin_parties().keys() {
        let spec = builtin_party(id).unwrap();
        let roster = spec.into_roster().unwrap();
        assert!(!roster.is_empty(), "{id} is empty");
    }
}

#[test]
fn unknown_party_is_reported() {
    let err = builtin_party("dragons").unwrap_err();
    assert_eq!(
        err.downcast_ref::<EngineError>(),
        Some(&EngineError::UnknownParty("dragons".into()))
    );
}

#[test]
fn party_source_needs_exactly_one_origin() {
    assert!(resolve_party(&PartySource::default()).is_err());
    let both = PartySource {
        party_id: Some("wild_pack".into()),
        party_path: Some("wild.json".into()),
    };
    assert!(resolve_party(&both).is_err());
}

#[test]
fn battle_with_builtins_settles() {
    let summary = simulate_battle(starter_vs_wild(2025)).unwrap();
    let winner = summary.winner.expect("battle settled");
    assert_eq!(
        summary.winner_name.as_deref(),
        Some(if winner == Side::One { "Player" } else { "Wild" })
    );
    assert!(summary.advances > 0);
    assert!(summary.rewards.is_some());
    assert!(summary.log.last().unwrap().starts_with("[END]"));
    assert!(summary.side_one_standing == 0 || summary.side_two_standing == 0);
}

#[test]
fn battle_is_reproducible_from_seed() {
    let a = simulate_battle(starter_vs_wild(7)).unwrap();
    let b = simulate_battle(starter_vs_wild(7)).unwrap();
    assert_eq!(a.terrain, b.terrain);
    assert_eq!(a.log, b.log);
}

#[test]
fn explicit_terrain_is_used() {
    let mut cfg = starter_vs_wild(1);
    cfg.terrain = Some(Terrain::Forest);
    assert_eq!(simulate_battle(cfg).unwrap().terrain, Terrain::Forest);
}

#[test]
fn advance_cap_reports_unfinished() {
    let mut cfg = starter_vs_wild(1);
    cfg.max_advances = 3;
    let summary = simulate_battle(cfg).unwrap();
    assert!(summary.winner.is_none());
    assert!(summary.rewards.is_none());
    assert_eq!(summary.advances, 3);
}

#[test]
fn invalid_lunge_is_rejected() {
    let mut cfg = starter_vs_wild(1);
    cfg.lunge = LungeConfig { distance: 100, speed: 0 };
    let err = simulate_battle(cfg).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EngineError>(),
        Some(EngineError::InvalidLunge { .. })
    ));
}

#[test]
fn battle_many_summary_makes_sense() {
    let stats = simulate_battle_many(starter_vs_wild(1), 40).unwrap();
    assert_eq!(stats.samples, 40);
    assert_eq!(stats.side_one_wins + stats.side_two_wins + stats.unfinished, 40);
    assert!(stats.avg_advances > 0.0);
}

#[test]
fn yaml_config_loads_with_defaults() {
    let dir = std::env::temp_dir().join(format!("engine-cfg-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("battle.yaml");
    std::fs::write(
        &path,
        "side_one:\n  party_id: cave_lurkers\nside_two:\n  party_id: wild_pack\nterrain: cave\nseed: 12\nlunge:\n  speed: 25\n",
    )
    .unwrap();

    let cfg = load_battle_config(&path).unwrap();
    assert_eq!(cfg.terrain, Some(Terrain::Cave));
    assert_eq!(cfg.seed, 12);
    assert_eq!(cfg.lunge, LungeConfig { distance: 100, speed: 25 });
    assert_eq!(cfg.max_advances, 100_000);

    let summary = simulate_battle(cfg).unwrap();
    assert!(summary.winner.is_some());
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn json_party_file_loads() {
    let dir = std::env::temp_dir().join(format!("engine-party-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("party.json");
    std::fs::write(
        &path,
        r#"{"name":"Hero","members":[{"species":"galewing","level":2,"nickname":"Zephyr","health":5}]}"#,
    )
    .unwrap();

    let spec = resolve_party(&PartySource::file(path.to_string_lossy())).unwrap();
    let roster = spec.into_roster().unwrap();
    assert_eq!(roster.name(), "Hero");
    let zephyr = roster.first_living().unwrap();
    assert_eq!(engine::Combatant::name(zephyr), "Zephyr");
    assert_eq!(engine::Combatant::health(zephyr), 5);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn party_files_with_a_byte_order_mark_load() {
    let dir = std::env::temp_dir().join(format!("engine-bom-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let json = r#"{"name":"Marked","members":[{"species":"thornback","level":1}]}"#;

    let utf8 = dir.join("utf8.json");
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(json.as_bytes());
    std::fs::write(&utf8, bytes).unwrap();

    let utf16 = dir.join("utf16.json");
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(json.encode_utf16().flat_map(u16::to_le_bytes));
    std::fs::write(&utf16, bytes).unwrap();

    for path in [utf8, utf16] {
        let spec = resolve_party(&PartySource::file(path.to_string_lossy())).unwrap();
        assert_eq!(spec.name, "Marked");
        assert_eq!(spec.into_roster().unwrap().len(), 1);
    }
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn party_members_are_validated_on_load() {
    let spec: PartySpec = serde_json::from_str(
        r#"{"name":"Bad","members":[{"species":"emberpup","level":0,"health":500}]}"#,
    )
    .unwrap();
    assert_eq!(spec.into_roster().unwrap_err(), EngineError::InvalidLevel(0));

    let spec: PartySpec = serde_json::from_str(
        r#"{"name":"Huge","members":[{"species":"thornback","level":3000000000}]}"#,
    )
    .unwrap();
    assert!(matches!(
        spec.into_roster(),
        Err(EngineError::LevelTooHigh { level: 3_000_000_000, max: MAX_LEVEL })
    ));

    let spec: PartySpec = serde_json::from_str(
        r#"{"name":"Over","members":[{"species":"emberpup","level":1,"health":500}]}"#,
    )
    .unwrap();
    let roster = spec.into_roster().unwrap();
    let pup = roster.first_living().unwrap();
    assert_eq!(pup.health(), pup.max_health());
    assert_eq!(pup.health(), 40);
}
