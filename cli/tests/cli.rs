use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn fight_runs_headless_to_the_end() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["fight", "--seed", "7", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[START] Player vs Wild"))
        .stdout(predicate::str::contains("[END]"))
        .stdout(predicate::str::contains("rewards: gold="));
}

#[test]
fn fight_with_terrain_and_json_summary() {
    Command::cargo_bin("cli")
        .unwrap()
        .args([
            "fight", "--one", "cave_lurkers", "--two", "starter_trio", "--seed", "3", "--terrain",
            "cave", "--quiet", "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("on cave"))
        .stdout(predicate::str::contains("\"terrain\": \"cave\""));
}

#[test]
fn unknown_terrain_is_a_usage_error() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["fight", "--terrain", "lava"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown terrain"));
}

#[test]
fn unknown_party_fails() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["fight", "--one", "dragons", "--seed", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown party 'dragons'"));
}

#[test]
fn parties_lists_builtins() {
    Command::cargo_bin("cli")
        .unwrap()
        .arg("parties")
        .assert()
        .success()
        .stdout(predicate::str::contains("starter_trio"))
        .stdout(predicate::str::contains("cave_lurkers"));
}

#[test]
fn party_dump_prints_json() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["party-dump", "wild_pack"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"species\": \"galewing\""));
}

#[test]
fn species_table_lists_gloomfang_drain() {
    Command::cargo_bin("cli")
        .unwrap()
        .arg("species")
        .assert()
        .success()
        .stdout(predicate::str::contains("Gloomfang"))
        .stdout(predicate::str::contains("25%"));
}

#[test]
fn simulate_many_reports_win_rates() {
    Command::cargo_bin("simulate-many")
        .unwrap()
        .args(["--trials", "20", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("side one wins:"))
        .stdout(predicate::str::contains("trials:             20"));
}

#[test]
fn party_dump_compact_is_single_line() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["party-dump", "wild_pack", "--compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"species\":\"galewing\""))
        .stdout(predicate::function(|out: &str| out.trim_end().lines().count() == 1));
}

#[test]
fn party_flags_override_a_config_file() {
    let dir = std::env::temp_dir().join(format!("cli-cfg-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let cfg = dir.join("battle.yaml");
    std::fs::write(
        &cfg,
        "side_one:\n  party_id: starter_trio\nside_two:\n  party_id: wild_pack\nseed: 4\n",
    )
    .unwrap();
    let party = dir.join("hero.json");
    std::fs::write(
        &party,
        r#"{"name":"Hero","members":[{"species":"thornback","level":3}]}"#,
    )
    .unwrap();

    Command::cargo_bin("cli")
        .unwrap()
        .arg("fight")
        .arg("--config")
        .arg(&cfg)
        .args(["--two", "cave_lurkers", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[START] Player vs Cave Lurkers"));

    Command::cargo_bin("cli")
        .unwrap()
        .arg("fight")
        .arg("--config")
        .arg(&cfg)
        .arg("--one-file")
        .arg(&party)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("[START] Hero vs Wild"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn simulate_many_reads_bom_party_files() {
    let dir = std::env::temp_dir().join(format!("cli-bom-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let party = dir.join("marked.json");
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(br#"{"name":"Marked","members":[{"species":"burrowmole","level":2}]}"#);
    std::fs::write(&party, bytes).unwrap();

    Command::cargo_bin("simulate-many")
        .unwrap()
        .args(["--trials", "5"])
        .arg("--one-file")
        .arg(&party)
        .assert()
        .success()
        .stdout(predicate::str::contains("side one:           Marked (1 members)"));

    std::fs::remove_dir_all(&dir).ok();
}
