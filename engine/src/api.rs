use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::content::builtin_parties;
use crate::{
    Battle, BattleObserver, Combatant, Dice, EngineError, LungeConfig, Monster, Rewards, Roster,
    Side, Species, Terrain,
};

const DEFAULT_MAX_ADVANCES: u64 = 100_000;

fn default_max_advances() -> u64 {
    DEFAULT_MAX_ADVANCES
}

/// Where a side's party comes from: a built-in id or a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PartySource {
    #[serde(default)]
    pub party_id: Option<String>,
    #[serde(default)]
    pub party_path: Option<String>,
}

impl PartySource {
    pub fn builtin(id: impl Into<String>) -> Self {
        Self { party_id: Some(id.into()), party_path: None }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self { party_id: None, party_path: Some(path.into()) }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleConfig {
    pub side_one: PartySource,
    pub side_two: PartySource,
    /// Picked with the seeded dice when absent.
    #[serde(default)]
    pub terrain: Option<Terrain>,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub lunge: LungeConfig,
    /// Driver-side cap; a battle that hasn't settled by then is reported unfinished.
    #[serde(default = "default_max_advances")]
    pub max_advances: u64,
}

impl BattleConfig {
    pub fn new(side_one: PartySource, side_two: PartySource) -> Self {
        Self {
            side_one,
            side_two,
            terrain: None,
            seed: 0,
            lunge: LungeConfig::default(),
            max_advances: DEFAULT_MAX_ADVANCES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberSpec {
    pub species: Species,
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Starting health; full when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<u32>,
}

impl MemberSpec {
    pub fn build(&self) -> Result<Monster, EngineError> {
        let monster = match &self.nickname {
            Some(name) => Monster::named(self.species, name.clone(), self.level)?,
            None => Monster::new(self.species, self.level)?,
        };
        Ok(match self.health {
            Some(hp) => monster.with_health(hp),
            None => monster,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PartySpec {
    pub name: String,
    pub members: Vec<MemberSpec>,
}

impl PartySpec {
    pub fn into_roster(self) -> Result<Roster<Monster>, EngineError> {
        let members = self
            .members
            .iter()
            .map(MemberSpec::build)
            .collect::<Result<Vec<_>, _>>()?;
        Roster::from_members(self.name, members)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleSummary {
    pub terrain: Terrain,
    pub winner: Option<Side>,
    pub winner_name: Option<String>,
    pub advances: u64,
    pub rewards: Option<Rewards>,
    pub side_one_standing: usize,
    pub side_two_standing: usize,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleStats {
    pub samples: u32,
    pub side_one_wins: u32,
    pub side_two_wins: u32,
    pub unfinished: u32,
    pub avg_advances: f64,
    pub avg_gold: f64,
    pub avg_score: f64,
}

pub fn builtin_party(id: &str) -> Result<PartySpec> {
    let parties = builtin_parties();
    let text = parties
        .get(id)
        .ok_or_else(|| EngineError::UnknownParty(id.to_string()))?;
    let spec = serde_json::from_str(text)
        .with_context(|| format!("failed to parse builtin party: {}", id))?;
    Ok(spec)
}

/// Read a text file, honoring a UTF-8/UTF-16 byte order mark when present.
pub fn read_text_auto(path: impl AsRef<Path>) -> Result<String> {
    let bytes = fs::read(path.as_ref())?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

pub fn load_party(path: &str) -> Result<PartySpec> {
    let text = read_text_auto(path)
        .with_context(|| format!("failed to read party JSON: {}", path))?;
    let spec = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse party JSON: {}", path))?;
    Ok(spec)
}

pub fn resolve_party(source: &PartySource) -> Result<PartySpec> {
    match (&source.party_id, &source.party_path) {
        (Some(id), None) => builtin_party(id),
        (None, Some(path)) => load_party(path),
        (Some(_), Some(_)) => bail!("party source sets both party_id and party_path"),
        (None, None) => bail!("party source needs party_id or party_path"),
    }
}

/// YAML for `.yaml`/`.yml`, JSON for anything else.
pub fn load_battle_config(path: impl AsRef<Path>) -> Result<BattleConfig> {
    let path = path.as_ref();
    let text = read_text_auto(path)
        .with_context(|| format!("failed to read battle config: {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let cfg = if is_yaml {
        serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse battle config YAML: {}", path.display()))?
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse battle config JSON: {}", path.display()))?
    };
    Ok(cfg)
}

/// Build a ready-to-drive battle from two party specs.
pub fn battle_from_parties<O: BattleObserver>(
    side_one: PartySpec,
    side_two: PartySpec,
    terrain: Option<Terrain>,
    seed: u64,
    lunge: LungeConfig,
    observer: O,
) -> Result<Battle<Monster, O>> {
    let lunge = lunge.validate()?;
    let one = side_one.into_roster()?;
    let two = side_two.into_roster()?;
    let mut dice = Dice::from_seed(seed);
    let terrain = terrain.unwrap_or_else(|| Terrain::random(&mut dice));
    Ok(Battle::with_lunge(one, two, observer, terrain, dice, lunge))
}

pub fn prepare_battle<O: BattleObserver>(cfg: &BattleConfig, observer: O) -> Result<Battle<Monster, O>> {
    let one = resolve_party(&cfg.side_one).context("side one")?;
    let two = resolve_party(&cfg.side_two).context("side two")?;
    battle_from_parties(one, two, cfg.terrain, cfg.seed, cfg.lunge, observer)
}

/// Headless driver: advance until settled or `max_advances` calls were made.
/// Returns the number of calls.
pub fn run_to_settlement<C: Combatant, O: BattleObserver>(
    battle: &mut Battle<C, O>,
    max_advances: u64,
) -> u64 {
    let mut calls = 0;
    while !battle.is_settled() && calls < max_advances {
        battle.advance();
        calls += 1;
    }
    calls
}

pub fn summarize<C: Combatant, O: BattleObserver>(battle: &Battle<C, O>) -> BattleSummary {
    let winner = battle.winner();
    BattleSummary {
        terrain: battle.terrain(),
        winner,
        winner_name: winner.map(|side| battle.roster(side).name().to_string()),
        advances: battle.advances(),
        rewards: battle.rewards(),
        side_one_standing: battle.roster(Side::One).living_count(),
        side_two_standing: battle.roster(Side::Two).living_count(),
        log: battle.event_log().to_vec(),
    }
}

pub fn simulate_battle(cfg: BattleConfig) -> Result<BattleSummary> {
    let mut battle = prepare_battle(&cfg, ())?;
    run_to_settlement(&mut battle, cfg.max_advances);
    Ok(summarize(&battle))
}

/// Runs `samples` battles; sample `i` uses seed `cfg.seed + i`.
pub fn simulate_battle_many(cfg: BattleConfig, samples: u32) -> Result<BattleStats> {
    if samples == 0 {
        bail!("samples must be at least 1");
    }
    let one = resolve_party(&cfg.side_one).context("side one")?;
    let two = resolve_party(&cfg.side_two).context("side two")?;

    let mut stats = BattleStats { samples, ..BattleStats::default() };
    let mut advances_total = 0u64;
    let mut gold_total = 0u64;
    let mut score_total = 0u64;

    for i in 0..samples {
        let seed = cfg.seed.wrapping_add(i as u64);
        let mut battle =
            battle_from_parties(one.clone(), two.clone(), cfg.terrain, seed, cfg.lunge, ())?;
        run_to_settlement(&mut battle, cfg.max_advances);

        advances_total += battle.advances();
        match (battle.winner(), battle.rewards()) {
            (Some(side), Some(rewards)) => {
                match side {
                    Side::One => stats.side_one_wins += 1,
                    Side::Two => stats.side_two_wins += 1,
                }
                gold_total += rewards.gold;
                score_total += rewards.score;
            }
            _ => stats.unfinished += 1,
        }
    }

    let n = samples as f64;
    stats.avg_advances = advances_total as f64 / n;
    stats.avg_gold = gold_total as f64 / n;
    stats.avg_score = score_total as f64 / n;
    Ok(stats)
}
