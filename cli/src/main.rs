use clap::{Parser, Subcommand};
use engine::api::{
    builtin_party, load_battle_config, prepare_battle, summarize, BattleConfig, PartySource,
};
use engine::content::builtin_parties;
use engine::{Battle, BattleObserver, Combatant, Dice, Monster, Side, Species, Terrain};
use std::{
    io::{self, Write},
    path::PathBuf,
    thread,
    time::Duration,
};

const BAR_WIDTH: usize = 20;

#[derive(Subcommand)]
enum Cmd {
    /// Run one battle, pacing it in the terminal
    Fight {
        /// Battle config file (JSON, or YAML with .yaml/.yml); other flags override it
        #[arg(long)]
        config: Option<PathBuf>,
        /// Built-in party for side one [default: starter_trio]
        #[arg(long)]
        one: Option<String>,
        /// Built-in party for side two [default: wild_pack]
        #[arg(long)]
        two: Option<String>,
        /// Party JSON file for side one (overrides --one)
        #[arg(long)]
        one_file: Option<PathBuf>,
        /// Party JSON file for side two (overrides --two)
        #[arg(long)]
        two_file: Option<PathBuf>,
        /// RNG seed for determinism (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Battlefield terrain (random from the seed when omitted)
        #[arg(long)]
        terrain: Option<Terrain>,
        /// Milliseconds between steps; 0 runs headless
        #[arg(long, default_value_t = 0)]
        tick_ms: u64,
        /// Hide the attack progress bar
        #[arg(long, default_value_t = false)]
        quiet: bool,
        /// Print the battle summary as JSON at the end
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the built-in parties
    Parties,
    /// Print a built-in party as JSON (stdout)
    PartyDump {
        /// Built-in party id
        id: String,
        /// Single-line JSON instead of pretty-printed
        #[arg(long, default_value_t = false)]
        compact: bool,
    },
    /// Print the species stat table
    Species,
}

#[derive(Parser)]
#[command(name = "monster-battle")]
#[command(about = "Monster battle CLI harness")]
struct Cli {
    /// Debug-level tracing on stderr
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

/// Terminal presentation: a progress bar for the attack in flight. Log lines
/// are printed by the driver loop.
struct TerminalView {
    quiet: bool,
    bar_open: bool,
    replaced: Vec<Side>,
}

impl TerminalView {
    fn new(quiet: bool) -> Self {
        Self { quiet, bar_open: false, replaced: Vec::new() }
    }

    fn close_bar(&mut self) {
        if self.bar_open {
            println!();
            self.bar_open = false;
        }
    }
}

fn progress_bar(percent: u8) -> String {
    let filled = percent as usize * BAR_WIDTH / 100;
    format!("[{}{}] {:>3}%", "#".repeat(filled), " ".repeat(BAR_WIDTH - filled), percent)
}

impl BattleObserver for TerminalView {
    fn on_progress(&mut self, percent: u8) {
        if self.quiet {
            return;
        }
        print!("\r{}", progress_bar(percent));
        let _ = io::stdout().flush();
        self.bar_open = true;
    }

    fn on_landed_attack(&mut self, _attacker: Side, _damage: u32) {
        self.close_bar();
    }

    fn on_next_combatant(&mut self, side: Side) {
        self.close_bar();
        self.replaced.push(side);
    }

    fn on_end(&mut self) {
        self.close_bar();
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

/// A file beats a built-in id; `None` when neither flag was given.
fn party_override(id: Option<String>, file: Option<PathBuf>) -> Option<PartySource> {
    match (id, file) {
        (_, Some(path)) => Some(PartySource::file(path.to_string_lossy())),
        (Some(id), None) => Some(PartySource::builtin(id)),
        (None, None) => None,
    }
}

fn describe(monster: &Monster) -> String {
    format!(
        "{} L{} ({}) HP {}/{}",
        monster.name(),
        monster.level(),
        monster.species(),
        monster.health(),
        monster.max_health()
    )
}

fn print_lineup(battle: &Battle<Monster, TerminalView>) {
    for side in Side::BOTH {
        let roster = battle.roster(side);
        println!("{}:", roster.name());
        for m in roster.iter() {
            println!("  - {}", describe(m));
        }
    }
}

fn drive(battle: &mut Battle<Monster, TerminalView>, tick: Duration, max_advances: u64) {
    let mut printed = 0;
    let mut calls = 0;
    while !battle.is_settled() && calls < max_advances {
        battle.advance();
        calls += 1;

        for line in &battle.event_log()[printed..] {
            println!("{}", line);
        }
        printed = battle.event_log().len();

        let replaced: Vec<Side> = battle.observer_mut().replaced.drain(..).collect();
        for side in replaced {
            if let Some(next) = battle.active_combatant(side) {
                println!("[NEXT][{}] sends in {}", battle.roster(side).name(), describe(next));
            }
        }

        if !tick.is_zero() {
            thread::sleep(tick);
        }
    }
    battle.observer_mut().close_bar();
}

#[allow(clippy::too_many_arguments)]
fn fight(
    config: Option<PathBuf>,
    one: Option<String>,
    two: Option<String>,
    one_file: Option<PathBuf>,
    two_file: Option<PathBuf>,
    seed: Option<u64>,
    terrain: Option<Terrain>,
    tick_ms: u64,
    quiet: bool,
    json: bool,
) -> anyhow::Result<()> {
    let side_one = party_override(one, one_file);
    let side_two = party_override(two, two_file);
    let mut cfg = match config {
        Some(path) => {
            let mut cfg = load_battle_config(path)?;
            if let Some(source) = side_one {
                cfg.side_one = source;
            }
            if let Some(source) = side_two {
                cfg.side_two = source;
            }
            cfg
        }
        None => {
            let mut cfg = BattleConfig::new(
                side_one.unwrap_or_else(|| PartySource::builtin("starter_trio")),
                side_two.unwrap_or_else(|| PartySource::builtin("wild_pack")),
            );
            cfg.seed = Dice::from_entropy().roll_range(0..u32::MAX) as u64;
            cfg
        }
    };
    if let Some(seed) = seed {
        cfg.seed = seed;
    }
    if terrain.is_some() {
        cfg.terrain = terrain;
    }

    let mut battle = prepare_battle(&cfg, TerminalView::new(quiet))?;
    println!(
        "[START] {} vs {} on {} (seed {})",
        battle.roster(Side::One).name(),
        battle.roster(Side::Two).name(),
        battle.terrain(),
        cfg.seed
    );
    print_lineup(&battle);

    drive(&mut battle, Duration::from_millis(tick_ms), cfg.max_advances);

    match battle.rewards() {
        Some(rewards) => {
            println!("rewards: gold={} score={}", rewards.gold, rewards.score);
        }
        None => println!(
            "[STALL] battle did not settle within {} steps",
            cfg.max_advances
        ),
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&summarize(&battle))?);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Cmd::Fight {
            config,
            one,
            two,
            one_file,
            two_file,
            seed,
            terrain,
            tick_ms,
            quiet,
            json,
        } => fight(
            config, one, two, one_file, two_file, seed, terrain, tick_ms, quiet, json,
        )?,
        Cmd::Parties => {
            for id in builtin_parties().keys() {
                let spec = builtin_party(id)?;
                println!("{:<14} {} ({} members)", id, spec.name, spec.members.len());
            }
        }
        Cmd::PartyDump { id, compact } => {
            let spec = builtin_party(&id)?;
            if compact {
                println!("{}", serde_json::to_string(&spec)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&spec)?);
            }
        }
        Cmd::Species => {
            println!(
                "{:<12} {:>4} {:>4} {:>4} {:>4} {:<9} {:>5}",
                "species", "hp", "dmg", "spd", "heal", "ideal", "drain"
            );
            for species in Species::ALL {
                let s = species.stats();
                println!(
                    "{:<12} {:>4} {:>4} {:>4} {:>4} {:<9} {:>4}%",
                    s.display_name,
                    s.base_health,
                    s.base_damage,
                    s.base_speed,
                    s.heal_rate,
                    s.ideal_terrain.to_string(),
                    s.drain_percent
                );
            }
        }
    }
    Ok(())
}
