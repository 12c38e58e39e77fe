use clap::Parser;
use engine::api::{battle_from_parties, resolve_party, run_to_settlement, PartySource};
use engine::{LungeConfig, Side, Terrain};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simulate-many")]
#[command(about = "Monte Carlo sim: many battles between two parties")]
struct Args {
    /// Built-in party for side one
    #[arg(long, default_value = "starter_trio")]
    one: String,

    /// Built-in party for side two
    #[arg(long, default_value = "wild_pack")]
    two: String,

    /// Party JSON file for side one (overrides --one)
    #[arg(long)]
    one_file: Option<PathBuf>,

    /// Party JSON file for side two (overrides --two)
    #[arg(long)]
    two_file: Option<PathBuf>,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// Safety cap on steps per trial
    #[arg(long, default_value_t = 100_000)]
    max_advances: u64,

    /// Fixed terrain; otherwise each trial rolls its own
    #[arg(long)]
    terrain: Option<Terrain>,

    /// RNG base seed (trial i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,
}

fn party_source(id: &str, file: Option<&PathBuf>) -> PartySource {
    match file {
        Some(path) => PartySource::file(path.to_string_lossy()),
        None => PartySource::builtin(id),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.trials == 0 {
        anyhow::bail!("--trials must be at least 1");
    }

    let one = resolve_party(&party_source(&args.one, args.one_file.as_ref()))?;
    let two = resolve_party(&party_source(&args.two, args.two_file.as_ref()))?;

    let mut one_wins = 0u32;
    let mut two_wins = 0u32;
    let mut unfinished = 0u32;
    let mut attacks_total = 0u64;
    let mut gold_total = 0u64;
    let mut score_total = 0u64;
    let mut steps: Vec<u64> = Vec::with_capacity(args.trials as usize);

    for i in 0..args.trials {
        let trial_seed = args.seed.wrapping_add(i as u64);
        let mut battle = battle_from_parties(
            one.clone(),
            two.clone(),
            args.terrain,
            trial_seed,
            LungeConfig::default(),
            (),
        )?;
        run_to_settlement(&mut battle, args.max_advances);

        attacks_total += battle
            .event_log()
            .iter()
            .filter(|line| line.starts_with("[ATTACK]"))
            .count() as u64;

        match (battle.winner(), battle.rewards()) {
            (Some(side), Some(rewards)) => {
                match side {
                    Side::One => one_wins += 1,
                    Side::Two => two_wins += 1,
                }
                gold_total += rewards.gold;
                score_total += rewards.score;
                steps.push(battle.advances());
            }
            _ => unfinished += 1,
        }
    }

    steps.sort_unstable();
    let trials_f = args.trials as f64;
    let settled = steps.len().max(1) as f64;
    let avg_steps = steps.iter().sum::<u64>() as f64 / settled;
    let median_steps = if steps.is_empty() {
        0
    } else {
        let m = steps.len() / 2;
        if steps.len() % 2 == 1 {
            steps[m]
        } else {
            (steps[m - 1] + steps[m]) / 2
        }
    };

    println!("simulate-many results");
    println!("---------------------");
    println!("trials:             {}", args.trials);
    println!("side one:           {} ({} members)", one.name, one.members.len());
    println!("side two:           {} ({} members)", two.name, two.members.len());
    println!(
        "terrain:            {}",
        args.terrain.map_or("random".to_string(), |t| t.to_string())
    );
    println!();
    println!("side one wins:      {:.1}%", one_wins as f64 / trials_f * 100.0);
    println!("side two wins:      {:.1}%", two_wins as f64 / trials_f * 100.0);
    println!("unfinished:         {}", unfinished);
    println!("avg attacks:        {:.2}", attacks_total as f64 / trials_f);
    println!("avg steps (settled):{:>7.2}", avg_steps);
    println!("median steps:       {}", median_steps);
    println!("avg gold:           {:.2}", gold_total as f64 / settled);
    println!("avg score:          {:.2}", score_total as f64 / settled);

    Ok(())
}
