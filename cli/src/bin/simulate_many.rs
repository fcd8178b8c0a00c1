use cabasi::api::{simulate_encounter_many, BattleConfig};
use cabasi_cli::{init_tracing, EncounterArgs, StrategyArg};
use clap::Parser;

#[derive(Parser)]
#[command(name = "simulate-many")]
#[command(about = "Monte Carlo sim: many battles of one encounter")]
struct Args {
    #[command(flatten)]
    source: EncounterArgs,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// Safety cap on rounds per trial (players lose when it is hit)
    #[arg(long)]
    max_rounds: Option<u32>,

    /// RNG base seed (trial i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// How creatures choose their attack
    #[arg(long, value_enum, default_value_t = StrategyArg::MaxDamage)]
    strategy: StrategyArg,

    /// Print the summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// More log output on stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let encounter = args.source.load()?;
    let cfg = BattleConfig {
        seed: args.seed,
        max_rounds: args.max_rounds,
        pick_attack: args.strategy.into(),
        ..BattleConfig::default()
    };
    let stats = simulate_encounter_many(&cfg, &encounter, args.trials)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("simulate-many results");
    println!("---------------------");
    if !encounter.name.is_empty() {
        println!("encounter:          {}", encounter.name);
    }
    println!("trials:             {}", stats.samples);
    println!("player wins:        {}", stats.player_wins);
    println!("monster wins:       {}", stats.monster_wins);
    println!("player win rate:    {:.1}%", stats.player_win_rate() * 100.0);
    println!("avg rounds:         {:.2}", stats.avg_rounds);
    println!(
        "rounds (min/max):   {}/{}",
        stats.min_rounds, stats.max_rounds
    );
    println!();
    println!("end reasons:");
    for (reason, count) in &stats.end_reasons {
        println!("  {:<28} {}", reason, count);
    }

    Ok(())
}
