use anyhow::bail;
use cabasi::api::{self, BattleConfig};
use cabasi::content::builtin_encounters;
use cabasi::{validate_rosters, Die, SeededRng};
use cabasi_cli::{init_tracing, EncounterArgs, StrategyArg};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Subcommand)]
enum Cmd {
    /// Roll a die several times
    Roll {
        /// Die to roll: d4, d6, d8, d10, d12 or d20
        #[arg(long, default_value = "d20")]
        die: Die,
        /// Number of rolls
        #[arg(long, default_value_t = 5)]
        count: u32,
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Run one battle between players and monsters
    Run {
        #[command(flatten)]
        source: EncounterArgs,
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Stop after this many rounds (players lose)
        #[arg(long)]
        max_rounds: Option<u32>,
        /// How creatures choose their attack
        #[arg(long, value_enum, default_value_t = StrategyArg::MaxDamage)]
        strategy: StrategyArg,
        /// Print the round-by-round log
        #[arg(long, default_value_t = false)]
        log: bool,
        /// Print the full result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Check an encounter file and list every problem
    Validate {
        #[command(flatten)]
        source: EncounterArgs,
    },
    /// List the built-in encounters
    Encounters {
        /// Print as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Parser)]
#[command(name = "cabasi")]
#[command(about = "Cabasi battle simulator")]
struct Cli {
    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Serialize)]
struct EncounterListing {
    id: &'static str,
    name: String,
    players: usize,
    monsters: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Cmd::Roll { die, count, seed } => {
            let mut rng = SeededRng::from_seed(seed);
            for _ in 0..count {
                println!("{}", die.roll(&mut rng));
            }
        }
        Cmd::Run {
            source,
            seed,
            max_rounds,
            strategy,
            log,
            json,
        } => {
            let encounter = source.load()?;
            let cfg = BattleConfig {
                seed,
                max_rounds,
                pick_attack: strategy.into(),
                ..BattleConfig::default()
            };
            let res = api::simulate_encounter(&cfg, &encounter)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&res)?);
            } else {
                if log {
                    for line in &res.log {
                        println!("{}", line);
                    }
                }
                println!(
                    "winner={} rounds={} ({})",
                    res.winner, res.rounds, res.end
                );
            }
        }
        Cmd::Validate { source } => {
            let encounter = source.load()?;
            match validate_rosters(&encounter.players, &encounter.monsters) {
                Ok(()) => println!("ok"),
                Err(errs) => {
                    for err in errs.errors() {
                        println!("{}", err);
                    }
                    bail!("{} validation error(s)", errs.len());
                }
            }
        }
        Cmd::Encounters { json } => {
            let mut listing = Vec::new();
            for &id in builtin_encounters().keys() {
                let encounter = api::builtin_encounter(id)?;
                listing.push(EncounterListing {
                    id,
                    name: encounter.name,
                    players: encounter.players.len(),
                    monsters: encounter.monsters.len(),
                });
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                for e in &listing {
                    println!(
                        "{:<20} {} ({} vs {})",
                        e.id, e.name, e.players, e.monsters
                    );
                }
            }
        }
    }
    Ok(())
}
