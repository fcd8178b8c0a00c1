use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use cabasi::api::{self, Encounter, Format};
use cabasi::AttackStrategy;
use clap::{Args, ValueEnum};
use encoding_rs::Encoding;
use tracing_subscriber::EnvFilter;

/// Where the rosters for a battle come from.
#[derive(Args, Debug, Clone)]
pub struct EncounterArgs {
    /// Encounter file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(long, conflicts_with = "encounter")]
    pub file: Option<PathBuf>,

    /// Built-in encounter id (see `cabasi encounters`)
    #[arg(long)]
    pub encounter: Option<String>,
}

impl EncounterArgs {
    pub fn load(&self) -> Result<Encounter> {
        match (&self.file, &self.encounter) {
            (Some(path), _) => read_encounter_auto(path),
            (None, Some(id)) => api::builtin_encounter(id),
            (None, None) => bail!("either --file or --encounter is required"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum StrategyArg {
    #[default]
    MaxDamage,
    FirstUsable,
}

impl From<StrategyArg> for AttackStrategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::MaxDamage => AttackStrategy::MaxDamage,
            StrategyArg::FirstUsable => AttackStrategy::FirstUsable,
        }
    }
}

/// Reads a text file, honouring a UTF-8/UTF-16 byte order mark if present.
pub fn read_text_auto(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8", path.display()))
    }
}

pub fn read_encounter_auto(path: &Path) -> Result<Encounter> {
    let text = read_text_auto(path)?;
    let encounter = api::parse_encounter(&text, Format::from_path(path))
        .with_context(|| format!("invalid encounter: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        players = encounter.players.len(),
        monsters = encounter.monsters.len(),
        "encounter loaded"
    );
    Ok(encounter)
}

/// Logs go to stderr; `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
