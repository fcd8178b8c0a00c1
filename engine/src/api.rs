use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::battle::{Battle, BattleReport, EndReason};
use crate::content::builtin_encounters;
use crate::creature::Creature;
use crate::dice::SeededRng;
use crate::observer::{BattleLog, BattleObserver, NoopObserver};
use crate::strategy::{AttackStrategy, FirstAlive};

/// Text formats accepted for encounters and configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// `.yaml`/`.yml` are YAML; anything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Format::Yaml,
            _ => Format::Json,
        }
    }
}

/// Two rosters ready to fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    #[serde(default)]
    pub name: String,
    pub players: Vec<Creature>,
    pub monsters: Vec<Creature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BattleConfig {
    /// Built-in encounter; takes precedence over everything else.
    #[serde(default)]
    pub encounter_id: Option<String>,
    #[serde(default)]
    pub encounter_path: Option<String>,
    #[serde(default)]
    pub players: Vec<Creature>,
    #[serde(default)]
    pub monsters: Vec<Creature>,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub max_rounds: Option<u32>,
    #[serde(default)]
    pub pick_attack: AttackStrategy,
}

#[derive(Debug, Clone, Serialize)]
pub struct BattleResult {
    pub winner: String,
    pub players_won: bool,
    pub rounds: u32,
    pub end: EndReason,
    pub players: Vec<Creature>,
    pub monsters: Vec<Creature>,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManyStats {
    pub samples: u32,
    pub player_wins: u32,
    pub monster_wins: u32,
    pub avg_rounds: f64,
    pub min_rounds: u32,
    pub max_rounds: u32,
    pub end_reasons: BTreeMap<String, u32>,
}

impl ManyStats {
    pub fn player_win_rate(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            f64::from(self.player_wins) / f64::from(self.samples)
        }
    }
}

fn parse<T: DeserializeOwned>(text: &str, format: Format) -> Result<T> {
    match format {
        Format::Json => serde_json::from_str(text).context("failed to parse JSON"),
        Format::Yaml => serde_yaml::from_str(text).context("failed to parse YAML"),
    }
}

pub fn parse_encounter(text: &str, format: Format) -> Result<Encounter> {
    parse(text, format)
}

pub fn parse_config(text: &str, format: Format) -> Result<BattleConfig> {
    parse(text, format)
}

pub fn load_encounter(path: impl AsRef<Path>) -> Result<Encounter> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read encounter: {}", path.display()))?;
    parse_encounter(&text, Format::from_path(path))
        .with_context(|| format!("invalid encounter: {}", path.display()))
}

pub fn load_config(path: impl AsRef<Path>) -> Result<BattleConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&text, Format::from_path(path))
        .with_context(|| format!("invalid config: {}", path.display()))
}

pub fn builtin_encounter(id: &str) -> Result<Encounter> {
    let text = builtin_encounters()
        .get(id)
        .copied()
        .ok_or_else(|| anyhow!("unknown built-in encounter '{}'", id))?;
    parse_encounter(text, Format::Json)
        .with_context(|| format!("built-in encounter '{}' is malformed", id))
}

/// Picks the rosters a config points at: built-in id, then file, then inline.
pub fn resolve_encounter(cfg: &BattleConfig) -> Result<Encounter> {
    if let Some(id) = cfg.encounter_id.as_deref() {
        return builtin_encounter(id);
    }
    if let Some(path) = cfg.encounter_path.as_deref() {
        return load_encounter(path);
    }
    if cfg.players.is_empty() && cfg.monsters.is_empty() {
        bail!("config names no encounter and has no inline rosters");
    }
    Ok(Encounter {
        name: String::new(),
        players: cfg.players.clone(),
        monsters: cfg.monsters.clone(),
    })
}

fn run_one(
    cfg: &BattleConfig,
    encounter: &Encounter,
    seed: u64,
    observer: &mut dyn BattleObserver,
) -> Result<BattleReport> {
    let mut battle = Battle::new(SeededRng::from_seed(seed), cfg.pick_attack, FirstAlive);
    if let Some(max) = cfg.max_rounds {
        battle = battle.with_max_rounds(max);
    }
    battle
        .run_observed(&encounter.players, &encounter.monsters, observer)
        .context("rosters failed validation")
}

/// Runs one seeded battle and records its log.
pub fn simulate_battle(cfg: &BattleConfig) -> Result<BattleResult> {
    simulate_encounter(cfg, &resolve_encounter(cfg)?)
}

/// Like [`simulate_battle`], for an encounter the caller already loaded.
/// The rosters in `cfg` are ignored.
pub fn simulate_encounter(cfg: &BattleConfig, encounter: &Encounter) -> Result<BattleResult> {
    let mut log = BattleLog::new();
    let report = run_one(cfg, encounter, cfg.seed, &mut log)?;

    let mut lines = Vec::new();
    if !encounter.name.is_empty() {
        lines.push(format!("[START] {}", encounter.name));
    }
    lines.extend(log.into_lines());

    Ok(BattleResult {
        winner: if report.players_won { "players" } else { "monsters" }.to_string(),
        players_won: report.players_won,
        rounds: report.rounds,
        end: report.end,
        players: report.players,
        monsters: report.monsters,
        log: lines,
    })
}

/// Runs `trials` battles; trial `i` uses seed `cfg.seed + i`.
pub fn simulate_many(cfg: &BattleConfig, trials: u32) -> Result<ManyStats> {
    simulate_encounter_many(cfg, &resolve_encounter(cfg)?, trials)
}

/// Like [`simulate_many`], for an encounter the caller already loaded.
pub fn simulate_encounter_many(
    cfg: &BattleConfig,
    encounter: &Encounter,
    trials: u32,
) -> Result<ManyStats> {
    let mut stats = ManyStats {
        samples: trials,
        player_wins: 0,
        monster_wins: 0,
        avg_rounds: 0.0,
        min_rounds: 0,
        max_rounds: 0,
        end_reasons: BTreeMap::new(),
    };
    let mut total_rounds = 0u64;

    for i in 0..trials {
        let seed = cfg.seed.wrapping_add(u64::from(i));
        let report = run_one(cfg, encounter, seed, &mut NoopObserver)?;

        if report.players_won {
            stats.player_wins += 1;
        } else {
            stats.monster_wins += 1;
        }
        total_rounds += u64::from(report.rounds);
        stats.min_rounds = if i == 0 {
            report.rounds
        } else {
            stats.min_rounds.min(report.rounds)
        };
        stats.max_rounds = stats.max_rounds.max(report.rounds);
        *stats.end_reasons.entry(report.end.to_string()).or_insert(0) += 1;
    }

    if trials > 0 {
        stats.avg_rounds = total_rounds as f64 / f64::from(trials);
    }
    Ok(stats)
}
