use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// The only source of randomness the engine consumes.
///
/// Implementations return a uniform integer in `[0, n)` and must panic when
/// `n == 0`. Every roll in a battle goes through this one method, so swapping
/// the source (seeded, scripted, fixed) makes outcomes reproducible.
pub trait RandomSource {
    fn uniform_below(&mut self, n: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform_below(&mut self, n: u32) -> u32 {
        (**self).uniform_below(n)
    }
}

/// ChaCha-backed source; the same seed always yields the same battle.
pub struct SeededRng {
    rng: ChaCha8Rng,
}

impl SeededRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRng {
    fn uniform_below(&mut self, n: u32) -> u32 {
        assert!(n > 0, "uniform_below: n must be greater than 0");
        self.rng.gen_range(0..n)
    }
}

/// Replays a fixed sequence of raw values; panics when it runs dry.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u32>,
    next: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, next: 0 }
    }

    /// Values not consumed yet.
    pub fn remaining(&self) -> usize {
        self.values.len() - self.next
    }
}

impl RandomSource for ScriptedRng {
    fn uniform_below(&mut self, n: u32) -> u32 {
        assert!(n > 0, "ScriptedRng: n must be greater than 0");
        let Some(&value) = self.values.get(self.next) else {
            panic!(
                "ScriptedRng: no more values: idx={}, len={}",
                self.next,
                self.values.len()
            );
        };
        assert!(
            value < n,
            "ScriptedRng: value must be from [0, n={}), got {}",
            n,
            value
        );
        self.next += 1;
        value
    }
}

/// Always answers the same raw value.
#[derive(Debug, Clone, Copy)]
pub struct FixedRng(pub u32);

impl RandomSource for FixedRng {
    fn uniform_below(&mut self, n: u32) -> u32 {
        assert!(n > 0, "FixedRng: n must be greater than 0");
        self.0
    }
}

/// Every die lands on 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinRng;

impl RandomSource for MinRng {
    fn uniform_below(&mut self, n: u32) -> u32 {
        assert!(n > 0, "MinRng: n must be greater than 0");
        0
    }
}

/// Every die lands on its highest face.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxRng;

impl RandomSource for MaxRng {
    fn uniform_below(&mut self, n: u32) -> u32 {
        assert!(n > 0, "MaxRng: n must be greater than 0");
        n - 1
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Die {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
}

impl Die {
    pub const ALL: [Die; 6] = [Die::D4, Die::D6, Die::D8, Die::D10, Die::D12, Die::D20];

    pub const fn sides(self) -> u8 {
        match self {
            Die::D4 => 4,
            Die::D6 => 6,
            Die::D8 => 8,
            Die::D10 => 10,
            Die::D12 => 12,
            Die::D20 => 20,
        }
    }

    pub fn from_sides(sides: u8) -> Option<Die> {
        Die::ALL.into_iter().find(|d| d.sides() == sides)
    }

    /// Single roll in `[1, sides]`.
    pub fn roll(self, rng: &mut impl RandomSource) -> u8 {
        let sides = u32::from(self.sides());
        let raw = rng.uniform_below(sides);
        assert!(
            raw < sides,
            "random source broke its contract: asked for [0, {}), got {}",
            sides,
            raw
        );
        raw as u8 + 1
    }

    /// Rolls `count` dice and keeps the highest; 0 when `count == 0`.
    pub fn roll_highest(self, count: u8, rng: &mut impl RandomSource) -> u8 {
        (0..count).map(|_| self.roll(rng)).max().unwrap_or(0)
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown die {0:?} (expected one of d4, d6, d8, d10, d12, d20)")]
pub struct ParseDieError(String);

impl FromStr for Die {
    type Err = ParseDieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('d')
            .or_else(|| trimmed.strip_prefix('D'))
            .unwrap_or(trimmed);
        digits
            .parse::<u8>()
            .ok()
            .and_then(Die::from_sides)
            .ok_or_else(|| ParseDieError(s.to_string()))
    }
}
