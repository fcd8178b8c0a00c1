use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dice::Die;
use crate::error::AttackError;

/// Core creature characteristic; also what an attack damages.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Characteristic {
    #[default]
    Str,
    Dex,
    Wil,
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Characteristic::Str => "STR",
            Characteristic::Dex => "DEX",
            Characteristic::Wil => "WIL",
        })
    }
}

/// Remaining uses of an attack when it never runs out.
pub const UNLIMITED_CHARGES: i8 = -1;

/// A single way of hurting a creature: a weapon, a spell, a breath.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    pub name: String,
    pub target: Characteristic,
    pub die: Die,
    #[serde(default = "default_dice_count")]
    pub dice_count: u8,
    /// Negative means unlimited.
    #[serde(default = "default_charges")]
    pub charges: i8,
    #[serde(default)]
    pub is_blast: bool,
}

fn default_dice_count() -> u8 {
    1
}

fn default_charges() -> i8 {
    UNLIMITED_CHARGES
}

impl Attack {
    /// One die, unlimited charges, single target.
    pub fn new(name: impl Into<String>, target: Characteristic, die: Die) -> Self {
        Self {
            name: name.into(),
            target,
            die,
            dice_count: 1,
            charges: UNLIMITED_CHARGES,
            is_blast: false,
        }
    }

    pub fn with_dice_count(mut self, dice_count: u8) -> Self {
        self.dice_count = dice_count;
        self
    }

    pub fn with_charges(mut self, charges: i8) -> Self {
        self.charges = charges;
        self
    }

    pub fn blast(mut self) -> Self {
        self.is_blast = true;
        self
    }

    pub fn has_unlimited_charges(&self) -> bool {
        self.charges < 0
    }

    /// Out of charges; the engine never restores them.
    pub fn is_depleted(&self) -> bool {
        self.charges == 0
    }

    /// Spends one charge unless unlimited or already depleted.
    pub fn consume_charge(&mut self) {
        if self.charges > 0 {
            self.charges -= 1;
        }
    }

    /// Checks a freshly created attack and lists every problem found.
    pub fn validate(&self) -> Result<(), Vec<AttackError>> {
        let mut errs = Vec::new();
        if self.name.is_empty() {
            errs.push(AttackError::MissingName);
        }
        if self.dice_count == 0 {
            errs.push(AttackError::ZeroDiceCount);
        }
        if errs.is_empty() { Ok(()) } else { Err(errs) }
    }
}

impl fmt::Display for Attack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}{} {}", self.name, self.dice_count, self.die, self.target)?;
        if self.is_blast {
            f.write_str(", blast")?;
        }
        if !self.has_unlimited_charges() {
            write!(f, ", {} charges", self.charges)?;
        }
        f.write_str(")")
    }
}
