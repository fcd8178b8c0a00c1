use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attack::{Attack, Characteristic};
use crate::error::{AttackError, CreatureError};

pub const CHARACTERISTIC_MIN: u8 = 1;
pub const CHARACTERISTIC_MAX: u8 = 20;
pub const HP_MIN: u8 = 1;
pub const ARMOR_MAX: u8 = 3;

/// Identity of a creature, unique across both sides of a battle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatureId(String);

impl CreatureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl From<&str> for CreatureId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CreatureId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Which group a creature fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Players,
    Monsters,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Players => Side::Monsters,
            Side::Monsters => Side::Players,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Players => "player",
            Side::Monsters => "monster",
        })
    }
}

/// A player or a monster.
///
/// Characteristics start in `[1, 20]`; during a battle any of them may drop to
/// 0, which takes the creature out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub name: String,
    pub attacks: Vec<Attack>,
    #[serde(rename = "str")]
    pub str_: u8,
    pub dex: u8,
    pub wil: u8,
    pub hp: u8,
    #[serde(default)]
    pub armor: u8,
    #[serde(default)]
    pub is_detachment: bool,
}

impl Creature {
    /// Out of the battle: dead, incapacitated, or otherwise spent.
    pub fn is_out(&self) -> bool {
        self.str_ == 0 || self.dex == 0 || self.wil == 0
    }

    pub fn characteristic(&self, c: Characteristic) -> u8 {
        match c {
            Characteristic::Str => self.str_,
            Characteristic::Dex => self.dex,
            Characteristic::Wil => self.wil,
        }
    }

    /// Checks a freshly created creature. Not meant for one in the middle of a
    /// battle, whose characteristics may legitimately be 0.
    pub fn validate(&self) -> Result<(), Vec<CreatureError>> {
        let mut errs = Vec::new();

        if self.id.is_empty() {
            errs.push(CreatureError::MissingId);
        }
        if self.name.is_empty() {
            errs.push(CreatureError::MissingName);
        }
        if self.attacks.is_empty() {
            errs.push(CreatureError::NoAttacks);
        }
        for (index, attack) in self.attacks.iter().enumerate() {
            if let Err(attack_errs) = attack.validate() {
                errs.extend(attack_errs.into_iter().map(|source: AttackError| {
                    CreatureError::InvalidAttack { index, source }
                }));
            }
        }

        for c in [Characteristic::Str, Characteristic::Dex, Characteristic::Wil] {
            let value = self.characteristic(c);
            if !(CHARACTERISTIC_MIN..=CHARACTERISTIC_MAX).contains(&value) {
                errs.push(CreatureError::CharacteristicOutOfRange {
                    characteristic: c,
                    value,
                    min: CHARACTERISTIC_MIN,
                    max: CHARACTERISTIC_MAX,
                });
            }
        }

        if self.hp < HP_MIN {
            errs.push(CreatureError::HpTooLow {
                value: self.hp,
                min: HP_MIN,
            });
        }
        if self.armor > ARMOR_MAX {
            errs.push(CreatureError::ArmorTooHigh {
                value: self.armor,
                max: ARMOR_MAX,
            });
        }

        if errs.is_empty() { Ok(()) } else { Err(errs) }
    }
}

impl fmt::Display for Creature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] STR {} DEX {} WIL {} HP {} armor {}",
            self.name, self.id.0, self.str_, self.dex, self.wil, self.hp, self.armor
        )?;
        if self.is_detachment {
            f.write_str(" (detachment)")?;
        }
        Ok(())
    }
}

/// True when nobody in the roster can fight on.
pub fn all_out(roster: &[Creature]) -> bool {
    roster.iter().all(Creature::is_out)
}
