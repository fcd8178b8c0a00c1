use std::fmt;

use thiserror::Error;

use crate::attack::Characteristic;
use crate::creature::{CreatureId, Side};

/// A single structural problem with an [`Attack`](crate::Attack).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttackError {
    #[error("attack must have a name")]
    MissingName,
    #[error("dice count must be at least 1")]
    ZeroDiceCount,
}

/// A single structural problem with a freshly created [`Creature`](crate::Creature).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreatureError {
    #[error("creature must have an ID")]
    MissingId,
    #[error("creature must have a name")]
    MissingName,
    #[error("creature must have at least one attack")]
    NoAttacks,
    #[error("invalid attack at idx {index}: {source}")]
    InvalidAttack { index: usize, source: AttackError },
    #[error("{characteristic} must be between {min} and {max}, got {value}")]
    CharacteristicOutOfRange {
        characteristic: Characteristic,
        value: u8,
        min: u8,
        max: u8,
    },
    #[error("HP must be at least {min}, got {value}")]
    HpTooLow { value: u8, min: u8 },
    #[error("armor must be at most {max}, got {value}")]
    ArmorTooHigh { value: u8, max: u8 },
}

/// Why a pair of rosters cannot start a battle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("at least one {0} must be provided")]
    EmptyRoster(Side),
    #[error("invalid {side} at idx {index}: {source}")]
    InvalidCreature {
        side: Side,
        index: usize,
        source: CreatureError,
    },
    #[error("{side} at idx {index} has non-unique ID {id}")]
    DuplicateId {
        side: Side,
        index: usize,
        id: CreatureId,
    },
}

/// Every validation failure found before a battle, reported together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationErrors(pub Vec<BattleError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[BattleError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationErrors {
    type Item = BattleError;
    type IntoIter = std::vec::IntoIter<BattleError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
