//! Turn-based battle simulator for a rules-light tabletop RPG.
//!
//! Two groups of creatures, players and monsters, trade blows round by round
//! until one side is out, cannot reach the other, or cannot hurt it. Which
//! attack a creature uses and whom it targets are pluggable strategies; all
//! randomness flows through a single [`RandomSource`].

pub mod api;
pub mod attack;
pub mod battle;
pub mod combat;
pub mod content;
pub mod creature;
pub mod dice;
pub mod error;
pub mod observer;
pub mod strategy;

pub use attack::{Attack, Characteristic, UNLIMITED_CHARGES};
pub use battle::{validate_rosters, Battle, BattleReport, EndReason};
pub use combat::Damage;
pub use creature::{all_out, Creature, CreatureId, Side};
pub use dice::{Die, FixedRng, MaxRng, MinRng, RandomSource, ScriptedRng, SeededRng};
pub use error::{AttackError, BattleError, CreatureError, ValidationErrors};
pub use observer::{BattleLog, BattleObserver, NoopObserver};
pub use strategy::{AttackStrategy, FirstAlive, FirstUsable, MaxDamage, PickAttack, PickTargets};
