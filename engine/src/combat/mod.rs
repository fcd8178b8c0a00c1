//! One half-round of combat, in the order it happens: attackers are
//! assigned to defenders, their attacks are resolved into at most one hit per
//! defender, and the hits are applied.

pub mod assign;
pub mod damage;
pub mod resolve;

pub use assign::{assign_attackers, Assignment, Assignments, Pick};
pub use damage::{apply_damage, apply_damage_to};
pub use resolve::{consume_charges, effective_die, no_damage_done, resolve_attacks, Damage};
