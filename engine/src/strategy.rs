use serde::{Deserialize, Serialize};

use crate::attack::Attack;
use crate::creature::Creature;

/// Decides which attack a creature uses this half-round.
///
/// Returns an index into `attacker.attacks`, or `None` to sit it out.
pub trait PickAttack {
    fn pick_attack(&self, attacker: &Creature, defenders: &[Creature]) -> Option<usize>;
}

/// Decides which defenders an already chosen attack goes after.
///
/// An empty list means the attacker declines to attack.
pub trait PickTargets {
    fn pick_targets(&self, attack: &Attack, defenders: &[Creature]) -> Vec<usize>;
}

impl<F> PickAttack for F
where
    F: Fn(&Creature, &[Creature]) -> Option<usize>,
{
    fn pick_attack(&self, attacker: &Creature, defenders: &[Creature]) -> Option<usize> {
        self(attacker, defenders)
    }
}

impl<F> PickTargets for F
where
    F: Fn(&Attack, &[Creature]) -> Vec<usize>,
{
    fn pick_targets(&self, attack: &Attack, defenders: &[Creature]) -> Vec<usize> {
        self(attack, defenders)
    }
}

/// Goes for the attack with the biggest die. Blasts count once per defender.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxDamage;

impl PickAttack for MaxDamage {
    fn pick_attack(&self, attacker: &Creature, defenders: &[Creature]) -> Option<usize> {
        if attacker.is_out() || defenders.iter().all(Creature::is_out) {
            return None;
        }

        let mut best: Option<(usize, usize)> = None;
        for (idx, attack) in attacker.attacks.iter().enumerate() {
            if attack.is_depleted() {
                continue;
            }
            let mut score = usize::from(attack.die.sides());
            if attack.is_blast {
                score *= defenders.len();
            }
            if best.is_none_or(|(_, max)| score > max) {
                best = Some((idx, score));
            }
        }
        best.map(|(idx, _)| idx)
    }
}

/// First attack that still has charges.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstUsable;

impl PickAttack for FirstUsable {
    fn pick_attack(&self, attacker: &Creature, defenders: &[Creature]) -> Option<usize> {
        if attacker.is_out() || defenders.iter().all(Creature::is_out) {
            return None;
        }
        attacker.attacks.iter().position(|a| !a.is_depleted())
    }
}

/// First defender still standing, or all of them for a blast.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAlive;

impl PickTargets for FirstAlive {
    fn pick_targets(&self, attack: &Attack, defenders: &[Creature]) -> Vec<usize> {
        if attack.is_depleted() {
            return Vec::new();
        }
        let alive = defenders
            .iter()
            .enumerate()
            .filter(|(_, d)| !d.is_out())
            .map(|(idx, _)| idx);
        if attack.is_blast {
            alive.collect()
        } else {
            alive.take(1).collect()
        }
    }
}

/// Attack-picking strategies selectable from config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackStrategy {
    #[default]
    MaxDamage,
    FirstUsable,
}

impl PickAttack for AttackStrategy {
    fn pick_attack(&self, attacker: &Creature, defenders: &[Creature]) -> Option<usize> {
        match self {
            AttackStrategy::MaxDamage => MaxDamage.pick_attack(attacker, defenders),
            AttackStrategy::FirstUsable => FirstUsable.pick_attack(attacker, defenders),
        }
    }
}
