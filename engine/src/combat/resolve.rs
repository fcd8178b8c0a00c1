use serde::{Deserialize, Serialize};

use crate::attack::{Attack, Characteristic};
use crate::combat::assign::{Assignment, Assignments};
use crate::creature::Creature;
use crate::dice::{Die, RandomSource};
use crate::observer::{AttackRoll, BattleObserver};

/// Damage a defender takes this half-round. Only one hit lands per defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Damage {
    pub characteristic: Characteristic,
    pub value: u8,
}

impl Damage {
    pub fn new(characteristic: Characteristic, value: u8) -> Self {
        Self {
            characteristic,
            value,
        }
    }
}

/// Die actually rolled for `attack` when `attacker` hits `defender`.
///
/// A detachment attacking an individual is enhanced to a d12. An individual
/// attacking a detachment is impaired to a d4, unless the attack is a blast.
pub fn effective_die(attacker: &Creature, attack: &Attack, defender: &Creature) -> Die {
    match (attacker.is_detachment, defender.is_detachment) {
        (true, false) => Die::D12,
        (false, true) if !attack.is_blast => Die::D4,
        _ => attack.die,
    }
}

/// The attacker and attack behind an assignment, if it can still be rolled.
fn usable<'a>(attackers: &'a [Creature], assigned: Assignment) -> Option<(&'a Creature, &'a Attack)> {
    let attacker = attackers.get(assigned.attacker)?;
    if attacker.is_out() {
        return None;
    }
    let attack = attacker.attacks.get(assigned.attack)?;
    if attack.is_depleted() {
        return None;
    }
    Some((attacker, attack))
}

/// Rolls every assignment and records the single highest hit per defender.
///
/// `out` is reset to one `(STR, 0)` entry per defender. Defenders already out
/// and defenders nobody targets keep the default. Armor only soaks STR damage,
/// and only when the hit is at least as large as the armor.
pub fn resolve_attacks(
    out: &mut Vec<Damage>,
    attackers: &[Creature],
    defenders: &[Creature],
    assignments: &Assignments,
    rng: &mut impl RandomSource,
    observer: &mut dyn BattleObserver,
) {
    out.clear();
    out.resize(defenders.len(), Damage::default());

    for (defender_idx, bucket) in assignments.iter() {
        let Some(defender) = defenders.get(defender_idx) else {
            continue;
        };
        if defender.is_out() || bucket.is_empty() {
            continue;
        }

        let mut best = Damage::default();
        for &assigned in bucket {
            let Some((attacker, attack)) = usable(attackers, assigned) else {
                continue;
            };
            let die = effective_die(attacker, attack, defender);
            let value = die.roll_highest(attack.dice_count, rng);
            tracing::trace!(
                attacker = %attacker.id,
                defender = %defender.id,
                attack = %attack.name,
                %die,
                dice = attack.dice_count,
                value,
                "attack rolled"
            );
            observer.attack_rolled(&AttackRoll {
                attacker,
                attack,
                defender,
                die,
                value,
            });
            if value > best.value {
                best = Damage::new(attack.target, value);
            }
        }

        if best.characteristic == Characteristic::Str
            && defender.armor > 0
            && best.value >= defender.armor
        {
            best.value -= defender.armor;
        }

        out[defender_idx] = best;
        observer.damage_resolved(defender, best);
    }
}

/// Spends one charge of each attack assigned this half-round.
///
/// An attacker is charged once even if its attack went at several defenders,
/// and whether or not those defenders were still standing. Attackers that are
/// out and depleted attacks are not charged. Must run against the same
/// attackers `resolve_attacks` saw, before damage is applied. `used` is
/// scratch space indexed by attacker.
pub fn consume_charges(
    used: &mut Vec<Option<usize>>,
    attackers: &mut [Creature],
    assignments: &Assignments,
) {
    used.clear();
    used.resize(attackers.len(), None);

    for (_, bucket) in assignments.iter() {
        for &assigned in bucket {
            if usable(attackers, assigned).is_some() {
                used[assigned.attacker] = Some(assigned.attack);
            }
        }
    }

    for (attacker, attack) in used.iter().enumerate() {
        if let Some(attack) = *attack {
            attackers[attacker].attacks[attack].consume_charge();
        }
    }
}

/// Nothing the attackers rolled got through.
pub fn no_damage_done(damage: &[Damage]) -> bool {
    damage.iter().all(|d| d.value == 0)
}
