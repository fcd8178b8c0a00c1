use crate::attack::Characteristic;
use crate::combat::resolve::Damage;
use crate::creature::Creature;
use crate::dice::{Die, RandomSource};
use crate::observer::{AppliedDamage, BattleObserver};

/// Applies resolved damage index-by-index to a side.
///
/// Creatures already out and zero damage are skipped. Entries past the end of
/// either slice are ignored.
pub fn apply_damage(
    creatures: &mut [Creature],
    damage: &[Damage],
    rng: &mut impl RandomSource,
    observer: &mut dyn BattleObserver,
) {
    for (creature, &dmg) in creatures.iter_mut().zip(damage) {
        apply_damage_to(creature, dmg, rng, observer);
    }
}

/// Applies one hit to one creature.
///
/// STR damage goes through HP first. Whatever HP cannot absorb comes off STR,
/// and a creature left standing must then roll a d20 at or under its new STR
/// or be taken out. DEX and WIL damage bypass HP and stop at 0.
pub fn apply_damage_to(
    creature: &mut Creature,
    damage: Damage,
    rng: &mut impl RandomSource,
    observer: &mut dyn BattleObserver,
) {
    if creature.is_out() || damage.value == 0 {
        return;
    }

    let hp_before = creature.hp;
    let value_before = creature.characteristic(damage.characteristic);

    match damage.characteristic {
        Characteristic::Str => apply_str_damage(creature, damage.value, rng, observer),
        Characteristic::Dex => creature.dex = creature.dex.saturating_sub(damage.value),
        Characteristic::Wil => creature.wil = creature.wil.saturating_sub(damage.value),
    }

    let applied = AppliedDamage {
        damage,
        hp_before,
        hp_after: creature.hp,
        value_before,
        value_after: creature.characteristic(damage.characteristic),
    };
    tracing::trace!(
        creature = %creature.id,
        characteristic = %damage.characteristic,
        value = damage.value,
        hp_before,
        hp_after = creature.hp,
        out = creature.is_out(),
        "damage applied"
    );
    observer.damage_applied(creature, &applied);
}

fn apply_str_damage(
    creature: &mut Creature,
    value: u8,
    rng: &mut impl RandomSource,
    observer: &mut dyn BattleObserver,
) {
    if value <= creature.hp {
        creature.hp -= value;
        return;
    }

    let excess = value - creature.hp;
    creature.hp = 0;
    if excess >= creature.str_ {
        creature.str_ = 0;
        return;
    }

    creature.str_ -= excess;
    let roll = Die::D20.roll(rng);
    let passed = roll <= creature.str_;
    observer.critical_save(creature, roll, passed);
    if !passed {
        creature.str_ = 0;
    }
}
