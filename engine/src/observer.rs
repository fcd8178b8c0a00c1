//! Hooks for watching a battle unfold.
//!
//! Observers see rolls and results as they happen but cannot change them.

use crate::attack::{Attack, Characteristic};
use crate::battle::EndReason;
use crate::combat::Damage;
use crate::creature::{Creature, Side};
use crate::dice::Die;

/// A single attack roll against a single defender.
#[derive(Debug, Clone, Copy)]
pub struct AttackRoll<'a> {
    pub attacker: &'a Creature,
    pub attack: &'a Attack,
    pub defender: &'a Creature,
    /// Die after detachment modifiers.
    pub die: Die,
    /// Highest of the dice rolled.
    pub value: u8,
}

/// Before/after values of a hit that landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedDamage {
    pub damage: Damage,
    pub hp_before: u8,
    pub hp_after: u8,
    /// The damaged characteristic, before and after (after any save).
    pub value_before: u8,
    pub value_after: u8,
}

#[allow(unused_variables)]
pub trait BattleObserver {
    fn round_started(&mut self, round: u32) {}
    fn half_round_started(&mut self, attackers: Side) {}
    fn attack_rolled(&mut self, roll: &AttackRoll<'_>) {}
    fn damage_resolved(&mut self, defender: &Creature, damage: Damage) {}
    fn critical_save(&mut self, creature: &Creature, roll: u8, passed: bool) {}
    fn damage_applied(&mut self, creature: &Creature, applied: &AppliedDamage) {}
    fn battle_ended(&mut self, players_won: bool, rounds: u32, reason: EndReason) {}
}

/// Ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl BattleObserver for NoopObserver {}

/// Records a human-readable line per event.
#[derive(Debug, Default, Clone)]
pub struct BattleLog {
    lines: Vec<String>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl BattleObserver for BattleLog {
    fn round_started(&mut self, round: u32) {
        self.lines.push(format!("[ROUND] {}", round));
    }

    fn half_round_started(&mut self, attackers: Side) {
        self.lines.push(format!(
            "[TURN] {}s attack {}s",
            attackers,
            attackers.opponent()
        ));
    }

    fn attack_rolled(&mut self, roll: &AttackRoll<'_>) {
        let dice = if roll.attack.dice_count > 1 {
            format!("{}{} (keep highest)", roll.attack.dice_count, roll.die)
        } else {
            roll.die.to_string()
        };
        self.lines.push(format!(
            "[ROLL][{}] {} → {}: {} = {}",
            roll.attacker.name, roll.attack.name, roll.defender.name, dice, roll.value
        ));
    }

    fn damage_resolved(&mut self, defender: &Creature, damage: Damage) {
        if damage.value == 0 {
            self.lines
                .push(format!("[DMG][{}] no damage gets through", defender.name));
        } else {
            self.lines.push(format!(
                "[DMG][{}] takes {} {}",
                defender.name, damage.value, damage.characteristic
            ));
        }
    }

    fn critical_save(&mut self, creature: &Creature, roll: u8, passed: bool) {
        self.lines.push(format!(
            "[SAVE][{}] d20={} vs STR {} → {}",
            creature.name,
            roll,
            creature.str_,
            if passed { "SUCCESS" } else { "FAIL" }
        ));
    }

    fn damage_applied(&mut self, creature: &Creature, applied: &AppliedDamage) {
        let line = match applied.damage.characteristic {
            Characteristic::Str => format!(
                "[HP][{}] {} → {}, STR {} → {}",
                creature.name,
                applied.hp_before,
                applied.hp_after,
                applied.value_before,
                applied.value_after
            ),
            other => format!(
                "[{}][{}] {} → {}",
                other, creature.name, applied.value_before, applied.value_after
            ),
        };
        self.lines.push(line);
        if creature.is_out() {
            self.lines
                .push(format!("[OUT][{}] is out of the battle", creature.name));
        }
    }

    fn battle_ended(&mut self, players_won: bool, rounds: u32, reason: EndReason) {
        self.lines.push(format!(
            "[END] winner={} rounds={} ({})",
            if players_won { "players" } else { "monsters" },
            rounds,
            reason
        ));
    }
}
