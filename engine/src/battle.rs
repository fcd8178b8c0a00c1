use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::combat::{
    apply_damage, assign_attackers, consume_charges, no_damage_done, resolve_attacks,
    Assignments, Damage, Pick,
};
use crate::creature::{all_out, Creature, Side};
use crate::dice::RandomSource;
use crate::error::{BattleError, ValidationErrors};
use crate::observer::{BattleObserver, NoopObserver};
use crate::strategy::{PickAttack, PickTargets};

/// Why a battle stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "side", rename_all = "snake_case")]
pub enum EndReason {
    /// This side could not reach any defender and loses.
    NoTargets(Side),
    /// Every hit this side rolled was soaked or missing; it loses.
    NoDamage(Side),
    /// Every creature on this side is out.
    Eliminated(Side),
    /// The opt-in round cap was hit; the players do not win.
    RoundLimit,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::NoTargets(side) => write!(f, "{}s had no targets", side),
            EndReason::NoDamage(side) => write!(f, "{}s dealt no damage", side),
            EndReason::Eliminated(side) => write!(f, "{}s eliminated", side),
            EndReason::RoundLimit => f.write_str("round limit reached"),
        }
    }
}

/// Full result of a battle, including the final state of both rosters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleReport {
    pub players_won: bool,
    pub rounds: u32,
    pub end: EndReason,
    pub players: Vec<Creature>,
    pub monsters: Vec<Creature>,
}

/// Battle engine: owns the dice and the two decision strategies.
///
/// Each run works on private copies of the rosters it is given, so the same
/// engine can be reused for many battles.
pub struct Battle<R, A, T> {
    rng: R,
    pick_attack: A,
    pick_targets: T,
    max_rounds: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HalfRound {
    Continue,
    NoTargets,
    NoDamage,
    DefendersEliminated,
}

/// Per-side buffers reused from one round to the next.
#[derive(Default)]
struct Scratch {
    picks: Vec<Pick>,
    assignments: Assignments,
    damage: Vec<Damage>,
    used: Vec<Option<usize>>,
}

impl<R, A, T> Battle<R, A, T>
where
    R: RandomSource,
    A: PickAttack,
    T: PickTargets,
{
    pub fn new(rng: R, pick_attack: A, pick_targets: T) -> Self {
        Self {
            rng,
            pick_attack,
            pick_targets,
            max_rounds: None,
        }
    }

    /// Stops after `max_rounds` full rounds. Unbounded by default.
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Runs a battle and returns whether the players won.
    ///
    /// The rosters are validated first; every problem is reported at once and
    /// nothing is copied or mutated on failure. The caller's rosters are never
    /// touched.
    pub fn run(
        &mut self,
        players: &[Creature],
        monsters: &[Creature],
    ) -> Result<bool, ValidationErrors> {
        self.run_observed(players, monsters, &mut NoopObserver)
            .map(|report| report.players_won)
    }

    pub fn run_detailed(
        &mut self,
        players: &[Creature],
        monsters: &[Creature],
    ) -> Result<BattleReport, ValidationErrors> {
        self.run_observed(players, monsters, &mut NoopObserver)
    }

    pub fn run_observed(
        &mut self,
        players: &[Creature],
        monsters: &[Creature],
        observer: &mut dyn BattleObserver,
    ) -> Result<BattleReport, ValidationErrors> {
        validate_rosters(players, monsters)?;

        let mut players = players.to_vec();
        let mut monsters = monsters.to_vec();
        let (players_won, rounds, end) = self.fight(&mut players, &mut monsters, observer);

        info!(players_won, rounds, %end, "battle over");
        observer.battle_ended(players_won, rounds, end);

        Ok(BattleReport {
            players_won,
            rounds,
            end,
            players,
            monsters,
        })
    }

    fn fight(
        &mut self,
        players: &mut [Creature],
        monsters: &mut [Creature],
        observer: &mut dyn BattleObserver,
    ) -> (bool, u32, EndReason) {
        let mut player_scratch = Scratch::default();
        let mut monster_scratch = Scratch::default();
        let mut round = 0u32;

        loop {
            if self.max_rounds.is_some_and(|max| round >= max) {
                return (false, round, EndReason::RoundLimit);
            }
            round += 1;
            debug!(round, "round started");
            observer.round_started(round);

            match self.half_round(Side::Players, players, monsters, &mut player_scratch, observer) {
                HalfRound::Continue => {}
                HalfRound::NoTargets => return (false, round, EndReason::NoTargets(Side::Players)),
                HalfRound::NoDamage => return (false, round, EndReason::NoDamage(Side::Players)),
                HalfRound::DefendersEliminated => {
                    return (true, round, EndReason::Eliminated(Side::Monsters));
                }
            }

            // Morale saves (first casualty, half strength lost) belong here once modeled.

            match self.half_round(Side::Monsters, monsters, players, &mut monster_scratch, observer) {
                HalfRound::Continue => {}
                HalfRound::NoTargets => return (true, round, EndReason::NoTargets(Side::Monsters)),
                HalfRound::NoDamage => return (true, round, EndReason::NoDamage(Side::Monsters)),
                HalfRound::DefendersEliminated => {
                    return (false, round, EndReason::Eliminated(Side::Players));
                }
            }
        }
    }

    fn half_round(
        &mut self,
        side: Side,
        attackers: &mut [Creature],
        defenders: &mut [Creature],
        scratch: &mut Scratch,
        observer: &mut dyn BattleObserver,
    ) -> HalfRound {
        observer.half_round_started(side);

        scratch.picks.clear();
        for attacker in attackers.iter() {
            let pick = self.pick(attacker, defenders);
            scratch.picks.push(pick);
        }

        assign_attackers(&mut scratch.assignments, &scratch.picks, defenders.len());
        if scratch.assignments.is_empty() {
            debug!(%side, "no defender was targeted");
            return HalfRound::NoTargets;
        }

        resolve_attacks(
            &mut scratch.damage,
            attackers,
            defenders,
            &scratch.assignments,
            &mut self.rng,
            observer,
        );
        consume_charges(&mut scratch.used, attackers, &scratch.assignments);
        if no_damage_done(&scratch.damage) {
            debug!(%side, "no damage got through");
            return HalfRound::NoDamage;
        }

        apply_damage(defenders, &scratch.damage, &mut self.rng, observer);
        if all_out(defenders) {
            debug!(%side, "all defenders are out");
            return HalfRound::DefendersEliminated;
        }
        HalfRound::Continue
    }

    fn pick(&self, attacker: &Creature, defenders: &[Creature]) -> Pick {
        if attacker.is_out() {
            return Pick::pass();
        }
        let Some(attack_idx) = self.pick_attack.pick_attack(attacker, defenders) else {
            return Pick::pass();
        };
        let Some(attack) = attacker.attacks.get(attack_idx) else {
            warn!(
                attacker = %attacker.id,
                attack_idx,
                "picked attack index out of range; skipping"
            );
            return Pick::pass();
        };
        Pick {
            attack: Some(attack_idx),
            targets: self.pick_targets.pick_targets(attack, defenders),
        }
    }
}

/// Checks both rosters before a battle and collects every problem.
pub fn validate_rosters(players: &[Creature], monsters: &[Creature]) -> Result<(), ValidationErrors> {
    let mut errs = Vec::new();

    for (side, roster) in [(Side::Players, players), (Side::Monsters, monsters)] {
        if roster.is_empty() {
            errs.push(BattleError::EmptyRoster(side));
        }
        for (index, creature) in roster.iter().enumerate() {
            if let Err(creature_errs) = creature.validate() {
                errs.extend(
                    creature_errs
                        .into_iter()
                        .map(|source| BattleError::InvalidCreature { side, index, source }),
                );
            }
        }
    }

    let mut seen = HashSet::new();
    for (side, roster) in [(Side::Players, players), (Side::Monsters, monsters)] {
        for (index, creature) in roster.iter().enumerate() {
            if !seen.insert(&creature.id) {
                errs.push(BattleError::DuplicateId {
                    side,
                    index,
                    id: creature.id.clone(),
                });
            }
        }
    }

    if errs.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errs))
    }
}
