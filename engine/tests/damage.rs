use cabasi::combat::{apply_damage, apply_damage_to, Damage};
use cabasi::{
    Attack, Characteristic, Creature, CreatureId, Die, FixedRng, MaxRng, NoopObserver,
    ScriptedRng,
};

fn creature(str_: u8, dex: u8, wil: u8, hp: u8) -> Creature {
    Creature {
        id: CreatureId::new("c"),
        name: "John Appleseed".into(),
        attacks: vec![Attack::new("Spear", Characteristic::Str, Die::D6)],
        str_,
        dex,
        wil,
        hp,
        armor: 0,
        is_detachment: false,
    }
}

fn hit(c: &mut Creature, characteristic: Characteristic, value: u8, rng: &mut impl cabasi::RandomSource) {
    apply_damage_to(c, Damage::new(characteristic, value), rng, &mut NoopObserver);
}

#[test]
fn str_damage_within_hp_only_costs_hp() {
    let mut c = creature(8, 14, 8, 4);
    // No save may be rolled.
    let mut rng = ScriptedRng::new(vec![]);
    hit(&mut c, Characteristic::Str, 3, &mut rng);
    assert_eq!((c.hp, c.str_), (1, 8));

    hit(&mut c, Characteristic::Str, 1, &mut rng);
    assert_eq!((c.hp, c.str_), (0, 8));
    assert!(!c.is_out());
}

#[test]
fn excess_damage_hits_str_and_a_failed_save_takes_the_creature_out() {
    let mut c = creature(8, 14, 8, 4);
    hit(&mut c, Characteristic::Str, 6, &mut MaxRng);
    assert_eq!(c.hp, 0);
    assert_eq!(c.str_, 0);
    assert!(c.is_out());
}

#[test]
fn passed_save_keeps_the_reduced_str() {
    let mut c = creature(8, 14, 8, 4);
    // d20 lands on 6, equal to the reduced STR.
    hit(&mut c, Characteristic::Str, 6, &mut FixedRng(5));
    assert_eq!((c.hp, c.str_), (0, 6));
    assert!(!c.is_out());

    // Already at 0 HP: everything comes off STR. d20 lands on 7 > 5.
    hit(&mut c, Characteristic::Str, 1, &mut FixedRng(6));
    assert_eq!((c.hp, c.str_), (0, 0));
}

#[test]
fn excess_at_least_str_skips_the_save() {
    let mut c = creature(10, 14, 8, 2);
    let mut rng = ScriptedRng::new(vec![]);
    hit(&mut c, Characteristic::Str, 12, &mut rng);
    assert_eq!((c.hp, c.str_), (0, 0));
}

#[test]
fn dex_and_wil_damage_bypass_hp_and_stop_at_zero() {
    let mut c = creature(8, 14, 8, 4);
    let mut rng = ScriptedRng::new(vec![]);
    hit(&mut c, Characteristic::Wil, 3, &mut rng);
    assert_eq!((c.hp, c.wil), (4, 5));
    assert!(!c.is_out());

    hit(&mut c, Characteristic::Dex, 20, &mut rng);
    assert_eq!((c.hp, c.dex), (4, 0));
    assert!(c.is_out());
}

#[test]
fn out_creatures_and_zero_damage_are_left_alone() {
    let mut out = creature(0, 14, 8, 0);
    let before = out.clone();
    let mut rng = ScriptedRng::new(vec![]);
    hit(&mut out, Characteristic::Dex, 5, &mut rng);
    assert_eq!(out, before);

    let mut c = creature(8, 14, 8, 4);
    let before = c.clone();
    hit(&mut c, Characteristic::Str, 0, &mut rng);
    assert_eq!(c, before);
}

#[test]
fn side_damage_is_applied_index_by_index() {
    let mut side = vec![creature(8, 14, 8, 4), creature(8, 14, 8, 4), creature(8, 14, 8, 4)];
    let damage = vec![
        Damage::new(Characteristic::Str, 2),
        Damage::default(),
        Damage::new(Characteristic::Wil, 8),
    ];
    let mut rng = ScriptedRng::new(vec![]);
    apply_damage(&mut side, &damage, &mut rng, &mut NoopObserver);

    assert_eq!(side[0].hp, 2);
    assert_eq!(side[1], creature(8, 14, 8, 4));
    assert_eq!(side[2].wil, 0);
    assert!(side[2].is_out());
}

#[test]
fn short_damage_list_leaves_the_rest_untouched() {
    let mut side = vec![creature(8, 14, 8, 4), creature(8, 14, 8, 4)];
    let mut rng = ScriptedRng::new(vec![]);
    apply_damage(
        &mut side,
        &[Damage::new(Characteristic::Dex, 4)],
        &mut rng,
        &mut NoopObserver,
    );
    assert_eq!(side[0].dex, 10);
    assert_eq!(side[1], creature(8, 14, 8, 4));
}
