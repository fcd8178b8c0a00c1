use cabasi::api::{
    builtin_encounter, parse_config, parse_encounter, resolve_encounter, simulate_battle,
    simulate_encounter, simulate_encounter_many, simulate_many, BattleConfig, Format,
};
use cabasi::content::builtin_encounters;
use cabasi::{validate_rosters, AttackStrategy, Characteristic, Die};

#[test]
fn every_builtin_encounter_is_valid() {
    for &id in builtin_encounters().keys() {
        let encounter = builtin_encounter(id).unwrap();
        assert!(!encounter.name.is_empty(), "{} has no name", id);
        validate_rosters(&encounter.players, &encounter.monsters)
            .unwrap_or_else(|errs| panic!("{} is invalid:\n{}", id, errs));
    }
}

#[test]
fn unknown_builtin_is_an_error() {
    let err = builtin_encounter("dragon_hoard").unwrap_err();
    assert!(err.to_string().contains("unknown built-in encounter"));
}

#[test]
fn battle_with_builtin_runs_and_logs() {
    let cfg = BattleConfig {
        encounter_id: Some("goblin_ambush".into()),
        seed: 2025,
        ..BattleConfig::default()
    };
    let res = simulate_battle(&cfg).unwrap();
    assert!(res.rounds > 0);
    assert_eq!(res.winner, if res.players_won { "players" } else { "monsters" });
    assert!(res.log[0].starts_with("[START] "));
    assert!(res.log[1].starts_with("[ROUND] 1"));
    assert!(res.log.last().unwrap().starts_with("[END] "));
}

#[test]
fn same_config_same_result() {
    let cfg = BattleConfig {
        encounter_id: Some("bandit_detachment".into()),
        seed: 7,
        ..BattleConfig::default()
    };
    let a = simulate_battle(&cfg).unwrap();
    let b = simulate_battle(&cfg).unwrap();
    assert_eq!(a.log, b.log);
    assert_eq!(a.players, b.players);
    assert_eq!(a.monsters, b.monsters);
}

#[test]
fn loaded_encounter_keeps_its_name_in_the_log() {
    let encounter = builtin_encounter("ogre_duel").unwrap();
    let cfg = BattleConfig {
        seed: 11,
        ..BattleConfig::default()
    };
    let res = simulate_encounter(&cfg, &encounter).unwrap();
    assert_eq!(res.log[0], format!("[START] {}", encounter.name));
    assert_eq!(res.log.iter().filter(|l| l.starts_with("[START]")).count(), 1);

    let by_id = simulate_battle(&BattleConfig {
        encounter_id: Some("ogre_duel".into()),
        ..cfg.clone()
    })
    .unwrap();
    assert_eq!(res.log, by_id.log);
}

#[test]
fn loaded_encounter_many_matches_builtin_id() {
    let encounter = builtin_encounter("bandit_detachment").unwrap();
    let cfg = BattleConfig {
        seed: 3,
        ..BattleConfig::default()
    };
    let direct = simulate_encounter_many(&cfg, &encounter, 10).unwrap();
    let by_id = simulate_many(
        &BattleConfig {
            encounter_id: Some("bandit_detachment".into()),
            ..cfg.clone()
        },
        10,
    )
    .unwrap();
    assert_eq!(direct.player_wins, by_id.player_wins);
    assert_eq!(direct.end_reasons, by_id.end_reasons);
}

#[test]
fn many_summary_makes_sense() {
    let cfg = BattleConfig {
        encounter_id: Some("ogre_duel".into()),
        seed: 1,
        ..BattleConfig::default()
    };
    let stats = simulate_many(&cfg, 50).unwrap();
    assert_eq!(stats.samples, 50);
    assert_eq!(stats.player_wins + stats.monster_wins, 50);
    assert_eq!(stats.end_reasons.values().sum::<u32>(), 50);
    assert!(stats.min_rounds >= 1);
    assert!(stats.min_rounds <= stats.max_rounds);
    assert!(stats.avg_rounds >= f64::from(stats.min_rounds));
    assert!(stats.avg_rounds <= f64::from(stats.max_rounds));
    assert!((0.0..=1.0).contains(&stats.player_win_rate()));
}

#[test]
fn zero_trials_is_an_empty_summary() {
    let cfg = BattleConfig {
        encounter_id: Some("ogre_duel".into()),
        ..BattleConfig::default()
    };
    let stats = simulate_many(&cfg, 0).unwrap();
    assert_eq!(stats.samples, 0);
    assert_eq!(stats.player_win_rate(), 0.0);
    assert!(stats.end_reasons.is_empty());
}

#[test]
fn round_cap_from_config_is_honoured() {
    let cfg = BattleConfig {
        encounter_id: Some("goblin_ambush".into()),
        max_rounds: Some(1),
        ..BattleConfig::default()
    };
    let res = simulate_battle(&cfg).unwrap();
    assert_eq!(res.rounds, 1);
}

#[test]
fn empty_config_is_rejected() {
    let err = resolve_encounter(&BattleConfig::default()).unwrap_err();
    assert!(err.to_string().contains("no encounter"));
}

#[test]
fn invalid_inline_rosters_are_reported() {
    let mut encounter = builtin_encounter("ogre_duel").unwrap();
    encounter.monsters[0].id = encounter.players[0].id.clone();
    let cfg = BattleConfig {
        players: encounter.players,
        monsters: encounter.monsters,
        ..BattleConfig::default()
    };
    let err = simulate_battle(&cfg).unwrap_err();
    assert!(format!("{:#}", err).contains("non-unique ID"));
}

#[test]
fn encounters_read_from_yaml() {
    let yaml = r#"
name: Cellar rats
players:
  - id: p
    name: Pip
    attacks:
      - { name: Cudgel, target: STR, die: d6 }
    str: 10
    dex: 12
    wil: 9
    hp: 4
monsters:
  - id: rats
    name: Rat swarm
    attacks:
      - { name: Gnaw, target: DEX, die: d4, dice_count: 2 }
    str: 6
    dex: 14
    wil: 3
    hp: 5
    is_detachment: true
"#;
    let encounter = parse_encounter(yaml, Format::Yaml).unwrap();
    assert_eq!(encounter.name, "Cellar rats");
    let gnaw = &encounter.monsters[0].attacks[0];
    assert_eq!(gnaw.target, Characteristic::Dex);
    assert_eq!(gnaw.die, Die::D4);
    assert_eq!(gnaw.dice_count, 2);
    assert!(gnaw.has_unlimited_charges());
    assert!(encounter.monsters[0].is_detachment);
    assert_eq!(encounter.players[0].armor, 0);
}

#[test]
fn config_reads_strategy_and_seed() {
    let cfg = parse_config(
        r#"{ "encounter_id": "ogre_duel", "seed": 99, "max_rounds": 40, "pick_attack": "first_usable" }"#,
        Format::Json,
    )
    .unwrap();
    assert_eq!(cfg.encounter_id.as_deref(), Some("ogre_duel"));
    assert_eq!(cfg.seed, 99);
    assert_eq!(cfg.max_rounds, Some(40));
    assert_eq!(cfg.pick_attack, AttackStrategy::FirstUsable);
}

#[test]
fn unknown_die_fails_to_parse() {
    let json = r#"{ "players": [], "monsters": [{ "id": "m", "name": "M", "attacks": [{ "name": "Bite", "target": "STR", "die": "d7" }], "str": 5, "dex": 5, "wil": 5, "hp": 1 }] }"#;
    assert!(parse_encounter(json, Format::Json).is_err());
}
