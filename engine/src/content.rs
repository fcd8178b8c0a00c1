use indexmap::IndexMap;

/// Encounter JSON compiled into the crate, in a stable listing order.
pub fn builtin_encounters() -> IndexMap<&'static str, &'static str> {
    IndexMap::from([
        (
            "goblin_ambush",
            include_str!("../content/encounters/goblin_ambush.json"),
        ),
        (
            "ogre_duel",
            include_str!("../content/encounters/ogre_duel.json"),
        ),
        (
            "bandit_detachment",
            include_str!("../content/encounters/bandit_detachment.json"),
        ),
    ])
}
