use indexmap::IndexMap;

/// Built-in parties as JSON `PartySpec` documents, in listing order.
pub fn builtin_parties() -> IndexMap<&'static str, &'static str> {
    IndexMap::from([
        (
            "starter_trio",
            include_str!("../content/parties/starter_trio.json"),
        ),
        ("wild_pack", include_str!("../content/parties/wild_pack.json")),
        (
            "cave_lurkers",
            include_str!("../content/parties/cave_lurkers.json"),
        ),
    ])
}
