//! Static planet facts for the planet info panel.

use serde::Serialize;

/// Quick facts about one planet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanetFact {
    pub name: &'static str,
    pub kind: &'static str,
    /// Mean distance from the Sun in millions of kilometres.
    pub distance_from_sun_mkm: f64,
    pub day_length: &'static str,
    pub moons: u16,
    pub fun_fact: &'static str,
}

const PLANETS: [PlanetFact; 8] = [
    PlanetFact {
        name: "Mercury",
        kind: "rocky planet",
        distance_from_sun_mkm: 57.9,
        day_length: "59 Earth days",
        moons: 0,
        fun_fact: "A year on Mercury is only 88 Earth days long.",
    },
    PlanetFact {
        name: "Venus",
        kind: "rocky planet",
        distance_from_sun_mkm: 108.2,
        day_length: "243 Earth days",
        moons: 0,
        fun_fact: "Venus is the hottest planet, even hotter than Mercury.",
    },
    PlanetFact {
        name: "Earth",
        kind: "rocky planet",
        distance_from_sun_mkm: 149.6,
        day_length: "24 hours",
        moons: 1,
        fun_fact: "Earth is the only planet we know of with liquid water on its surface.",
    },
    PlanetFact {
        name: "Mars",
        kind: "rocky planet",
        distance_from_sun_mkm: 227.9,
        day_length: "24 hours 37 minutes",
        moons: 2,
        fun_fact: "Mars has the tallest volcano in the solar system, Olympus Mons.",
    },
    PlanetFact {
        name: "Jupiter",
        kind: "gas giant",
        distance_from_sun_mkm: 778.5,
        day_length: "10 hours",
        moons: 95,
        fun_fact: "Jupiter's Great Red Spot is a storm bigger than Earth.",
    },
    PlanetFact {
        name: "Saturn",
        kind: "gas giant",
        distance_from_sun_mkm: 1_432.0,
        day_length: "10 hours 34 minutes",
        moons: 146,
        fun_fact: "Saturn is so light it would float in a giant bathtub.",
    },
    PlanetFact {
        name: "Uranus",
        kind: "ice giant",
        distance_from_sun_mkm: 2_867.0,
        day_length: "17 hours",
        moons: 28,
        fun_fact: "Uranus spins on its side, rolling around the Sun like a ball.",
    },
    PlanetFact {
        name: "Neptune",
        kind: "ice giant",
        distance_from_sun_mkm: 4_515.0,
        day_length: "16 hours",
        moons: 16,
        fun_fact: "Neptune has the fastest winds in the solar system.",
    },
];

/// All planets, ordered by distance from the Sun.
#[must_use]
pub const fn all() -> &'static [PlanetFact] {
    &PLANETS
}

/// Case-insensitive lookup by planet name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static PlanetFact> {
    let name = name.trim();
    PLANETS
        .iter()
        .find(|planet| planet.name.eq_ignore_ascii_case(name))
}
