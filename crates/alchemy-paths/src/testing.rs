//! Shared catalogs for unit tests.

use alchemy_core::{Catalog, CatalogBuilder};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// A, B basic; C = A + B; D = A + C.
pub(crate) fn scenario() -> Catalog {
    Catalog::builder()
        .basic("A")
        .basic("B")
        .element("C", 1, [("A", "B")])
        .element("D", 2, [("A", "C")])
        .build()
        .unwrap()
}

/// Two independent tier-1 branches joined at tier 2.
pub(crate) fn diamond() -> Catalog {
    Catalog::builder()
        .basic("A")
        .basic("B")
        .element("L", 1, [("A", "B")])
        .element("R", 1, [("B", "B")])
        .element("Top", 2, [("L", "R")])
        .build()
        .unwrap()
}

/// Four classic basics with several alternative derivations, a
/// tier-violating recipe and an unreachable element.
pub(crate) fn elements() -> Catalog {
    Catalog::builder()
        .basic("Air")
        .basic("Earth")
        .basic("Fire")
        .basic("Water")
        .element("Dust", 1, [("Air", "Earth")])
        .element("Lava", 1, [("Earth", "Fire")])
        .element("Mud", 1, [("Water", "Earth")])
        .element("Steam", 1, [("Water", "Fire"), ("Air", "Fire")])
        .element("Energy", 1, [("Fire", "Fire")])
        .element("Stone", 2, [("Lava", "Air"), ("Earth", "Steam")])
        .element("Brick", 2, [("Mud", "Fire"), ("Stone", "Mud")])
        .element("Cloud", 2, [("Steam", "Air"), ("Steam", "Steam")])
        .element("Rain", 3, [("Cloud", "Water")])
        .element("Wall", 3, [("Brick", "Brick"), ("Stone", "Stone")])
        .element("House", 4, [("Wall", "Wall"), ("Wall", "Rain")])
        // Unreachable: its only ingredient is never produced.
        .element("Ghost", 5, [("Void", "House")])
        .element("Void", 4, [("Void", "Void")])
        .build()
        .unwrap()
}

/// A random layered catalog.
///
/// Tier `t` holds `width` elements named `T{t}_{i}`; every element has one
/// to three recipes with at least one ingredient from tier `t - 1`. About
/// one recipe in eight is deliberately tier-violating.
pub(crate) fn layered(seed: u64, basics: usize, tiers: u32, width: usize) -> Catalog {
    let mut rng = StdRng::seed_from_u64(seed);
    let name = |t: u32, i: usize| format!("T{t}_{i}");
    let mut builder: CatalogBuilder = Catalog::builder();
    for i in 0..basics {
        builder = builder.basic(name(0, i));
    }
    let count = |t: u32| if t == 0 { basics } else { width };

    for t in 1..=tiers {
        for i in 0..width {
            let mut pairs = Vec::new();
            for _ in 0..rng.random_range(1..=3) {
                let first = name(t - 1, rng.random_range(0..count(t - 1)));
                let lower = rng.random_range(0..t);
                let second = if rng.random_range(0..8) == 0 {
                    // Same tier or above: must be filtered at use time.
                    let up = rng.random_range(t..=tiers);
                    name(up, rng.random_range(0..count(up)))
                } else {
                    name(lower, rng.random_range(0..count(lower)))
                };
                pairs.push((first, second));
            }
            builder = builder.element(
                name(t, i),
                t,
                pairs.iter().map(|(a, b)| (a.as_str(), b.as_str())),
            );
        }
    }
    builder.build().unwrap()
}
