//! Cross-engine checks over seeded random catalogs.

use std::collections::HashSet;

use alchemy_core::Catalog;

use crate::testing::layered;
use crate::{
    Algorithm, Bidirectional, BreadthFirst, DepthFirst, PathFinder, SearchError, validate_path,
};

const SEEDS: u64 = 30;

fn targets(catalog: &Catalog) -> Vec<String> {
    catalog
        .elements()
        .filter(|e| !e.is_basic())
        .map(|e| e.name().to_string())
        .collect()
}

#[test]
fn every_returned_path_is_valid() {
    for seed in 0..SEEDS {
        let c = layered(seed, 3, 5, 6);
        for alg in Algorithm::ALL {
            let finder = alg.finder(&c);
            for name in targets(&c) {
                match finder.find_shortest_path(&name) {
                    Ok(r) => {
                        assert!(
                            validate_path(&c, &name, &r.path).is_ok(),
                            "seed {seed} {alg} {name}: {:?}",
                            r.path
                        );
                        assert!(r.visited >= 1);
                    }
                    Err(err) => assert_eq!(err, SearchError::NoPathFound(name.clone())),
                }
            }
        }
    }
}

#[test]
fn engines_agree_on_reachability() {
    for seed in 0..SEEDS {
        let c = layered(seed, 2, 6, 5);
        let bfs = BreadthFirst::new(&c);
        let dfs = DepthFirst::new(&c);
        let bid = Bidirectional::new(&c);
        for name in targets(&c) {
            let b = bfs.find_shortest_path(&name).is_ok();
            let m = bid.find_shortest_path(&name).is_ok();
            let d = dfs.find_shortest_path(&name).is_ok();
            assert_eq!(b, m, "seed {seed} {name}");
            assert!(!d || b, "seed {seed} {name}");
        }
    }
}

#[test]
fn breadth_first_is_never_longer() {
    for seed in 0..SEEDS * 2 {
        for (basics, tiers, width) in [(2, 5, 4), (3, 5, 6), (3, 6, 4), (4, 4, 5)] {
            let c = layered(seed, basics, tiers, width);
            let bfs = BreadthFirst::new(&c);
            let dfs = DepthFirst::new(&c);
            let bid = Bidirectional::new(&c);
            for name in targets(&c) {
                let Ok(b) = bfs.find_shortest_path(&name) else {
                    continue;
                };
                if let Ok(d) = dfs.find_shortest_path(&name) {
                    assert!(b.len() <= d.len(), "seed {seed} {name}: dfs {:?}", d.path);
                }
                if let Ok(m) = bid.find_shortest_path(&name) {
                    assert!(b.len() <= m.len(), "seed {seed} {name}: bid {:?}", m.path);
                }
            }
        }
    }
}

#[test]
fn depth_first_respects_ceiling() {
    for seed in 0..SEEDS {
        let c = layered(seed, 3, 6, 4);
        let dfs = DepthFirst::new(&c);
        for name in targets(&c) {
            if let Ok(r) = dfs.find_shortest_path(&name) {
                let tier = c.tier_of_name(&name) as usize;
                assert!(r.len() <= 2 * tier, "seed {seed} {name}");
            }
        }
    }
}

#[test]
fn single_queries_are_idempotent() {
    for seed in 0..10 {
        let c = layered(seed, 3, 4, 6);
        for alg in Algorithm::ALL {
            let finder = alg.finder(&c);
            for name in targets(&c) {
                let a = finder.find_shortest_path(&name);
                let b = finder.find_shortest_path(&name);
                match (a, b) {
                    (Ok(a), Ok(b)) => {
                        assert_eq!(a.path, b.path);
                        assert_eq!(a.visited, b.visited);
                        assert_eq!(a.meeting_point, b.meeting_point);
                    }
                    (Err(a), Err(b)) => assert_eq!(a, b),
                    _ => panic!("seed {seed} {alg} {name}: outcomes differ"),
                }
            }
        }
    }
}

#[test]
fn multiple_paths_are_distinct_and_bounded() {
    for seed in 0..8 {
        let c = layered(seed, 3, 4, 5);
        for alg in Algorithm::ALL {
            let finder = alg.finder(&c);
            for name in targets(&c) {
                let k = 3;
                let Ok(set) = finder.find_multiple_paths(&name, k) else {
                    continue;
                };
                assert!(!set.is_empty() && set.len() <= k);
                assert_eq!(set.shortfall(), k - set.len());
                let sigs: HashSet<String> = set.iter().map(|r| r.signature()).collect();
                assert_eq!(sigs.len(), set.len(), "seed {seed} {alg} {name}");
                for r in &set {
                    assert!(validate_path(&c, &name, &r.path).is_ok());
                    assert!(r.variant.is_some());
                }
            }
        }
    }
}
