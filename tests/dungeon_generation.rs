use fabrik_dungeon::dungeon::{self, BspTree, DrawMode, DungeonConfig, NodeId};
use fabrik_dungeon::Aabb;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

const SEEDS: std::ops::Range<u64> = 0..24;

fn bounds() -> Aabb {
    Aabb::new(Vec3::ZERO, Vec3::new(100.0, 2.0, 100.0))
}

fn build(seed: u64, config: &DungeonConfig) -> (BspTree, usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tree = BspTree::new(bounds()).unwrap();
    tree.split_recursively(&mut rng, config);
    tree.generate_rooms(&mut rng, config);
    let passes = tree.connect_all(&mut rng, config);
    (tree, passes)
}

fn internal_nodes(tree: &BspTree) -> Vec<NodeId> {
    tree.nodes()
        .filter(|(_, node)| !node.is_leaf())
        .map(|(id, _)| id)
        .collect()
}

#[test]
fn partition_covers_the_bounds_exactly() {
    let config = DungeonConfig::default();

    for seed in SEEDS {
        let (tree, _) = build(seed, &config);

        assert!(!tree.node(tree.root()).unwrap().is_leaf(), "seed {seed}");

        let leaf_volume: f32 = tree
            .leaf_nodes()
            .iter()
            .map(|&id| tree.node(id).unwrap().cell().volume())
            .sum();
        assert!((leaf_volume - bounds().volume()).abs() < 1.0, "seed {seed}");

        for (_, node) in tree.nodes() {
            if let Some((a, b)) = node.children() {
                for child in [a, b] {
                    let child = tree.node(child).unwrap();
                    assert!(node.cell().contains_box(child.cell(), 1e-3));
                    assert!(config.is_valid_cell(child.cell()));
                    assert_eq!(child.depth(), node.depth() + 1);
                }
            }
        }
    }
}

#[test]
fn every_leaf_gets_a_room_inside_its_cell() {
    let config = DungeonConfig::default();

    for seed in SEEDS {
        let (tree, _) = build(seed, &config);
        let rooms = tree.rooms();
        assert_eq!(rooms.len(), tree.leaf_nodes().len());

        for (id, room) in rooms {
            let cell = tree.node(id).unwrap().cell();
            assert!(cell.contains_box(&room, 1e-3), "seed {seed}");
            assert!(room.size().x > 0.5 * cell.size().x);
            assert!(room.size().z > 0.5 * cell.size().z);
        }

        for id in internal_nodes(&tree) {
            let node = tree.node(id).unwrap();
            let (a, b) = node.children().unwrap();
            let bounds = node.room().unwrap();
            assert!(bounds.contains_box(tree.node(a).unwrap().room().unwrap(), 1e-4));
            assert!(bounds.contains_box(tree.node(b).unwrap().room().unwrap(), 1e-4));
        }
    }
}

#[test]
fn connection_passes_terminate_fully_connected() {
    let config = DungeonConfig::default();

    for seed in SEEDS {
        let (tree, passes) = build(seed, &config);
        let internal = internal_nodes(&tree);

        assert!(tree.is_fully_connected(), "seed {seed}");
        assert!(passes >= 1);
        assert!(passes <= internal.len());
        assert!(passes as u32 <= tree.depth());
        assert!(tree.hallways().len() <= internal.len());

        for id in &internal {
            let node = tree.node(*id).unwrap();
            let (a, b) = node.children().unwrap();
            if tree.node(a).unwrap().is_leaf() && tree.node(b).unwrap().is_leaf() {
                assert!(
                    tree.hallways().iter().any(|h| h.parent == *id),
                    "seed {seed}: leaf pair under {id:?} has no hallway"
                );
            }
        }
    }
}

#[test]
fn hallways_stay_inside_their_parent_cell() {
    let config = DungeonConfig::default();

    for seed in SEEDS {
        let (tree, _) = build(seed, &config);

        for hallway in tree.hallways() {
            let cell = tree.node(hallway.parent).unwrap().cell();
            assert!(
                cell.contains_box(&hallway.bounds, config.hallway_width),
                "seed {seed}: {hallway:?} outside {cell:?}"
            );
            assert!(hallway.bounds.has_volume());
            assert!((hallway.bounds.size().y - config.hallway_height).abs() < 1e-4);
        }
        assert_eq!(tree.world().len(), tree.rooms().len() + tree.hallways().len());
    }
}

#[test]
fn same_seed_builds_the_same_dungeon() {
    let config = DungeonConfig::default();
    let mut rng_a = StdRng::seed_from_u64(99);
    let mut rng_b = StdRng::seed_from_u64(99);

    let a = dungeon::generate(bounds(), &mut rng_a, &config).unwrap();
    let b = dungeon::generate(bounds(), &mut rng_b, &config).unwrap();

    assert_eq!(a.len(), b.len());
    assert_eq!(a.rooms(), b.rooms());
    assert_eq!(a.hallways(), b.hallways());
}

#[test]
fn depth_cap_limits_the_tree() {
    let config = DungeonConfig::default().with_max_depth(1);
    let (tree, passes) = build(5, &config);

    assert_eq!(tree.depth(), 1);
    assert_eq!(tree.leaf_nodes().len(), 2);
    assert_eq!(passes, 1);
    assert_eq!(tree.hallways().len(), 1);
}

#[test]
fn oversized_minimum_keeps_a_single_room() {
    let config = DungeonConfig::default().with_min_cell_volume(1.0e9);
    let (tree, passes) = build(1, &config);

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.rooms().len(), 1);
    assert_eq!(passes, 0);
    assert!(tree.hallways().is_empty());
    assert!(tree.is_fully_connected());
}

#[test]
fn room_outlines_cover_rooms_bounds_and_hallways() {
    let (tree, _) = build(3, &DungeonConfig::default());

    let with_room = tree.nodes().filter(|(_, n)| n.room().is_some()).count();
    assert_eq!(
        tree.debug_lines(DrawMode::Rooms).len(),
        14 * (with_room + tree.hallways().len())
    );
    assert_eq!(tree.debug_lines(DrawMode::Cells).len(), 14 * tree.len());
}
