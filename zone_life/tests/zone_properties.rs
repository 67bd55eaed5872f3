// zone_properties.rs - Engine behavior across zones on computed layouts

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use zone_life::patterns::{body_center_origin, pattern_by_name, pattern_cells};
use zone_life::seed::random_fill;
use zone_life::topology::{neighbors, NEIGHBOR_OFFSETS};
use zone_life::{compute_geometry, neighbor_coord, Geometry, LifeEngine, LiveCellSet, Pos, Rgb, Zone};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn desktop() -> Geometry {
    compute_geometry(1200.0, 800.0, 3)
}

#[test]
fn wrapped_neighbors_are_distinct_on_a_large_grid() {
    init_logging();
    let g = desktop();
    for pos in [Pos::new(0, g.body_top()), Pos::new(g.grid_width - 1, g.grid_height - 1), Pos::new(0, 0)] {
        let mut ns = neighbors(pos, &g).to_vec();
        ns.sort();
        ns.dedup();
        assert_eq!(ns.len(), 8, "{pos:?}");
    }
}

#[test]
fn portal_never_lands_inside_text_box() {
    init_logging();
    let g = desktop();
    let t = g.inner_t;
    let mut ring = Vec::new();
    for x in t.x - 1..=t.right() {
        ring.push(Pos::new(x, t.y - 1));
        ring.push(Pos::new(x, t.bottom()));
    }
    for y in t.y..t.bottom() {
        ring.push(Pos::new(t.x - 1, y));
        ring.push(Pos::new(t.right(), y));
    }

    for pos in ring {
        let zone = g.zone_of(pos);
        if zone != Zone::Body {
            continue;
        }
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let n = neighbor_coord(pos, dx, dy, zone, &g);
            assert_ne!(g.zone_of(n), Zone::InnerT, "{pos:?} + ({dx},{dy}) -> {n:?}");
            assert_ne!(g.zone_of(n), Zone::InnerB, "{pos:?} + ({dx},{dy}) -> {n:?}");
        }
    }
}

#[test]
fn text_box_is_a_closed_system() {
    init_logging();
    let g = desktop();
    let t = g.inner_t;

    // A blinker inside the box, a dense band of body cells hugging it
    let mut cells: LiveCellSet = [(t.x + 5, t.y + 5), (t.x + 6, t.y + 5), (t.x + 7, t.y + 5)]
        .into_iter()
        .map(|(x, y)| (Pos::new(x, y), Rgb::WHITE))
        .collect();
    for x in t.x - 1..=t.right() {
        cells.insert(Pos::new(x, t.y - 1), Rgb::BLACK);
        cells.insert(Pos::new(x, t.bottom()), Rgb::BLACK);
    }

    let mut engine = LifeEngine::seeded(g, 11);
    engine.seed(cells).unwrap();
    engine.step();

    let inside: Vec<_> = engine
        .current_cells()
        .iter()
        .filter(|(pos, _)| g.zone_of(**pos) == Zone::InnerT)
        .collect();
    assert_eq!(inside.len(), 3);
    assert!(inside.iter().all(|(pos, color)| pos.x == t.x + 6 && **color == Rgb::WHITE));
}

#[test]
fn still_life_next_to_a_box_sees_through_it() {
    init_logging();
    let g = desktop();
    let t = g.inner_t;
    // A block flush against the left edge of the text box. Its right
    // neighbors tunnel to the far side of the box, which is empty.
    let block: LiveCellSet = [(t.x - 2, t.y + 3), (t.x - 1, t.y + 3), (t.x - 2, t.y + 4), (t.x - 1, t.y + 4)]
        .into_iter()
        .map(|(x, y)| (Pos::new(x, y), Rgb::new(9, 9, 9)))
        .collect();

    let mut engine = LifeEngine::seeded(g, 2);
    engine.seed(block.clone()).unwrap();
    engine.step();
    assert_eq!(engine.current_cells(), &block);
}

fn body_cells(points: &[(i32, i32)]) -> LiveCellSet {
    points.iter().map(|&p| (Pos::from(p), Rgb::new(0, 0, 255))).collect()
}

fn positions(engine: &LifeEngine) -> Vec<Pos> {
    engine.current_cells().keys().copied().collect()
}

#[test]
fn block_across_the_body_seam_is_still() {
    init_logging();
    let g = desktop();
    let (top, bot) = (g.body_top(), g.grid_height - 1);
    assert_eq!(top, 26);
    let block = body_cells(&[(5, top), (6, top), (5, bot), (6, bot)]);

    let mut engine = LifeEngine::seeded(g, 4);
    engine.seed(block.clone()).unwrap();
    for _ in 0..3 {
        engine.step();
        assert_eq!(engine.current_cells(), &block);
    }
}

#[test]
fn blinker_across_the_body_seam_oscillates() {
    init_logging();
    let g = desktop();
    let (top, bot) = (g.body_top(), g.grid_height - 1);
    let vertical = body_cells(&[(20, bot), (20, top), (20, top + 1)]);

    let mut engine = LifeEngine::seeded(g, 4);
    engine.seed(vertical.clone()).unwrap();
    engine.step();
    assert_eq!(positions(&engine), vec![Pos::new(19, top), Pos::new(20, top), Pos::new(21, top)]);
    assert!(engine.step().cycle_detected);
    assert_eq!(engine.current_cells(), &vertical);
}

#[test]
fn births_only_use_parent_colors() {
    init_logging();
    let g = compute_geometry(300.0, 240.0, 3);
    let mut rng = StdRng::seed_from_u64(77);
    let seed = random_fill(&g, 0.3, &mut rng);

    let mut engine = LifeEngine::seeded(g, 77);
    engine.seed(seed).unwrap();
    let before = engine.current_cells().clone();

    // Colors arriving at each position, one entry per contributing neighbor
    let mut arriving: HashMap<Pos, Vec<Rgb>> = HashMap::new();
    for (&live, &color) in &before {
        for n in neighbors(live, &g) {
            arriving.entry(n).or_default().push(color);
        }
    }

    engine.step();
    assert!(engine.population() > 0);
    for (pos, color) in engine.current_cells() {
        match before.get(pos) {
            Some(previous) => assert_eq!(previous, color),
            None => {
                let parents = &arriving[pos];
                assert_eq!(parents.len(), 3, "{pos:?}");
                assert!(parents.contains(color), "{pos:?}");
            }
        }
    }
}

#[test]
fn gun_keeps_firing_in_open_body() {
    init_logging();
    let g = desktop();
    let gun = pattern_by_name("Gosper Glider Gun").unwrap();
    let origin = body_center_origin(gun, &g);

    let mut engine = LifeEngine::seeded(g, 4);
    engine.seed(pattern_cells(gun, origin, Rgb::WHITE, &g)).unwrap();
    for _ in 0..60 {
        let report = engine.step();
        assert!(!report.is_extinct());
        assert!(!report.cycle_detected);
    }
    // Back in its starting phase, plus two gliders
    assert_eq!(engine.population(), gun.cells.len() + 10);
}

#[test]
fn reset_clears_any_state() {
    init_logging();
    let g = desktop();
    let mut engine = LifeEngine::seeded(g, 0);
    engine.seed(random_fill(&g, 0.2, &mut StdRng::seed_from_u64(3))).unwrap();
    for _ in 0..5 {
        engine.step();
    }
    engine.reset();
    assert!(engine.current_cells().is_empty());
    assert_eq!(engine.population(), 0);
}
