use genoku::{fitness, grid::Grid, ops, reset_point, CellKind, EngineError, FITNESS_GOAL};
use pretty_assertions::assert_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};

const SOLVED: &str = "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

#[test]
fn fitness_of_solved_grid_is_the_goal() {
    let g = Grid::from_compact(SOLVED).unwrap();
    assert_eq!(fitness::evaluate(&g), FITNESS_GOAL);
}

#[test]
fn fitness_of_uniform_grid_is_zero() {
    let g = Grid::from_compact(&"5".repeat(81)).unwrap();
    assert_eq!(fitness::evaluate(&g), 0);
}

#[test]
fn fitness_never_exceeds_the_goal() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let mut g = Grid::empty();
        for r in 0..9 {
            for c in 0..9 {
                g.set(r, c, rng.gen_range(1..=9)).unwrap();
            }
        }
        assert!(fitness::evaluate(&g) <= FITNESS_GOAL);
    }
}

#[test]
fn update_refreshes_the_cached_fitness() {
    let mut g = Grid::from_compact(SOLVED).unwrap();
    assert_eq!(g.fitness(), 0);
    fitness::update(&mut g);
    assert_eq!(g.fitness(), FITNESS_GOAL);
}

#[test]
fn repair_fills_every_cell_and_keeps_fixed_values() {
    let s = "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
    let original = Grid::from_compact(s).unwrap();
    let mut g = original.clone();
    let mut rng = StdRng::seed_from_u64(11);
    ops::remove_repetition(&mut g, &mut rng).unwrap();

    for r in 0..9 {
        for c in 0..9 {
            let cell = g.get(r, c);
            assert!((1..=9).contains(&cell.value()), "cell ({r}, {c}) left unfilled");
            if original.get(r, c).is_fixed() {
                assert_eq!(cell.value(), original.get(r, c).value());
                assert_eq!(cell.kind(), CellKind::Fixed);
            }
        }
    }
}

#[test]
fn repair_leaves_columns_duplicate_free_without_givens() {
    // every cell free and identical: worst possible repetition
    let mut g = Grid::empty();
    for r in 0..9 {
        for c in 0..9 {
            g.set(r, c, 5).unwrap();
        }
    }
    let mut rng = StdRng::seed_from_u64(2);
    ops::remove_repetition(&mut g, &mut rng).unwrap();

    // the column pass runs last, so each column ends pairwise-distinct
    for c in 0..9 {
        let mut seen = [false; 10];
        for r in 0..9 {
            let v = g.get(r, c).value() as usize;
            assert!((1..=9).contains(&v));
            assert!(!seen[v], "duplicate {v} in column {c}");
            seen[v] = true;
        }
    }
}

#[test]
fn crossover_copies_whole_rows_only() {
    let mut source = Grid::empty();
    let mut target = Grid::empty();
    for r in 0..9 {
        for c in 0..9 {
            source.set(r, c, 1).unwrap();
            target.set(r, c, 2).unwrap();
        }
    }
    let mut rng = StdRng::seed_from_u64(5);
    ops::crossover(&source, &mut target, &mut rng);

    let mut copied = 0;
    for r in 0..9 {
        let row: Vec<u8> = (0..9).map(|c| target.get(r, c).value()).collect();
        assert!(row.iter().all(|&v| v == row[0]), "row {r} mixes parents");
        if row[0] == 1 {
            copied += 1;
        }
    }
    assert!(copied > 0);
    // source never changes
    for r in 0..9 {
        for c in 0..9 {
            assert_eq!(source.get(r, c).value(), 1);
        }
    }
}

#[test]
fn mutation_only_touches_free_cells() {
    let mut g = Grid::from_compact(&format!("123456789{}", ".".repeat(72))).unwrap();
    for r in 1..9 {
        for c in 0..9 {
            g.set(r, c, 7).unwrap();
        }
    }
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..50 {
        ops::mutate(&mut g, &mut rng).unwrap();
    }
    for c in 0..9 {
        assert_eq!(g.get(0, c).value(), c as u8 + 1, "fixed cell (0, {c}) changed");
    }
    for r in 1..9 {
        for c in 0..9 {
            assert!((1..=9).contains(&g.get(r, c).value()));
        }
    }
}

#[test]
fn elitism_keeps_the_fitter_half() {
    let grid_with = |f: u32| {
        let mut g = Grid::empty();
        g.set_fitness(f);
        g
    };
    let before: Vec<Grid> = [1u32, 3, 5, 7].map(grid_with).to_vec();
    let after: Vec<Grid> = [2u32, 4, 6, 8].map(grid_with).to_vec();

    let next = ops::next_generation(before, after);
    let fitnesses: Vec<u32> = next.iter().map(|g| g.fitness()).collect();
    assert_eq!(fitnesses, vec![5, 6, 7, 8]);
}

#[test]
fn cloning_is_deep() {
    let mut original = Grid::empty();
    original.set(0, 0, 4).unwrap();
    original.set_fitness(123);

    let mut copy = original.clone();
    assert_eq!(copy.fitness(), 123);
    copy.set(0, 0, 9).unwrap();
    copy.set_fitness(7);

    assert_eq!(original.get(0, 0).value(), 4);
    assert_eq!(original.fitness(), 123);
}

#[test]
fn writing_a_fixed_cell_fails() {
    let mut g = Grid::from_compact(&format!("9{}", ".".repeat(80))).unwrap();
    let err = g.set(0, 0, 3).unwrap_err();
    assert_eq!(err, EngineError::FixedCellMutation { row: 0, col: 0 });
    assert_eq!(g.get(0, 0).value(), 9);
}

#[test]
fn reset_point_scales_with_givens() {
    let with_givens = |n: usize| {
        let s: String = (0..81).map(|i| if i < n { '1' } else { '.' }).collect();
        Grid::from_compact(&s).unwrap()
    };
    assert_eq!(reset_point(&with_givens(20)), 2000);
    assert_eq!(reset_point(&with_givens(27)), 2000);
    assert_eq!(reset_point(&with_givens(28)), 350);
    assert_eq!(reset_point(&with_givens(29)), 350);
    assert_eq!(reset_point(&with_givens(30)), 300);
    assert_eq!(reset_point(&with_givens(31)), 300);
    assert_eq!(reset_point(&with_givens(40)), 200);
}
