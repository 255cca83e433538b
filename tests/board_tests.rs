use broadside::{
    AttackOutcome, Board, CellState, Coord, CoordError, FleetSpec, Geometry, PlaceError,
};

fn geometry5() -> Geometry {
    Geometry::new(5).unwrap()
}

fn c(g: &Geometry, s: &str) -> Coord {
    g.parse(s).unwrap()
}

#[test]
fn test_place_marks_cells_and_consumes_fleet() {
    let g = geometry5();
    let mut board = Board::new(g, FleetSpec::default());
    assert!(!board.fleet_placed());

    board.place(&[c(&g, "A1"), c(&g, "A2")]).unwrap();
    assert_eq!(board.cell(c(&g, "A1")), CellState::Occupied);
    assert_eq!(board.cell(c(&g, "A2")), CellState::Occupied);
    assert_eq!(board.intact_cells(), 2);
    assert_eq!(board.remaining(2), 0);
    assert!(board.fleet_placed());
}

#[test]
fn test_place_reversed_run_is_still_a_run() {
    let g = geometry5();
    let mut board = Board::new(g, FleetSpec::default());
    board.place(&[c(&g, "B3"), c(&g, "B2")]).unwrap();
    assert_eq!(board.intact_cells(), 2);
}

#[test]
fn test_place_size_out_of_range() {
    let g = geometry5();
    let mut fleet = FleetSpec::empty();
    fleet.set(5, 1).unwrap();
    let mut board = Board::new(g, fleet);

    assert_eq!(
        board.place(&[c(&g, "A1")]).unwrap_err(),
        PlaceError::SizeOutOfRange(1)
    );
    let six: Vec<Coord> = (1..=5)
        .map(|n| g.parse(&format!("A{}", n)).unwrap())
        .chain([c(&g, "B5")])
        .collect();
    assert_eq!(board.place(&six).unwrap_err(), PlaceError::SizeOutOfRange(6));
}

#[test]
fn test_place_fleet_exhausted() {
    let g = geometry5();
    let mut board = Board::new(g, FleetSpec::default());
    board.place(&[c(&g, "A1"), c(&g, "A2")]).unwrap();
    assert_eq!(
        board.place(&[c(&g, "C1"), c(&g, "C2")]).unwrap_err(),
        PlaceError::FleetExhausted(2)
    );
}

#[test]
fn test_place_overlap_leaves_board_untouched() {
    let g = geometry5();
    let mut fleet = FleetSpec::empty();
    fleet.set(2, 2).unwrap();
    let mut board = Board::new(g, fleet);
    board.place(&[c(&g, "A1"), c(&g, "A2")]).unwrap();

    assert_eq!(
        board.place(&[c(&g, "A2"), c(&g, "A3")]).unwrap_err(),
        PlaceError::Overlap(c(&g, "A2"))
    );
    // all-or-nothing: the failed run changed nothing
    assert_eq!(board.cell(c(&g, "A3")), CellState::Empty);
    assert_eq!(board.remaining(2), 1);
    assert_eq!(board.intact_cells(), 2);
}

#[test]
fn test_place_rejects_repeated_cell_within_run() {
    let g = geometry5();
    let mut fleet = FleetSpec::empty();
    fleet.set(3, 1).unwrap();
    let mut board = Board::new(g, fleet);
    assert_eq!(
        board
            .place(&[c(&g, "A1"), c(&g, "A2"), c(&g, "A1")])
            .unwrap_err(),
        PlaceError::Overlap(c(&g, "A1"))
    );
    assert_eq!(board.intact_cells(), 0);
}

#[test]
fn test_place_rejects_gaps_diagonals_and_bends() {
    let g = geometry5();
    let mut fleet = FleetSpec::empty();
    fleet.set(2, 1).unwrap();
    fleet.set(3, 1).unwrap();
    let mut board = Board::new(g, fleet);

    assert!(matches!(
        board.place(&[c(&g, "A1"), c(&g, "A3")]).unwrap_err(),
        PlaceError::NotAdjacentRun(_, _)
    ));
    assert!(matches!(
        board.place(&[c(&g, "A1"), c(&g, "B2")]).unwrap_err(),
        PlaceError::NotAdjacentRun(_, _)
    ));
    // an L-bend is adjacent pair-by-pair but not a single axis
    assert!(matches!(
        board
            .place(&[c(&g, "A1"), c(&g, "A2"), c(&g, "B2")])
            .unwrap_err(),
        PlaceError::NotAdjacentRun(_, _)
    ));
    assert_eq!(board.intact_cells(), 0);
    assert_eq!(board.remaining(2), 1);
    assert_eq!(board.remaining(3), 1);
}

#[test]
fn test_place_rejects_coords_from_larger_board() {
    let g10 = Geometry::new(10).unwrap();
    let mut board = Board::new(geometry5(), FleetSpec::default());
    assert_eq!(
        board
            .place(&[c(&g10, "A6"), c(&g10, "A7")])
            .unwrap_err(),
        PlaceError::OutOfBounds(c(&g10, "A6"))
    );
}

#[test]
fn test_receive_attack_outcomes() {
    let g = geometry5();
    let mut board = Board::new(g, FleetSpec::default());
    board.place(&[c(&g, "A1"), c(&g, "A2")]).unwrap();

    assert_eq!(board.receive_attack(c(&g, "A1")).unwrap(), AttackOutcome::Hit);
    assert_eq!(board.cell(c(&g, "A1")), CellState::Hit);
    assert_eq!(board.intact_cells(), 1);

    // a hit cell never takes damage twice
    assert_eq!(
        board.receive_attack(c(&g, "A1")).unwrap(),
        AttackOutcome::AlreadyHit
    );
    assert_eq!(board.intact_cells(), 1);

    assert_eq!(board.receive_attack(c(&g, "B1")).unwrap(), AttackOutcome::Miss);
    assert_eq!(board.cell(c(&g, "B1")), CellState::Empty);
}

#[test]
fn test_receive_attack_rejects_coords_from_larger_board() {
    let g = geometry5();
    let g10 = Geometry::new(10).unwrap();
    let mut board = Board::new(g, FleetSpec::default());
    board.place(&[c(&g, "A1"), c(&g, "A2")]).unwrap();

    // J10 is valid on a 10x10 geometry but addresses nothing here
    assert_eq!(
        board.receive_attack(c(&g10, "J10")).unwrap_err(),
        CoordError::OutOfBounds
    );
    assert_eq!(board.intact_cells(), 2);
}

#[test]
fn test_reference_scenario_board_level() {
    // N=5, fleet {2:1}; A places A1/A2, B places C3/C4
    let g = geometry5();
    let mut a = Board::new(g, FleetSpec::default());
    let mut b = Board::new(g, FleetSpec::default());
    a.place(&[c(&g, "A1"), c(&g, "A2")]).unwrap();
    b.place(&[c(&g, "C3"), c(&g, "C4")]).unwrap();

    assert_eq!(b.receive_attack(c(&g, "C3")).unwrap(), AttackOutcome::Hit);
    assert_eq!(b.intact_cells(), 1);
    assert_eq!(
        b.receive_attack(c(&g, "C3")).unwrap(),
        AttackOutcome::AlreadyHit
    );
    assert_eq!(b.intact_cells(), 1);

    assert_eq!(a.receive_attack(c(&g, "A1")).unwrap(), AttackOutcome::Hit);
    assert_eq!(a.receive_attack(c(&g, "A2")).unwrap(), AttackOutcome::Hit);
    assert_eq!(a.intact_cells(), 0);
}

#[test]
fn test_snapshot_counts() {
    let g = geometry5();
    let mut board = Board::new(g, FleetSpec::default());
    board.place(&[c(&g, "D2"), c(&g, "E2")]).unwrap();
    board.receive_attack(c(&g, "D2")).unwrap();

    let snap = board.snapshot();
    assert_eq!(snap.size(), 5);
    assert_eq!(snap.count(CellState::Occupied), 1);
    assert_eq!(snap.count(CellState::Hit), 1);
    assert_eq!(snap.cell(c(&g, "E2")), CellState::Occupied);
}
