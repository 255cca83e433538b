use broadside::{
    ui, AttackOutcome, AttackRecord, Board, Coord, FleetSpec, Geometry, PlayerSnapshot,
};

fn c(s: &str) -> Coord {
    Geometry::new(5).unwrap().parse(s).unwrap()
}

fn snapshot_with_damage() -> PlayerSnapshot {
    let g = Geometry::new(5).unwrap();
    let mut board = Board::new(g, FleetSpec::default());
    board.place(&[c("A1"), c("A2")]).unwrap();
    board.receive_attack(c("A1")).unwrap();
    PlayerSnapshot {
        name: "Alice".to_string(),
        board: board.snapshot(),
        attacks: vec![
            AttackRecord {
                target: c("C3"),
                outcome: AttackOutcome::Hit,
            },
            AttackRecord {
                target: c("C5"),
                outcome: AttackOutcome::Miss,
            },
        ],
        hit_points: 1,
    }
}

#[test]
fn test_render_own_board() {
    let out = ui::render_own_board(&snapshot_with_damage());
    let lines: Vec<&str> = out.lines().collect();
    // header plus one line per row
    assert_eq!(lines.len(), 6);
    assert!(lines[0].contains('1') && lines[0].contains('5'));
    // row A carries the hit segment then the intact one
    let row_a = lines[1];
    assert!(row_a.starts_with('A'));
    let cells: Vec<&str> = row_a.split_whitespace().skip(1).collect();
    assert_eq!(cells, vec!["X", "S", "_", "_", "_"]);
}

#[test]
fn test_render_tracking_board() {
    let snap = snapshot_with_damage();
    let out = ui::render_tracking_board(snap.board.size(), &snap.attacks);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 6);
    let row_c: Vec<&str> = lines[3].split_whitespace().skip(1).collect();
    assert_eq!(row_c, vec!["_", "_", "X", "_", "O"]);
}
