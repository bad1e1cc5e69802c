use parlor::games::tictactoe::Cell;
use parlor::search::answer::Answer;
use parlor::search::tt::TranspositionTable;
use parlor::Winner;

fn entry(score: f64, is_solved: bool, height: u32) -> Answer<Cell> {
    Answer {
        best_move: Cell::default(),
        score,
        is_solved,
        winner: if is_solved { Some(Winner::Draw) } else { None },
        turn: 4,
        height,
    }
}

#[test]
fn stores_and_returns_entries() {
    let mut tt: TranspositionTable<u32, Cell> = TranspositionTable::new();
    assert!(tt.is_empty());

    tt.put(7, entry(0.5, false, 3));
    let got = tt.get(&7).expect("stored entry");
    assert_eq!(got.score, 0.5);
    assert_eq!(got.height, 3);
    assert_eq!(tt.len(), 1);
    assert!(tt.get(&8).is_none());
}

#[test]
fn shallower_results_never_clobber_deeper_ones() {
    let mut tt: TranspositionTable<u32, Cell> = TranspositionTable::new();
    tt.put(1, entry(0.5, false, 5));
    tt.put(1, entry(-0.5, false, 3));

    let got = tt.get(&1).expect("entry");
    assert_eq!(got.score, 0.5, "shallow result replaced a deeper one");
    assert_eq!(got.height, 5);
}

#[test]
fn equal_height_refreshes_the_entry() {
    let mut tt: TranspositionTable<u32, Cell> = TranspositionTable::new();
    tt.put(1, entry(0.5, false, 5));
    tt.put(1, entry(0.25, false, 5));

    assert_eq!(tt.get(&1).expect("entry").score, 0.25);
}

#[test]
fn solved_replaces_unsolved_regardless_of_height() {
    let mut tt: TranspositionTable<u32, Cell> = TranspositionTable::new();
    tt.put(1, entry(0.5, false, 9));
    tt.put(1, entry(0.0, true, 0));

    let got = tt.get(&1).expect("entry");
    assert!(got.is_solved);
    assert_eq!(got.score, 0.0);
}

#[test]
fn clear_empties_the_table() {
    let mut tt: TranspositionTable<u32, Cell> = TranspositionTable::new();
    for key in 0..100u32 {
        tt.put(key, entry(0.0, false, 1));
    }
    assert_eq!(tt.len(), 100);

    tt.clear();
    assert!(tt.is_empty());
    assert!(tt.get(&5).is_none());
}

#[test]
fn capacity_cap_is_derived_from_entry_size() {
    let tt: TranspositionTable<u32, Cell> = TranspositionTable::new();
    // A 1 GiB budget over tens-of-bytes entries leaves room for millions.
    assert!(tt.max_entries() > 1_000_000);
    assert!(!tt.at_capacity());

    // Wider keys mean fewer entries in the same budget.
    let wide: TranspositionTable<u128, Cell> = TranspositionTable::new();
    assert!(wide.max_entries() <= tt.max_entries());
}
