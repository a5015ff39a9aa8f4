//! Property tests for win evaluation and session invariants.

use proptest::prelude::*;
use strictly_tictactoe::invariants::{InvariantSet, SessionInvariants};
use strictly_tictactoe::{Board, Cell, Player, Position, Session, WINNING_LINES, evaluate};

fn cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        Just(Cell::Empty),
        Just(Cell::Occupied(Player::X)),
        Just(Cell::Occupied(Player::O)),
    ]
}

fn board() -> impl Strategy<Value = Board> {
    prop::array::uniform9(cell()).prop_map(|cells| {
        Position::ALL
            .iter()
            .zip(cells)
            .fold(Board::new(), |mut board, (&pos, cell)| {
                board.set(pos, cell);
                board
            })
    })
}

fn player() -> impl Strategy<Value = Player> {
    prop_oneof![Just(Player::X), Just(Player::O)]
}

/// Straightforward reference: first line in order whose cells match.
fn first_complete_line(board: &Board) -> Option<(Player, [Position; 3])> {
    WINNING_LINES.iter().find_map(|line| {
        let owner = board.get(line[0]).player()?;
        line.iter()
            .all(|&pos| board.get(pos) == Cell::Occupied(owner))
            .then_some((owner, *line))
    })
}

#[derive(Debug, Clone)]
enum Op {
    Place(usize),
    Jump(usize),
    Toggle,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..9).prop_map(Op::Place),
        2 => (0usize..10).prop_map(Op::Jump),
        1 => Just(Op::Toggle),
    ]
}

proptest! {
    #[test]
    fn prop_evaluate_matches_first_complete_line(board in board()) {
        let expected = first_complete_line(&board);
        let actual = evaluate(&board).map(|win| (win.player, win.line));
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_completed_line_is_reported(
        board in board(),
        line_index in 0usize..8,
        owner in player(),
    ) {
        let line = WINNING_LINES[line_index];
        let board = line.iter().fold(board, |board, &pos| board.with_mark(pos, owner));

        let win = evaluate(&board).expect("a line is complete");
        let win_index = WINNING_LINES.iter().position(|l| *l == win.line).expect("known line");
        prop_assert!(win_index <= line_index);
        if win_index == line_index {
            prop_assert_eq!(win.player, owner);
        }
        prop_assert!(win.line.iter().all(|&pos| board.get(pos) == Cell::Occupied(win.player)));
    }

    #[test]
    fn prop_no_line_means_no_winner(board in board()) {
        prop_assume!(first_complete_line(&board).is_none());
        prop_assert_eq!(evaluate(&board), None);
    }

    #[test]
    fn prop_invariants_hold_for_any_event_sequence(ops in prop::collection::vec(op(), 0..40)) {
        let mut session = Session::new();
        for op in ops {
            match op {
                Op::Place(index) => {
                    let pos = Position::from_index(index).expect("index below 9");
                    session.place_mark(pos);
                }
                Op::Jump(step) => {
                    let in_range = step < session.history().len();
                    prop_assert_eq!(session.jump_to(step).is_ok(), in_range);
                }
                Op::Toggle => session.toggle_sort_direction(),
            }
            prop_assert!(SessionInvariants::check_all(&session).is_ok());
        }
    }
}
