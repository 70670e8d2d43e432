//! Plays a Connect Four game against itself using the plain-minimax AI,
//! printing each move. A demonstration binary, not a UI.

use chess_engine::connect4::{best_move, Connect4};

fn main() {
    let mut board = Connect4::new();
    let mut ply = 0;
    while !board.is_game_over() && ply < 42 {
        let Some(col) = best_move(&mut board, 4) else {
            break;
        };
        board.make_move(col);
        println!("ply {ply}: column {col}");
        ply += 1;
    }
    match board.winner() {
        Some(winner) => println!("{winner:?} wins"),
        None => println!("draw"),
    }
}
