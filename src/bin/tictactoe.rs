//! Plays a Tic-Tac-Toe game against itself using the alpha-beta minimax
//! AI, printing each move. A demonstration binary, not a UI.

use chess_engine::tictactoe::{best_move, Game};

fn main() {
    let mut game = Game::new();
    let mut ply = 0;
    while !game.is_game_over() && ply < 9 {
        let Some(sq) = best_move(&mut game, 9) else {
            break;
        };
        game.make_move(sq);
        println!("ply {ply}: square {sq}");
        ply += 1;
    }
    match game.winner() {
        Some(winner) => println!("{winner:?} wins"),
        None => println!("draw"),
    }
}
