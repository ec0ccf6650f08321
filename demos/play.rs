//! Play tic-tac-toe against the MCTS engine
//!
//! The human picks a side, then enters moves as `row, col`.

use std::io::{self, Write};

use tictactoe_mcts::{Board, MCTSConfig, Player, Position, TerminalState, MCTS};

fn main() {
    // Initialize logging
    env_logger::init();

    println!("MCTS Tic-Tac-Toe");
    println!("================");
    println!();

    let human = loop {
        match prompt("Choose what you want to play (1 = X moves first, 2 = O): ").as_str() {
            "1" => break Player::X,
            "2" => break Player::O,
            _ => println!("Bad input, please try again."),
        }
    };

    let config = MCTSConfig::default();
    let mut mcts = MCTS::new(config);
    let mut board = Board::new();

    while board.classify() == TerminalState::InProgress {
        let to_move = board.turn_to_move();

        if to_move == human {
            let position = match prompt("Enter your move (row, col): ").parse::<Position>() {
                Ok(position) => position,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };

            match board.apply(position, to_move) {
                Ok(next) => board = next,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            }
        } else {
            match mcts.search(&board).and_then(|position| {
                println!("The engine plays {}", position);
                board.apply(position, to_move)
            }) {
                Ok(next) => board = next,
                Err(e) => {
                    println!("Error: {}", e);
                    break;
                }
            }
            log::info!("{}", mcts.get_statistics().summary());
        }

        println!("{}", board);
    }

    match board.classify() {
        TerminalState::Won(winner) => println!("{} won!", winner),
        TerminalState::Draw => println!("tie!"),
        TerminalState::InProgress => {}
    }
}

/// Reads one trimmed line from stdin after printing `message`
fn prompt(message: &str) -> String {
    print!("{}", message);
    io::stdout().flush().unwrap();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).unwrap() == 0 {
        println!();
        std::process::exit(0);
    }
    input.trim().to_string()
}
