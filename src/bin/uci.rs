//! Universal Chess Interface front-end: reads commands from standard input,
//! writes replies to standard output. Maps directly onto `chess_engine`'s
//! core API — it holds no chess logic of its own.

use std::io::{self, BufRead, Write};

use chess_engine::search::{self, Evaluator};
use chess_engine::{Move, Position};

const ENGINE_NAME: &str = "chess_engine";
const ENGINE_AUTHOR: &str = "the chess_engine contributors";

struct SkillOption {
    value: u32,
}

impl SkillOption {
    const MIN: u32 = 0;
    const MAX: u32 = 5;
    const DEFAULT: u32 = 3;

    fn new() -> Self {
        SkillOption { value: Self::DEFAULT }
    }

    fn set(&mut self, raw: &str) -> bool {
        match raw.parse::<u32>() {
            Ok(v) if (Self::MIN..=Self::MAX).contains(&v) => {
                self.value = v;
                true
            }
            _ => false,
        }
    }
}

struct Engine {
    position: Position,
    skill: SkillOption,
}

impl Engine {
    fn new() -> Self {
        Engine {
            position: Position::startpos(),
            skill: SkillOption::new(),
        }
    }

    fn reset(&mut self) {
        self.position = Position::startpos();
    }

    fn set_fen(&mut self, fen: &str) {
        match Position::from_fen(fen) {
            Ok(pos) => self.position = pos,
            Err(e) => eprintln!("invalid fen: {e}"),
        }
    }

    fn play_moves(&mut self, moves: &[&str]) {
        for uci in moves {
            match uci.parse::<Move>() {
                Ok(m) => {
                    if let Err(e) = self.position.make_safe_move(m) {
                        eprintln!("illegal move {uci}: {e}");
                        break;
                    }
                }
                Err(e) => {
                    eprintln!("unparsable move {uci}: {e}");
                    break;
                }
            }
        }
    }

    fn go(&mut self, out: &mut impl Write) -> io::Result<()> {
        let best = if self.skill.value == 0 {
            search::random_move(&self.position)
        } else {
            search::best_move(&mut self.position, self.skill.value, Evaluator::Weighted)
                .map(|(m, _)| m)
        };
        chess_engine::log_debug!("go: skill={} best={:?}", self.skill.value, best);
        match best {
            Some(m) => writeln!(out, "bestmove {m}"),
            None => writeln!(out, "bestmove 0000"),
        }
    }

    fn about(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "id name {ENGINE_NAME}")?;
        writeln!(out, "id author {ENGINE_AUTHOR}")?;
        writeln!(
            out,
            "option name Skill type spin default {} min {} max {}",
            SkillOption::DEFAULT,
            SkillOption::MIN,
            SkillOption::MAX
        )?;
        writeln!(out, "uciok")
    }

    fn display(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", self.position)
    }

    fn handle_position(&mut self, rest: &str) {
        let tokens: Vec<&str> = rest.split_whitespace().collect();
        let mut i = 0;
        if tokens.first() == Some(&"startpos") {
            self.reset();
            i = 1;
        } else if tokens.first() == Some(&"fen") {
            i = 1;
            let fen_start = i;
            while i < tokens.len() && tokens[i] != "moves" {
                i += 1;
            }
            self.set_fen(&tokens[fen_start..i].join(" "));
        }
        if tokens.get(i) == Some(&"moves") {
            self.play_moves(&tokens[i + 1..]);
        }
    }

    fn handle_setoption(&mut self, rest: &str) {
        // Expected shape: "name <Name> value <Value>".
        let Some(name_idx) = rest.find("name ") else {
            eprintln!("invalid setoption instruction");
            return;
        };
        let after_name = &rest[name_idx + "name ".len()..];
        let Some(value_idx) = after_name.find(" value ") else {
            eprintln!("invalid setoption instruction");
            return;
        };
        let name = after_name[..value_idx].trim();
        let value = after_name[value_idx + " value ".len()..].trim();
        match name {
            "Skill" => {
                if !self.skill.set(value) {
                    eprintln!("could not set value");
                }
            }
            other => eprintln!("no such option: {other}"),
        }
    }
}

fn main() -> io::Result<()> {
    let mut engine = Engine::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        let cmd = line.trim();
        if cmd.is_empty() {
            continue;
        }
        let (head, rest) = cmd.split_once(' ').unwrap_or((cmd, ""));

        match head {
            "quit" => break,
            "ucinewgame" => engine.reset(),
            "isready" => writeln!(stdout, "readyok")?,
            "uci" => engine.about(&mut stdout)?,
            "d" => engine.display(&mut stdout)?,
            "go" => engine.go(&mut stdout)?,
            "setoption" => engine.handle_setoption(rest),
            "position" => engine.handle_position(rest),
            other => eprintln!("unknown command: {other}"),
        }
        stdout.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_option_rejects_out_of_range() {
        let mut skill = SkillOption::new();
        assert!(!skill.set("6"));
        assert!(skill.set("5"));
        assert_eq!(skill.value, 5);
    }

    #[test]
    fn handle_position_loads_startpos_and_moves() {
        let mut engine = Engine::new();
        engine.handle_position("startpos moves e2e4 e7e5");
        assert_eq!(engine.position.fullmoves(), 2);
    }

    #[test]
    fn handle_position_loads_fen() {
        let mut engine = Engine::new();
        engine.handle_position("fen 8/8/8/8/8/8/8/K6k w - - 0 1");
        assert_eq!(
            engine.position.to_fen(),
            "8/8/8/8/8/8/8/K6k w - - 0 1"
        );
    }
}
