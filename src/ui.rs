use std::io::{self, BufRead, Write};

use engine::{Color, Square};
use regex::Regex;
use tracing::warn;

use crate::game::{ClickOutcome, Game, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Click(Square),
    Move(Square, Square),
    Moves,
    Reset,
    Quit,
    Help,
}

const HELP: &str = "\
commands:
  e2       click a square (select a piece, or the target of the selected one)
  e2e3     two clicks in one line
  moves    list the targets of the selected piece
  reset    start a new game
  quit     leave";

fn command_regex() -> anyhow::Result<Regex> {
    Ok(Regex::new(
        r"^(?i)\s*(?:(?P<from>[a-h][1-8])\s*(?P<to>[a-h][1-8])?|(?P<word>moves|reset|quit|exit|help))\s*$",
    )?)
}

fn parse_command(regex: &Regex, line: &str) -> Option<Command> {
    let captures = regex.captures(line)?;
    if let Some(word) = captures.name("word") {
        return match word.as_str().to_ascii_lowercase().as_str() {
            "moves" => Some(Command::Moves),
            "reset" => Some(Command::Reset),
            "quit" | "exit" => Some(Command::Quit),
            _ => Some(Command::Help),
        };
    }
    let from: Square = captures.name("from")?.as_str().parse().ok()?;
    match captures.name("to") {
        Some(to) => Some(Command::Move(from, to.as_str().parse().ok()?)),
        None => Some(Command::Click(from)),
    }
}

fn captured_line(game: &Game, color: Color) -> String {
    let symbols: Vec<String> = game
        .position()
        .captured(color)
        .iter()
        .map(|piece| piece.symbol().to_string())
        .collect();
    format!("{}: {}", color.name(), symbols.join(" "))
}

fn redrawn(out: &mut impl Write, game: &Game) -> io::Result<()> {
    writeln!(out, "{}", game.position())?;
    writeln!(out, "{}", captured_line(game, Color::White))?;
    writeln!(out, "{}", captured_line(game, Color::Black))?;
    match game.selection() {
        Selection::Selected(square) => writeln!(out, "{} (selected {square})", game.status()),
        Selection::Idle => writeln!(out, "{}", game.status()),
    }
}

fn report(out: &mut impl Write, outcome: ClickOutcome) -> io::Result<()> {
    match outcome {
        ClickOutcome::Moved {
            from,
            to,
            captured: Some(piece),
        } => writeln!(out, "{from} -> {to}, took {}", piece.symbol()),
        ClickOutcome::Moved { from, to, .. } => writeln!(out, "{from} -> {to}"),
        ClickOutcome::Deselected => writeln!(out, "illegal move, selection cleared"),
        ClickOutcome::Ignored => writeln!(out, "nothing to select there"),
        ClickOutcome::Selected(_) => Ok(()),
    }
}

pub fn ui(mut game: Game) -> anyhow::Result<()> {
    let regex = command_regex()?;
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    writeln!(out, "{HELP}")?;
    redrawn(&mut out, &game)?;
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let Some(command) = parse_command(&regex, &line) else {
            warn!(input = %line, "unrecognised command");
            writeln!(out, "unrecognised command, type help")?;
            continue;
        };
        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Reset => game.reset(),
            Command::Moves => match game.selection() {
                Selection::Selected(from) => {
                    let targets: Vec<String> = game
                        .position()
                        .legal_targets(from)
                        .iter()
                        .map(Square::to_string)
                        .collect();
                    writeln!(out, "{from}: {}", targets.join(" "))?;
                    continue;
                }
                Selection::Idle => {
                    writeln!(out, "no piece selected")?;
                    continue;
                }
            },
            Command::Click(square) => {
                let outcome = game.click(square);
                report(&mut out, outcome)?;
            }
            Command::Move(from, to) => {
                // a pending selection would swallow the first click
                game.deselect();
                let outcome = match game.click(from) {
                    ClickOutcome::Selected(_) => game.click(to),
                    other => other,
                };
                report(&mut out, outcome)?;
            }
        }
        redrawn(&mut out, &game)?;
    }
    Ok(())
}
