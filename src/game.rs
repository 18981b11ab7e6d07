use engine::{Piece, Position, Square};
use tracing::{debug, info};

/// Click-selection state between the board and the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Idle,
    Selected(Square),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected(Square),
    Moved {
        from: Square,
        to: Square,
        captured: Option<Piece>,
    },
    /// The second click did not make a legal move; the selection is dropped.
    Deselected,
    /// Nothing selectable was clicked.
    Ignored,
}

pub struct Game {
    position: Position, // current board
    selection: Selection,
}

impl Game {
    pub fn new() -> Game {
        Game::from_position(Position::initial())
    }

    pub fn from_position(position: Position) -> Game {
        Game {
            position,
            selection: Selection::Idle,
        }
    }

    /// Starts over from the standard layout with empty capture lists.
    pub fn reset(&mut self) {
        info!("game reset");
        *self = Game::new();
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn deselect(&mut self) {
        self.selection = Selection::Idle;
    }

    pub fn status(&self) -> String {
        format!("{}'s turn", self.position.turn().name())
    }

    pub fn click(&mut self, square: Square) -> ClickOutcome {
        match self.selection {
            Selection::Idle => self.select(square),
            Selection::Selected(from) => {
                self.selection = Selection::Idle;
                self.move_to(from, square)
            }
        }
    }

    fn select(&mut self, square: Square) -> ClickOutcome {
        if self.position.is_own_piece(square, self.position.turn()) {
            debug!(%square, "selected");
            self.selection = Selection::Selected(square);
            ClickOutcome::Selected(square)
        } else {
            ClickOutcome::Ignored
        }
    }

    fn move_to(&mut self, from: Square, to: Square) -> ClickOutcome {
        let captured = self.position.piece_at(to);
        match self.position.attempt_move(from, to) {
            Some(next) => {
                self.position = next;
                info!(%from, %to, captured = ?captured, "move applied");
                ClickOutcome::Moved { from, to, captured }
            }
            None => {
                debug!(%from, %to, "illegal move, selection dropped");
                ClickOutcome::Deselected
            }
        }
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::game::*;
    use engine::{Color, PieceKind};

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_select_and_move() {
        let mut game = Game::new();
        assert_eq!(game.status(), "White's turn");
        assert_eq!(game.click(sq("e2")), ClickOutcome::Selected(sq("e2")));
        assert_eq!(game.selection(), Selection::Selected(sq("e2")));
        assert_eq!(
            game.click(sq("e3")),
            ClickOutcome::Moved {
                from: sq("e2"),
                to: sq("e3"),
                captured: None
            }
        );
        assert_eq!(game.selection(), Selection::Idle);
        assert_eq!(game.position().turn(), Color::Black);
        assert_eq!(game.status(), "Black's turn");
    }

    #[test]
    fn test_idle_click_on_empty_or_enemy_is_ignored() {
        let mut game = Game::new();
        assert_eq!(game.click(sq("e4")), ClickOutcome::Ignored);
        assert_eq!(game.click(sq("e7")), ClickOutcome::Ignored);
        assert_eq!(game.selection(), Selection::Idle);
        assert_eq!(game.position(), &Position::initial());
    }

    #[test]
    fn test_illegal_second_click_drops_selection() {
        let mut game = Game::new();
        game.click(sq("e2"));
        assert_eq!(game.click(sq("e4")), ClickOutcome::Deselected);
        assert_eq!(game.selection(), Selection::Idle);
        assert_eq!(game.position().turn(), Color::White);

        // another own piece does not switch the selection either
        game.click(sq("e2"));
        assert_eq!(game.click(sq("d2")), ClickOutcome::Deselected);
        assert_eq!(game.selection(), Selection::Idle);
        assert_eq!(game.position(), &Position::initial());
    }

    #[test]
    fn test_capture_is_reported_and_recorded() {
        let mut game = Game::new();
        for (from, to) in [("e2", "e3"), ("d7", "d6"), ("e3", "e4"), ("d6", "d5")] {
            game.click(sq(from));
            assert!(matches!(game.click(sq(to)), ClickOutcome::Moved { .. }));
        }
        game.click(sq("e4"));
        let black_pawn = Piece::new(PieceKind::Pawn, Color::Black);
        assert_eq!(
            game.click(sq("d5")),
            ClickOutcome::Moved {
                from: sq("e4"),
                to: sq("d5"),
                captured: Some(black_pawn)
            }
        );
        assert_eq!(game.position().captured(Color::Black), &[black_pawn]);
        assert!(game.position().captured(Color::White).is_empty());
    }

    #[test]
    fn test_reset() {
        let mut game = Game::new();
        game.click(sq("g1"));
        game.click(sq("f3"));
        game.click(sq("b8"));
        game.reset();
        assert_eq!(game.position(), &Position::initial());
        assert_eq!(game.selection(), Selection::Idle);
    }

    #[test]
    fn test_games_are_independent() {
        let mut first = Game::new();
        let second = Game::new();
        first.click(sq("a2"));
        first.click(sq("a3"));
        assert_ne!(first.position(), second.position());
        assert_eq!(second.position(), &Position::initial());
    }
}
