//! Plain-text rendering of a match for the terminal.

use std::{collections::BTreeMap, fmt::Write as _};

use pushy_engine::{Color, Match, MoveResult};

use crate::command::play::Seat;

/// Header, board and one status line per player. The player to move is marked with `>`.
pub fn match_view(game: &Match, seats: &BTreeMap<Color, Seat>) -> String {
    let mut out = String::new();
    _ = writeln!(out, "{} - turn {}", game.map_name(), game.turn());
    _ = writeln!(out, "{}", game.board());
    let current = game.current_player().color();
    for player in game.players() {
        let color = player.color();
        let marker = if color == current && !game.is_over() {
            '>'
        } else {
            ' '
        };
        let seat = seats
            .get(&color)
            .map_or_else(String::new, |s| format!(" ({s})"));
        let name = format!("{color}{seat}");
        if player.is_alive() {
            _ = writeln!(
                out,
                "{marker} {:<2} {name:<14} lives {}  squares {}  new square in {}",
                color.square_char(),
                player.lives(),
                game.square_count(color),
                player.turns_until_new_square(),
            );
        } else {
            _ = writeln!(out, "{marker} {:<2} {name:<14} eliminated", color.square_char());
        }
    }
    out
}

/// One line describing what a move did.
pub fn move_summary(color: Color, result: &MoveResult) -> String {
    let mut line = format!(
        "{color} pushed {}: {} moved",
        result.direction,
        result.moved.len()
    );
    if !result.destroyed.is_empty() {
        _ = write!(line, ", {} destroyed", result.destroyed.len());
    }
    if !result.greyed_out.is_empty() {
        _ = write!(line, ", {} turned grey", result.greyed_out.len());
    }
    if let Some(spawn) = result.spawned {
        _ = write!(line, ", {} spawned at {}", spawn.color, spawn.position);
    }
    line
}

pub fn result_line(game: &Match) -> String {
    match (game.is_over(), game.winner()) {
        (true, Some(winner)) => format!("{winner} wins after {} turns", game.turn()),
        (true, None) => format!("draw after {} turns", game.turn()),
        (false, _) => format!("stopped after {} turns", game.turn()),
    }
}

#[cfg(test)]
mod tests {
    use pushy_engine::{Board, Direction, MatchConfig, Position, Spawn};
    use pushy_evaluator::personality::Personality;

    use super::*;

    fn duel() -> Match {
        let board: Board = "R...B".parse().unwrap();
        let seats = [
            (Color::Red, Position::new(0, 0)),
            (Color::Blue, Position::new(4, 0)),
        ];
        Match::from_board("duel", board, &seats, MatchConfig::default()).unwrap()
    }

    #[test]
    fn test_match_view_lists_players() {
        let game = duel();
        let seats = BTreeMap::from([
            (Color::Red, Seat::Human),
            (Color::Blue, Seat::Ai(Personality::Preset)),
        ]);
        let view = match_view(&game, &seats);
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines[0], "duel - turn 0");
        assert_eq!(lines[1], "R...B");
        assert!(lines[2].starts_with("> R  red (human)"), "{view}");
        assert!(lines[2].contains("lives 5"), "{view}");
        assert!(lines[3].starts_with("  B  blue (ai)"), "{view}");
    }

    #[test]
    fn test_move_summary_mentions_changes() {
        let result = MoveResult {
            direction: Direction::Left,
            moved: vec![Position::new(1, 0)],
            destroyed: vec![Position::new(0, 0)],
            greyed_out: Vec::new(),
            spawned: Some(Spawn {
                color: Color::Red,
                position: Position::new(2, 2),
            }),
        };
        assert_eq!(
            move_summary(Color::Red, &result),
            "red pushed left: 1 moved, 1 destroyed, red spawned at (2, 2)"
        );
    }

    #[test]
    fn test_result_line_before_game_over() {
        assert_eq!(result_line(&duel()), "stopped after 0 turns");
    }
}
