use std::{cell::OnceCell, collections::BTreeMap};

use pushy_engine::{Board, Color, Direction, Position, resolve_push};

#[derive(Debug)]
pub struct BoardAnalysis {
    board: Board,
    squares: OnceCell<BTreeMap<Color, Vec<Position>>>,
    spreads: OnceCell<BTreeMap<Color, f32>>,
    endangered_squares: OnceCell<Vec<(Position, Color)>>,
}

impl BoardAnalysis {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            board: board.clone(),
            squares: OnceCell::new(),
            spreads: OnceCell::new(),
            endangered_squares: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Positions of the squares of every player color. Grey squares are left out.
    #[must_use]
    pub fn squares(&self) -> &BTreeMap<Color, Vec<Position>> {
        self.squares.get_or_init(|| {
            let mut squares = BTreeMap::<Color, Vec<Position>>::new();
            for (pos, color) in self.board.squares().filter(|(_, c)| !c.is_grey()) {
                squares.entry(color).or_default().push(pos);
            }
            squares
        })
    }

    #[must_use]
    pub fn squares_of(&self, color: Color) -> &[Position] {
        self.squares().get(&color).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn square_count(&self, color: Color) -> usize {
        self.squares_of(color).len()
    }

    /// Mean Manhattan distance of the squares of `color` from their centroid.
    ///
    /// Zero for fewer than two squares.
    #[must_use]
    pub fn spread(&self, color: Color) -> f32 {
        let spreads = self.spreads.get_or_init(|| {
            self.squares()
                .iter()
                .map(|(color, squares)| (*color, spread_of(squares)))
                .collect()
        });
        spreads.get(&color).copied().unwrap_or(0.0)
    }

    /// Squares that would be destroyed by a push in at least one direction, row-major.
    #[must_use]
    pub fn endangered_squares(&self) -> &[(Position, Color)] {
        self.endangered_squares.get_or_init(|| {
            let mut endangered = Direction::ALL
                .iter()
                .flat_map(|dir| resolve_push(&self.board, *dir).destroyed().to_vec())
                .collect::<Vec<_>>();
            endangered.sort_by_key(|(p, _)| (p.y, p.x));
            endangered.dedup();
            endangered
        })
    }

    #[must_use]
    pub fn in_danger_count(&self, color: Color) -> usize {
        self.endangered_squares()
            .iter()
            .filter(|(_, c)| *c == color)
            .count()
    }
}

#[expect(clippy::cast_precision_loss)]
fn spread_of(squares: &[Position]) -> f32 {
    if squares.len() < 2 {
        return 0.0;
    }
    let n = squares.len() as f32;
    let cx = squares.iter().map(|p| p.x as f32).sum::<f32>() / n;
    let cy = squares.iter().map(|p| p.y as f32).sum::<f32>() / n;
    squares
        .iter()
        .map(|p| (p.x as f32 - cx).abs() + (p.y as f32 - cy).abs())
        .sum::<f32>()
        / n
}
