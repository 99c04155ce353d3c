use std::{fmt, str::FromStr};

use super::{
    position::{Direction, Position},
    tile::{Color, Tile},
};

/// Fixed-size grid of [`Tile`]s.
///
/// Dimensions are fixed at construction; only the tiles change afterwards. Cells are
/// stored row-major and addressed with [`Position`] (`x` = column, `y` = row).
///
/// The board has a plain text form, one character per cell (see [`Tile::as_char`]):
///
/// ```
/// use pushy_engine::{Board, Color, Position, Tile};
///
/// let board: Board = "
///     R.#
///     .xB
/// ".parse().unwrap();
///
/// assert_eq!(board.columns(), 3);
/// assert_eq!(board.rows(), 2);
/// assert_eq!(board.get(Position::new(0, 0)), Some(Tile::Square(Color::Red)));
/// assert_eq!(board.get(Position::new(1, 1)), Some(Tile::Void));
/// assert_eq!(board.get(Position::new(3, 0)), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    columns: usize,
    rows: usize,
    tiles: Vec<Tile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("position {position} is outside the board")]
pub struct OutOfBoundsError {
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("board has no rows")]
    Empty,
    #[display("board is larger than {max}x{max} cells", max = Board::MAX_SIDE)]
    TooLarge,
    #[display("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("unknown tile {ch:?} at row {row}, column {column}")]
    UnknownTile { ch: char, row: usize, column: usize },
}

impl Board {
    /// Largest supported number of columns or rows.
    pub const MAX_SIDE: usize = 256;

    /// Creates a board of empty cells.
    ///
    /// # Panics
    ///
    /// Panics if either side is zero or larger than [`Self::MAX_SIDE`].
    #[must_use]
    pub fn new(columns: usize, rows: usize) -> Self {
        assert!((1..=Self::MAX_SIDE).contains(&columns));
        assert!((1..=Self::MAX_SIDE).contains(&rows));
        Self {
            columns,
            rows,
            tiles: vec![Tile::Empty; columns * rows],
        }
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.columns && y < self.rows).then_some(y * self.columns + x)
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn position_of(&self, index: usize) -> Position {
        // sides are bounded by MAX_SIDE, so both coordinates fit in i32
        Position::new((index % self.columns) as i32, (index / self.columns) as i32)
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Returns the tile at `pos`, or `None` when `pos` is off the board.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.index(pos).map(|i| self.tiles[i])
    }

    /// Replaces the tile at `pos` and returns the previous one.
    pub fn set(&mut self, pos: Position, tile: Tile) -> Result<Tile, OutOfBoundsError> {
        let i = self.index(pos).ok_or(OutOfBoundsError { position: pos })?;
        Ok(std::mem::replace(&mut self.tiles[i], tile))
    }

    /// Position one cell away from `pos` in `direction`, or `None` if that is off the board.
    #[must_use]
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        let next = pos.step(direction);
        self.in_bounds(next).then_some(next)
    }

    /// Iterates over every position of the board, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.tiles.len()).map(|i| self.position_of(i))
    }

    /// Iterates over every tile with its position, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| (self.position_of(i), *tile))
    }

    /// Iterates over all squares (grey included) with their positions, row by row.
    pub fn squares(&self) -> impl Iterator<Item = (Position, Color)> + '_ {
        self.tiles()
            .filter_map(|(pos, tile)| tile.square_color().map(|color| (pos, color)))
    }

    /// Iterates over the positions of the squares of `color`, row by row.
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = Position> + '_ {
        self.squares()
            .filter(move |(_, c)| *c == color)
            .map(|(pos, _)| pos)
    }

    #[must_use]
    pub fn square_count(&self, color: Color) -> usize {
        self.squares_of(color).count()
    }

    /// Returns all positions ordered so that cells further along `direction` come first.
    ///
    /// For [`Direction::Right`] this scans the rightmost column first, for
    /// [`Direction::Up`] the top row first, and so on.
    #[must_use]
    pub fn positions_leading_first(&self, direction: Direction) -> Vec<Position> {
        let mut positions: Vec<Position> = self.positions().collect();
        match direction {
            Direction::Up => positions.sort_by_key(|p| (p.y, p.x)),
            Direction::Down => positions.sort_by_key(|p| (-p.y, p.x)),
            Direction::Left => positions.sort_by_key(|p| (p.x, p.y)),
            Direction::Right => positions.sort_by_key(|p| (-p.x, p.y)),
        }
        positions
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses the text form. Leading and trailing whitespace of each line is ignored, as are
    /// blank lines.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = lines.first() else {
            return Err(ParseBoardError::Empty);
        };
        let columns = first.chars().count();
        let rows = lines.len();
        if columns > Self::MAX_SIDE || rows > Self::MAX_SIDE {
            return Err(ParseBoardError::TooLarge);
        }

        let mut tiles = Vec::with_capacity(columns * rows);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != columns {
                return Err(ParseBoardError::Ragged {
                    row,
                    expected: columns,
                    found,
                });
            }
            for (column, ch) in line.chars().enumerate() {
                let tile =
                    Tile::from_char(ch).ok_or(ParseBoardError::UnknownTile { ch, row, column })?;
                tiles.push(tile);
            }
        }

        Ok(Self {
            columns,
            rows,
            tiles,
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.tiles.chunks(self.columns).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for tile in row {
                write!(f, "{}", tile.as_char())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let b = Board::new(4, 3);
        assert_eq!(b.columns(), 4);
        assert_eq!(b.rows(), 3);
        assert!(b.tiles().all(|(_, t)| t.is_empty()));
        assert_eq!(b.positions().count(), 12);
    }

    #[test]
    fn test_in_bounds() {
        let b = Board::new(4, 3);
        assert!(b.in_bounds(Position::new(0, 0)));
        assert!(b.in_bounds(Position::new(3, 2)));
        assert!(!b.in_bounds(Position::new(4, 0)));
        assert!(!b.in_bounds(Position::new(0, 3)));
        assert!(!b.in_bounds(Position::new(-1, 1)));
    }

    #[test]
    fn test_get_and_set() {
        let mut b = Board::new(3, 3);
        let p = Position::new(2, 1);
        assert_eq!(b.set(p, Tile::Wall), Ok(Tile::Empty));
        assert_eq!(b.get(p), Some(Tile::Wall));
        assert_eq!(
            b.set(Position::new(3, 1), Tile::Wall),
            Err(OutOfBoundsError {
                position: Position::new(3, 1)
            })
        );
    }

    #[test]
    fn test_neighbor_off_board() {
        let b = Board::new(3, 3);
        let corner = Position::new(0, 0);
        assert_eq!(b.neighbor(corner, Direction::Up), None);
        assert_eq!(b.neighbor(corner, Direction::Left), None);
        assert_eq!(
            b.neighbor(corner, Direction::Right),
            Some(Position::new(1, 0))
        );
        assert_eq!(b.neighbor(corner, Direction::Down), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_parse_and_display_roundtrip() {
        let text = "R.#\n.xB\noGY";
        let b = board(text);
        assert_eq!(b.to_string(), text);
        assert_eq!(b.get(Position::new(0, 2)), Some(Tile::Square(Color::Grey)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Board>(), Err(ParseBoardError::Empty));
        assert_eq!(
            "...\n..".parse::<Board>(),
            Err(ParseBoardError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            "..\n.?".parse::<Board>(),
            Err(ParseBoardError::UnknownTile {
                ch: '?',
                row: 1,
                column: 1
            })
        );
    }

    #[test]
    fn test_squares_enumeration() {
        let b = board(
            "
            R.B
            .R.
            o..
            ",
        );
        let squares: Vec<_> = b.squares().collect();
        assert_eq!(
            squares,
            vec![
                (Position::new(0, 0), Color::Red),
                (Position::new(2, 0), Color::Blue),
                (Position::new(1, 1), Color::Red),
                (Position::new(0, 2), Color::Grey),
            ]
        );
        assert_eq!(b.square_count(Color::Red), 2);
        assert_eq!(b.square_count(Color::Green), 0);
        assert_eq!(
            b.squares_of(Color::Red).collect::<Vec<_>>(),
            vec![Position::new(0, 0), Position::new(1, 1)]
        );
    }

    #[test]
    fn test_positions_leading_first() {
        let b = Board::new(3, 2);
        let right = b.positions_leading_first(Direction::Right);
        assert_eq!(right.first(), Some(&Position::new(2, 0)));
        assert_eq!(right.last(), Some(&Position::new(0, 1)));

        let up = b.positions_leading_first(Direction::Up);
        assert_eq!(up.first(), Some(&Position::new(0, 0)));
        assert_eq!(up.last(), Some(&Position::new(2, 1)));

        let down = b.positions_leading_first(Direction::Down);
        assert!(down[..3].iter().all(|p| p.y == 1));

        let left = b.positions_leading_first(Direction::Left);
        assert!(left[..2].iter().all(|p| p.x == 0));
    }
}
