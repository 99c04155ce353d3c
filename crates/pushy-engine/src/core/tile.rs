use serde::{Deserialize, Serialize};

/// Owner color of a square.
///
/// The four player colors can be seated in a match. [`Color::Grey`] is the neutral color a
/// player's squares turn into once that player is eliminated; grey squares never move.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[display("red")]
    Red,
    #[display("blue")]
    Blue,
    #[display("green")]
    Green,
    #[display("yellow")]
    Yellow,
    #[display("grey")]
    Grey,
}

impl Color {
    /// Colors that can be seated as players.
    pub const PLAYERS: [Self; 4] = [Self::Red, Self::Blue, Self::Green, Self::Yellow];

    /// Number of distinct colors, grey included.
    pub const LEN: usize = 5;

    #[must_use]
    pub const fn is_grey(self) -> bool {
        matches!(self, Self::Grey)
    }

    /// Dense index in `0..Color::LEN`, usable for per-color arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Character used for a square of this color in the text board format.
    #[must_use]
    pub const fn square_char(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Blue => 'B',
            Self::Green => 'G',
            Self::Yellow => 'Y',
            Self::Grey => 'o',
        }
    }

    /// Digit marking this color's spawnpoint in map layouts.
    ///
    /// Grey has no spawnpoint.
    #[must_use]
    pub const fn spawn_char(self) -> Option<char> {
        match self {
            Self::Red => Some('1'),
            Self::Blue => Some('2'),
            Self::Green => Some('3'),
            Self::Yellow => Some('4'),
            Self::Grey => None,
        }
    }

    #[must_use]
    pub const fn from_spawn_char(ch: char) -> Option<Self> {
        match ch {
            '1' => Some(Self::Red),
            '2' => Some(Self::Blue),
            '3' => Some(Self::Green),
            '4' => Some(Self::Yellow),
            _ => None,
        }
    }
}

/// Content of a single board cell.
///
/// [`Tile::Wall`] and [`Tile::Void`] are fixed features of a map, [`Tile::Square`] is game
/// state that moves, gets destroyed, spawns and turns grey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    #[default]
    Empty,
    /// Blocks every push.
    Wall,
    /// Destroys any square pushed into it.
    Void,
    Square(Color),
}

impl Tile {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn square_color(self) -> Option<Color> {
        match self {
            Self::Square(color) => Some(color),
            Self::Empty | Self::Wall | Self::Void => None,
        }
    }

    /// Returns `true` for squares that take part in pushes (any color but grey).
    #[must_use]
    pub const fn is_movable_square(self) -> bool {
        match self {
            Self::Square(color) => !color.is_grey(),
            Self::Empty | Self::Wall | Self::Void => false,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wall => '#',
            Self::Void => 'x',
            Self::Square(color) => color.square_char(),
        }
    }

    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        let tile = match ch {
            '.' => Self::Empty,
            '#' => Self::Wall,
            'x' => Self::Void,
            'R' => Self::Square(Color::Red),
            'B' => Self::Square(Color::Blue),
            'G' => Self::Square(Color::Green),
            'Y' => Self::Square(Color::Yellow),
            'o' => Self::Square(Color::Grey),
            _ => return None,
        };
        Some(tile)
    }
}
