use std::collections::BTreeMap;

use crate::MapError;

use super::{
    board::Board,
    position::Position,
    tile::{Color, Tile},
};

struct MapDefinition {
    name: &'static str,
    layout: &'static str,
    seat_order: &'static [Color],
}

// Layout characters follow the board text format, plus `1`-`4` for the spawnpoints of
// red, blue, green and yellow (the cell itself is empty).
const MAP_DEFINITIONS: &[MapDefinition] = &[
    MapDefinition {
        name: "standard",
        layout: "
            xxxx.xxxx
            x.......x
            x.1...4.x
            x...#...x
            .........
            x...#...x
            x.2...3.x
            x.......x
            xxxx.xxxx
        ",
        seat_order: &[Color::Red, Color::Green, Color::Blue, Color::Yellow],
    },
    MapDefinition {
        name: "small",
        layout: "
            xxxxxxx
            x.....x
            x.1...x
            x..#..x
            x...3.x
            x.....x
            xxxxxxx
        ",
        seat_order: &[Color::Red, Color::Green],
    },
    MapDefinition {
        name: "arena",
        layout: "
            ...........
            .1.......4.
            ...x...x...
            ....#.#....
            ..x.....x..
            .....#.....
            ..x.....x..
            ....#.#....
            ...x...x...
            .2.......3.
            ...........
        ",
        seat_order: &[Color::Red, Color::Green, Color::Blue, Color::Yellow],
    },
    MapDefinition {
        name: "cross",
        layout: "
            xxx...xxx
            xxx.1.xxx
            xxx...xxx
            .........
            .2..#..4.
            .........
            xxx...xxx
            xxx.3.xxx
            xxx...xxx
        ",
        seat_order: &[Color::Red, Color::Green, Color::Blue, Color::Yellow],
    },
];

/// A named map layout: the initial board, one spawnpoint per color and the seating order.
///
/// Seating is a prefix of the seat order, so a two-player match on a four-player map uses the
/// first two colors (placed on opposite corners by the built-in maps).
///
/// # Example
///
/// ```
/// use pushy_engine::{Color, Map};
///
/// let map = Map::from_name("standard").unwrap();
/// assert_eq!(map.seating(2).unwrap(), &[Color::Red, Color::Green]);
/// assert!(map.seating(5).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    name: String,
    board: Board,
    spawnpoints: BTreeMap<Color, Position>,
    seat_order: Vec<Color>,
}

impl Map {
    /// Looks up a built-in map by name.
    pub fn from_name(name: &str) -> Result<Self, MapError> {
        let def = MAP_DEFINITIONS
            .iter()
            .find(|def| def.name == name)
            .ok_or_else(|| MapError::UnknownMap {
                name: name.to_owned(),
            })?;
        Self::from_layout(def.name, def.layout, def.seat_order)
    }

    /// Names of the built-in maps.
    pub fn names() -> impl Iterator<Item = &'static str> {
        MAP_DEFINITIONS.iter().map(|def| def.name)
    }

    /// Loads every built-in map.
    pub fn all() -> Result<Vec<Self>, MapError> {
        Self::names().map(Self::from_name).collect()
    }

    /// Builds a map from a layout string.
    ///
    /// Every color in `seat_order` must be a player color with exactly one spawnpoint digit in
    /// the layout.
    pub fn from_layout(
        name: impl Into<String>,
        layout: &str,
        seat_order: &[Color],
    ) -> Result<Self, MapError> {
        let name = name.into();
        let invalid = |reason: String| MapError::InvalidLayout {
            map: name.clone(),
            reason,
        };

        let mut spawnpoints = BTreeMap::new();
        let mut board_text = String::with_capacity(layout.len());
        let rows = layout.lines().map(str::trim).filter(|l| !l.is_empty());
        for (y, line) in rows.enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let Some(color) = Color::from_spawn_char(ch) else {
                    board_text.push(ch);
                    continue;
                };
                let pos = Position::new(
                    i32::try_from(x).map_err(|e| invalid(e.to_string()))?,
                    i32::try_from(y).map_err(|e| invalid(e.to_string()))?,
                );
                if spawnpoints.insert(color, pos).is_some() {
                    return Err(invalid(format!("{color} has more than one spawnpoint")));
                }
                board_text.push(Tile::Empty.as_char());
            }
            board_text.push('\n');
        }
        let board: Board = board_text.parse().map_err(|e| invalid(format!("{e}")))?;

        for (i, color) in seat_order.iter().enumerate() {
            if color.is_grey() {
                return Err(invalid("grey cannot be seated".to_owned()));
            }
            if seat_order[..i].contains(color) {
                return Err(invalid(format!("{color} is seated twice")));
            }
            if !spawnpoints.contains_key(color) {
                return Err(invalid(format!("{color} has no spawnpoint")));
            }
        }

        Ok(Self {
            name,
            board,
            spawnpoints,
            seat_order: seat_order.to_vec(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn spawnpoints(&self) -> &BTreeMap<Color, Position> {
        &self.spawnpoints
    }

    #[must_use]
    pub fn seat_order(&self) -> &[Color] {
        &self.seat_order
    }

    #[must_use]
    pub fn max_players(&self) -> usize {
        self.seat_order.len()
    }

    /// Colors seated in a match of `player_count` players, in seating order.
    pub fn seating(&self, player_count: usize) -> Result<&[Color], MapError> {
        if player_count < 2 {
            return Err(MapError::TooFewPlayers {
                requested: player_count,
            });
        }
        self.seat_order
            .get(..player_count)
            .ok_or_else(|| MapError::TooManyPlayers {
                map: self.name.clone(),
                requested: player_count,
                available: self.seat_order.len(),
            })
    }

    /// Seated colors paired with their spawnpoints, in seating order.
    pub fn seats(&self, player_count: usize) -> Result<Vec<(Color, Position)>, MapError> {
        // every seatable color has a spawnpoint, checked in `from_layout`
        Ok(self
            .seating(player_count)?
            .iter()
            .filter_map(|color| Some((*color, *self.spawnpoints.get(color)?)))
            .collect())
    }
}
