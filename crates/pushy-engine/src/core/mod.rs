pub use self::{board::*, map::*, position::*, tile::*};

pub(crate) mod board;
pub(crate) mod map;
pub(crate) mod position;
pub(crate) mod tile;
