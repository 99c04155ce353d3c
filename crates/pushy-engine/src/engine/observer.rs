use super::MoveResult;

/// Receives the result of every effective move applied to a [`Match`](super::Match).
///
/// Implemented for any `FnMut(&MoveResult) + Send` closure.
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use pushy_engine::{Direction, Map, Match, MatchConfig};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
///
/// let map = Map::from_name("small").unwrap();
/// let mut game = Match::new(&map, 2, MatchConfig::default()).unwrap();
/// game.set_observer(move |result: &pushy_engine::MoveResult| {
///     sink.lock().unwrap().push(result.direction);
/// });
///
/// game.apply_move(Direction::Down).unwrap();
/// assert_eq!(*seen.lock().unwrap(), vec![Direction::Down]);
/// ```
pub trait MoveObserver: Send {
    fn on_move(&mut self, result: &MoveResult);
}

impl<F> MoveObserver for F
where
    F: FnMut(&MoveResult) + Send,
{
    fn on_move(&mut self, result: &MoveResult) {
        self(result);
    }
}
