//! Fixed-capacity recency windows backing the cooldowns.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// Remembers the items used in the last `capacity` rounds.
///
/// A round is one question's worth of items: a single attribute type, or the
/// two companies of a pair. Pushing a round when the window is full evicts the
/// oldest one. Membership checks are O(1).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    from = "WindowSnapshot<T>",
    into = "WindowSnapshot<T>",
    bound(
        serialize = "T: Clone + Serialize",
        deserialize = "T: Eq + Hash + Clone + Deserialize<'de>"
    )
)]
pub struct RecencyWindow<T> {
    capacity: usize,
    rounds: VecDeque<Vec<T>>,
    /// Item -> number of rounds in the window containing it.
    members: HashMap<T, usize>,
}

impl<T: Eq + Hash + Clone> RecencyWindow<T> {
    /// Create an empty window holding at most `capacity` rounds.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            rounds: VecDeque::new(),
            members: HashMap::new(),
        }
    }

    /// Record a round, returning the evicted round if the window was full.
    ///
    /// With a capacity of zero nothing is remembered and the round itself is
    /// handed back.
    pub fn push(&mut self, round: impl IntoIterator<Item = T>) -> Option<Vec<T>> {
        let round: Vec<T> = round.into_iter().collect();
        if self.capacity == 0 {
            return Some(round);
        }

        let evicted = if self.rounds.len() >= self.capacity {
            self.evict_oldest()
        } else {
            None
        };

        for item in &round {
            *self.members.entry(item.clone()).or_default() += 1;
        }
        self.rounds.push_back(round);
        evicted
    }

    /// Drop the oldest round early.
    pub fn evict_oldest(&mut self) -> Option<Vec<T>> {
        let round = self.rounds.pop_front()?;
        for item in &round {
            if let Some(count) = self.members.get_mut(item) {
                *count -= 1;
                if *count == 0 {
                    self.members.remove(item);
                }
            }
        }
        Some(round)
    }

    /// Check if an item is still cooling down.
    pub fn contains(&self, item: &T) -> bool {
        self.members.contains_key(item)
    }

    /// Number of rounds currently held.
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Rounds from oldest to newest.
    pub fn rounds(&self) -> impl Iterator<Item = &[T]> {
        self.rounds.iter().map(Vec::as_slice)
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.rounds.clear();
        self.members.clear();
    }
}

/// Serialized form of a [`RecencyWindow`]; the membership index is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct WindowSnapshot<T> {
    capacity: usize,
    rounds: Vec<Vec<T>>,
}

impl<T: Eq + Hash + Clone> From<WindowSnapshot<T>> for RecencyWindow<T> {
    fn from(snapshot: WindowSnapshot<T>) -> Self {
        let mut window = RecencyWindow::new(snapshot.capacity);
        for round in snapshot.rounds {
            window.push(round);
        }
        window
    }
}

impl<T> From<RecencyWindow<T>> for WindowSnapshot<T> {
    fn from(window: RecencyWindow<T>) -> Self {
        Self {
            capacity: window.capacity,
            rounds: window.rounds.into_iter().collect(),
        }
    }
}
