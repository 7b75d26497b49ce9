use std::collections::{HashSet, VecDeque};
use std::hash::Hash;
use std::path::PathBuf;

use crate::types::SourceFolder;

/// Folders whose sources still have to be turned into files
pub type SourceFolderQueue = UniqueQueue<SourceFolder>;

/// Source files whose includes have not been discovered yet
pub type SourceFileQueue = UniqueQueue<PathBuf>;

/// FIFO that accepts every item at most once over its whole lifetime.
///
/// Popping an item does not make it eligible again: anything ever pushed
/// (or marked seen) is rejected by later pushes.
#[derive(Debug, Clone)]
pub struct UniqueQueue<T> {
    pending: VecDeque<T>,
    seen: HashSet<T>,
    history: Vec<T>,
}

impl<T: Clone + Eq + Hash> UniqueQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            seen: HashSet::new(),
            history: Vec::new(),
        }
    }

    /// Enqueue `item` unless it was seen before. Returns whether it was added.
    pub fn push(&mut self, item: T) -> bool {
        if !self.remember(&item) {
            return false;
        }
        self.pending.push_back(item);
        true
    }

    /// Record `item` as seen without queueing it
    pub fn mark_seen(&mut self, item: T) -> bool {
        self.remember(&item)
    }

    pub fn pop(&mut self) -> Option<T> {
        self.pending.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of items still waiting
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn has_seen(&self, item: &T) -> bool {
        self.seen.contains(item)
    }

    /// Everything ever accepted, in acceptance order
    pub fn history(&self) -> &[T] {
        &self.history
    }

    fn remember(&mut self, item: &T) -> bool {
        if !self.seen.insert(item.clone()) {
            return false;
        }
        self.history.push(item.clone());
        true
    }
}

impl<T: Clone + Eq + Hash> Default for UniqueQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
