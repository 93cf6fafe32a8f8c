use std::collections::VecDeque;

use crate::classify::{build_block, ResultBlock};
use crate::comparison::GuessComparison;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: u64,
    pub block: ResultBlock,
}

/// Rendered guesses, newest first.
///
/// Entries are never edited after insertion. Every mutation bumps
/// `revision`, which is the signal the pan surface listens to for
/// re-measuring its bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFeed {
    entries: VecDeque<HistoryEntry>,
    next_id: u64,
    revision: u64,
}

impl HistoryFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies `data` and inserts it as the newest entry.
    ///
    /// Returns `false` and leaves the feed untouched for an `invalid` result.
    pub fn append(&mut self, data: &GuessComparison) -> bool {
        if data.is_invalid() {
            return false;
        }
        let entry = HistoryEntry {
            id: self.next_id,
            block: build_block(data),
        };
        self.next_id += 1;
        self.entries.push_front(entry);
        self.revision += 1;
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.revision += 1;
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::GuessResult;

    fn guess(school: &str, result: GuessResult) -> GuessComparison {
        GuessComparison {
            result: Some(result),
            guessed_school: Some(school.to_string()),
            ..GuessComparison::default()
        }
    }

    #[test]
    fn invalid_result_is_not_recorded() {
        let mut feed = HistoryFeed::new();
        feed.append(&guess("Georgia", GuessResult::Incorrect));
        let revision = feed.revision();

        assert!(!feed.append(&guess("Nowhere Tech", GuessResult::Invalid)));
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.revision(), revision);
    }

    #[test]
    fn entries_are_newest_first() {
        let mut feed = HistoryFeed::new();
        for school in ["Alabama", "Georgia", "Texas"] {
            assert!(feed.append(&guess(school, GuessResult::Incorrect)));
        }

        let names: Vec<&str> = feed
            .entries()
            .map(|entry| entry.block.school.name.as_str())
            .collect();
        assert_eq!(names, vec!["Texas", "Georgia", "Alabama"]);
        assert_eq!(feed.revision(), 3);
    }

    #[test]
    fn ids_stay_unique_across_clear() {
        let mut feed = HistoryFeed::new();
        feed.append(&guess("Alabama", GuessResult::Incorrect));
        feed.clear();
        feed.append(&guess("Georgia", GuessResult::Incorrect));

        let ids: Vec<u64> = feed.entries().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn clear_empties_feed() {
        let mut feed = HistoryFeed::new();
        feed.append(&guess("Alabama", GuessResult::Incorrect));
        feed.append(&guess("USC", GuessResult::Correct));
        feed.clear();

        assert!(feed.is_empty());
        assert_eq!(feed.revision(), 3);
    }
}
