// src/generators/history.rs
use std::collections::{BTreeMap, VecDeque};

use crate::models::{HistoryEntry, PasswordStats};
use super::strength::calculate_entropy;

/// Most-recent-first record of generated passwords, bounded in size.
#[derive(Debug)]
pub struct GenerationHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl GenerationHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Adds `entry` at the front and evicts the oldest beyond capacity.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        self.entries.iter().take(limit).cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> PasswordStats {
        if self.entries.is_empty() {
            return PasswordStats::default();
        }

        let total = self.entries.len();
        let strength_sum: f64 = self.entries.iter().map(|e| f64::from(e.strength)).sum();
        let entropy_sum: f64 = self.entries.iter().map(|e| calculate_entropy(&e.password)).sum();

        let mut strongest = &self.entries[0];
        let mut weakest = &self.entries[0];
        for entry in self.entries.iter().skip(1) {
            if entry.strength > strongest.strength {
                strongest = entry;
            }
            if entry.strength < weakest.strength {
                weakest = entry;
            }
        }

        PasswordStats {
            total_generated: total,
            average_strength: strength_sum / total as f64,
            average_entropy: entropy_sum / total as f64,
            most_common_length: self.most_common_length(),
            strongest_password: Some(strongest.clone()),
            weakest_password: Some(weakest.clone()),
        }
    }

    // Lengths are visited in ascending order; on a tie the longer one wins.
    fn most_common_length(&self) -> usize {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.password.chars().count()).or_insert(0) += 1;
        }

        let mut best: Option<(usize, usize)> = None;
        for (length, count) in counts {
            match best {
                Some((_, best_count)) if best_count > count => {}
                _ => best = Some((length, count)),
            }
        }
        best.map(|(length, _)| length).unwrap_or(0)
    }
}
