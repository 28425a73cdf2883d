//! Category prediction from note similarity

use crate::store::TransactionStore;

/// Notes shorter than this are too ambiguous to match on
const MIN_NOTE_CHARS: usize = 3;

pub struct CategoryPredictor<'a> {
    store: &'a dyn TransactionStore,
}

impl<'a> CategoryPredictor<'a> {
    pub fn new(store: &'a dyn TransactionStore) -> Self {
        Self { store }
    }

    /// Most likely category for `note`, judged by past notes
    ///
    /// A past transaction votes for its category when its note contains the
    /// input or is contained by it (case-insensitive). The category with the
    /// most votes wins; on a tie, the one that matched first.
    pub fn predict(&self, note: &str) -> Option<String> {
        if note.chars().count() < MIN_NOTE_CHARS {
            return None;
        }
        let target = note.trim().to_lowercase();
        if target.is_empty() {
            return None;
        }

        let mut votes: Vec<(&str, usize)> = Vec::new();
        for t in self.store.transactions() {
            let Some(past) = t.note.as_deref() else {
                continue;
            };
            let past = past.trim().to_lowercase();
            // An empty note would be contained by every input
            if past.is_empty() {
                continue;
            }
            if past.contains(&target) || target.contains(&past) {
                match votes.iter_mut().find(|(c, _)| *c == t.category) {
                    Some((_, count)) => *count += 1,
                    None => votes.push((t.category.as_str(), 1)),
                }
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for (category, count) in votes {
            if best.map_or(true, |(_, max)| count > max) {
                best = Some((category, count));
            }
        }

        let (category, count) = best?;
        tracing::debug!(category, votes = count, "Predicted category from notes");
        Some(category.to_string())
    }
}
