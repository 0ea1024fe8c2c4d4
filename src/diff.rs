//! Text similarity for the safety gate.
//!
//! Similarity is the share of unchanged elements in the shortest edit
//! script turning the old text into the new one:
//! `equal / (equal + deleted + inserted)`, as a rounded percentage.

use similar::{capture_diff_slices, Algorithm, ChangeTag, DiffTag, TextDiff};
use std::hash::Hash;

/// Percentage similarity between two texts, 0 to 100.
pub trait Similarity: Send + Sync {
    /// Similarity over whitespace separated words.
    fn word_similarity(&self, old: &str, new: &str) -> u32;

    /// Similarity over Unicode characters.
    fn character_similarity(&self, old: &str, new: &str) -> u32;
}

/// Similarity from a Myers diff.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffSimilarity;

impl Similarity for DiffSimilarity {
    fn word_similarity(&self, old: &str, new: &str) -> u32 {
        let old: Vec<&str> = old.split_whitespace().collect();
        let new: Vec<&str> = new.split_whitespace().collect();
        edit_script_similarity(&old, &new)
    }

    fn character_similarity(&self, old: &str, new: &str) -> u32 {
        let diff = TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .diff_chars(old, new);

        let mut equal = 0;
        let mut changed = 0;
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Equal => equal += 1,
                ChangeTag::Delete | ChangeTag::Insert => changed += 1,
            }
        }
        percentage(equal, changed)
    }
}

/// Percentage of unchanged elements in the edit script between two
/// sequences. Two empty sequences are identical.
pub fn edit_script_similarity<T: Eq + Hash + Ord>(old: &[T], new: &[T]) -> u32 {
    let mut equal = 0;
    let mut changed = 0;
    for op in capture_diff_slices(Algorithm::Myers, old, new) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => equal += old_range.len(),
            DiffTag::Delete => changed += old_range.len(),
            DiffTag::Insert => changed += new_range.len(),
            DiffTag::Replace => changed += old_range.len() + new_range.len(),
        }
    }
    percentage(equal, changed)
}

fn percentage(equal: usize, changed: usize) -> u32 {
    let total = equal + changed;
    if total == 0 {
        return 100;
    }
    (100.0 * equal as f64 / total as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_script_similarity() {
        let a: Vec<char> = "ABCBDAB".chars().collect();
        let b: Vec<char> = "BDCABA".chars().collect();
        // 4 equal, 3 deleted, 2 inserted
        assert_eq!(edit_script_similarity(&a, &b), 44);
        assert_eq!(edit_script_similarity::<char>(&[], &b), 0);
        assert_eq!(edit_script_similarity(&a, &a), 100);
        assert_eq!(edit_script_similarity::<char>(&[], &[]), 100);
    }

    #[test]
    fn test_identical_texts() {
        let sim = DiffSimilarity;
        assert_eq!(sim.character_similarity("Verse one.", "Verse one."), 100);
        assert_eq!(sim.word_similarity("Verse one.", "Verse one."), 100);
        assert_eq!(sim.character_similarity("", ""), 100);
        assert_eq!(sim.word_similarity("", ""), 100);
    }

    #[test]
    fn test_completely_different() {
        let sim = DiffSimilarity;
        assert_eq!(sim.character_similarity("abc", "xyz"), 0);
        assert_eq!(sim.character_similarity("", "xyz"), 0);
        assert_eq!(sim.word_similarity("one two", "three four"), 0);
    }

    #[test]
    fn test_character_similarity() {
        let sim = DiffSimilarity;
        // 4 common, 1 deleted, 1 inserted
        assert_eq!(sim.character_similarity("abcde", "abcdf"), 67);
        // 3 common, 1 inserted
        assert_eq!(sim.character_similarity("abc", "abxc"), 75);
    }

    #[test]
    fn test_word_similarity() {
        let sim = DiffSimilarity;
        // 3 common, 1 deleted, 1 inserted
        assert_eq!(sim.word_similarity("The quick brown fox", "The quick red fox"), 60);
        // New lines separate words too
        assert_eq!(sim.word_similarity("\\p\n\\v 1 One", "\\p \\v 1 One"), 100);
    }

    #[test]
    fn test_character_similarity_counts_characters() {
        let sim = DiffSimilarity;
        // One character of two differs, whatever its byte length
        assert_eq!(sim.character_similarity("aé", "aè"), 33);
    }
}
