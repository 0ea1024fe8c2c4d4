//! Data structures shared by the importer, the safety gate and the CLI.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::verses::contains_empty_verses;

/// One chapter of USFM produced by the importer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookChapterData {
    pub book: u32,
    pub chapter: u32,
    pub data: String,
}

impl BookChapterData {
    pub fn new(book: u32, chapter: u32, data: impl Into<String>) -> Self {
        Self {
            book,
            chapter,
            data: data.into(),
        }
    }
}

/// Why the safety gate refused a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    LengthDiffers,
    ContentDiffers,
    MissingVerseNumber,
    VerseMismatch,
    CannotOverwriteVerse,
    UnknownLocation,
}

impl RejectionKind {
    /// The short diagnostic, before translation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionKind::LengthDiffers => "Text length differs too much",
            RejectionKind::ContentDiffers => "Text content differs too much",
            RejectionKind::MissingVerseNumber => "Missing verse number",
            RejectionKind::VerseMismatch => "Verse mismatch",
            RejectionKind::CannotOverwriteVerse => "Cannot overwrite another verse",
            RejectionKind::UnknownLocation => "Doesn't know where to save",
        }
    }
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A refused save: the translated short diagnostic and a longer explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub kind: RejectionKind,
    pub diagnostic: String,
    pub explanation: String,
}

impl Rejection {
    pub fn diagnostic(&self) -> &str {
        &self.diagnostic
    }
}

/// Outcome of a guarded save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// The new text was written.
    Saved,
    /// The new text equals what is stored, nothing was written.
    Unchanged,
    Rejected(Rejection),
}

impl Verdict {
    /// The short diagnostic, empty unless the save was rejected.
    pub fn diagnostic(&self) -> &str {
        match self {
            Verdict::Rejected(rejection) => rejection.diagnostic(),
            _ => "",
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Verdict::Rejected(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Verdict::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

/// Thresholds for the safety gate.
///
/// The allowed differences are percentages. Texts shorter than the short
/// lengths (in characters) may change freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyParams {
    pub allowed_difference_chapter: u32,
    pub allowed_difference_verse: u32,
    pub short_chapter_length: usize,
    pub short_verse_length: usize,
}

impl Default for SafetyParams {
    fn default() -> Self {
        Self {
            allowed_difference_chapter: 20,
            allowed_difference_verse: 75,
            short_chapter_length: 50,
            short_verse_length: 10,
        }
    }
}

/// A figure taken out of USFM.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Figure {
    pub caption: String,
    pub alt: String,
    pub src: String,
    pub size: String,
    pub loc: String,
    pub copy: String,
    #[serde(rename = "ref")]
    pub reference: String,
}

/// The attributes of one word-level span, like `\w gracious|lemma="grace"\w*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordAttributes {
    pub marker: String,
    pub text: String,
    pub attributes: Vec<(String, String)>,
}

impl WordAttributes {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Chapters imported from one input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportedFile {
    pub path: String,
    pub chapters: Vec<BookChapterData>,
}

/// Totals over an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub file_count: usize,
    pub book_count: usize,
    pub chapter_count: usize,
    /// Chapters whose book code did not resolve.
    pub unknown_book_chapters: usize,
    /// Chapters with one or more verses that have no text.
    pub chapters_with_empty_verses: usize,
}

impl ImportSummary {
    /// Count books and chapters over imported files. Unknown books (id 0)
    /// are not counted as books.
    pub fn from_files(files: &[ImportedFile]) -> Self {
        let chapters = || files.iter().flat_map(|file| file.chapters.iter());
        let books: HashSet<u32> = chapters()
            .map(|data| data.book)
            .filter(|&book| book != 0)
            .collect();
        Self {
            file_count: files.len(),
            book_count: books.len(),
            chapter_count: chapters().count(),
            unknown_book_chapters: chapters().filter(|data| data.book == 0).count(),
            chapters_with_empty_verses: chapters()
                .filter(|data| contains_empty_verses(&data.data))
                .count(),
        }
    }
}

/// Full import result as written to JSON.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResult {
    pub version: String,
    pub stylesheet: String,
    pub summary: ImportSummary,
    pub files: Vec<ImportedFile>,
}

/// Verse and chapter numbers found in a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumberReport {
    pub chapters: Vec<u32>,
    pub verses: Vec<u32>,
}

/// Result of a guarded store, as printed by the CLI.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoreReport {
    pub bible: String,
    pub book: u32,
    pub chapter: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verse: Option<u32>,
    #[serde(flatten)]
    pub verdict: Verdict,
}
