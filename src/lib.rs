//! USFM markup engine with a guarded save path.
//!
//! Splits USFM documents into books and chapters, locates and extracts
//! verses, and refuses saves that would shrink or rewrite the stored text
//! more than a user allows.
//!
//! # Example
//!
//! ```no_run
//! use usfm_guard::prelude::*;
//! use std::path::Path;
//!
//! let bible = SqliteBible::open(Path::new("bible.db")).unwrap();
//! let usfm = std::fs::read_to_string("40MAT.usfm").unwrap();
//!
//! // Split the book into chapters and store them
//! let styles = StandardStylesheet::new();
//! let chapters = usfm_import(&usfm, DEFAULT_STYLESHEET, &styles, &StandardBooks);
//! bible.store_import("kjv", &chapters).unwrap();
//!
//! // Save one edited verse through the safety gate
//! let ctx = SafetyContext::from_backend(&bible, "editor");
//! let verdict = safely_store_verse(&ctx, "kjv", 40, 1, 1, "\\v 1 The book...", false).unwrap();
//! if let Some(rejection) = verdict.rejection() {
//!     println!("{}: {}", rejection.diagnostic(), rejection.explanation);
//! }
//! ```

pub mod attributes;
pub mod books;
pub mod db;
pub mod diff;
pub mod extract;
pub mod import;
pub mod models;
pub mod output;
pub mod safety;
pub mod styles;
pub mod tokenize;
pub mod verses;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::attributes::{
        extract_fig, extract_figs, extract_word_level_attributes, parse_attributes,
        remove_word_level_attributes,
    };
    pub use crate::books::{Book, BookLookup, StandardBooks};
    pub use crate::db::{ChangeEntry, DbError, SqliteBible};
    pub use crate::diff::{edit_script_similarity, DiffSimilarity, Similarity};
    pub use crate::extract::{
        get_chapter_text, get_verse_range_text, get_verse_text, get_verse_text_quill,
        locate_fragment,
    };
    pub use crate::import::usfm_import;
    pub use crate::models::{
        BookChapterData, Figure, ImportResult, ImportSummary, ImportedFile, NumberReport,
        Rejection, RejectionKind, SafetyParams, StoreReport, Verdict, WordAttributes,
    };
    pub use crate::output::{
        format_chapter, format_verdict, print_chapters, print_store_report, print_summary,
        write_csv, write_csv_file, write_json, write_json_file, OutputError,
    };
    pub use crate::safety::{
        prepare_audit_entry, safely_store_chapter, safely_store_verse, save_is_safe, AuditLog,
        ChangeLog, ChangeRecord, ChapterStore, FixedSettings, NoTranslation, SafetyContext,
        Translator, UserSettings,
    };
    pub use crate::styles::{
        starts_new_line_in_usfm, StandardStylesheet, StyleLookup, StyleType, DEFAULT_STYLESHEET,
    };
    pub use crate::tokenize::{
        get_marker, get_markers_and_text, is_embedded_marker, is_opening_marker, is_usfm_marker,
        one_string, trim_usfm,
    };
    pub use crate::verses::{
        contains_empty_verses, get_chapter_numbers, get_verse_numbers, linenumber_to_versenumber,
        offset_to_versenumber, versenumber_to_offset,
    };
}

// Re-export commonly used types at the crate root
pub use models::{BookChapterData, Rejection, RejectionKind, SafetyParams, Verdict};
