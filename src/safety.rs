//! Guarded saving of chapters and verses.
//!
//! Editors send back whole chapters or single verses. Before a save
//! reaches storage it has to pass two heuristics: the length must not
//! shrink by more than the allowed percentage, and the content must stay
//! similar enough. This catches corrupted editor state, lost sessions and
//! truncated uploads before they overwrite good text.
//!
//! Verse saves are checked further: the fragment must carry the verse it
//! claims, and its verse numbers must match those of the fragment it
//! replaces, so a stale editor cannot overwrite a verse that was split or
//! joined in the meantime.

use log::{debug, info, warn};

use crate::db::DbError;
use crate::diff::{DiffSimilarity, Similarity};
use crate::extract::{get_verse_text, get_verse_text_quill, locate_fragment};
use crate::models::{Rejection, RejectionKind, SafetyParams, Verdict};
use crate::tokenize::trim_usfm;
use crate::verses::get_verse_numbers;

/// Audit entries longer than this many bytes are cut.
pub const MAX_AUDIT_ENTRY: usize = 50_000;

const NOT_SAVED: &str = "The text was not saved for safety reasons.";
const REMEDY: &str = "Make smaller changes and save more often. Or relax the restriction in the editing settings. See menu Settings - Preferences.";

/// Read and write access to stored chapters.
pub trait ChapterStore {
    /// The stored chapter, or an empty string when there is none.
    fn get_chapter(&self, bible: &str, book: u32, chapter: u32) -> Result<String, DbError>;

    fn store_chapter(&self, bible: &str, book: u32, chapter: u32, usfm: &str) -> Result<(), DbError>;
}

/// One accepted change to a chapter.
#[derive(Debug, Clone, Copy)]
pub struct ChangeRecord<'a> {
    pub bible: &'a str,
    pub book: u32,
    pub chapter: u32,
    pub user: &'a str,
    pub old_usfm: &'a str,
    pub new_usfm: &'a str,
    pub summary: &'a str,
}

/// Journal of accepted changes.
pub trait ChangeLog {
    fn log_change(&self, change: &ChangeRecord<'_>) -> Result<(), DbError>;
}

/// Journal of rejected saves and other events worth a look.
pub trait AuditLog {
    fn log(&self, entry: &str) -> Result<(), DbError>;
}

/// Per-user editing thresholds.
pub trait UserSettings {
    fn safety_params(&self, user: &str) -> Result<SafetyParams, DbError>;
}

/// Localization of the short diagnostics and change summaries.
pub trait Translator {
    fn translate(&self, text: &str) -> String;
}

/// Returns text untranslated.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslation;

impl Translator for NoTranslation {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// The same thresholds for every user.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSettings(pub SafetyParams);

impl UserSettings for FixedSettings {
    fn safety_params(&self, _user: &str) -> Result<SafetyParams, DbError> {
        Ok(self.0)
    }
}

/// Everything the gate talks to, for one user.
#[derive(Clone, Copy)]
pub struct SafetyContext<'a> {
    pub store: &'a dyn ChapterStore,
    pub changes: &'a dyn ChangeLog,
    pub audit: &'a dyn AuditLog,
    pub settings: &'a dyn UserSettings,
    pub translator: &'a dyn Translator,
    pub similarity: &'a dyn Similarity,
    pub user: &'a str,
}

impl<'a> SafetyContext<'a> {
    /// A context without translation, using the Myers diff similarity.
    pub fn new(
        store: &'a dyn ChapterStore,
        changes: &'a dyn ChangeLog,
        audit: &'a dyn AuditLog,
        settings: &'a dyn UserSettings,
        user: &'a str,
    ) -> Self {
        Self {
            store,
            changes,
            audit,
            settings,
            translator: &NoTranslation,
            similarity: &DiffSimilarity,
            user,
        }
    }

    /// A context where one object provides storage, both logs and the settings.
    pub fn from_backend<B>(backend: &'a B, user: &'a str) -> Self
    where
        B: ChapterStore + ChangeLog + AuditLog + UserSettings,
    {
        Self::new(backend, backend, backend, backend, user)
    }

    pub fn with_translator(mut self, translator: &'a dyn Translator) -> Self {
        self.translator = translator;
        self
    }

    pub fn with_similarity(mut self, similarity: &'a dyn Similarity) -> Self {
        self.similarity = similarity;
        self
    }

    fn reject(&self, kind: RejectionKind, explanation: String) -> Rejection {
        warn!("{}: {}", kind, explanation);
        Rejection {
            kind,
            diagnostic: self.translator.translate(kind.as_str()),
            explanation,
        }
    }

    fn audit(&self, entry: &str) -> Result<(), DbError> {
        match prepare_audit_entry(entry) {
            Some(entry) => self.audit.log(&entry),
            None => Ok(()),
        }
    }
}

/// Trim an audit entry and cut it down to [`MAX_AUDIT_ENTRY`] bytes.
/// Empty entries are dropped.
pub fn prepare_audit_entry(entry: &str) -> Option<String> {
    let entry = trim_usfm(entry);
    if entry.is_empty() {
        return None;
    }
    if entry.len() <= MAX_AUDIT_ENTRY {
        return Some(entry.to_string());
    }
    let mut cut = MAX_AUDIT_ENTRY;
    while !entry.is_char_boundary(cut) {
        cut -= 1;
    }
    Some(format!("{}... This entry was too large and has been truncated", &entry[..cut]))
}

/// Check whether replacing `old` with `new` is safe.
///
/// Returns `None` when it is. A rejection is written to the audit log
/// together with the refused text.
pub fn save_is_safe(
    ctx: &SafetyContext<'_>,
    old: &str,
    new: &str,
    chapter: bool,
) -> Result<Option<Rejection>, DbError> {
    if old == new {
        return Ok(None);
    }

    let params = ctx.settings.safety_params(ctx.user)?;
    let old_length = old.chars().count();
    let new_length = new.chars().count();

    let mut allowed = if chapter {
        params.allowed_difference_chapter
    } else {
        params.allowed_difference_verse
    };
    let short_length = if chapter {
        params.short_chapter_length
    } else {
        params.short_verse_length
    };
    // Filling in an empty text, or adding to it, is always fine.
    if old_length < short_length || new_length > old_length {
        allowed = 100;
    }

    let percentage = length_difference(old_length, new_length);
    if percentage > allowed {
        let explanation = format!(
            "{} The length differs {}% from the existing text. {}",
            NOT_SAVED, percentage, REMEDY
        );
        ctx.audit(&format!("{}\n{}", explanation, new))?;
        return Ok(Some(ctx.reject(RejectionKind::LengthDiffers, explanation)));
    }

    // Words for chapters, for speed. Characters for verses, for accuracy.
    let similarity = if chapter {
        ctx.similarity.word_similarity(old, new)
    } else {
        ctx.similarity.character_similarity(old, new)
    };
    if similarity < 100 - allowed.min(100) {
        let explanation = format!(
            "{} The new text is {}% similar to the existing text. {}",
            NOT_SAVED, similarity, REMEDY
        );
        ctx.audit(&format!("{}\n{}", explanation, new))?;
        return Ok(Some(ctx.reject(RejectionKind::ContentDiffers, explanation)));
    }

    Ok(None)
}

/// Absolute length change as a percentage of the old length, at most 100.
fn length_difference(old_length: usize, new_length: usize) -> u32 {
    if old_length == 0 {
        return if new_length == 0 { 0 } else { 100 };
    }
    let delta = (new_length as i64 - old_length as i64).unsigned_abs();
    (100 * delta / old_length as u64).min(100) as u32
}

/// Store a whole chapter if it passes the safety checks.
pub fn safely_store_chapter(
    ctx: &SafetyContext<'_>,
    bible: &str,
    book: u32,
    chapter: u32,
    usfm: &str,
) -> Result<Verdict, DbError> {
    let existing = ctx.store.get_chapter(bible, book, chapter)?;
    if usfm == existing {
        debug!("{} {} {} unchanged", bible, book, chapter);
        return Ok(Verdict::Unchanged);
    }

    if let Some(rejection) = save_is_safe(ctx, &existing, usfm, true)? {
        return Ok(Verdict::Rejected(rejection));
    }

    let summary = ctx.translator.translate("Saving chapter");
    ctx.changes.log_change(&ChangeRecord {
        bible,
        book,
        chapter,
        user: ctx.user,
        old_usfm: &existing,
        new_usfm: usfm,
        summary: &summary,
    })?;
    ctx.store.store_chapter(bible, book, chapter, usfm)?;
    info!("Saved {} {} {} for {}", bible, book, chapter, ctx.user);
    Ok(Verdict::Saved)
}

/// Store the USFM of one verse into its chapter if it passes the safety checks.
///
/// With `quill` set the existing fragment is taken the way the visual verse
/// editor sees it, including the paragraph the verse starts in.
pub fn safely_store_verse(
    ctx: &SafetyContext<'_>,
    bible: &str,
    book: u32,
    chapter: u32,
    verse: u32,
    usfm: &str,
    quill: bool,
) -> Result<Verdict, DbError> {
    let usfm = trim_usfm(usfm);

    // The fragment should be for the verse it is saved to.
    let mut save_verses = get_verse_numbers(usfm);
    if verse != 0 {
        save_verses.remove(0);
    }
    if save_verses.is_empty() {
        let explanation = "The USFM contains no verse information".to_string();
        ctx.audit(&format!("{}: {}", explanation, usfm))?;
        return Ok(Verdict::Rejected(
            ctx.reject(RejectionKind::MissingVerseNumber, explanation),
        ));
    }
    if !save_verses.contains(&verse) {
        let explanation = format!(
            "The USFM contains verse(s) {} while it wants to save to verse {}",
            join_numbers(&save_verses),
            verse
        );
        ctx.audit(&format!("{}: {}", explanation, usfm))?;
        return Ok(Verdict::Rejected(
            ctx.reject(RejectionKind::VerseMismatch, explanation),
        ));
    }

    let chapter_usfm = ctx.store.get_chapter(bible, book, chapter)?;
    let existing_verse_usfm = if quill {
        get_verse_text_quill(&chapter_usfm, verse)
    } else {
        get_verse_text(&chapter_usfm, verse)
    };
    let existing_verse_usfm = trim_usfm(&existing_verse_usfm);

    // The verse boundaries may have moved since the editor loaded the text.
    let existing_verses = get_verse_numbers(existing_verse_usfm);
    let save_verses = get_verse_numbers(usfm);
    if existing_verses != save_verses {
        let explanation = format!(
            "The USFM contains verse(s) {} which would overwrite a fragment that contains verse(s) {}",
            join_numbers(&save_verses),
            join_numbers(&existing_verses)
        );
        ctx.audit(&format!("{}: {}", explanation, usfm))?;
        return Ok(Verdict::Rejected(
            ctx.reject(RejectionKind::CannotOverwriteVerse, explanation),
        ));
    }

    if usfm == existing_verse_usfm {
        debug!("{} {} {}:{} unchanged", bible, book, chapter, verse);
        return Ok(Verdict::Unchanged);
    }

    if let Some(rejection) = save_is_safe(ctx, existing_verse_usfm, usfm, false)? {
        return Ok(Verdict::Rejected(rejection));
    }

    let Some(pos) = locate_fragment(&chapter_usfm, existing_verse_usfm, verse) else {
        let explanation =
            "Cannot find the exact location in the chapter where to save this USFM fragment"
                .to_string();
        ctx.audit(&format!("{}: {}", explanation, usfm))?;
        return Ok(Verdict::Rejected(
            ctx.reject(RejectionKind::UnknownLocation, explanation),
        ));
    };
    let mut new_chapter_usfm = String::with_capacity(chapter_usfm.len() + usfm.len());
    new_chapter_usfm.push_str(&chapter_usfm[..pos]);
    new_chapter_usfm.push_str(usfm);
    new_chapter_usfm.push_str(&chapter_usfm[pos + existing_verse_usfm.len()..]);

    let summary = ctx.translator.translate("Saving verse");
    ctx.changes.log_change(&ChangeRecord {
        bible,
        book,
        chapter,
        user: ctx.user,
        old_usfm: &chapter_usfm,
        new_usfm: &new_chapter_usfm,
        summary: &summary,
    })?;
    ctx.store.store_chapter(bible, book, chapter, &new_chapter_usfm)?;
    info!("Saved {} {} {}:{} for {}", bible, book, chapter, verse, ctx.user);
    Ok(Verdict::Saved)
}

fn join_numbers(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryBible {
        chapters: RefCell<HashMap<(String, u32, u32), String>>,
        changes: RefCell<Vec<String>>,
        audit: RefCell<Vec<String>>,
        params: SafetyParams,
    }

    impl MemoryBible {
        fn with_chapter(usfm: &str) -> Self {
            let bible = Self::default();
            bible
                .chapters
                .borrow_mut()
                .insert(("b".to_string(), 1, 1), usfm.to_string());
            bible
        }

        fn chapter(&self) -> String {
            self.get_chapter("b", 1, 1).unwrap()
        }
    }

    impl ChapterStore for MemoryBible {
        fn get_chapter(&self, bible: &str, book: u32, chapter: u32) -> Result<String, DbError> {
            let key = (bible.to_string(), book, chapter);
            Ok(self.chapters.borrow().get(&key).cloned().unwrap_or_default())
        }

        fn store_chapter(&self, bible: &str, book: u32, chapter: u32, usfm: &str) -> Result<(), DbError> {
            let key = (bible.to_string(), book, chapter);
            self.chapters.borrow_mut().insert(key, usfm.to_string());
            Ok(())
        }
    }

    impl ChangeLog for MemoryBible {
        fn log_change(&self, change: &ChangeRecord<'_>) -> Result<(), DbError> {
            self.changes.borrow_mut().push(change.summary.to_string());
            Ok(())
        }
    }

    impl AuditLog for MemoryBible {
        fn log(&self, entry: &str) -> Result<(), DbError> {
            self.audit.borrow_mut().push(entry.to_string());
            Ok(())
        }
    }

    impl UserSettings for MemoryBible {
        fn safety_params(&self, _user: &str) -> Result<SafetyParams, DbError> {
            Ok(self.params)
        }
    }

    struct Shouting;

    impl Translator for Shouting {
        fn translate(&self, text: &str) -> String {
            text.to_uppercase()
        }
    }

    const CHAPTER: &str = "\\c 1\n\\p\n\\v 1 Verse one one one one.\n\\v 2 Verse two two two two two two.";

    #[test]
    fn test_save_is_safe_equal() {
        let bible = MemoryBible::default();
        let ctx = SafetyContext::from_backend(&bible, "user");
        assert_eq!(save_is_safe(&ctx, "same", "same", true).unwrap(), None);
        assert_eq!(save_is_safe(&ctx, "", "", false).unwrap(), None);
    }

    #[test]
    fn test_save_is_safe_short_old_text() {
        let bible = MemoryBible::default();
        let ctx = SafetyContext::from_backend(&bible, "user");
        // Under 10 characters any verse change goes
        assert_eq!(save_is_safe(&ctx, "\\v 1", "x", false).unwrap(), None);
        // Under 50 characters any chapter change goes
        assert_eq!(save_is_safe(&ctx, "\\c 1\n\\p", "something else", true).unwrap(), None);
    }

    #[test]
    fn test_save_is_safe_growth_is_allowed() {
        let bible = MemoryBible::default();
        let ctx = SafetyContext::from_backend(&bible, "user");
        let old = "\\v 1 The old text of this verse.";
        let new = "\\v 1 Something completely different and a lot longer than before.";
        assert_eq!(save_is_safe(&ctx, old, new, false).unwrap(), None);
    }

    #[test]
    fn test_save_is_safe_length_rejection() {
        let bible = MemoryBible::default();
        let ctx = SafetyContext::from_backend(&bible, "user");
        let old = "\\v 2 Verse two two two two two two.";
        let rejection = save_is_safe(&ctx, old, "\\v 2 two", false).unwrap().unwrap();
        assert_eq!(rejection.kind, RejectionKind::LengthDiffers);
        assert_eq!(rejection.diagnostic(), "Text length differs too much");
        assert!(rejection.explanation.contains("The length differs 77%"));
        let audit = bible.audit.borrow();
        assert_eq!(audit.len(), 1);
        assert!(audit[0].ends_with("\n\\v 2 two"));
    }

    #[test]
    fn test_save_is_safe_content_rejection() {
        let mut bible = MemoryBible::default();
        bible.params.allowed_difference_verse = 20;
        let ctx = SafetyContext::from_backend(&bible, "user");
        let old = "\\v 1 abcdefghijklmnopqrst";
        let new = "\\v 1 uvwxyzABCDEFGHIJKLMN";
        let rejection = save_is_safe(&ctx, old, new, false).unwrap().unwrap();
        assert_eq!(rejection.kind, RejectionKind::ContentDiffers);
        assert!(rejection.explanation.contains("% similar to the existing text"));
    }

    #[test]
    fn test_length_difference() {
        assert_eq!(length_difference(100, 100), 0);
        assert_eq!(length_difference(100, 80), 20);
        assert_eq!(length_difference(100, 300), 100);
        assert_eq!(length_difference(0, 5), 100);
        assert_eq!(length_difference(3, 2), 33);
    }

    #[test]
    fn test_store_chapter_saved_and_unchanged() {
        let bible = MemoryBible::with_chapter(CHAPTER);
        let ctx = SafetyContext::from_backend(&bible, "user");
        let edited = CHAPTER.replace("one one one one", "one one one uno");
        assert_eq!(safely_store_chapter(&ctx, "b", 1, 1, &edited).unwrap(), Verdict::Saved);
        assert_eq!(bible.chapter(), edited);
        assert_eq!(safely_store_chapter(&ctx, "b", 1, 1, &edited).unwrap(), Verdict::Unchanged);
        assert_eq!(*bible.changes.borrow(), vec!["Saving chapter".to_string()]);
    }

    #[test]
    fn test_store_chapter_rejected() {
        let bible = MemoryBible::with_chapter(CHAPTER);
        let ctx = SafetyContext::from_backend(&bible, "user");
        let verdict = safely_store_chapter(&ctx, "b", 1, 1, "\\c 1").unwrap();
        assert_eq!(verdict.diagnostic(), "Text length differs too much");
        assert_eq!(bible.chapter(), CHAPTER);
        assert!(bible.changes.borrow().is_empty());
    }

    #[test]
    fn test_store_verse_saved() {
        let bible = MemoryBible::with_chapter(CHAPTER);
        let ctx = SafetyContext::from_backend(&bible, "user");
        let verdict =
            safely_store_verse(&ctx, "b", 1, 1, 2, "\\v 2 Verse two two two two two three.", false)
                .unwrap();
        assert_eq!(verdict, Verdict::Saved);
        assert_eq!(
            bible.chapter(),
            "\\c 1\n\\p\n\\v 1 Verse one one one one.\n\\v 2 Verse two two two two two three."
        );
        assert_eq!(*bible.changes.borrow(), vec!["Saving verse".to_string()]);
    }

    #[test]
    fn test_store_verse_unchanged() {
        let bible = MemoryBible::with_chapter(CHAPTER);
        let ctx = SafetyContext::from_backend(&bible, "user");
        let verdict =
            safely_store_verse(&ctx, "b", 1, 1, 1, "\\v 1 Verse one one one one.\n", false).unwrap();
        assert_eq!(verdict, Verdict::Unchanged);
        assert!(bible.changes.borrow().is_empty());
    }

    #[test]
    fn test_store_verse_missing_number() {
        let bible = MemoryBible::with_chapter(CHAPTER);
        let ctx = SafetyContext::from_backend(&bible, "user");
        let verdict = safely_store_verse(&ctx, "b", 1, 1, 1, "No verse here", false).unwrap();
        assert_eq!(verdict.diagnostic(), "Missing verse number");
        let audit = bible.audit.borrow();
        assert_eq!(audit[0], "The USFM contains no verse information: No verse here");
    }

    #[test]
    fn test_store_verse_mismatch() {
        let bible = MemoryBible::with_chapter(CHAPTER);
        let ctx = SafetyContext::from_backend(&bible, "user");
        let verdict = safely_store_verse(&ctx, "b", 1, 1, 1, "\\v 3 Three", false).unwrap();
        let rejection = verdict.rejection().unwrap();
        assert_eq!(rejection.kind, RejectionKind::VerseMismatch);
        assert_eq!(
            rejection.explanation,
            "The USFM contains verse(s) 3 while it wants to save to verse 1"
        );
        assert_eq!(bible.chapter(), CHAPTER);
    }

    #[test]
    fn test_store_verse_cannot_overwrite() {
        let bible = MemoryBible::with_chapter(CHAPTER);
        let ctx = SafetyContext::from_backend(&bible, "user");
        let verdict =
            safely_store_verse(&ctx, "b", 1, 1, 2, "\\v 2-3 Verse two and three.", false).unwrap();
        let rejection = verdict.rejection().unwrap();
        assert_eq!(rejection.kind, RejectionKind::CannotOverwriteVerse);
        assert_eq!(
            rejection.explanation,
            "The USFM contains verse(s) 0 2 3 which would overwrite a fragment that contains verse(s) 0 2"
        );
    }

    #[test]
    fn test_store_verse_quill() {
        let chapter = "\\c 1\n\\s Heading\n\\p\n\\v 1 Verse one one one one.\n\\p\n\\v 2 Two two two two.";
        let bible = MemoryBible::with_chapter(chapter);
        let ctx = SafetyContext::from_backend(&bible, "user");
        let verdict =
            safely_store_verse(&ctx, "b", 1, 1, 2, "\\p\n\\v 2 Two two two too.", true).unwrap();
        assert_eq!(verdict, Verdict::Saved);
        assert_eq!(
            bible.chapter(),
            "\\c 1\n\\s Heading\n\\p\n\\v 1 Verse one one one one.\n\\p\n\\v 2 Two two two too."
        );
    }

    #[test]
    fn test_store_verse_zero() {
        let chapter = "\\c 1\n\\s Heading text\n\\p\n\\v 1 One.";
        let bible = MemoryBible::with_chapter(chapter);
        let ctx = SafetyContext::from_backend(&bible, "user");
        let verdict =
            safely_store_verse(&ctx, "b", 1, 1, 0, "\\c 1\n\\s Heading test", true).unwrap();
        assert_eq!(verdict, Verdict::Saved);
        assert_eq!(bible.chapter(), "\\c 1\n\\s Heading test\n\\p\n\\v 1 One.");
    }

    #[test]
    fn test_store_verse_on_indented_line() {
        let chapter = "\\c 1\n\\p\n  \\v 1 Verse one one one one.\n\\v 2 Verse two.";
        let bible = MemoryBible::with_chapter(chapter);
        let ctx = SafetyContext::from_backend(&bible, "user");
        let verdict =
            safely_store_verse(&ctx, "b", 1, 1, 1, "\\v 1 Verse one one one uno.", false).unwrap();
        assert_eq!(verdict, Verdict::Saved);
        assert_eq!(
            bible.chapter(),
            "\\c 1\n\\p\n  \\v 1 Verse one one one uno.\n\\v 2 Verse two."
        );
    }

    #[test]
    fn test_store_verse_zero_after_leading_newline() {
        let chapter = "\n\\c 1\n\\s Heading text here\n\\p\n\\v 1 One.";
        let bible = MemoryBible::with_chapter(chapter);
        let ctx = SafetyContext::from_backend(&bible, "user");
        let verdict =
            safely_store_verse(&ctx, "b", 1, 1, 0, "\\c 1\n\\s Heading text there", true).unwrap();
        assert_eq!(verdict, Verdict::Saved);
        assert_eq!(
            bible.chapter(),
            "\n\\c 1\n\\s Heading text there\n\\p\n\\v 1 One."
        );
    }

    #[test]
    fn test_translated_diagnostic() {
        let bible = MemoryBible::with_chapter(CHAPTER);
        let ctx = SafetyContext::from_backend(&bible, "user").with_translator(&Shouting);
        let verdict = safely_store_verse(&ctx, "b", 1, 1, 1, "\\v 3 Three", false).unwrap();
        assert_eq!(verdict.diagnostic(), "VERSE MISMATCH");
        assert_eq!(verdict.rejection().unwrap().kind.to_string(), "Verse mismatch");
    }

    #[test]
    fn test_prepare_audit_entry() {
        assert_eq!(prepare_audit_entry("  \n"), None);
        assert_eq!(prepare_audit_entry(" entry \n").as_deref(), Some("entry"));
        let long = "é".repeat(MAX_AUDIT_ENTRY);
        let entry = prepare_audit_entry(&long).unwrap();
        assert!(entry.ends_with("truncated"));
        assert!(entry.len() < long.len());
    }
}
