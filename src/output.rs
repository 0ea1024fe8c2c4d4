//! Output formatting for import results and verdicts (JSON, CSV, console).

use crate::books::StandardBooks;
use crate::models::{BookChapterData, ImportResult, StoreReport, Verdict};
use crate::verses::get_verse_numbers;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write any result as pretty JSON.
pub fn write_json<T: Serialize, W: Write>(result: &T, writer: &mut W) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(result)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write any result as pretty JSON to a file.
pub fn write_json_file<T: Serialize>(result: &T, path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_json(result, &mut file)
}

/// Write one line per chapter as CSV.
pub fn write_csv<W: Write>(chapters: &[BookChapterData], writer: &mut W) -> Result<(), OutputError> {
    writeln!(writer, "book,code,chapter,characters,lines,verses")?;
    for data in chapters {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            data.book,
            book_code(data.book),
            data.chapter,
            data.data.chars().count(),
            data.data.lines().count(),
            verse_count(&data.data)
        )?;
    }
    Ok(())
}

pub fn write_csv_file(chapters: &[BookChapterData], path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_csv(chapters, &mut file)
}

fn book_code(book: u32) -> &'static str {
    StandardBooks.by_id(book).map(|b| b.usfm).unwrap_or("???")
}

fn book_name(book: u32) -> &'static str {
    StandardBooks.by_id(book).map(|b| b.english).unwrap_or("Unknown")
}

/// Verses in a chapter, without the verse 0 entry.
fn verse_count(usfm: &str) -> usize {
    get_verse_numbers(usfm).len() - 1
}

/// Write an import summary to stdout.
pub fn print_summary(result: &ImportResult) {
    println!("\n=== Import Summary ===");
    println!("Version: {}", result.version);
    println!("Stylesheet: {}", result.stylesheet);
    println!();
    println!("Results:");
    println!("  Files: {}", result.summary.file_count);
    println!("  Books: {}", result.summary.book_count);
    println!("  Chapters: {}", result.summary.chapter_count);
    if result.summary.unknown_book_chapters > 0 {
        println!(
            "  Chapters with unknown book: {}",
            result.summary.unknown_book_chapters
        );
    }
    if result.summary.chapters_with_empty_verses > 0 {
        println!(
            "  Chapters with empty verses: {}",
            result.summary.chapters_with_empty_verses
        );
    }
}

/// Format a chapter as a one-line description, like
/// `MIC 1 (Micah 33) 3 verses, 29 chars: \c 1`.
pub fn format_chapter(data: &BookChapterData) -> String {
    let first_line = data.data.lines().next().unwrap_or("");
    format!(
        "{} {} ({} {}) {} verses, {} chars: {}",
        book_code(data.book),
        data.chapter,
        book_name(data.book),
        data.book,
        verse_count(&data.data),
        data.data.chars().count(),
        first_line
    )
}

/// Print chapters in a human-readable format.
pub fn print_chapters(chapters: &[BookChapterData], limit: Option<usize>) {
    let to_print = match limit {
        Some(n) => &chapters[..n.min(chapters.len())],
        None => chapters,
    };

    for data in to_print {
        println!("{}", format_chapter(data));
    }

    if let Some(n) = limit {
        if chapters.len() > n {
            println!("... and {} more chapters", chapters.len() - n);
        }
    }
}

/// Format a verdict for the console.
pub fn format_verdict(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Saved => "Saved".to_string(),
        Verdict::Unchanged => "Unchanged, nothing to save".to_string(),
        Verdict::Rejected(rejection) => {
            format!("Rejected: {}\n  {}", rejection.diagnostic(), rejection.explanation)
        }
    }
}

/// Print a store report as JSON on stdout and a readable line on stderr.
pub fn print_store_report(report: &StoreReport) -> Result<(), OutputError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(report, &mut handle)?;
    eprintln!("{}", format_verdict(&report.verdict));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImportSummary, Rejection, RejectionKind};

    fn create_test_chapters() -> Vec<BookChapterData> {
        vec![
            BookChapterData::new(33, 0, "\\id MIC"),
            BookChapterData::new(33, 1, "\\c 1\n\\p\n\\v 1 One\n\\v 2-3 Two"),
        ]
    }

    #[test]
    fn test_write_csv() {
        let mut output = Vec::new();
        write_csv(&create_test_chapters(), &mut output).unwrap();

        let csv = String::from_utf8(output).unwrap();
        assert!(csv.contains("book,code,chapter"));
        assert!(csv.contains("33,MIC,0,7,1,0"));
        assert!(csv.contains("33,MIC,1,"));
        assert!(csv.trim_end().ends_with(",4,3"));
    }

    #[test]
    fn test_write_csv_empty() {
        let mut output = Vec::new();
        write_csv(&[], &mut output).unwrap();

        let csv = String::from_utf8(output).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_write_json() {
        let result = ImportResult {
            version: "0.4.0".to_string(),
            stylesheet: "Standard".to_string(),
            summary: ImportSummary {
                file_count: 1,
                book_count: 1,
                chapter_count: 2,
                ..ImportSummary::default()
            },
            files: Vec::new(),
        };
        let mut output = Vec::new();
        write_json(&result, &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["summary"]["chapter_count"], 2);
        assert_eq!(value["stylesheet"], "Standard");
    }

    #[test]
    fn test_format_chapter() {
        let chapters = create_test_chapters();
        let line = format_chapter(&chapters[1]);
        assert!(line.starts_with("MIC 1 (Micah 33) 3 verses"));
        assert!(line.ends_with(": \\c 1"));
        assert!(format_chapter(&BookChapterData::new(0, 1, "x")).starts_with("??? 1 (Unknown 0)"));
    }

    #[test]
    fn test_format_verdict() {
        assert_eq!(format_verdict(&Verdict::Saved), "Saved");
        let verdict = Verdict::Rejected(Rejection {
            kind: RejectionKind::VerseMismatch,
            diagnostic: "Verse mismatch".to_string(),
            explanation: "The USFM contains verse(s) 3".to_string(),
        });
        let text = format_verdict(&verdict);
        assert!(text.starts_with("Rejected: Verse mismatch"));
        assert!(text.contains("verse(s) 3"));
    }
}
