//! Splitting a USFM document into books and chapters.

use log::debug;

use crate::books::BookLookup;
use crate::models::BookChapterData;
use crate::styles::StyleLookup;
use crate::tokenize::{get_marker, get_markers_and_text, is_opening_marker, one_string, trim_usfm};
use crate::verses::leading_number;

/// Import USFM, returning one entry per chapter in document order.
///
/// Material between `\id` and the first `\c` becomes chapter 0 of that
/// book. Opening markers that start a new line in USFM get one, so the
/// stored chapters are normalized to one paragraph per line.
pub fn usfm_import(
    input: &str,
    stylesheet: &str,
    styles: &dyn StyleLookup,
    books: &dyn BookLookup,
) -> Vec<BookChapterData> {
    let mut result = Vec::new();

    let mut book = 0;
    let mut chapter = 0;
    let mut chapter_data = String::new();

    let input = one_string(input);
    let mut retrieve_book = false;
    let mut retrieve_chapter = false;

    for marker_or_text in get_markers_and_text(&input) {
        if retrieve_book {
            let code: String = marker_or_text.chars().take(3).collect();
            book = books.book_id(&code);
            if book == 0 {
                debug!("Unknown book code {:?}", code);
            }
            chapter = 0;
            retrieve_book = false;
        }
        if retrieve_chapter {
            chapter = leading_number(&marker_or_text);
            retrieve_chapter = false;
        }

        let marker = get_marker(&marker_or_text);
        if !marker.is_empty() {
            let flush = match marker {
                "id" => {
                    retrieve_book = true;
                    true
                }
                "c" => {
                    retrieve_chapter = true;
                    true
                }
                _ => false,
            };
            if flush {
                flush_chapter(&mut result, book, chapter, &chapter_data);
                chapter = 0;
                chapter_data.clear();
            }
            if is_opening_marker(&marker_or_text)
                && !chapter_data.is_empty()
                && styles.starts_new_line(stylesheet, marker)
            {
                chapter_data.push('\n');
            }
        }
        chapter_data.push_str(&marker_or_text);
    }
    flush_chapter(&mut result, book, chapter, &chapter_data);

    debug!("Imported {} chapters", result.len());
    result
}

fn flush_chapter(result: &mut Vec<BookChapterData>, book: u32, chapter: u32, data: &str) {
    let data = trim_usfm(data);
    if !data.is_empty() {
        result.push(BookChapterData::new(book, chapter, data));
    }
}
