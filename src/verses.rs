//! Verse and chapter number location.
//!
//! Every verse number list starts with a `0` entry: the material before
//! verse 1 (chapter number, headings, introductions) belongs to verse 0.
//! A `\v` marker can introduce one verse (`5`), a range (`10-12b`) or a
//! sequence (`10,11a`), so one marker may add several numbers.

use log::warn;

use crate::tokenize::{explode_lines, get_markers_and_text, trim_usfm};

/// A comma sequence is split at most this many times.
pub const MAX_SEQUENCE_ITERATIONS: usize = 50;

/// A verse range expands to at most this many verses.
pub const MAX_RANGE_LENGTH: u32 = 1000;

/// Parse the leading number of a string the way C `atoi` does: optional
/// leading whitespace, then digits. Anything else yields 0.
pub fn leading_number(text: &str) -> u32 {
    let text = text.trim_start();
    let text = text.strip_prefix('+').unwrap_or(text);
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().unwrap_or(0)
}

/// The first run of digits anywhere in the string, as a number.
fn number_in_string(text: &str) -> u32 {
    let Some(start) = text.find(|c: char| c.is_ascii_digit()) else {
        return 0;
    };
    leading_number(&text[start..])
}

/// Get the verse numbers in the USFM, starting with the `0` seed.
///
/// `\va` (alternate verse) and `\vp` (published verse) markers are skipped:
/// only real `\v` markers count.
pub fn get_verse_numbers(usfm: &str) -> Vec<u32> {
    let mut verse_numbers = vec![0];
    let mut extract_verse = false;

    for marker_or_text in get_markers_and_text(usfm) {
        if extract_verse {
            let verse = peek_verse_number(&marker_or_text);
            if !handle_verse_range(verse, &mut verse_numbers)
                && !handle_verse_sequence(verse, &mut verse_numbers)
            {
                verse_numbers.push(leading_number(verse));
            }
            extract_verse = false;
        }
        if marker_or_text.starts_with("\\v") {
            extract_verse = true;
        }
        if marker_or_text.starts_with("\\va") || marker_or_text.starts_with("\\vp") {
            extract_verse = false;
        }
    }

    verse_numbers
}

/// Get the chapter numbers in the USFM, starting with the `0` seed.
///
/// Any marker starting with `\c` is taken as a chapter, so `\cl` and
/// `\cp` add an entry too, usually a `0` for their non-numeric text.
pub fn get_chapter_numbers(usfm: &str) -> Vec<u32> {
    let mut chapter_numbers = vec![0];
    let mut extract_chapter = false;

    for marker_or_text in get_markers_and_text(usfm) {
        if extract_chapter {
            chapter_numbers.push(leading_number(peek_verse_number(&marker_or_text)));
            extract_chapter = false;
        }
        if marker_or_text.starts_with("\\c") {
            extract_chapter = true;
        }
    }

    chapter_numbers
}

/// Get the verse number material at the start of the text after a `\v`.
///
/// Accepts digits, commas, hyphens and the verse part letters `a` and `b`,
/// stopping at anything else. This also copes with a verse number that is
/// not followed by a space, like `\v 1-2“Moi`.
pub fn peek_verse_number(text: &str) -> &str {
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, ',' | '-' | 'a' | 'b')))
        .unwrap_or(text.len());
    trim_usfm(&text[..end])
}

/// Expand a verse range like `10-12b` into every verse it covers.
///
/// Returns false, leaving `verses` untouched, when there is no hyphen.
/// The first and last entries come from the literal endpoints, the
/// numbers in between fill the gap.
pub fn handle_verse_range(verse: &str, verses: &mut Vec<u32>) -> bool {
    let Some((start_range, end_range)) = verse.split_once('-') else {
        return false;
    };
    let start_verse = number_in_string(start_range);
    let mut end_verse = number_in_string(end_range);
    let truncated = end_verse >= start_verse && end_verse - start_verse >= MAX_RANGE_LENGTH;
    if truncated {
        warn!(
            "Verse range {} spans more than {} verses, truncating",
            verse, MAX_RANGE_LENGTH
        );
        end_verse = start_verse + MAX_RANGE_LENGTH - 1;
    }
    for i in start_verse..=end_verse {
        if i == start_verse {
            verses.push(leading_number(start_range));
        } else if i == end_verse && !truncated {
            verses.push(leading_number(end_range));
        } else {
            verses.push(i);
        }
    }
    true
}

/// Expand a verse sequence like `10,12` into its verses.
///
/// Returns false, leaving `verses` untouched, when there is no comma.
/// Malformed input with very many commas is cut off after
/// [`MAX_SEQUENCE_ITERATIONS`] parts.
pub fn handle_verse_sequence(verse: &str, verses: &mut Vec<u32>) -> bool {
    if !verse.contains(',') {
        return false;
    }
    let mut rest = verse;
    let mut iterations = 0;
    while !rest.is_empty() {
        iterations += 1;
        if iterations > MAX_SEQUENCE_ITERATIONS {
            warn!(
                "Verse sequence {} has more than {} parts, truncating",
                verse, MAX_SEQUENCE_ITERATIONS
            );
            break;
        }
        let part = match rest.split_once(',') {
            Some((part, remainder)) => {
                rest = remainder;
                part
            }
            None => std::mem::take(&mut rest),
        };
        verses.push(leading_number(part));
    }
    true
}

/// Get the verse numbers in effect at the given zero-based line.
///
/// The last line at or before `line_number` that carries verse markers
/// decides. Returns `[0]` when no such line exists.
pub fn linenumber_to_versenumber(usfm: &str, line_number: usize) -> Vec<u32> {
    let mut verse_number = vec![0];
    for line in explode_lines(usfm).into_iter().take(line_number + 1) {
        let verse_numbers = get_verse_numbers(line);
        if verse_numbers.len() >= 2 {
            verse_number = verse_numbers.into_iter().filter(|&v| v != 0).collect();
        }
    }
    verse_number
}

/// Get the verse numbers in effect at a character offset.
///
/// Offsets count Unicode characters, with one position per new line.
pub fn offset_to_versenumber(usfm: &str, offset: usize) -> Vec<u32> {
    let mut total_offset = 0;
    for (i, line) in explode_lines(usfm).into_iter().enumerate() {
        total_offset += line.chars().count();
        if total_offset >= offset {
            return linenumber_to_versenumber(usfm, i);
        }
        // New line.
        total_offset += 1;
    }
    vec![0]
}

/// Get the character offset where the verse starts.
///
/// Verse 0 starts at 0. A verse that cannot be found maps to the length
/// of the whole text.
pub fn versenumber_to_offset(usfm: &str, verse: u32) -> usize {
    if verse == 0 {
        return 0;
    }
    let mut total_offset = 0;
    for line in explode_lines(usfm) {
        if get_verse_numbers(line).contains(&verse) {
            return total_offset;
        }
        total_offset += line.chars().count() + 1;
    }
    usfm.chars().count()
}

/// Whether the USFM contains one or more verses without any text.
pub fn contains_empty_verses(usfm: &str) -> bool {
    let usfm = usfm.replace('\n', "");
    if usfm.is_empty() {
        return false;
    }
    let usfm: String = usfm.chars().filter(|c| !c.is_ascii_digit()).collect();
    if usfm.is_empty() {
        return false;
    }
    let usfm = usfm.replace(' ', "");
    if usfm.is_empty() {
        return false;
    }
    usfm.contains("\\v\\v") || usfm.ends_with("\\v")
}
