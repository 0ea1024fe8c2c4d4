//! Verse, chapter and verse range fragment extraction.
//!
//! A fragment is a run of whole lines taken out of chapter USFM. Verse
//! fragments follow the verse markers line by line, so combined verses
//! (`\v 2-4`) yield the same fragment for each verse they cover.

use crate::tokenize::{
    explode_lines, get_markers_and_text, is_opening_marker, is_usfm_marker, opening_usfm,
    trim_usfm,
};
use crate::verses::get_verse_numbers;

/// Get the raw USFM of one verse.
///
/// Verse 0 is everything before the first verse marker. A verse carries on
/// through lines without verse markers until another verse starts.
pub fn get_verse_text(usfm: &str, verse: u32) -> String {
    let mut result = Vec::new();
    let mut hit = verse == 0;

    for line in explode_lines(usfm) {
        let verses = get_verse_numbers(line);
        if verse == 0 {
            if verses.len() != 1 {
                hit = false;
            }
        } else if verses.contains(&verse) {
            hit = true;
        } else if verses.len() != 1 {
            hit = false;
        }
        if hit {
            result.push(line);
        }
    }

    result.join("\n")
}

/// Get the USFM of one verse as the visual verse editor wants it.
///
/// Empty paragraphs at the end of the verse move over to the start of the
/// next verse, so a verse begins with the paragraph it lives in and never
/// ends with an opening marker that has no content.
pub fn get_verse_text_quill(usfm: &str, verse: u32) -> String {
    let raw_verse_usfm = get_verse_text(usfm, verse);
    if raw_verse_usfm.is_empty() {
        return raw_verse_usfm;
    }

    let mut verse_usfm = raw_verse_usfm.clone();
    for code in trailing_opening_markers(&raw_verse_usfm) {
        let code = code.trim_end();
        if !verse_usfm.ends_with(code) {
            break;
        }
        verse_usfm.truncate(verse_usfm.len() - code.len());
        verse_usfm = trim_usfm(&verse_usfm).to_string();
        if verse_usfm.is_empty() {
            break;
        }
    }
    if verse_usfm.is_empty() {
        return verse_usfm;
    }

    if verse > 0 {
        let previous_verse_usfm = get_verse_text(usfm, verse - 1);
        // Combined verses share one fragment, which has nothing to take over.
        if previous_verse_usfm != raw_verse_usfm && !previous_verse_usfm.is_empty() {
            for code in trailing_opening_markers(&previous_verse_usfm) {
                verse_usfm.insert_str(0, &format!("{}\n", code.trim_end()));
            }
        }
    }

    verse_usfm
}

/// Opening markers at the end of the USFM, last one first.
fn trailing_opening_markers(usfm: &str) -> Vec<String> {
    get_markers_and_text(usfm)
        .into_iter()
        .rev()
        .take_while(|code| is_usfm_marker(code) && is_opening_marker(code))
        .collect()
}

/// Get the USFM of one chapter out of the USFM of a whole book.
///
/// Chapter 0 is the material before the first chapter marker. The chapter
/// marker may be followed by a new line, a space, or a non-breaking space.
/// Returns an empty string when the chapter is not there.
pub fn get_chapter_text(usfm: &str, chapter: u32) -> String {
    if usfm.is_empty() {
        return String::new();
    }

    let mut usfm = usfm;
    if chapter != 0 {
        let mut found = false;
        for separator in ["\n", " ", "\u{00A0}"] {
            let marker = format!("{}{}{}", opening_usfm("c", false), chapter, separator);
            if let Some(pos) = usfm.find(&marker) {
                found = true;
                usfm = &usfm[pos..];
            }
        }
        if !found {
            return String::new();
        }
    }

    // Cut at the next chapter, skipping the first character.
    let skip = usfm.chars().next().map(char::len_utf8).unwrap_or(0);
    if let Some(pos) = usfm[skip..].find(&opening_usfm("c", false)) {
        usfm = &usfm[..skip + pos];
    }

    trim_usfm(usfm).to_string()
}

/// Get the USFM for a range of verses, inclusive on both ends.
///
/// Combined verses appear once. A fragment that equals or overlaps
/// `exclude_usfm` is left out, so the caller can ask for the verses around
/// a verse it already has.
pub fn get_verse_range_text(
    usfm: &str,
    verse_from: u32,
    verse_to: u32,
    exclude_usfm: &str,
    quill: bool,
) -> String {
    let mut bits: Vec<String> = Vec::new();
    let mut previous_usfm = String::new();

    for verse in verse_from..=verse_to {
        let verse_usfm = if quill {
            get_verse_text_quill(usfm, verse)
        } else {
            get_verse_text(usfm, verse)
        };

        if overlaps(&verse_usfm, &previous_usfm) {
            continue;
        }
        previous_usfm = verse_usfm.clone();
        if overlaps(&verse_usfm, exclude_usfm) {
            continue;
        }
        bits.push(verse_usfm);
    }

    bits.join("\n")
}

/// Whether two fragments are equal or one contains the other.
fn overlaps(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

/// Find the byte offset in the chapter where a verse fragment lives.
///
/// The verse's own line anchors the search: the fragment must cover the
/// first non-blank character at or after the start of the first line that
/// carries `verse` (the chapter start for verse 0). This picks the right
/// spot even when the same text occurs earlier in the chapter. Fragments
/// are trimmed, so blanks that open the line are skipped.
pub fn locate_fragment(chapter_usfm: &str, fragment: &str, verse: u32) -> Option<usize> {
    let line_start = verse_line_offset(chapter_usfm, verse)?;
    if fragment.is_empty() {
        return Some(line_start);
    }
    let rest = &chapter_usfm[line_start..];
    let anchor = line_start + rest.len() - trim_usfm_start(rest).len();
    let earliest = (anchor + 1).saturating_sub(fragment.len());
    (earliest..=anchor).rev().find(|&pos| {
        chapter_usfm.is_char_boundary(pos) && chapter_usfm[pos..].starts_with(fragment)
    })
}

fn trim_usfm_start(text: &str) -> &str {
    text.trim_start_matches([' ', '\t', '\r', '\n'])
}

/// Byte offset of the first line that carries the verse.
fn verse_line_offset(chapter_usfm: &str, verse: u32) -> Option<usize> {
    if verse == 0 {
        return Some(0);
    }
    let mut offset = 0;
    for line in explode_lines(chapter_usfm) {
        if get_verse_numbers(line).contains(&verse) {
            return Some(offset);
        }
        offset += line.len() + 1;
    }
    None
}
