//! USFM tokenization and marker classification.
//!
//! USFM is line independent: a new line followed by a marker continues the
//! logical line, any other new line is a space. The tokenizer turns a block
//! of USFM into a flat vector that alternates between marker tokens
//! (`"\v "`, `"\add*"`, `"\+nd "`) and the text between them.

/// The escape character that starts every USFM marker.
pub const BACKSLASH: char = '\\';

/// Characters `trim_usfm` strips. Non-breaking spaces are content and stay.
const TRIM_CHARS: [char; 4] = [' ', '\t', '\n', '\r'];

/// Trim spaces, tabs, carriage returns and new lines from both ends.
pub fn trim_usfm(text: &str) -> &str {
    text.trim_matches(TRIM_CHARS.as_slice())
}

/// Split text on new lines. A single trailing empty segment is dropped,
/// so `"a\nb\n"` yields `["a", "b"]` and `""` yields nothing.
pub fn explode_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Join multi-line USFM into one long line.
///
/// Each line is trimmed and empty lines are skipped. A line that does not
/// start with a marker gets a space in front of it, so text that wrapped
/// onto the next line stays separated from the previous word.
pub fn one_string(usfm: &str) -> String {
    let mut long_string = String::new();
    for line in explode_lines(usfm) {
        let line = trim_usfm(line);
        if line.is_empty() {
            continue;
        }
        if !line.starts_with(BACKSLASH) && !long_string.is_empty() {
            long_string.push(' ');
        }
        long_string.push_str(line);
    }
    long_string
}

/// Split USFM into tokens alternating between markers and text.
///
/// ```text
/// "\id GEN\c 10"  ->  ["\id ", "GEN", "\c ", "10"]
/// ```
///
/// Text before the first marker shows up as the first token. Double spaces
/// are preserved because an opening marker carries its own trailing space.
pub fn get_markers_and_text(code: &str) -> Vec<String> {
    let code = code.replace("\n\\", "\\").replace('\n', " ");
    let mut rest = trim_usfm(&code);
    let mut tokens = Vec::new();

    while !rest.is_empty() {
        let end = if rest.starts_with(BACKSLASH) {
            marker_token_end(rest)
        } else {
            rest.find(BACKSLASH).unwrap_or(rest.len())
        };
        tokens.push(rest[..end].to_string());
        rest = &rest[end..];
    }

    tokens
}

/// Byte length of the marker token at the start of `code`.
///
/// The marker ends after the first space, after the first asterisk, before
/// the next backslash, or at the end of the input, whichever comes first.
fn marker_token_end(code: &str) -> usize {
    let mut end = code.len();
    if let Some(pos) = code.find(' ') {
        end = end.min(pos + 1);
    }
    if let Some(pos) = code.find('*') {
        end = end.min(pos + 1);
    }
    if let Some(pos) = code[1..].find(BACKSLASH) {
        end = end.min(pos + 1);
    }
    end
}

/// Get the bare marker name from a token, or an empty string for text.
///
/// ```text
/// "\id "   -> "id"
/// "\add*"  -> "add"
/// "\+add*" -> "add"
/// ```
pub fn get_marker(usfm: &str) -> &str {
    let Some(stripped) = usfm.strip_prefix(BACKSLASH) else {
        return "";
    };
    let stripped = stripped.strip_prefix('+').unwrap_or(stripped);
    let end = stripped
        .find([' ', '*', BACKSLASH])
        .unwrap_or(stripped.len());
    &stripped[..end]
}

/// Whether the code is a USFM marker: at least two bytes, starting with a backslash.
///
/// A stray backslash before a space (`"\\ "`) passes this check although
/// [`get_marker`] finds no name in it.
pub fn is_usfm_marker(code: &str) -> bool {
    code.len() >= 2 && code.starts_with(BACKSLASH)
}

/// Whether the marker opens a span. Closing markers always carry an asterisk.
pub fn is_opening_marker(usfm: &str) -> bool {
    !usfm.contains('*')
}

/// Whether the marker is embedded within another character span (`\+nd`).
pub fn is_embedded_marker(usfm: &str) -> bool {
    usfm.contains('+')
}

/// Build opening USFM from a bare marker: `"add"` -> `"\add "`.
pub fn opening_usfm(marker: &str, embedded: bool) -> String {
    let embed = if embedded { "+" } else { "" };
    format!("\\{}{} ", embed, marker)
}

/// Build closing USFM from a bare marker: `"add"` -> `"\add*"`.
pub fn closing_usfm(marker: &str, embedded: bool) -> String {
    let embed = if embedded { "+" } else { "" };
    format!("\\{}{}*", embed, marker)
}

/// Get the three-letter book identifier following the `\id` marker at `pointer`.
///
/// Returns `"XXX"` when there is no token after the marker.
pub fn get_book_identifier(tokens: &[String], pointer: usize) -> String {
    match tokens.get(pointer + 1) {
        Some(token) => token.chars().take(3).collect(),
        None => "XXX".to_string(),
    }
}

/// Get the text following the marker at `pointer`, advancing the pointer past it.
pub fn get_text_following_marker<'a>(tokens: &'a [String], pointer: &mut usize) -> &'a str {
    *pointer += 1;
    tokens.get(*pointer).map(String::as_str).unwrap_or("")
}

/// Get the text following the marker at `pointer` without moving.
pub fn peek_text_following_marker(tokens: &[String], pointer: usize) -> &str {
    let mut pointer = pointer;
    get_text_following_marker(tokens, &mut pointer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<String> {
        get_markers_and_text(input)
    }

    #[test]
    fn test_markers_and_text() {
        assert_eq!(tokens("\\id GEN\\c 10"), vec!["\\id ", "GEN", "\\c ", "10"]);
        assert_eq!(
            tokens("noise\\id GEN\\c 10"),
            vec!["noise", "\\id ", "GEN", "\\c ", "10"]
        );
        assert_eq!(
            tokens("\\p\\v 1 In \\add the\\add*"),
            vec!["\\p", "\\v ", "1 In ", "\\add ", "the", "\\add*"]
        );
        assert_eq!(
            tokens("\\v 2 Text \\add of the \\add*1st\\add second verse\\add*."),
            vec![
                "\\v ", "2 Text ", "\\add ", "of the ", "\\add*", "1st", "\\add ",
                "second verse", "\\add*", "."
            ]
        );
        assert_eq!(
            tokens("\\p\\v 1 In \\+add the\\+add*"),
            vec!["\\p", "\\v ", "1 In ", "\\+add ", "the", "\\+add*"]
        );
    }

    #[test]
    fn test_markers_and_text_new_lines() {
        // A new line before a marker disappears, any other becomes a space
        assert_eq!(
            tokens("\\c 1\n\\p\n\\v 1 One\ntwo"),
            vec!["\\c ", "1", "\\p", "\\v ", "1 One two"]
        );
        assert!(tokens("").is_empty());
        assert!(tokens("\n \n").is_empty());
    }

    #[test]
    fn test_one_string() {
        assert_eq!(one_string(""), "");
        assert_eq!(one_string("\\id GEN\n"), "\\id GEN");
        assert_eq!(one_string("\\v 10\ntext"), "\\v 10 text");
        assert_eq!(one_string("\\v 10\n\\v 11"), "\\v 10\\v 11");
        assert_eq!(one_string("\\v 10 text\n\\p\\v 11"), "\\v 10 text\\p\\v 11");

        let input = "\\v 9  If we confess our sins, he is faithful and just to forgive\n\
                     us \\add our\\add* sins, and to cleanse us from all unrighteousness.";
        assert_eq!(one_string(input), input.replace('\n', " "));
    }

    #[test]
    fn test_get_marker() {
        assert_eq!(get_marker(""), "");
        assert_eq!(get_marker("text"), "");
        assert_eq!(get_marker("\\id GEN"), "id");
        assert_eq!(get_marker("\\add insertion"), "add");
        assert_eq!(get_marker("\\add"), "add");
        assert_eq!(get_marker("\\add*"), "add");
        assert_eq!(get_marker("\\add*\\add"), "add");
        assert_eq!(get_marker("\\+add"), "add");
        assert_eq!(get_marker("\\+add*"), "add");
    }

    #[test]
    fn test_marker_classification() {
        assert!(is_usfm_marker("\\id"));
        assert!(is_usfm_marker("\\c "));
        assert!(!is_usfm_marker("c"));
        assert!(!is_usfm_marker("\\"));
        assert!(is_usfm_marker("\\+add*"));

        assert!(is_opening_marker("\\id"));
        assert!(is_opening_marker("\\+add "));
        assert!(!is_opening_marker("\\c*"));
        assert!(!is_opening_marker("\\+add*"));

        assert!(!is_embedded_marker("\\add"));
        assert!(!is_embedded_marker("\\add*"));
        assert!(is_embedded_marker("\\+add"));
        assert!(is_embedded_marker("\\+add*"));
    }

    #[test]
    fn test_every_marker_token_has_a_name() {
        let usfm = "\\id GEN\\c 1\\p\\v 1 In \\+add the\\+add*\\f + \\ft note\\f*";
        for token in tokens(usfm) {
            if is_usfm_marker(&token) {
                assert!(!get_marker(&token).is_empty(), "{token}");
            }
            if token.ends_with('*') {
                assert!(!is_opening_marker(&token));
            }
        }
    }

    #[test]
    fn test_stray_backslash_is_a_marker_without_name() {
        assert_eq!(tokens("a \\ b"), vec!["a ", "\\ ", "b"]);
        assert!(is_usfm_marker("\\ "));
        assert_eq!(get_marker("\\ "), "");
        assert!(!is_usfm_marker("\\"));
    }

    #[test]
    fn test_opening_and_closing_usfm() {
        assert_eq!(opening_usfm("id", false), "\\id ");
        assert_eq!(opening_usfm("add", true), "\\+add ");
        assert_eq!(closing_usfm("wj", false), "\\wj*");
        assert_eq!(closing_usfm("add", true), "\\+add*");
    }

    #[test]
    fn test_book_identifier() {
        fn owned(v: &[&str]) -> Vec<String> {
            v.iter().map(|s| s.to_string()).collect()
        }
        assert_eq!(get_book_identifier(&owned(&["\\id", "GEN"]), 0), "GEN");
        assert_eq!(get_book_identifier(&owned(&["\\id", "GEN"]), 1), "XXX");
        assert_eq!(get_book_identifier(&owned(&["\\id", "GE"]), 0), "GE");
        assert_eq!(get_book_identifier(&owned(&["\\id", "GENxxx"]), 0), "GEN");
    }

    #[test]
    fn test_text_following_marker() {
        let tokens = tokens("\\v 1 One\\v 2");
        let mut pointer = 0;
        assert_eq!(peek_text_following_marker(&tokens, 0), "1 One");
        assert_eq!(get_text_following_marker(&tokens, &mut pointer), "1 One");
        assert_eq!(pointer, 1);
        pointer = 2;
        assert_eq!(get_text_following_marker(&tokens, &mut pointer), "");
    }

    #[test]
    fn test_explode_and_trim() {
        assert_eq!(explode_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(explode_lines("a\n\nb"), vec!["a", "", "b"]);
        assert!(explode_lines("").is_empty());
        assert_eq!(trim_usfm(" \t\\p\r\n"), "\\p");
        assert_eq!(trim_usfm("\u{00A0}x"), "\u{00A0}x");
    }
}
