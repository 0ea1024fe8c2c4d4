//! Word level attributes and figures.
//!
//! In USFM 3 a character span can carry attributes after a vertical bar:
//!
//! ```text
//! \w gracious|lemma="grace" strong="H2580"\w*
//! \w gracious|grace\w*
//! \fig At once they left their nets.|src="avnt016.jpg" size="span" ref="1.18"\fig*
//! ```
//!
//! USFM 2 figures use seven bar separated fields instead:
//! `\fig DESC|FILE|SIZE|LOC|COPY|CAP|REF\fig*`.

use crate::models::{Figure, WordAttributes};
use crate::tokenize::{closing_usfm, opening_usfm};

/// Markers whose attributes `remove_word_level_attributes` strips.
const STRIPPED_MARKERS: [&str; 2] = ["w", "fig"];

/// Markers with word level attributes, each with the name a bare value gets.
const ATTRIBUTE_MARKERS: [(&str, &str); 3] = [("w", "lemma"), ("rb", "gloss"), ("xt", "link-href")];

/// Byte positions of one `\marker ...\marker*` span.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    content: usize,
    close: usize,
    end: usize,
}

/// Find the next span of the marker at or after `from`, plain or embedded.
fn find_span(usfm: &str, marker: &str, from: usize) -> Option<Span> {
    [false, true]
        .into_iter()
        .filter_map(|embedded| {
            let opener = opening_usfm(marker, embedded);
            let closer = closing_usfm(marker, embedded);
            let start = from + usfm[from..].find(&opener)?;
            let content = start + opener.len();
            let close = content + usfm[content..].find(&closer)?;
            Some(Span {
                start,
                content,
                close,
                end: close + closer.len(),
            })
        })
        .min_by_key(|span| span.start)
}

/// Remove the attributes from `\w` and `\fig` spans, keeping their text.
pub fn remove_word_level_attributes(usfm: &str) -> String {
    if !usfm.contains('|') {
        return usfm.to_string();
    }

    let mut usfm = usfm.to_string();
    for marker in STRIPPED_MARKERS {
        let mut from = 0;
        while let Some(span) = find_span(&usfm, marker, from) {
            if let Some(bar) = usfm[span.content..span.close].find('|') {
                usfm.replace_range(span.content + bar..span.close, "");
            }
            from = span.start + 1;
        }
    }
    usfm
}

/// Remove word level attributes and return them.
///
/// A bare attribute value (`\w gracious|grace\w*`) gets the default
/// attribute name of its marker, `lemma` for `\w`.
pub fn extract_word_level_attributes(usfm: &str) -> (String, Vec<WordAttributes>) {
    let mut usfm = usfm.to_string();
    let mut words = Vec::new();

    for (marker, default_attribute) in ATTRIBUTE_MARKERS {
        let mut from = 0;
        while let Some(span) = find_span(&usfm, marker, from) {
            let content = &usfm[span.content..span.close];
            if let Some((text, attributes)) = content.split_once('|') {
                words.push(WordAttributes {
                    marker: marker.to_string(),
                    text: text.to_string(),
                    attributes: parse_attributes(attributes, default_attribute),
                });
                let bar = span.content + text.len();
                usfm.replace_range(bar..span.close, "");
            }
            from = span.start + 1;
        }
    }

    (usfm, words)
}

/// Parse `name="value"` pairs. Text without any `=` is a single value for
/// the default attribute.
pub fn parse_attributes(attributes: &str, default_attribute: &str) -> Vec<(String, String)> {
    let attributes = attributes.trim();
    if attributes.is_empty() {
        return Vec::new();
    }
    if !attributes.contains('=') {
        return vec![(default_attribute.to_string(), attributes.to_string())];
    }

    let mut pairs = Vec::new();
    let mut rest = attributes;
    while let Some((name, after)) = rest.split_once('=') {
        let Some(after) = after.trim_start().strip_prefix('"') else {
            break;
        };
        let Some((value, remainder)) = after.split_once('"') else {
            break;
        };
        pairs.push((name.trim().to_string(), value.to_string()));
        rest = remainder;
    }
    pairs
}

/// Take the first figure out of the USFM.
///
/// Returns the USFM without the figure, and the figure if there was one.
pub fn extract_fig(usfm: &str) -> (String, Option<Figure>) {
    let Some(span) = find_span(usfm, "fig", 0) else {
        return (usfm.to_string(), None);
    };

    let figure = parse_figure(&usfm[span.content..span.close]);
    let mut clean = String::with_capacity(usfm.len());
    clean.push_str(&usfm[..span.start]);
    clean.push_str(&usfm[span.end..]);
    (clean, Some(figure))
}

/// Take all figures out of the USFM.
pub fn extract_figs(usfm: &str) -> (String, Vec<Figure>) {
    let mut usfm = usfm.to_string();
    let mut figures = Vec::new();
    loop {
        let (clean, figure) = extract_fig(&usfm);
        match figure {
            Some(figure) => figures.push(figure),
            None => return (usfm, figures),
        }
        usfm = clean;
    }
}

fn parse_figure(content: &str) -> Figure {
    let fields: Vec<&str> = content.split('|').collect();
    if fields.len() == 7 {
        return Figure {
            alt: fields[0].trim().to_string(),
            src: fields[1].trim().to_string(),
            size: fields[2].trim().to_string(),
            loc: fields[3].trim().to_string(),
            copy: fields[4].trim().to_string(),
            caption: fields[5].trim().to_string(),
            reference: fields[6].trim().to_string(),
        };
    }

    let (caption, attributes) = content.split_once('|').unwrap_or((content, ""));
    let mut figure = Figure {
        caption: caption.trim().to_string(),
        ..Figure::default()
    };
    for (name, value) in parse_attributes(attributes, "src") {
        match name.as_str() {
            "alt" => figure.alt = value,
            "src" | "file" => figure.src = value,
            "size" => figure.size = value,
            "loc" => figure.loc = value,
            "copy" => figure.copy = value,
            "ref" => figure.reference = value,
            _ => {}
        }
    }
    figure
}
