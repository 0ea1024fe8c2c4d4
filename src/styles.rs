//! USFM marker styles, as far as the importer needs them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the stylesheet used when the caller does not pick one.
pub const DEFAULT_STYLESHEET: &str = "Standard";

/// What a marker does in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleType {
    BookId,
    UsfmVersion,
    FileEncoding,
    Remark,
    RunningHeader,
    LongTocText,
    ShortTocText,
    BookAbbrev,
    IntroductionEnd,
    Title,
    Heading,
    Paragraph,
    Chapter,
    ChapterLabel,
    PublishedChapterMarker,
    AlternateChapterNumber,
    Verse,
    PublishedVerseMarker,
    TableRow,
    TableHeading,
    TableCell,
    FootnoteWrapper,
    EndnoteWrapper,
    NoteStandardContent,
    NoteContent,
    NoteContentWithEndmarker,
    NoteParagraph,
    CrossreferenceWrapper,
    CrossreferenceStandardContent,
    CrossreferenceContent,
    CrossreferenceContentWithEndmarker,
    CharacterStyle,
    PageBreak,
}

/// Whether a marker of this type goes at the start of a line in USFM.
///
/// Inline markers (character styles, note and cross reference parts, table
/// cells, published verse numbers) continue the current line.
pub fn starts_new_line_in_usfm(style_type: StyleType) -> bool {
    use StyleType::*;
    match style_type {
        PublishedVerseMarker | TableHeading | TableCell => false,
        FootnoteWrapper | EndnoteWrapper | NoteStandardContent | NoteContent
        | NoteContentWithEndmarker | NoteParagraph => false,
        CrossreferenceWrapper
        | CrossreferenceStandardContent
        | CrossreferenceContent
        | CrossreferenceContentWithEndmarker => false,
        CharacterStyle => false,
        _ => true,
    }
}

/// Resolves markers to their style within a named stylesheet.
pub trait StyleLookup: Send + Sync {
    /// The style type of a bare marker (`"p"`, `"add"`), if the stylesheet knows it.
    fn style_type(&self, stylesheet: &str, marker: &str) -> Option<StyleType>;

    /// Whether the marker starts a new line. Unknown markers do.
    fn starts_new_line(&self, stylesheet: &str, marker: &str) -> bool {
        self.style_type(stylesheet, marker)
            .map(starts_new_line_in_usfm)
            .unwrap_or(true)
    }
}

/// The standard USFM markers. Every stylesheet name resolves to the same set.
#[derive(Debug, Clone)]
pub struct StandardStylesheet {
    markers: HashMap<&'static str, StyleType>,
}

impl StandardStylesheet {
    pub fn new() -> Self {
        Self {
            markers: STANDARD_MARKERS.iter().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl Default for StandardStylesheet {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleLookup for StandardStylesheet {
    fn style_type(&self, _stylesheet: &str, marker: &str) -> Option<StyleType> {
        self.markers.get(marker).copied()
    }
}

use StyleType as T;

static STANDARD_MARKERS: &[(&str, StyleType)] = &[
    // Identification
    ("id", T::BookId),
    ("usfm", T::UsfmVersion),
    ("ide", T::FileEncoding),
    ("sts", T::Remark),
    ("rem", T::Remark),
    ("h", T::RunningHeader),
    ("h1", T::RunningHeader),
    ("h2", T::RunningHeader),
    ("h3", T::RunningHeader),
    ("toc1", T::LongTocText),
    ("toc2", T::ShortTocText),
    ("toc3", T::BookAbbrev),
    // Introductions
    ("imt", T::Title),
    ("imt1", T::Title),
    ("imt2", T::Title),
    ("imt3", T::Title),
    ("imt4", T::Title),
    ("is", T::Heading),
    ("is1", T::Heading),
    ("is2", T::Heading),
    ("ip", T::Paragraph),
    ("ipi", T::Paragraph),
    ("im", T::Paragraph),
    ("imi", T::Paragraph),
    ("ipq", T::Paragraph),
    ("imq", T::Paragraph),
    ("ipr", T::Paragraph),
    ("iq", T::Paragraph),
    ("iq1", T::Paragraph),
    ("iq2", T::Paragraph),
    ("iq3", T::Paragraph),
    ("ib", T::Paragraph),
    ("ili", T::Paragraph),
    ("ili1", T::Paragraph),
    ("ili2", T::Paragraph),
    ("iot", T::Title),
    ("io", T::Heading),
    ("io1", T::Heading),
    ("io2", T::Heading),
    ("io3", T::Heading),
    ("io4", T::Heading),
    ("ior", T::CharacterStyle),
    ("iqt", T::CharacterStyle),
    ("iex", T::Paragraph),
    ("imte", T::Title),
    ("imte1", T::Title),
    ("imte2", T::Title),
    ("ie", T::IntroductionEnd),
    // Titles and headings
    ("mt", T::Title),
    ("mt1", T::Title),
    ("mt2", T::Title),
    ("mt3", T::Title),
    ("mt4", T::Title),
    ("mte", T::Title),
    ("mte1", T::Title),
    ("mte2", T::Title),
    ("ms", T::Title),
    ("ms1", T::Title),
    ("ms2", T::Title),
    ("mr", T::Title),
    ("s", T::Heading),
    ("s1", T::Heading),
    ("s2", T::Heading),
    ("s3", T::Heading),
    ("s4", T::Heading),
    ("sr", T::Heading),
    ("r", T::Heading),
    ("rq", T::Paragraph),
    ("d", T::Title),
    ("sp", T::Heading),
    ("sd", T::Paragraph),
    ("sd1", T::Paragraph),
    ("sd2", T::Paragraph),
    ("sd3", T::Paragraph),
    ("sd4", T::Paragraph),
    // Chapters and verses
    ("c", T::Chapter),
    ("ca", T::AlternateChapterNumber),
    ("cl", T::ChapterLabel),
    ("cp", T::PublishedChapterMarker),
    ("cd", T::Paragraph),
    ("v", T::Verse),
    ("va", T::PublishedVerseMarker),
    ("vp", T::PublishedVerseMarker),
    // Paragraphs and poetry
    ("p", T::Paragraph),
    ("m", T::Paragraph),
    ("po", T::Paragraph),
    ("pr", T::Paragraph),
    ("cls", T::Paragraph),
    ("pmo", T::Paragraph),
    ("pm", T::Paragraph),
    ("pmc", T::Paragraph),
    ("pmr", T::Paragraph),
    ("pi", T::Paragraph),
    ("pi1", T::Paragraph),
    ("pi2", T::Paragraph),
    ("pi3", T::Paragraph),
    ("mi", T::Paragraph),
    ("nb", T::Paragraph),
    ("pc", T::Paragraph),
    ("ph", T::Paragraph),
    ("ph1", T::Paragraph),
    ("ph2", T::Paragraph),
    ("ph3", T::Paragraph),
    ("ph4", T::Paragraph),
    ("b", T::Paragraph),
    ("q", T::Paragraph),
    ("q1", T::Paragraph),
    ("q2", T::Paragraph),
    ("q3", T::Paragraph),
    ("qr", T::Paragraph),
    ("qc", T::Paragraph),
    ("qs", T::CharacterStyle),
    ("qa", T::Paragraph),
    ("qac", T::CharacterStyle),
    ("qm", T::Paragraph),
    ("qm1", T::Paragraph),
    ("qm2", T::Paragraph),
    ("qm3", T::Paragraph),
    ("qd", T::Paragraph),
    ("lh", T::Paragraph),
    ("li", T::Paragraph),
    ("li1", T::Paragraph),
    ("li2", T::Paragraph),
    ("li3", T::Paragraph),
    ("li4", T::Paragraph),
    ("lf", T::Paragraph),
    ("lim", T::Paragraph),
    ("lim1", T::Paragraph),
    ("lim2", T::Paragraph),
    ("litl", T::CharacterStyle),
    ("lik", T::CharacterStyle),
    ("liv", T::CharacterStyle),
    ("liv1", T::CharacterStyle),
    ("liv2", T::CharacterStyle),
    ("lit", T::Paragraph),
    // Tables
    ("tr", T::TableRow),
    ("th1", T::TableHeading),
    ("th2", T::TableHeading),
    ("th3", T::TableHeading),
    ("th4", T::TableHeading),
    ("thr1", T::TableHeading),
    ("thr2", T::TableHeading),
    ("thr3", T::TableHeading),
    ("thr4", T::TableHeading),
    ("tc1", T::TableCell),
    ("tc2", T::TableCell),
    ("tc3", T::TableCell),
    ("tc4", T::TableCell),
    ("tcr1", T::TableCell),
    ("tcr2", T::TableCell),
    ("tcr3", T::TableCell),
    ("tcr4", T::TableCell),
    // Notes
    ("f", T::FootnoteWrapper),
    ("fe", T::EndnoteWrapper),
    ("ef", T::FootnoteWrapper),
    ("fr", T::NoteContent),
    ("fq", T::NoteContent),
    ("fqa", T::NoteContent),
    ("fk", T::NoteContent),
    ("fl", T::NoteContent),
    ("fw", T::NoteContent),
    ("fp", T::NoteParagraph),
    ("fv", T::NoteContentWithEndmarker),
    ("ft", T::NoteStandardContent),
    ("fdc", T::NoteContentWithEndmarker),
    ("fm", T::NoteContentWithEndmarker),
    ("x", T::CrossreferenceWrapper),
    ("ex", T::CrossreferenceWrapper),
    ("xo", T::CrossreferenceContent),
    ("xk", T::CrossreferenceContent),
    ("xq", T::CrossreferenceContent),
    ("xt", T::CrossreferenceStandardContent),
    ("xta", T::CrossreferenceContent),
    ("xop", T::CrossreferenceContentWithEndmarker),
    ("xot", T::CrossreferenceContentWithEndmarker),
    ("xnt", T::CrossreferenceContentWithEndmarker),
    ("xdc", T::CrossreferenceContentWithEndmarker),
    // Character styles
    ("add", T::CharacterStyle),
    ("bk", T::CharacterStyle),
    ("dc", T::CharacterStyle),
    ("k", T::CharacterStyle),
    ("nd", T::CharacterStyle),
    ("ord", T::CharacterStyle),
    ("pn", T::CharacterStyle),
    ("png", T::CharacterStyle),
    ("addpn", T::CharacterStyle),
    ("qt", T::CharacterStyle),
    ("sig", T::CharacterStyle),
    ("sls", T::CharacterStyle),
    ("tl", T::CharacterStyle),
    ("wj", T::CharacterStyle),
    ("em", T::CharacterStyle),
    ("bd", T::CharacterStyle),
    ("it", T::CharacterStyle),
    ("bdit", T::CharacterStyle),
    ("no", T::CharacterStyle),
    ("sc", T::CharacterStyle),
    ("sup", T::CharacterStyle),
    ("pro", T::CharacterStyle),
    ("w", T::CharacterStyle),
    ("rb", T::CharacterStyle),
    ("jmp", T::CharacterStyle),
    ("fig", T::CharacterStyle),
    // Breaks
    ("pb", T::PageBreak),
];
