//! Book identifiers and their numeric ids.

/// One row of the book table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Book {
    pub id: u32,
    pub usfm: &'static str,
    pub english: &'static str,
}

/// Resolves a USFM book code to a numeric book id. 0 means unknown.
pub trait BookLookup: Send + Sync {
    fn book_id(&self, usfm_code: &str) -> u32;
}

/// The standard USFM book codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBooks;

impl StandardBooks {
    /// Look up a book by its numeric id.
    pub fn by_id(&self, id: u32) -> Option<&'static Book> {
        BOOKS.iter().find(|book| book.id == id)
    }

    pub fn all(&self) -> &'static [Book] {
        BOOKS
    }
}

impl BookLookup for StandardBooks {
    fn book_id(&self, usfm_code: &str) -> u32 {
        BOOKS
            .iter()
            .find(|book| book.usfm.eq_ignore_ascii_case(usfm_code))
            .map(|book| book.id)
            .unwrap_or(0)
    }
}

macro_rules! books {
    ($(($id:expr, $usfm:expr, $english:expr)),* $(,)?) => {
        &[$(Book { id: $id, usfm: $usfm, english: $english }),*]
    };
}

static BOOKS: &[Book] = books![
    (1, "GEN", "Genesis"),
    (2, "EXO", "Exodus"),
    (3, "LEV", "Leviticus"),
    (4, "NUM", "Numbers"),
    (5, "DEU", "Deuteronomy"),
    (6, "JOS", "Joshua"),
    (7, "JDG", "Judges"),
    (8, "RUT", "Ruth"),
    (9, "1SA", "1 Samuel"),
    (10, "2SA", "2 Samuel"),
    (11, "1KI", "1 Kings"),
    (12, "2KI", "2 Kings"),
    (13, "1CH", "1 Chronicles"),
    (14, "2CH", "2 Chronicles"),
    (15, "EZR", "Ezra"),
    (16, "NEH", "Nehemiah"),
    (17, "EST", "Esther"),
    (18, "JOB", "Job"),
    (19, "PSA", "Psalms"),
    (20, "PRO", "Proverbs"),
    (21, "ECC", "Ecclesiastes"),
    (22, "SNG", "Song of Solomon"),
    (23, "ISA", "Isaiah"),
    (24, "JER", "Jeremiah"),
    (25, "LAM", "Lamentations"),
    (26, "EZK", "Ezekiel"),
    (27, "DAN", "Daniel"),
    (28, "HOS", "Hosea"),
    (29, "JOL", "Joel"),
    (30, "AMO", "Amos"),
    (31, "OBA", "Obadiah"),
    (32, "JON", "Jonah"),
    (33, "MIC", "Micah"),
    (34, "NAM", "Nahum"),
    (35, "HAB", "Habakkuk"),
    (36, "ZEP", "Zephaniah"),
    (37, "HAG", "Haggai"),
    (38, "ZEC", "Zechariah"),
    (39, "MAL", "Malachi"),
    (40, "MAT", "Matthew"),
    (41, "MRK", "Mark"),
    (42, "LUK", "Luke"),
    (43, "JHN", "John"),
    (44, "ACT", "Acts"),
    (45, "ROM", "Romans"),
    (46, "1CO", "1 Corinthians"),
    (47, "2CO", "2 Corinthians"),
    (48, "GAL", "Galatians"),
    (49, "EPH", "Ephesians"),
    (50, "PHP", "Philippians"),
    (51, "COL", "Colossians"),
    (52, "1TH", "1 Thessalonians"),
    (53, "2TH", "2 Thessalonians"),
    (54, "1TI", "1 Timothy"),
    (55, "2TI", "2 Timothy"),
    (56, "TIT", "Titus"),
    (57, "PHM", "Philemon"),
    (58, "HEB", "Hebrews"),
    (59, "JAS", "James"),
    (60, "1PE", "1 Peter"),
    (61, "2PE", "2 Peter"),
    (62, "1JN", "1 John"),
    (63, "2JN", "2 John"),
    (64, "3JN", "3 John"),
    (65, "JUD", "Jude"),
    (66, "REV", "Revelation"),
    (67, "FRT", "Front Matter"),
    (68, "BAK", "Back Matter"),
    (69, "OTH", "Other Material"),
    (70, "TOB", "Tobit"),
    (71, "JDT", "Judith"),
    (72, "ESG", "Esther (Greek)"),
    (73, "WIS", "Wisdom of Solomon"),
    (74, "SIR", "Sirach"),
    (75, "BAR", "Baruch"),
    (76, "LJE", "Letter of Jeremiah"),
    (77, "S3Y", "Song of the Three Children"),
    (78, "SUS", "Susanna"),
    (79, "BEL", "Bel and the Dragon"),
    (80, "1MA", "1 Maccabees"),
    (81, "2MA", "2 Maccabees"),
    (82, "1ES", "1 Esdras (Greek)"),
    (83, "MAN", "Prayer of Manasses"),
    (84, "PS2", "Psalm 151"),
    (85, "3MA", "3 Maccabees"),
    (86, "2ES", "2 Esdras (Latin)"),
    (87, "4MA", "4 Maccabees"),
    (88, "DAG", "Daniel (Greek)"),
    (89, "ODA", "Odes"),
    (90, "PSS", "Psalms of Solomon"),
    (91, "EZA", "Ezra Apocalypse"),
    (92, "5EZ", "5 Ezra"),
    (93, "6EZ", "6 Ezra"),
    (94, "PS3", "Psalms 152-155"),
    (95, "2BA", "2 Baruch (Apocalypse)"),
    (96, "LBA", "Letter of Baruch"),
    (97, "JUB", "Jubilees"),
    (98, "ENO", "Enoch"),
    (99, "1MQ", "1 Meqabyan/Mekabis"),
    (100, "2MQ", "2 Meqabyan/Mekabis"),
    (101, "3MQ", "3 Meqabyan/Mekabis"),
    (102, "REP", "Reproof"),
    (103, "4BA", "4 Baruch"),
    (104, "LAO", "Letter to the Laodiceans"),
    (105, "INT", "Introduction Matter"),
    (106, "CNC", "Concordance"),
    (107, "GLO", "Glossary / Wordlist"),
    (108, "TDX", "Topical Index"),
    (109, "NDX", "Names Index"),
];
