/// Artifact names tried in order at the project root.
pub const INPUT_FILES: [&str; 2] = ["dictionary.csv", "dictionary.json"];
pub const OUTPUT_DIR: &str = "public";
pub const PAGE_FILE: &str = "index.html";
pub const STYLESHEET: &str = "style.css";

// Site-wide metadata shown in the header and on the home page.
pub const SITE_TITLE: &str = "Hobbes Dictionary";
pub const SITE_WORK: &str = "Leviathan";
pub const SITE_YEAR: &str = "1651";

/// Maximum number of ranked search results.
pub const SEARCH_LIMIT: usize = 12;
/// Characters of definition text shown in chapter listings.
pub const PREVIEW_CHARS: usize = 130;

/// Canonical chapter ordering. Labels whose token is absent sort after all of these.
pub const CHAPTER_SEQUENCE: [&str; 49] = [
    "Intro", "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "XIII",
    "XIV", "XV", "XVI", "XVII", "XVIII", "XIX", "XX", "XXI", "XXII", "XXIII", "XXIV", "XXV",
    "XXVI", "XXVII", "XXVIII", "XXIX", "XXX", "XXXI", "XXXII", "XXXIII", "XXXIV", "XXXV",
    "XXXVI", "XXXVII", "XXXVIII", "XXXIX", "XL", "XLI", "XLII", "XLIII", "XLIV", "XLV", "XLVI",
    "XLVII", "1061",
];

/// One configured book: a contiguous, inclusive range over `CHAPTER_SEQUENCE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub first: &'static str,
    pub last: &'static str,
}

pub const BOOKS: [BookSpec; 5] = [
    BookSpec {
        id: "I",
        title: "Of Man",
        first: "Intro",
        last: "XVI",
    },
    BookSpec {
        id: "II",
        title: "Of Commonwealth",
        first: "XVII",
        last: "XXXI",
    },
    BookSpec {
        id: "III",
        title: "Of a Christian Commonwealth",
        first: "XXXII",
        last: "XLIII",
    },
    BookSpec {
        id: "IV",
        title: "Of the Kingdom of Darkness",
        first: "XLIV",
        last: "XLVII",
    },
    BookSpec {
        id: "1061",
        title: "Of the Class",
        first: "1061",
        last: "1061",
    },
];

/// Book that owns any chapter token outside every configured range.
pub const DEFAULT_BOOK: &str = "I";

/// Position of a chapter token in the canonical sequence.
pub fn chapter_position(token: &str) -> Option<usize> {
    CHAPTER_SEQUENCE.iter().position(|t| *t == token)
}

pub fn book_spec(id: &str) -> Option<&'static BookSpec> {
    BOOKS.iter().find(|b| b.id == id)
}

impl BookSpec {
    /// Whether `token` lies inside this book's range.
    pub fn contains(&self, token: &str) -> bool {
        match (
            chapter_position(self.first),
            chapter_position(self.last),
            chapter_position(token),
        ) {
            (Some(first), Some(last), Some(pos)) => first <= pos && pos <= last,
            _ => false,
        }
    }
}

/// Convenience container for site metadata used across rendering.
#[derive(Clone, Debug)]
pub struct SiteMeta {
    pub title: String,
    pub work: String,
    pub year: String,
}

pub fn site_meta() -> SiteMeta {
    SiteMeta {
        title: SITE_TITLE.to_string(),
        work: SITE_WORK.to_string(),
        year: SITE_YEAR.to_string(),
    }
}
