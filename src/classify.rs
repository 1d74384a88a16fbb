//! Keyword-based text classifiers.
//!
//! Style and dress-code use first-match-wins substring rules over a fixed
//! category priority order; tone is a scoring classifier over word-level
//! lexicon hits. All three are total functions of the lower-cased
//! name + " " + description text and never touch catalog state.

/// Style categories, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Ethnic,
    WesternCasual,
    Formal,
    Activewear,
}

impl Style {
    pub const ALL: [Style; 4] = [
        Style::Ethnic,
        Style::WesternCasual,
        Style::Formal,
        Style::Activewear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Style::Ethnic => "Ethnic",
            Style::WesternCasual => "Western Casual",
            Style::Formal => "Formal",
            Style::Activewear => "Activewear",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Style::Ethnic => &[
                "kurta", "saree", "sari", "lehenga", "sherwani", "dupatta", "ethnic", "jhumka",
                "dhoti",
            ],
            Style::WesternCasual => &[
                "jeans",
                "t-shirt",
                "tee",
                "dress",
                "casual",
                "skirt",
                "top",
                "jacket",
                "sweater",
                "shorts",
                "hoodie",
                "sweatshirt",
            ],
            Style::Formal => &[
                "suit",
                "blazer",
                "formal",
                "shirt",
                "trousers",
                "bandhgala",
                "tie",
                "waistcoat",
            ],
            Style::Activewear => &[
                "sports", "active", "track", "running", "gym", "athletic", "sneakers", "leggings",
                "training",
            ],
        }
    }
}

/// Dress-code categories, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DressCode {
    Formal,
    Party,
    Casual,
    Athleisure,
}

impl DressCode {
    pub const ALL: [DressCode; 4] = [
        DressCode::Formal,
        DressCode::Party,
        DressCode::Casual,
        DressCode::Athleisure,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DressCode::Formal => "Formal",
            DressCode::Party => "Party",
            DressCode::Casual => "Casual",
            DressCode::Athleisure => "Athleisure",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            DressCode::Formal => &[
                "formal",
                "suit",
                "blazer",
                "bandhgala",
                "waistcoat",
                "gown",
                "trousers",
            ],
            DressCode::Party => &[
                "party",
                "evening",
                "cocktail",
                "festive",
                "wedding",
                "embellished",
                "sequined",
            ],
            DressCode::Casual => &["casual", "t-shirt", "jeans", "shorts", "polo", "regular"],
            DressCode::Athleisure => &[
                "track", "sports", "running", "gym", "yoga", "athletic", "sweat", "active",
            ],
        }
    }
}

/// Language-tone labels, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Neutral,
    Masculine,
    Feminine,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Neutral, Tone::Masculine, Tone::Feminine];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Neutral => "Neutral",
            Tone::Masculine => "Masculine",
            Tone::Feminine => "Feminine",
        }
    }
}

const MASCULINE_WORDS: [&str; 6] = ["rugged", "bold", "strong", "adventure", "utility", "tough"];
const FEMININE_WORDS: [&str; 7] = [
    "elegant", "chic", "graceful", "pretty", "delicate", "floral", "stylish",
];

/// First category in priority order with any keyword substring hit;
/// Western Casual when nothing matches.
pub fn classify_style(text: &str) -> Style {
    let t = text.to_lowercase();
    for style in Style::ALL {
        if style.keywords().iter().any(|k| t.contains(k)) {
            return style;
        }
    }
    Style::WesternCasual
}

/// First category in priority order with any keyword substring hit;
/// Casual when nothing matches.
pub fn classify_dress_code(text: &str) -> DressCode {
    let t = text.to_lowercase();
    for code in DressCode::ALL {
        if code.keywords().iter().any(|k| t.contains(k)) {
            return code;
        }
    }
    DressCode::Casual
}

/// Scoring classifier: counts word-level lexicon hits. Strictly more
/// masculine hits wins Masculine, strictly more feminine hits wins Feminine,
/// ties and zero-zero fall to Neutral.
pub fn classify_tone(text: &str) -> Tone {
    let t = text.to_lowercase();
    let mut masculine = 0usize;
    let mut feminine = 0usize;

    for word in t.split(|c: char| !c.is_ascii_alphabetic()) {
        if word.is_empty() {
            continue;
        }
        if MASCULINE_WORDS.contains(&word) {
            masculine += 1;
        } else if FEMININE_WORDS.contains(&word) {
            feminine += 1;
        }
    }

    if masculine > feminine && masculine > 0 {
        Tone::Masculine
    } else if feminine > masculine && feminine > 0 {
        Tone::Feminine
    } else {
        Tone::Neutral
    }
}
