use crate::comparison::{Comparison, GuessComparison};

const UNKNOWN: &str = "Unknown";

/// Visual verdict for one attribute of a guess.
///
/// Exactly one applies per attribute, resolved with the priority
/// `Match > Near | CrossMatch > Miss`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Match,
    Near,
    CrossMatch,
    Miss,
}

impl Category {
    pub fn css_class(self) -> &'static str {
        match self {
            Category::Match => "result-box--match",
            Category::Near => "result-box--near",
            Category::CrossMatch => "result-box--color-match",
            Category::Miss => "result-box--miss",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub text: String,
    pub category: Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    TitleCase,
    Verbatim,
}

/// One attribute of a guess diff, reduced to what classification needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeDiff<'a> {
    Text {
        guessed: Option<&'a str>,
        matched: bool,
        near: Option<bool>,
        style: TextStyle,
    },
    Color {
        name: Option<&'a str>,
        code: Option<&'a str>,
        matched: bool,
        cross_match: bool,
    },
    Numeric {
        guessed: Option<i64>,
        actual: Option<i64>,
        comparison: Option<Comparison>,
        matched: bool,
        near: Option<bool>,
    },
}

pub fn classify(diff: &AttributeDiff<'_>) -> Classified {
    match *diff {
        AttributeDiff::Text {
            guessed,
            matched,
            near,
            style,
        } => {
            let raw = non_empty(guessed).unwrap_or(UNKNOWN);
            let text = match style {
                TextStyle::TitleCase => title_case(raw),
                TextStyle::Verbatim => raw.to_owned(),
            };
            let category = if matched {
                Category::Match
            } else if near.unwrap_or(false) {
                Category::Near
            } else {
                Category::Miss
            };
            Classified { text, category }
        }
        AttributeDiff::Color {
            name,
            code,
            matched,
            cross_match,
        } => {
            let raw = non_empty(name).or(non_empty(code)).unwrap_or(UNKNOWN);
            let category = if matched {
                Category::Match
            } else if cross_match {
                Category::CrossMatch
            } else {
                Category::Miss
            };
            Classified {
                text: title_case(raw),
                category,
            }
        }
        AttributeDiff::Numeric {
            guessed,
            actual,
            comparison,
            matched,
            near,
        } => {
            let Some(count) = guessed else {
                return Classified {
                    text: UNKNOWN.to_owned(),
                    category: Category::Miss,
                };
            };
            let text = match comparison {
                Some(Comparison::More) => format!("{count} ↑"),
                Some(Comparison::Less) => format!("{count} ↓"),
                Some(Comparison::Equal) | None => count.to_string(),
            };
            let is_near = near.unwrap_or_else(|| {
                actual
                    .map(|actual| (actual - count).abs() == 1)
                    .unwrap_or(false)
            });
            let category = if matched {
                Category::Match
            } else if is_near {
                Category::Near
            } else {
                Category::Miss
            };
            Classified { text, category }
        }
    }
}

/// Capitalizes the first letter of each whitespace-separated word and joins
/// the words with single spaces. The rest of each word is left untouched.
pub fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Mascot,
    Conference,
    Color,
    AlternateColor,
    ConferenceChampionships,
    Championships,
    Heismans,
}

impl Attribute {
    pub const ALL: [Attribute; 7] = [
        Attribute::Mascot,
        Attribute::Conference,
        Attribute::Color,
        Attribute::AlternateColor,
        Attribute::ConferenceChampionships,
        Attribute::Championships,
        Attribute::Heismans,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Attribute::Mascot => "Mascot",
            Attribute::Conference => "Conference",
            Attribute::Color => "Color",
            Attribute::AlternateColor => "Alternate",
            Attribute::ConferenceChampionships => "Conf. Champ",
            Attribute::Championships => "Champs",
            Attribute::Heismans => "Heismans",
        }
    }

    pub fn is_narrow(self) -> bool {
        matches!(self, Attribute::Heismans)
    }

    pub fn diff(self, data: &GuessComparison) -> AttributeDiff<'_> {
        match self {
            Attribute::Mascot => AttributeDiff::Text {
                guessed: data.guessed_mascot.as_deref(),
                matched: data.mascot_match,
                near: data.mascot_near,
                style: TextStyle::TitleCase,
            },
            Attribute::Conference => AttributeDiff::Text {
                guessed: data.guessed_conference.as_deref(),
                matched: data.conference_match,
                near: None,
                style: TextStyle::Verbatim,
            },
            Attribute::Color => AttributeDiff::Color {
                name: data.guessed_color_name.as_deref(),
                code: data.guessed_color.as_deref(),
                matched: data.color_match,
                cross_match: data.color_cross_match,
            },
            Attribute::AlternateColor => AttributeDiff::Color {
                name: data.guessed_alternate_color_name.as_deref(),
                code: data.guessed_alternate_color.as_deref(),
                matched: data.alternate_color_match,
                cross_match: data.alternate_color_cross_match,
            },
            Attribute::ConferenceChampionships => AttributeDiff::Numeric {
                guessed: data.guessed_conference_championships,
                actual: data.conference_championships,
                comparison: data.conference_championships_comparison,
                matched: data.conference_championships_match,
                near: data.conference_championships_near,
            },
            Attribute::Championships => AttributeDiff::Numeric {
                guessed: data.guessed_championships,
                actual: data.championships,
                comparison: data.championships_comparison,
                matched: data.championships_match,
                near: data.championships_near,
            },
            Attribute::Heismans => AttributeDiff::Numeric {
                guessed: data.guessed_heismans,
                actual: data.heismans,
                comparison: data.heismans_comparison,
                matched: data.heismans_match,
                near: data.heismans_near,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolCell {
    pub name: String,
    pub logo_url: Option<String>,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCell {
    pub attribute: Attribute,
    pub text: String,
    pub category: Category,
}

impl ResultCell {
    pub fn label(&self) -> &'static str {
        self.attribute.label()
    }
}

/// Everything needed to draw one guess in the history strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultBlock {
    pub school: SchoolCell,
    pub cells: Vec<ResultCell>,
}

pub fn build_block(data: &GuessComparison) -> ResultBlock {
    let school = classify(&AttributeDiff::Text {
        guessed: data.guessed_school.as_deref(),
        matched: data.is_correct(),
        near: None,
        style: TextStyle::TitleCase,
    });

    let cells = Attribute::ALL
        .iter()
        .map(|&attribute| {
            let Classified { text, category } = classify(&attribute.diff(data));
            ResultCell {
                attribute,
                text,
                category,
            }
        })
        .collect();

    ResultBlock {
        school: SchoolCell {
            name: school.text,
            logo_url: data
                .guessed_logo
                .clone()
                .filter(|url| !url.trim().is_empty()),
            category: school.category,
        },
        cells,
    }
}
