use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuessResult {
    Correct,
    #[serde(alias = "wrong")]
    Incorrect,
    Invalid,
    #[serde(other)]
    Unrecognized,
}

impl GuessResult {
    pub fn is_invalid(self) -> bool {
        matches!(self, GuessResult::Invalid)
    }
}

/// How the guessed quantity relates to the target's.
///
/// `More` means the target has more than the guess, so the display arrow
/// points up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Equal,
    More,
    Less,
}

/// Server verdict for one guess, as returned by `POST /guess`.
///
/// Field names follow the server's camelCase payload. Target-side values
/// (`championships`, `colorName`, ...) are only used to derive a missing
/// "near" flag.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GuessComparison {
    pub result: Option<GuessResult>,
    pub message: Option<String>,
    pub target: Option<String>,

    pub guessed_school: Option<String>,
    pub guessed_logo: Option<String>,

    pub guessed_mascot: Option<String>,
    pub mascot_match: bool,
    pub mascot_near: Option<bool>,

    pub guessed_conference: Option<String>,
    pub conference_match: bool,

    pub guessed_color: Option<String>,
    pub guessed_color_name: Option<String>,
    pub color_match: bool,
    pub color_cross_match: bool,

    pub guessed_alternate_color: Option<String>,
    pub guessed_alternate_color_name: Option<String>,
    pub alternate_color_match: bool,
    pub alternate_color_cross_match: bool,

    pub guessed_conference_championships: Option<i64>,
    pub conference_championships: Option<i64>,
    pub conference_championships_match: bool,
    pub conference_championships_comparison: Option<Comparison>,
    pub conference_championships_near: Option<bool>,

    pub guessed_championships: Option<i64>,
    pub championships: Option<i64>,
    pub championships_match: bool,
    pub championships_comparison: Option<Comparison>,
    pub championships_near: Option<bool>,

    pub guessed_heismans: Option<i64>,
    pub heismans: Option<i64>,
    pub heismans_match: bool,
    pub heismans_comparison: Option<Comparison>,
    pub heismans_near: Option<bool>,
}

impl GuessComparison {
    pub fn result(&self) -> GuessResult {
        self.result.unwrap_or(GuessResult::Unrecognized)
    }

    pub fn is_invalid(&self) -> bool {
        self.result().is_invalid()
    }

    pub fn is_correct(&self) -> bool {
        self.result() == GuessResult::Correct
    }
}
