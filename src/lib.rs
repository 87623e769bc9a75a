//! Core domain logic for the Codeforces-to-PDF conversion form.
//!
//! Everything in this crate root is target-independent: identifier
//! validation, difficulty bands, the wire types of the availability
//! check, and the preview state machine. The Yew UI lives in the
//! binary; the fetch client lives in [`api`].

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

pub mod api;

use api::ApiError;

/// A validation failure for one of the identifier fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    EmptyContestId,
    EmptyProblem,
    NonNumericContestId(String),
    BadProblemCode(String),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::EmptyContestId | FieldError::EmptyProblem => {
                write!(f, "Please enter both Contest ID and Problem ID")
            }
            FieldError::NonNumericContestId(s) => {
                write!(f, "Contest ID must be a number (got \"{}\")", s)
            }
            FieldError::BadProblemCode(s) => write!(
                f,
                "Problem ID must be a letter or alphanumeric code like A or B3 (got \"{}\")",
                s
            ),
        }
    }
}

impl std::error::Error for FieldError {}

/// Check and canonicalize a contest id: trimmed, non-empty, all digits.
pub fn normalize_contest_id(input: &str) -> Result<String, FieldError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FieldError::EmptyContestId);
    }
    if trimmed.parse::<u64>().is_err() {
        return Err(FieldError::NonNumericContestId(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Check and canonicalize a problem code: trimmed, upper-cased, at most
/// two alphanumeric characters (the backend rejects anything longer).
pub fn normalize_problem_code(input: &str) -> Result<String, FieldError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FieldError::EmptyProblem);
    }
    let upper = trimmed.to_ascii_uppercase();
    let well_formed = upper.len() <= 2 && upper.chars().all(|c| c.is_ascii_alphanumeric());
    if !well_formed {
        return Err(FieldError::BadProblemCode(trimmed.to_string()));
    }
    Ok(upper)
}

/// A resolved `(contest id, problem code)` pair, the unit every preview
/// and conversion request operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemRef {
    pub contest_id: String,
    pub problem: String,
}

impl ProblemRef {
    /// Build a reference from raw field contents, normalizing both.
    pub fn new(contest_id: &str, problem: &str) -> Result<Self, FieldError> {
        Ok(Self {
            contest_id: normalize_contest_id(contest_id)?,
            problem: normalize_problem_code(problem)?,
        })
    }

    /// Title shown when the backend reports none, e.g. `Problem 1234A`.
    pub fn fallback_title(&self) -> String {
        format!("Problem {}{}", self.contest_id, self.problem)
    }

    pub fn to_request(&self) -> AvailabilityRequest {
        AvailabilityRequest {
            contest_id: self.contest_id.clone(),
            problem: self.problem.clone(),
        }
    }
}

impl fmt::Display for ProblemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.contest_id, self.problem)
    }
}

/// Conversion mode of the backend, passed through the form unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvertMode {
    #[default]
    Default,
    Fast,
    Graphics,
}

impl ConvertMode {
    pub const ALL: [ConvertMode; 3] =
        [ConvertMode::Default, ConvertMode::Fast, ConvertMode::Graphics];

    /// Value carried by the form's `mode` field.
    pub fn form_value(self) -> &'static str {
        match self {
            ConvertMode::Default => "default",
            ConvertMode::Fast => "fast",
            ConvertMode::Graphics => "graphics",
        }
    }

    pub fn from_form_value(value: &str) -> Self {
        match value {
            "fast" => ConvertMode::Fast,
            "graphics" => ConvertMode::Graphics,
            _ => ConvertMode::Default,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConvertMode::Default => "Default",
            ConvertMode::Fast => "Fast (no images)",
            ConvertMode::Graphics => "Graphics (keep figures)",
        }
    }
}

/// JSON body of `POST /check-availability`.
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityRequest {
    pub contest_id: String,
    pub problem: String,
}

/// JSON response of `POST /check-availability`. Every field except
/// `success` is optional; the backend omits details on failure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AvailabilityResponse {
    pub success: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub time_limit: Option<String>,
    #[serde(default)]
    pub memory_limit: Option<String>,
    #[serde(default)]
    pub rating: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}

// ──────────────────────────────────────────────────────────────────────────────
// Difficulty bands

/// Color band of a difficulty rating, matching the Codeforces palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyBand {
    Unknown,
    Green,
    Cyan,
    Blue,
    Violet,
    Orange,
    Red,
    DarkRed,
}

impl DifficultyBand {
    /// Band for a rating; 0 means the rating is unknown. Thresholds are
    /// inclusive lower bounds, first match wins.
    pub fn for_rating(rating: u32) -> Self {
        match rating {
            0 => DifficultyBand::Unknown,
            1..=1199 => DifficultyBand::Green,
            1200..=1399 => DifficultyBand::Cyan,
            1400..=1599 => DifficultyBand::Blue,
            1600..=1899 => DifficultyBand::Violet,
            1900..=2099 => DifficultyBand::Orange,
            2100..=2399 => DifficultyBand::Red,
            _ => DifficultyBand::DarkRed,
        }
    }

    /// Background color of the badge.
    pub fn color(self) -> &'static str {
        match self {
            DifficultyBand::Unknown => "#808080",
            DifficultyBand::Green => "#3db73d",
            DifficultyBand::Cyan => "#00c0c0",
            DifficultyBand::Blue => "#0000ff",
            DifficultyBand::Violet => "#aa00aa",
            DifficultyBand::Orange => "#ff8c00",
            DifficultyBand::Red => "#ff0000",
            DifficultyBand::DarkRed => "#aa0000",
        }
    }
}

/// Text shown inside the difficulty badge.
pub fn badge_text(rating: u32) -> String {
    if rating == 0 {
        "Unknown".to_string()
    } else {
        format!("Difficulty: {}", rating)
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Preview state machine

/// Metadata rendered in the preview content panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemPreview {
    pub title: String,
    pub time_limit: Option<String>,
    pub memory_limit: Option<String>,
    pub rating: u32,
}

impl ProblemPreview {
    fn from_response(resp: AvailabilityResponse, problem: &ProblemRef) -> Self {
        Self {
            title: resp.title.unwrap_or_else(|| problem.fallback_title()),
            time_limit: resp.time_limit,
            memory_limit: resp.memory_limit,
            rating: resp.rating.unwrap_or(0),
        }
    }
}

/// The three mutually exclusive panel states, plus hidden before the
/// first request. A new request replaces the whole state; nothing is
/// cached across requests.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PreviewState {
    #[default]
    Hidden,
    Loading,
    Ready(ProblemPreview),
    /// Backend-reported or transport failure, with the backend message
    /// when one was given.
    Failed(Option<String>),
}

impl PreviewState {
    /// Fold the outcome of an availability check into the next state.
    /// Backend failures and transport/decode errors land in the same
    /// error panel.
    pub fn resolve(
        outcome: Result<AvailabilityResponse, ApiError>,
        problem: &ProblemRef,
    ) -> Self {
        match outcome {
            Ok(resp) if resp.success => {
                PreviewState::Ready(ProblemPreview::from_response(resp, problem))
            }
            Ok(resp) => PreviewState::Failed(resp.message),
            Err(err) => {
                warn!("availability check for {} failed: {}", problem, err);
                PreviewState::Failed(None)
            }
        }
    }

    /// The download action is enabled only in this state.
    pub fn download_enabled(&self) -> bool {
        matches!(self, PreviewState::Ready(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(contest: &str, code: &str) -> ProblemRef {
        ProblemRef::new(contest, code).unwrap()
    }

    #[test]
    fn problem_code_is_upper_cased() {
        let p = problem("1234", "a");
        assert_eq!(p.contest_id, "1234");
        assert_eq!(p.problem, "A");
    }

    #[test]
    fn identifier_fields_are_trimmed() {
        let p = problem(" 1234 ", " b3 ");
        assert_eq!(p.contest_id, "1234");
        assert_eq!(p.problem, "B3");
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert_eq!(ProblemRef::new("", "A"), Err(FieldError::EmptyContestId));
        assert_eq!(ProblemRef::new("1234", "  "), Err(FieldError::EmptyProblem));
    }

    #[test]
    fn malformed_fields_are_rejected() {
        assert!(matches!(
            ProblemRef::new("12x4", "A"),
            Err(FieldError::NonNumericContestId(_))
        ));
        assert!(matches!(
            ProblemRef::new("1234", "ABC"),
            Err(FieldError::BadProblemCode(_))
        ));
        assert!(matches!(
            ProblemRef::new("1234", "A-"),
            Err(FieldError::BadProblemCode(_))
        ));
    }

    #[test]
    fn fallback_title_concatenates_identifiers() {
        assert_eq!(problem("1234", "a").fallback_title(), "Problem 1234A");
    }

    #[test]
    fn band_thresholds_are_exact() {
        use DifficultyBand::*;
        let cases = [
            (0, Unknown),
            (1, Green),
            (1199, Green),
            (1200, Cyan),
            (1399, Cyan),
            (1400, Blue),
            (1599, Blue),
            (1600, Violet),
            (1899, Violet),
            (1900, Orange),
            (2099, Orange),
            (2100, Red),
            (2399, Red),
            (2400, DarkRed),
            (3500, DarkRed),
        ];
        for (rating, band) in cases {
            assert_eq!(DifficultyBand::for_rating(rating), band, "rating {}", rating);
        }
    }

    #[test]
    fn badge_text_formats() {
        assert_eq!(badge_text(0), "Unknown");
        assert_eq!(badge_text(1500), "Difficulty: 1500");
        assert_eq!(DifficultyBand::for_rating(0).color(), "#808080");
        assert_eq!(DifficultyBand::for_rating(1199).color(), "#3db73d");
    }

    #[test]
    fn mode_round_trips_through_form_values() {
        for mode in ConvertMode::ALL {
            assert_eq!(ConvertMode::from_form_value(mode.form_value()), mode);
        }
        assert_eq!(ConvertMode::from_form_value("bogus"), ConvertMode::Default);
    }

    #[test]
    fn request_serializes_expected_shape() {
        let body = serde_json::to_string(&problem("1234", "a").to_request()).unwrap();
        assert_eq!(body, r#"{"contest_id":"1234","problem":"A"}"#);
    }

    #[test]
    fn response_tolerates_missing_optionals() {
        let resp: AvailabilityResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.title, None);
        assert_eq!(resp.rating, None);
    }

    #[test]
    fn successful_response_without_title_uses_fallback() {
        let p = problem("1234", "A");
        let resp: AvailabilityResponse =
            serde_json::from_str(r#"{"success":true,"rating":800}"#).unwrap();
        match PreviewState::resolve(Ok(resp), &p) {
            PreviewState::Ready(preview) => {
                assert_eq!(preview.title, "Problem 1234A");
                assert_eq!(preview.rating, 800);
                assert_eq!(preview.time_limit, None);
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn backend_failure_disables_download_and_keeps_message() {
        let p = problem("1234", "A");
        let resp: AvailabilityResponse = serde_json::from_str(
            r#"{"success":false,"message":"Problem 1234A could not be accessed"}"#,
        )
        .unwrap();
        let state = PreviewState::resolve(Ok(resp), &p);
        assert!(!state.download_enabled());
        assert_eq!(
            state,
            PreviewState::Failed(Some("Problem 1234A could not be accessed".into()))
        );
    }

    #[test]
    fn transport_error_lands_in_error_state() {
        let p = problem("1234", "A");
        let state =
            PreviewState::resolve(Err(ApiError::Network("connection refused".into())), &p);
        assert_eq!(state, PreviewState::Failed(None));
        assert!(!state.download_enabled());
    }

    #[test]
    fn ready_state_enables_download() {
        let p = problem("4", "A");
        let resp: AvailabilityResponse = serde_json::from_str(
            r#"{"success":true,"title":"A. Watermelon","time_limit":"1 second(s)","memory_limit":"64 MB","rating":800}"#,
        )
        .unwrap();
        let state = PreviewState::resolve(Ok(resp), &p);
        assert!(state.download_enabled());
    }
}
