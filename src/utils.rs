use once_cell::sync::Lazy;
use regex::Regex;

use cf_to_pdf::{normalize_contest_id, normalize_problem_code};

// Compiled patterns for the three known problem-URL shapes.
static CONTEST_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"codeforces\.com/contest/(\d+)/problem/([A-Za-z0-9]+)").unwrap()
});
static PROBLEMSET_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"codeforces\.com/problemset/problem/(\d+)/([A-Za-z0-9]+)").unwrap()
});
static GYM_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"codeforces\.com/gym/(\d+)/problem/([A-Za-z0-9]+)").unwrap());

/// Pull `(contest_id, problem)` out of a pasted problem URL.
///
/// The three shapes are tried in order (contest, problemset, gym) and the
/// first match wins. Captures are returned verbatim; case normalization
/// happens later, when a `ProblemRef` is built.
///
/// Recognized shapes:
/// - `https://codeforces.com/contest/1234/problem/A`
/// - `https://codeforces.com/problemset/problem/1234/B3`
/// - `https://codeforces.com/gym/104321/problem/C`
pub fn extract_problem_url(url: &str) -> Option<(String, String)> {
    let url = url.trim();
    for re in [&*CONTEST_URL_RE, &*PROBLEMSET_URL_RE, &*GYM_URL_RE] {
        if let Some(caps) = re.captures(url) {
            return Some((caps[1].to_string(), caps[2].to_string()));
        }
    }
    None
}

/// Validate a contest-id field, returning the canonical value.
pub fn validate_contest_id(input: &str) -> Result<String, String> {
    normalize_contest_id(input).map_err(|e| e.to_string())
}

/// Validate a problem-code field, returning the upper-cased value.
pub fn validate_problem_code(input: &str) -> Result<String, String> {
    normalize_problem_code(input).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contest_urls_extract() {
        assert_eq!(
            extract_problem_url("https://codeforces.com/contest/1234/problem/A"),
            Some(("1234".to_string(), "A".to_string()))
        );
    }

    #[test]
    fn problemset_urls_extract() {
        assert_eq!(
            extract_problem_url("https://codeforces.com/problemset/problem/1234/B3"),
            Some(("1234".to_string(), "B3".to_string()))
        );
    }

    #[test]
    fn gym_urls_extract() {
        assert_eq!(
            extract_problem_url("https://codeforces.com/gym/104321/problem/C"),
            Some(("104321".to_string(), "C".to_string()))
        );
    }

    #[test]
    fn case_is_preserved_at_extraction_time() {
        assert_eq!(
            extract_problem_url("https://codeforces.com/contest/1/problem/a"),
            Some(("1".to_string(), "a".to_string()))
        );
    }

    #[test]
    fn surrounding_whitespace_and_query_strings_are_tolerated() {
        assert_eq!(
            extract_problem_url("  https://codeforces.com/contest/1234/problem/A?locale=en "),
            Some(("1234".to_string(), "A".to_string()))
        );
    }

    #[test]
    fn contest_shape_wins_over_later_patterns() {
        // A URL matching the first pattern never falls through to the others.
        let url = "https://codeforces.com/contest/1234/problem/A";
        assert!(CONTEST_URL_RE.is_match(url));
        assert_eq!(
            extract_problem_url(url),
            Some(("1234".to_string(), "A".to_string()))
        );
    }

    #[test]
    fn unrelated_urls_do_not_extract() {
        assert_eq!(extract_problem_url("https://codeforces.com/contests"), None);
        assert_eq!(
            extract_problem_url("https://codeforces.com/profile/tourist"),
            None
        );
        assert_eq!(extract_problem_url("https://example.com/contest/1/problem/A"), None);
        assert_eq!(extract_problem_url(""), None);
    }

    #[test]
    fn validators_delegate_to_normalization() {
        assert_eq!(validate_contest_id(" 1234 "), Ok("1234".to_string()));
        assert_eq!(validate_problem_code("b3"), Ok("B3".to_string()));
        assert!(validate_contest_id("abc").is_err());
        assert!(validate_problem_code("").is_err());
    }
}
