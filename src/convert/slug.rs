use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("slug filter pattern"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace run pattern"));
static HYPHEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("hyphen run pattern"));

/// Derives a filesystem-safe identifier from an article title
///
/// Lowercases, drops anything outside `[a-z0-9\s-]`, turns whitespace runs into
/// single hyphens, squeezes repeated hyphens and trims hyphens at both ends.
/// Distinct titles can produce the same slug.
///
/// ```
/// use helpcenter_scraper::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// ```
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let filtered = DISALLOWED.replace_all(&lower, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&filtered, "-");
    let squeezed = HYPHEN_RUN.replace_all(&hyphenated, "-");
    squeezed.trim_matches('-').to_string()
}
