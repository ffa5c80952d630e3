//! HTML to Markdown conversion
//!
//! The help-center renderer emits a small, predictable HTML dialect, so the
//! conversion is an ordered list of text rewrites over tag boundaries rather
//! than a DOM walk. Each rule pairs an opening tag with the nearest closing tag
//! of the same name, which means nested occurrences of one tag (a list inside a
//! list, a div inside a div) are not reconstructed.
//!
//! Rule order:
//! 1. drop `script`, `style`, `nav`, `footer`, `header`, `aside` elements
//! 2. headings `h1`..`h6`
//! 3. inline emphasis and code
//! 4. links, with same-origin hrefs made relative
//! 5. images
//! 6. lists
//! 7. preformatted blocks
//! 8. paragraphs, line breaks, divs
//! 9. any remaining tag
//! 10. the six supported entities
//! 11. whitespace normalization

use regex::{Captures, Regex};
use std::sync::LazyLock;

static REMOVED_ELEMENTS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["script", "style", "nav", "footer", "header", "aside"]
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>"))
                .expect("element removal pattern is valid")
        })
        .collect()
});

static HEADINGS: LazyLock<Vec<(Regex, String)>> = LazyLock::new(|| {
    (1..=6)
        .map(|level| {
            let pattern = Regex::new(&format!(r"(?is)<h{level}\b[^>]*>(.*?)</h{level}\s*>"))
                .expect("heading pattern is valid");
            let replacement = format!("\n{} ${{1}}\n\n", "#".repeat(level));
            (pattern, replacement)
        })
        .collect()
});

static BOLD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:strong|b)\b[^>]*>(.*?)</(?:strong|b)\s*>").expect("bold pattern")
});

static ITALIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:em|i)\b[^>]*>(.*?)</(?:em|i)\s*>").expect("italic pattern")
});

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<code\b[^>]*>(.*?)</code\s*>").expect("code pattern"));

static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?\shref\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a\s*>"#)
        .expect("anchor pattern")
});

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("image pattern"));

static SRC_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\ssrc\s*=\s*["']([^"']*)["']"#).expect("src attribute pattern")
});

static ALT_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\salt\s*=\s*["']([^"']*)["']"#).expect("alt attribute pattern")
});

static LIST_WRAPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?(?:ul|ol)\b[^>]*>").expect("list wrapper pattern"));

static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<li\b[^>]*>(.*?)</li\s*>").expect("list item pattern"));

// By the time rule 7 runs, `<pre><code>..</code></pre>` has become a pre block
// whose whole content is a single backtick span.
static PRE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<pre\b[^>]*>\s*`([^`]*)`\s*</pre\s*>").expect("pre code pattern")
});

static PRE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<pre\b[^>]*>(.*?)</pre\s*>").expect("pre pattern"));

static PARAGRAPH_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<p\b[^>]*>").expect("paragraph pattern"));

static PARAGRAPH_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</p\s*>").expect("paragraph close pattern"));

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\b[^>]*>").expect("line break pattern"));

static DIV_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<div\b[^>]*>").expect("div pattern"));

static DIV_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</div\s*>").expect("div close pattern"));

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern"));

static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").expect("blank line run pattern")
});

static LEADING_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]+").expect("leading space pattern"));

static TRAILING_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)[ \t]+$").expect("trailing space pattern"));

/// Entities decoded by rule 10, applied in this order
const ENTITIES: [(&str, &str); 6] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
];

/// Converts an article body to Markdown
///
/// # Arguments
///
/// * `html` - Raw article HTML
/// * `base_origin` - Help-center origin; links pointing at it become root-relative
///
/// # Returns
///
/// The normalized Markdown text, trimmed
///
/// # Example
///
/// ```
/// use helpcenter_scraper::html_to_markdown;
///
/// let md = html_to_markdown("<h2>Setup</h2><p>Open <b>Settings</b>.</p>", "https://support.example.com");
/// assert_eq!(md, "## Setup\n\nOpen **Settings**.");
/// ```
pub fn html_to_markdown(html: &str, base_origin: &str) -> String {
    let mut text = html.to_string();

    for pattern in REMOVED_ELEMENTS.iter() {
        text = pattern.replace_all(&text, "").into_owned();
    }

    for (pattern, replacement) in HEADINGS.iter() {
        text = pattern.replace_all(&text, replacement.as_str()).into_owned();
    }

    text = BOLD.replace_all(&text, "**${1}**").into_owned();
    text = ITALIC.replace_all(&text, "*${1}*").into_owned();
    text = INLINE_CODE.replace_all(&text, "`${1}`").into_owned();

    let origin = base_origin.trim_end_matches('/');
    text = ANCHOR
        .replace_all(&text, |caps: &Captures| {
            format!("[{}]({})", &caps[2], rewrite_href(&caps[1], origin))
        })
        .into_owned();

    text = IMAGE.replace_all(&text, image_to_markdown).into_owned();

    text = LIST_WRAPPER.replace_all(&text, "\n").into_owned();
    text = LIST_ITEM.replace_all(&text, "- ${1}\n").into_owned();

    text = PRE_CODE.replace_all(&text, "\n```\n${1}\n```\n").into_owned();
    text = PRE.replace_all(&text, "\n```\n${1}\n```\n").into_owned();

    text = PARAGRAPH_OPEN.replace_all(&text, "").into_owned();
    text = PARAGRAPH_CLOSE.replace_all(&text, "\n\n").into_owned();
    text = LINE_BREAK.replace_all(&text, "\n").into_owned();
    text = DIV_OPEN.replace_all(&text, "").into_owned();
    text = DIV_CLOSE.replace_all(&text, "\n").into_owned();

    text = ANY_TAG.replace_all(&text, "").into_owned();

    text = decode_entities(&text);

    normalize_whitespace(&text)
}

/// Rewrites a link target relative to the help-center origin
///
/// Root-relative hrefs are kept, hrefs on the origin lose the origin, and
/// everything else (other hosts, anchors, mailto) passes through.
pub fn rewrite_href(href: &str, base_origin: &str) -> String {
    if href.starts_with('/') || base_origin.is_empty() {
        return href.to_string();
    }

    match href.strip_prefix(base_origin) {
        Some("") => "/".to_string(),
        // Only a path, query or fragment may follow, so `origin.evil.com` is left alone.
        Some(rest) if rest.starts_with(['/', '?', '#']) => rest.to_string(),
        _ => href.to_string(),
    }
}

fn image_to_markdown(caps: &Captures) -> String {
    let tag = &caps[0];
    let Some(src) = SRC_ATTR.captures(tag).map(|c| c[1].to_string()) else {
        return String::new();
    };
    let alt = ALT_ATTR
        .captures(tag)
        .map(|c| c[1].to_string())
        .unwrap_or_default();
    format!("![{}]({})", alt, src)
}

/// Decodes the fixed entity set; anything else is left as written
pub fn decode_entities(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, literal)| {
            acc.replace(entity, literal)
        })
}

/// Collapses blank-line runs to one blank line and trims every line
pub fn normalize_whitespace(text: &str) -> String {
    let text = BLANK_RUN.replace_all(text, "\n\n");
    let text = LEADING_SPACE.replace_all(&text, "");
    let text = TRAILING_SPACE.replace_all(&text, "");
    text.trim().to_string()
}
