//! Aozora Bunko plain-text normalization.
//!
//! Archive texts follow a fixed convention: a metadata header fenced by two
//! `---` lines, a footer starting at the source-edition (`底本：`) or
//! digitization-credit (`青空文庫作成ファイル`) label, and inline annotation
//! markup (ruby, editorial notes) sprinkled through the body. `clean` strips
//! all of it and flattens the text to a single whitespace-normalized line.

use regex::Regex;
use std::sync::LazyLock;

/// Fence line between the metadata header and the body.
const HEADER_FENCE: &str = "---";

/// Footer labels; everything from the earliest one onward is dropped.
#[allow(clippy::expect_used)]
static FOOTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"底本：|青空文庫作成ファイル").expect("valid regex"));

/// Inline annotation markup, leftmost-first across the alternatives:
/// editorial notes `［＃…］`, ruby readings `《…》`, the ruby base delimiter
/// `｜`, alternate-text notes `〔…〕`, bare URLs, and the footnote symbol `※`.
#[allow(clippy::expect_used)]
static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"［＃.*?］|《.*?》|｜|〔.*?〕|http[^\s]+|※").expect("valid regex")
});

/// Runs of line breaks and full-width spaces; folded into one half-width space.
#[allow(clippy::expect_used)]
static BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\u{3000}]+").expect("valid regex"));

/// Any leftover run of two or more whitespace characters.
#[allow(clippy::expect_used)]
static MULTISPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Strip header, footer and markup, then normalize whitespace.
///
/// Total: malformed input degrades to a short (possibly empty) string, never
/// an error. Idempotent for text already free of the stripped markers.
pub fn clean(raw: &str) -> String {
    // Keep only what follows the second fence. With a single fence this keeps
    // the remainder after it; with none, the text passes through unchanged.
    let body = raw.splitn(3, HEADER_FENCE).last().unwrap_or(raw);

    let body = match FOOTER_RE.find(body) {
        Some(m) => &body[..m.start()],
        None => body,
    };

    let stripped = MARKUP_RE.replace_all(body, "");
    let stripped = stripped.trim();
    let spaced = BREAK_RE.replace_all(stripped, " ");
    let collapsed = MULTISPACE_RE.replace_all(&spaced, " ");
    collapsed.trim().to_string()
}
