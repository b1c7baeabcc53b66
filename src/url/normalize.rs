use super::site::SiteBase;
use percent_encoding::percent_decode_str;
use url::{ParseError, Url};

/// Canonicalizes a link into a filesystem-safe identifier relative to the site
///
/// # Normalization Steps
///
/// 1. Percent-decode the link; an undecodable link yields `""`
/// 2. Remove the site base (structured: scheme, host, port and path prefix)
/// 3. Strip leading slashes
/// 4. If a fragment is present, keep only the fragment; otherwise drop the query
/// 5. Return `""` if nothing is left (the page is the site root)
/// 6. Lexically normalize `.`, `..` and repeated separators
/// 7. Keep `[A-Za-z0-9_-]` and whitespace, collapse whitespace to `_`, lowercase
///
/// Links outside the site are not stripped; the whole decoded text goes
/// through steps 3-7.
///
/// # Examples
///
/// ```
/// use site_harvest::url::{canonicalize, SiteBase};
///
/// let base = SiteBase::parse("https://example.com").unwrap();
/// assert_eq!(canonicalize("https://example.com/", &base), "");
/// assert_eq!(canonicalize("https://example.com/About%20Us?x=1", &base), "about_us");
/// assert_eq!(canonicalize("https://example.com/a?x=1#b/c", &base), "bc");
/// ```
pub fn canonicalize(url: &str, base: &SiteBase) -> String {
    let Some(decoded) = decode(url) else {
        return String::new();
    };

    let remainder = match join_decoded(base, &decoded) {
        Ok(joined) => match base.remainder(&joined) {
            Some(remainder) => percent_decode_str(&remainder).decode_utf8_lossy().into_owned(),
            None => decoded,
        },
        Err(_) => return String::new(),
    };

    canonical_path(&remainder)
}

/// Resolves a link into the absolute URL the frontier compares and fetches
///
/// Same-site links are rebuilt from their canonical identifier, so every
/// spelling of the same page maps to one URL; the site root maps back to
/// the seed itself. Links on another origin are returned as joined, for the
/// same-site filter to reject.
///
/// Returns `None` if the link cannot be decoded or joined.
///
/// # Examples
///
/// ```
/// use site_harvest::url::{resolve, SiteBase};
///
/// let base = SiteBase::parse("https://example.com").unwrap();
/// let resolved = resolve("https://example.com/About/?ref=nav", &base).unwrap();
/// assert_eq!(resolved.as_str(), "https://example.com/about");
/// ```
pub fn resolve(url: &str, base: &SiteBase) -> Option<Url> {
    let decoded = decode(url)?;
    let joined = join_decoded(base, &decoded).ok()?;

    let Some(remainder) = base.remainder(&joined) else {
        return Some(joined);
    };

    let canonical = canonical_path(&percent_decode_str(&remainder).decode_utf8_lossy());
    if canonical.is_empty() {
        return Some(base.seed().clone());
    }

    base.root().join(&canonical).ok()
}

/// Cleans free text into a lowercase identifier
///
/// Keeps ASCII letters, digits, `_`, `-` and whitespace; whitespace runs
/// (including leading and trailing ones) collapse to a single `_`.
pub fn clean_component(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Applies steps 3-7 of the canonicalization to a base-relative remainder
fn canonical_path(remainder: &str) -> String {
    let path = remainder.trim_start_matches('/');

    let path = match path.split_once('#') {
        Some((_, fragment)) => fragment.split_once('#').map_or(fragment, |(f, _)| f),
        None => path.split_once('?').map_or(path, |(p, _)| p),
    };

    if path.is_empty() {
        return String::new();
    }

    clean_component(&normalize_segments(path))
}

/// Lexical path normalization: drops empty and `.` segments and lets `..`
/// consume the previous segment
fn normalize_segments(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Joins already-decoded text onto the site root
///
/// A literal `%` left after decoding is escaped, so decoding the joined
/// remainder gives back exactly `decoded`.
fn join_decoded(base: &SiteBase, decoded: &str) -> Result<Url, ParseError> {
    base.root().join(&decoded.replace('%', "%25"))
}

fn decode(text: &str) -> Option<String> {
    percent_decode_str(text)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}
