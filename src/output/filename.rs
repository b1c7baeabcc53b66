use crate::url::{canonicalize, clean_component, SiteBase};

/// Extension of every page document
pub const DOCUMENT_EXTENSION: &str = "md";

/// Title used when a page has none
pub const UNTITLED: &str = "untitled";

/// Derives the file name of a crawled page from its title and URL
///
/// The name is the cleaned title, followed by `_<canonical path>` when the
/// page is not the site root, followed by the document extension. A missing
/// title, or one with nothing left after cleaning, becomes `untitled`.
///
/// Names are only as unique as title and path combinations are; see
/// [`PageWriter`](crate::output::PageWriter) for how repeats are kept apart.
///
/// # Examples
///
/// ```
/// use site_harvest::output::name_for;
/// use site_harvest::url::SiteBase;
///
/// let base = SiteBase::parse("https://example.com").unwrap();
/// assert_eq!(
///     name_for(Some("Hello, World!"), "https://example.com/about%20us", &base),
///     "hello_world_about_us.md"
/// );
/// assert_eq!(name_for(None, "https://example.com", &base), "untitled.md");
/// ```
pub fn name_for(title: Option<&str>, url: &str, base: &SiteBase) -> String {
    let mut name = title
        .map(clean_component)
        .filter(|cleaned| !cleaned.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    let path_suffix = canonicalize(url, base);
    if !path_suffix.is_empty() {
        name.push('_');
        name.push_str(&path_suffix);
    }

    format!("{}.{}", name, DOCUMENT_EXTENSION)
}
