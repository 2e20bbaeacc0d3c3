use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Projection formats, language markers and re-release tags that cinema
/// listings append to a title.
static QUALIFIER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:2d|3d|4d|4dx|imax|screenx|xd|d-box|dbox|macro xe|subtitulada|subtitulado|subt|sub|subs|doblada|doblado|dob|dub|dubbed|subtitled|vose|vos|esp|español|espanol|castellano|latino|ingles|inglés|dual|reestreno|re-estreno|re-release|edición especial|edicion especial|special edition|versión extendida|version extendida|extended edition)\b",
    )
    .unwrap()
});

static TRAILING_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[\(\[]\s*\d{4}\s*[\)\]]\s*$").unwrap());

static LEADING_ARTICLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:the|an|a|el|la|los|las|un|una|unos|unas) ").unwrap());

pub struct TitleNormalizer;

impl TitleNormalizer {
    /// Canonical lookup key for a raw listing title.
    pub fn normalize(raw: &str) -> String {
        if raw.trim().is_empty() {
            return String::new();
        }

        let lowered = raw.to_lowercase();
        let key = Self::canonicalize(&QUALIFIER_PATTERN.replace_all(&lowered, " "));

        // A one-word title such as "Dual" or "IMAX" is the film, not a tag.
        if key.is_empty() {
            let unstripped = Self::canonicalize(&lowered);
            if !unstripped.contains(' ') {
                return unstripped;
            }
        }
        key
    }

    fn canonicalize(unqualified: &str) -> String {
        let without_year = TRAILING_YEAR.replace(unqualified.trim_end(), "");

        let main_title = without_year.split(':').next().unwrap_or_default();
        let main_title = main_title.split(" - ").next().unwrap_or_default();

        let cleaned: String = main_title
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .map(|c| if c.is_whitespace() { ' ' } else { c })
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
            .collect();

        let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

        LEADING_ARTICLE.replace(&collapsed, "").into_owned()
    }

    pub fn slugify(raw: &str) -> String {
        Self::normalize(raw).replace(' ', "-")
    }
}
