use crate::domain::ScorePair;
use once_cell::sync::Lazy;
use regex::Regex;

// Ordered newest layout first. The live site has shipped several markups over
// the years and proxied copies come back as plain text.
static CRITIC_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#"(?i)title="Metascore (\d{2,3}) out of 100""#,
        r#"class="(?P<class>metascore_w[^"]*)"[^>]*>\s*(\d{2,3})\s*<"#,
        r#""ratingValue"\s*:\s*"?(\d{2,3})\b"#,
        r"(?i)\bmetascore\s*[:\-]?\s*(\d{2,3})\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static USER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#"(?i)title="User score (\d{1,2}(?:\.\d)?) out of 10""#,
        r#"class="metascore_w user[^"]*"[^>]*>\s*(\d{1,2}(?:\.\d)?)\s*<"#,
        r"(?i)\buser score\s*[:\-]?\s*(\d{1,2}(?:\.\d)?)\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

pub struct ScoreParser;

impl ScoreParser {
    /// Extracts critic and user scores independently. Either may be absent.
    pub fn parse(document: &str) -> ScorePair {
        ScorePair {
            critic: Self::first_match(&CRITIC_PATTERNS, document, parse_critic),
            user: Self::first_match(&USER_PATTERNS, document, parse_user),
        }
    }

    fn first_match<T>(
        patterns: &[Regex],
        document: &str,
        convert: fn(&str) -> Option<T>,
    ) -> Option<T> {
        patterns.iter().find_map(|pattern| {
            pattern
                .captures_iter(document)
                .filter(|caps| !caps.name("class").is_some_and(|c| is_user_class(c.as_str())))
                // The score is always the last group.
                .find_map(|caps| caps.get(caps.len() - 1).and_then(|m| convert(m.as_str())))
        })
    }
}

// Legacy markup shares `metascore_w` between both scores.
fn is_user_class(class: &str) -> bool {
    class.split_whitespace().any(|token| token == "user")
}

fn parse_critic(value: &str) -> Option<u8> {
    value.parse::<u8>().ok().filter(|score| *score <= 100)
}

fn parse_user(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|score| (0.0..=10.0).contains(score))
}
