use std::collections::HashSet;

/// Replacement for a banned token.
pub const MASK: &str = "****";

const DEFAULT_BANNED_WORDS: &[&str] = &["kerfuffle", "sharbert", "fornax"];

const TRIMMED_PUNCTUATION: &[char] = &['.', ',', '!', '?'];

/// Masks banned words in chirp bodies.
///
/// Matching is per space-separated token: leading and trailing `.,!?` are
/// ignored and case does not matter, but a hit replaces the whole original
/// token, punctuation included.
#[derive(Debug, Clone)]
pub struct ProfanityFilter {
    banned: HashSet<String>,
}

impl ProfanityFilter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let banned = words
            .into_iter()
            .map(|w| normalize(w.as_ref().trim()))
            .filter(|w| !w.is_empty())
            .collect();

        Self { banned }
    }

    pub fn is_banned(&self, token: &str) -> bool {
        self.banned.contains(&normalize(token))
    }

    pub fn sanitize(&self, text: &str) -> String {
        text.split(' ')
            .map(|token| if self.is_banned(token) { MASK } else { token })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for ProfanityFilter {
    fn default() -> Self {
        Self::new(DEFAULT_BANNED_WORDS)
    }
}

fn normalize(token: &str) -> String {
    token.trim_matches(TRIMMED_PUNCTUATION).to_lowercase()
}

/// Sanitize with the built-in word list.
pub fn sanitize(text: &str) -> String {
    ProfanityFilter::default().sanitize(text)
}
