/// Result of completing a partial word against the candidate pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Nothing in the pool starts with the word.
    NoMatch,
    /// Text to insert after the word. Either a single candidate's remainder
    /// or the extension up to the candidates' longest common prefix.
    Extend(String),
    /// Several candidates share exactly the typed word; the user has to pick.
    Ambiguous(Vec<String>),
}

/// Prefix completion over a fixed, ordered candidate pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completer {
    pool: Vec<String>,
}

impl Completer {
    pub fn new<I, S>(pool: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = Vec::new();
        for candidate in pool {
            let candidate = candidate.into();
            if !candidate.is_empty() && !seen.contains(&candidate) {
                seen.push(candidate);
            }
        }
        Self { pool: seen }
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Candidates starting with `word`, in pool order.
    pub fn candidates(&self, word: &str) -> Vec<String> {
        self.pool
            .iter()
            .filter(|candidate| candidate.starts_with(word))
            .cloned()
            .collect()
    }

    /// Complete `word`.
    pub fn complete(&self, word: &str) -> Completion {
        let candidates = self.candidates(word);
        match candidates.as_slice() {
            [] => Completion::NoMatch,
            [only] => {
                let rest = &only[word.len()..];
                if rest.is_empty() {
                    Completion::NoMatch
                } else {
                    Completion::Extend(rest.to_string())
                }
            }
            [first, others @ ..] => {
                let common = others
                    .iter()
                    .fold(first.as_str(), |prefix, candidate| {
                        common_prefix(prefix, candidate)
                    });
                if common.len() > word.len() {
                    Completion::Extend(common[word.len()..].to_string())
                } else {
                    Completion::Ambiguous(candidates)
                }
            }
        }
    }
}

/// The word ending at the caret: everything after the last whitespace.
pub fn current_word(head: &str) -> &str {
    head.rsplit(char::is_whitespace).next().unwrap_or(head)
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map_or_else(|| a.len().min(b.len()), |((i, _), _)| i);
    &a[..end]
}
