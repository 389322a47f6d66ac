/// Best catalog entry for an utterance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    /// `None` only when the catalog was empty
    pub phrase: Option<&'a str>,
    /// Similarity in [0, 1]; 0 for an empty catalog
    pub score: f64,
}

impl MatchResult<'_> {
    /// Whether the score clears `threshold` (strictly greater)
    pub fn accepted(&self, threshold: f64) -> bool {
        self.phrase.is_some() && self.score > threshold
    }
}

/// Levenshtein distance over chars: insert, delete and substitute all cost 1
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    // rows sized by the shorter string
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = if lc == sc { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[short.len()]
}

/// Normalized similarity: `(len(longer) - distance) / len(longer)`.
///
/// Two empty strings are a perfect match. Symmetric in its arguments.
pub fn similarity(a: &str, b: &str) -> f64 {
    let longer = a.chars().count().max(b.chars().count());
    if longer == 0 {
        return 1.0;
    }
    let distance = levenshtein(a, b);
    (longer - distance) as f64 / longer as f64
}

/// Find the catalog phrase closest to `input`.
///
/// Candidates are scored in iteration order and only a strictly higher score
/// replaces the current best, so the first candidate wins ties. Strings are
/// compared as given; callers normalize case and whitespace beforehand.
pub fn best_match<'a, I>(input: &str, catalog: I) -> MatchResult<'a>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best = MatchResult {
        phrase: None,
        score: 0.0,
    };

    for candidate in catalog {
        let score = similarity(input, candidate);
        if best.phrase.is_none() || score > best.score {
            best = MatchResult {
                phrase: Some(candidate),
                score,
            };
        }
    }
    best
}
