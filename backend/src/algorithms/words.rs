//! Word frequencies for word-cloud rendering.
//!
//! The cloud itself is drawn by the client; this module only decides which
//! words appear and how heavily they are weighted. Tokens are `\w[\w']*`
//! matches with a trailing possessive `'s` stripped; purely numeric tokens and
//! English stopwords are dropped, case variants merge under their most common
//! spelling and plurals fold into an existing singular.
//!
//! Only single words are counted. Two-word phrases ("Single Leg") are not
//! detected as collocations, so each half is weighted on its own.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use super::frequency::FrequencyTable;

/// Upper bound on the number of words handed to the renderer.
pub const MAX_CLOUD_WORDS: usize = 200;

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "com", "could", "couldn't", "did", "didn't",
    "do", "does", "doesn't", "doing", "don't", "down", "during", "each", "else", "ever", "few",
    "for", "from", "further", "get", "had", "hadn't", "has", "hasn't", "have", "haven't",
    "having", "he", "he'd", "he'll", "he's", "hence", "her", "here", "here's", "hers", "herself",
    "him", "himself", "his", "how", "how's", "however", "http", "i", "i'd", "i'll", "i'm",
    "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "just", "k",
    "let's", "like", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of",
    "off", "on", "once", "only", "or", "other", "otherwise", "ought", "our", "ours",
    "ourselves", "out", "over", "own", "r", "same", "shall", "shan't", "she", "she'd",
    "she'll", "she's", "should", "shouldn't", "since", "so", "some", "such", "than", "that",
    "that's", "the", "their", "theirs", "them", "themselves", "then", "there", "there's",
    "therefore", "these", "they", "they'd", "they'll", "they're", "they've", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd",
    "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's", "where",
    "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with", "won't",
    "would", "wouldn't", "www", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
    "yourself", "yourselves",
];

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\w[\w']*").expect("static word pattern is valid"))
}

fn stopwords() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| STOPWORDS.iter().copied().collect())
}

/// A word and its weight in the cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordWeight {
    pub word: String,
    pub count: usize,
    /// Count relative to the most frequent word, in `(0, 1]`.
    pub weight: f64,
}

/// Case variants of one word, keyed by their lowercase form.
struct WordGroup {
    variants: FrequencyTable,
    total: usize,
}

impl WordGroup {
    /// Most frequent spelling; ties go to the first one seen.
    fn representative(&self) -> String {
        self.variants
            .ranking()
            .entries()
            .first()
            .map(|e| e.label.clone())
            .unwrap_or_default()
    }
}

fn strip_possessive(token: &str) -> &str {
    match token.len().checked_sub(2) {
        Some(cut) if token.is_char_boundary(cut) && token[cut..].eq_ignore_ascii_case("'s") => {
            &token[..cut]
        }
        _ => token,
    }
}

/// The token as counted, or `None` when it is dropped.
fn normalize_token(token: &str) -> Option<&str> {
    let token = strip_possessive(token);
    if token.is_empty() || token.chars().all(|c| c.is_numeric()) {
        return None;
    }
    if stopwords().contains(token.to_lowercase().as_str()) {
        return None;
    }
    Some(token)
}

/// Rank the words of `texts` for a word cloud, at most `max_words` of them.
pub fn word_frequencies<I, S>(texts: I, max_words: usize) -> Vec<WordWeight>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, WordGroup> = HashMap::new();

    for text in texts {
        for m in token_pattern().find_iter(text.as_ref()) {
            let Some(token) = normalize_token(m.as_str()) else {
                continue;
            };
            let key = token.to_lowercase();
            let group = groups.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                WordGroup {
                    variants: FrequencyTable::new(),
                    total: 0,
                }
            });
            group.variants.add(token);
            group.total += 1;
        }
    }

    // Fold "squats" into "squat" when both occur
    for key in &order {
        if !key.ends_with('s') || key.ends_with("ss") {
            continue;
        }
        let singular = &key[..key.len() - 1];
        if !groups.contains_key(singular) {
            continue;
        }
        if let Some(plural) = groups.remove(key) {
            if let Some(group) = groups.get_mut(singular) {
                // Each plural spelling counts toward its own singular spelling
                for entry in plural.variants.entries() {
                    let spelling = &entry.label[..entry.label.len() - 1];
                    group.variants.add_many(spelling, entry.count);
                }
                group.total += plural.total;
            }
        }
    }

    let mut table = FrequencyTable::new();
    for key in &order {
        if let Some(group) = groups.get(key) {
            table.add_many(&group.representative(), group.total);
        }
    }

    let ranking = match table.top(max_words) {
        Ok(ranking) => ranking,
        Err(_) => return Vec::new(),
    };
    let max = ranking.entries().first().map(|e| e.count).unwrap_or(0);

    ranking
        .into_iter()
        .map(|entry| WordWeight {
            weight: entry.count as f64 / max as f64,
            word: entry.label,
            count: entry.count,
        })
        .collect()
}
