use regex::Regex;

use super::error::SegmentResult;

/// Contraction expansions, applied in order after sentence casing. Only the
/// lowercase spellings are listed; `i'm` is the one form restored to mixed
/// case instead of being expanded.
const CONTRACTIONS: &[(&str, &str)] = &[
    (r"\bi'm\b", "I'm"),
    (r"\bcan't\b", "cannot"),
    (r"\bwon't\b", "will not"),
    (r"\b(\w+)'ll\b", "${1} will"),
    (r"\b(\w+)'ve\b", "${1} have"),
    (r"\b(\w+)'re\b", "${1} are"),
    (r"\b(\w+)'d\b", "${1} would"),
    (r"\b(\w+)'s\b", "${1} is"),
];

/// Cleans raw page text: whitespace collapse, one sentence per line, sentence
/// casing and contraction expansion.
///
/// The transformation is deterministic but not idempotent. Sentence casing
/// lower-cases everything after the first character of a sentence, so running
/// the normalizer over its own output can still change it.
#[derive(Debug)]
pub struct TextNormalizer {
    line_breaks: Regex,
    sentence_end: Regex,
    contractions: Vec<(Regex, &'static str)>,
}

impl TextNormalizer {
    pub fn new() -> SegmentResult<Self> {
        let mut contractions = Vec::with_capacity(CONTRACTIONS.len());
        for (pattern, replacement) in CONTRACTIONS {
            contractions.push((Regex::new(pattern)?, *replacement));
        }

        Ok(Self {
            line_breaks: Regex::new(r"[\t\n]+")?,
            sentence_end: Regex::new(r"([.!?]) +")?,
            contractions,
        })
    }

    pub fn normalize(&self, raw_text: &str) -> String {
        if raw_text.is_empty() {
            return String::new();
        }

        let spaced = self.line_breaks.replace_all(raw_text, " ");
        let collapsed = spaced.split_whitespace().collect::<Vec<&str>>().join(" ");
        let broken = self.sentence_end.replace_all(&collapsed, "${1}\n");

        let mut normalized = broken
            .split('\n')
            .map(|sentence| sentence_case(sentence.trim()))
            .collect::<Vec<String>>()
            .join("\n");

        for (pattern, replacement) in &self.contractions {
            if let std::borrow::Cow::Owned(replaced) = pattern.replace_all(&normalized, *replacement)
            {
                normalized = replaced;
            }
        }

        normalized
    }
}

/// Upper-cases the first character and lower-cases the rest.
fn sentence_case(sentence: &str) -> String {
    let mut chars = sentence.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
