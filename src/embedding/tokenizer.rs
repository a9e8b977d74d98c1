//! Word tokenization with English stop-word removal.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid regex"));

/// English stop words dropped before weighting.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Splits text into lowercase terms of two or more word characters,
/// skipping stop words.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    token_regex: &'static Regex,
    stop_words: HashSet<&'static str>,
}

impl Tokenizer {
    pub fn new() -> Self {
        let token_regex = &*TOKEN_PATTERN;
        let stop_words = ENGLISH_STOP_WORDS.iter().copied().collect();

        Self {
            token_regex,
            stop_words,
        }
    }

    /// Tokenize text, keeping repeated terms in order of appearance.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.token_regex
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|term| !self.stop_words.contains(term))
            .map(str::to_string)
            .collect()
    }

    /// Whether a term is on the stop-word list.
    pub fn is_stop_word(&self, term: &str) -> bool {
        self.stop_words.contains(term)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_drops_stop_words() {
        let tokenizer = Tokenizer::new();
        assert_eq!(
            tokenizer.tokenize("The Weather is NICE today"),
            vec!["weather", "nice", "today"]
        );
    }

    #[test]
    fn test_single_characters_and_punctuation_are_skipped() {
        let tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.tokenize("I love cats!!! :) x"), vec!["love", "cats"]);
    }

    #[test]
    fn test_repeats_are_kept() {
        let tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.tokenize("cats, cats, cats"), vec!["cats", "cats", "cats"]);
    }

    #[test]
    fn test_tokenizers_share_one_compiled_pattern() {
        let first = Tokenizer::new();
        let second = first.clone();
        assert!(std::ptr::eq(first.token_regex, Tokenizer::new().token_regex));
        assert!(std::ptr::eq(first.token_regex, second.token_regex));
    }

    #[test]
    fn test_only_stop_words() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.tokenize("it is what it is").is_empty());
        assert!(tokenizer.is_stop_word("the"));
        assert!(!tokenizer.is_stop_word("cats"));
    }
}
