//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.


use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Every char in this set becomes a token on its own.
pub const PUNCTUATION: [char; 32] = [
    '~', '`', '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '{', '}', '[', ']', ';', ':',
    '"', '\'', '<', ',', '.', '>', '?', '/', '\\', '|', '-', '_', '+', '=',
];

/// Returns true if [c] is split off as a token of its own.
#[inline]
pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

/// A punctuation aware whitespace tokenizer.
///
/// The text is expected to be lower cased and normalized already.
/// Punctuation chars are surrounded by a boundary, runs of whitespace collapse
/// to a single boundary and the text is split at every boundary.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tokenizer;

impl Tokenizer {
    pub const fn new() -> Self {
        Self
    }

    /// Tokenizes the [text].
    pub fn tokenize(&self, text: &str) -> TokenSequence {
        let mut spaced = String::with_capacity(text.len() + text.len() / 4);
        let mut last_was_boundary = false;
        for c in text.chars() {
            if is_punctuation(c) {
                if !last_was_boundary {
                    spaced.push(' ');
                }
                spaced.push(c);
                spaced.push(' ');
                last_was_boundary = true;
            } else if c.is_whitespace() {
                if !last_was_boundary {
                    spaced.push(' ');
                }
                last_was_boundary = true;
            } else {
                spaced.push(c);
                last_was_boundary = false;
            }
        }
        TokenSequence { spaced }
    }
}

/// The tokens of a single text.
///
/// The sequence can be iterated as often as necessary. The raw iteration may
/// contain empty tokens at the leading and trailing boundaries, use [TokenSequence::words]
/// to skip them.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TokenSequence {
    spaced: String,
}

impl TokenSequence {
    /// Iterates all tokens, including empty ones.
    pub fn iter(&self) -> std::str::Split<'_, char> {
        self.spaced.split(' ')
    }

    /// Iterates all non-empty tokens.
    pub fn words(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.iter().filter(|value| !value.is_empty())
    }

    /// The number of non-empty tokens.
    pub fn word_count(&self) -> usize {
        self.words().count()
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a str;
    type IntoIter = std::str::Split<'a, char>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for TokenSequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.spaced)
    }
}

#[cfg(test)]
mod test {
    use crate::tokenizer::Tokenizer;
    use itertools::Itertools;

    #[test]
    fn splits_punctuation_into_own_tokens() {
        let tokens = Tokenizer.tokenize("hello, world!");
        assert_eq!(
            vec!["hello", ",", "world", "!", ""],
            tokens.iter().collect_vec()
        );
        assert_eq!(
            vec!["hello", ",", "world", "!"],
            tokens.words().collect_vec()
        );
    }

    #[test]
    fn collapses_whitespace() {
        let tokens = Tokenizer.tokenize("  a \n\n\t b\r\nc  ");
        assert_eq!(vec!["", "a", "b", "c", ""], tokens.iter().collect_vec());
        assert_eq!(3, tokens.word_count());
    }

    #[test]
    fn pre_tokenized_text_is_unchanged() {
        let text = "the quick brown fox jumps over the lazy dog";
        let tokens = Tokenizer.tokenize(text);
        assert_eq!(text.split(' ').collect_vec(), tokens.words().collect_vec());
        assert_eq!(text, tokens.to_string());
    }

    #[test]
    fn every_punctuation_char_is_split() {
        for c in super::PUNCTUATION {
            let text = format!("a{c}b");
            let expected = vec!["a".to_string(), c.to_string(), "b".to_string()];
            assert_eq!(
                expected,
                Tokenizer.tokenize(&text).words().map(str::to_string).collect_vec(),
                "Failed for {c:?}"
            );
        }
    }

    #[test]
    fn adjacent_punctuation() {
        let tokens = Tokenizer.tokenize("wait...what?!");
        assert_eq!(
            vec!["wait", ".", ".", ".", "what", "?", "!"],
            tokens.words().collect_vec()
        );
    }

    #[test]
    fn empty_text() {
        let tokens = Tokenizer.tokenize("");
        assert_eq!(0, tokens.word_count());
        assert_eq!(vec![""], tokens.iter().collect_vec());
    }

    #[test]
    fn is_restartable_and_deterministic() {
        let text = "şu an, ğüzel bir gün.";
        let tokens = Tokenizer.tokenize(text);
        let first = tokens.words().collect_vec();
        let second = tokens.words().collect_vec();
        assert_eq!(first, second);
        assert_eq!(tokens, Tokenizer.tokenize(text));
        assert_eq!(vec!["şu", "an", ",", "ğüzel", "bir", "gün", "."], first);
    }
}
