//! Functions: named definitions and anonymous blocks.

use crate::Word;

/// Name rendered for anonymous functions.
pub const LAMBDA_NAME: &str = "[lambda]";

/// An ordered, growable list of words; insertion order is execution order.
///
/// Top-level definitions carry a name. Blocks (`[ ... ]` in source) are
/// anonymous.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Function {
    name: Option<String>,
    words: Vec<Word>,
}

impl Function {
    /// An empty named function.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            words: Vec::new(),
        }
    }

    /// An empty anonymous function.
    pub fn lambda() -> Self {
        Self::default()
    }

    /// A named function with the given body.
    pub fn with_body(name: impl Into<String>, words: impl IntoIterator<Item = Word>) -> Self {
        Self {
            name: Some(name.into()),
            words: words.into_iter().collect(),
        }
    }

    /// An anonymous function with the given body.
    pub fn block(words: impl IntoIterator<Item = Word>) -> Self {
        Self {
            name: None,
            words: words.into_iter().collect(),
        }
    }

    /// The definition name, or [`LAMBDA_NAME`] for blocks.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(LAMBDA_NAME)
    }

    #[inline]
    pub fn is_anonymous(&self) -> bool {
        self.name.is_none()
    }

    #[inline]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[inline]
    pub fn into_words(self) -> Vec<Word> {
        self.words
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Append a word.
    pub fn push(&mut self, word: Word) {
        self.words.push(word);
    }

    /// Insert a word before all others.
    pub fn prepend(&mut self, word: Word) {
        self.words.insert(0, word);
    }

    /// Append every word of `other`, keeping their order.
    pub fn extend(&mut self, other: impl IntoIterator<Item = Word>) {
        self.words.extend(other);
    }

    /// Builder form of [`push`](Self::push).
    #[must_use]
    pub fn then(mut self, word: Word) -> Self {
        self.push(word);
        self
    }

    /// Every defined-function name referenced in this body, nested blocks
    /// included, in first-occurrence order.
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        collect_references(&self.words, &mut names);
        names
    }
}

fn collect_references<'a>(words: &'a [Word], names: &mut Vec<&'a str>) {
    for word in words {
        match word {
            Word::Block(block) => collect_references(block.words(), names),
            Word::Function(crate::FunctionRef::Defined(name)) => {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
            Word::Value(_) | Word::Function(_) => {}
        }
    }
}
