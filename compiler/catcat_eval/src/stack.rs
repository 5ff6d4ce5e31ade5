//! The operand stack.

use std::fmt;

use catcat_ir::Word;

use crate::errors::{stack_overflow, EvalResult};

/// Default number of words the operand stack holds.
pub const DEFAULT_STACK_CAPACITY: usize = 256;

/// Bounded LIFO of owned words, shared by every nested call of one run.
///
/// Pushing past capacity is an error; popping never panics. Multi-word pops
/// check the length first and leave the stack untouched when too few words
/// are present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stack {
    words: Vec<Word>,
    capacity: usize,
}

impl Stack {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_STACK_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            words: Vec::new(),
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Push a word, failing once the stack is full.
    pub fn push(&mut self, word: Word) -> EvalResult {
        if self.words.len() >= self.capacity {
            return Err(stack_overflow(self.capacity));
        }
        self.words.push(word);
        Ok(())
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Word> {
        self.words.pop()
    }

    /// The topmost word, if any.
    #[inline]
    pub fn peek(&self) -> Option<&Word> {
        self.words.last()
    }

    /// The top `n` words, bottom to top, without popping.
    pub fn peek_n(&self, n: usize) -> Option<&[Word]> {
        let split = self.words.len().checked_sub(n)?;
        self.words.get(split..)
    }

    /// Pop `n` words, topmost first. `None` (stack unchanged) if fewer than
    /// `n` are present.
    pub fn pop_n(&mut self, n: usize) -> Option<Vec<Word>> {
        let split = self.words.len().checked_sub(n)?;
        let mut popped = self.words.split_off(split);
        popped.reverse();
        Some(popped)
    }

    /// Fixed-size form of [`pop_n`](Self::pop_n): `[top, below-top, ...]`.
    pub fn pop_array<const N: usize>(&mut self) -> Option<[Word; N]> {
        if self.words.len() < N {
            return None;
        }
        self.pop_n(N)?.try_into().ok()
    }

    /// Words bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Word> + ExactSizeIterator {
        self.words.iter()
    }

    pub fn as_slice(&self) -> &[Word] {
        &self.words
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

/// `[ w1 w2 ... ]`, bottom to top, the `prints` rendering.
impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[ ")?;
        for word in &self.words {
            write!(f, "{word} ")?;
        }
        f.write_str("]")
    }
}
