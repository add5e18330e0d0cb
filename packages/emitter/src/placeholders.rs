//! Deferred extends clauses.
//!
//! A derived type may be rendered before the descriptor of its base has been
//! seen, so its header carries a token that is swapped for the real clause in
//! one pass once the whole body exists.

use indexmap::{IndexMap, IndexSet};

const PLACEHOLDER_PREFIX: &str = "#{ExtendsPlaceholder_";
const PLACEHOLDER_SUFFIX: char = '}';

/// Token standing in for the extends clause of `base`
pub fn placeholder_token(base: &str) -> String {
    format!("{}{}{}", PLACEHOLDER_PREFIX, base, PLACEHOLDER_SUFFIX)
}

/// Base name -> extends clause text, e.g. `Entity` -> `extends Core.Entity `
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendsRegistry {
    entries: IndexMap<String, String>,
}

impl ExtendsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the clause for `base`. The first registration wins.
    pub fn register(&mut self, base: &str, clause: String) -> bool {
        if self.entries.contains_key(base) {
            return false;
        }
        self.entries.insert(base.to_string(), clause);
        true
    }

    pub fn get(&self, base: &str) -> Option<&str> {
        self.entries.get(base).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every registered token in `body` with its clause
    ///
    /// Tokens of bases listed in `unresolved` are removed instead, leaving a
    /// declaration without an extends clause. Text that merely looks like a
    /// token but names no registered base is left untouched.
    pub fn reconcile(&self, body: &str, unresolved: &IndexSet<String>) -> String {
        let mut output = String::with_capacity(body.len());
        let mut rest = body;

        while let Some(start) = rest.find(PLACEHOLDER_PREFIX) {
            output.push_str(&rest[..start]);
            let after = &rest[start + PLACEHOLDER_PREFIX.len()..];

            let Some(end) = after.find(PLACEHOLDER_SUFFIX) else {
                rest = &rest[start..];
                break;
            };

            let base = &after[..end];
            match self.entries.get(base) {
                Some(_) if unresolved.contains(base) => {}
                Some(clause) => output.push_str(clause),
                None => output.push_str(&rest[start..start + PLACEHOLDER_PREFIX.len() + end + 1]),
            }
            rest = &after[end + 1..];
        }

        output.push_str(rest);
        output
    }
}
