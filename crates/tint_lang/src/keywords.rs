//! Keyword groups and classification.
//!
//! A language declares an ordered list of keyword groups. Classification
//! walks the groups in declaration order and the first group containing the
//! lexeme wins, so earlier groups are more significant.
//!
//! # Lookup Strategy
//!
//! Each group picks its lookup strategy when the definition is built:
//! - [`KeywordLookup::BinarySearch`] for groups declared pre-sorted. The
//!   declared order is verified, so a mis-sorted table fails at load time
//!   instead of silently missing words at scan time.
//! - [`KeywordLookup::Hashed`] for unsorted groups.
//!
//! # Call-Form Keywords
//!
//! A word declared with a trailing `(` (e.g. `align(`) only matches when the
//! lexeme is directly followed by `(`. The bare and call forms of a word may
//! both be declared in the same group.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::DefinitionError;
use crate::kind::TokenKind;

/// How a keyword group is searched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeywordLookup {
    /// The group is declared in byte order; lookups use binary search.
    BinarySearch,
    /// Arbitrary order; lookups use a hash set.
    #[default]
    Hashed,
}

/// What to do when a word appears in more than one group.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DuplicatePolicy {
    /// Reject the definition.
    #[default]
    Reject,
    /// Accept it; the earliest group wins during classification.
    FirstWins,
}

/// Result of a successful keyword lookup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeywordMatch {
    /// Index of the matching group in declaration order.
    pub group: usize,
    /// Token kind of that group.
    pub kind: TokenKind,
}

#[derive(Clone, Debug)]
enum GroupIndex {
    Sorted {
        plain: Vec<Box<str>>,
        callable: Vec<Box<str>>,
    },
    Hashed {
        plain: FxHashSet<Box<str>>,
        callable: FxHashSet<Box<str>>,
    },
}

/// A named set of words sharing one token kind.
#[derive(Clone, Debug)]
pub struct KeywordGroup {
    name: Box<str>,
    kind: TokenKind,
    lookup: KeywordLookup,
    words: Vec<Box<str>>,
    index: GroupIndex,
}

impl KeywordGroup {
    /// Build and validate a group.
    pub fn new<I, S>(
        name: &str,
        kind: TokenKind,
        lookup: KeywordLookup,
        words: I,
    ) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<Box<str>> = words.into_iter().map(|w| w.as_ref().into()).collect();
        for word in &words {
            validate_word(name, word)?;
        }

        let index = match lookup {
            KeywordLookup::BinarySearch => {
                for pair in words.windows(2) {
                    match pair[0].cmp(&pair[1]) {
                        std::cmp::Ordering::Less => {}
                        std::cmp::Ordering::Equal => {
                            return Err(DefinitionError::DuplicateInGroup {
                                group: name.to_owned(),
                                word: pair[1].to_string(),
                            });
                        }
                        std::cmp::Ordering::Greater => {
                            return Err(DefinitionError::UnsortedGroup {
                                group: name.to_owned(),
                                previous: pair[0].to_string(),
                                word: pair[1].to_string(),
                            });
                        }
                    }
                }
                let (callable, plain): (Vec<Box<str>>, Vec<Box<str>>) =
                    words.iter().cloned().partition(|w| w.ends_with('('));
                // Stripping the paren can reorder neighbours like `a-(` / `a(`.
                let mut callable: Vec<Box<str>> =
                    callable.iter().map(|w| Box::from(strip_paren(w))).collect();
                callable.sort_unstable();
                GroupIndex::Sorted { plain, callable }
            }
            KeywordLookup::Hashed => {
                let mut plain = FxHashSet::default();
                let mut callable = FxHashSet::default();
                for word in &words {
                    let fresh = if word.ends_with('(') {
                        callable.insert(Box::from(strip_paren(word)))
                    } else {
                        plain.insert(word.clone())
                    };
                    if !fresh {
                        return Err(DefinitionError::DuplicateInGroup {
                            group: name.to_owned(),
                            word: word.to_string(),
                        });
                    }
                }
                GroupIndex::Hashed { plain, callable }
            }
        };

        Ok(KeywordGroup {
            name: name.into(),
            kind,
            lookup,
            words,
            index,
        })
    }

    /// Group name, for diagnostics and listings.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Token kind assigned to matching words.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// How the group is searched.
    pub fn lookup(&self) -> KeywordLookup {
        self.lookup
    }

    /// Words as declared, including call forms with their trailing `(`.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(AsRef::as_ref)
    }

    /// Number of declared words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether `word` belongs to this group. Call forms are only considered
    /// when `followed_by_paren` is set.
    #[inline]
    pub fn contains(&self, word: &str, followed_by_paren: bool) -> bool {
        match &self.index {
            GroupIndex::Sorted { plain, callable } => {
                (followed_by_paren && sorted_contains(callable, word))
                    || sorted_contains(plain, word)
            }
            GroupIndex::Hashed { plain, callable } => {
                (followed_by_paren && callable.contains(word)) || plain.contains(word)
            }
        }
    }
}

#[inline]
fn sorted_contains(words: &[Box<str>], word: &str) -> bool {
    words.binary_search_by(|w| w.as_ref().cmp(word)).is_ok()
}

fn strip_paren(word: &str) -> &str {
    word.strip_suffix('(').unwrap_or(word)
}

fn validate_word(group: &str, word: &str) -> Result<(), DefinitionError> {
    if word.is_empty() {
        return Err(DefinitionError::EmptyKeyword {
            group: group.to_owned(),
        });
    }
    let body = strip_paren(word);
    if body.is_empty() || body.contains(|c: char| c.is_whitespace() || c == '(') {
        return Err(DefinitionError::InvalidKeyword {
            group: group.to_owned(),
            word: word.to_owned(),
        });
    }
    Ok(())
}

/// Ordered keyword groups of one language.
#[derive(Clone, Debug, Default)]
pub struct KeywordTable {
    groups: Vec<KeywordGroup>,
}

impl KeywordTable {
    /// Build a table, checking for words declared in more than one group.
    pub fn new(groups: Vec<KeywordGroup>, policy: DuplicatePolicy) -> Result<Self, DefinitionError> {
        let mut owner: FxHashMap<&str, usize> = FxHashMap::default();
        for (i, group) in groups.iter().enumerate() {
            for word in group.words() {
                let Some(&first) = owner.get(word) else {
                    owner.insert(word, i);
                    continue;
                };
                match policy {
                    DuplicatePolicy::Reject => {
                        return Err(DefinitionError::DuplicateAcrossGroups {
                            word: word.to_owned(),
                            first: groups[first].name().to_owned(),
                            second: group.name().to_owned(),
                        });
                    }
                    DuplicatePolicy::FirstWins => {
                        tracing::debug!(
                            word,
                            first = groups[first].name(),
                            shadowed = group.name(),
                            "keyword shadowed by an earlier group"
                        );
                    }
                }
            }
        }
        Ok(KeywordTable { groups })
    }

    /// Classify a lexeme: the first group containing it wins.
    #[inline]
    pub fn classify(&self, word: &str, followed_by_paren: bool) -> Option<KeywordMatch> {
        self.groups
            .iter()
            .position(|g| g.contains(word, followed_by_paren))
            .map(|group| KeywordMatch {
                group,
                kind: self.groups[group].kind,
            })
    }

    /// Groups in declaration order.
    pub fn groups(&self) -> &[KeywordGroup] {
        &self.groups
    }

    /// Group at `index`, as reported by [`KeywordMatch::group`].
    pub fn group(&self, index: usize) -> Option<&KeywordGroup> {
        self.groups.get(index)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
