//! Per-call acceptance sets.
//!
//! Before every scanner call the host computes which token kinds the grammar
//! accepts at the current position. A scanner must never claim a kind
//! outside that set; most resolvers are gated on membership before they
//! look at any input.

use std::fmt;
use std::marker::PhantomData;

/// A fieldless token enum usable in a [`ValidSymbols`] set.
///
/// `ALL` lists every kind in index order, so `ALL[k.index()] == k`.
pub trait TokenKind: Copy + Eq + fmt::Debug + 'static {
    /// Every kind, in index order. At most 64 entries.
    const ALL: &'static [Self];

    /// Dense index of this kind, `0..ALL.len()`.
    fn index(self) -> usize;

    /// Inverse of [`index()`](Self::index).
    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Set of token kinds the grammar accepts at one position.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidSymbols<K> {
    bits: u64,
    _kind: PhantomData<K>,
}

impl<K: TokenKind> ValidSymbols<K> {
    const fn from_bits(bits: u64) -> Self {
        ValidSymbols {
            bits,
            _kind: PhantomData,
        }
    }

    #[inline]
    fn bit(kind: K) -> u64 {
        let index = kind.index();
        debug_assert!(index < 64, "token index {index} exceeds set width");
        1 << index
    }

    /// No kind accepted.
    pub const fn empty() -> Self {
        Self::from_bits(0)
    }

    /// Every kind accepted.
    pub fn all() -> Self {
        K::ALL.iter().copied().collect()
    }

    /// Build a set from a host's boolean table, indexed by
    /// [`TokenKind::index()`]. Entries past the last kind are ignored.
    pub fn from_flags(flags: &[bool]) -> Self {
        flags
            .iter()
            .zip(K::ALL)
            .filter(|(accepted, _)| **accepted)
            .map(|(_, kind)| *kind)
            .collect()
    }

    #[inline]
    pub fn contains(self, kind: K) -> bool {
        self.bits & Self::bit(kind) != 0
    }

    /// Returns `true` if any of `kinds` is accepted.
    pub fn contains_any(self, kinds: &[K]) -> bool {
        kinds.iter().any(|&kind| self.contains(kind))
    }

    #[must_use]
    pub fn with(self, kind: K) -> Self {
        Self::from_bits(self.bits | Self::bit(kind))
    }

    #[must_use]
    pub fn without(self, kind: K) -> Self {
        Self::from_bits(self.bits & !Self::bit(kind))
    }

    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Accepted kinds, in index order.
    pub fn iter(self) -> impl Iterator<Item = K> {
        K::ALL.iter().copied().filter(move |&kind| self.contains(kind))
    }
}

impl<K: TokenKind> Default for ValidSymbols<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K: TokenKind> FromIterator<K> for ValidSymbols<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let bits = iter.into_iter().fold(0, |bits, kind| bits | Self::bit(kind));
        Self::from_bits(bits)
    }
}

impl<K: TokenKind> From<&[K]> for ValidSymbols<K> {
    fn from(kinds: &[K]) -> Self {
        kinds.iter().copied().collect()
    }
}

impl<K: TokenKind, const N: usize> From<[K; N]> for ValidSymbols<K> {
    fn from(kinds: [K; N]) -> Self {
        kinds.into_iter().collect()
    }
}

impl<K: TokenKind> fmt::Debug for ValidSymbols<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
