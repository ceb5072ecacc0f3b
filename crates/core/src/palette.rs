//! The set of candy colors a game draws from.

use arrayvec::ArrayVec;

use crate::error::ConfigError;
use crate::rng::SimpleRng;
use crate::types::{CandyKind, CANDY_KINDS};

/// Ordered, non-empty, duplicate-free set of candy kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Palette {
    kinds: ArrayVec<CandyKind, CANDY_KINDS>,
}

impl Palette {
    pub fn new(kinds: &[CandyKind]) -> Result<Self, ConfigError> {
        if kinds.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        let mut out = ArrayVec::new();
        for &kind in kinds {
            if out.contains(&kind) {
                return Err(ConfigError::DuplicateColor(kind.as_char()));
            }
            // Cannot overflow: duplicates are rejected and there are only CANDY_KINDS kinds.
            out.push(kind);
        }
        Ok(Self { kinds: out })
    }

    /// All six kinds.
    pub fn classic() -> Self {
        Self {
            kinds: CandyKind::ALL.into_iter().collect(),
        }
    }

    /// Parse from board letters, e.g. `"roygbp"`.
    pub fn parse(letters: &str) -> Result<Self, ConfigError> {
        let mut kinds = Vec::with_capacity(CANDY_KINDS);
        for ch in letters.chars().filter(|c| !c.is_whitespace()) {
            kinds.push(CandyKind::from_char(ch).ok_or(ConfigError::InvalidColor(ch))?);
        }
        Self::new(&kinds)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn kinds(&self) -> &[CandyKind] {
        &self.kinds
    }

    pub fn contains(&self, kind: CandyKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Draw one kind uniformly at random.
    pub fn pick(&self, rng: &mut SimpleRng) -> CandyKind {
        self.kinds[rng.next_range(self.kinds.len() as u32) as usize]
    }

    pub fn letters(&self) -> String {
        self.kinds.iter().map(|k| k.as_char()).collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::classic()
    }
}
