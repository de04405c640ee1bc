//! Read/write/delete capability letters.
//!
//! A grant may narrow what its holder can do on a resource type with an
//! `rwd` string: any subset of the letters `r`, `w` and `d`.
//!
//! ```text
//! rwd absent   → full access
//! rwd = "rw"   → read + write, no delete
//! rwd = ""     → nothing
//! ```
//!
//! [`Rwd`] is the parsed form of that string.
//!
//! # Example
//!
//! ```
//! use cms_auth::Rwd;
//!
//! let rw = Rwd::from_letters("rw");
//! assert!(rw.contains(Rwd::READ));
//! assert!(!rw.contains(Rwd::DELETE));
//! assert_eq!(rw.to_string(), "rw");
//! ```

use bitflags::bitflags;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Set of capability letters held by a grant.
    ///
    /// | Flag | Letter | Operations |
    /// |------|--------|------------|
    /// | [`READ`](Self::READ) | `r` | get, list |
    /// | [`WRITE`](Self::WRITE) | `w` | create, update, install |
    /// | [`DELETE`](Self::DELETE) | `d` | delete |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Rwd: u8 {
        /// `r`
        const READ   = 0b001;
        /// `w`
        const WRITE  = 0b010;
        /// `d`
        const DELETE = 0b100;
    }
}

impl Rwd {
    /// Every letter; what an absent `rwd` means.
    pub const FULL: Self = Self::READ.union(Self::WRITE).union(Self::DELETE);

    /// Maps a single letter to its flag.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'r' => Some(Self::READ),
            'w' => Some(Self::WRITE),
            'd' => Some(Self::DELETE),
            _ => None,
        }
    }

    /// Parses an `rwd` string, returning the flags and any unknown letters.
    ///
    /// Letters are case-sensitive, matching how grants are stored.
    ///
    /// ```
    /// use cms_auth::Rwd;
    ///
    /// let (rwd, unknown) = Rwd::parse("rxd");
    /// assert_eq!(rwd, Rwd::READ | Rwd::DELETE);
    /// assert_eq!(unknown, vec!['x']);
    /// ```
    #[must_use]
    pub fn parse(letters: &str) -> (Self, Vec<char>) {
        let mut rwd = Self::empty();
        let mut unknown = Vec::new();
        for letter in letters.chars() {
            match Self::from_letter(letter) {
                Some(flag) => rwd |= flag,
                None => unknown.push(letter),
            }
        }
        (rwd, unknown)
    }

    /// Parses an `rwd` string, ignoring unknown letters.
    #[must_use]
    pub fn from_letters(letters: &str) -> Self {
        Self::parse(letters).0
    }

    /// Returns the canonical letter string (`r`, `w`, `d` in that order).
    #[must_use]
    pub fn letters(self) -> String {
        let mut out = String::with_capacity(3);
        if self.contains(Self::READ) {
            out.push('r');
        }
        if self.contains(Self::WRITE) {
            out.push('w');
        }
        if self.contains(Self::DELETE) {
            out.push('d');
        }
        out
    }
}

impl std::fmt::Display for Rwd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "(none)")
        } else {
            f.write_str(&self.letters())
        }
    }
}

impl Serialize for Rwd {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.letters())
    }
}

impl<'de> Deserialize<'de> for Rwd {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LettersVisitor;

        impl Visitor<'_> for LettersVisitor {
            type Value = Rwd;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a string of r/w/d letters")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Rwd, E> {
                let (rwd, unknown) = Rwd::parse(v);
                if !unknown.is_empty() {
                    tracing::debug!(rwd = v, ?unknown, "ignoring unknown rwd letters");
                }
                Ok(rwd)
            }
        }

        deserializer.deserialize_str(LettersVisitor)
    }
}
