//! Compass quadrant taxonomy and flair tallying.
//!
//! This module contains the ten fixed categories every flair maps to,
//! the classifier that performs that mapping, and the fixed-size tally
//! that accumulates classification results.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One of the ten fixed compass categories.
///
/// The declaration order is load-bearing: `index()` values 0-9 follow it,
/// and tallies, metric vectors, and diagram patches all share that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    /// Dead center of the compass.
    Centrist,
    /// Top edge.
    Auth,
    /// Top-left corner.
    AuthLeft,
    /// Left edge.
    Left,
    /// Bottom-left corner.
    LibLeft,
    /// Bottom edge.
    Lib,
    /// Bottom-right corner.
    LibRight,
    /// Right edge.
    Right,
    /// Top-right corner.
    AuthRight,
    /// No flair set.
    Unflaired,
}

/// A flair string that matches none of the known aliases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("flair {0:?} unknown")]
pub struct UnknownFlair(pub String);

impl Quadrant {
    /// Number of quadrants; the length of every per-quadrant array.
    pub const COUNT: usize = 10;

    /// All quadrants in index order.
    pub const ALL: [Quadrant; Self::COUNT] = [
        Quadrant::Centrist,
        Quadrant::Auth,
        Quadrant::AuthLeft,
        Quadrant::Left,
        Quadrant::LibLeft,
        Quadrant::Lib,
        Quadrant::LibRight,
        Quadrant::Right,
        Quadrant::AuthRight,
        Quadrant::Unflaired,
    ];

    /// Stable index of this quadrant (0-9).
    pub fn index(self) -> usize {
        match self {
            Quadrant::Centrist => 0,
            Quadrant::Auth => 1,
            Quadrant::AuthLeft => 2,
            Quadrant::Left => 3,
            Quadrant::LibLeft => 4,
            Quadrant::Lib => 5,
            Quadrant::LibRight => 6,
            Quadrant::Right => 7,
            Quadrant::AuthRight => 8,
            Quadrant::Unflaired => 9,
        }
    }

    /// Human-readable name, as used for diagram callouts.
    pub fn name(self) -> &'static str {
        match self {
            Quadrant::Centrist => "Centrist",
            Quadrant::Auth => "Authoritarian",
            Quadrant::AuthLeft => "AuthLeft",
            Quadrant::Left => "Left",
            Quadrant::LibLeft => "LibLeft",
            Quadrant::Lib => "Liberal",
            Quadrant::LibRight => "LibRight",
            Quadrant::Right => "Right",
            Quadrant::AuthRight => "AuthRight",
            Quadrant::Unflaired => "Unflaired",
        }
    }

    /// Patch fill color as an RGB triple.
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Quadrant::Centrist => (0xc3, 0xc3, 0xc3),
            Quadrant::Auth => (0xa1, 0x90, 0xba),
            Quadrant::AuthLeft => (0xff, 0x75, 0x75),
            Quadrant::Left => (0xcd, 0xb1, 0x87),
            Quadrant::LibLeft => (0x9a, 0xed, 0x98),
            Quadrant::Lib => (0xc8, 0xf1, 0x85),
            Quadrant::LibRight => (0xf5, 0xf4, 0x71),
            Quadrant::Right => (0x9c, 0xcf, 0xb8),
            Quadrant::AuthRight => (0x42, 0xaa, 0xff),
            Quadrant::Unflaired => (0x3c, 0x3c, 0x3c),
        }
    }

    /// Classify a raw flair string.
    ///
    /// `None` (no flair set) maps to [`Quadrant::Unflaired`], as do the
    /// placeholder strings some communities assign instead of a real flair.
    /// Emoji flairs like `:centrist: - Grand Centrist` classify by the token
    /// between the first two colons. Anything else is an error.
    pub fn from_flair(flair: Option<&str>) -> Result<Self, UnknownFlair> {
        let Some(text) = flair else {
            return Ok(Quadrant::Unflaired);
        };

        // Token between the first two colons, when there are at least two.
        let mut parts = text.splitn(3, ':');
        let token = match (parts.next(), parts.next(), parts.next()) {
            (_, Some(inner), Some(_)) => inner,
            _ => text,
        };

        match token {
            "centrist" | "CENTG" => Ok(Quadrant::Centrist),
            "auth" => Ok(Quadrant::Auth),
            "authleft" => Ok(Quadrant::AuthLeft),
            "left" => Ok(Quadrant::Left),
            "libleft" => Ok(Quadrant::LibLeft),
            "lib" => Ok(Quadrant::Lib),
            "libright" | "libright2" => Ok(Quadrant::LibRight),
            "right" => Ok(Quadrant::Right),
            "authright" => Ok(Quadrant::AuthRight),
            "" | "Undecided/Exploring" | "user_flair_PolComp" | "\u{200e}" => {
                Ok(Quadrant::Unflaired)
            }
            _ => Err(UnknownFlair(text.to_string())),
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Per-quadrant occurrence counts.
///
/// Fixed length, accumulation only. The sum always equals the number of
/// flairs recorded into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally([u64; Quadrant::COUNT]);

impl Tally {
    /// An empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of a quadrant.
    pub fn record(&mut self, quadrant: Quadrant) {
        self.0[quadrant.index()] += 1;
    }

    /// Count for a single quadrant.
    #[allow(dead_code)] // Utility accessor
    pub fn count(&self, quadrant: Quadrant) -> u64 {
        self.0[quadrant.index()]
    }

    /// All counts in index order.
    #[allow(dead_code)] // Utility accessor
    pub fn counts(&self) -> &[u64; Quadrant::COUNT] {
        &self.0
    }

    /// Total number of recorded flairs.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// Each quadrant's share of the total, in index order.
    ///
    /// All zeros when the tally is empty.
    pub fn fractions(&self) -> [f64; Quadrant::COUNT] {
        let total = self.total();
        let mut fractions = [0.0; Quadrant::COUNT];
        if total == 0 {
            return fractions;
        }
        for (fraction, &count) in fractions.iter_mut().zip(self.0.iter()) {
            *fraction = count as f64 / total as f64;
        }
        fractions
    }

    /// Tally a sequence of raw flair strings (`None` = no flair set).
    pub fn from_flairs<'a, I>(flairs: I) -> Result<Self, UnknownFlair>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut tally = Self::new();
        for flair in flairs {
            tally.record(Quadrant::from_flair(flair)?);
        }
        Ok(tally)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_indices() {
        let cases = [
            ("centrist", 0),
            ("CENTG", 0),
            ("auth", 1),
            ("authleft", 2),
            ("left", 3),
            ("libleft", 4),
            ("lib", 5),
            ("libright", 6),
            ("libright2", 6),
            ("right", 7),
            ("authright", 8),
            ("", 9),
            ("Undecided/Exploring", 9),
            ("user_flair_PolComp", 9),
            ("\u{200e}", 9),
        ];
        for (flair, index) in cases {
            assert_eq!(
                Quadrant::from_flair(Some(flair)).unwrap().index(),
                index,
                "flair {flair:?}"
            );
        }
    }

    #[test]
    fn test_absent_flair_is_unflaired() {
        assert_eq!(Quadrant::from_flair(None).unwrap(), Quadrant::Unflaired);
    }

    #[test]
    fn test_emoji_flair_classifies_by_inner_token() {
        assert_eq!(
            Quadrant::from_flair(Some(":libright: - Gadsden Enjoyer")).unwrap(),
            Quadrant::LibRight
        );
        assert_eq!(
            Quadrant::from_flair(Some(":CENTG: - Grand Inquisitor")).unwrap(),
            Quadrant::Centrist
        );
        // A single colon is not emoji syntax; the full string must match.
        assert!(Quadrant::from_flair(Some("libright: custom")).is_err());
    }

    #[test]
    fn test_unknown_flair_errors() {
        for flair in ["monarchist", "LibRight", " left", "auth "] {
            let err = Quadrant::from_flair(Some(flair)).unwrap_err();
            assert_eq!(err, UnknownFlair(flair.to_string()));
        }
    }

    #[test]
    fn test_unknown_flair_error_carries_full_text() {
        let err = Quadrant::from_flair(Some(":flatearth: - Disc Gang")).unwrap_err();
        assert_eq!(err.0, ":flatearth: - Disc Gang");
    }

    #[test]
    fn test_all_in_index_order() {
        for (index, quadrant) in Quadrant::ALL.iter().enumerate() {
            assert_eq!(quadrant.index(), index);
        }
    }

    #[test]
    fn test_tally_sum_equals_input_count() {
        let flairs = vec![
            Some("left"),
            Some("left"),
            Some("authright"),
            None,
            Some(""),
            Some(":lib: - Friedmanite"),
        ];
        let tally = Tally::from_flairs(flairs).unwrap();
        assert_eq!(tally.total(), 6);
        assert_eq!(tally.count(Quadrant::Left), 2);
        assert_eq!(tally.count(Quadrant::AuthRight), 1);
        assert_eq!(tally.count(Quadrant::Lib), 1);
        assert_eq!(tally.count(Quadrant::Unflaired), 2);
    }

    #[test]
    fn test_tally_aborts_on_unknown_flair() {
        let flairs = vec![Some("left"), Some("juche")];
        assert!(Tally::from_flairs(flairs).is_err());
    }

    #[test]
    fn test_fractions() {
        let tally = Tally::from_flairs(vec![Some("left"), Some("left"), Some("right"), None])
            .unwrap();
        let fractions = tally.fractions();
        assert_eq!(fractions[Quadrant::Left.index()], 0.5);
        assert_eq!(fractions[Quadrant::Right.index()], 0.25);
        assert_eq!(fractions[Quadrant::Unflaired.index()], 0.25);
        assert_eq!(fractions[Quadrant::Centrist.index()], 0.0);
    }

    #[test]
    fn test_fractions_of_empty_tally_are_zero() {
        let fractions = Tally::new().fractions();
        assert!(fractions.iter().all(|&f| f == 0.0));
    }
}
