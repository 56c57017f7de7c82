//! Italian tempo markings and BPM text entry.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::transport::{MAX_BPM, MIN_BPM};

/// Conventional tempo name for a BPM range.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TempoMarking {
    Larghissimo,
    Grave,
    Largo,
    Lento,
    Adagio,
    Andante,
    Moderato,
    Allegro,
    Vivace,
    Presto,
    Prestissimo,
    /// Non-positive or non-numeric input
    Invalid,
}

/// Inclusive upper bound of each marking, ascending. Anything above the last
/// bound is Prestissimo.
const MARKINGS: [(u32, TempoMarking); 10] = [
    (24, TempoMarking::Larghissimo),
    (40, TempoMarking::Grave),
    (60, TempoMarking::Largo),
    (66, TempoMarking::Lento),
    (76, TempoMarking::Adagio),
    (108, TempoMarking::Andante),
    (120, TempoMarking::Moderato),
    (156, TempoMarking::Allegro),
    (176, TempoMarking::Vivace),
    (200, TempoMarking::Presto),
];

impl TempoMarking {
    pub fn name(&self) -> &'static str {
        match self {
            TempoMarking::Larghissimo => "Larghissimo",
            TempoMarking::Grave => "Grave",
            TempoMarking::Largo => "Largo",
            TempoMarking::Lento => "Lento",
            TempoMarking::Adagio => "Adagio",
            TempoMarking::Andante => "Andante",
            TempoMarking::Moderato => "Moderato",
            TempoMarking::Allegro => "Allegro",
            TempoMarking::Vivace => "Vivace",
            TempoMarking::Presto => "Presto",
            TempoMarking::Prestissimo => "Prestissimo",
            TempoMarking::Invalid => "Invalid BPM",
        }
    }

    pub fn is_valid(&self) -> bool {
        *self != TempoMarking::Invalid
    }
}

impl fmt::Display for TempoMarking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name the tempo: the first marking whose upper bound is >= `bpm`.
pub fn tempo_marking(bpm: impl Into<f64>) -> TempoMarking {
    let bpm = bpm.into();
    if !bpm.is_finite() || bpm <= 0.0 {
        return TempoMarking::Invalid;
    }
    MARKINGS
        .iter()
        .find(|(limit, _)| bpm <= *limit as f64)
        .map(|(_, marking)| *marking)
        .unwrap_or(TempoMarking::Prestissimo)
}

/// Parse a typed tempo from its leading integer, so `"120bpm"` reads as 120
/// and `"12.5"` as 12. Returns `None` when there is no leading integer or it
/// is out of range; the caller keeps its last valid tempo.
pub fn parse_bpm_input(text: &str) -> Option<u32> {
    let text = text.trim_start();
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let sign_len = text.len() - unsigned.len();
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }
    // Anything longer than this is out of range anyway
    let bpm: i64 = text[..sign_len + digits.min(6)].parse().ok()?;
    (MIN_BPM as i64..=MAX_BPM as i64)
        .contains(&bpm)
        .then_some(bpm as u32)
}
