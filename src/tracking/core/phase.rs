//! Phase identifiers, tense, and date spans.
//!
//! - [`PhaseId`] is the per-day identifier: 0 means unregistered, positive
//!   values name active phases, negative values are reserved for a disabled
//!   state that no current operation produces.
//! - [`Tense`] classifies a phase as observed (Past) or projected (Future).
//! - [`DateSpan`] is a validated inclusive date range with day iteration.
//!
//! Notes
//! -----
//! - Phase display names are ordinals of the dense phase ordering
//!   (`0th`, `1st`, `2nd`, ...), produced by [`ordinal`].
use crate::tracking::errors::{TrackError, TrackResult};
use chrono::NaiveDate;

/// Per-day phase identifier.
///
/// Invariant: identifiers assigned by successive phase definitions are
/// strictly increasing; 0 always means "not yet part of any phase".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PhaseId(i32);

impl PhaseId {
    /// The identifier of dates that belong to no phase.
    pub const UNREGISTERED: PhaseId = PhaseId(0);

    /// Wrap a raw identifier value.
    pub const fn new(raw: i32) -> Self {
        PhaseId(raw)
    }

    /// The raw identifier value.
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether this identifier names an active phase.
    pub const fn is_active(self) -> bool {
        self.0 > 0
    }

    /// Whether this identifier marks the reserved disabled state.
    pub const fn is_disabled(self) -> bool {
        self.0 < 0
    }

    /// The next identifier in definition order.
    pub const fn next(self) -> PhaseId {
        PhaseId(self.0 + 1)
    }
}

/// Past/Future classification of a phase relative to the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tense {
    /// The phase starts on or before the reference date.
    Past,
    /// The phase starts after the reference date.
    Future,
}

impl std::fmt::Display for Tense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tense::Past => f.write_str("Past"),
            Tense::Future => f.write_str("Future"),
        }
    }
}

/// Inclusive date range.
///
/// Invariant: `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    /// Construct a validated span.
    ///
    /// # Errors
    /// - [`TrackError::InvertedSpan`] if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> TrackResult<Self> {
        if start > end {
            return Err(TrackError::InvertedSpan { start, end });
        }
        Ok(DateSpan { start, end })
    }

    /// Whether `date` falls inside the span.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterate every day of the span in ascending order.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Number of days in the span.
    pub fn len(&self) -> u64 {
        (self.end - self.start).num_days() as u64 + 1
    }

    /// Always false; a span holds at least one day by construction.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// English ordinal of a dense phase index: `0th`, `1st`, `2nd`, `3rd`,
/// `4th`, ... with the 11/12/13 exceptions.
pub fn ordinal(index: usize) -> String {
    let suffix = match (index % 10, index % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{index}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - PhaseId state predicates and ordering helpers.
    // - DateSpan validation, containment, and day iteration.
    // - Ordinal naming including the 11/12/13 exceptions.
    //
    // They intentionally DO NOT cover:
    // - How the tracker assigns identifiers (tracker tests).
    // -------------------------------------------------------------------------

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid test date")
    }

    #[test]
    // Purpose
    // -------
    // PhaseId classifies unregistered, active, and reserved-disabled values.
    //
    // Given
    // -----
    // - Raw identifiers -1, 0, and 1.
    //
    // Expect
    // ------
    // - Only 1 is active, only -1 is disabled, UNREGISTERED equals 0.
    fn phase_id_classifies_states() {
        // Arrange
        let disabled = PhaseId::new(-1);
        let unregistered = PhaseId::UNREGISTERED;
        let active = PhaseId::new(1);

        // Act & Assert
        assert!(!disabled.is_active() && disabled.is_disabled());
        assert!(!unregistered.is_active() && !unregistered.is_disabled());
        assert_eq!(unregistered.value(), 0);
        assert!(active.is_active() && !active.is_disabled());
        assert_eq!(unregistered.next(), active);
    }

    #[test]
    // Purpose
    // -------
    // DateSpan rejects inverted ranges and iterates inclusive days.
    //
    // Given
    // -----
    // - A valid span 2022-04-01 to 2022-04-03 and an inverted pair.
    //
    // Expect
    // ------
    // - The valid span yields 3 days; the inverted pair yields
    //   InvertedSpan with both dates reported.
    fn date_span_validates_and_iterates() {
        // Arrange
        let span = DateSpan::new(d(2022, 4, 1), d(2022, 4, 3)).expect("ascending span");

        // Act
        let days: Vec<NaiveDate> = span.iter_days().collect();

        // Assert
        assert_eq!(days, vec![d(2022, 4, 1), d(2022, 4, 2), d(2022, 4, 3)]);
        assert_eq!(span.len(), 3);
        assert!(span.contains(d(2022, 4, 2)));
        assert!(!span.contains(d(2022, 4, 4)));
        match DateSpan::new(d(2022, 4, 3), d(2022, 4, 1)) {
            Err(TrackError::InvertedSpan { start, end }) => {
                assert_eq!(start, d(2022, 4, 3));
                assert_eq!(end, d(2022, 4, 1));
            }
            other => panic!("expected InvertedSpan, got: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ordinal naming follows English suffix rules.
    //
    // Given
    // -----
    // - Indices 0, 1, 2, 3, 4, 11, 12, 13, 21, 102, 111.
    //
    // Expect
    // ------
    // - 0th, 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st, 102nd, 111th.
    fn ordinal_follows_english_suffix_rules() {
        // Arrange
        let cases = [
            (0, "0th"),
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (102, "102nd"),
            (111, "111th"),
        ];

        // Act & Assert
        for (index, expected) in cases {
            assert_eq!(ordinal(index), expected);
        }
    }
}
