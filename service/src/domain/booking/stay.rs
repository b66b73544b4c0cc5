//! [`Stay`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::DateTimeOf;
use derive_more::{Display, Error};

/// Half-open interval `[check_in, check_out)` a room is occupied for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Stay {
    /// [`DateTime`] of the check-in.
    check_in: CheckInDateTime,

    /// [`DateTime`] of the check-out.
    check_out: CheckOutDateTime,
}

impl Stay {
    /// Creates a new [`Stay`] out of the provided `check_in` and `check_out`.
    ///
    /// # Errors
    ///
    /// If the `check_out` doesn't go strictly after the `check_in`.
    pub fn new(
        check_in: CheckInDateTime,
        check_out: CheckOutDateTime,
    ) -> Result<Self, InvalidInterval> {
        if check_out.coerce() <= check_in {
            return Err(InvalidInterval);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Returns the check-in [`DateTime`] of this [`Stay`].
    #[must_use]
    pub const fn check_in(&self) -> CheckInDateTime {
        self.check_in
    }

    /// Returns the check-out [`DateTime`] of this [`Stay`].
    #[must_use]
    pub const fn check_out(&self) -> CheckOutDateTime {
        self.check_out
    }

    /// Indicates whether this [`Stay`] overlaps the `other` one.
    ///
    /// Touching boundaries don't overlap: a [`Stay`] ending exactly when
    /// another one begins leaves the room free for it.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in < other.check_out.coerce()
            && self.check_out > other.check_in.coerce()
    }

    /// Returns the number of calendar days between the check-in and the
    /// check-out dates of this [`Stay`].
    ///
    /// Elapsed hours are not considered, so the result is at least `1`.
    #[must_use]
    pub fn days(&self) -> u32 {
        let days = self
            .check_in
            .date()
            .days_until(self.check_out.date())
            .max(1);
        u32::try_from(days).unwrap_or(u32::MAX)
    }
}

/// Error of a [`Stay`] whose check-out doesn't go after its check-in.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("check-out must go strictly after check-in")]
pub struct InvalidInterval;

/// Marker type describing a check-in.
#[derive(Clone, Copy, Debug)]
pub struct CheckIn;

/// Marker type describing a check-out.
#[derive(Clone, Copy, Debug)]
pub struct CheckOut;

/// [`DateTime`] of a [`Stay`] check-in.
pub type CheckInDateTime = DateTimeOf<(Stay, CheckIn)>;

/// [`DateTime`] of a [`Stay`] check-out.
pub type CheckOutDateTime = DateTimeOf<(Stay, CheckOut)>;

#[cfg(test)]
mod spec {
    use common::DateTime;
    use proptest::prelude::*;

    use super::Stay;

    fn at(s: &str) -> DateTime {
        DateTime::parse(s).unwrap()
    }

    fn stay(from: &str, to: &str) -> Stay {
        Stay::new(at(from).coerce(), at(to).coerce()).unwrap()
    }

    #[test]
    fn rejects_inverted_and_empty_intervals() {
        let moment = at("2025-01-01T10:00:00");
        assert!(Stay::new(moment.coerce(), moment.coerce()).is_err());
        assert!(Stay::new(
            moment.coerce(),
            at("2025-01-01T09:59:59").coerce(),
        )
        .is_err());
    }

    #[test]
    fn overlap_excludes_boundaries() {
        let existing = stay("2025-01-01T10:00:00", "2025-01-01T12:00:00");

        let adjacent = stay("2025-01-01T12:00:00", "2025-01-01T14:00:00");
        assert!(!existing.overlaps(&adjacent));
        assert!(!adjacent.overlaps(&existing));

        let touching = stay("2025-01-01T11:59:00", "2025-01-01T14:00:00");
        assert!(existing.overlaps(&touching));
        assert!(touching.overlaps(&existing));
    }

    #[test]
    fn overlap_compares_offset_and_naive_forms() {
        let existing = stay("2025-01-01T10:00:00", "2025-01-01T12:00:00");
        let shifted = stay(
            "2025-01-01T17:30:00+05:30",
            "2025-01-01T19:00:00+05:30",
        );
        assert!(!existing.overlaps(&shifted));

        let inside = stay("2025-01-01T16:00:00+05:30", "2025-01-01T18:00:00");
        assert!(existing.overlaps(&inside));
    }

    #[test]
    fn counts_calendar_days() {
        assert_eq!(stay("2025-01-01", "2025-01-04").days(), 3);
        assert_eq!(
            stay("2025-01-01T23:00:00", "2025-01-02T01:00:00").days(),
            1,
        );
        assert_eq!(
            stay("2025-01-01T08:00:00", "2025-01-01T20:00:00").days(),
            1,
        );
        assert_eq!(stay("2025-01-30", "2025-03-01").days(), 30);
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            a in 0i64..10_000,
            a_len in 1i64..500,
            b in 0i64..10_000,
            b_len in 1i64..500,
        ) {
            let minutes = |m: i64| {
                DateTime::from_unix_timestamp(1_735_689_600 + m * 60).unwrap()
            };
            let x = Stay::new(
                minutes(a).coerce(),
                minutes(a + a_len).coerce(),
            ).unwrap();
            let y = Stay::new(
                minutes(b).coerce(),
                minutes(b + b_len).coerce(),
            ).unwrap();

            prop_assert_eq!(x.overlaps(&y), y.overlaps(&x));
            prop_assert_eq!(
                x.overlaps(&y),
                a < b + b_len && a + a_len > b,
            );
        }
    }
}
