//! Availability of [`Room`]s for [`Stay`]s.
//!
//! [`Room`]: crate::domain::Room

use crate::domain::{
    booking::{self, Stay},
    room, Booking,
};

/// Returns the first occupying [`Booking`] of the specified room conflicting
/// with the `candidate` [`Stay`], if any.
///
/// Only [`Booking`]s in an occupying [`booking::Status`] are considered. The
/// [`Booking`] with the `exclude`d ID is skipped, so an existing [`Booking`]
/// never conflicts with itself when being moved.
pub fn conflict<'b>(
    room_id: room::Id,
    candidate: &Stay,
    exclude: Option<booking::Id>,
    bookings: impl IntoIterator<Item = &'b Booking>,
) -> Option<&'b Booking> {
    bookings.into_iter().find(|b| {
        b.room_id == room_id
            && Some(b.id) != exclude
            && b.is_occupying()
            && b.stay.overlaps(candidate)
    })
}

/// Indicates whether the specified room is free for the `candidate` [`Stay`]
/// considering the provided [`Booking`]s.
#[must_use]
pub fn is_available<'b>(
    room_id: room::Id,
    candidate: &Stay,
    bookings: impl IntoIterator<Item = &'b Booking>,
) -> bool {
    conflict(room_id, candidate, None, bookings).is_none()
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, DateTime, Money};
    use proptest::prelude::*;

    use crate::domain::{
        booking::{self, DurationType, PaymentStatus, Status, Stay},
        cost::Charges,
        customer,
        room::{self, configuration::PersonCount},
        Booking,
    };

    use super::{conflict, is_available};

    fn stay(from: &str, to: &str) -> Stay {
        Stay::new(
            DateTime::parse(from).unwrap().coerce(),
            DateTime::parse(to).unwrap().coerce(),
        )
        .unwrap()
    }

    fn booking(room_id: room::Id, stay: Stay, status: Status) -> Booking {
        Booking {
            id: booking::Id::new(),
            customer_phone: customer::Phone::new("+919876543210").unwrap(),
            room_id,
            number_of_people: PersonCount::ONE,
            stay,
            duration: DurationType::Daily,
            status,
            payment_status: PaymentStatus::Pending,
            charges: Charges {
                daily_cost: None,
                monthly_cost: None,
                early_check_in_cost: None,
                late_check_out_cost: None,
            },
            total_amount: Money::zero(Currency::Inr),
            remarks: None,
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        }
    }

    #[test]
    fn adjacent_stay_is_available() {
        let room = room::Id::new();
        let existing = [booking(
            room,
            stay("2025-01-01", "2025-01-05"),
            Status::Confirmed,
        )];

        assert!(is_available(
            room,
            &stay("2025-01-05", "2025-01-07"),
            &existing,
        ));
        assert!(!is_available(
            room,
            &stay("2025-01-04", "2025-01-06"),
            &existing,
        ));
    }

    #[test]
    fn only_occupying_bookings_block() {
        let room = room::Id::new();
        let wanted = stay("2025-01-02", "2025-01-03");

        for status in Status::ALL.iter().copied() {
            let existing =
                [booking(room, stay("2025-01-01", "2025-01-05"), status)];
            assert_eq!(
                is_available(room, &wanted, &existing),
                !status.is_occupying(),
                "{status}",
            );
        }
    }

    #[test]
    fn other_rooms_and_excluded_booking_dont_block() {
        let room = room::Id::new();
        let existing = booking(
            room::Id::new(),
            stay("2025-01-01", "2025-01-05"),
            Status::CheckedIn,
        );
        let wanted = stay("2025-01-02", "2025-01-03");
        assert!(is_available(room, &wanted, [&existing]));

        let own = booking(room, wanted, Status::Confirmed);
        assert!(conflict(room, &wanted, Some(own.id), [&own]).is_none());
        assert_eq!(
            conflict(room, &wanted, None, [&own]).map(|b| b.id),
            Some(own.id),
        );
    }

    proptest! {
        #[test]
        fn unavailable_iff_some_occupying_overlap(
            stays in prop::collection::vec(
                (0i64..200, 1i64..50, prop::sample::select(Status::ALL)),
                0..8,
            ),
            from in 0i64..200,
            len in 1i64..50,
        ) {
            let hour = |h: i64| {
                DateTime::from_unix_timestamp(1_735_689_600 + h * 3600)
                    .unwrap()
            };
            let room = room::Id::new();
            let bookings = stays
                .iter()
                .map(|&(at, l, status)| {
                    let stay = Stay::new(
                        hour(at).coerce(),
                        hour(at + l).coerce(),
                    ).unwrap();
                    booking(room, stay, status)
                })
                .collect::<Vec<_>>();
            let wanted =
                Stay::new(hour(from).coerce(), hour(from + len).coerce())
                    .unwrap();

            let expected = stays.iter().any(|&(at, l, status)| {
                status.is_occupying() && from < at + l && from + len > at
            });
            prop_assert_eq!(!is_available(room, &wanted, &bookings), expected);
        }
    }
}
