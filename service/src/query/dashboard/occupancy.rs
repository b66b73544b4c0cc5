//! [`RoomOccupancy`] definition.

use common::{
    operations::{By, Select},
    Date, Percent,
};
use tracerr::Traced;

use crate::{
    domain::{booking::Stay, Booking, Room},
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] for the occupancy of every [`Room`] on a [`Date`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RoomOccupancy {
    /// [`Date`] to inspect.
    pub date: Date,
}

/// Output of the [`RoomOccupancy`] [`Query`].
#[derive(Clone, Debug)]
pub struct Occupancy {
    /// Numbers of [`Room`]s.
    pub stats: read::room::Stats,

    /// Share of [`Room`]s not flagged as available.
    pub rate: Percent,

    /// Every [`Room`] along with its [`Booking`] on the [`Date`], if any.
    pub rooms: Vec<Entry>,
}

/// [`Room`] entry of an [`Occupancy`].
#[derive(Clone, Debug)]
pub struct Entry {
    /// Inspected [`Room`].
    pub room: Room,

    /// Earliest occupying [`Booking`] of the [`Room`] on the [`Date`].
    pub booking: Option<Booking>,
}

impl Occupancy {
    /// Matches the provided [`Room`]s with their occupying [`Booking`]s.
    #[must_use]
    pub fn new(rooms: Vec<Room>, occupying: &[Booking]) -> Self {
        let stats = read::room::Stats {
            total: u32::try_from(rooms.len()).unwrap_or(u32::MAX),
            available: u32::try_from(
                rooms.iter().filter(|r| r.is_available).count(),
            )
            .unwrap_or(u32::MAX),
        };
        let rooms = rooms
            .into_iter()
            .map(|room| Entry {
                booking: occupying
                    .iter()
                    .filter(|b| b.room_id == room.id && b.is_occupying())
                    .min_by_key(|b| b.stay.check_in())
                    .cloned(),
                room,
            })
            .collect();
        Self {
            rate: Percent::ratio(stats.occupied().into(), stats.total.into()),
            stats,
            rooms,
        }
    }
}

impl<Db> Query<RoomOccupancy> for Service<Db>
where
    Db: Database<
            Select<By<Vec<Room>, read::room::list::Filter>>,
            Ok = Vec<Room>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Booking>, read::booking::Occupying>>,
            Ok = Vec<Booking>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Occupancy;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        RoomOccupancy { date }: RoomOccupancy,
    ) -> Result<Self::Ok, Self::Err> {
        let rooms = self
            .database()
            .execute(Select(By::<Vec<Room>, _>::new(
                read::room::list::Filter::default(),
            )))
            .await
            .map_err(tracerr::wrap!())?;

        // Whole day is always a valid `Stay`.
        let during =
            Stay::new(date.midnight(), date.next_day().midnight()).ok();
        let occupying = self
            .database()
            .execute(Select(By::<Vec<Booking>, _>::new(
                read::booking::Occupying {
                    room_id: None,
                    during,
                },
            )))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(Occupancy::new(rooms, &occupying))
    }
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, DateTime, Money};
    use rust_decimal::Decimal;

    use crate::domain::{
        booking::{self, DurationType, PaymentStatus, Status, Stay},
        cost::Charges,
        customer,
        room::{self, configuration::PersonCount, Bathroom},
        Booking, Room,
    };

    use super::Occupancy;

    fn room(number: &str, is_available: bool) -> Room {
        Room {
            id: room::Id::new(),
            number: room::Number::new(number).unwrap(),
            bathroom: Bathroom::Attached,
            is_available,
            description: None,
            daily_cost: None,
            monthly_cost: None,
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        }
    }

    fn booking(room: &Room, status: Status, from: &str, to: &str) -> Booking {
        let total = Money {
            amount: 100.into(),
            currency: Currency::Inr,
        };
        Booking {
            id: booking::Id::new(),
            customer_phone: customer::Phone::new("9876543210").unwrap(),
            room_id: room.id,
            number_of_people: PersonCount::ONE,
            stay: Stay::new(
                DateTime::parse(from).unwrap().coerce(),
                DateTime::parse(to).unwrap().coerce(),
            )
            .unwrap(),
            duration: DurationType::Daily,
            status,
            payment_status: PaymentStatus::Pending,
            charges: Charges {
                daily_cost: Some(total),
                monthly_cost: None,
                early_check_in_cost: None,
                late_check_out_cost: None,
            },
            total_amount: total,
            remarks: None,
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        }
    }

    #[test]
    fn matches_rooms_with_their_bookings() {
        let free = room("101", true);
        let taken = room("102", false);
        let later = booking(
            &taken,
            Status::Confirmed,
            "2025-01-05T18:00:00",
            "2025-01-06T10:00:00",
        );
        let earlier = booking(
            &taken,
            Status::CheckedIn,
            "2025-01-04T12:00:00",
            "2025-01-05T12:00:00",
        );

        let occupancy = Occupancy::new(
            vec![free.clone(), taken.clone()],
            &[later, earlier.clone()],
        );

        assert_eq!(occupancy.stats.total, 2);
        assert_eq!(occupancy.stats.available, 1);
        assert_eq!(occupancy.rate.value(), Decimal::from(50));
        assert_eq!(occupancy.rooms[0].room.id, free.id);
        assert!(occupancy.rooms[0].booking.is_none());
        assert_eq!(
            occupancy.rooms[1].booking.as_ref().map(|b| b.id),
            Some(earlier.id),
        );
    }

    #[test]
    fn skips_released_bookings() {
        let r = room("201A", true);
        let cancelled = booking(
            &r,
            Status::Cancelled,
            "2025-01-05T12:00:00",
            "2025-01-06T10:00:00",
        );

        let occupancy = Occupancy::new(vec![r], &[cancelled]);

        assert!(occupancy.rooms[0].booking.is_none());
        assert_eq!(occupancy.rate.value(), Decimal::ZERO);
    }
}
