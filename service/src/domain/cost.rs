//! Pricing of [`Booking`]s.
//!
//! [`Booking`]: crate::domain::Booking

use common::Money;
use derive_more::Display;

use crate::domain::{
    booking::{DurationType, Stay},
    room::{configuration::PersonCount, Configuration},
    Room,
};

/// Indicates whether none of the provided cost components is negative.
pub fn non_negative<'m>(costs: impl IntoIterator<Item = &'m Money>) -> bool {
    costs.into_iter().all(|m| !m.is_negative())
}

/// Daily and monthly rates a [`Room`] is offered by for some
/// [`PersonCount`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rates {
    /// Cost of a single day, if the [`Room`] is offered daily.
    pub daily_cost: Option<Money>,

    /// Cost of a 30-day month, if the [`Room`] is offered monthly.
    pub monthly_cost: Option<Money>,
}

impl Rates {
    /// Resolves the [`Rates`] of the provided [`Room`] for the given number
    /// of `people`.
    ///
    /// A [`Room`] having [`Configuration`]s is priced by the available one
    /// for exactly the given number of `people`, otherwise by its own
    /// reference costs.
    ///
    /// # Errors
    ///
    /// With [`Error::MissingConfiguration`] if the [`Room`] has
    /// [`Configuration`]s but none available for the given number of
    /// `people`.
    pub fn resolve(
        room: &Room,
        configurations: &[Configuration],
        people: PersonCount,
    ) -> Result<Self, Error> {
        if configurations.iter().all(|c| c.room_id != room.id) {
            return Ok(Self {
                daily_cost: room.daily_cost,
                monthly_cost: room.monthly_cost,
            });
        }
        configurations
            .iter()
            .find(|c| {
                c.room_id == room.id && c.person_count == people && c.is_available
            })
            .map(|c| Self {
                daily_cost: Some(c.daily_cost),
                monthly_cost: Some(c.monthly_cost),
            })
            .ok_or(Error::MissingConfiguration)
    }
}

/// Cost components a [`Booking`] is priced with.
///
/// [`Booking`]: crate::domain::Booking
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Charges {
    /// Cost of a single day.
    pub daily_cost: Option<Money>,

    /// Cost of a 30-day month.
    pub monthly_cost: Option<Money>,

    /// Flat surcharge for an early check-in.
    pub early_check_in_cost: Option<Money>,

    /// Flat surcharge for a late check-out.
    pub late_check_out_cost: Option<Money>,
}

impl Charges {
    /// Creates new [`Charges`] out of the provided [`Rates`] and surcharges.
    #[must_use]
    pub const fn new(
        rates: Rates,
        early_check_in_cost: Option<Money>,
        late_check_out_cost: Option<Money>,
    ) -> Self {
        Self {
            daily_cost: rates.daily_cost,
            monthly_cost: rates.monthly_cost,
            early_check_in_cost,
            late_check_out_cost,
        }
    }

    /// Calculates the total amount of a [`Stay`] billed by the given
    /// [`DurationType`].
    ///
    /// - [`DurationType::Daily`] bills every calendar day.
    /// - [`DurationType::Weekly`] bills every started week at the daily rate.
    /// - [`DurationType::Monthly`] bills every started 30-day month.
    ///
    /// Surcharges are added as is, regardless of the [`Stay`] length.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingRate`] if the rate required by the [`DurationType`]
    ///   is absent.
    /// - [`Error::CurrencyMismatch`] if the components have different
    ///   currencies.
    pub fn total(
        &self,
        duration: DurationType,
        stay: &Stay,
    ) -> Result<Money, Error> {
        use DurationType as D;

        let days = stay.days();
        let base = match duration {
            D::Daily => self.daily_cost.map(|c| c * days),
            D::Weekly => self.daily_cost.map(|c| c * (7 * days.div_ceil(7))),
            D::Monthly => self.monthly_cost.map(|c| c * days.div_ceil(30)),
        }
        .ok_or(Error::MissingRate(duration))?;

        [self.early_check_in_cost, self.late_check_out_cost]
            .into_iter()
            .flatten()
            .try_fold(base, Money::checked_add)
            .ok_or(Error::CurrencyMismatch)
    }
}

/// Error of pricing a [`Booking`].
///
/// [`Booking`]: crate::domain::Booking
#[derive(Clone, Copy, Debug, Display, derive_more::Error)]
pub enum Error {
    /// [`Room`] has no available [`Configuration`] for the requested number
    /// of people.
    #[display("no matching configuration for the requested number of people")]
    MissingConfiguration,

    /// Rate required by the [`DurationType`] is not set.
    #[display("no rate to bill `{_0}` duration by")]
    MissingRate(#[error(not(source))] DurationType),

    /// Cost components are in different currencies.
    #[display("cost components have different currencies")]
    CurrencyMismatch,
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, DateTime, Money};
    use proptest::prelude::*;

    use crate::domain::{
        booking::{DurationType as D, Stay},
        room::{self, configuration, Bathroom, Configuration},
        Room,
    };

    use super::{non_negative, Charges, Error, Rates};

    fn inr(amount: u32) -> Money {
        Money {
            amount: amount.into(),
            currency: Currency::Inr,
        }
    }

    fn negative_inr(amount: u32) -> Money {
        Money {
            amount: -rust_decimal::Decimal::from(amount),
            currency: Currency::Inr,
        }
    }

    fn stay(from: &str, to: &str) -> Stay {
        Stay::new(
            DateTime::parse(from).unwrap().coerce(),
            DateTime::parse(to).unwrap().coerce(),
        )
        .unwrap()
    }

    fn room(daily: Option<u32>, monthly: Option<u32>) -> Room {
        Room {
            id: room::Id::new(),
            number: room::Number::new("201A").unwrap(),
            bathroom: Bathroom::Attached,
            is_available: true,
            description: None,
            daily_cost: daily.map(inr),
            monthly_cost: monthly.map(inr),
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        }
    }

    fn configuration(room: &Room, people: u8, daily: u32) -> Configuration {
        Configuration {
            id: configuration::Id::new(),
            room_id: room.id,
            person_count: configuration::PersonCount::new(people).unwrap(),
            daily_cost: inr(daily),
            monthly_cost: inr(daily * 25),
            is_available: true,
            description: None,
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        }
    }

    fn people(n: u8) -> configuration::PersonCount {
        configuration::PersonCount::new(n).unwrap()
    }

    #[test]
    fn prices_by_matching_configuration() {
        let room = room(Some(900), None);
        let configs =
            [configuration(&room, 1, 400), configuration(&room, 2, 500)];

        let rates = Rates::resolve(&room, &configs, people(2)).unwrap();
        let total = Charges::new(rates, None, None)
            .total(D::Daily, &stay("2025-01-01", "2025-01-04"))
            .unwrap();

        assert_eq!(total, inr(1500));
    }

    #[test]
    fn never_falls_back_to_another_tier() {
        let room = room(Some(900), Some(20_000));
        let mut configs = [configuration(&room, 2, 500)];

        assert!(matches!(
            Rates::resolve(&room, &configs, people(3)),
            Err(Error::MissingConfiguration),
        ));

        configs[0].is_available = false;
        assert!(matches!(
            Rates::resolve(&room, &configs, people(2)),
            Err(Error::MissingConfiguration),
        ));
    }

    #[test]
    fn uses_room_costs_without_configurations() {
        let room = room(Some(700), Some(15_000));
        let other = self::room(Some(1), Some(1));
        let configs = [configuration(&other, 1, 1)];

        let rates = Rates::resolve(&room, &configs, people(4)).unwrap();

        assert_eq!(rates.daily_cost, Some(inr(700)));
        assert_eq!(rates.monthly_cost, Some(inr(15_000)));
    }

    #[test]
    fn bills_weeks_and_months_by_started_periods() {
        let charges = Charges {
            daily_cost: Some(inr(500)),
            monthly_cost: Some(inr(12_000)),
            early_check_in_cost: None,
            late_check_out_cost: None,
        };
        let ten_days = stay("2025-01-01", "2025-01-11");

        assert_eq!(charges.total(D::Daily, &ten_days).unwrap(), inr(5000));
        assert_eq!(charges.total(D::Weekly, &ten_days).unwrap(), inr(7000));
        assert_eq!(charges.total(D::Monthly, &ten_days).unwrap(), inr(12_000));
        assert_eq!(
            charges
                .total(D::Monthly, &stay("2025-01-01", "2025-03-02"))
                .unwrap(),
            inr(24_000),
        );
        assert_eq!(
            charges
                .total(D::Monthly, &stay("2025-01-01", "2025-03-03"))
                .unwrap(),
            inr(36_000),
        );
    }

    #[test]
    fn adds_flat_surcharges() {
        let charges = Charges {
            daily_cost: Some(inr(500)),
            monthly_cost: None,
            early_check_in_cost: Some(inr(200)),
            late_check_out_cost: Some(inr(150)),
        };

        assert_eq!(
            charges
                .total(D::Daily, &stay("2025-01-01", "2025-01-03"))
                .unwrap(),
            inr(1350),
        );
        assert!(matches!(
            charges.total(D::Monthly, &stay("2025-01-01", "2025-01-03")),
            Err(Error::MissingRate(D::Monthly)),
        ));
    }

    #[test]
    fn rejects_mixed_currencies() {
        let charges = Charges {
            daily_cost: Some(inr(500)),
            monthly_cost: None,
            early_check_in_cost: Some(Money {
                amount: 10.into(),
                currency: Currency::Usd,
            }),
            late_check_out_cost: None,
        };

        assert!(matches!(
            charges.total(D::Daily, &stay("2025-01-01", "2025-01-03")),
            Err(Error::CurrencyMismatch),
        ));
    }

    #[test]
    fn detects_negative_costs() {
        assert!(non_negative(Vec::<&Money>::new()));
        assert!(non_negative([&inr(0), &inr(500)]));
        assert!(!non_negative([&inr(500), &negative_inr(2000)]));
    }

    proptest! {
        #[test]
        fn total_is_deterministic(
            daily in 1u32..10_000,
            monthly in 1u32..100_000,
            early in proptest::option::of(0u32..1_000),
            days in 1i64..400,
            duration in prop::sample::select(D::ALL),
        ) {
            let charges = Charges {
                daily_cost: Some(inr(daily)),
                monthly_cost: Some(inr(monthly)),
                early_check_in_cost: early.map(inr),
                late_check_out_cost: None,
            };
            let from = DateTime::from_unix_timestamp(1_735_689_600).unwrap();
            let to = DateTime::from_unix_timestamp(
                1_735_689_600 + days * 86_400,
            ).unwrap();
            let stay = Stay::new(from.coerce(), to.coerce()).unwrap();

            let first = charges.total(duration, &stay).unwrap();
            let second = charges.total(duration, &stay).unwrap();

            prop_assert_eq!(first, second);
            prop_assert!(first.amount >= inr(daily.min(monthly)).amount);
        }
    }
}
