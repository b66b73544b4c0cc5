//! [`Payment`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{booking, text::Url, Booking};

/// Money received for a [`Booking`].
#[derive(Clone, Debug)]
pub struct Payment {
    /// ID of this [`Payment`].
    pub id: Id,

    /// ID of the [`Booking`] this [`Payment`] is made for.
    pub booking_id: booking::Id,

    /// Paid amount.
    pub amount: Money,

    /// [`Method`] this [`Payment`] was made by.
    pub method: Method,

    /// [`Status`] of this [`Payment`].
    pub status: Status,

    /// [`Url`] of the screenshot proving this [`Payment`].
    pub screenshot_url: Option<Url>,

    /// [`TransactionId`] of this [`Payment`] in an external system.
    pub transaction_id: Option<TransactionId>,

    /// [`DateTime`] when this [`Payment`] was made.
    pub paid_at: PaymentDateTime,

    /// [`DateTime`] when this [`Payment`] was recorded.
    pub created_at: CreationDateTime,
}

/// ID of a [`Payment`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, FromStr, Hash, Into, PartialEq,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// ID of a [`Payment`] in an external payment system.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct TransactionId(String);

impl TransactionId {
    /// Creates a new [`TransactionId`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `id` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a new [`TransactionId`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`TransactionId`].
    fn check(id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        id.trim() == id && !id.is_empty() && id.len() <= 128
    }
}

impl FromStr for TransactionId {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `TransactionId`")
    }
}

define_kind! {
    #[doc = "Method a [`Payment`] is made by."]
    enum Method {
        #[doc = "Cash in hand."]
        Cash = 1,

        #[doc = "Online payment gateway."]
        Online = 2,

        #[doc = "Unified Payments Interface transfer."]
        Upi = 3,

        #[doc = "Debit or credit card."]
        Card = 4,

        #[doc = "Direct bank transfer."]
        BankTransfer = 5,
    }
}

define_kind! {
    #[doc = "Status of a [`Payment`]."]
    enum Status {
        #[doc = "[`Payment`] awaits confirmation."]
        Pending = 1,

        #[doc = "[`Payment`] is received."]
        Completed = 2,

        #[doc = "[`Payment`] has failed."]
        Failed = 3,

        #[doc = "[`Payment`] was returned."]
        Refunded = 4,
    }
}

/// Paid and due amounts of a [`Booking`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Reconciliation {
    /// Total amount of the [`Booking`].
    pub total: Money,

    /// Sum of all the [`Payment`]s recorded for the [`Booking`].
    pub paid: Money,

    /// Amount left to pay. Negative if overpaid.
    pub due: Money,
}

impl Reconciliation {
    /// Reconciles the provided [`Payment`]s against the [`Booking`] total.
    ///
    /// Every recorded [`Payment`] counts regardless of its [`Status`].
    /// Amounts are summed in the [`Booking`]'s currency.
    #[must_use]
    pub fn new<'p>(
        booking: &Booking,
        payments: impl IntoIterator<Item = &'p Payment>,
    ) -> Self {
        let total = booking.total_amount;
        let paid = Money {
            amount: payments
                .into_iter()
                .filter(|p| p.booking_id == booking.id)
                .map(|p| p.amount.amount)
                .sum(),
            currency: total.currency,
        };
        Self {
            total,
            paid,
            due: Money {
                amount: total.amount - paid.amount,
                currency: total.currency,
            },
        }
    }

    /// Indicates whether anything is left to pay.
    #[must_use]
    pub fn is_due(&self) -> bool {
        self.due.amount > Decimal::ZERO
    }
}

/// [`DateTime`] when a [`Payment`] was made.
pub type PaymentDateTime = DateTimeOf<(Payment, Made)>;

/// Marker type describing a [`Payment`] being made.
#[derive(Clone, Copy, Debug)]
pub struct Made;

/// [`DateTime`] when a [`Payment`] was recorded.
pub type CreationDateTime = DateTimeOf<(Payment, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::{money::Currency, DateTime, Money};
    use proptest::prelude::*;

    use crate::domain::{
        booking::{self, DurationType, PaymentStatus, Status as BookingStatus},
        cost::Charges,
        customer,
        room::{self, configuration::PersonCount},
        Booking,
    };

    use super::{Id, Method, Payment, Reconciliation, Status};

    fn inr(amount: u32) -> Money {
        Money {
            amount: amount.into(),
            currency: Currency::Inr,
        }
    }

    fn booking(total: u32) -> Booking {
        let check_in = DateTime::parse("2025-01-01").unwrap();
        let check_out = DateTime::parse("2025-01-03").unwrap();
        Booking {
            id: booking::Id::new(),
            customer_phone: customer::Phone::new("9876543210").unwrap(),
            room_id: room::Id::new(),
            number_of_people: PersonCount::ONE,
            stay: booking::Stay::new(check_in.coerce(), check_out.coerce())
                .unwrap(),
            duration: DurationType::Daily,
            status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Paid,
            charges: Charges {
                daily_cost: Some(inr(total / 2)),
                monthly_cost: None,
                early_check_in_cost: None,
                late_check_out_cost: None,
            },
            total_amount: inr(total),
            remarks: None,
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        }
    }

    fn payment(booking: &Booking, amount: u32) -> Payment {
        Payment {
            id: Id::new(),
            booking_id: booking.id,
            amount: inr(amount),
            method: Method::Upi,
            status: Status::Completed,
            screenshot_url: None,
            transaction_id: None,
            paid_at: DateTime::now().coerce(),
            created_at: DateTime::now().coerce(),
        }
    }

    #[test]
    fn sums_payments_into_due() {
        let booking = booking(1000);
        let payments = [payment(&booking, 400), payment(&booking, 300)];

        let rec = Reconciliation::new(&booking, &payments);

        assert_eq!(rec.paid, inr(700));
        assert_eq!(rec.due, inr(300));
        assert!(rec.is_due());
    }

    #[test]
    fn ignores_other_bookings_and_status_field() {
        let booking = booking(1000);
        let other = self::booking(500);
        let payments = [payment(&booking, 1000), payment(&other, 500)];

        let rec = Reconciliation::new(&booking, &payments);

        assert_eq!(rec.due, inr(0));
        assert!(!rec.is_due());

        let overpaid = Reconciliation::new(
            &booking,
            &[payment(&booking, 1000), payment(&booking, 1)],
        );
        assert!(overpaid.due.is_negative());
        assert!(!overpaid.is_due());
    }

    proptest! {
        #[test]
        fn payment_decreases_due_by_its_amount(
            total in 0u32..100_000,
            paid in prop::collection::vec(1u32..10_000, 0..6),
            extra in 1u32..10_000,
        ) {
            let booking = booking(total);
            let mut payments = paid
                .iter()
                .map(|&a| payment(&booking, a))
                .collect::<Vec<_>>();

            let before = Reconciliation::new(&booking, &payments);
            prop_assert_eq!(before, Reconciliation::new(&booking, &payments));

            payments.push(payment(&booking, extra));
            let after = Reconciliation::new(&booking, &payments);

            prop_assert_eq!(
                before.due.amount - after.due.amount,
                inr(extra).amount,
            );
        }
    }
}
