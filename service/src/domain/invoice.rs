//! [`Invoice`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{booking, text::Url, Booking};

/// Billing document issued for a [`Booking`].
///
/// Amounts are a snapshot taken on issuing and never follow later changes of
/// the [`Booking`].
#[derive(Clone, Debug)]
pub struct Invoice {
    /// ID of this [`Invoice`].
    pub id: Id,

    /// ID of the [`Booking`] this [`Invoice`] is issued for.
    pub booking_id: booking::Id,

    /// Unique [`Number`] of this [`Invoice`].
    pub number: Number,

    /// [`Amounts`] of this [`Invoice`].
    pub amounts: Amounts,

    /// [`Status`] of this [`Invoice`].
    pub status: Status,

    /// [`Url`] of the rendered document.
    pub pdf_url: Option<Url>,

    /// [`DateTime`] when this [`Invoice`] was issued.
    pub created_at: CreationDateTime,
}

/// ID of an [`Invoice`].
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

/// Number of an [`Invoice`], like `INV-0001736935200123`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Number(String);

impl Number {
    /// Prefix of every [`Number`].
    pub const PREFIX: &'static str = "INV-";

    /// Generates a new [`Number`] out of the provided issuing [`DateTime`].
    #[must_use]
    pub fn generate(at: CreationDateTime) -> Self {
        let millis = at.unix_timestamp_millis();
        Self(format!("{}{millis:016}", Self::PREFIX))
    }

    /// Creates a new [`Number`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `number` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(number: impl Into<String>) -> Self {
        Self(number.into())
    }
}

/// Amounts of an [`Invoice`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Amounts {
    /// Total amount of the [`Booking`].
    pub total: Money,

    /// Tax added on top of the total.
    pub tax: Money,

    /// Discount taken off the total.
    pub discount: Money,

    /// Amount to pay: `total + tax - discount`, never negative.
    pub r#final: Money,
}

impl Amounts {
    /// Calculates [`Amounts`] of the provided [`Booking`].
    ///
    /// [`None`] is returned if the `tax` or the `discount` are in another
    /// currency than the [`Booking`].
    #[must_use]
    pub fn new(booking: &Booking, tax: Money, discount: Money) -> Option<Self> {
        let total = booking.total_amount;
        let mut r#final = total.checked_add(tax)?.checked_sub(discount)?;
        r#final.amount = r#final.amount.max(Decimal::ZERO);
        Some(Self {
            total,
            tax,
            discount,
            r#final,
        })
    }
}

define_kind! {
    #[doc = "Status of an [`Invoice`]."]
    enum Status {
        #[doc = "[`Invoice`] is issued."]
        Generated = 1,

        #[doc = "[`Invoice`] is sent to the customer."]
        Sent = 2,

        #[doc = "[`Invoice`] is paid."]
        Paid = 3,

        #[doc = "[`Invoice`] is voided."]
        Cancelled = 4,
    }
}

/// [`DateTime`] when an [`Invoice`] was issued.
pub type CreationDateTime = DateTimeOf<(Invoice, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::{money::Currency, DateTime, Money};

    use crate::domain::{
        booking::{self, DurationType, PaymentStatus, Status, Stay},
        cost::Charges,
        customer,
        room::{self, configuration::PersonCount},
        Booking,
    };

    use super::{Amounts, Number};

    fn inr(amount: u32) -> Money {
        Money {
            amount: amount.into(),
            currency: Currency::Inr,
        }
    }

    fn booking(total: u32) -> Booking {
        Booking {
            id: booking::Id::new(),
            customer_phone: customer::Phone::new("9876543210").unwrap(),
            room_id: room::Id::new(),
            number_of_people: PersonCount::ONE,
            stay: Stay::new(
                DateTime::parse("2025-01-01").unwrap().coerce(),
                DateTime::parse("2025-01-02").unwrap().coerce(),
            )
            .unwrap(),
            duration: DurationType::Daily,
            status: Status::Confirmed,
            payment_status: PaymentStatus::Pending,
            charges: Charges {
                daily_cost: Some(inr(total)),
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

    #[test]
    fn final_amount() {
        let amounts = Amounts::new(&booking(1000), inr(180), inr(80)).unwrap();
        assert_eq!(amounts.r#final, inr(1100));

        let amounts = Amounts::new(&booking(100), inr(0), inr(500)).unwrap();
        assert_eq!(amounts.r#final, inr(0));

        assert!(Amounts::new(
            &booking(100),
            Money {
                amount: 1.into(),
                currency: Currency::Usd,
            },
            inr(0),
        )
        .is_none());
    }

    #[test]
    fn number_format() {
        let at = DateTime::from_unix_timestamp(1_736_935_200).unwrap();
        assert_eq!(
            Number::generate(at.coerce()).to_string(),
            "INV-0001736935200000",
        );
    }
}
