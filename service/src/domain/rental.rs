//! [`Rental`] contract definitions.

use std::ops::RangeInclusive;

use common::{define_kind, unit, Currency, DateTimeOf, Money, Percent};
use derive_more::{Display, Error};
use rust_decimal::Decimal;

use crate::domain::{customer, vehicle};
#[cfg(doc)]
use crate::domain::Vehicle;

/// Contract of a customer renting one or more [`Vehicle`]s.
///
/// [`Rental`] is open until [`close()`]d, which computes its cost exactly
/// once.
///
/// [`close()`]: Rental::close
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rental {
    /// ID of the customer this [`Rental`] belongs to.
    pub customer_id: customer::Id,

    /// IDs of the [`Vehicle`]s allocated to this [`Rental`], in allocation
    /// order.
    pub vehicle_ids: Vec<vehicle::Id>,

    /// [`Period`] this [`Rental`] is billed by.
    pub period: Period,

    /// [`DateTime`] when this [`Rental`] started.
    ///
    /// [`DateTime`]: common::DateTime
    pub started_at: StartDateTime,

    /// [`DateTime`] when this [`Rental`] ended, if it did.
    ///
    /// [`DateTime`]: common::DateTime
    pub ended_at: Option<EndDateTime>,

    /// Cost of this [`Rental`], computed when it ends.
    pub cost: Option<Money>,
}

impl Rental {
    /// Opens a new [`Rental`] of the provided [`Vehicle`]s.
    #[must_use]
    pub fn open(
        customer_id: customer::Id,
        vehicle_ids: Vec<vehicle::Id>,
        period: Period,
        started_at: StartDateTime,
    ) -> Self {
        Self {
            customer_id,
            vehicle_ids,
            period,
            started_at,
            ended_at: None,
            cost: None,
        }
    }

    /// Indicates whether this [`Rental`] is not closed yet.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Closes this [`Rental`] at the provided [`DateTime`], computing and
    /// storing its cost in the provided [`Currency`].
    ///
    /// # Errors
    ///
    /// If this [`Rental`] is closed already. No state is changed then.
    ///
    /// [`DateTime`]: common::DateTime
    pub fn close(
        &mut self,
        now: EndDateTime,
        currency: Currency,
    ) -> Result<Money, AlreadyClosedError> {
        if !self.is_open() {
            return Err(AlreadyClosedError);
        }

        let cost = Money::rounded(
            price(
                self.vehicle_ids.len(),
                self.period,
                now.since(&self.started_at),
            ),
            currency,
        );
        self.ended_at = Some(now);
        self.cost = Some(cost);
        Ok(cost)
    }
}

/// [`DateTime`] when a [`Rental`] started.
///
/// [`DateTime`]: common::DateTime
pub type StartDateTime = DateTimeOf<(Rental, unit::Start)>;

/// [`DateTime`] when a [`Rental`] ended.
///
/// [`DateTime`]: common::DateTime
pub type EndDateTime = DateTimeOf<(Rental, unit::End)>;

define_kind! {
    #[doc = "Billing period of a [`Rental`]."]
    enum Period {
        #[doc = "Billed proportionally to the elapsed hours."]
        Hourly = 1,

        #[doc = "Billed by started days."]
        Daily = 2,

        #[doc = "Billed by started weeks."]
        Weekly = 3,
    }
}

impl Period {
    /// Returns the per-[`Vehicle`] rate of this [`Period`].
    #[must_use]
    pub fn unit_rate(self) -> Decimal {
        match self {
            Self::Hourly => Decimal::from(5),
            Self::Daily => Decimal::from(20),
            Self::Weekly => Decimal::from(50),
        }
    }

    /// Returns how many of this [`Period`]s are billed for the `elapsed`
    /// duration.
    ///
    /// [`Period::Hourly`] is fractional, while [`Period::Daily`] and
    /// [`Period::Weekly`] bill whole elapsed periods plus one started.
    /// Negative durations are billed as zero elapsed time.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn multiplier(self, elapsed: time::Duration) -> Decimal {
        let elapsed = elapsed.max(time::Duration::ZERO);
        match self {
            Self::Hourly => {
                let seconds = Decimal::try_from_i128_with_scale(
                    elapsed.whole_microseconds(),
                    6,
                )
                .expect("`i64` seconds in microseconds fit into `Decimal`");
                seconds / Decimal::from(3600)
            }
            Self::Daily => Decimal::from(elapsed.whole_days() + 1),
            Self::Weekly => Decimal::from(elapsed.whole_days() / 7 + 1),
        }
    }
}

/// Numbers of [`Vehicle`]s in a single [`Rental`] eligible for the
/// [`volume_discount()`].
pub const VOLUME_DISCOUNT_RANGE: RangeInclusive<usize> = 3..=5;

/// Returns the discount applied to [`Rental`]s of a number of [`Vehicle`]s
/// within the [`VOLUME_DISCOUNT_RANGE`].
#[expect(clippy::missing_panics_doc, reason = "infallible")]
#[must_use]
pub fn volume_discount() -> Percent {
    Percent::new(Decimal::from(30)).expect("in `[0..100]` range")
}

/// Prices a [`Rental`] of `count` [`Vehicle`]s billed by the `period` for
/// the `elapsed` duration.
///
/// Result is not rounded.
#[must_use]
pub fn price(count: usize, period: Period, elapsed: time::Duration) -> Decimal {
    let total =
        Decimal::from(count) * period.unit_rate() * period.multiplier(elapsed);
    if VOLUME_DISCOUNT_RANGE.contains(&count) {
        volume_discount().off(total)
    } else {
        total
    }
}

/// Error of closing a [`Rental`] that is closed already.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("`Rental` is closed already")]
pub struct AlreadyClosedError;

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{Currency, DateTime, Money};
    use rust_decimal::Decimal;

    use crate::domain::{customer, vehicle};

    use super::{price, Period, Rental};

    const HOUR: u64 = 60 * 60;
    const DAY: u64 = 24 * HOUR;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn rental(count: u32, period: Period) -> Rental {
        Rental::open(
            customer::Id::new("alice").unwrap(),
            (1..=count).map(vehicle::Id::from).collect(),
            period,
            DateTime::UNIX_EPOCH.coerce(),
        )
    }

    fn close_after(rental: &mut Rental, secs: u64) -> Money {
        let now = DateTime::UNIX_EPOCH + Duration::from_secs(secs);
        rental.close(now.coerce(), Currency::Usd).unwrap()
    }

    #[test]
    fn four_daily_same_day_are_discounted() {
        let mut r = rental(4, Period::Daily);

        let cost = close_after(&mut r, 0);

        assert_eq!(cost.amount, decimal("56.00"));
        assert_eq!(cost.to_string(), "56.00USD");
        assert_eq!(r.cost, Some(cost));
        assert!(!r.is_open());
    }

    #[test]
    fn one_hourly_for_ninety_minutes() {
        let mut r = rental(1, Period::Hourly);

        let cost = close_after(&mut r, 90 * 60);

        assert_eq!(cost.amount, decimal("7.50"));
        assert_eq!(cost.to_string(), "7.50USD");
    }

    #[test]
    fn six_weekly_for_ten_days_are_not_discounted() {
        let mut r = rental(6, Period::Weekly);

        let cost = close_after(&mut r, 10 * DAY);

        assert_eq!(cost.amount, decimal("600"));
    }

    #[test]
    fn discount_applies_to_three_up_to_five_vehicles() {
        let zero = time::Duration::ZERO;
        let expected = [
            (1, "20"),
            (2, "40"),
            (3, "42.0"),
            (5, "70.0"),
            (6, "120"),
            (10, "200"),
        ];
        for (count, total) in expected {
            assert_eq!(
                price(count, Period::Daily, zero),
                decimal(total),
                "{count} vehicles",
            );
        }
    }

    #[test]
    fn daily_bills_started_days() {
        let cases = [
            (0, 1),
            (DAY - 1, 1),
            (DAY, 2),
            (DAY + HOUR, 2),
            (3 * DAY, 4),
        ];
        for (secs, days) in cases {
            let elapsed = time::Duration::seconds(secs.try_into().unwrap());
            assert_eq!(
                Period::Daily.multiplier(elapsed),
                Decimal::from(days),
                "{secs} seconds",
            );
        }
    }

    #[test]
    fn weekly_bills_started_weeks() {
        let cases = [(0, 1), (6 * DAY, 1), (7 * DAY, 2), (14 * DAY, 3)];
        for (secs, weeks) in cases {
            let elapsed = time::Duration::seconds(secs.try_into().unwrap());
            assert_eq!(
                Period::Weekly.multiplier(elapsed),
                Decimal::from(weeks),
                "{secs} seconds",
            );
        }
    }

    #[test]
    fn hourly_bills_fractions() {
        let elapsed = time::Duration::minutes(20);

        assert_eq!(
            Money::rounded(price(1, Period::Hourly, elapsed), Currency::Usd)
                .amount,
            decimal("1.67"),
        );
    }

    #[test]
    fn negative_elapsed_is_zero() {
        let elapsed = time::Duration::hours(-5);

        assert_eq!(Period::Hourly.multiplier(elapsed), Decimal::ZERO);
        assert_eq!(Period::Daily.multiplier(elapsed), Decimal::ONE);
        assert_eq!(Period::Weekly.multiplier(elapsed), Decimal::ONE);
    }

    #[test]
    fn closes_only_once() {
        let mut r = rental(2, Period::Daily);
        let cost = close_after(&mut r, HOUR);
        let closed = r.clone();

        let now = DateTime::UNIX_EPOCH + Duration::from_secs(3 * DAY);
        assert!(r.close(now.coerce(), Currency::Usd).is_err());

        assert_eq!(r, closed);
        assert_eq!(r.cost, Some(cost));
    }
}
