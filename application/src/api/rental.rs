//! [`Rental`]-related definitions.

use common::{DateTime, Money};
use derive_more::From;
use juniper::{graphql_object, GraphQLEnum};
use service::domain;

use crate::{api, define_error, Context, Error};

/// A rental of one or more `Vehicle`s by a customer.
#[derive(Clone, Debug, From)]
pub struct Rental(domain::Rental);

/// A rental of one or more `Vehicle`s by a customer.
#[graphql_object(context = Context)]
impl Rental {
    /// Identifier of the customer this `Rental` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Rental.customerId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn customer_id(&self) -> &str {
        self.0.customer_id.as_ref()
    }

    /// `Vehicle`s allocated to this `Rental`, in allocation order.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Rental.vehicleIds",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn vehicle_ids(&self) -> Vec<api::vehicle::Id> {
        self.0.vehicle_ids.iter().copied().map(Into::into).collect()
    }

    /// Number of `Vehicle`s in this `Rental`.
    #[must_use]
    pub fn vehicle_count(&self) -> i32 {
        i32::try_from(self.0.vehicle_ids.len()).unwrap_or(i32::MAX)
    }

    /// Period this `Rental` is billed by.
    #[must_use]
    pub fn period(&self) -> Period {
        self.0.period.into()
    }

    /// `DateTime` when this `Rental` started.
    #[must_use]
    pub fn started_at(&self) -> DateTime {
        self.0.started_at.coerce()
    }

    /// `DateTime` when this `Rental` ended, if it did.
    #[must_use]
    pub fn ended_at(&self) -> Option<DateTime> {
        self.0.ended_at.map(|at| at.coerce())
    }

    /// Cost of this `Rental`, if it ended.
    #[must_use]
    pub fn cost(&self) -> Option<Money> {
        self.0.cost
    }

    /// Indicator whether this `Rental` is not returned yet.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.0.is_open()
    }
}

/// Billing period of a `Rental`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "RentalPeriod")]
pub enum Period {
    /// Billed proportionally to the elapsed hours.
    Hourly,

    /// Billed by started days.
    Daily,

    /// Billed by started weeks.
    Weekly,
}

impl From<domain::rental::Period> for Period {
    fn from(period: domain::rental::Period) -> Self {
        use domain::rental::Period as P;
        match period {
            P::Hourly => Self::Hourly,
            P::Daily => Self::Daily,
            P::Weekly => Self::Weekly,
        }
    }
}

impl From<Period> for domain::rental::Period {
    fn from(period: Period) -> Self {
        match period {
            Period::Hourly => Self::Hourly,
            Period::Daily => Self::Daily,
            Period::Weekly => Self::Weekly,
        }
    }
}

/// Parses the provided `raw` customer identifier.
///
/// # Errors
///
/// With `INVALID_CUSTOMER_ID` code if the identifier is empty or has
/// surrounding whitespace.
pub fn customer_id(raw: String) -> Result<domain::customer::Id, Error> {
    domain::customer::Id::new(raw)
        .ok_or_else(|| CustomerError::InvalidId.into())
}

define_error! {
    enum CustomerError {
        #[code = "INVALID_CUSTOMER_ID"]
        #[status = BAD_REQUEST]
        #[message = "Customer identifier must be non-empty and have no \
                     surrounding whitespace"]
        InvalidId,
    }
}
