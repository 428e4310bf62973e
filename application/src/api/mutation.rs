//! GraphQL [`Mutation`]s definitions.

use std::num::NonZeroUsize;

use juniper::graphql_object;
use service::{command, Command as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Adds a new available `Vehicle` of the specified category to the
    /// fleet.
    #[tracing::instrument(
        skip_all,
        fields(
            category = ?category,
            gql.name = "addVehicle",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn add_vehicle(
        category: api::vehicle::Category,
        ctx: &Context,
    ) -> Result<api::Vehicle, Error> {
        ctx.service()
            .execute(command::AddVehicle {
                category: category.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Rents the first `count` available `Vehicle`s out to the specified
    /// customer.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_CUSTOMER_ID` - the customer identifier is malformed;
    /// - `INVALID_COUNT` - `count` is not positive;
    /// - `ALREADY_RENTING` - the customer has an open `Rental` already;
    /// - `INSUFFICIENT_INVENTORY` - fewer than `count` `Vehicle`s are
    ///                              available.
    #[tracing::instrument(
        skip_all,
        fields(
            count = %count,
            customer_id = %customer_id,
            gql.name = "rentVehicles",
            otel.name = Self::SPAN_NAME,
            period = ?period,
        ),
    )]
    pub async fn rent_vehicles(
        customer_id: String,
        count: i32,
        period: api::rental::Period,
        ctx: &Context,
    ) -> Result<api::Rental, Error> {
        let customer_id =
            api::rental::customer_id(customer_id).map_err(ctx.error())?;
        let count = usize::try_from(count)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| CountError::Invalid.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::RentVehicles {
                customer_id,
                count,
                period: period.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the rented `Vehicle`s of the specified customer, charging the
    /// `Rental` cost.
    ///
    /// Declined payment changes nothing, so the return may be retried.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_CUSTOMER_ID` - the customer identifier is malformed;
    /// - `NO_ACTIVE_RENTAL` - the customer has no open `Rental`;
    /// - `PAYMENT_DECLINED` - the payment of the `Rental` cost was declined.
    #[tracing::instrument(
        skip_all,
        fields(
            customer_id = %customer_id,
            gql.name = "returnVehicles",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn return_vehicles(
        customer_id: String,
        ctx: &Context,
    ) -> Result<api::Rental, Error> {
        let customer_id =
            api::rental::customer_id(customer_id).map_err(ctx.error())?;

        ctx.service()
            .execute(command::ReturnVehicles { customer_id })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Services the specified `Vehicle`, resetting its wear state.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `VEHICLE_NOT_EXISTS` - the `Vehicle` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "performMaintenance",
            otel.name = Self::SPAN_NAME,
            vehicle_id = %vehicle_id,
        ),
    )]
    pub async fn perform_maintenance(
        vehicle_id: api::vehicle::Id,
        ctx: &Context,
    ) -> Result<api::Vehicle, Error> {
        ctx.service()
            .execute(command::PerformMaintenance {
                vehicle_id: vehicle_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

define_error! {
    enum CountError {
        #[code = "INVALID_COUNT"]
        #[status = BAD_REQUEST]
        #[message = "Number of `Vehicle`s to rent must be positive"]
        Invalid,
    }
}

impl AsError for command::add_vehicle::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::FleetFull => None,
        }
    }
}

impl AsError for command::rent_vehicles::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "ALREADY_RENTING"]
                #[status = CONFLICT]
                #[message = "Customer has an active `Rental` already"]
                AlreadyRenting,

                #[code = "INSUFFICIENT_INVENTORY"]
                #[status = CONFLICT]
                #[message = "Not enough `Vehicle`s available"]
                InsufficientInventory,
            }
        }

        Some(match self {
            Self::AlreadyRenting(_) => Error::AlreadyRenting.into(),
            Self::Db(e) => return e.try_as_error(),
            Self::InsufficientInventory { .. } => {
                Error::InsufficientInventory.into()
            }
            Self::VehicleUnavailable(e) => return e.try_as_error(),
        })
    }
}

impl AsError for command::return_vehicles::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NO_ACTIVE_RENTAL"]
                #[status = NOT_FOUND]
                #[message = "Customer has no active `Rental`"]
                NoActiveRental,

                #[code = "PAYMENT_DECLINED"]
                #[status = PAYMENT_REQUIRED]
                #[message = "Payment declined, the return may be retried"]
                PaymentDeclined,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::NoActiveRental(_) => Error::NoActiveRental.into(),
            Self::PaymentDeclined(_) => Error::PaymentDeclined.into(),
            Self::RentalClosed(e) => return e.try_as_error(),
            Self::VehicleNotExists(_) => return None,
        })
    }
}

impl AsError for command::perform_maintenance::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::VehicleNotExists(_) => {
                Some(api::query::VehicleError::NotExists.into())
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{Currency, Money};
    use service::{command, domain};

    use crate::AsError;

    fn code(err: &impl AsError) -> &'static str {
        err.try_as_error().map_or("INTERNAL_SERVER_ERROR", |e| e.code)
    }

    #[test]
    fn maps_rent_errors() {
        use command::rent_vehicles::ExecutionError as E;

        let customer = domain::customer::Id::new("alice").unwrap();
        assert_eq!(code(&E::AlreadyRenting(customer)), "ALREADY_RENTING");
        assert_eq!(
            code(&E::InsufficientInventory {
                requested: 3,
                available: 1,
            }),
            "INSUFFICIENT_INVENTORY",
        );
        assert_eq!(
            code(&E::VehicleUnavailable(domain::vehicle::UnavailableError(
                1.into(),
            ))),
            "INTERNAL_SERVER_ERROR",
        );
    }

    #[test]
    fn maps_return_errors() {
        use command::return_vehicles::ExecutionError as E;

        let customer = domain::customer::Id::new("alice").unwrap();
        assert_eq!(code(&E::NoActiveRental(customer)), "NO_ACTIVE_RENTAL");

        let declined = E::PaymentDeclined(Money::zero(Currency::Usd));
        assert_eq!(code(&declined), "PAYMENT_DECLINED");
        assert_eq!(
            declined.try_as_error().unwrap().status_code,
            http::StatusCode::PAYMENT_REQUIRED,
        );
    }

    #[test]
    fn maps_maintenance_errors() {
        use command::perform_maintenance::ExecutionError as E;

        assert_eq!(code(&E::VehicleNotExists(7.into())), "VEHICLE_NOT_EXISTS");
    }
}
