//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the `Vehicle`s that can be rented right now, in fleet order.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "availableVehicles",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn available_vehicles(
        ctx: &Context,
    ) -> Result<Vec<api::Vehicle>, Error> {
        Ok(ctx
            .service()
            .execute(query::vehicle::Available::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .into_iter()
            .map(|read::vehicle::Available(v)| v.into())
            .collect())
    }

    /// Returns all the `Vehicle`s of the fleet, in fleet order.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "vehicles",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn vehicles(ctx: &Context) -> Result<Vec<api::Vehicle>, Error> {
        Ok(ctx
            .service()
            .execute(query::vehicle::List::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Returns the `Vehicle` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `VEHICLE_NOT_EXISTS` - the `Vehicle` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "vehicle",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn vehicle(
        id: api::vehicle::Id,
        ctx: &Context,
    ) -> Result<api::Vehicle, Error> {
        ctx.service()
            .execute(query::vehicle::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| VehicleError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the open `Rental` of the specified customer, if any.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_CUSTOMER_ID` - the customer identifier is malformed.
    #[tracing::instrument(
        skip_all,
        fields(
            customer_id = %customer_id,
            gql.name = "rental",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn rental(
        customer_id: String,
        ctx: &Context,
    ) -> Result<Option<api::Rental>, Error> {
        let customer_id =
            api::rental::customer_id(customer_id).map_err(ctx.error())?;
        Ok(ctx
            .service()
            .execute(query::rental::Active::by(customer_id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .map(|read::rental::Active(r)| r.into()))
    }

    /// Returns the completed `Rental`s in completion order, optionally of
    /// the specified customer only.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_CUSTOMER_ID` - the customer identifier is malformed.
    #[tracing::instrument(
        skip_all,
        fields(
            customer_id = ?customer_id,
            gql.name = "rentalHistory",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn rental_history(
        customer_id: Option<String>,
        ctx: &Context,
    ) -> Result<Vec<api::Rental>, Error> {
        let customer_id = customer_id
            .map(api::rental::customer_id)
            .transpose()
            .map_err(ctx.error())?;
        Ok(ctx
            .service()
            .execute(query::rental::History::by(customer_id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .into_iter()
            .map(|read::rental::Completed(r)| r.into())
            .collect())
    }

    /// Returns a snapshot report of the fleet state.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "report",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn report(ctx: &Context) -> Result<api::report::Fleet, Error> {
        ctx.service()
            .execute(query::report::Fleet)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

define_error! {
    enum VehicleError {
        #[code = "VEHICLE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Vehicle` with the specified ID does not exist"]
        NotExists,
    }
}
