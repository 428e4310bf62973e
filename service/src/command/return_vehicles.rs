//! [`Command`] for returning the rented [`Vehicle`]s back to the fleet.

use std::convert::Infallible;

use common::{
    operations::{
        Authorize, By, Commit, Delete, Insert, Select, Transact, Transacted,
        Update,
    },
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{customer, rental, vehicle, Rental, Vehicle},
    infra::{database, Database, Payment},
    read::rental::{Active, Completed, Revenue},
    Service,
};

use super::Command;

/// [`Command`] for returning the rented [`Vehicle`]s of a customer back to
/// the fleet.
///
/// Closes the customer's open [`Rental`] and charges its cost. If the
/// [`Payment`] is declined, nothing changes and the return may be retried.
#[derive(Clone, Debug)]
pub struct ReturnVehicles {
    /// ID of the customer returning the [`Vehicle`]s.
    pub customer_id: customer::Id,
}

impl<Db, Pay> Command<ReturnVehicles> for Service<Db, Pay>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Active<Rental>>, customer::Id>>,
            Ok = Option<Active<Rental>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Vehicle>, vehicle::Id>>,
            Ok = Option<Vehicle>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Revenue, ()>>,
            Ok = Revenue,
            Err = Traced<database::Error>,
        > + Database<Update<Vehicle>, Err = Traced<database::Error>>
        + Database<
            Delete<By<Active<Rental>, customer::Id>>,
            Err = Traced<database::Error>,
        > + Database<Insert<Completed<Rental>>, Err = Traced<database::Error>>
        + Database<Update<Revenue>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    Pay: Payment<Authorize<Money>, Ok = bool, Err = Infallible>,
{
    type Ok = Rental;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ReturnVehicles,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ReturnVehicles { customer_id } = cmd;

        // Dropping the `tx` without committing rolls everything back.
        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let Active(mut rental) = tx
            .execute(Select(By::<Option<Active<Rental>>, _>::new(
                customer_id.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::NoActiveRental(customer_id.clone()))
            .map_err(tracerr::wrap!())?;

        let cost = rental
            .close(DateTime::now().coerce(), self.config().currency)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let approved = self
            .payment()
            .execute(Authorize(cost))
            .await
            .unwrap_or_else(|e| match e {});
        if !approved {
            log::warn!("payment of {cost} declined for `{customer_id}`");
            return Err(tracerr::new!(E::PaymentDeclined(cost)));
        }

        for &id in &rental.vehicle_ids {
            let mut vehicle = tx
                .execute(Select(By::<Option<Vehicle>, _>::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::VehicleNotExists(id))
                .map_err(tracerr::wrap!())?;
            vehicle.return_unit();
            tx.execute(Update(vehicle))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

        tx.execute(Delete(By::<Active<Rental>, _>::new(customer_id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Insert(Completed(rental.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let revenue: Decimal = tx
            .execute(Select(By::<Revenue, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .into();
        tx.execute(Update(Revenue::from(revenue + cost.amount)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!("`Rental` of `{customer_id}` settled for {cost}");

        Ok(rental)
    }
}

/// Error of [`ReturnVehicles`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Customer has no open [`Rental`].
    #[display("Customer `{_0}` has no active `Rental`")]
    NoActiveRental(#[error(not(source))] customer::Id),

    /// [`Payment`] of the [`Rental`] cost was declined.
    #[display("Payment of {_0} declined")]
    PaymentDeclined(#[error(not(source))] Money),

    /// [`Rental`] is closed already.
    #[display("`Rental` cannot be closed: {_0}")]
    #[from]
    RentalClosed(rental::AlreadyClosedError),

    /// [`Vehicle`] of the [`Rental`] does not exist.
    #[display("`Vehicle(id: {_0})` does not exist")]
    VehicleNotExists(#[error(not(source))] vehicle::Id),
}

#[cfg(test)]
mod spec {
    use std::num::NonZeroUsize;

    use common::{
        operations::{By, Select},
        Currency,
    };
    use rust_decimal::Decimal;

    use crate::{
        command::{fixture, Command as _, RentVehicles},
        domain::{customer, rental::Period, Rental},
        infra::{Database as _, Memory},
        read::rental::{Completed, Revenue},
    };

    use super::{ExecutionError, ReturnVehicles};

    fn rent(customer: &str, count: usize) -> RentVehicles {
        RentVehicles {
            customer_id: fixture::customer(customer),
            count: NonZeroUsize::new(count).unwrap(),
            period: Period::Daily,
        }
    }

    fn ret(customer: &str) -> ReturnVehicles {
        ReturnVehicles {
            customer_id: fixture::customer(customer),
        }
    }

    async fn revenue(db: &Memory) -> Decimal {
        db.execute(Select(By::<Revenue, _>::new(())))
            .await
            .unwrap()
            .into()
    }

    #[tokio::test]
    async fn settles_rental() {
        let db = fixture::fleet(5).await;
        let svc = fixture::service(&db, true);
        _ = svc.execute(rent("alice", 4)).await.unwrap();

        let rental = svc.execute(ret("alice")).await.unwrap();

        let cost = rental.cost.unwrap();
        assert_eq!(cost.amount, "56.00".parse::<Decimal>().unwrap());
        assert_eq!(cost.currency, Currency::Usd);
        assert!(!rental.is_open());

        assert!(fixture::active(&db, "alice").await.is_none());
        assert!(fixture::vehicles(&db).await.iter().all(|v| v.available));
        assert_eq!(revenue(&db).await, cost.amount);
        let history = db
            .execute(Select(
                By::<Vec<Completed<Rental>>, Option<customer::Id>>::new(None),
            ))
            .await
            .unwrap();
        assert_eq!(history, vec![Completed(rental)]);

        // Customer may rent again.
        _ = svc.execute(rent("alice", 1)).await.unwrap();
    }

    #[tokio::test]
    async fn requires_active_rental() {
        let db = fixture::fleet(1).await;
        let svc = fixture::service(&db, true);

        let err = svc.execute(ret("alice")).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NoActiveRental(_)));
        assert_eq!(revenue(&db).await, Decimal::ZERO);
    }

    #[tokio::test]
    async fn decline_keeps_everything_intact() {
        let db = fixture::fleet(3).await;
        let declining = fixture::service(&db, false);
        let rental = declining.execute(rent("alice", 2)).await.unwrap();
        let before = fixture::vehicles(&db).await;

        let err = declining.execute(ret("alice")).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::PaymentDeclined(_)));
        assert_eq!(fixture::vehicles(&db).await, before);
        assert_eq!(fixture::active(&db, "alice").await, Some(rental));
        assert_eq!(revenue(&db).await, Decimal::ZERO);

        // Retrying with an approving gateway succeeds.
        let approving = fixture::service(&db, true);
        let settled = approving.execute(ret("alice")).await.unwrap();
        assert_eq!(revenue(&db).await, settled.cost.unwrap().amount);
        assert!(fixture::active(&db, "alice").await.is_none());
    }
}
