//! [`Command`] for renting [`Vehicle`]s out to a customer.

use std::num::NonZeroUsize;

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{customer, rental, vehicle, Rental, Vehicle},
    infra::{database, Database},
    read::{rental::Active, vehicle::Available},
    Service,
};

use super::Command;

/// [`Command`] for renting [`Vehicle`]s out to a customer.
///
/// The first `count` available [`Vehicle`]s (in fleet order) are allocated
/// to a new [`Rental`]. Either all of them are rented, or nothing changes.
#[derive(Clone, Debug)]
pub struct RentVehicles {
    /// ID of the customer renting the [`Vehicle`]s.
    pub customer_id: customer::Id,

    /// Number of [`Vehicle`]s to rent.
    pub count: NonZeroUsize,

    /// [`rental::Period`] the [`Rental`] is billed by.
    pub period: rental::Period,
}

impl<Db, Pay> Command<RentVehicles> for Service<Db, Pay>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Active<Rental>>, customer::Id>>,
            Ok = Option<Active<Rental>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Available<Vehicle>>, ()>>,
            Ok = Vec<Available<Vehicle>>,
            Err = Traced<database::Error>,
        > + Database<Update<Vehicle>, Err = Traced<database::Error>>
        + Database<Insert<Active<Rental>>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Rental;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: RentVehicles) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RentVehicles {
            customer_id,
            count,
            period,
        } = cmd;

        // Checks and allocation happen under the same lock.
        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let active = tx
            .execute(Select(By::<Option<Active<Rental>>, _>::new(
                customer_id.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if active.is_some() {
            return Err(tracerr::new!(E::AlreadyRenting(customer_id)));
        }

        let available = tx
            .execute(Select(By::<Vec<Available<Vehicle>>, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if available.len() < count.get() {
            return Err(tracerr::new!(E::InsufficientInventory {
                requested: count.get(),
                available: available.len(),
            }));
        }

        let mut vehicle_ids = Vec::with_capacity(count.get());
        for Available(mut vehicle) in available.into_iter().take(count.get()) {
            vehicle
                .rent()
                .map_err(tracerr::from_and_wrap!(=> E))?;
            if vehicle.needs_maintenance {
                log::info!(
                    "`Vehicle(id: {})` reached {} rides and needs maintenance",
                    vehicle.id,
                    vehicle.rides_since_maintenance,
                );
            }
            vehicle_ids.push(vehicle.id);
            tx.execute(Update(vehicle))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

        let rental = Rental::open(
            customer_id,
            vehicle_ids,
            period,
            DateTime::now().coerce(),
        );
        tx.execute(Insert(Active(rental.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            "`Rental` of {count} `{period}` vehicle(s) opened for `{}`: {:?}",
            rental.customer_id,
            rental.vehicle_ids,
        );

        Ok(rental)
    }
}

/// Error of [`RentVehicles`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Customer has an open [`Rental`] already.
    #[display("Customer `{_0}` has an active `Rental` already")]
    AlreadyRenting(#[error(not(source))] customer::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Not enough available [`Vehicle`]s to satisfy the request.
    #[display(
        "Requested {requested} vehicle(s), but only {available} available"
    )]
    InsufficientInventory {
        /// Number of requested [`Vehicle`]s.
        requested: usize,

        /// Number of available [`Vehicle`]s.
        available: usize,
    },

    /// Allocated [`Vehicle`] turned out to be not rentable.
    #[display("Allocated vehicle cannot be rented: {_0}")]
    #[from]
    VehicleUnavailable(vehicle::UnavailableError),
}

#[cfg(test)]
mod spec {
    use std::num::NonZeroUsize;

    use common::operations::{By, Select};

    use crate::{
        command::{fixture, Command as _},
        domain::{rental::Period, vehicle, Vehicle},
        infra::Database as _,
        read::vehicle::Available,
    };

    use super::{ExecutionError, RentVehicles};

    fn rent(customer: &str, count: usize) -> RentVehicles {
        RentVehicles {
            customer_id: fixture::customer(customer),
            count: NonZeroUsize::new(count).unwrap(),
            period: Period::Daily,
        }
    }

    #[tokio::test]
    async fn allocates_first_available_vehicles() {
        let db = fixture::fleet(5).await;
        let svc = fixture::service(&db, true);

        let first = svc.execute(rent("alice", 2)).await.unwrap();
        let second = svc.execute(rent("bob", 2)).await.unwrap();

        assert_eq!(first.vehicle_ids, [1, 2].map(vehicle::Id::from));
        assert_eq!(second.vehicle_ids, [3, 4].map(vehicle::Id::from));
        assert!(first.is_open());
        assert_eq!(first.cost, None);

        let available = db
            .execute(Select(By::<Vec<Available<Vehicle>>, _>::new(())))
            .await
            .unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].0.id, vehicle::Id::from(5));

        let rented = db
            .execute(Select(By::<Option<Vehicle>, _>::new(vehicle::Id::from(
                1,
            ))))
            .await
            .unwrap()
            .unwrap();
        assert!(!rented.available);
        assert_eq!(rented.rides_since_maintenance, 1);
    }

    #[tokio::test]
    async fn rejects_second_active_rental() {
        let db = fixture::fleet(5).await;
        let svc = fixture::service(&db, true);
        _ = svc.execute(rent("alice", 1)).await.unwrap();
        let before = fixture::vehicles(&db).await;

        let err = svc.execute(rent("alice", 1)).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::AlreadyRenting(id) if *id == fixture::customer("alice"),
        ));
        assert_eq!(fixture::vehicles(&db).await, before);
    }

    #[tokio::test]
    async fn no_partial_allocation() {
        let db = fixture::fleet(3).await;
        let svc = fixture::service(&db, true);
        _ = svc.execute(rent("alice", 1)).await.unwrap();
        let before = fixture::vehicles(&db).await;

        let err = svc.execute(rent("bob", 3)).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::InsufficientInventory {
                requested: 3,
                available: 2,
            },
        ));
        assert_eq!(fixture::vehicles(&db).await, before);
        assert!(fixture::active(&db, "bob").await.is_none());
    }

    #[tokio::test]
    async fn skips_vehicles_needing_maintenance() {
        let db = fixture::fleet(2).await;
        let svc = fixture::service(&db, true);
        fixture::wear_out(&db, vehicle::Id::from(1)).await;

        let rental = svc.execute(rent("alice", 1)).await.unwrap();

        assert_eq!(rental.vehicle_ids, [vehicle::Id::from(2)]);
        let err = svc.execute(rent("bob", 1)).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::InsufficientInventory { available: 0, .. },
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_rents_never_share_vehicles() {
        let db = fixture::fleet(3).await;
        let svc = fixture::service(&db, true);

        let rents = (0..10)
            .map(|n| {
                let svc = svc.clone();
                tokio::spawn(async move {
                    svc.execute(rent(&format!("customer-{n}"), 1)).await
                })
            })
            .collect::<Vec<_>>();
        let mut rented = Vec::new();
        for rent in rents {
            match rent.await.unwrap() {
                Ok(rental) => rented.extend(rental.vehicle_ids),
                Err(e) => assert!(matches!(
                    e.as_ref(),
                    ExecutionError::InsufficientInventory { available: 0, .. },
                )),
            }
        }

        rented.sort();
        assert_eq!(rented, [1, 2, 3].map(vehicle::Id::from));
        assert!(fixture::vehicles(&db).await.iter().all(|v| !v.available));
    }
}
