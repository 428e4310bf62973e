//! [`Command`] for servicing a [`Vehicle`].

use common::operations::{By, Commit, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{vehicle, Vehicle},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for servicing a [`Vehicle`], making it rentable again once
/// it's returned.
#[derive(Clone, Copy, Debug)]
pub struct PerformMaintenance {
    /// ID of the [`Vehicle`] to service.
    pub vehicle_id: vehicle::Id,
}

impl<Db, Pay> Command<PerformMaintenance> for Service<Db, Pay>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Vehicle>, vehicle::Id>>,
            Ok = Option<Vehicle>,
            Err = Traced<database::Error>,
        > + Database<Update<Vehicle>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Vehicle;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: PerformMaintenance,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let PerformMaintenance { vehicle_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut vehicle = tx
            .execute(Select(By::<Option<Vehicle>, _>::new(vehicle_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::VehicleNotExists(vehicle_id))
            .map_err(tracerr::wrap!())?;

        vehicle.perform_maintenance();
        tx.execute(Update(vehicle.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!("`Vehicle(id: {vehicle_id})` serviced");

        Ok(vehicle)
    }
}

/// Error of [`PerformMaintenance`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Vehicle`] with the provided ID does not exist.
    #[display("`Vehicle(id: {_0})` does not exist")]
    VehicleNotExists(#[error(not(source))] vehicle::Id),
}

#[cfg(test)]
mod spec {
    use std::num::NonZeroUsize;

    use crate::{
        command::{
            fixture, rent_vehicles, Command as _, RentVehicles, ReturnVehicles,
        },
        domain::{rental::Period, vehicle, Vehicle},
    };

    use super::{ExecutionError, PerformMaintenance};

    #[tokio::test]
    async fn worn_out_vehicle_is_not_rented_until_serviced() {
        let db = fixture::fleet(1).await;
        let svc = fixture::service(&db, true);
        let rent = || RentVehicles {
            customer_id: fixture::customer("alice"),
            count: NonZeroUsize::MIN,
            period: Period::Hourly,
        };
        let ret = || ReturnVehicles {
            customer_id: fixture::customer("alice"),
        };

        for _ in 0..Vehicle::MAINTENANCE_THRESHOLD {
            _ = svc.execute(rent()).await.unwrap();
            _ = svc.execute(ret()).await.unwrap();
        }
        let [vehicle]: [Vehicle; 1] =
            fixture::vehicles(&db).await.try_into().unwrap();
        assert!(vehicle.available);
        assert!(vehicle.needs_maintenance);

        let err = svc.execute(rent()).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            rent_vehicles::ExecutionError::InsufficientInventory { .. },
        ));

        _ = svc
            .execute(PerformMaintenance {
                vehicle_id: vehicle.id,
            })
            .await
            .unwrap();
        let rental = svc.execute(rent()).await.unwrap();
        assert_eq!(rental.vehicle_ids, [vehicle.id]);
    }

    #[tokio::test]
    async fn restores_rentability() {
        let db = fixture::fleet(1).await;
        let svc = fixture::service(&db, true);
        let id = vehicle::Id::from(1);
        fixture::wear_out(&db, id).await;

        let vehicle = svc
            .execute(PerformMaintenance { vehicle_id: id })
            .await
            .unwrap();

        assert!(vehicle.is_rentable());
        assert_eq!(vehicle.rides_since_maintenance, 0);
        assert_eq!(fixture::vehicles(&db).await, vec![vehicle]);
    }

    #[tokio::test]
    async fn requires_existing_vehicle() {
        let db = fixture::fleet(1).await;
        let svc = fixture::service(&db, true);

        let err = svc
            .execute(PerformMaintenance {
                vehicle_id: vehicle::Id::from(2),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::VehicleNotExists(_)));
    }
}
