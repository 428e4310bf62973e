//! [`Command`] for adding a new [`Vehicle`] to the fleet.

use common::operations::{By, Commit, Insert, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{vehicle, Vehicle},
    infra::{database, Database},
    read::vehicle::TotalCount,
    Service,
};

use super::Command;

/// [`Command`] for adding a new [`Vehicle`] to the fleet.
///
/// New [`Vehicle`] is available and serviced, and gets the next sequential
/// [`vehicle::Id`].
#[derive(Clone, Copy, Debug)]
pub struct AddVehicle {
    /// [`vehicle::Category`] of a new [`Vehicle`].
    pub category: vehicle::Category,
}

impl<Db, Pay> Command<AddVehicle> for Service<Db, Pay>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<TotalCount, ()>>,
            Ok = TotalCount,
            Err = Traced<database::Error>,
        > + Database<Insert<Vehicle>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Vehicle;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: AddVehicle) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AddVehicle { category } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let total: usize = tx
            .execute(Select(By::<TotalCount, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .into();
        let id = u32::try_from(total)
            .ok()
            .and_then(|n| n.checked_add(1))
            .map(vehicle::Id::from)
            .ok_or(E::FleetFull)
            .map_err(tracerr::wrap!())?;

        let vehicle = Vehicle::new(id, category);
        tx.execute(Insert(vehicle.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::debug!("`Vehicle(id: {id})` of `{category}` category added");

        Ok(vehicle)
    }
}

/// Error of [`AddVehicle`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// No more [`vehicle::Id`]s can be assigned.
    #[display("Fleet is full")]
    FleetFull,
}

#[cfg(test)]
mod spec {
    use crate::{
        command::Command as _,
        domain::vehicle::{Category, Id},
        infra::{payment, Memory},
        Config, Service,
    };

    use super::AddVehicle;

    #[tokio::test]
    async fn assigns_sequential_ids() {
        let svc =
            Service::new(Config::default(), Memory::new(), payment::Fixed(true));

        let categories =
            [Category::Standard, Category::Premium, Category::Standard];
        for (n, category) in (1..).zip(categories) {
            let vehicle =
                svc.execute(AddVehicle { category }).await.unwrap();

            assert_eq!(vehicle.id, Id::from(n));
            assert_eq!(vehicle.category, category);
            assert!(vehicle.is_rentable());
            assert_eq!(vehicle.rides_since_maintenance, 0);
        }
    }
}
