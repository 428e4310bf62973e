use common::operations::{By, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{vehicle, Vehicle},
    infra::{
        database::{
            self,
            memory::{self, Connection},
            Memory,
        },
        Database,
    },
    read,
};

impl<C> Database<Select<By<Vec<Vehicle>, ()>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Vehicle>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Vehicle>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(|s| s.vehicles.clone())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Vec<read::vehicle::Available<Vehicle>>, ()>>>
    for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<read::vehicle::Available<Vehicle>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<read::vehicle::Available<Vehicle>>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(|s| {
            s.vehicles
                .iter()
                .filter(|v| v.is_rentable())
                .cloned()
                .map(read::vehicle::Available)
                .collect()
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Option<Vehicle>, vehicle::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<Vehicle>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Vehicle>, vehicle::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| s.vehicles.iter().find(|v| v.id == id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<read::vehicle::TotalCount, ()>>> for Memory<C>
where
    C: Connection,
{
    type Ok = read::vehicle::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<read::vehicle::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(|s| s.vehicles.len().into())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Vehicle>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(vehicle): Insert<Vehicle>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|s| {
            // Fleet order must match the IDs order.
            if s.vehicles.last().is_some_and(|last| last.id >= vehicle.id) {
                return Err(memory::Error::VehicleOutOfOrder(vehicle.id));
            }
            s.vehicles.push(vehicle);
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())?
        .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}

impl<C> Database<Update<Vehicle>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(vehicle): Update<Vehicle>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|s| {
            let stored = s
                .vehicle_mut(vehicle.id)
                .ok_or(memory::Error::VehicleNotStored(vehicle.id))?;
            *stored = vehicle;
            Ok::<_, memory::Error>(())
        })
        .await
        .map_err(tracerr::wrap!())?
        .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}
