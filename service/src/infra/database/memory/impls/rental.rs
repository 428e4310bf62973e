use common::operations::{By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{customer, Rental},
    infra::{
        database::{self, memory::Connection, Memory},
        Database,
    },
    read::rental::{history, Active, Completed, Revenue},
};

impl<C> Database<Select<By<Option<Active<Rental>>, customer::Id>>>
    for Memory<C>
where
    C: Connection,
{
    type Ok = Option<Active<Rental>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Active<Rental>>, customer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let customer_id = by.into_inner();
        self.read(|s| s.active.get(&customer_id).cloned().map(Active))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Active<Rental>>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(Active(rental)): Insert<Active<Rental>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|s| {
            drop(s.active.insert(rental.customer_id.clone(), rental));
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Delete<By<Active<Rental>, customer::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Active<Rental>, customer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let customer_id = by.into_inner();
        self.write(|s| drop(s.active.remove(&customer_id)))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Completed<Rental>>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(Completed(rental)): Insert<Completed<Rental>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|s| s.history.push(rental))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Vec<Completed<Rental>>, Option<customer::Id>>>>
    for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Completed<Rental>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Completed<Rental>>, Option<customer::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let customer_id = by.into_inner();
        self.read(|s| {
            s.history
                .iter()
                .filter(|r| {
                    customer_id.as_ref().map_or(true, |id| r.customer_id == *id)
                })
                .cloned()
                .map(Completed)
                .collect()
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<history::TotalCount, ()>>> for Memory<C>
where
    C: Connection,
{
    type Ok = history::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<history::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(|s| s.history.len().into())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Revenue, ()>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Revenue;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Revenue, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(|s| s.revenue.into())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Revenue>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(revenue): Update<Revenue>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|s| s.revenue = revenue.into())
            .await
            .map_err(tracerr::wrap!())
    }
}
