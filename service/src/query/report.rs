//! [`Query`] producing a report of the fleet state.

use common::{
    operations::{By, Select, Transact, Transacted},
    Money,
};
use rust_decimal::Decimal;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Rental;
use crate::{
    domain::Vehicle,
    infra::{database, Database},
    read::rental::{history, Revenue},
    Query, Service,
};

/// [`Query`] producing a snapshot report of the fleet state.
///
/// All the numbers are read from the same consistent state. Nothing is
/// modified.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fleet;

/// Output of the [`Fleet`] [`Query`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Output {
    /// Total number of [`Vehicle`]s in the fleet.
    pub total_vehicles: usize,

    /// Number of [`Vehicle`]s that can be rented right now.
    pub available_vehicles: usize,

    /// Number of [`Vehicle`]s flagged for maintenance.
    pub vehicles_in_maintenance: usize,

    /// Total amount collected for completed [`Rental`]s.
    pub revenue: Money,

    /// Number of completed and paid [`Rental`]s.
    pub completed_rentals: usize,
}

impl<Db, Pay> Query<Fleet> for Service<Db, Pay>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Vec<Vehicle>, ()>>,
            Ok = Vec<Vehicle>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Revenue, ()>>,
            Ok = Revenue,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<history::TotalCount, ()>>,
            Ok = history::TotalCount,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Fleet) -> Result<Self::Ok, Self::Err> {
        // Never committed, so released on drop.
        let snapshot = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::wrap!())?;

        let vehicles = snapshot
            .execute(Select(By::<Vec<Vehicle>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        let revenue: Decimal = snapshot
            .execute(Select(By::<Revenue, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?
            .into();
        let completed_rentals = snapshot
            .execute(Select(By::<history::TotalCount, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?
            .into();

        Ok(Output {
            total_vehicles: vehicles.len(),
            available_vehicles: vehicles
                .iter()
                .filter(|v| v.is_rentable())
                .count(),
            vehicles_in_maintenance: vehicles
                .iter()
                .filter(|v| v.needs_maintenance)
                .count(),
            revenue: Money::rounded(revenue, self.config().currency),
            completed_rentals,
        })
    }
}

#[cfg(test)]
mod spec {
    use std::num::NonZeroUsize;

    use common::{Currency, Money};
    use rust_decimal::Decimal;

    use crate::{
        command::{fixture, Command as _, RentVehicles, ReturnVehicles},
        domain::{rental::Period, vehicle},
        Query as _,
    };

    use super::{Fleet, Output};

    #[tokio::test]
    async fn reports_fleet_state() {
        let db = fixture::fleet(6).await;
        let svc = fixture::service(&db, true);
        fixture::wear_out(&db, vehicle::Id::from(6)).await;

        assert_eq!(
            svc.execute(Fleet).await.unwrap(),
            Output {
                total_vehicles: 6,
                available_vehicles: 5,
                vehicles_in_maintenance: 1,
                revenue: Money::zero(Currency::Usd),
                completed_rentals: 0,
            },
        );

        for (customer, count) in [("alice", 3), ("bob", 1)] {
            _ = svc
                .execute(RentVehicles {
                    customer_id: fixture::customer(customer),
                    count: NonZeroUsize::new(count).unwrap(),
                    period: Period::Daily,
                })
                .await
                .unwrap();
        }
        _ = svc
            .execute(ReturnVehicles {
                customer_id: fixture::customer("alice"),
            })
            .await
            .unwrap();

        let report = svc.execute(Fleet).await.unwrap();
        assert_eq!(report.total_vehicles, 6);
        assert_eq!(report.available_vehicles, 4);
        assert_eq!(report.vehicles_in_maintenance, 1);
        assert_eq!(report.completed_rentals, 1);
        assert_eq!(report.revenue.amount, Decimal::from(42));
        assert_eq!(report.revenue.currency, Currency::Usd);

        // Reporting has no side effects.
        assert_eq!(svc.execute(Fleet).await.unwrap(), report);
    }
}
