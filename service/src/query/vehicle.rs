//! [`Query`] collection related to [`Vehicle`]s.

use common::operations::By;

use crate::{
    domain::{vehicle, Vehicle},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Vehicle`] by its [`vehicle::Id`].
pub type ById = DatabaseQuery<By<Option<Vehicle>, vehicle::Id>>;

/// Queries all the [`Vehicle`]s of the fleet, in [`vehicle::Id`] order.
pub type List = DatabaseQuery<By<Vec<Vehicle>, ()>>;

/// Queries the rentable [`Vehicle`]s of the fleet, in [`vehicle::Id`] order.
pub type Available =
    DatabaseQuery<By<Vec<read::vehicle::Available<Vehicle>>, ()>>;
