//! [`Query`] collection related to [`Rental`]s.

use common::operations::By;

use crate::{
    domain::{customer, Rental},
    read::rental::{Active as ActiveRental, Completed},
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the open [`Rental`] of a customer, if any.
pub type Active =
    DatabaseQuery<By<Option<ActiveRental<Rental>>, customer::Id>>;

/// Queries the [`Completed`] [`Rental`]s in completion order, optionally of
/// a single customer only.
pub type History =
    DatabaseQuery<By<Vec<Completed<Rental>>, Option<customer::Id>>>;
