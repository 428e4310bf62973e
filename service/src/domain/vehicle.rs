//! [`Vehicle`] definitions.

use common::define_kind;
use derive_more::{Display, Error, From, FromStr, Into};

/// Rentable unit of the fleet inventory.
///
/// [`Vehicle`] owns its own availability and wear state. It is rentable only
/// while it's [`available`] and doesn't [`need maintenance`].
///
/// [`available`]: Vehicle::available
/// [`need maintenance`]: Vehicle::needs_maintenance
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vehicle {
    /// ID of this [`Vehicle`].
    pub id: Id,

    /// [`Category`] of this [`Vehicle`].
    pub category: Category,

    /// Indicator whether this [`Vehicle`] is not rented at the moment.
    pub available: bool,

    /// Indicator whether this [`Vehicle`] must be serviced before it can be
    /// rented again.
    pub needs_maintenance: bool,

    /// Number of times this [`Vehicle`] was rented since its last
    /// maintenance.
    pub rides_since_maintenance: u32,
}

impl Vehicle {
    /// Number of rides after which a [`Vehicle`] is flagged for maintenance.
    pub const MAINTENANCE_THRESHOLD: u32 = 10;

    /// Creates a new available [`Vehicle`] in a serviced state.
    #[must_use]
    pub fn new(id: Id, category: Category) -> Self {
        Self {
            id,
            category,
            available: true,
            needs_maintenance: false,
            rides_since_maintenance: 0,
        }
    }

    /// Indicates whether this [`Vehicle`] can be [`rent()`]ed.
    ///
    /// [`rent()`]: Vehicle::rent
    #[must_use]
    pub fn is_rentable(&self) -> bool {
        self.available && !self.needs_maintenance
    }

    /// Rents this [`Vehicle`] out, counting one more ride.
    ///
    /// Reaching the [`MAINTENANCE_THRESHOLD`] flags this [`Vehicle`] for
    /// maintenance.
    ///
    /// # Errors
    ///
    /// If this [`Vehicle`] is not [`is_rentable()`]. No state is changed then.
    ///
    /// [`is_rentable()`]: Vehicle::is_rentable
    /// [`MAINTENANCE_THRESHOLD`]: Vehicle::MAINTENANCE_THRESHOLD
    pub fn rent(&mut self) -> Result<(), UnavailableError> {
        if !self.is_rentable() {
            return Err(UnavailableError(self.id));
        }

        self.available = false;
        self.rides_since_maintenance += 1;
        if self.rides_since_maintenance >= Self::MAINTENANCE_THRESHOLD {
            self.needs_maintenance = true;
        }
        Ok(())
    }

    /// Returns this [`Vehicle`] back to the fleet.
    ///
    /// Maintenance flag and rides counter are left untouched.
    pub fn return_unit(&mut self) {
        self.available = true;
    }

    /// Services this [`Vehicle`], resetting its wear state.
    pub fn perform_maintenance(&mut self) {
        self.rides_since_maintenance = 0;
        self.needs_maintenance = false;
    }
}

/// ID of a [`Vehicle`].
///
/// Assigned sequentially starting from `1`, in the order [`Vehicle`]s join
/// the fleet.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct Id(u32);

define_kind! {
    #[doc = "Category of a [`Vehicle`]."]
    enum Category {
        #[doc = "Regular [`Vehicle`]."]
        Standard = 1,

        #[doc = "Upscale [`Vehicle`]."]
        Premium = 2,
    }
}

/// Error of renting a [`Vehicle`] that is not [`Vehicle::is_rentable()`].
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("`Vehicle(id: {_0})` is not available or needs maintenance")]
pub struct UnavailableError(#[error(not(source))] pub Id);

#[cfg(test)]
mod spec {
    use super::{Category, Id, Vehicle};

    fn vehicle() -> Vehicle {
        Vehicle::new(Id::from(1), Category::Standard)
    }

    #[test]
    fn rent_and_return() {
        let mut v = vehicle();
        assert!(v.is_rentable());

        v.rent().unwrap();
        assert!(!v.available);
        assert!(!v.is_rentable());
        assert_eq!(v.rides_since_maintenance, 1);

        v.return_unit();
        assert!(v.available);
        assert!(v.is_rentable());
        assert_eq!(v.rides_since_maintenance, 1);
    }

    #[test]
    fn cannot_rent_twice() {
        let mut v = vehicle();
        v.rent().unwrap();

        let before = v.clone();
        let err = v.rent().unwrap_err();

        assert_eq!(err.0, v.id);
        assert_eq!(v, before);
    }

    #[test]
    fn flags_maintenance_on_threshold() {
        let mut v = vehicle();
        for ride in 1..=Vehicle::MAINTENANCE_THRESHOLD {
            v.rent().unwrap();
            assert_eq!(v.rides_since_maintenance, ride);
            assert_eq!(
                v.needs_maintenance,
                ride >= Vehicle::MAINTENANCE_THRESHOLD,
            );
            v.return_unit();
        }

        assert!(v.available);
        assert!(!v.is_rentable());
        assert!(v.rent().is_err());
        assert_eq!(
            v.rides_since_maintenance,
            Vehicle::MAINTENANCE_THRESHOLD,
        );

        // Returning keeps the flag until the vehicle is serviced.
        v.return_unit();
        assert!(v.needs_maintenance);

        v.perform_maintenance();
        assert!(v.is_rentable());
        assert_eq!(v.rides_since_maintenance, 0);
        v.rent().unwrap();
        assert_eq!(v.rides_since_maintenance, 1);
    }

    #[test]
    fn maintenance_is_idempotent() {
        let mut v = vehicle();
        v.rent().unwrap();

        v.perform_maintenance();
        let once = v.clone();
        v.perform_maintenance();

        assert_eq!(v, once);
        assert_eq!(v.rides_since_maintenance, 0);
        assert!(!v.needs_maintenance);
        // Maintenance doesn't return a rented vehicle.
        assert!(!v.available);
    }

    #[test]
    fn rentability_predicate_holds() {
        let mut v = vehicle();
        let ops: [fn(&mut Vehicle); 3] = [
            |v| drop(v.rent()),
            Vehicle::return_unit,
            Vehicle::perform_maintenance,
        ];
        for step in 0..100_usize {
            ops[(step * 7 + step / 3) % ops.len()](&mut v);
            assert_eq!(v.is_rentable(), v.available && !v.needs_maintenance);
            assert!(
                v.rides_since_maintenance <= Vehicle::MAINTENANCE_THRESHOLD,
            );
        }
    }

    #[test]
    fn category_names() {
        assert_eq!(Category::Premium.to_string(), "PREMIUM");
        assert_eq!("STANDARD".parse::<Category>().unwrap(), Category::Standard);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn kinds_are_serializable() {
        fn assert_serde<T>()
        where
            T: serde::Serialize + for<'de> serde::Deserialize<'de>,
        {
        }

        assert_serde::<Category>();
        assert_serde::<crate::domain::rental::Period>();
    }
}
