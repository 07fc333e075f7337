//! Fixed Location Provider
//!
//! Implements LocationProvider with a last known location taken from
//! configuration. Without one it behaves like a device that has never
//! had a fix.

use crate::domain::entities::Coordinate;
use crate::domain::ports::LocationProvider;
use async_trait::async_trait;

pub struct FixedLocationProvider {
    last_known: Option<Coordinate>,
}

impl FixedLocationProvider {
    pub fn new(last_known: Option<Coordinate>) -> Self {
        Self { last_known }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn last_known_location(&self) -> anyhow::Result<Option<Coordinate>> {
        Ok(self.last_known)
    }
}
