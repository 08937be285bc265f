//! Location rules

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Location, LocationCreate, LocationField, LocationUpdate};

use super::{IntegrityGuard, supplied};
use crate::db::{LocationRepository, Store};
use crate::validation;

impl<S: Store + ?Sized> IntegrityGuard<'_, S> {
    pub async fn create_location(&self, payload: &LocationCreate) -> AppResult<i64> {
        if !payload.is_complete() {
            return Err(AppError::new(ErrorCode::RequiredField));
        }
        let existing = self.store.list_locations().await?;
        if existing.iter().any(|l| payload.is_identical_to(l)) {
            return Err(AppError::new(ErrorCode::LocationExists));
        }
        validation::check_name("name", &payload.name)?;
        validation::check_address(&payload.address)?;
        validation::check_name("city", &payload.city)?;

        let id = self.store.insert_location(payload).await?;
        tracing::info!(location_id = id, "Location created");
        Ok(id)
    }

    /// Apply the last supplied field of the payload
    pub async fn update_location(&self, id: i64, payload: &LocationUpdate) -> AppResult<LocationField> {
        if self.store.find_location(id).await?.is_none() {
            return Err(AppError::new(ErrorCode::LocationNotFound));
        }

        let mut field = None;
        if let Some(v) = supplied(&payload.name) {
            validation::check_name("name", v)?;
            field = Some(LocationField::Name(v.to_string()));
        }
        if let Some(v) = supplied(&payload.address) {
            validation::check_address(v)?;
            field = Some(LocationField::Address(v.to_string()));
        }
        if let Some(v) = supplied(&payload.postal_code) {
            field = Some(LocationField::PostalCode(v.to_string()));
        }
        if let Some(v) = supplied(&payload.city) {
            validation::check_name("city", v)?;
            field = Some(LocationField::City(v.to_string()));
        }
        if let Some(v) = supplied(&payload.country) {
            field = Some(LocationField::Country(v.to_string()));
        }

        let field = field.ok_or_else(|| AppError::new(ErrorCode::NothingToUpdate))?;
        if !self.store.update_location(id, &field).await? {
            return Err(AppError::new(ErrorCode::LocationNotFound));
        }
        tracing::info!(location_id = id, column = field.column(), "Location updated");
        Ok(field)
    }

    /// Delete a location no department uses; returns the removed row
    pub async fn delete_location(&self, id: i64) -> AppResult<Location> {
        let location = self
            .store
            .find_location(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::LocationNotFound))?;

        if self.store.location_in_use(id).await? {
            return Err(AppError::new(ErrorCode::LocationInUse));
        }
        if !self.store.delete_location(id).await? {
            return Err(AppError::new(ErrorCode::LocationNotFound));
        }
        tracing::info!(location_id = id, "Location deleted");
        Ok(location)
    }
}
