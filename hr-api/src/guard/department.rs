//! Department rules

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DepartmentCreate, DepartmentField, DepartmentUpdate, DepartmentView};

use super::{IntegrityGuard, snapshot, supplied, supplied_id};
use crate::db::{DepartmentRepository, EmployeeRepository, LocationRepository, Store};

impl<S: Store + ?Sized> IntegrityGuard<'_, S> {
    pub async fn create_department(&self, payload: &DepartmentCreate) -> AppResult<i64> {
        if !payload.is_complete() {
            return Err(AppError::new(ErrorCode::RequiredField));
        }
        self.require_location(payload.location_id).await?;
        self.require_manager(payload.manager_id).await?;

        let id = self.store.insert_department(payload).await?;
        tracing::info!(department_id = id, location_id = payload.location_id, "Department created");
        Ok(id)
    }

    /// Apply the last supplied field of the payload
    pub async fn update_department(
        &self,
        id: i64,
        payload: &DepartmentUpdate,
    ) -> AppResult<DepartmentField> {
        if self.store.find_department(id).await?.is_none() {
            return Err(AppError::new(ErrorCode::DepartmentNotFound));
        }

        let mut field = None;
        if let Some(v) = supplied(&payload.name) {
            field = Some(DepartmentField::Name(v.to_string()));
        }
        if let Some(location_id) = supplied_id(payload.location_id) {
            self.require_location(location_id).await?;
            field = Some(DepartmentField::LocationId(location_id));
        }
        if let Some(manager_id) = supplied_id(payload.manager_id) {
            self.require_manager(manager_id).await?;
            field = Some(DepartmentField::ManagerId(manager_id));
        }

        let field = field.ok_or_else(|| AppError::new(ErrorCode::NothingToUpdate))?;
        if !self.store.update_department(id, &field).await? {
            return Err(AppError::new(ErrorCode::DepartmentNotFound));
        }
        tracing::info!(department_id = id, column = field.column(), "Department updated");
        Ok(field)
    }

    /// Delete a department nobody works in; returns the removed row.
    ///
    /// The dependency check runs before the delete, so a refused delete
    /// leaves the row in place.
    pub async fn delete_department(&self, id: i64) -> AppResult<DepartmentView> {
        let department = self
            .store
            .find_department(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::DepartmentNotFound))?;

        if self.store.department_has_employees(id).await? {
            return Err(AppError::new(ErrorCode::DepartmentHasEmployees)
                .with_detail("department", snapshot(&department)));
        }
        if !self.store.delete_department(id).await? {
            return Err(AppError::new(ErrorCode::DepartmentNotFound));
        }
        tracing::info!(department_id = id, "Department deleted");
        Ok(department)
    }

    async fn require_location(&self, id: i64) -> AppResult<()> {
        if self.store.find_location(id).await?.is_none() {
            return Err(AppError::with_message(
                ErrorCode::LocationNotFound,
                "Location does not exist",
            ));
        }
        Ok(())
    }

    async fn require_manager(&self, id: i64) -> AppResult<()> {
        if self.store.find_employee(id).await?.is_none() {
            return Err(AppError::with_message(
                ErrorCode::EmployeeNotFound,
                "Manager does not exist",
            ));
        }
        Ok(())
    }
}
