//! Employee rules

use chrono::Utc;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{EmployeeCreate, EmployeeField, EmployeeUpdate, EmployeeView, NewEmployee};

use super::{IntegrityGuard, snapshot, supplied, supplied_id};
use crate::db::{DepartmentRepository, EmployeeRepository, Store};
use crate::validation;

fn unknown_department() -> AppError {
    AppError::with_message(ErrorCode::DepartmentNotFound, "department does not exist")
}

impl<S: Store + ?Sized> IntegrityGuard<'_, S> {
    /// Validate and insert a new employee.
    ///
    /// The submitted password is discarded; the account gets `password_hash`
    /// (the digest of the process default password).
    pub async fn create_employee(
        &self,
        payload: &EmployeeCreate,
        password_hash: &str,
    ) -> AppResult<i64> {
        if !payload.is_complete() {
            return Err(AppError::new(ErrorCode::RequiredField));
        }
        if self.store.find_department(payload.department_id).await?.is_none() {
            return Err(unknown_department());
        }
        self.check_email(&payload.email, None).await?;
        validation::check_phone(&payload.phone)?;
        validation::check_first_name(&payload.first_name)?;
        validation::check_last_name(&payload.last_name)?;
        let hire_date = validation::parse_hire_date(&payload.hire_date)?;

        let id = self
            .store
            .insert_employee(&NewEmployee {
                first_name: payload.first_name.clone(),
                last_name: payload.last_name.clone(),
                email: payload.email.clone(),
                phone: payload.phone.clone(),
                hire_date,
                department_id: Some(payload.department_id),
                can_login: payload.login_enabled(),
                password_hash: password_hash.to_string(),
            })
            .await?;
        tracing::info!(employee_id = id, department_id = payload.department_id, "Employee created");
        Ok(id)
    }

    /// Apply the last supplied field of the payload
    pub async fn update_employee(&self, id: i64, payload: &EmployeeUpdate) -> AppResult<EmployeeField> {
        if self.store.find_employee(id).await?.is_none() {
            return Err(AppError::new(ErrorCode::EmployeeNotFound));
        }

        let mut field = None;
        if let Some(v) = supplied(&payload.first_name) {
            validation::check_first_name(v)?;
            field = Some(EmployeeField::FirstName(v.to_string()));
        }
        if let Some(v) = supplied(&payload.last_name) {
            validation::check_last_name(v)?;
            field = Some(EmployeeField::LastName(v.to_string()));
        }
        if let Some(v) = supplied(&payload.email) {
            self.check_email(v, Some(id)).await?;
            field = Some(EmployeeField::Email(v.to_string()));
        }
        if let Some(v) = supplied(&payload.phone) {
            validation::check_phone(v)?;
            field = Some(EmployeeField::Phone(v.to_string()));
        }
        if let Some(v) = supplied(&payload.hire_date) {
            field = Some(EmployeeField::HireDate(validation::parse_hire_date(v)?));
        }
        if let Some(department_id) = supplied_id(payload.department_id) {
            if self.store.find_department(department_id).await?.is_none() {
                return Err(unknown_department());
            }
            field = Some(EmployeeField::DepartmentId(department_id));
        }
        if let Some(flag) = payload.can_login.as_ref().filter(|f| f.is_supplied()) {
            field = Some(EmployeeField::CanLogin(flag.enabled()));
        }

        let field = field.ok_or_else(|| AppError::new(ErrorCode::NothingToUpdate))?;
        if !self.store.update_employee(id, &field, Utc::now()).await? {
            return Err(AppError::new(ErrorCode::EmployeeNotFound));
        }
        tracing::info!(employee_id = id, column = field.column(), "Employee updated");
        Ok(field)
    }

    /// Delete an employee that manages no department; returns the removed row
    pub async fn delete_employee(&self, id: i64) -> AppResult<EmployeeView> {
        let employee = self
            .store
            .find_employee(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

        if self.store.is_manager(id).await? {
            return Err(AppError::new(ErrorCode::EmployeeIsManager)
                .with_detail("employee", snapshot(&employee)));
        }
        if !self.store.delete_employee(id).await? {
            return Err(AppError::new(ErrorCode::EmployeeNotFound));
        }
        tracing::info!(employee_id = id, "Employee deleted");
        Ok(employee)
    }

    /// Uniqueness first, then shape
    async fn check_email(&self, email: &str, except: Option<i64>) -> AppResult<()> {
        if self.store.email_taken(email, except).await? {
            return Err(AppError::new(ErrorCode::EmailExists));
        }
        validation::check_email_spaces(email)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::hasher::hash_credential;
    use crate::guard::fixtures::{DEFAULT_PASSWORD, employee, graph};
    use shared::models::LoginFlag;

    #[tokio::test]
    async fn test_create_discards_submitted_password() {
        let g = graph().await;
        let guard = IntegrityGuard::new(&g.store);
        let default_hash = hash_credential(DEFAULT_PASSWORD);

        let id = guard
            .create_employee(&employee("j.doe@holiday-parks.eu", g.department_id), &default_hash)
            .await
            .unwrap();

        let view = g.store.find_employee(id).await.unwrap().unwrap();
        assert_eq!(view.department.as_deref(), Some("Front Office"));
        let creds = g
            .store
            .find_credentials("j.doe@holiday-parks.eu")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(creds.password_hash, default_hash);
        assert_ne!(creds.password_hash, hash_credential("ignored"));
        assert!(!creds.can_login);
    }

    #[tokio::test]
    async fn test_create_check_order() {
        let g = graph().await;
        let guard = IntegrityGuard::new(&g.store);

        let mut payload = employee("j.doe@holiday-parks.eu", g.department_id);
        payload.hire_date.clear();
        let err = guard.create_employee(&payload, "").await.unwrap_err();
        assert_eq!(err.message, "please provide all required fields");

        // Department is checked before the email
        let payload = employee("a@holiday-parks.eu", 99);
        let err = guard.create_employee(&payload, "").await.unwrap_err();
        assert_eq!(err.message, "department does not exist");

        let payload = employee("a@holiday-parks.eu", g.department_id);
        let err = guard.create_employee(&payload, "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailExists);

        let payload = employee("j doe@holiday-parks.eu", g.department_id);
        let err = guard.create_employee(&payload, "").await.unwrap_err();
        assert_eq!(err.message, "email cannot contain spaces");

        let mut payload = employee("j.doe@holiday-parks.eu", g.department_id);
        payload.phone = "06 123".into();
        payload.first_name = "john".into();
        let err = guard.create_employee(&payload, "").await.unwrap_err();
        assert_eq!(err.message, "phone number can only contain numbers and dashes");

        assert_eq!(g.store.count_employees().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_changes_only_one_field() {
        let g = graph().await;
        let guard = IntegrityGuard::new(&g.store);
        let id = guard
            .create_employee(&employee("j.doe@holiday-parks.eu", g.department_id), "")
            .await
            .unwrap();
        let before = g.store.find_employee(id).await.unwrap().unwrap();

        let field = guard
            .update_employee(
                id,
                &EmployeeUpdate {
                    phone: Some("06-99999999".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(field, EmployeeField::Phone("06-99999999".into()));

        let after = g.store.find_employee(id).await.unwrap().unwrap();
        assert_eq!(after.phone, "06-99999999");
        assert!(after.edit_date.is_some());
        assert_eq!(after.first_name, before.first_name);
        assert_eq!(after.email, before.email);
        assert_eq!(after.hire_date, before.hire_date);
        assert_eq!(after.department_id, before.department_id);
        assert_eq!(after.can_login, before.can_login);
        assert_eq!(after.creation_date, before.creation_date);
    }

    #[tokio::test]
    async fn test_update_last_supplied_field_wins() {
        let g = graph().await;
        let guard = IntegrityGuard::new(&g.store);
        let id = guard
            .create_employee(&employee("j.doe@holiday-parks.eu", g.department_id), "")
            .await
            .unwrap();

        let field = guard
            .update_employee(
                id,
                &EmployeeUpdate {
                    first_name: Some("Jane".into()),
                    can_login: Some(LoginFlag::Text("true".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(field, EmployeeField::CanLogin(true));
        let after = g.store.find_employee(id).await.unwrap().unwrap();
        assert_eq!(after.first_name, "John");
        assert!(after.can_login);
    }

    #[tokio::test]
    async fn test_update_rejects_empty_and_missing() {
        let g = graph().await;
        let guard = IntegrityGuard::new(&g.store);

        let err = guard
            .update_employee(
                g.manager_id,
                &EmployeeUpdate {
                    first_name: Some(String::new()),
                    can_login: Some(LoginFlag::Text(String::new())),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.message, "please provide a value to update");

        let err = guard
            .update_employee(404, &EmployeeUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmployeeNotFound);
    }

    #[tokio::test]
    async fn test_update_own_email_is_allowed() {
        let g = graph().await;
        let guard = IntegrityGuard::new(&g.store);
        let field = guard
            .update_employee(
                g.manager_id,
                &EmployeeUpdate {
                    email: Some("a@holiday-parks.eu".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(field.column(), "email");
    }

    #[tokio::test]
    async fn test_delete_manager_is_refused_by_id() {
        let g = graph().await;
        let guard = IntegrityGuard::new(&g.store);

        // Same display name as the manager, but not the manager
        let mut namesake = employee("other@holiday-parks.eu", g.department_id);
        namesake.first_name = "Mia".into();
        namesake.last_name = "Manager".into();
        let namesake_id = guard.create_employee(&namesake, "").await.unwrap();

        let err = guard.delete_employee(g.manager_id).await.unwrap_err();
        assert_eq!(err.message, "User is a manager");
        assert_eq!(err.body()["employee"]["id"], g.manager_id);

        let deleted = guard.delete_employee(namesake_id).await.unwrap();
        assert_eq!(deleted.email, "other@holiday-parks.eu");
        assert!(g.store.find_employee(namesake_id).await.unwrap().is_none());

        let err = guard.delete_employee(namesake_id).await.unwrap_err();
        assert_eq!(err.message, "User not found");
    }
}
