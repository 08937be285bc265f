//! In-process store
//!
//! Mirrors the SQL schema: ids are never reused, the email index is unique
//! and every foreign key is checked on write.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use shared::models::{
    Credentials, Department, DepartmentCreate, DepartmentField, DepartmentView, Employee,
    EmployeeField, EmployeeView, Location, LocationCreate, LocationField, NewEmployee, Profile,
};

use super::{
    DepartmentRepository, EmployeeRepository, LocationRepository, RepoError, RepoResult, Store,
};

#[derive(Default)]
struct Tables {
    locations: BTreeMap<i64, Location>,
    departments: BTreeMap<i64, Department>,
    employees: BTreeMap<i64, Employee>,
    location_seq: i64,
    department_seq: i64,
    employee_seq: i64,
}

impl Tables {
    fn department_view(&self, d: &Department) -> DepartmentView {
        DepartmentView {
            id: d.id,
            name: d.name.clone(),
            location_id: d.location_id,
            location: self
                .locations
                .get(&d.location_id)
                .map(|l| l.name.clone())
                .unwrap_or_default(),
            manager_id: d.manager_id,
            manager: self
                .employees
                .get(&d.manager_id)
                .map(Employee::full_name)
                .unwrap_or_default(),
        }
    }

    fn employee_view(&self, e: &Employee) -> EmployeeView {
        let department = e.department_id.and_then(|id| self.departments.get(&id));
        EmployeeView {
            id: e.id,
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
            email: e.email.clone(),
            phone: e.phone.clone(),
            hire_date: e.hire_date,
            department_id: e.department_id,
            department: department.map(|d| d.name.clone()),
            manager_email: department
                .and_then(|d| self.employees.get(&d.manager_id))
                .map(|m| m.email.clone()),
            location: department.and_then(|d| self.locations.get(&d.location_id).cloned()),
            can_login: e.can_login,
            creation_date: e.creation_date,
            edit_date: e.edit_date,
            last_login: e.last_login,
        }
    }

    fn check_email(&self, email: &str, except: Option<i64>) -> RepoResult<()> {
        if self
            .employees
            .values()
            .any(|e| e.email == email && Some(e.id) != except)
        {
            return Err(RepoError::Constraint(
                "duplicate key value violates unique constraint \"idx_employee_email\"".into(),
            ));
        }
        Ok(())
    }

    fn check_fk(present: bool, constraint: &str) -> RepoResult<()> {
        if present {
            Ok(())
        } else {
            Err(RepoError::Constraint(format!(
                "violates foreign key constraint \"{constraint}\""
            )))
        }
    }
}

/// Thread-safe in-memory store
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

#[async_trait]
impl LocationRepository for MemoryStore {
    async fn list_locations(&self) -> RepoResult<Vec<Location>> {
        Ok(self.tables.read().locations.values().cloned().collect())
    }

    async fn find_location(&self, id: i64) -> RepoResult<Option<Location>> {
        Ok(self.tables.read().locations.get(&id).cloned())
    }

    async fn insert_location(&self, data: &LocationCreate) -> RepoResult<i64> {
        let mut t = self.tables.write();
        t.location_seq += 1;
        let id = t.location_seq;
        t.locations.insert(
            id,
            Location {
                id,
                name: data.name.clone(),
                address: data.address.clone(),
                postal_code: data.postal_code.clone(),
                city: data.city.clone(),
                country: data.country.clone(),
            },
        );
        Ok(id)
    }

    async fn update_location(&self, id: i64, field: &LocationField) -> RepoResult<bool> {
        let mut t = self.tables.write();
        Ok(t.locations
            .get_mut(&id)
            .map(|location| field.apply(location))
            .is_some())
    }

    async fn delete_location(&self, id: i64) -> RepoResult<bool> {
        let mut t = self.tables.write();
        let referenced = t.departments.values().any(|d| d.location_id == id);
        Tables::check_fk(!referenced, "department_location_id_fkey")?;
        Ok(t.locations.remove(&id).is_some())
    }

    async fn location_in_use(&self, id: i64) -> RepoResult<bool> {
        let t = self.tables.read();
        Ok(t.departments.values().any(|d| d.location_id == id))
    }
}

#[async_trait]
impl DepartmentRepository for MemoryStore {
    async fn list_departments(&self) -> RepoResult<Vec<DepartmentView>> {
        let t = self.tables.read();
        Ok(t.departments
            .values()
            .map(|d| t.department_view(d))
            .collect())
    }

    async fn find_department(&self, id: i64) -> RepoResult<Option<DepartmentView>> {
        let t = self.tables.read();
        Ok(t.departments.get(&id).map(|d| t.department_view(d)))
    }

    async fn insert_department(&self, data: &DepartmentCreate) -> RepoResult<i64> {
        let mut t = self.tables.write();
        Tables::check_fk(
            t.locations.contains_key(&data.location_id),
            "department_location_id_fkey",
        )?;
        Tables::check_fk(
            t.employees.contains_key(&data.manager_id),
            "department_manager_id_fkey",
        )?;
        t.department_seq += 1;
        let id = t.department_seq;
        t.departments.insert(
            id,
            Department {
                id,
                name: data.name.clone(),
                location_id: data.location_id,
                manager_id: data.manager_id,
            },
        );
        Ok(id)
    }

    async fn update_department(&self, id: i64, field: &DepartmentField) -> RepoResult<bool> {
        let mut t = self.tables.write();
        match field {
            DepartmentField::LocationId(l) => Tables::check_fk(
                t.locations.contains_key(l),
                "department_location_id_fkey",
            )?,
            DepartmentField::ManagerId(m) => Tables::check_fk(
                t.employees.contains_key(m),
                "department_manager_id_fkey",
            )?,
            DepartmentField::Name(_) => {}
        }
        Ok(t.departments
            .get_mut(&id)
            .map(|department| field.apply(department))
            .is_some())
    }

    async fn delete_department(&self, id: i64) -> RepoResult<bool> {
        let mut t = self.tables.write();
        let referenced = t.employees.values().any(|e| e.department_id == Some(id));
        Tables::check_fk(!referenced, "fk_employee_department")?;
        Ok(t.departments.remove(&id).is_some())
    }

    async fn department_has_employees(&self, id: i64) -> RepoResult<bool> {
        let t = self.tables.read();
        Ok(t.employees.values().any(|e| e.department_id == Some(id)))
    }

    async fn is_manager(&self, employee_id: i64) -> RepoResult<bool> {
        let t = self.tables.read();
        Ok(t.departments.values().any(|d| d.manager_id == employee_id))
    }
}

#[async_trait]
impl EmployeeRepository for MemoryStore {
    async fn list_employees(&self) -> RepoResult<Vec<EmployeeView>> {
        let t = self.tables.read();
        Ok(t.employees.values().map(|e| t.employee_view(e)).collect())
    }

    async fn find_employee(&self, id: i64) -> RepoResult<Option<EmployeeView>> {
        let t = self.tables.read();
        Ok(t.employees.get(&id).map(|e| t.employee_view(e)))
    }

    async fn email_taken(&self, email: &str, except: Option<i64>) -> RepoResult<bool> {
        Ok(self.tables.read().check_email(email, except).is_err())
    }

    async fn insert_employee(&self, data: &NewEmployee) -> RepoResult<i64> {
        let mut t = self.tables.write();
        t.check_email(&data.email, None)?;
        if let Some(department_id) = data.department_id {
            Tables::check_fk(
                t.departments.contains_key(&department_id),
                "fk_employee_department",
            )?;
        }
        t.employee_seq += 1;
        let id = t.employee_seq;
        t.employees.insert(
            id,
            Employee {
                id,
                first_name: data.first_name.clone(),
                last_name: data.last_name.clone(),
                email: data.email.clone(),
                phone: data.phone.clone(),
                hire_date: data.hire_date,
                department_id: data.department_id,
                can_login: data.can_login,
                password_hash: data.password_hash.clone(),
                creation_date: Utc::now(),
                edit_date: None,
                last_login: None,
            },
        );
        Ok(id)
    }

    async fn update_employee(
        &self,
        id: i64,
        field: &EmployeeField,
        edited_at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        let mut t = self.tables.write();
        match field {
            EmployeeField::Email(email) => t.check_email(email, Some(id))?,
            EmployeeField::DepartmentId(d) => {
                Tables::check_fk(t.departments.contains_key(d), "fk_employee_department")?
            }
            _ => {}
        }
        Ok(t.employees
            .get_mut(&id)
            .map(|employee| {
                field.apply(employee);
                employee.edit_date = Some(edited_at);
            })
            .is_some())
    }

    async fn delete_employee(&self, id: i64) -> RepoResult<bool> {
        let mut t = self.tables.write();
        let referenced = t.departments.values().any(|d| d.manager_id == id);
        Tables::check_fk(!referenced, "department_manager_id_fkey")?;
        Ok(t.employees.remove(&id).is_some())
    }

    async fn count_employees(&self) -> RepoResult<i64> {
        Ok(self.tables.read().employees.len() as i64)
    }

    async fn find_credentials(&self, email: &str) -> RepoResult<Option<Credentials>> {
        let t = self.tables.read();
        Ok(t.employees
            .values()
            .find(|e| e.email == email)
            .map(|e| Credentials {
                id: e.id,
                email: e.email.clone(),
                password_hash: e.password_hash.clone(),
                can_login: e.can_login,
            }))
    }

    async fn record_login(&self, id: i64, at: DateTime<Utc>) -> RepoResult<()> {
        if let Some(employee) = self.tables.write().employees.get_mut(&id) {
            employee.last_login = Some(at);
        }
        Ok(())
    }

    async fn find_profile(&self, id: i64) -> RepoResult<Option<Profile>> {
        let t = self.tables.read();
        Ok(t.employees.get(&id).map(|e| Profile {
            username: e.email.clone(),
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
            last_login: e.last_login,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_employee(email: &str, department_id: Option<i64>) -> NewEmployee {
        NewEmployee {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: email.into(),
            phone: "06-12345678".into(),
            hire_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            department_id,
            can_login: false,
            password_hash: String::new(),
        }
    }

    fn location() -> LocationCreate {
        LocationCreate {
            name: "Park".into(),
            address: "Dune 1".into(),
            postal_code: "1234".into(),
            city: "Zandvoort".into(),
            country: "NL".into(),
        }
    }

    #[tokio::test]
    async fn test_unique_email_is_enforced() {
        let store = MemoryStore::new();
        store
            .insert_employee(&new_employee("a@holiday-parks.eu", None))
            .await
            .unwrap();
        let err = store
            .insert_employee(&new_employee("a@holiday-parks.eu", None))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
        assert_eq!(store.count_employees().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_foreign_keys_are_enforced() {
        let store = MemoryStore::new();
        let err = store
            .insert_employee(&new_employee("a@holiday-parks.eu", Some(7)))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));

        let manager = store
            .insert_employee(&new_employee("m@holiday-parks.eu", None))
            .await
            .unwrap();
        let location_id = store.insert_location(&location()).await.unwrap();
        let department_id = store
            .insert_department(&DepartmentCreate {
                name: "Spa".into(),
                location_id,
                manager_id: manager,
            })
            .await
            .unwrap();

        assert!(matches!(
            store.delete_location(location_id).await,
            Err(RepoError::Constraint(_))
        ));
        assert!(matches!(
            store.delete_employee(manager).await,
            Err(RepoError::Constraint(_))
        ));
        assert!(store.find_department(department_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_employee_view_joins_department() {
        let store = MemoryStore::new();
        let manager = store
            .insert_employee(&new_employee("m@holiday-parks.eu", None))
            .await
            .unwrap();
        let location_id = store.insert_location(&location()).await.unwrap();
        let department_id = store
            .insert_department(&DepartmentCreate {
                name: "Spa".into(),
                location_id,
                manager_id: manager,
            })
            .await
            .unwrap();
        let id = store
            .insert_employee(&new_employee("e@holiday-parks.eu", Some(department_id)))
            .await
            .unwrap();

        let view = store.find_employee(id).await.unwrap().unwrap();
        assert_eq!(view.department.as_deref(), Some("Spa"));
        assert_eq!(view.manager_email.as_deref(), Some("m@holiday-parks.eu"));
        assert_eq!(view.location.map(|l| l.city), Some("Zandvoort".to_string()));

        let department = store.find_department(department_id).await.unwrap().unwrap();
        assert_eq!(department.manager, "John Doe");
        assert_eq!(department.location, "Park");
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let store = MemoryStore::new();
        let first = store.insert_location(&location()).await.unwrap();
        assert!(store.delete_location(first).await.unwrap());
        let second = store.insert_location(&location()).await.unwrap();
        assert!(second > first);
    }
}
