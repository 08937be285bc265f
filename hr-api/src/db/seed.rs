//! Bootstrap account and demo data

use chrono::Utc;
use serde::Serialize;
use shared::models::{DepartmentCreate, EmployeeCreate, LocationCreate, LoginFlag, NewEmployee};

use super::{EmployeeRepository, RepoResult, Store};
use crate::guard::IntegrityGuard;

/// Insert the default login when the employee table is empty.
///
/// Returns `true` when the account was created.
pub async fn ensure_default_user<S: Store + ?Sized>(
    store: &S,
    email: &str,
    password_hash: &str,
) -> RepoResult<bool> {
    if store.count_employees().await? > 0 {
        return Ok(false);
    }
    let id = store
        .insert_employee(&NewEmployee {
            first_name: "Admin".into(),
            last_name: "Account".into(),
            email: email.to_string(),
            phone: "0".into(),
            hire_date: Utc::now().date_naive(),
            department_id: None,
            can_login: true,
            password_hash: password_hash.to_string(),
        })
        .await?;
    tracing::info!(employee_id = id, email = %email, "Default user created");
    Ok(true)
}

/// Rows created by [`seed_mock_data`]
#[derive(Debug, Default, Serialize)]
pub struct MockSummary {
    pub locations: usize,
    pub departments: usize,
    pub employees: usize,
}

fn demo_location(n: u32, postal_code: &str) -> LocationCreate {
    LocationCreate {
        name: format!("Location {n}"),
        address: format!("Address {n}"),
        postal_code: postal_code.into(),
        city: format!("City {n}"),
        country: format!("Country {n}"),
    }
}

fn demo_employee(
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: &str,
    department_id: i64,
    can_login: bool,
) -> EmployeeCreate {
    EmployeeCreate {
        first_name: first_name.into(),
        last_name: last_name.into(),
        email: email.into(),
        phone: phone.into(),
        hire_date: "2021-01-01".into(),
        department_id,
        can_login: can_login.then_some(LoginFlag::Bool(true)),
        password: None,
    }
}

/// Two locations, two departments managed by `manager_id`, three employees.
///
/// Every row goes through the guard; a rejected row is logged and skipped.
pub async fn seed_mock_data<S: Store + ?Sized>(
    store: &S,
    manager_id: i64,
    password_hash: &str,
    email_domain: &str,
) -> MockSummary {
    let guard = IntegrityGuard::new(store);
    let mut summary = MockSummary::default();

    let mut location_ids = Vec::new();
    for (n, postal_code) in [(1, "1234"), (2, "5678")] {
        match guard.create_location(&demo_location(n, postal_code)).await {
            Ok(id) => {
                location_ids.push(id);
                summary.locations += 1;
            }
            Err(e) => tracing::warn!(n, "Mock location skipped: {}", e.message),
        }
    }

    let mut department_ids = Vec::new();
    for (n, location_id) in location_ids.iter().enumerate() {
        let payload = DepartmentCreate {
            name: format!("Department {}", n + 1),
            location_id: *location_id,
            manager_id,
        };
        match guard.create_department(&payload).await {
            Ok(id) => {
                department_ids.push(id);
                summary.departments += 1;
            }
            Err(e) => tracing::warn!(name = %payload.name, "Mock department skipped: {}", e.message),
        }
    }

    let Some(&first) = department_ids.first() else {
        return summary;
    };
    let second = department_ids.get(1).copied().unwrap_or(first);
    let employees = [
        demo_employee(
            "Employee 1",
            "Lastname 1",
            &format!("test{email_domain}"),
            "1234567890",
            first,
            false,
        ),
        demo_employee(
            "Employee 2",
            "Lastname 2",
            &format!("test2{email_domain}"),
            "0987654321",
            second,
            false,
        ),
        demo_employee(
            "Admin 1",
            "Lastname 1",
            &format!("admin1{email_domain}"),
            "1234567890",
            first,
            true,
        ),
    ];
    for payload in &employees {
        match guard.create_employee(payload, password_hash).await {
            Ok(_) => summary.employees += 1,
            Err(e) => {
                tracing::warn!(email = %payload.email, "Mock employee skipped: {}", e.message)
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DepartmentRepository, MemoryStore};

    #[tokio::test]
    async fn test_default_user_only_on_empty_table() {
        let store = MemoryStore::new();
        assert!(ensure_default_user(&store, "admin@holiday-parks.eu", "h").await.unwrap());
        assert!(!ensure_default_user(&store, "other@holiday-parks.eu", "h").await.unwrap());
        assert_eq!(store.count_employees().await.unwrap(), 1);

        let creds = store
            .find_credentials("admin@holiday-parks.eu")
            .await
            .unwrap()
            .unwrap();
        assert!(creds.can_login);
        assert_eq!(creds.password_hash, "h");
    }

    #[tokio::test]
    async fn test_mock_data_is_seeded_and_skips_duplicates() {
        let store = MemoryStore::new();
        ensure_default_user(&store, "admin@holiday-parks.eu", "h").await.unwrap();

        let summary = seed_mock_data(&store, 1, "h", "@holiday-parks.eu").await;
        assert_eq!(summary.locations, 2);
        assert_eq!(summary.departments, 2);
        assert_eq!(summary.employees, 3);
        assert!(store.is_manager(1).await.unwrap());

        // Identical locations are refused, so nothing hangs off them
        let again = seed_mock_data(&store, 1, "h", "@holiday-parks.eu").await;
        assert_eq!(again.locations, 0);
        assert_eq!(again.departments, 0);
        assert_eq!(again.employees, 0);
        assert_eq!(store.count_employees().await.unwrap(), 4);
    }
}
