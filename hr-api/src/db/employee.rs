//! Employee Repository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use shared::models::{Credentials, EmployeeField, EmployeeView, Location, NewEmployee, Profile};

use super::{PgStore, RepoResult};

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// All employees joined with department, manager and location, ordered by id
    async fn list_employees(&self) -> RepoResult<Vec<EmployeeView>>;
    async fn find_employee(&self, id: i64) -> RepoResult<Option<EmployeeView>>;
    /// Whether another employee (not `except`) already uses the email
    async fn email_taken(&self, email: &str, except: Option<i64>) -> RepoResult<bool>;
    async fn insert_employee(&self, data: &NewEmployee) -> RepoResult<i64>;
    /// Write one column and stamp `edit_date`
    async fn update_employee(
        &self,
        id: i64,
        field: &EmployeeField,
        edited_at: DateTime<Utc>,
    ) -> RepoResult<bool>;
    async fn delete_employee(&self, id: i64) -> RepoResult<bool>;
    async fn count_employees(&self) -> RepoResult<i64>;
    async fn find_credentials(&self, email: &str) -> RepoResult<Option<Credentials>>;
    async fn record_login(&self, id: i64, at: DateTime<Utc>) -> RepoResult<()>;
    async fn find_profile(&self, id: i64) -> RepoResult<Option<Profile>>;
}

/// Flat join row, folded into [`EmployeeView`]
#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    hire_date: NaiveDate,
    department_id: Option<i64>,
    can_login: bool,
    creation_date: DateTime<Utc>,
    edit_date: Option<DateTime<Utc>>,
    last_login: Option<DateTime<Utc>>,
    department: Option<String>,
    manager_email: Option<String>,
    location_id: Option<i64>,
    location_name: Option<String>,
    location_address: Option<String>,
    location_postal_code: Option<String>,
    location_city: Option<String>,
    location_country: Option<String>,
}

impl From<EmployeeRow> for EmployeeView {
    fn from(row: EmployeeRow) -> Self {
        let location = row.location_id.map(|id| Location {
            id,
            name: row.location_name.unwrap_or_default(),
            address: row.location_address.unwrap_or_default(),
            postal_code: row.location_postal_code.unwrap_or_default(),
            city: row.location_city.unwrap_or_default(),
            country: row.location_country.unwrap_or_default(),
        });
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            hire_date: row.hire_date,
            department_id: row.department_id,
            department: row.department,
            manager_email: row.manager_email,
            location,
            can_login: row.can_login,
            creation_date: row.creation_date,
            edit_date: row.edit_date,
            last_login: row.last_login,
        }
    }
}

const VIEW_SELECT: &str = "SELECT e.id, e.first_name, e.last_name, e.email, e.phone, e.hire_date,
            e.department_id, e.can_login, e.creation_date, e.edit_date, e.last_login,
            d.name AS department, m.email AS manager_email,
            l.id AS location_id, l.name AS location_name, l.address AS location_address,
            l.postal_code AS location_postal_code, l.city AS location_city,
            l.country AS location_country
     FROM employee e
     LEFT JOIN department d ON d.id = e.department_id
     LEFT JOIN employee m ON m.id = d.manager_id
     LEFT JOIN location l ON l.id = d.location_id";

#[async_trait]
impl EmployeeRepository for PgStore {
    async fn list_employees(&self) -> RepoResult<Vec<EmployeeView>> {
        let rows: Vec<EmployeeRow> = sqlx::query_as(&format!("{VIEW_SELECT} ORDER BY e.id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_employee(&self, id: i64) -> RepoResult<Option<EmployeeView>> {
        let row: Option<EmployeeRow> = sqlx::query_as(&format!("{VIEW_SELECT} WHERE e.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn email_taken(&self, email: &str, except: Option<i64>) -> RepoResult<bool> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM employee
                            WHERE email = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(email)
        .bind(except)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn insert_employee(&self, data: &NewEmployee) -> RepoResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO employee
                (first_name, last_name, email, phone, hire_date, department_id,
                 can_login, password_hash, creation_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
             RETURNING id",
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(data.hire_date)
        .bind(data.department_id)
        .bind(data.can_login)
        .bind(&data.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_employee(
        &self,
        id: i64,
        field: &EmployeeField,
        edited_at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        let sql = format!(
            "UPDATE employee SET {} = $1, edit_date = $2 WHERE id = $3",
            field.column()
        );
        let query = sqlx::query(&sql);
        let query = match field {
            EmployeeField::FirstName(v)
            | EmployeeField::LastName(v)
            | EmployeeField::Email(v)
            | EmployeeField::Phone(v) => query.bind(v),
            EmployeeField::HireDate(d) => query.bind(*d),
            EmployeeField::DepartmentId(d) => query.bind(*d),
            EmployeeField::CanLogin(b) => query.bind(*b),
        };
        let result = query
            .bind(edited_at)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_employee(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM employee WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_employees(&self) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employee")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn find_credentials(&self, email: &str) -> RepoResult<Option<Credentials>> {
        let row: Option<Credentials> = sqlx::query_as(
            "SELECT id, email, password_hash, can_login FROM employee WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn record_login(&self, id: i64, at: DateTime<Utc>) -> RepoResult<()> {
        sqlx::query("UPDATE employee SET last_login = $1 WHERE id = $2")
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_profile(&self, id: i64) -> RepoResult<Option<Profile>> {
        let row: Option<Profile> = sqlx::query_as(
            "SELECT email AS username, first_name, last_name, last_login
             FROM employee WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
