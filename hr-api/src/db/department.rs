//! Department Repository

use async_trait::async_trait;
use shared::models::{DepartmentCreate, DepartmentField, DepartmentView};

use super::{PgStore, RepoResult};

#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// All departments with location name and manager full name, ordered by id
    async fn list_departments(&self) -> RepoResult<Vec<DepartmentView>>;
    async fn find_department(&self, id: i64) -> RepoResult<Option<DepartmentView>>;
    async fn insert_department(&self, data: &DepartmentCreate) -> RepoResult<i64>;
    async fn update_department(&self, id: i64, field: &DepartmentField) -> RepoResult<bool>;
    async fn delete_department(&self, id: i64) -> RepoResult<bool>;
    /// Whether any employee belongs to the department
    async fn department_has_employees(&self, id: i64) -> RepoResult<bool>;
    /// Whether the employee manages any department
    async fn is_manager(&self, employee_id: i64) -> RepoResult<bool>;
}

const VIEW_SELECT: &str = "SELECT d.id, d.name, d.location_id, l.name AS location, d.manager_id,
            m.first_name || ' ' || m.last_name AS manager
     FROM department d
     JOIN location l ON l.id = d.location_id
     JOIN employee m ON m.id = d.manager_id";

#[async_trait]
impl DepartmentRepository for PgStore {
    async fn list_departments(&self) -> RepoResult<Vec<DepartmentView>> {
        let rows: Vec<DepartmentView> = sqlx::query_as(&format!("{VIEW_SELECT} ORDER BY d.id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_department(&self, id: i64) -> RepoResult<Option<DepartmentView>> {
        let row: Option<DepartmentView> =
            sqlx::query_as(&format!("{VIEW_SELECT} WHERE d.id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    async fn insert_department(&self, data: &DepartmentCreate) -> RepoResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO department (name, location_id, manager_id)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(&data.name)
        .bind(data.location_id)
        .bind(data.manager_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_department(&self, id: i64, field: &DepartmentField) -> RepoResult<bool> {
        let sql = format!("UPDATE department SET {} = $1 WHERE id = $2", field.column());
        let query = sqlx::query(&sql);
        let query = match field {
            DepartmentField::Name(v) => query.bind(v),
            DepartmentField::LocationId(v) | DepartmentField::ManagerId(v) => query.bind(*v),
        };
        let result = query.bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_department(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM department WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn department_has_employees(&self, id: i64) -> RepoResult<bool> {
        let used: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM employee WHERE department_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(used)
    }

    async fn is_manager(&self, employee_id: i64) -> RepoResult<bool> {
        let managing: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM department WHERE manager_id = $1)")
                .bind(employee_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(managing)
    }
}
