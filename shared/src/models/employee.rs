//! Employee Model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Location;

/// Employee row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub hire_date: NaiveDate,
    /// `None` only for the bootstrap account
    pub department_id: Option<i64>,
    pub can_login: bool,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub creation_date: DateTime<Utc>,
    pub edit_date: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Employee joined with department name, manager email and location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub hire_date: NaiveDate,
    pub department_id: Option<i64>,
    pub department: Option<String>,
    pub manager_email: Option<String>,
    pub location: Option<Location>,
    pub can_login: bool,
    pub creation_date: DateTime<Utc>,
    pub edit_date: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
}

/// `can_login` as sent by clients: a JSON bool or the string `"true"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoginFlag {
    Bool(bool),
    Text(String),
}

impl LoginFlag {
    /// An empty string counts as not supplied
    pub fn is_supplied(&self) -> bool {
        !matches!(self, Self::Text(s) if s.is_empty())
    }

    pub fn enabled(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(s) => s == "true",
        }
    }
}

/// Create employee payload
///
/// Empty strings and a zero `department_id` count as missing. The
/// `password` field is accepted for compatibility and ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub hire_date: String,
    pub department_id: i64,
    pub can_login: Option<LoginFlag>,
    pub password: Option<String>,
}

impl EmployeeCreate {
    pub fn is_complete(&self) -> bool {
        !self.first_name.is_empty()
            && !self.last_name.is_empty()
            && !self.email.is_empty()
            && !self.phone.is_empty()
            && !self.hire_date.is_empty()
            && self.department_id != 0
    }

    pub fn login_enabled(&self) -> bool {
        self.can_login.as_ref().is_some_and(LoginFlag::enabled)
    }
}

/// Update employee payload (one field applied per call)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmployeeUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub hire_date: Option<String>,
    pub department_id: Option<i64>,
    pub can_login: Option<LoginFlag>,
}

/// Validated insert payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub hire_date: NaiveDate,
    pub department_id: Option<i64>,
    pub can_login: bool,
    pub password_hash: String,
}

/// The single employee column written by an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeField {
    FirstName(String),
    LastName(String),
    Email(String),
    Phone(String),
    HireDate(NaiveDate),
    DepartmentId(i64),
    CanLogin(bool),
}

impl EmployeeField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::FirstName(_) => "first_name",
            Self::LastName(_) => "last_name",
            Self::Email(_) => "email",
            Self::Phone(_) => "phone",
            Self::HireDate(_) => "hire_date",
            Self::DepartmentId(_) => "department_id",
            Self::CanLogin(_) => "can_login",
        }
    }

    pub fn value(&self) -> String {
        match self {
            Self::FirstName(v) | Self::LastName(v) | Self::Email(v) | Self::Phone(v) => v.clone(),
            Self::HireDate(d) => d.format("%Y-%m-%d").to_string(),
            Self::DepartmentId(id) => id.to_string(),
            Self::CanLogin(b) => b.to_string(),
        }
    }

    pub fn apply(&self, employee: &mut Employee) {
        match self {
            Self::FirstName(v) => employee.first_name = v.clone(),
            Self::LastName(v) => employee.last_name = v.clone(),
            Self::Email(v) => employee.email = v.clone(),
            Self::Phone(v) => employee.phone = v.clone(),
            Self::HireDate(d) => employee.hire_date = *d,
            Self::DepartmentId(id) => employee.department_id = Some(*id),
            Self::CanLogin(b) => employee.can_login = *b,
        }
    }
}

/// Stored login material for one identity
#[derive(Debug, Clone)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Credentials {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub can_login: bool,
}

/// `GET /api/v1/me` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Profile {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub last_login: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_flag_accepts_bool_and_string() {
        let p: EmployeeCreate = serde_json::from_str(r#"{"can_login":"true"}"#).unwrap();
        assert!(p.login_enabled());
        let p: EmployeeCreate = serde_json::from_str(r#"{"can_login":true}"#).unwrap();
        assert!(p.login_enabled());
        let p: EmployeeCreate = serde_json::from_str(r#"{"can_login":"yes"}"#).unwrap();
        assert!(!p.login_enabled());
        let p: EmployeeCreate = serde_json::from_str("{}").unwrap();
        assert!(!p.login_enabled());
    }

    #[test]
    fn test_empty_login_flag_is_not_supplied() {
        assert!(!LoginFlag::Text(String::new()).is_supplied());
        assert!(LoginFlag::Text("false".into()).is_supplied());
        assert!(LoginFlag::Bool(false).is_supplied());
    }

    #[test]
    fn test_missing_hire_date_is_incomplete() {
        let p: EmployeeCreate = serde_json::from_str(
            r#"{"first_name":"John","last_name":"Doe","email":"j.doe@holiday-parks.eu",
                "phone":"06-12345678","department_id":1}"#,
        )
        .unwrap();
        assert!(!p.is_complete());
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let employee = Employee {
            id: 1,
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "j.doe@holiday-parks.eu".into(),
            phone: "06-1".into(),
            hire_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            department_id: Some(1),
            can_login: false,
            password_hash: "abc".into(),
            creation_date: Utc::now(),
            edit_date: None,
            last_login: None,
        };
        let json = serde_json::to_value(&employee).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["hire_date"], "2021-01-01");
        assert_eq!(employee.full_name(), "John Doe");
    }

    #[test]
    fn test_field_values() {
        let date = NaiveDate::from_ymd_opt(2022, 3, 4).unwrap();
        assert_eq!(EmployeeField::HireDate(date).value(), "2022-03-04");
        assert_eq!(EmployeeField::CanLogin(true).value(), "true");
        assert_eq!(EmployeeField::DepartmentId(2).column(), "department_id");
    }
}
