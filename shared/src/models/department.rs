//! Department Model

use serde::{Deserialize, Serialize};

/// Department row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub location_id: i64,
    pub manager_id: i64,
}

/// Department joined with its location name and manager full name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DepartmentView {
    pub id: i64,
    pub name: String,
    pub location_id: i64,
    pub location: String,
    pub manager_id: i64,
    pub manager: String,
}

/// Create department payload (zero ids count as missing)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DepartmentCreate {
    pub name: String,
    pub location_id: i64,
    pub manager_id: i64,
}

impl DepartmentCreate {
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && self.location_id != 0 && self.manager_id != 0
    }
}

/// Update department payload (one field applied per call)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DepartmentUpdate {
    pub name: Option<String>,
    pub location_id: Option<i64>,
    pub manager_id: Option<i64>,
}

/// The single department column written by an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentField {
    Name(String),
    LocationId(i64),
    ManagerId(i64),
}

impl DepartmentField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::LocationId(_) => "location_id",
            Self::ManagerId(_) => "manager_id",
        }
    }

    pub fn value(&self) -> String {
        match self {
            Self::Name(v) => v.clone(),
            Self::LocationId(v) | Self::ManagerId(v) => v.to_string(),
        }
    }

    pub fn apply(&self, department: &mut Department) {
        match self {
            Self::Name(v) => department.name = v.clone(),
            Self::LocationId(v) => department.location_id = *v,
            Self::ManagerId(v) => department.manager_id = *v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_ids_are_missing() {
        let payload: DepartmentCreate =
            serde_json::from_str(r#"{"name":"Front Office","location_id":1}"#).unwrap();
        assert_eq!(payload.manager_id, 0);
        assert!(!payload.is_complete());
    }

    #[test]
    fn test_field_value_rendering() {
        assert_eq!(DepartmentField::LocationId(4).value(), "4");
        assert_eq!(DepartmentField::ManagerId(9).column(), "manager_id");
        assert_eq!(DepartmentField::Name("Spa".into()).value(), "Spa");
    }
}
