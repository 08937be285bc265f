//! Location Model

use serde::{Deserialize, Serialize};

/// Location entity (no foreign keys)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
}

/// Create location payload
///
/// Missing and empty fields are treated the same way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationCreate {
    pub name: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
}

impl LocationCreate {
    /// All five fields are non-empty
    pub fn is_complete(&self) -> bool {
        [
            &self.name,
            &self.address,
            &self.postal_code,
            &self.city,
            &self.country,
        ]
        .iter()
        .all(|f| !f.is_empty())
    }

    /// Every field equals the stored row
    pub fn is_identical_to(&self, location: &Location) -> bool {
        self.name == location.name
            && self.address == location.address
            && self.postal_code == location.postal_code
            && self.city == location.city
            && self.country == location.country
    }
}

/// Update location payload (one field applied per call)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LocationUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// The single location column written by an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationField {
    Name(String),
    Address(String),
    PostalCode(String),
    City(String),
    Country(String),
}

impl LocationField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Address(_) => "address",
            Self::PostalCode(_) => "postal_code",
            Self::City(_) => "city",
            Self::Country(_) => "country",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Name(v)
            | Self::Address(v)
            | Self::PostalCode(v)
            | Self::City(v)
            | Self::Country(v) => v,
        }
    }

    /// Write this field onto a row
    pub fn apply(&self, location: &mut Location) {
        let value = self.value().to_string();
        match self {
            Self::Name(_) => location.name = value,
            Self::Address(_) => location.address = value,
            Self::PostalCode(_) => location.postal_code = value,
            Self::City(_) => location.city = value,
            Self::Country(_) => location.country = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LocationCreate {
        LocationCreate {
            name: "Location 1".into(),
            address: "Address 1".into(),
            postal_code: "1234".into(),
            city: "City 1".into(),
            country: "Country 1".into(),
        }
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let payload: LocationCreate = serde_json::from_str(r#"{"name":"Park"}"#).unwrap();
        assert_eq!(payload.name, "Park");
        assert!(payload.city.is_empty());
        assert!(!payload.is_complete());
        assert!(sample().is_complete());
    }

    #[test]
    fn test_identical_compares_all_fields() {
        let payload = sample();
        let mut row = Location {
            id: 1,
            name: payload.name.clone(),
            address: payload.address.clone(),
            postal_code: payload.postal_code.clone(),
            city: payload.city.clone(),
            country: payload.country.clone(),
        };
        assert!(payload.is_identical_to(&row));
        row.country = "Elsewhere".into();
        assert!(!payload.is_identical_to(&row));
    }

    #[test]
    fn test_field_apply() {
        let mut row = Location {
            id: 1,
            name: "A".into(),
            address: "B".into(),
            postal_code: "C".into(),
            city: "D".into(),
            country: "E".into(),
        };
        LocationField::City("Utrecht".into()).apply(&mut row);
        assert_eq!(row.city, "Utrecht");
        assert_eq!(row.name, "A");
    }
}
