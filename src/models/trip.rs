use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::images::destination_image;

pub type TripId = i64;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored trip as it is returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: TripId,
    pub name: String,
    pub country: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub image: String,
    #[serde(default)]
    pub attractions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    pub fn fields(&self) -> TripFields {
        TripFields {
            name: self.name.clone(),
            country: self.country.clone(),
            description: self.description.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            image: self.image.clone(),
            attractions: self.attractions.clone(),
        }
    }
}

/// Validated trip content, ready to be written to a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripFields {
    pub name: String,
    pub country: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub image: String,
    pub attractions: Vec<String>,
}

impl TripFields {
    /// Applies every field present in `input` on top of `self` and validates
    /// the result.
    pub fn merged(self, input: TripInput) -> Result<TripFields, ValidationError> {
        let fields = TripFields {
            name: input.name.unwrap_or(self.name),
            country: input.country.unwrap_or(self.country),
            description: input.description.unwrap_or(self.description),
            start_date: input.start_date.unwrap_or(self.start_date),
            end_date: input.end_date.unwrap_or(self.end_date),
            image: input.image.unwrap_or(self.image),
            attractions: input.attractions.unwrap_or(self.attractions),
        };
        fields.validated()
    }

    fn validated(self) -> Result<TripFields, ValidationError> {
        let name = required("name", &self.name)?.to_string();
        let country = required("country", &self.country)?.to_string();
        required("description", &self.description)?;
        let start_date = date("startDate", &self.start_date)?;
        let end_date = date("endDate", &self.end_date)?;
        let image = required("image", &self.image)?.to_string();

        Ok(TripFields {
            name,
            country,
            description: self.description,
            start_date,
            end_date,
            image,
            attractions: normalize_attractions(self.attractions),
        })
    }
}

/// Request body accepted by create and update. Every field is optional so the
/// same shape serves partial updates; `id` and timestamps are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attractions: Option<Vec<String>>,
}

impl TripInput {
    /// Validates a create body. A missing or blank image is filled in from the
    /// destination name.
    pub fn into_new_fields(self) -> Result<TripFields, ValidationError> {
        let name = self.name.unwrap_or_default();
        let image = match self.image {
            Some(image) if !image.trim().is_empty() => image,
            _ => destination_image(&name).to_string(),
        };

        TripFields {
            name,
            country: self.country.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            start_date: self.start_date.unwrap_or_default(),
            end_date: self.end_date.unwrap_or_default(),
            image,
            attractions: self.attractions.unwrap_or_default(),
        }
        .validated()
    }
}

impl From<TripFields> for TripInput {
    fn from(fields: TripFields) -> Self {
        Self {
            name: Some(fields.name),
            country: Some(fields.country),
            description: Some(fields.description),
            start_date: Some(fields.start_date),
            end_date: Some(fields.end_date),
            image: Some(fields.image),
            attractions: Some(fields.attractions),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError(format!("{field} is required")));
    }
    Ok(trimmed)
}

fn date(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = required(field, value)?;
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError(format!("{field} must be a YYYY-MM-DD date")))?;
    Ok(trimmed.to_string())
}

fn normalize_attractions(attractions: Vec<String>) -> Vec<String> {
    attractions
        .into_iter()
        .map(|attraction| attraction.trim().to_string())
        .filter(|attraction| !attraction.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::PLACEHOLDER_IMAGE;

    fn rome() -> TripInput {
        TripInput {
            name: Some("  Rome ".into()),
            country: Some("Italy".into()),
            description: Some("Eternal city".into()),
            start_date: Some("2025-01-01".into()),
            end_date: Some("2025-01-05".into()),
            image: Some("/images/placeholder.jpg".into()),
            attractions: Some(vec!["Colosseum".into(), "  ".into(), " Pantheon ".into()]),
        }
    }

    #[test]
    fn create_trims_names_and_drops_blank_attractions() {
        let fields = rome().into_new_fields().unwrap();
        assert_eq!(fields.name, "Rome");
        assert_eq!(fields.attractions, vec!["Colosseum", "Pantheon"]);
    }

    #[test]
    fn create_requires_country() {
        let input = TripInput {
            country: Some("   ".into()),
            ..rome()
        };
        let err = input.into_new_fields().unwrap_err();
        assert_eq!(err.0, "country is required");
    }

    #[test]
    fn create_rejects_malformed_dates_but_not_reversed_ones() {
        let bad = TripInput {
            start_date: Some("01/02/2025".into()),
            ..rome()
        };
        assert_eq!(
            bad.into_new_fields().unwrap_err().0,
            "startDate must be a YYYY-MM-DD date"
        );

        let reversed = TripInput {
            start_date: Some("2025-02-01".into()),
            end_date: Some("2025-01-01".into()),
            ..rome()
        };
        assert!(reversed.into_new_fields().is_ok());
    }

    #[test]
    fn create_without_image_uses_destination_lookup() {
        let paris = TripInput {
            name: Some("Paris".into()),
            image: None,
            ..rome()
        };
        assert_eq!(paris.into_new_fields().unwrap().image, "/images/Paris.jpeg");

        let blank = TripInput {
            name: Some("Atlantis".into()),
            image: Some(" ".into()),
            ..rome()
        };
        assert_eq!(blank.into_new_fields().unwrap().image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn merge_keeps_omitted_fields_and_validates_supplied_ones() {
        let current = rome().into_new_fields().unwrap();
        let patch = TripInput {
            description: Some("Updated".into()),
            ..TripInput::default()
        };
        let merged = current.clone().merged(patch).unwrap();
        assert_eq!(merged.description, "Updated");
        assert_eq!(merged.name, current.name);

        let blank_image = TripInput {
            image: Some(String::new()),
            ..TripInput::default()
        };
        assert_eq!(
            current.merged(blank_image).unwrap_err().0,
            "image is required"
        );
    }

    #[test]
    fn body_ignores_id_and_uses_camel_case() {
        let input: TripInput =
            serde_json::from_str(r#"{"id": 99, "name": "Oslo", "startDate": "2025-03-01"}"#)
                .unwrap();
        assert_eq!(input.name.as_deref(), Some("Oslo"));
        assert_eq!(input.start_date.as_deref(), Some("2025-03-01"));
    }
}
