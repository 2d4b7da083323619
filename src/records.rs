//! In-memory sample records
//!
//! Three shapes are modelled:
//!
//! - [`Person`]: required fields only
//! - [`PersonProfile`]: required fields plus optional body measurements,
//!   assembled directly or through [`PersonProfileBuilder`]
//! - [`BodyMetrics`]: all measurements required, with the body-mass-index
//!   derived once at construction

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while constructing a record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("height must be greater than zero, got {0}")]
    NonPositiveHeight(f64),

    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}

/// A record with only required fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

impl Person {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }
}

/// A record with required fields and optional measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonProfile {
    pub name: String,
    pub age: u32,
    /// Height in centimetres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl PersonProfile {
    /// Create a profile with no measurements
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
            height: None,
            weight: None,
        }
    }

    pub fn builder() -> PersonProfileBuilder {
        PersonProfileBuilder::default()
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Promote to [`BodyMetrics`] when both measurements are present
    pub fn body_metrics(&self) -> Option<Result<BodyMetrics, RecordError>> {
        let (height, weight) = (self.height?, self.weight?);
        Some(BodyMetrics::new(self.name.clone(), self.age, height, weight))
    }
}

impl From<Person> for PersonProfile {
    fn from(person: Person) -> Self {
        Self::new(person.name, person.age)
    }
}

/// Builder for [`PersonProfile`]; `name` and `age` must be set before [`build`](Self::build)
#[derive(Debug, Default, Clone)]
pub struct PersonProfileBuilder {
    name: Option<String>,
    age: Option<u32>,
    height: Option<f64>,
    weight: Option<f64>,
}

impl PersonProfileBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn build(self) -> Result<PersonProfile, RecordError> {
        let name = self.name.ok_or(RecordError::MissingField("name"))?;
        let age = self.age.ok_or(RecordError::MissingField("age"))?;
        Ok(PersonProfile {
            name,
            age,
            height: self.height,
            weight: self.weight,
        })
    }
}

/// Measurements with a derived body-mass-index
///
/// Fields are private so `bmi` can never drift from `height` and `weight`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyMetrics {
    name: String,
    age: u32,
    height: f64,
    weight: f64,
    bmi: f64,
}

impl BodyMetrics {
    /// Build the record, computing `weight / (height / 100)^2`.
    ///
    /// `height` is in centimetres and must be positive; both measurements
    /// must be finite.
    pub fn new(
        name: impl Into<String>,
        age: u32,
        height: f64,
        weight: f64,
    ) -> Result<Self, RecordError> {
        if !height.is_finite() {
            return Err(RecordError::NonFinite {
                field: "height",
                value: height,
            });
        }
        if !weight.is_finite() {
            return Err(RecordError::NonFinite {
                field: "weight",
                value: weight,
            });
        }
        if height <= 0.0 {
            return Err(RecordError::NonPositiveHeight(height));
        }

        let metres = height / 100.0;
        Ok(Self {
            name: name.into(),
            age,
            height,
            weight,
            bmi: weight / (metres * metres),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }
}

/// The three records shown by the demo
#[derive(Debug, Clone, Serialize)]
pub struct SampleRecords {
    pub person: Person,
    pub profile: PersonProfile,
    pub metrics: BodyMetrics,
}

/// Construct the literal sample records
pub fn sample_records() -> Result<SampleRecords, RecordError> {
    Ok(SampleRecords {
        person: Person::new("Taro", 20),
        profile: PersonProfile::new("Hanako", 25).with_height(160.5),
        metrics: BodyMetrics::new("Jiro", 30, 175.2, 75.2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_is_derived() {
        let metrics = BodyMetrics::new("Jiro", 30, 175.2, 75.2).unwrap();
        assert!((metrics.bmi() - 24.499).abs() < 1e-3);
        assert_eq!(metrics.height(), 175.2);
        assert_eq!(metrics.weight(), 75.2);
    }

    #[test]
    fn test_zero_height_rejected() {
        let err = BodyMetrics::new("Jiro", 30, 0.0, 75.2).unwrap_err();
        assert_eq!(err, RecordError::NonPositiveHeight(0.0));

        let err = BodyMetrics::new("Jiro", 30, -150.0, 75.2).unwrap_err();
        assert_eq!(err, RecordError::NonPositiveHeight(-150.0));
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = BodyMetrics::new("Jiro", 30, f64::NAN, 75.2).unwrap_err();
        assert!(matches!(err, RecordError::NonFinite { field: "height", .. }));

        let err = BodyMetrics::new("Jiro", 30, 170.0, f64::INFINITY).unwrap_err();
        assert!(matches!(err, RecordError::NonFinite { field: "weight", .. }));
    }

    #[test]
    fn test_builder_requires_name_and_age() {
        let err = PersonProfile::builder().name("Hanako").build().unwrap_err();
        assert_eq!(err, RecordError::MissingField("age"));

        let err = PersonProfile::builder().age(25).build().unwrap_err();
        assert_eq!(err, RecordError::MissingField("name"));

        let profile = PersonProfile::builder()
            .name("Hanako")
            .age(25)
            .weight(50.0)
            .build()
            .unwrap();
        assert_eq!(profile.height, None);
        assert_eq!(profile.weight, Some(50.0));
    }

    #[test]
    fn test_profile_promotes_to_metrics() {
        let partial = PersonProfile::new("Hanako", 25).with_height(160.0);
        assert!(partial.body_metrics().is_none());

        let full = partial.with_weight(51.2);
        let metrics = full.body_metrics().unwrap().unwrap();
        assert!((metrics.bmi() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let profile = PersonProfile::from(Person::new("Taro", 20));
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Taro", "age": 20 }));

        let parsed: PersonProfile = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, profile);
    }

    #[test]
    fn test_missing_required_field_in_json() {
        let result: Result<PersonProfile, _> =
            serde_json::from_value(serde_json::json!({ "name": "Taro" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_sample_records() {
        let samples = sample_records().unwrap();
        assert_eq!(samples.person.name, "Taro");
        assert_eq!(samples.profile.height, Some(160.5));
        assert!(samples.profile.weight.is_none());
        assert_eq!(samples.metrics.name(), "Jiro");
    }
}
