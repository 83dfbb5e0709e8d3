use std::fmt;

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use sqlx::FromRow;

use super::request::CarPatch;

/// Wire format for `date_created`: UTC, second precision, no offset suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn serialize_timestamp<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
}

/// A persisted row of the `cars` table.
///
/// Its `Serialize` impl is the one and only wire representation of a car.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Car {
    pub id: i64,
    pub description: Option<String>,
    pub cylinders: Option<i64>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i64>,
    pub owner: Option<String>,
    pub image: Option<String>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub date_created: NaiveDateTime,
}

impl Car {
    /// Overwrites only the fields present in `patch`. `id` and `date_created`
    /// are never touched.
    pub fn apply(&mut self, patch: &CarPatch) {
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(cylinders) = patch.cylinders {
            self.cylinders = cylinders;
        }
        if let Some(make) = &patch.make {
            self.make = make.clone();
        }
        if let Some(model) = &patch.model {
            self.model = model.clone();
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(owner) = &patch.owner {
            self.owner = owner.clone();
        }
        if let Some(image) = &patch.image {
            self.image = image.clone();
        }
    }
}

struct OrNone<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for OrNone<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("None"),
        }
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Car {} {} {} {}>",
            OrNone(&self.owner),
            OrNone(&self.make),
            OrNone(&self.model),
            OrNone(&self.year)
        )
    }
}

/// Response envelope for the list endpoint.
#[derive(Debug, Serialize)]
pub struct CarList {
    pub results: Vec<Car>,
}
