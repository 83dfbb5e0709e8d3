use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use validator::Validate;

// Distinguishes a key sent as `null` (Some(None)) from an absent key (None).
fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of `POST /api/v1/cars`. Every field is mandatory.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewCar {
    pub description: String,
    pub cylinders: i64,
    #[validate(length(max = 255))]
    pub make: String,
    #[validate(length(max = 255))]
    pub model: String,
    pub year: i64,
    #[validate(length(max = 255))]
    pub owner: String,
    #[validate(length(max = 512))]
    pub image: String,
    // Clients echo the id back; it is accepted and ignored.
    #[serde(default, rename = "id")]
    _id: Option<IgnoredAny>,
}

/// Body of `PUT /api/v1/cars/{id}`.
///
/// The outer `Option` records whether the key was sent at all, the inner one
/// carries the new (possibly null) column value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CarPatch {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub cylinders: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    #[validate(length(max = 255))]
    pub make: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    #[validate(length(max = 255))]
    pub model: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub year: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    #[validate(length(max = 255))]
    pub owner: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    #[validate(length(max = 512))]
    pub image: Option<Option<String>>,
    #[serde(default, rename = "id")]
    _id: Option<IgnoredAny>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_body() -> serde_json::Value {
        json!({
            "description": "Another",
            "cylinders": 8,
            "make": "Ford",
            "model": "Taurus",
            "year": 2013,
            "owner": "Else",
            "image": "http://example.com/taurus.jpg"
        })
    }

    #[test]
    fn new_car_accepts_all_required_keys() {
        let car: NewCar = serde_json::from_value(full_body()).unwrap();
        assert_eq!(car.make, "Ford");
        assert_eq!(car.cylinders, 8);
        assert!(car.validate().is_ok());
    }

    #[test]
    fn new_car_rejects_each_missing_key() {
        for key in ["description", "cylinders", "make", "model", "year", "owner", "image"] {
            let mut body = full_body();
            body.as_object_mut().unwrap().remove(key);
            let err = serde_json::from_value::<NewCar>(body).unwrap_err();
            assert!(err.to_string().contains(key), "unexpected error: {}", err);
        }
    }

    #[test]
    fn new_car_rejects_unknown_keys_but_tolerates_id() {
        let mut body = full_body();
        body["color"] = json!("red");
        assert!(serde_json::from_value::<NewCar>(body).is_err());

        let mut body = full_body();
        body["id"] = json!(42);
        assert!(serde_json::from_value::<NewCar>(body).is_ok());
    }

    #[test]
    fn new_car_rejects_mistyped_values() {
        let mut body = full_body();
        body["year"] = json!("2013");
        assert!(serde_json::from_value::<NewCar>(body).is_err());
    }

    #[test]
    fn new_car_enforces_column_widths() {
        let mut body = full_body();
        body["make"] = json!("x".repeat(256));
        let car: NewCar = serde_json::from_value(body).unwrap();
        assert!(car.validate().is_err());
    }

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let patch: CarPatch = serde_json::from_value(json!({
            "make": "Toyota",
            "owner": null
        }))
        .unwrap();

        assert_eq!(patch.make, Some(Some("Toyota".to_string())));
        assert_eq!(patch.owner, Some(None));
        assert_eq!(patch.model, None);
        assert_eq!(patch.cylinders, None);
    }

    #[test]
    fn patch_accepts_empty_object() {
        let patch: CarPatch = serde_json::from_value(json!({})).unwrap();
        assert!(patch.description.is_none());
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn patch_rejects_unknown_keys() {
        assert!(serde_json::from_value::<CarPatch>(json!({ "date_created": "now" })).is_err());
    }

    #[test]
    fn patch_enforces_column_widths() {
        let patch: CarPatch =
            serde_json::from_value(json!({ "image": "x".repeat(513) })).unwrap();
        assert!(patch.validate().is_err());
    }
}
