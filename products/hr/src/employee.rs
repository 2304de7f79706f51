use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Fields a submitted record must carry, in wire order.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "name",
    "age",
    "phone",
    "privileges",
    "favorites",
    "finished",
    "badges",
    "points",
];

/// Privilege level served by the user filter.
pub const USER_PRIVILEGE: &str = "user";

/// A single directory record, stored exactly as it was submitted.
///
/// Field values are not type checked. Lookups only match when a field has the
/// shape they compare against: a string `name` or `privileges`, a `badges`
/// array of strings, a numeric (or numeric string) `age`. Any extra fields
/// ride along in `extra` and are echoed back.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Employee {
    pub name: Value,
    pub age: Value,
    pub phone: Value,
    pub privileges: Value,
    pub favorites: Value,
    pub finished: Value,
    pub badges: Value,
    pub points: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("field `{0}` is missing or empty")]
    Missing(&'static str),
    #[error("record could not be read: {0}")]
    Malformed(String),
}

impl Employee {
    /// Accept a submitted JSON body as a record.
    ///
    /// Every field in [`REQUIRED_FIELDS`] must be present and non-empty:
    /// `null`, `false`, `0` and `""` are rejected, while arrays and objects
    /// always pass. Nothing else is checked.
    pub fn from_submission(body: Value) -> Result<Self, ValidationError> {
        let Value::Object(fields) = &body else {
            return Err(ValidationError::NotAnObject);
        };
        if let Some(missing) = REQUIRED_FIELDS
            .iter()
            .find(|field| !fields.get(**field).is_some_and(is_present))
        {
            return Err(ValidationError::Missing(*missing));
        }
        serde_json::from_value(body).map_err(|err| ValidationError::Malformed(err.to_string()))
    }

    /// Age as a number; numeric strings such as `"33"` count.
    pub fn age_years(&self) -> Option<f64> {
        let years = match &self.age {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        };
        years.filter(|years| years.is_finite())
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn has_badge(&self, badge: &str) -> bool {
        self.badges
            .as_array()
            .is_some_and(|badges| badges.iter().any(|candidate| candidate == badge))
    }

    pub fn has_privileges(&self, level: &str) -> bool {
        self.privileges == level
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission() -> Value {
        json!({
            "name": "Lucia",
            "age": 31,
            "phone": "555-0101",
            "privileges": "user",
            "favorites": {"artist": "Frida", "food": "tacos"},
            "finished": [3, 9],
            "badges": ["blue", "gold"],
            "points": 120
        })
    }

    #[test]
    fn complete_submission_is_accepted() {
        let employee = Employee::from_submission(submission()).unwrap();
        assert_eq!(employee.name, "Lucia");
        assert_eq!(employee.age, 31);
        assert_eq!(employee.badges, json!(["blue", "gold"]));
        assert_eq!(employee.points, json!(120));
        assert!(employee.extra.is_empty());
    }

    #[test]
    fn each_missing_field_is_reported() {
        for field in REQUIRED_FIELDS {
            let mut body = submission();
            body.as_object_mut().unwrap().remove(field);
            assert_eq!(
                Employee::from_submission(body),
                Err(ValidationError::Missing(field)),
                "dropping {field}"
            );
        }
    }

    #[test]
    fn falsy_values_count_as_missing() {
        for (field, value) in [
            ("name", json!("")),
            ("age", json!(0)),
            ("points", json!(0.0)),
            ("finished", json!(false)),
            ("phone", Value::Null),
        ] {
            let mut body = submission();
            body[field] = value;
            assert_eq!(
                Employee::from_submission(body),
                Err(ValidationError::Missing(field))
            );
        }
    }

    #[test]
    fn empty_collections_are_present() {
        let mut body = submission();
        body["favorites"] = json!({});
        body["badges"] = json!([]);
        let employee = Employee::from_submission(body).unwrap();
        assert_eq!(employee.badges, json!([]));
    }

    #[test]
    fn field_types_are_not_checked() {
        let mut body = submission();
        body["name"] = json!(7);
        body["age"] = json!("33");
        body["privileges"] = json!(true);
        body["badges"] = json!("blue");
        let employee = Employee::from_submission(body).unwrap();
        assert_eq!(employee.name, json!(7));
        assert_eq!(employee.age_years(), Some(33.0));
        assert!(!employee.has_privileges(USER_PRIVILEGE));
        assert!(!employee.has_badge("blue"));
        assert!(!employee.has_name("7"));
    }

    #[test]
    fn extra_fields_are_kept() {
        let mut body = submission();
        body["email"] = json!("lucia@example.com");
        let employee = Employee::from_submission(body.clone()).unwrap();
        assert_eq!(employee.extra.get("email"), Some(&json!("lucia@example.com")));
        assert_eq!(serde_json::to_value(&employee).unwrap(), body);
    }

    #[test]
    fn unreadable_ages_have_no_years() {
        let mut body = submission();
        body["age"] = json!("old");
        let employee = Employee::from_submission(body).unwrap();
        assert_eq!(employee.age_years(), None);

        let mut body = submission();
        body["age"] = json!("NaN");
        assert_eq!(Employee::from_submission(body).unwrap().age_years(), None);
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        assert_eq!(
            Employee::from_submission(json!([1, 2])),
            Err(ValidationError::NotAnObject)
        );
        assert_eq!(
            Employee::from_submission(Value::Null),
            Err(ValidationError::NotAnObject)
        );
    }

    #[test]
    fn badge_membership_is_exact() {
        let mut body = submission();
        body["badges"] = json!(["black", "gold"]);
        let employee = Employee::from_submission(body).unwrap();
        assert!(employee.has_badge("black"));
        assert!(employee.has_badge("gold"));
        assert!(!employee.has_badge("blue"));
        assert!(!employee.has_badge("Black"));
    }
}
