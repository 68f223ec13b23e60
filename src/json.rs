use mongodb::bson::{self, Bson, oid::ObjectId};
use serde::{Deserialize, Deserializer};

/// Placeholders that browsers send for ids which were never set.
const PLACEHOLDERS: [&str; 3] = ["None", "null", "undefined"];

/// Returns the value only if it carries something: blank strings and
/// id placeholders count as absent.
pub fn present(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !PLACEHOLDERS.contains(v))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Str(s) => s,
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// Accepts strings, numbers and booleans and keeps their textual form.
/// Clients send ids both as `"42"` and `42`.
pub fn lenient<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let scalar = Option::<Scalar>::deserialize(deserializer)?;
    Ok(scalar.map(Scalar::into_string))
}

/// [`lenient`] for every element of a list; `null` elements are dropped.
pub fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let items = Option::<Vec<Option<Scalar>>>::deserialize(deserializer)?;
    Ok(items
        .into_iter()
        .flatten()
        .flatten()
        .map(|s| T::from(s.into_string()))
        .collect())
}

/// ISO-8601 form of a stored timestamp, falling back to the current time
/// for documents written before the field existed.
pub fn timestamp(dt: Option<bson::DateTime>) -> String {
    dt.and_then(|dt| dt.try_to_rfc3339_string().ok())
        .unwrap_or_else(now)
}

pub fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Stores hex ids as `ObjectId` under `_id` and reads them back as hex.
pub mod object_id {
    use super::*;
    use serde::{Serialize, Serializer, de::Error};

    pub fn serialize<S, T>(id: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: AsRef<str>,
    {
        match ObjectId::parse_str(id.as_ref()) {
            Ok(oid) => oid.serialize(serializer),
            Err(_) => id.as_ref().serialize(serializer),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: From<String>,
    {
        match Bson::deserialize(deserializer)? {
            Bson::ObjectId(oid) => Ok(T::from(oid.to_hex())),
            Bson::String(s) => Ok(T::from(s)),
            other => Err(D::Error::custom(format!("unsupported _id: {other}"))),
        }
    }
}

/// Filter value for an `_id` lookup. Ids that are not valid hex match nothing.
pub fn id_filter(id: &str) -> Bson {
    ObjectId::parse_str(id)
        .map(Bson::ObjectId)
        .unwrap_or_else(|_| Bson::String(id.to_owned()))
}
