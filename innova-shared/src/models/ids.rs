//! Backend identifiers arrive as strings or as auto-increment integers.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Unsigned(n) => n.to_string(),
            RawId::Signed(n) => n.to_string(),
        }
    }
}

pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

pub fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}
