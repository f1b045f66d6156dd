use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wrapper for resident names and credentials. Debug and Display print a mask;
/// serialization writes the real value so API responses stay usable.
#[derive(Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Masked<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_is_masked() {
        let name = Masked("Ana Rojas".to_string());
        assert_eq!(format!("{:?}", name), "********");
        assert_eq!(format!("{}", name), "********");
        assert_eq!(name.expose(), "Ana Rojas");
    }

    #[test]
    fn test_serialization_keeps_value() {
        let name = Masked("Ana".to_string());
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Ana\"");
        let back: Masked<String> = serde_json::from_str("\"Ana\"").unwrap();
        assert_eq!(back.into_inner(), "Ana");
    }
}
