//! Collection envelope used by the backend's list endpoints.
//!
//! List responses arrive as `{ "data": [...] }`. A missing or null `data`
//! key deserializes to an empty collection rather than an error.

use serde::{Deserialize, Serialize};

/// Envelope around a list payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListEnvelope<T> {
    /// The wrapped collection; empty when the key is absent
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> ListEnvelope<T> {
    /// Unwrap into the inner collection.
    pub fn into_inner(self) -> Vec<T> {
        self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}

impl<T> Default for ListEnvelope<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_data() {
        let envelope: ListEnvelope<u64> = serde_json::from_str(r#"{"data": [1, 2, 3]}"#).unwrap();
        assert_eq!(envelope.len(), 3);
        assert_eq!(envelope.into_inner(), vec![1, 2, 3]);
    }

    #[test]
    fn test_envelope_missing_data_key() {
        let envelope: ListEnvelope<u64> = serde_json::from_str("{}").unwrap();
        assert!(envelope.is_empty());
    }
}
