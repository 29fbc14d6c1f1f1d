use serde::{Deserialize, Serialize};

/// Reference to another document as the API may serialize it.
///
/// Depending on the endpoint and on population, a foreign key arrives as a
/// raw id string, as an extended-JSON `{"$oid": "..."}` object or as the
/// populated document itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectRef {
    Id(String),
    Oid {
        #[serde(rename = "$oid")]
        oid: String,
    },
    Populated {
        #[serde(rename = "_id")]
        id: Box<ObjectRef>,
    },
}

impl ObjectRef {
    /// Plain id string regardless of representation
    pub fn as_id(&self) -> &str {
        match self {
            ObjectRef::Id(id) => id,
            ObjectRef::Oid { oid } => oid,
            ObjectRef::Populated { id } => id.as_id(),
        }
    }
}

impl From<&str> for ObjectRef {
    fn from(value: &str) -> Self {
        ObjectRef::Id(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_shapes_resolve_to_id() {
        let raw: ObjectRef = serde_json::from_str(r#""65a1""#).unwrap();
        let oid: ObjectRef = serde_json::from_str(r#"{"$oid":"65a1"}"#).unwrap();
        let populated: ObjectRef =
            serde_json::from_str(r#"{"_id":"65a1","company":"Acme"}"#).unwrap();
        let nested: ObjectRef = serde_json::from_str(r#"{"_id":{"$oid":"65a1"}}"#).unwrap();

        for r in [raw, oid, populated, nested] {
            assert_eq!(r.as_id(), "65a1");
        }
    }
}
