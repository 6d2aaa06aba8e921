use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::null_as_default;

/// A catalog author.
///
/// Fields absent from a request body, or sent as `null`, decode to their
/// zero value so that validation, not the decoder, reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Author {
    /// Caller-chosen primary key
    #[serde(rename = "authID", deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    /// Date of birth, free text
    #[serde(deserialize_with = "null_as_default")]
    pub dob: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pen_name: String,
}

impl Author {
    /// True when any of the four required text fields is empty.
    pub fn has_missing_fields(&self) -> bool {
        self.first_name.is_empty()
            || self.last_name.is_empty()
            || self.dob.is_empty()
            || self.pen_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_field_names() {
        let author = Author {
            id: 1,
            first_name: "Chetan".to_string(),
            last_name: "Bhagat".to_string(),
            dob: "06/04/2001".to_string(),
            pen_name: "Chetan".to_string(),
        };

        assert_eq!(
            serde_json::to_string(&author).unwrap(),
            r#"{"authID":1,"firstName":"Chetan","lastName":"Bhagat","dob":"06/04/2001","penName":"Chetan"}"#
        );
    }

    #[test]
    fn absent_fields_decode_to_zero_values() {
        let author: Author = serde_json::from_str(r#"{"firstName":"R.K."}"#).unwrap();
        assert_eq!(author.id, 0);
        assert_eq!(author.first_name, "R.K.");
        assert!(author.has_missing_fields());
    }

    #[test]
    fn null_fields_decode_to_zero_values() {
        let author: Author = serde_json::from_str(
            r#"{"authID":null,"firstName":null,"lastName":"Bhagat","dob":"06/04/2001","penName":"Chetan"}"#,
        )
        .unwrap();
        assert_eq!(author.id, 0);
        assert_eq!(author.first_name, "");
        assert_eq!(author.last_name, "Bhagat");
        assert!(author.has_missing_fields());
    }
}
