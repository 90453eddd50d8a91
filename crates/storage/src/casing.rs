//! Field-name translation between the store's snake_case columns and the
//! camelCase used by models and the HTTP API.
//!
//! Records are flat, so object conversion only touches top-level keys. Nested
//! values such as `clubs` or `hole_scores` pass through untouched.

use serde_json::{Map, Value};

pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            // leading underscores are dropped rather than uppercasing the next char
            upper_next = !out.is_empty();
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

pub fn keys_to_snake(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(k, v)| (to_snake_case(&k), v))
        .collect()
}

pub fn keys_to_camel(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(k, v)| (to_camel_case(&k), v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("isDefault"), "is_default");
        assert_eq!(to_snake_case("userId"), "user_id");
        assert_eq!(to_snake_case("id"), "id");
        assert_eq!(to_snake_case("invitationStatus"), "invitation_status");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("is_default"), "isDefault");
        assert_eq!(to_camel_case("created_at"), "createdAt");
        assert_eq!(to_camel_case("par"), "par");
        assert_eq!(to_camel_case("_private"), "private");
    }

    #[test]
    fn test_columns_survive_both_directions() {
        for column in ["series_id", "tee_set_id", "course_handicap", "hole_scores"] {
            assert_eq!(to_snake_case(&to_camel_case(column)), column);
        }
    }

    #[test]
    fn test_object_keys_are_shallow() {
        let row = json!({
            "hole_scores": [4, 5],
            "meta_data": { "inner_key": 1 }
        });
        let Value::Object(map) = row else {
            unreachable!()
        };
        let camel = keys_to_camel(map);
        assert_eq!(camel["holeScores"], json!([4, 5]));
        assert_eq!(camel["metaData"], json!({ "inner_key": 1 }));
    }
}
