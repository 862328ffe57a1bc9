//! Success-message template interpolation

use std::{collections::HashSet, sync::LazyLock};

use regex::{NoExpand, Regex};
use serde_json::Value;
use thiserror::Error;

use crate::rest::ResponseEnvelope;

/// Substitution rounds allowed beyond one per token written in the template itself
pub const MAX_SUBSTITUTIONS: usize = 64;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"##(\w+)").expect("token pattern is valid"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    #[error("Response data has no value named `{0}`")]
    MissingValue(String),

    #[error("Message template did not converge after {0} substitutions")]
    NotConverged(usize),
}

fn substitution(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Replace every `##name` token with `response.data[name]` and append a newline
///
/// Tokens are replaced one at a time, leftmost first, and the template is re-scanned after
/// each replacement, so substituted values may themselves contain tokens. A template with
/// `n` tokens gets `n` + [`MAX_SUBSTITUTIONS`] rounds.
///
/// # Errors
///
/// Returns [`MessageError::MissingValue`] for a token without a matching top-level data key
/// and [`MessageError::NotConverged`] when substitution cycles or runs out of rounds.
pub fn construct_message(
    template: &str,
    response: &ResponseEnvelope,
) -> Result<String, MessageError> {
    let budget = TOKEN.find_iter(template).count() + MAX_SUBSTITUTIONS;
    let mut seen = HashSet::new();
    let mut text = template.to_string();

    for round in 0..budget {
        let Some(captures) = TOKEN.captures(&text) else {
            return Ok(format!("{text}\n"));
        };

        let name = &captures[1];
        let value = response
            .data
            .get(name)
            .ok_or_else(|| MessageError::MissingValue(name.to_string()))?;

        let next = TOKEN
            .replace(&text, NoExpand(&substitution(value)))
            .into_owned();

        if !seen.insert(std::mem::replace(&mut text, next)) {
            return Err(MessageError::NotConverged(round));
        }
    }

    if TOKEN.is_match(&text) {
        Err(MessageError::NotConverged(budget))
    } else {
        Ok(format!("{text}\n"))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, json};

    use super::*;

    fn envelope(data: Value) -> ResponseEnvelope {
        let Value::Object(data) = data else {
            panic!("test data must be an object");
        };
        ResponseEnvelope::success(data)
    }

    #[test]
    fn test_tokens_are_replaced_from_top_level_data() {
        let response = envelope(json!({"id": "abc", "name": "node-1"}));

        let message = construct_message("Created ##id on ##name", &response).unwrap();

        assert_eq!(message, "Created abc on node-1\n");
    }

    #[test]
    fn test_nested_record_values_are_not_used() {
        let response = envelope(json!({"rec1": {"id": "abc"}}));

        let err = construct_message("Created ##id", &response).unwrap_err();

        assert_eq!(err, MessageError::MissingValue("id".to_string()));
    }

    #[test]
    fn test_template_without_tokens() {
        let response = ResponseEnvelope::success(Map::new());

        assert_eq!(construct_message("Done", &response).unwrap(), "Done\n");
    }

    #[test]
    fn test_non_string_values_and_dollar_signs() {
        let response = envelope(json!({"count": 3, "price": "$1"}));

        let message = construct_message("##count items for ##price", &response).unwrap();

        assert_eq!(message, "3 items for $1\n");
    }

    #[test]
    fn test_substituted_tokens_are_expanded() {
        let response = envelope(json!({"outer": "x ##inner", "inner": "y"}));

        assert_eq!(construct_message("##outer", &response).unwrap(), "x y\n");
    }

    #[test]
    fn test_self_referencing_value_does_not_loop_forever() {
        let response = envelope(json!({"loop": "##loop"}));

        let err = construct_message("##loop", &response).unwrap_err();

        assert!(matches!(err, MessageError::NotConverged(_)));
    }

    #[test]
    fn test_growing_value_runs_out_of_rounds() {
        let response = envelope(json!({"grow": "a##grow"}));

        let err = construct_message("##grow", &response).unwrap_err();

        assert_eq!(err, MessageError::NotConverged(1 + MAX_SUBSTITUTIONS));
    }

    #[test]
    fn test_many_distinct_tokens_converge() {
        let data: Map<String, Value> = (0..100)
            .map(|i| (format!("v{i}"), Value::String(i.to_string())))
            .collect();
        let response = ResponseEnvelope::success(data);
        let template = (0..100)
            .map(|i| format!("##v{i}"))
            .collect::<Vec<_>>()
            .join(" ");

        let message = construct_message(&template, &response).unwrap();

        assert!(message.starts_with("0 1 2 "));
        assert!(message.ends_with(" 99\n"));
    }
}
