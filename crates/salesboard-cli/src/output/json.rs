use std::io;

use salesboard_client::{ClientError, FailureEnvelope, SuccessEnvelope};
use serde::Serialize;
use serde_json::json;

const JSON_VERSION: &str = "v1";

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    let payload = json!({
        "ok": true,
        "version": JSON_VERSION,
        "data": success.data,
    });
    serialize_json_pretty(&payload)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    serialize_json_pretty(&FailureEnvelope::from(error))
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use salesboard_client::{ClientError, SuccessEnvelope};
    use serde_json::{Value, json};

    use super::{render_error_json, render_success_json};

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap_or(Value::Null)
    }

    #[test]
    fn success_json_wraps_data_with_version() {
        let payload = SuccessEnvelope {
            ok: true,
            command: "sale delete".to_string(),
            version: "0.1.0".to_string(),
            data: json!({ "id": 7, "deleted": true, "record_count": 0 }),
        };

        let rendered = render_success_json(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let value = parse(&text);
            assert_eq!(value["ok"], true);
            assert_eq!(value["version"], "v1");
            assert_eq!(value["data"]["id"], 7);
            assert!(value.get("command").is_none());
        }
    }

    #[test]
    fn error_json_carries_code_and_recovery_steps() {
        let error = ClientError::invalid_argument_for_command("bad range", Some("dashboard"));
        let rendered = render_error_json(&error);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let value = parse(&text);
            assert_eq!(value["ok"], false);
            assert_eq!(value["error"]["code"], "invalid_argument");
            assert_eq!(value["error"]["message"], "bad range");
            assert!(value["error"]["recovery_steps"].is_array());
        }
    }
}
