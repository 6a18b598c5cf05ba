use serde::Serialize;
use serde_json::Value;

use crate::API_VERSION;
use crate::error::{ClientError, ClientResult};

/// What every successful command returns; `data` holds the command's rows.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    pub ok: bool,
    pub command: String,
    pub version: String,
    pub data: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureEnvelope {
    pub ok: bool,
    pub error: ErrorContract,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorContract {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
}

pub fn success<T>(command: &str, data: T) -> ClientResult<SuccessEnvelope>
where
    T: Serialize,
{
    let data = serde_json::to_value(data)
        .map_err(|err| ClientError::internal_serialization(&err.to_string()))?;
    Ok(SuccessEnvelope {
        ok: true,
        command: command.to_string(),
        version: API_VERSION.to_string(),
        data,
    })
}

pub fn failure_from_error(error: &ClientError) -> FailureEnvelope {
    FailureEnvelope {
        ok: false,
        error: ErrorContract {
            code: error.code.clone(),
            message: error.message.clone(),
            recovery_steps: error.recovery_steps.clone(),
        },
        data: error.data.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{failure_from_error, success};
    use crate::ClientError;

    #[test]
    fn success_wraps_data_with_command_and_version() {
        let envelope = success("wallet list", json!({ "rows": [] }));
        assert!(envelope.is_ok());
        if let Ok(envelope) = envelope {
            assert!(envelope.ok);
            assert_eq!(envelope.command, "wallet list");
            assert_eq!(envelope.version, crate::API_VERSION);
            assert_eq!(envelope.data["rows"], json!([]));
        }
    }

    #[test]
    fn failure_keeps_code_recovery_and_data() {
        let envelope = failure_from_error(&ClientError::template_not_found("tpl_1"));
        assert!(!envelope.ok);
        assert_eq!(envelope.error.code, "template_not_found");
        assert_eq!(envelope.error.recovery_steps.len(), 2);
        assert_eq!(
            envelope.data.as_ref().map(|data| data["template_id"].clone()),
            Some(json!("tpl_1"))
        );
    }
}
