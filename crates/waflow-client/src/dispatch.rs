//! Sequential per-item dispatch loop

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};
use waflow_core::{build, schema, Credentials, Operation, Params, Result};

use crate::transport::Transport;

/// One unit of work: a resource/operation pair plus its field bag
#[derive(Debug, Clone, Deserialize)]
pub struct InputItem {
    /// Resource name (`message`, `interactive`, `template`, `media`,
    /// `catalog`)
    pub resource: String,
    /// Operation name within the resource (`sendText`, `sendButtons`, ...)
    pub operation: String,
    /// Flat field bag for this item
    #[serde(default)]
    pub params: Params,
}

/// Sequential dispatcher: one request per input item, in input order
///
/// Items are processed strictly one at a time; nothing is shared across
/// items except the read-only credentials. A failed item aborts the run
/// unless continue-on-fail is enabled, in which case the failure becomes
/// that item's `{"error": ...}` output record.
pub struct Dispatcher<T: Transport> {
    transport: T,
    credentials: Credentials,
    continue_on_fail: bool,
}

impl<T: Transport> Dispatcher<T> {
    /// Create a dispatcher
    #[must_use]
    pub fn new(transport: T, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials,
            continue_on_fail: false,
        }
    }

    /// Capture per-item errors as output records instead of aborting
    #[must_use]
    pub fn with_continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }

    /// Process all items, returning one output record per item in input
    /// order
    ///
    /// # Errors
    /// Without continue-on-fail, the first failing item aborts the run and
    /// the remaining items stay unprocessed.
    pub async fn run(&self, items: &[InputItem]) -> Result<Vec<Value>> {
        let mut records = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            match self.process(item).await {
                Ok(response) => records.push(response),
                Err(e) if self.continue_on_fail => {
                    warn!(item = index, error = %e, "item failed, continuing");
                    records.push(json!({ "error": e.to_string() }));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(records)
    }

    async fn process(&self, item: &InputItem) -> Result<Value> {
        let operation = Operation::parse(&item.resource, &item.operation)?;
        schema::check_required(operation, &item.params)?;
        let spec = build(operation, &item.params, &self.credentials)?;

        debug!(
            resource = %item.resource,
            operation = %item.operation,
            method = %spec.method,
            "dispatching item"
        );
        self.transport
            .request(spec.method, &spec.url, spec.body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use serde_json::json;
    use waflow_core::{Error, HttpMethod};

    fn credentials() -> Credentials {
        Credentials::new("token", "12345").with_business_account_id("67890")
    }

    fn text_item(to: &str) -> InputItem {
        InputItem {
            resource: "message".to_string(),
            operation: "sendText".to_string(),
            params: Params::new().with("to", to).with("message", "hola"),
        }
    }

    fn invalid_buttons_item() -> InputItem {
        InputItem {
            resource: "interactive".to_string(),
            operation: "sendButtons".to_string(),
            params: Params::new()
                .with("to", "1")
                .with("body_text", "b")
                .with("buttons", json!([])),
        }
    }

    #[tokio::test]
    async fn test_run_preserves_input_order() {
        let mut transport = MockTransport::new();
        transport.expect_request().times(2).returning(|_, _, body| {
            let to = body.unwrap()["to"].clone();
            Ok(json!({ "echo": to }))
        });

        let dispatcher = Dispatcher::new(transport, credentials());
        let records = dispatcher
            .run(&[text_item("111"), text_item("222")])
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["echo"], "111");
        assert_eq!(records[1]["echo"], "222");
    }

    #[tokio::test]
    async fn test_continue_on_fail_captures_error_record() {
        let mut transport = MockTransport::new();
        transport
            .expect_request()
            .times(2)
            .returning(|_, _, _| Ok(json!({ "messages": [{ "id": "wamid.ok" }] })));

        let dispatcher = Dispatcher::new(transport, credentials()).with_continue_on_fail(true);
        let records = dispatcher
            .run(&[text_item("111"), invalid_buttons_item(), text_item("222")])
            .await
            .unwrap();

        assert_eq!(records.len(), 3);
        assert!(records[0].get("error").is_none());
        assert!(records[1]["error"]
            .as_str()
            .unwrap()
            .contains("at least one button"));
        assert!(records[2].get("error").is_none());
    }

    #[tokio::test]
    async fn test_abort_mode_stops_at_first_failure() {
        let mut transport = MockTransport::new();
        transport
            .expect_request()
            .times(1)
            .returning(|_, _, _| Ok(json!({})));

        let dispatcher = Dispatcher::new(transport, credentials());
        let result = dispatcher
            .run(&[text_item("111"), invalid_buttons_item(), text_item("222")])
            .await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_unknown_operation_is_validation_error() {
        let transport = MockTransport::new();
        let dispatcher = Dispatcher::new(transport, credentials());

        let item = InputItem {
            resource: "message".to_string(),
            operation: "sendSmoke".to_string(),
            params: Params::new(),
        };
        let result = dispatcher.run(&[item]).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_missing_required_field_never_reaches_transport() {
        let mut transport = MockTransport::new();
        transport.expect_request().times(0);

        let dispatcher = Dispatcher::new(transport, credentials());
        let item = InputItem {
            resource: "message".to_string(),
            operation: "sendText".to_string(),
            params: Params::new().with("to", "1"),
        };

        let err = dispatcher.run(&[item]).await.unwrap_err();
        assert!(err.to_string().contains("`message`"));
    }

    #[tokio::test]
    async fn test_management_item_uses_business_url() {
        let mut transport = MockTransport::new();
        transport
            .expect_request()
            .withf(|method, url, body| {
                *method == HttpMethod::Get
                    && url.ends_with("/67890/message_templates")
                    && body.is_none()
            })
            .times(1)
            .returning(|_, _, _| Ok(json!({ "data": [] })));

        let dispatcher = Dispatcher::new(transport, credentials());
        let item = InputItem {
            resource: "template".to_string(),
            operation: "listTemplates".to_string(),
            params: Params::new(),
        };

        let records = dispatcher.run(&[item]).await.unwrap();
        assert_eq!(records[0], json!({ "data": [] }));
    }

    #[tokio::test]
    async fn test_api_error_becomes_error_record_in_continue_mode() {
        let mut transport = MockTransport::new();
        transport.expect_request().times(1).returning(|_, _, _| {
            Err(Error::Api {
                code: 131026,
                message: "Receiver incapable".to_string(),
            })
        });

        let dispatcher = Dispatcher::new(transport, credentials()).with_continue_on_fail(true);
        let records = dispatcher.run(&[text_item("111")]).await.unwrap();

        let message = records[0]["error"].as_str().unwrap();
        assert!(message.contains("131026"));
        assert!(message.contains("Receiver incapable"));
    }
}
