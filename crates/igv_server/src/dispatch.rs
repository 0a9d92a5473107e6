//! Request dispatch between MCP clients and the remote endpoint.
//!
//! A [`Bridge`] owns the read-only tool registry and the command sender. Each
//! request kind is handled by exhaustive matching on [`BridgeRequest`].

use crate::error::CallError;
use igv_session::CommandSender;
use igv_tool::{build_command, validate_arguments, ToolRegistry};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A request from the upstream caller
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeRequest {
    /// Advertise every compiled tool
    ListTools,
    /// Invoke one tool
    CallTool {
        /// Tool name
        name: String,
        /// Argument bag
        arguments: Map<String, Value>,
    },
}

/// The reply to a [`BridgeRequest`]
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeReply {
    /// Tool listing in registry order
    Tools(Vec<ToolDescriptor>),
    /// Remote response text, or why the call could not be made
    Call(Result<String, CallError>),
}

/// What a caller sees of a compiled tool
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema of the arguments
    pub input_schema: Map<String, Value>,
}

/// Dispatcher over a compiled registry and a command sender
#[derive(Clone)]
pub struct Bridge {
    registry: Arc<ToolRegistry>,
    sender: Arc<dyn CommandSender>,
}

impl Bridge {
    /// Create a bridge
    #[must_use]
    pub fn new(registry: ToolRegistry, sender: Arc<dyn CommandSender>) -> Self {
        Self {
            registry: Arc::new(registry),
            sender,
        }
    }

    /// The compiled registry
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one request
    pub async fn handle(&self, request: BridgeRequest) -> BridgeReply {
        match request {
            BridgeRequest::ListTools => BridgeReply::Tools(self.list_tools()),
            BridgeRequest::CallTool { name, arguments } => {
                BridgeReply::Call(self.call_tool(&name, &arguments).await)
            }
        }
    }

    /// Describe every tool in registry order
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.registry
            .iter()
            .map(|tool| ToolDescriptor {
                name: tool.name.clone(),
                description: tool.description.clone(),
                input_schema: tool.input_schema.to_json(),
            })
            .collect()
    }

    /// Call a tool and return the remote's response text.
    ///
    /// # Errors
    ///
    /// Returns error if the tool is unknown, a required argument is missing,
    /// or the send task fails. A remote `"Error: ..."` response is `Ok`.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: &Map<String, Value>,
    ) -> Result<String, CallError> {
        let tool = self.registry.get(name).ok_or_else(|| CallError::NotFound {
            name: name.to_string(),
        })?;

        validate_arguments(tool, arguments).map_err(|source| CallError::InvalidArguments {
            tool: name.to_string(),
            source,
        })?;

        let command = build_command(&tool.definition, arguments);
        tracing::debug!(tool = name, command = %command, "Dispatching tool call");

        let sender = Arc::clone(&self.sender);
        let response = tokio::spawn(async move { sender.send_command(&command).await })
            .await
            .map_err(|err| CallError::Failed {
                tool: name.to_string(),
                message: err.to_string(),
            })?;

        tracing::debug!(tool = name, response = %response, "Tool call finished");
        Ok(response)
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("tools", &self.registry.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use igv_tool::compile;
    use serde_json::json;
    use std::sync::Mutex;

    const DOC: &str = r#"
- name: goto
  description: Navigate to a locus
  arguments:
    - name: locus
- name: region
  arguments:
    - name: chr
    - name: start
      type: integer
    - name: end
      type: integer
    - name: description
      optional: true
- name: setLogScale
  arguments:
    - name: enable
      enumValues:
        - value: "True"
        - value: "False"
"#;

    /// Records sent commands and answers with a fixed response
    struct Recorder {
        response: String,
        sent: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn new(response: &str) -> Arc<Self> {
            Arc::new(Self {
                response: response.to_string(),
                sent: Mutex::new(Vec::new()),
            })
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandSender for Recorder {
        async fn send_command(&self, command: &str) -> String {
            self.sent.lock().unwrap().push(command.to_string());
            self.response.clone()
        }
    }

    struct Exploding;

    #[async_trait]
    impl CommandSender for Exploding {
        async fn send_command(&self, _command: &str) -> String {
            panic!("send failed");
        }
    }

    fn bridge(sender: Arc<dyn CommandSender>) -> Bridge {
        Bridge::new(compile(DOC).unwrap(), sender)
    }

    fn bag(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_list_tools_in_order() {
        let bridge = bridge(Recorder::new("OK"));
        let BridgeReply::Tools(tools) = bridge.handle(BridgeRequest::ListTools).await else {
            panic!("expected tool listing");
        };

        let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["goto", "region", "setLogScale"]);
        assert_eq!(tools[0].description, "Navigate to a locus");
        assert_eq!(tools[1].input_schema["required"], json!(["chr", "start", "end"]));
    }

    #[test]
    fn test_descriptor_serializes_camel_case() {
        let bridge = bridge(Recorder::new("OK"));
        let value = serde_json::to_value(&bridge.list_tools()[0]).unwrap();
        assert_eq!(value["inputSchema"]["type"], "object");
    }

    #[tokio::test]
    async fn test_call_builds_command_in_definition_order() {
        let recorder = Recorder::new("OK");
        let bridge = bridge(recorder.clone());

        let arguments = bag(json!({"end": 200, "chr": "chr1", "start": 100}));
        let reply = bridge
            .handle(BridgeRequest::CallTool {
                name: "region".to_string(),
                arguments,
            })
            .await;

        assert_eq!(reply, BridgeReply::Call(Ok("OK".to_string())));
        assert_eq!(recorder.sent(), vec!["region chr1 100 200"]);
    }

    #[tokio::test]
    async fn test_call_lowercases_boolean_enum() {
        let recorder = Recorder::new("OK");
        let bridge = bridge(recorder.clone());

        bridge
            .call_tool("setLogScale", &bag(json!({"enable": "True"})))
            .await
            .unwrap();
        assert_eq!(recorder.sent(), vec!["setLogScale true"]);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let recorder = Recorder::new("OK");
        let bridge = bridge(recorder.clone());

        let result = bridge.call_tool("zoomIn", &Map::new()).await;
        assert_eq!(
            result,
            Err(CallError::NotFound {
                name: "zoomIn".to_string()
            })
        );
        assert!(recorder.sent().is_empty());
    }

    #[tokio::test]
    async fn test_missing_required_argument_not_sent() {
        let recorder = Recorder::new("OK");
        let bridge = bridge(recorder.clone());

        let err = bridge.call_tool("goto", &Map::new()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error executing tool 'goto': Missing required argument 'locus'"
        );
        assert!(recorder.sent().is_empty());
    }

    #[tokio::test]
    async fn test_remote_error_text_is_success() {
        let bridge = bridge(Recorder::new("Error: Connection timeout"));
        let result = bridge.call_tool("goto", &bag(json!({"locus": "chr1"}))).await;
        assert_eq!(result, Ok("Error: Connection timeout".to_string()));
    }

    #[tokio::test]
    async fn test_call_over_loopback_session() {
        use igv_core::RemoteTarget;
        use igv_session::CommandSession;
        use std::time::Duration;
        use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let igv = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let (read, mut write) = socket.into_split();
            let mut line = String::new();
            BufReader::new(read).read_line(&mut line).await.unwrap();
            write.write_all(b"OK\n").await.unwrap();
            line
        });

        let session = CommandSession::new(RemoteTarget::new("127.0.0.1", port))
            .with_timeout(Duration::from_secs(2));
        let bridge = bridge(Arc::new(session));

        let result = bridge
            .call_tool("region", &bag(json!({"chr": "chr2", "start": 5, "end": 9.0})))
            .await;
        assert_eq!(result, Ok("OK".to_string()));
        assert_eq!(igv.await.unwrap(), "region chr2 5 9\n");
    }

    #[tokio::test]
    async fn test_panicking_sender_is_contained() {
        let bridge = bridge(Arc::new(Exploding));
        let result = bridge.call_tool("goto", &bag(json!({"locus": "chr1"}))).await;
        match result {
            Err(CallError::Failed { tool, .. }) => assert_eq!(tool, "goto"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
