//! Tool trait and registry for exposing queries to an agent.
//!
//! Tools are how an orchestrating agent reaches CarAPI. Each tool takes
//! JSON arguments and returns a value the agent reads as text.
//!
//! `ToolDefinition` serializes to the function-calling format agent
//! frameworks expect: `{"type": "function", "function": {...}}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ToolError;

/// A type alias for `Result<T, ToolError>`.
pub type ToolResult<T> = Result<T, ToolError>;

/// Definition of a tool for LLM function calling.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct ToolDefinition {
    /// Name of the tool, in `snake_case`.
    pub name: String,

    /// What the tool does; the model reads this to decide when to call it.
    pub description: String,

    /// JSON schema for the tool's parameters.
    pub parameters: Value,
}

impl ToolDefinition {
    /// Create a new tool definition.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

impl Serialize for ToolDefinition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let function = serde_json::json!({
            "name": self.name,
            "description": self.description,
            "parameters": self.parameters,
        });

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", "function")?;
        map.serialize_entry("function", &function)?;
        map.end()
    }
}

/// The core trait for all tools that agents can use.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Static name of the tool.
    const NAME: &'static str;

    /// Arguments type for the tool.
    type Args: for<'de> Deserialize<'de> + Send;

    /// Output type of the tool.
    type Output: Serialize + Send;

    /// Error type for tool execution.
    type Error: Into<ToolError> + Send;

    /// Get the name of the tool.
    fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Get the description of the tool.
    fn description(&self) -> String;

    /// Get the JSON schema for the tool's parameters.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with the given arguments.
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error>;

    /// Get the tool definition for LLM function calling.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(Self::NAME, self.description(), self.parameters_schema())
    }

    /// Call the tool with JSON arguments and return JSON output.
    ///
    /// Arguments may be a JSON object or a string containing one; `null`
    /// is read as an empty object so all-default tools can be called bare.
    async fn call_json(&self, args: Value) -> ToolResult<Value>
    where
        Self::Output: 'static,
    {
        let typed_args: Self::Args = match args {
            Value::String(s) => serde_json::from_str(&s)
                .map_err(|e| ToolError::InvalidArguments(e.to_string()))?,
            Value::Null => serde_json::from_value(Value::Object(serde_json::Map::new()))
                .map_err(|e| ToolError::InvalidArguments(e.to_string()))?,
            other => serde_json::from_value(other)
                .map_err(|e| ToolError::InvalidArguments(e.to_string()))?,
        };

        let result = self.call(typed_args).await.map_err(Into::into)?;
        serde_json::to_value(result).map_err(|e| ToolError::Execution(e.to_string()))
    }
}

/// A boxed dynamic tool that can be used in collections.
pub type BoxedTool = Box<dyn DynTool>;

/// Object-safe version of the Tool trait for dynamic dispatch.
#[async_trait]
pub trait DynTool: Send + Sync {
    /// Get the name of the tool.
    fn name(&self) -> &str;

    /// Get the tool definition.
    fn definition(&self) -> ToolDefinition;

    /// Call the tool with JSON arguments.
    async fn call_json(&self, args: Value) -> ToolResult<Value>;
}

#[async_trait]
impl<T: Tool + 'static> DynTool for T
where
    T::Output: 'static,
{
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn definition(&self) -> ToolDefinition {
        Tool::definition(self)
    }

    async fn call_json(&self, args: Value) -> ToolResult<Value> {
        Tool::call_json(self, args).await
    }
}

/// A collection of tools, keyed by name.
#[derive(Default)]
pub struct ToolBox {
    tools: BTreeMap<String, BoxedTool>,
}

impl ToolBox {
    /// Create a new empty toolbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool, replacing any tool with the same name.
    pub fn add<T: Tool + 'static>(&mut self, tool: T)
    where
        T::Output: 'static,
    {
        self.tools.insert(Tool::name(&tool).to_owned(), Box::new(tool));
    }

    /// Add a boxed tool.
    pub fn add_boxed(&mut self, tool: BoxedTool) {
        self.tools.insert(tool.name().to_owned(), tool);
    }

    /// Get a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BoxedTool> {
        self.tools.get(name)
    }

    /// Get all tool definitions, ordered by name.
    #[must_use]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    /// Get the names of all tools, in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Check if the toolbox contains a tool with the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get the number of tools in the toolbox.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the toolbox is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Call a tool by name with JSON arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::NotFound`] for an unknown name, or whatever the
    /// tool itself returns.
    pub async fn call(&self, name: &str, args: Value) -> ToolResult<Value> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_owned()))?;
        tool.call_json(args).await
    }
}

impl fmt::Debug for ToolBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolBox")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, Default)]
    struct EchoTool;

    #[derive(Debug, Deserialize)]
    struct EchoArgs {
        #[serde(default = "default_message")]
        message: String,
    }

    fn default_message() -> String {
        "ping".to_owned()
    }

    #[async_trait]
    impl Tool for EchoTool {
        const NAME: &'static str = "echo";
        type Args = EchoArgs;
        type Output = String;
        type Error = ToolError;

        fn description(&self) -> String {
            "Echoes back the input message.".to_owned()
        }

        fn parameters_schema(&self) -> Value {
            serde_json::json!({
                "type": "object",
                "properties": {
                    "message": {"type": "string", "description": "The message to echo"}
                }
            })
        }

        async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
            if args.message == "fail" {
                return Err(ToolError::execution("asked to fail"));
            }
            Ok(args.message)
        }
    }

    mod tool_definition {
        use super::*;

        #[test]
        fn serializes_to_function_format() {
            let def = Tool::definition(&EchoTool);
            let json = serde_json::to_value(&def).unwrap();
            assert_eq!(json["type"], "function");
            assert_eq!(json["function"]["name"], "echo");
            assert_eq!(json["function"]["parameters"]["type"], "object");
        }

        #[test]
        fn deserializes_flat_shape() {
            let def: ToolDefinition = serde_json::from_value(serde_json::json!({
                "name": "echo", "description": "d", "parameters": {}
            }))
            .unwrap();
            assert_eq!(def.name, "echo");
        }
    }

    mod call_json {
        use super::*;

        #[tokio::test]
        async fn accepts_object() {
            let out = Tool::call_json(&EchoTool, serde_json::json!({"message": "hi"}))
                .await
                .unwrap();
            assert_eq!(out, Value::String("hi".into()));
        }

        #[tokio::test]
        async fn accepts_stringified_object() {
            let out = Tool::call_json(&EchoTool, Value::String(r#"{"message":"hi"}"#.into()))
                .await
                .unwrap();
            assert_eq!(out, Value::String("hi".into()));
        }

        #[tokio::test]
        async fn null_uses_defaults() {
            let out = Tool::call_json(&EchoTool, Value::Null).await.unwrap();
            assert_eq!(out, Value::String("ping".into()));
        }

        #[tokio::test]
        async fn wrong_type_is_invalid_arguments() {
            let err = Tool::call_json(&EchoTool, serde_json::json!({"message": 5}))
                .await
                .unwrap_err();
            assert!(matches!(err, ToolError::InvalidArguments(_)));
        }

        #[tokio::test]
        async fn tool_error_passes_through() {
            let err = Tool::call_json(&EchoTool, serde_json::json!({"message": "fail"}))
                .await
                .unwrap_err();
            assert!(matches!(err, ToolError::Execution(_)));
        }
    }

    mod toolbox {
        use super::*;

        #[test]
        fn add_and_lookup() {
            let mut toolbox = ToolBox::new();
            assert!(toolbox.is_empty());
            toolbox.add(EchoTool);
            assert_eq!(toolbox.len(), 1);
            assert!(toolbox.contains("echo"));
            assert!(toolbox.get("echo").is_some());
            assert_eq!(toolbox.names(), ["echo"]);
            assert_eq!(toolbox.definitions().len(), 1);
        }

        #[test]
        fn add_boxed_uses_tool_name() {
            let mut toolbox = ToolBox::new();
            toolbox.add_boxed(Box::new(EchoTool));
            assert!(toolbox.contains("echo"));
        }

        #[tokio::test]
        async fn call_dispatches_by_name() {
            let mut toolbox = ToolBox::new();
            toolbox.add(EchoTool);
            let out = toolbox
                .call("echo", serde_json::json!({"message": "hello"}))
                .await
                .unwrap();
            assert_eq!(out, Value::String("hello".into()));
        }

        #[tokio::test]
        async fn call_unknown_is_not_found() {
            let toolbox = ToolBox::new();
            match toolbox.call("nonexistent", Value::Null).await {
                Err(ToolError::NotFound(name)) => assert_eq!(name, "nonexistent"),
                other => panic!("expected NotFound, got {other:?}"),
            }
        }

        #[test]
        fn debug_lists_names() {
            let mut toolbox = ToolBox::new();
            toolbox.add(EchoTool);
            assert!(format!("{toolbox:?}").contains("echo"));
        }
    }
}
