//! Tool System
//!
//! Lookup capabilities the reasoning loop can call by name. A tool takes a
//! free-text query and always answers with text: backend failures are turned
//! into diagnostic strings inside the tool so the loop has something to
//! reason about.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{AgentError, Result};

/// Tool trait - implement to add new capabilities
#[async_trait]
pub trait Tool: Send + Sync {
    /// Identifier the model uses in `Action:` lines
    fn name(&self) -> &str;

    /// Natural-language description shown to the model. The wording decides
    /// which tool the model picks for a question.
    fn description(&self) -> &str;

    /// Run the lookup. Never fails.
    async fn invoke(&self, query: &str) -> String;
}

/// Ordered registry of available tools
///
/// Registration order is preserved because it is the order in which the
/// tools are presented to the model.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new tool. A tool with the same name is replaced in place.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_arc(Arc::new(tool));
    }

    /// Register a shared tool
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        match self.index.get(&name) {
            Some(&slot) => self.tools[slot] = tool,
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&slot| Arc::clone(&self.tools[slot]))
    }

    /// Invoke a tool by name
    pub async fn invoke(&self, name: &str, query: &str) -> Result<String> {
        let tool = self
            .get(name)
            .ok_or_else(|| AgentError::ToolNotFound(name.to_string()))?;
        Ok(tool.invoke(query).await)
    }

    /// Tool names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// One `name: description` line per tool, for the prompt
    pub fn describe(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("{}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo(&'static str);

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "Repeats the query"
        }

        async fn invoke(&self, query: &str) -> String {
            format!("{}: {}", self.0, query)
        }
    }

    #[tokio::test]
    async fn test_tool_registry() {
        let mut registry = ToolRegistry::new();
        registry.register(Echo("WebSearch"));
        registry.register(Echo("Wikipedia"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["WebSearch", "Wikipedia"]);
        assert!(registry.get("unknown").is_none());

        let out = registry.invoke("Wikipedia", "Rust").await.unwrap();
        assert_eq!(out, "Wikipedia: Rust");

        let missing = registry.invoke("Calculator", "1+1").await;
        assert!(matches!(missing, Err(AgentError::ToolNotFound(name)) if name == "Calculator"));
    }

    #[test]
    fn test_reregister_keeps_position() {
        let mut registry = ToolRegistry::new();
        registry.register(Echo("a"));
        registry.register(Echo("b"));
        registry.register(Echo("a"));

        assert_eq!(registry.names(), vec!["a", "b"]);
        assert_eq!(
            registry.describe(),
            "a: Repeats the query\nb: Repeats the query"
        );
    }
}
