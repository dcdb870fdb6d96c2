//! Name-keyed tool registry.

use std::collections::HashMap;

use super::ToolDefinition;

/// Registry mapping tool names to definitions, preserving registration order.
///
/// Built once at startup and read-only afterwards, so it needs no locking:
/// the server shares it behind an `Arc`.
pub struct ToolRegistry {
    tools: HashMap<String, ToolDefinition>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Build a registry from a definition table in one pass.
    pub fn from_definitions(definitions: Vec<ToolDefinition>) -> Self {
        let mut registry = Self::new();
        for def in definitions {
            registry.register(def);
        }
        registry
    }

    /// Register a tool under its name. A duplicate name overwrites the
    /// earlier definition (last registration wins) and keeps the original
    /// position in listing order.
    pub fn register(&mut self, tool: ToolDefinition) {
        if !self.tools.contains_key(&tool.name) {
            self.order.push(tool.name.clone());
        }
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Look up a tool by name.
    pub fn lookup(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    /// Tool names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.order.iter().filter_map(|name| self.tools.get(name))
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
