//! Traversal statements in the graph engine's JSON wire form.
//!
//! ```ignore
//! let q = Query::v()
//!     .has_label(["ResearchStudy"])
//!     .has(Condition::eq("auth_resource_path", "/programs/p/projects/q"))
//!     .out(["rootDir_Directory"]);
//! ```

use serde::Serialize;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    Eq,
    Within,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub key: String,
    pub value: Value,
    pub condition: Operator,
}

impl Condition {
    pub fn eq(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            condition: Operator::Eq,
        }
    }

    pub fn within<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Value>,
    {
        Self {
            key: key.into(),
            value: Value::Array(values.into_iter().map(Into::into).collect()),
            condition: Operator::Within,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    statements: Vec<Value>,
}

fn labels<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    labels.into_iter().map(Into::into).collect()
}

impl Query {
    /// Start from every vertex.
    pub fn v() -> Self {
        Self {
            statements: vec![json!({ "v": [] })],
        }
    }

    fn push(mut self, statement: Value) -> Self {
        self.statements.push(statement);
        self
    }

    pub fn has_label<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(json!({ "hasLabel": labels(names) }))
    }

    pub fn has(self, condition: Condition) -> Self {
        self.push(json!({ "has": { "condition": condition } }))
    }

    /// Follow outgoing edges; no labels means any edge.
    pub fn out<I, S>(self, edge_labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(json!({ "out": labels(edge_labels) }))
    }

    pub fn as_(self, name: &str) -> Self {
        self.push(json!({ "as": name }))
    }

    /// Project each result into `template`; `$name.field` refers to a marked step.
    pub fn render(self, template: Map<String, Value>) -> Self {
        self.push(json!({ "render": template }))
    }

    pub fn statements(&self) -> &[Value] {
        &self.statements
    }
}
