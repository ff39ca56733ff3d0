//! Project directory trees as stored in the graph.
//!
//! A `ResearchStudy` vertex (keyed by `auth_resource_path`) points at its root
//! directory through a `rootDir_Directory` edge; below that, `Directory` and
//! `DocumentReference` vertices are linked by plain edges and named by `data.name`.

use serde::Serialize;
use serde_json::{Map, Value};

use super::client::{QueryResult, Vertex};
use super::query::{Condition, Query};
use crate::authz::ResourcePath;

const STUDY: &str = "ResearchStudy";
const ROOT_EDGE: &str = "rootDir_Directory";
const DIRECTORY: &str = "Directory";
const DOCUMENT: &str = "DocumentReference";
const ENTRY_LABELS: [&str; 2] = [DIRECTORY, DOCUMENT];

/// Studies whose resource path is in `permitted`, rendered as `{"project": path}`.
pub fn visible_projects_query(permitted: &[String]) -> Query {
    let mut template = Map::new();
    template.insert(
        "project".to_string(),
        Value::String("$f0.auth_resource_path".to_string()),
    );

    Query::v()
        .has_label([STUDY])
        .has(Condition::within("auth_resource_path", permitted.iter().cloned()))
        .as_("f0")
        .render(template)
}

pub fn project_paths(rows: Vec<QueryResult>) -> Vec<String> {
    rows.into_iter()
        .filter_map(|row| row.render)
        .filter_map(|render| match render.get("project") {
            Some(Value::String(path)) => Some(path.clone()),
            _ => None,
        })
        .collect()
}

/// Children of the directory reached by walking `segments` from the project root.
pub fn directory_query(project: &ResourcePath, segments: &[String]) -> Query {
    let mut q = Query::v()
        .has_label([STUDY])
        .has(Condition::eq("auth_resource_path", project.as_str()))
        .out([ROOT_EDGE]);

    for segment in segments {
        q = q
            .out(Vec::<String>::new())
            .has_label(ENTRY_LABELS)
            .has(Condition::eq("name", segment.as_str()));
    }

    q.out(Vec::<String>::new()).has_label(ENTRY_LABELS)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectoryListing {
    pub directories: Vec<Vertex>,
    pub documents: Vec<Vertex>,
}

impl DirectoryListing {
    pub fn from_rows(rows: Vec<QueryResult>) -> Self {
        let mut listing = Self::default();
        for vertex in rows.into_iter().filter_map(|row| row.vertex) {
            match vertex.label.as_str() {
                DIRECTORY => listing.directories.push(vertex),
                DOCUMENT => listing.documents.push(vertex),
                _ => {}
            }
        }
        listing
    }
}
