//! Client-facing request/response shapes for the vector proxy and their
//! translation to the engine's REST bodies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VectorRequestError {
    #[error("invalid distance: {0}")]
    InvalidDistance(String),
    #[error("vector_name is required for point ID {0}")]
    MissingVectorName(String),
    #[error(
        "cannot use both 'query' vector and recommend inputs (positives/negatives/lookup_id) simultaneously"
    )]
    QueryAndRecommend,
    #[error("must provide at least one positive for recommend query")]
    NoPositives,
    #[error(
        "must specify either 'query' vector or recommend inputs (positives/negatives/lookup_id)"
    )]
    NoQuery,
}

pub const DISTANCES: [&str; 4] = ["Cosine", "Euclid", "Dot", "Manhattan"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VectorParams {
    pub size: u64,
    pub distance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreateCollectionRequest {
    #[serde(default)]
    pub vectors: BTreeMap<String, VectorParams>,
}

impl CreateCollectionRequest {
    pub fn to_engine(&self) -> Result<Value, VectorRequestError> {
        let mut vectors = Map::new();
        for (name, params) in &self.vectors {
            if !DISTANCES.contains(&params.distance.as_str()) {
                return Err(VectorRequestError::InvalidDistance(params.distance.clone()));
            }
            vectors.insert(
                name.clone(),
                json!({ "size": params.size, "distance": params.distance }),
            );
        }
        Ok(json!({ "vectors": vectors }))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Point {
    pub id: String,
    #[serde(default)]
    pub vector_name: String,
    #[serde(default)]
    pub vector: Vec<f32>,
    #[serde(default)]
    pub payload: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpsertRequest {
    #[serde(default)]
    pub points: Vec<Point>,
}

impl UpsertRequest {
    pub fn to_engine(&self) -> Result<Value, VectorRequestError> {
        let points = self
            .points
            .iter()
            .map(|p| {
                if p.vector_name.is_empty() {
                    return Err(VectorRequestError::MissingVectorName(p.id.clone()));
                }
                let mut named = Map::new();
                named.insert(p.vector_name.clone(), json!(p.vector));

                let mut point = json!({ "id": p.id, "vector": named });
                if let Some(payload) = &p.payload {
                    point["payload"] = Value::Object(payload.clone());
                }
                Ok(point)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(json!({ "points": points }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeletePointsRequest {
    #[serde(default)]
    pub points: Vec<String>,
}

impl DeletePointsRequest {
    pub fn to_engine(&self) -> Value {
        json!({ "points": self.points })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchFilter {
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldFilter {
    pub key: String,
    #[serde(rename = "match")]
    pub matches: MatchFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HeadFilter {
    #[serde(default)]
    pub must: Vec<FieldFilter>,
}

impl HeadFilter {
    /// Keyword, integer and boolean matches only; other values are dropped.
    fn to_engine(&self) -> Option<Value> {
        let must: Vec<Value> = self
            .must
            .iter()
            .filter(|c| match &c.matches.value {
                Value::String(_) | Value::Bool(_) => true,
                Value::Number(n) => n.is_i64() || n.is_u64(),
                _ => false,
            })
            .map(|c| json!({ "key": c.key, "match": { "value": c.matches.value } }))
            .collect();

        (!must.is_empty()).then(|| json!({ "must": must }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hnsw_ef: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryPointsRequest {
    /// Nearest-neighbour search.
    #[serde(default)]
    pub query: Vec<f32>,
    /// Recommendation inputs.
    #[serde(default)]
    pub lookup_id: Option<String>,
    #[serde(default)]
    pub positives: Vec<String>,
    #[serde(default)]
    pub negatives: Vec<String>,

    #[serde(default)]
    pub vector_name: String,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub score_threshold: Option<f32>,
    #[serde(default)]
    pub filter: Option<HeadFilter>,
    #[serde(default)]
    pub params: Option<SearchParams>,
    #[serde(default)]
    pub with_payload: Option<bool>,
    #[serde(default)]
    pub with_vector: Option<bool>,
}

impl QueryPointsRequest {
    pub fn to_engine(&self) -> Result<Value, VectorRequestError> {
        let positives: Vec<&String> = self.lookup_id.iter().chain(&self.positives).collect();
        let has_query = !self.query.is_empty();
        let has_recommend = !positives.is_empty() || !self.negatives.is_empty();

        let query = match (has_query, has_recommend) {
            (true, true) => return Err(VectorRequestError::QueryAndRecommend),
            (false, true) if positives.is_empty() => return Err(VectorRequestError::NoPositives),
            (false, true) => json!({
                "recommend": { "positive": positives, "negative": self.negatives }
            }),
            (true, false) => json!(self.query),
            (false, false) => return Err(VectorRequestError::NoQuery),
        };

        let mut body = json!({
            "query": query,
            "with_payload": self.with_payload.unwrap_or(false),
            "with_vector": self.with_vector.unwrap_or(false),
        });
        if !self.vector_name.is_empty() {
            body["using"] = json!(self.vector_name);
        }
        if let Some(limit) = self.limit {
            body["limit"] = json!(limit);
        }
        if let Some(offset) = self.offset {
            body["offset"] = json!(offset);
        }
        if let Some(threshold) = self.score_threshold {
            body["score_threshold"] = json!(threshold);
        }
        if let Some(filter) = self.filter.as_ref().and_then(HeadFilter::to_engine) {
            body["filter"] = filter;
        }
        if let Some(params) = &self.params {
            body["params"] = json!(params);
        }

        Ok(body)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPoint {
    pub id: Value,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vectors: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl ScoredPoint {
    /// An unnamed vector is reported under `default`.
    pub fn from_engine(point: &Value) -> Self {
        let vectors = match point.get("vector") {
            Some(Value::Object(named)) => Some(named.clone()),
            Some(unnamed @ Value::Array(_)) => {
                let mut m = Map::new();
                m.insert("default".to_string(), unnamed.clone());
                Some(m)
            }
            _ => None,
        };

        Self {
            id: point.get("id").cloned().unwrap_or(Value::Null),
            score: point.get("score").and_then(Value::as_f64).unwrap_or_default(),
            vectors,
            payload: point.get("payload").filter(|p| !p.is_null()).cloned(),
        }
    }
}

/// `result.points` (or a bare `result` array) → simplified points.
pub fn simplify_query_result(result: &Value) -> Vec<ScoredPoint> {
    let points = result
        .get("points")
        .and_then(Value::as_array)
        .or_else(|| result.as_array());

    points
        .map(|ps| ps.iter().map(ScoredPoint::from_engine).collect())
        .unwrap_or_default()
}
