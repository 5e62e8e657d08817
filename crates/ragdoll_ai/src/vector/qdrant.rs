use std::time::Duration;

use ragdoll_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::{SearchHit, VectorRecord, VectorStore};

/// Qdrant REST client. Collections are created with the cosine metric; the
/// chunk text travels in the point payload under the `text` key.
#[derive(Debug, Clone)]
pub struct QdrantStore {
    base_url: String,
}

impl QdrantStore {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::new(
                "CONFIG_INVALID",
                "Qdrant base URL must be an http(s) URL",
            )
            .with_details(format!("base_url={base_url}")));
        }
        Ok(Self { base_url })
    }

    fn decode<T: serde::de::DeserializeOwned>(
        resp: Result<ureq::Response, ureq::Error>,
        what: &str,
    ) -> Result<T, AppError> {
        match resp {
            Ok(r) if r.status() == 200 => r.into_json().map_err(|e| {
                AppError::new("VECTOR_STORE_FAILED", format!("Failed to decode {what} response"))
                    .with_details(e.to_string())
            }),
            Ok(r) => Err(
                AppError::new("VECTOR_STORE_FAILED", format!("{what} request failed"))
                    .with_details(format!("status={}", r.status())),
            ),
            Err(ureq::Error::Status(status, _)) => Err(AppError::new(
                "VECTOR_STORE_FAILED",
                format!("{what} request failed"),
            )
            .with_details(format!("status={status}"))),
            Err(e) => Err(AppError::new(
                "VECTOR_STORE_FAILED",
                format!("Failed to call {what} endpoint"),
            )
            .with_details(e.to_string())
            .with_retryable(true)),
        }
    }
}

#[derive(Debug, Serialize)]
struct VectorParams {
    size: usize,
    distance: &'static str,
}

#[derive(Debug, Serialize)]
struct CreateCollectionRequest {
    vectors: VectorParams,
}

#[derive(Debug, Deserialize)]
struct CollectionDescription {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ListCollectionsResult {
    collections: Vec<CollectionDescription>,
}

#[derive(Debug, Deserialize)]
struct ListCollectionsResponse {
    result: ListCollectionsResult,
}

#[derive(Debug, Serialize)]
struct Point<'a> {
    id: u64,
    vector: &'a [f32],
    payload: PointPayload<'a>,
}

#[derive(Debug, Serialize)]
struct PointPayload<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    points: Vec<Point<'a>>,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    vector: &'a [f32],
    limit: usize,
    with_payload: bool,
}

#[derive(Debug, Deserialize)]
struct ScoredPoint {
    score: f32,
    payload: Option<ScoredPayload>,
}

#[derive(Debug, Deserialize)]
struct ScoredPayload {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    result: Vec<ScoredPoint>,
}

impl VectorStore for QdrantStore {
    fn create_collection(&self, name: &str, dims: usize) -> Result<(), AppError> {
        let url = format!("{}/collections/{name}", self.base_url);
        let resp = ureq::put(&url)
            .timeout(Duration::from_secs(10))
            .send_json(CreateCollectionRequest {
                vectors: VectorParams {
                    size: dims,
                    distance: "Cosine",
                },
            });
        Self::decode::<serde_json::Value>(resp, "create collection").map(|_| ())
    }

    fn delete_collection(&self, name: &str) -> Result<(), AppError> {
        let url = format!("{}/collections/{name}", self.base_url);
        let resp = ureq::delete(&url).timeout(Duration::from_secs(10)).call();
        match resp {
            // Deleting an absent collection is a no-op.
            Err(ureq::Error::Status(404, _)) => Ok(()),
            other => Self::decode::<serde_json::Value>(other, "delete collection").map(|_| ()),
        }
    }

    fn list_collections(&self) -> Result<Vec<String>, AppError> {
        let url = format!("{}/collections", self.base_url);
        let resp = ureq::get(&url).timeout(Duration::from_secs(10)).call();
        let decoded: ListCollectionsResponse = Self::decode(resp, "list collections")?;
        Ok(decoded
            .result
            .collections
            .into_iter()
            .map(|c| c.name)
            .collect())
    }

    fn upsert(&self, name: &str, records: &[VectorRecord]) -> Result<(), AppError> {
        let url = format!("{}/collections/{name}/points?wait=true", self.base_url);
        let points = records
            .iter()
            .map(|r| Point {
                id: r.id,
                vector: &r.vector,
                payload: PointPayload { text: &r.text },
            })
            .collect::<Vec<_>>();
        let resp = ureq::put(&url)
            .timeout(Duration::from_secs(60))
            .send_json(UpsertRequest { points });
        Self::decode::<serde_json::Value>(resp, "upsert points").map(|_| ())
    }

    fn search(
        &self,
        name: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>, AppError> {
        let url = format!("{}/collections/{name}/points/search", self.base_url);
        let resp = ureq::post(&url)
            .timeout(Duration::from_secs(30))
            .send_json(SearchRequest {
                vector,
                limit,
                with_payload: true,
            });
        // An absent collection reads as empty, not as an error.
        if let Err(ureq::Error::Status(404, _)) = resp {
            return Ok(Vec::new());
        }
        let decoded: SearchResponse = Self::decode(resp, "search points")?;
        Ok(decoded
            .result
            .into_iter()
            .map(|p| SearchHit {
                text: p.payload.map(|pl| pl.text).unwrap_or_default(),
                score: p.score,
            })
            .collect())
    }
}
