use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use engagement_core::domains::engagement::EngagementRecord;
use serde_json::Value;
use tower::ServiceExt;

/// Small dataset with duplicate post types
pub fn sample_records() -> Vec<EngagementRecord> {
    vec![
        EngagementRecord::new("carousel", 10, 4, 2, 16),
        EngagementRecord::new("carousel", 20, 6, 0, 26),
        EngagementRecord::new("video", 100, 10, 5, 115),
        EngagementRecord::new("static_image", 3, 0, 0, 3),
    ]
}

/// `n` rows cycling through three post types
pub fn generated_records(n: usize) -> Vec<EngagementRecord> {
    let post_types = ["carousel", "video", "reel"];
    (0..n)
        .map(|i| {
            let likes = (i % 50) as i32;
            EngagementRecord::new(post_types[i % 3], likes, 1, 1, likes + 2)
        })
        .collect()
}

/// Issue a GET against the router and decode the response body
pub async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    let json = serde_json::from_slice(&body)
        .unwrap_or_else(|e| panic!("{} returned non-JSON body ({}): {:?}", uri, e, body));
    (status, json)
}
