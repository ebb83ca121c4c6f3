//! Ingredient detection from photos
//!
//! The object detector itself is an external service. This module owns the
//! seam ([`IngredientDetector`]), an HTTP client for it, the mapping from
//! detected object classes to ingredient names, and the bounded wait around
//! every call.

use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

pub const DEFAULT_DETECTION_TIMEOUT: Duration = Duration::from_secs(30);
/// Predictions below this confidence are ignored
pub const DEFAULT_MIN_SCORE: f64 = 0.5;

/// Object classes the detector knows, mapped to the ingredient they stand for
const OBJECT_TO_INGREDIENT: &[(&str, &str)] = &[
    ("broccoli", "broccoli"),
    ("carrot", "carrot"),
    ("apple", "apple"),
    ("banana", "banana"),
    ("orange", "orange"),
    ("pizza", "pizza"),
    ("cake", "cake"),
    ("hot dog", "hot dog"),
    ("sandwich", "sandwich"),
    ("bottle", "bottle"),
    ("wine glass", "wine"),
    ("cup", "cup"),
    ("fork", "fork"),
    ("knife", "knife"),
    ("spoon", "spoon"),
    ("bowl", "bowl"),
    ("donut", "donut"),
];

/// Error types for ingredient detection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DetectionError {
    #[error("Detection timed out after {0}s")]
    Timeout(u64),
    #[error("No recognizable ingredients found")]
    NoIngredients,
    #[error("Input is not an image (content type: {0})")]
    NotAnImage(String),
    #[error("Detection request failed: {0}")]
    Request(String),
}

impl DetectionError {
    /// Message shown to the user in place of detected ingredients
    pub fn user_message(&self) -> String {
        match self {
            DetectionError::Timeout(secs) => format!(
                "Image analysis timed out after {} seconds. Please try again.",
                secs
            ),
            DetectionError::NoIngredients => "No recognizable ingredients found. Try uploading a clearer image or add ingredients manually.".to_string(),
            DetectionError::NotAnImage(_) => "Please upload an image file.".to_string(),
            DetectionError::Request(_) => "Failed to analyze image. Please try again.".to_string(),
        }
    }
}

/// An uploaded image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    /// MIME type as reported by the upload, e.g. "image/jpeg"
    pub content_type: String,
}

impl ImageInput {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type.trim().to_lowercase().starts_with("image/")
    }
}

/// Trait for ingredient detectors
///
/// Implementations return ingredient names; empty results and timeouts are
/// handled by [`detect_ingredients`], not by the implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait IngredientDetector: Send + Sync {
    /// Detect ingredients in an image
    async fn detect(&self, image: &ImageInput) -> Result<Vec<String>, DetectionError>;

    /// Detector name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Ingredient for a detected object class, if the class is food-related
pub fn ingredient_for_object(class: &str) -> Option<&'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| OBJECT_TO_INGREDIENT.iter().copied().collect())
        .get(class.trim().to_lowercase().as_str())
        .copied()
}

/// Seconds for display, rounded up so a sub-second timeout never reads as zero
fn whole_seconds(timeout: Duration) -> u64 {
    timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0)
}

/// Runs a detector with a bounded wait and normalizes its output
///
/// Non-image input is rejected before the detector is called. Results are
/// lower-cased and de-duplicated in first-seen order; an empty result is
/// reported as [`DetectionError::NoIngredients`].
pub async fn detect_ingredients(
    detector: &dyn IngredientDetector,
    image: &ImageInput,
    timeout: Duration,
) -> Result<Vec<String>, DetectionError> {
    if !image.is_image() {
        return Err(DetectionError::NotAnImage(image.content_type.clone()));
    }

    tracing::info!(
        detector = detector.name(),
        bytes = image.bytes.len(),
        timeout_secs = timeout.as_secs(),
        "Detecting ingredients"
    );

    let detected = match tokio::time::timeout(timeout, detector.detect(image)).await {
        Ok(result) => result?,
        Err(_) => {
            tracing::warn!(
                detector = detector.name(),
                timeout_ms = timeout.as_millis() as u64,
                "Ingredient detection timed out"
            );
            return Err(DetectionError::Timeout(whole_seconds(timeout)));
        }
    };

    let mut unique: Vec<String> = Vec::new();
    for ingredient in detected {
        let ingredient = ingredient.trim().to_lowercase();
        if !ingredient.is_empty() && !unique.contains(&ingredient) {
            unique.push(ingredient);
        }
    }

    if unique.is_empty() {
        return Err(DetectionError::NoIngredients);
    }

    tracing::info!(count = unique.len(), "Ingredients detected");
    Ok(unique)
}

/// Tracks the newest detection request so stale results can be dropped
///
/// Requests are never aborted; a result is only applied if no newer request
/// started while it was in flight.
#[derive(Debug, Default)]
pub struct DetectionTracker {
    latest: Mutex<Option<Uuid>>,
}

impl DetectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new request, superseding any in flight
    pub async fn begin(&self) -> Uuid {
        let id = Uuid::new_v4();
        *self.latest.lock().await = Some(id);
        id
    }

    /// Whether `id` is still the newest request
    pub async fn is_current(&self, id: Uuid) -> bool {
        *self.latest.lock().await == Some(id)
    }
}

// ============================================================================
// HTTP detector
// ============================================================================

#[derive(Debug, Deserialize)]
struct DetectionResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    class: String,
    #[serde(default = "full_confidence")]
    score: f64,
}

fn full_confidence() -> f64 {
    1.0
}

/// Object-detection service reached over HTTP
///
/// POSTs the raw image bytes and expects
/// `{"predictions": [{"class": "broccoli", "score": 0.92}, ...]}`.
#[derive(Clone)]
pub struct HttpIngredientDetector {
    http_client: HttpClient,
    endpoint: String,
    min_score: f64,
}

impl HttpIngredientDetector {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            endpoint: endpoint.into(),
            min_score: DEFAULT_MIN_SCORE,
        }
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }
}

#[async_trait::async_trait]
impl IngredientDetector for HttpIngredientDetector {
    async fn detect(&self, image: &ImageInput) -> Result<Vec<String>, DetectionError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, image.content_type.as_str())
            .body(image.bytes.clone())
            .send()
            .await
            .map_err(|e| DetectionError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DetectionError::Request(format!(
                "Detector returned status {}: {}",
                status, body
            )));
        }

        let parsed: DetectionResponse = response
            .json()
            .await
            .map_err(|e| DetectionError::Request(format!("Invalid detector response: {}", e)))?;

        tracing::debug!(predictions = parsed.predictions.len(), "Detector responded");

        Ok(parsed
            .predictions
            .iter()
            .filter(|p| p.score >= self.min_score)
            .filter_map(|p| ingredient_for_object(&p.class))
            .map(str::to_string)
            .collect())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
