//! HTTP client for the bridge's per-camera API.
//!
//! Every public method absorbs transport and protocol failures and hands back
//! a sentinel (`None`, `false` or [`ConnectionState::Disconnected`]). Callers
//! never see a raw `reqwest` error.

use crate::camera::camera_entity::{CameraEndpoint, CameraIdentity, ConnectionState};
use crate::errors::AppError;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde_json::Value;

#[derive(Clone)]
pub struct BridgeClient {
    endpoint: CameraEndpoint,
    http_client: Client, // Shared pool, cloned from whoever composed us
}

impl BridgeClient {
    pub fn new(endpoint: CameraEndpoint, http_client: Client) -> Self {
        BridgeClient {
            endpoint,
            http_client,
        }
    }

    pub fn endpoint(&self) -> &CameraEndpoint {
        &self.endpoint
    }

    async fn get_json(&self, url: &str) -> Result<Value, AppError> {
        debug!("Bridge [{}]: GET {}", self.endpoint.name(), url);
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        debug!("Bridge [{}]: GET {} -> {}", self.endpoint.name(), url, status);
        if status != StatusCode::OK {
            return Err(AppError::Protocol(format!("GET {} returned HTTP {}", url, status)));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get_base_info(&self) -> Option<Value> {
        let url = self.endpoint.api_base_url();
        match self.get_json(&url).await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Bridge [{}]: camera info unavailable: {}", self.endpoint.name(), e);
                None
            }
        }
    }

    pub async fn get_identity(&self) -> Option<CameraIdentity> {
        let info = self.get_base_info().await?;
        let basic_info = info.get("camera_info")?.get("basicInfo")?;
        let mac = basic_info.get("mac")?.as_str()?;
        let model = basic_info.get("model")?.as_str()?;
        Some(CameraIdentity {
            mac: mac.to_string(),
            model: model.to_string(),
        })
    }

    pub async fn get_stream_url(&self) -> Option<String> {
        let info = self.get_base_info().await?;
        info.get("rtsp_url")?.as_str().map(str::to_string)
    }

    pub async fn get_connection_status(&self) -> ConnectionState {
        let url = self.endpoint.api_url("status");
        match self.get_json(&url).await {
            Ok(body) => body
                .get("status")
                .and_then(Value::as_str)
                .map(ConnectionState::from_status)
                .unwrap_or(ConnectionState::Disconnected),
            Err(e) => {
                warn!("Bridge [{}]: status check failed: {}", self.endpoint.name(), e);
                ConnectionState::Disconnected
            }
        }
    }

    /// Asks the bridge to start its control session for this camera.
    pub async fn request_connect(&self) -> bool {
        let url = self.endpoint.api_url("start");
        match self.get_json(&url).await {
            Ok(body) => body.get("status").map(is_truthy).unwrap_or(false),
            Err(e) => {
                warn!("Bridge [{}]: start request failed: {}", self.endpoint.name(), e);
                false
            }
        }
    }

    /// Issues `GET /{path}` and reports whether the bridge answered `{"status": "success"}`.
    pub async fn send_command(&self, path: &str) -> bool {
        let url = self.endpoint.api_url(path);
        match self.get_json(&url).await {
            Ok(body) => {
                let accepted = body.get("status").and_then(Value::as_str) == Some("success");
                if !accepted {
                    warn!("Bridge [{}]: command '{}' rejected: {}", self.endpoint.name(), path, body);
                }
                accepted
            }
            Err(e) => {
                warn!("Bridge [{}]: command '{}' failed: {}", self.endpoint.name(), path, e);
                false
            }
        }
    }
}

/// JSON truthiness as the bridge's own clients understand it.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
