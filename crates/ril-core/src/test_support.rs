//! Shared fakes for unit tests.

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

use crate::error::TransportError;
use crate::feed::{HttpClient, HttpResponse};
use crate::observer::{SyncEvent, SyncObserver};

/// Serves canned responses by exact URL and records every request.
#[derive(Default)]
pub(crate) struct ScriptedClient {
    responses: HashMap<String, HttpResponse>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, url: &str, status: u16, body: Vec<u8>) -> Self {
        self.responses
            .insert(url.to_string(), HttpResponse { status, body });
        self
    }

    pub(crate) fn with_json(self, url: &str, body: &Value) -> Self {
        self.with(url, 200, body.to_string().into_bytes())
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for ScriptedClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::Request {
                url: url.to_string(),
                message: "no scripted response".to_string(),
            })
    }
}

/// Keeps every event for later assertions.
#[derive(Default)]
pub(crate) struct RecordingObserver {
    events: Mutex<Vec<SyncEvent>>,
}

impl RecordingObserver {
    pub(crate) fn events(&self) -> Vec<SyncEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl SyncObserver for RecordingObserver {
    fn on_event(&self, event: &SyncEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// A post carrying one preview image.
pub(crate) fn image_post(id: &str, url: &str, width: u32, height: u32) -> Value {
    json!({ "kind": "t3", "data": { "preview": { "images": [
        { "id": id, "source": { "url": url, "width": width, "height": height } }
    ] } } })
}

/// A listing page with the given posts and cursor.
pub(crate) fn listing(posts: Vec<Value>, after: Option<&str>) -> Value {
    json!({ "kind": "Listing", "data": { "after": after, "children": posts } })
}

/// Encode a blank image of the given size.
pub(crate) fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::new_rgb8(width, height)
        .write_to(&mut buffer, format)
        .unwrap();
    buffer.into_inner()
}
