#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use dealbot::bot::{PhotoRef, ReplySink};
use dealbot::fetcher::{FetchError, PageResponse, PageSource};
use reqwest::StatusCode;
use url::Url;

/// What the stub does for one exact URL.
pub enum Route {
    /// Answer as if redirected to this URL.
    Redirect(&'static str),
    /// Serve this body from the requested URL.
    Page(String),
}

/// Deterministic in-memory `PageSource`. Unknown URLs fail like a DNS error.
#[derive(Default)]
pub struct StubSource {
    routes: HashMap<String, Route>,
    requests: Mutex<Vec<String>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redirect(mut self, from: &str, to: &'static str) -> Self {
        self.routes.insert(from.to_string(), Route::Redirect(to));
        self
    }

    pub fn page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.routes.insert(url.to_string(), Route::Page(body.into()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for StubSource {
    async fn get(&self, url: &Url) -> Result<PageResponse, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.routes.get(url.as_str()) {
            Some(Route::Redirect(to)) => Ok(PageResponse::new(
                Url::parse(to)?,
                StatusCode::OK,
                String::new(),
            )),
            Some(Route::Page(body)) => Ok(PageResponse::new(
                url.clone(),
                StatusCode::OK,
                body.clone(),
            )),
            None => Err(FetchError::Connect(format!("no route for {url}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(String),
    Photo(String, String),
}

/// Records every reply instead of sending it.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingSink {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn send_text(&self, text: &str) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(Sent::Text(text.to_string()));
        Ok(())
    }

    async fn send_photo(&self, photo: &PhotoRef, caption: &str) -> anyhow::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Photo(photo.as_str().to_string(), caption.to_string()));
        Ok(())
    }
}

/// Fails every send.
pub struct BrokenSink;

#[async_trait]
impl ReplySink for BrokenSink {
    async fn send_text(&self, _text: &str) -> anyhow::Result<()> {
        anyhow::bail!("chat not found")
    }

    async fn send_photo(&self, _photo: &PhotoRef, _caption: &str) -> anyhow::Result<()> {
        anyhow::bail!("chat not found")
    }
}

/// Serves the same page for every URL, sleeping first when the path
/// contains `slow`.
pub struct DelayedSource {
    pub delay: std::time::Duration,
    pub body: &'static str,
}

#[async_trait]
impl PageSource for DelayedSource {
    async fn get(&self, url: &Url) -> Result<PageResponse, FetchError> {
        if url.path().contains("slow") {
            tokio::time::sleep(self.delay).await;
        }
        Ok(PageResponse::new(url.clone(), StatusCode::OK, self.body))
    }
}
