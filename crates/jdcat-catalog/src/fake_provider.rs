//! Scripted [`CatalogProvider`] used by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::ProviderError;
use crate::provider::{CatalogProvider, CatalogRequest, ProviderResponse, SUCCESS_CODE};

type Handler = Box<dyn Fn(&CatalogRequest) -> Result<ProviderResponse, ProviderError> + Send + Sync>;

/// Answers each request with whatever `handler` returns and records every
/// request it saw.
pub struct ScriptedProvider {
    handler: Handler,
    calls: Mutex<Vec<CatalogRequest>>,
}

impl ScriptedProvider {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&CatalogRequest) -> Result<ProviderResponse, ProviderError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A provider that fails the test if it is ever called.
    pub fn unreachable() -> Self {
        Self::new(|request| panic!("unexpected provider call: {}", request.describe()))
    }

    pub fn calls(&self) -> Vec<CatalogRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CatalogProvider for ScriptedProvider {
    async fn execute(&self, request: &CatalogRequest) -> Result<ProviderResponse, ProviderError> {
        self.calls.lock().unwrap().push(request.clone());
        (self.handler)(request)
    }
}

pub fn ok(payload: Value) -> Result<ProviderResponse, ProviderError> {
    Ok(ProviderResponse {
        code: SUCCESS_CODE.to_owned(),
        payload,
    })
}

pub fn failed(code: &str) -> Result<ProviderResponse, ProviderError> {
    Ok(ProviderResponse {
        code: code.to_owned(),
        payload: json!({ "code": code, "en_desc": "scripted failure" }),
    })
}

pub fn price_payload(price: &str) -> Result<ProviderResponse, ProviderError> {
    ok(json!({ "price_changes": [{ "price": price }] }))
}
