#![allow(dead_code)]
use std::sync::{Arc, Mutex};

use log::*;
use simple_store_engine::{
    db_types::{Product, UserId},
    traits::{
        InvoiceProvider,
        OnChainAddressProvider,
        PaymentProviderError,
        ProviderFuture,
        RenderError,
        TemplateRenderer,
    },
    Catalog,
    MemoryBackend,
    Store,
    StoreConfig,
};
use store_common::Cents;

pub fn prepare_test_env() {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
}

pub fn user(name: &str) -> UserId {
    name.parse().expect("Invalid user id")
}

pub fn widget() -> Product {
    Product::new("A1", "Widget", Cents::from(999))
}

pub fn gadget() -> Product {
    Product::new("B2", "Gadget", Cents::from_dollars(25)).with_description("Does gadget things")
}

pub fn sticker() -> Product {
    Product::new("FREE", "Sticker", Cents::from(0))
}

pub fn catalog() -> Catalog {
    Catalog::new([widget(), gadget(), sticker()]).expect("Invalid test catalog")
}

/// A renderer that records every call and replies with `<template>` followed by the JSON context.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    calls: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
}

impl RecordingRenderer {
    pub fn calls(&self) -> Vec<(String, serde_json::Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<(String, serde_json::Value)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl TemplateRenderer for RecordingRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<Vec<u8>, RenderError> {
        self.calls.lock().unwrap().push((template.to_string(), context.clone()));
        Ok(format!("{template}\n{context}").into_bytes())
    }
}

pub struct BrokenRenderer;

impl TemplateRenderer for BrokenRenderer {
    fn render(&self, _: &str, _: &serde_json::Value) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::ExecutionFailed("the template has a syntax error".into()))
    }
}

/// Hands out `addr-<user>-<n>` addresses, or always fails.
#[derive(Debug, Default)]
pub struct TestAddresses {
    fail: bool,
    issued: Mutex<u64>,
}

impl TestAddresses {
    pub fn failing() -> Self {
        Self { fail: true, issued: Mutex::new(0) }
    }
}

impl OnChainAddressProvider for TestAddresses {
    fn onchain_address<'a>(
        &'a self,
        user: &'a UserId,
        _account: &'a str,
    ) -> ProviderFuture<'a, String, PaymentProviderError> {
        Box::pin(async move {
            if self.fail {
                return Err(PaymentProviderError::Unavailable("wallet is locked".into()));
            }
            let mut issued = self.issued.lock().unwrap();
            *issued += 1;
            Ok(format!("addr-{user}-{issued}"))
        })
    }
}

/// Records the requested amounts and hands out `lnsim<milli_atoms>` invoices, or always fails.
#[derive(Debug, Default)]
pub struct TestInvoices {
    fail: bool,
    pub requests: Mutex<Vec<i64>>,
}

impl TestInvoices {
    pub fn failing() -> Self {
        Self { fail: true, requests: Mutex::new(Vec::new()) }
    }
}

impl InvoiceProvider for TestInvoices {
    fn invoice(&self, milli_atoms: i64, _memo: Option<String>) -> ProviderFuture<'_, String, PaymentProviderError> {
        self.requests.lock().unwrap().push(milli_atoms);
        let fail = self.fail;
        Box::pin(async move {
            if fail {
                return Err(PaymentProviderError::Unavailable("the LN node is offline".into()));
            }
            Ok(format!("lnsim{milli_atoms}"))
        })
    }
}

pub fn memory_store(config: StoreConfig) -> (Store<MemoryBackend>, RecordingRenderer) {
    prepare_test_env();
    let renderer = RecordingRenderer::default();
    let store = Store::new(MemoryBackend::new(), catalog(), config, Arc::new(renderer.clone()));
    (store, renderer)
}
