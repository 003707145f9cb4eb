//! JSON response bodies.
//!
//! Field names and literal `status` values are part of the external
//! interface; chained instances and test harnesses match on them.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::relay::DownstreamBody;

/// `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthBody<'a> {
    pub status: &'static str,
    pub app: &'a str,
    pub port: u16,
}

impl<'a> HealthBody<'a> {
    pub fn healthy(app: &'a str, port: u16) -> Self {
        Self {
            status: "healthy",
            app,
            port,
        }
    }
}

/// `GET /api/start` after a completed downstream exchange.
#[derive(Debug, Serialize)]
pub struct StartSuccessBody<'a> {
    pub status: &'static str,
    pub app: &'a str,
    pub target: &'a str,
    pub response_status: u16,
    pub response_body: &'a DownstreamBody,
}

/// `GET /api/start` after a network-level failure (500).
#[derive(Debug, Serialize)]
pub struct StartErrorBody<'a> {
    pub status: &'static str,
    pub app: &'a str,
    pub target: &'a str,
    pub error: String,
}

/// `GET /api/start` without a configured target (400).
#[derive(Debug, Serialize)]
pub struct MissingTargetBody<'a> {
    pub error: &'static str,
    pub app: &'a str,
}

/// `GET|POST /api/receive`.
#[derive(Debug, Serialize)]
pub struct ReceivedBody<'a> {
    pub status: &'static str,
    pub app: &'a str,
    pub method: &'a str,
    pub data: Value,
    pub message: String,
}

impl<'a> ReceivedBody<'a> {
    pub fn new(app: &'a str, method: &'a str, data: Value) -> Self {
        Self {
            status: "received",
            app,
            method,
            data,
            message: format!("Request received successfully at {}", app),
        }
    }
}

/// `GET /`.
#[derive(Debug, Serialize)]
pub struct DiscoveryBody<'a> {
    pub app: &'a str,
    pub port: u16,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

impl<'a> DiscoveryBody<'a> {
    pub fn new(app: &'a str, port: u16) -> Self {
        let endpoints = BTreeMap::from([
            ("/health", "GET - Health check"),
            ("/api/start", "GET - Sends a request to TARGET_URL"),
            ("/api/receive", "GET/POST - Receives requests"),
        ]);
        Self {
            app,
            port,
            endpoints,
        }
    }
}
