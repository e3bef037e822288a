//! JSON envelope serializer
//!
//! Wraps a report (or the `getall` aggregate) with delivery metadata before
//! it is handed to the message sink. Field names are a stable contract:
//! `instance`, `customer_id`, `generated_at`, `command`, `result`.

use crate::config::ReportConfig;
use crate::error::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Timestamp format carried in `generated_at`.
const GENERATED_AT_FORMAT: &str = "%Y%m%d %H%M%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub instance: String,
    pub customer_id: String,
    pub generated_at: String,
    pub command: String,
    pub result: T,
}

impl<T: Serialize> Envelope<T> {
    /// Stamp a result with instance/customer metadata and the current time.
    pub fn new(report: &ReportConfig, command: &str, result: T) -> Self {
        Self {
            instance: report.instance.clone(),
            customer_id: report.customer_id.clone(),
            generated_at: Utc::now().format(GENERATED_AT_FORMAT).to_string(),
            command: command.to_string(),
            result,
        }
    }

    /// Deterministic pretty JSON: struct field order is fixed, so equal
    /// envelopes always serialize to equal text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
