//! JSON shapes exchanged with callers.
//!
//! Requests keep the field names used by the web client (`Tasks`,
//! `analyseType`, `cycleStatus`).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::task::Task;
use crate::engine::Analysis;
use crate::{rlog_debug, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(rename = "Tasks", default)]
    pub tasks: Vec<Task>,
    #[serde(rename = "analyseType", default, skip_serializing_if = "Option::is_none")]
    pub analyse_type: Option<String>,
}

/// Either a full request or a bare array of tasks.
#[derive(Deserialize)]
#[serde(untagged)]
enum RequestBody {
    Request(AnalysisRequest),
    Batch(Vec<Task>),
}

impl AnalysisRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(match serde_json::from_str::<RequestBody>(json) {
            Ok(RequestBody::Request(request)) => request,
            Ok(RequestBody::Batch(tasks)) => Self {
                tasks,
                analyse_type: None,
            },
            // Re-parse as a request so the error names the offending field.
            Err(_) => serde_json::from_str::<AnalysisRequest>(json)?,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        rlog_debug!("AnalysisRequest::load path={}", path.display());
        Self::from_json(&fs::read_to_string(path)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub status: String,
    pub data: Vec<Task>,
    pub recommendations: Vec<Task>,
    #[serde(rename = "cycleStatus")]
    pub cycle_status: String,
}

impl From<Analysis> for AnalysisResponse {
    fn from(analysis: Analysis) -> Self {
        let cycle_status = analysis.diagnostic().unwrap_or_default();
        let tasks = analysis.into_tasks();
        Self {
            status: "success".to_string(),
            data: tasks.clone(),
            recommendations: tasks,
            cycle_status,
        }
    }
}
