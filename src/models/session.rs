use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::SessionType;

/// Upper bound of the risk scale. Levels run from 0 (no concern) to 10.
pub const MAX_RISK_LEVEL: u8 = 10;

/// One therapeutic encounter between an expert and a client.
///
/// A record is active while `end_time` is `None`. Closing a session sets
/// `end_time` and `session_summary` exactly once; after that the record
/// lives in the owning client's history and is never mutated again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: String,
    pub expert_id: String,
    pub client_id: String,
    pub session_type: SessionType,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub current_focus: String,
    #[serde(default)]
    pub progress_notes: Vec<String>,
    #[serde(default)]
    pub risk_level: u8,
    #[serde(default)]
    pub completed_steps: Vec<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
    #[serde(default)]
    pub homework_assigned: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_summary: Option<String>,
}

impl SessionRecord {
    pub fn new(
        expert_id: impl Into<String>,
        client_id: impl Into<String>,
        session_type: SessionType,
        initial_focus: impl Into<String>,
    ) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            expert_id: expert_id.into(),
            client_id: client_id.into(),
            session_type,
            start_time: Utc::now(),
            end_time: None,
            current_focus: initial_focus.into(),
            progress_notes: Vec::new(),
            risk_level: 0,
            completed_steps: Vec::new(),
            next_steps: Vec::new(),
            homework_assigned: Vec::new(),
            session_summary: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }
}

/// A batch of progress fields applied to an active session.
///
/// The note is always recorded. The optional fields are applied only when
/// present; empty strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct ProgressUpdate {
    pub note: String,
    pub risk_level: Option<u8>,
    pub completed_step: Option<String>,
    pub next_step: Option<String>,
    pub homework: Option<String>,
}

impl ProgressUpdate {
    pub fn note(note: impl Into<String>) -> Self {
        Self {
            note: note.into(),
            ..Self::default()
        }
    }

    pub fn with_risk_level(mut self, risk_level: u8) -> Self {
        self.risk_level = Some(risk_level);
        self
    }

    pub fn with_completed_step(mut self, step: impl Into<String>) -> Self {
        self.completed_step = Some(step.into());
        self
    }

    pub fn with_next_step(mut self, step: impl Into<String>) -> Self {
        self.next_step = Some(step.into());
        self
    }

    pub fn with_homework(mut self, homework: impl Into<String>) -> Self {
        self.homework = Some(homework.into());
        self
    }
}

/// Durable per-client record of closed sessions and longitudinal data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientHistory {
    pub client_id: String,
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
    #[serde(default)]
    pub treatment_goals: Vec<String>,
    #[serde(default)]
    pub risk_assessments: Vec<Value>,
    #[serde(default)]
    pub progress_metrics: HashMap<String, Vec<f64>>,
    #[serde(default)]
    pub emergency_contacts: Vec<Value>,
}

impl ClientHistory {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            sessions: Vec::new(),
            treatment_goals: Vec::new(),
            risk_assessments: Vec::new(),
            progress_metrics: HashMap::new(),
            emergency_contacts: Vec::new(),
        }
    }

    pub fn metric(&self, name: &str) -> Option<&[f64]> {
        self.progress_metrics.get(name).map(Vec::as_slice)
    }
}
