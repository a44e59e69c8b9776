use std::collections::HashMap;

use chrono::Utc;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{ClientHistory, ProgressUpdate, SessionRecord, SessionType, MAX_RISK_LEVEL};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("No history for client: {0}")]
    ClientNotFound(String),

    #[error("Risk level {0} outside allowed range 0-{MAX_RISK_LEVEL}")]
    RiskLevelOutOfRange(u8),
}

/// The stateful core: active sessions keyed by session id, and durable
/// per-client histories keyed by client id.
///
/// Sessions move one way, active to closed. Closing a session is the
/// durability boundary: the record leaves the active table and is
/// appended to the owning client's history, where it is never mutated
/// again. Histories are created lazily on first write and live for the
/// rest of the process.
///
/// The store does not re-check expert qualification; callers are
/// expected to consult [`ExpertRegistry::can_start`] before starting a
/// session. It also does not serialize concurrent access; the hosting
/// runtime owns that.
///
/// [`ExpertRegistry::can_start`]: crate::experts::ExpertRegistry::can_start
#[derive(Debug, Default)]
pub struct SessionStore {
    active: HashMap<String, SessionRecord>,
    histories: HashMap<String, ClientHistory>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session and place it in the active table.
    ///
    /// The record starts with a fresh id, risk level 0, and empty
    /// note/step/homework sequences. Expert existence is not checked
    /// here; that is the registry-consulting caller's job.
    pub fn start_session(
        &mut self,
        expert_id: impl Into<String>,
        client_id: impl Into<String>,
        session_type: SessionType,
        initial_focus: impl Into<String>,
    ) -> SessionRecord {
        let session = SessionRecord::new(expert_id, client_id, session_type, initial_focus);
        info!(
            session_id = %session.session_id,
            expert_id = %session.expert_id,
            client_id = %session.client_id,
            session_type = %session.session_type,
            "session started"
        );
        self.active
            .insert(session.session_id.clone(), session.clone());
        session
    }

    /// Apply a progress update to an active session.
    ///
    /// An out-of-range risk level rejects the whole update before any
    /// field is touched. Otherwise the note is always appended, a
    /// supplied risk level overwrites the current one (it is a current
    /// value, not a history), and non-empty step/homework strings are
    /// appended to their sequences.
    pub fn update_progress(
        &mut self,
        session_id: &str,
        update: ProgressUpdate,
    ) -> Result<SessionRecord, SessionError> {
        let session = self
            .active
            .get_mut(session_id)
            .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))?;

        if let Some(risk_level) = update.risk_level {
            if risk_level > MAX_RISK_LEVEL {
                return Err(SessionError::RiskLevelOutOfRange(risk_level));
            }
        }

        session.progress_notes.push(update.note);
        if let Some(risk_level) = update.risk_level {
            session.risk_level = risk_level;
        }
        if let Some(step) = update.completed_step.filter(|s| !s.is_empty()) {
            session.completed_steps.push(step);
        }
        if let Some(step) = update.next_step.filter(|s| !s.is_empty()) {
            session.next_steps.push(step);
        }
        if let Some(homework) = update.homework.filter(|s| !s.is_empty()) {
            session.homework_assigned.push(homework);
        }

        debug!(session_id = %session.session_id, risk_level = session.risk_level, "session progress updated");
        Ok(session.clone())
    }

    /// Close an active session and move it into the client's history.
    ///
    /// The end timestamp and summary are set exactly once. The session
    /// leaves the active table, so a second call with the same id fails
    /// with `SessionNotFound`.
    pub fn end_session(
        &mut self,
        session_id: &str,
        summary: impl Into<String>,
    ) -> Result<SessionRecord, SessionError> {
        let mut session = self
            .active
            .remove(session_id)
            .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))?;

        session.end_time = Some(Utc::now());
        session.session_summary = Some(summary.into());

        info!(
            session_id = %session.session_id,
            client_id = %session.client_id,
            "session closed"
        );

        let client_id = session.client_id.clone();
        self.history_mut(&client_id).sessions.push(session.clone());
        Ok(session)
    }

    /// A client's history, if any mutating operation has touched that
    /// client. Reads do not auto-create.
    pub fn client_history(&self, client_id: &str) -> Result<&ClientHistory, SessionError> {
        self.histories
            .get(client_id)
            .ok_or_else(|| SessionError::ClientNotFound(client_id.to_string()))
    }

    /// Replace the client's treatment goals wholesale.
    pub fn update_treatment_goals(
        &mut self,
        client_id: &str,
        goals: Vec<String>,
    ) -> &ClientHistory {
        let history = self.history_mut(client_id);
        history.treatment_goals = goals;
        history
    }

    /// Append a risk-assessment payload to the client's history.
    pub fn add_risk_assessment(&mut self, client_id: &str, assessment: Value) -> &ClientHistory {
        let history = self.history_mut(client_id);
        history.risk_assessments.push(assessment);
        history
    }

    /// Append a value to the named progress metric, creating the metric
    /// row on first use.
    pub fn update_progress_metric(
        &mut self,
        client_id: &str,
        metric_name: &str,
        value: f64,
    ) -> &ClientHistory {
        let history = self.history_mut(client_id);
        history
            .progress_metrics
            .entry(metric_name.to_string())
            .or_default()
            .push(value);
        history
    }

    /// Append an emergency-contact payload to the client's history.
    pub fn add_emergency_contact(&mut self, client_id: &str, contact: Value) -> &ClientHistory {
        let history = self.history_mut(client_id);
        history.emergency_contacts.push(contact);
        history
    }

    /// All currently active sessions, as a defensive copy.
    pub fn active_sessions(&self) -> Vec<SessionRecord> {
        self.active.values().cloned().collect()
    }

    /// An active session by id. Closed sessions are not searched; they
    /// are reachable only through the owning client's history.
    pub fn session(&self, session_id: &str) -> Result<&SessionRecord, SessionError> {
        self.active
            .get(session_id)
            .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    fn history_mut(&mut self, client_id: &str) -> &mut ClientHistory {
        self.histories
            .entry(client_id.to_string())
            .or_insert_with(|| ClientHistory::new(client_id))
    }
}
