use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::models::{Expert, SessionType, SpecializationArea, TherapeuticApproach};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Expert catalogue not found: {0:?}")]
    CatalogueMissing(PathBuf),

    #[error("Failed to read expert catalogue {path:?}: {source}")]
    CatalogueUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse expert catalogue {path:?}: {source}")]
    CatalogueMalformed {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Expert {expert_id}: unknown {field} tag: {value}")]
    UnknownTag {
        expert_id: String,
        field: &'static str,
        value: String,
    },

    #[error("Duplicate expert id in catalogue: {0}")]
    DuplicateExpert(String),

    #[error("Expert not found: {0}")]
    ExpertNotFound(String),
}

/// Optional predicates combined with AND semantics by [`ExpertRegistry::filter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpertFilter {
    pub specialization: Option<SpecializationArea>,
    pub approach: Option<TherapeuticApproach>,
    pub session_type: Option<SessionType>,
}

impl ExpertFilter {
    pub fn with_specialization(mut self, specialization: SpecializationArea) -> Self {
        self.specialization = Some(specialization);
        self
    }

    pub fn with_approach(mut self, approach: TherapeuticApproach) -> Self {
        self.approach = Some(approach);
        self
    }

    pub fn with_session_type(mut self, session_type: SessionType) -> Self {
        self.session_type = Some(session_type);
        self
    }

    fn matches(&self, expert: &Expert) -> bool {
        self.specialization
            .map_or(true, |s| expert.has_specialization(s))
            && self.approach.map_or(true, |a| expert.uses_approach(a))
            && self.session_type.map_or(true, |t| expert.can_handle(t))
    }
}

/// Raw catalogue record before tag validation. Tags stay strings here so
/// that an unknown value can be reported with its expert id and field
/// instead of as an opaque deserialization error.
#[derive(Debug, Deserialize)]
struct RawExpert {
    id: String,
    name: String,
    #[serde(default)]
    specializations: Vec<String>,
    #[serde(default)]
    therapeutic_approaches: Vec<String>,
    #[serde(default)]
    communication_style: String,
    #[serde(default)]
    ethical_guidelines: String,
    #[serde(default)]
    session_protocols: HashMap<String, Value>,
}

/// Read-only catalogue of expert personas.
///
/// The registry is built once at startup from a YAML catalogue and never
/// mutated afterwards. All queries are pure; load-time validation is the
/// only failure boundary.
#[derive(Debug, Clone)]
pub struct ExpertRegistry {
    /// Experts in catalogue order.
    experts: Vec<Expert>,

    /// Fast lookup from expert id to position in `experts`.
    id_index: HashMap<String, usize>,
}

impl ExpertRegistry {
    /// Load the catalogue from a YAML file.
    ///
    /// Fails if the file is missing or unparseable, if any record carries
    /// a tag outside the closed enumerations, or if two records share an
    /// id. A load failure is fatal to startup; there is no degraded mode.
    pub async fn load(path: &Path) -> Result<Self, RegistryError> {
        if !path.exists() {
            return Err(RegistryError::CatalogueMissing(path.to_path_buf()));
        }

        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| RegistryError::CatalogueUnreadable {
                    path: path.to_path_buf(),
                    source,
                })?;

        let raw: Vec<RawExpert> = serde_yaml::from_str(&content).map_err(|source| {
            RegistryError::CatalogueMalformed {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let experts = raw
            .into_iter()
            .map(validate_expert)
            .collect::<Result<Vec<_>, _>>()?;

        let registry = Self::from_experts(experts)?;
        info!(count = registry.len(), path = %path.display(), "loaded expert catalogue");
        Ok(registry)
    }

    /// Build a registry from already-validated experts. Rejects duplicate ids.
    pub fn from_experts(experts: Vec<Expert>) -> Result<Self, RegistryError> {
        let mut id_index = HashMap::with_capacity(experts.len());
        for (idx, expert) in experts.iter().enumerate() {
            if id_index.insert(expert.id.clone(), idx).is_some() {
                return Err(RegistryError::DuplicateExpert(expert.id.clone()));
            }
        }
        Ok(Self { experts, id_index })
    }

    /// All experts in catalogue order, as a defensive copy.
    pub fn all(&self) -> Vec<Expert> {
        self.experts.clone()
    }

    pub fn get(&self, expert_id: &str) -> Result<&Expert, RegistryError> {
        self.id_index
            .get(expert_id)
            .map(|&idx| &self.experts[idx])
            .ok_or_else(|| RegistryError::ExpertNotFound(expert_id.to_string()))
    }

    /// Experts satisfying every supplied predicate, in catalogue order.
    /// An empty filter returns the whole catalogue.
    pub fn filter(&self, filter: &ExpertFilter) -> Vec<Expert> {
        self.experts
            .iter()
            .filter(|expert| filter.matches(expert))
            .cloned()
            .collect()
    }

    /// Whether a session of the given type can be started with this
    /// expert. The single qualification query callers check before
    /// handing the pair to the session store.
    pub fn can_start(
        &self,
        expert_id: &str,
        session_type: SessionType,
    ) -> Result<bool, RegistryError> {
        Ok(self.get(expert_id)?.can_handle(session_type))
    }

    pub fn len(&self) -> usize {
        self.experts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experts.is_empty()
    }
}

fn validate_expert(raw: RawExpert) -> Result<Expert, RegistryError> {
    let specializations = raw
        .specializations
        .iter()
        .map(|tag| {
            tag.parse::<SpecializationArea>()
                .map_err(|_| RegistryError::UnknownTag {
                    expert_id: raw.id.clone(),
                    field: "specialization",
                    value: tag.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let therapeutic_approaches = raw
        .therapeutic_approaches
        .iter()
        .map(|tag| {
            tag.parse::<TherapeuticApproach>()
                .map_err(|_| RegistryError::UnknownTag {
                    expert_id: raw.id.clone(),
                    field: "therapeutic_approach",
                    value: tag.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let session_protocols = raw
        .session_protocols
        .into_iter()
        .map(|(tag, protocol)| {
            tag.parse::<SessionType>()
                .map(|kind| (kind, protocol))
                .map_err(|_| RegistryError::UnknownTag {
                    expert_id: raw.id.clone(),
                    field: "session_type",
                    value: tag,
                })
        })
        .collect::<Result<HashMap<_, _>, _>>()?;

    Ok(Expert {
        id: raw.id,
        name: raw.name,
        specializations,
        therapeutic_approaches,
        communication_style: raw.communication_style,
        ethical_guidelines: raw.ethical_guidelines,
        session_protocols,
    })
}
