use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Clinical areas an expert can be certified in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecializationArea {
    Anxiety,
    Depression,
    Trauma,
    Relationships,
    Addiction,
    PersonalityDisorders,
    EatingDisorders,
    ChildPsychology,
    CouplesTherapy,
    FamilyTherapy,
}

impl SpecializationArea {
    pub const ALL: [SpecializationArea; 10] = [
        SpecializationArea::Anxiety,
        SpecializationArea::Depression,
        SpecializationArea::Trauma,
        SpecializationArea::Relationships,
        SpecializationArea::Addiction,
        SpecializationArea::PersonalityDisorders,
        SpecializationArea::EatingDisorders,
        SpecializationArea::ChildPsychology,
        SpecializationArea::CouplesTherapy,
        SpecializationArea::FamilyTherapy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecializationArea::Anxiety => "anxiety",
            SpecializationArea::Depression => "depression",
            SpecializationArea::Trauma => "trauma",
            SpecializationArea::Relationships => "relationships",
            SpecializationArea::Addiction => "addiction",
            SpecializationArea::PersonalityDisorders => "personality_disorders",
            SpecializationArea::EatingDisorders => "eating_disorders",
            SpecializationArea::ChildPsychology => "child_psychology",
            SpecializationArea::CouplesTherapy => "couples_therapy",
            SpecializationArea::FamilyTherapy => "family_therapy",
        }
    }
}

impl std::fmt::Display for SpecializationArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SpecializationArea {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|area| area.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown specialization: {}", s))
    }
}

/// Therapeutic modalities an expert practices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TherapeuticApproach {
    CognitiveBehavioral,
    Psychodynamic,
    Humanistic,
    Gestalt,
    DialecticalBehavioral,
    Mindfulness,
    Integrative,
}

impl TherapeuticApproach {
    pub const ALL: [TherapeuticApproach; 7] = [
        TherapeuticApproach::CognitiveBehavioral,
        TherapeuticApproach::Psychodynamic,
        TherapeuticApproach::Humanistic,
        TherapeuticApproach::Gestalt,
        TherapeuticApproach::DialecticalBehavioral,
        TherapeuticApproach::Mindfulness,
        TherapeuticApproach::Integrative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TherapeuticApproach::CognitiveBehavioral => "cognitive_behavioral",
            TherapeuticApproach::Psychodynamic => "psychodynamic",
            TherapeuticApproach::Humanistic => "humanistic",
            TherapeuticApproach::Gestalt => "gestalt",
            TherapeuticApproach::DialecticalBehavioral => "dialectical_behavioral",
            TherapeuticApproach::Mindfulness => "mindfulness",
            TherapeuticApproach::Integrative => "integrative",
        }
    }
}

impl std::fmt::Display for TherapeuticApproach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TherapeuticApproach {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|approach| approach.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown therapeutic approach: {}", s))
    }
}

/// Kinds of therapeutic encounters an expert can conduct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    InitialAssessment,
    RegularSession,
    CrisisIntervention,
    ProgressEvaluation,
    Termination,
}

impl SessionType {
    pub const ALL: [SessionType; 5] = [
        SessionType::InitialAssessment,
        SessionType::RegularSession,
        SessionType::CrisisIntervention,
        SessionType::ProgressEvaluation,
        SessionType::Termination,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::InitialAssessment => "initial_assessment",
            SessionType::RegularSession => "regular_session",
            SessionType::CrisisIntervention => "crisis_intervention",
            SessionType::ProgressEvaluation => "progress_evaluation",
            SessionType::Termination => "termination",
        }
    }
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|kind| kind.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown session type: {}", s))
    }
}

/// A configured expert persona loaded from the catalogue.
///
/// Experts are immutable once loaded. Qualification for a session type is
/// determined solely by the presence of that type in `session_protocols`;
/// the protocol payload itself is opaque to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expert {
    pub id: String,
    pub name: String,
    pub specializations: Vec<SpecializationArea>,
    pub therapeutic_approaches: Vec<TherapeuticApproach>,
    #[serde(default)]
    pub communication_style: String,
    #[serde(default)]
    pub ethical_guidelines: String,
    #[serde(default)]
    pub session_protocols: HashMap<SessionType, Value>,
}

impl Expert {
    pub fn has_specialization(&self, specialization: SpecializationArea) -> bool {
        self.specializations.contains(&specialization)
    }

    pub fn uses_approach(&self, approach: TherapeuticApproach) -> bool {
        self.therapeutic_approaches.contains(&approach)
    }

    /// An expert is qualified for a session type iff a protocol is
    /// configured for it.
    pub fn can_handle(&self, session_type: SessionType) -> bool {
        self.session_protocols.contains_key(&session_type)
    }

    pub fn session_protocol(&self, session_type: SessionType) -> Option<&Value> {
        self.session_protocols.get(&session_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_expert() -> Expert {
        Expert {
            id: "dr-chen".to_string(),
            name: "Dr. Chen".to_string(),
            specializations: vec![SpecializationArea::Anxiety, SpecializationArea::Trauma],
            therapeutic_approaches: vec![TherapeuticApproach::CognitiveBehavioral],
            communication_style: "warm, direct".to_string(),
            ethical_guidelines: "confidentiality first".to_string(),
            session_protocols: HashMap::from([(
                SessionType::InitialAssessment,
                json!({"phases": ["rapport", "history", "goals"]}),
            )]),
        }
    }

    #[test]
    fn specialization_round_trips_through_from_str() {
        for area in SpecializationArea::ALL {
            assert_eq!(area.as_str().parse::<SpecializationArea>(), Ok(area));
        }
    }

    #[test]
    fn approach_round_trips_through_from_str() {
        for approach in TherapeuticApproach::ALL {
            assert_eq!(approach.as_str().parse::<TherapeuticApproach>(), Ok(approach));
        }
    }

    #[test]
    fn session_type_round_trips_through_from_str() {
        for kind in SessionType::ALL {
            assert_eq!(kind.as_str().parse::<SessionType>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_tags_are_rejected() {
        assert!("hypnosis".parse::<SpecializationArea>().is_err());
        assert!("hypnosis".parse::<TherapeuticApproach>().is_err());
        assert!("hypnosis".parse::<SessionType>().is_err());
    }

    #[test]
    fn serde_uses_snake_case_tags() {
        let yaml = serde_yaml::to_string(&SpecializationArea::PersonalityDisorders).unwrap();
        assert_eq!(yaml.trim(), "personality_disorders");

        let parsed: SessionType = serde_yaml::from_str("crisis_intervention").unwrap();
        assert_eq!(parsed, SessionType::CrisisIntervention);
    }

    #[test]
    fn expert_specialization_membership() {
        let expert = sample_expert();
        assert!(expert.has_specialization(SpecializationArea::Anxiety));
        assert!(expert.has_specialization(SpecializationArea::Trauma));
        assert!(!expert.has_specialization(SpecializationArea::Addiction));
    }

    #[test]
    fn expert_approach_membership() {
        let expert = sample_expert();
        assert!(expert.uses_approach(TherapeuticApproach::CognitiveBehavioral));
        assert!(!expert.uses_approach(TherapeuticApproach::Gestalt));
    }

    #[test]
    fn expert_qualification_follows_protocol_keys() {
        let expert = sample_expert();
        assert!(expert.can_handle(SessionType::InitialAssessment));
        assert!(!expert.can_handle(SessionType::CrisisIntervention));
    }

    #[test]
    fn session_protocol_returns_configured_payload() {
        let expert = sample_expert();
        let protocol = expert
            .session_protocol(SessionType::InitialAssessment)
            .unwrap();
        assert_eq!(protocol["phases"][0], "rapport");
        assert!(expert.session_protocol(SessionType::Termination).is_none());
    }

    #[test]
    fn expert_deserializes_from_yaml() {
        let yaml = r#"
id: dr-okafor
name: "Dr. Okafor"
specializations:
  - depression
  - addiction
therapeutic_approaches:
  - psychodynamic
  - mindfulness
communication_style: "reflective"
ethical_guidelines: "do no harm"
session_protocols:
  regular_session:
    check_in: true
"#;
        let expert: Expert = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(expert.id, "dr-okafor");
        assert_eq!(expert.specializations.len(), 2);
        assert!(expert.can_handle(SessionType::RegularSession));
        assert!(!expert.can_handle(SessionType::InitialAssessment));
    }

    #[test]
    fn expert_missing_optional_fields_defaults_empty() {
        let yaml = r#"
id: minimal
name: "Minimal"
specializations: []
therapeutic_approaches: []
"#;
        let expert: Expert = serde_yaml::from_str(yaml).unwrap();
        assert!(expert.communication_style.is_empty());
        assert!(expert.session_protocols.is_empty());
    }
}
