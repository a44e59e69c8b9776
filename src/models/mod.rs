mod expert;
mod session;

pub use expert::{Expert, SessionType, SpecializationArea, TherapeuticApproach};
pub use session::{ClientHistory, ProgressUpdate, SessionRecord, MAX_RISK_LEVEL};
