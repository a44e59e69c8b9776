mod registry;

pub use registry::{ExpertFilter, ExpertRegistry, RegistryError};
