pub mod registration;
pub mod submitter;

pub use registration::RegistrationService;
pub use submitter::{RegistrationSubmitter, SimulatedRegistrationSubmitter};
