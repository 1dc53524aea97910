// =====================================================================================
// REGISTRATION CELL - PATIENT INTAKE FORM
// =====================================================================================
//
// Field validators and formatters, the immutable patient record, the
// registration submitter seam and the form-state controller, exposed over
// HTTP under /registrations.
//
// =====================================================================================

pub mod controller;
pub mod error;
pub mod formatters;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod validators;

pub use controller::{FormEvent, FormState};
pub use error::{Field, RegistrationError, ValidationError};
pub use models::{BloodType, Gender, PatientRecord, RegistrationForm};
pub use router::{create_registration_router, registration_routes};
pub use services::{RegistrationService, RegistrationSubmitter, SimulatedRegistrationSubmitter};
