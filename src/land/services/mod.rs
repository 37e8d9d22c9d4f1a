//! Application services for land registration.

mod registration;

pub use registration::{
    LandRegistrationError, LandRegistrationResult, LandRegistrationService, RegisterLandRequest,
};
