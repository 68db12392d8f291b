//! Two-phase registration: initiate (emailed token) and complete (account).

pub mod actions;
pub mod models;

pub use actions::{complete_registration, initiate_registration};
pub use models::{
    hash_password, CompleteRegistrationRequest, InitiateRegistrationRequest,
    InitiateRegistrationResponse,
};
