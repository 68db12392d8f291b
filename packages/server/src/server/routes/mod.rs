pub mod health;
pub mod login;
pub mod registration;

pub use health::health_handler;
pub use login::login_handler;
pub use registration::{complete_registration_handler, initiate_registration_handler};
