pub mod auth;
pub mod campaign;
pub mod mailer;
pub mod refer;
