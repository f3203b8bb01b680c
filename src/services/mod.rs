pub mod auth;
pub mod checkout;
pub mod reconciler;
pub mod sweeper;
