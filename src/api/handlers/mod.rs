pub mod generation;
pub mod health;
pub mod session;
pub mod template;
