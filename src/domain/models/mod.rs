pub mod session;
pub mod template;
