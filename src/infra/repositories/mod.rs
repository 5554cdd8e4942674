pub mod sqlite_session_repo;
pub mod sqlite_template_repo;
