pub mod analysis_client;
pub mod health;
pub mod intake_session;
pub mod report_renderer;
pub mod session_registry;
