pub mod checkin_service;
pub mod session_service;
pub mod summary_service;
pub mod target_service;
pub mod team_service;
