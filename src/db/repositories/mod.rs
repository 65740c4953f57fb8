pub mod checkin_repository;
pub mod target_repository;
pub mod team_repository;
