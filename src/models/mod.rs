pub mod checkin;
pub mod habit;
pub mod summary;
pub mod target;
pub mod team;
