pub mod logger;
pub mod week;
