pub mod mortgage;
pub mod projection;
pub mod property;
