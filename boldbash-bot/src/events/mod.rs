pub mod members;
pub mod messages;
