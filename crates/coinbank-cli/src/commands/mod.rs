pub mod coins;
pub mod msg;
