pub mod inventory;
pub mod outline;
pub mod segment;
pub mod status;
