pub mod batch;
pub mod key;
pub mod name;
pub mod verify;
pub mod version;
