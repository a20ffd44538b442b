pub mod bench;
pub mod codec;
pub mod verify;
