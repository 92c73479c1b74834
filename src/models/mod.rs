pub mod catalog;
pub mod codec;
pub mod colour;
pub mod control_device;
pub mod destination;
