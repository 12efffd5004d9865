pub mod request;
pub mod stage;
pub mod strategy;

pub use request::*;
pub use stage::*;
pub use strategy::*;
