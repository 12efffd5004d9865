pub mod fan_out;
pub mod normalize;
pub mod stage;
pub mod synthesis;

pub use fan_out::*;
pub use normalize::*;
pub use stage::*;
pub use synthesis::*;
