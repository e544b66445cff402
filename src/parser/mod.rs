pub mod decoder;
pub mod main;
pub mod payload;
pub mod stream;

pub use decoder::*;
pub use main::*;
pub use payload::*;
pub use stream::*;
