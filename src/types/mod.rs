pub mod fields;
pub mod gps;
pub mod record;

pub use fields::*;
pub use gps::*;
pub use record::*;
