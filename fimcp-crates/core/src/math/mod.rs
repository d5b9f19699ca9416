mod limits;

pub use limits::*;
