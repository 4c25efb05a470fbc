pub mod effect;
pub mod io;
pub mod pipeline;
pub mod shared;
