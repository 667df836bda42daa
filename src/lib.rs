pub mod date;
pub mod shared;
