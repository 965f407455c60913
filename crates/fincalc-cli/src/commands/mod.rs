pub mod lending;
pub mod returns;
pub mod time_value;
