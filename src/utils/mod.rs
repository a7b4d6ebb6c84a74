pub mod date;
pub mod time;

pub use time::format_minutes;
