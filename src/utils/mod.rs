pub mod colors;
pub mod date;
pub mod formatting;
pub mod path;
pub mod table;
pub mod time;

pub use formatting::parse_amount;
pub use time::{end_from_hours, hours_between};
