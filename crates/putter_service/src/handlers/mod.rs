pub mod health;
pub mod putter_info;
