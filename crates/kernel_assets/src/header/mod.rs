pub mod date;
pub mod format;
pub mod naming;
