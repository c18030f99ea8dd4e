pub mod font;
pub mod icon;
