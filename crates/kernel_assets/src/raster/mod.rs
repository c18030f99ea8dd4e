pub mod loader;
pub mod pixel;
