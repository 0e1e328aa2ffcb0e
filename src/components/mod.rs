pub mod art;
pub mod buttons;
pub mod help;
pub mod pixels;
pub mod scenery;
