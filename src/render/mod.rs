pub mod map;
pub mod template;
