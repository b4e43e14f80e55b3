pub mod profile;
pub mod replay;
pub mod template;
