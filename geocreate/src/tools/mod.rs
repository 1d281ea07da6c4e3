pub mod create;
pub mod drivers;
pub mod info;
