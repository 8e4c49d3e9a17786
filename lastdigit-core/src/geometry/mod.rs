pub mod distance;
pub mod layout;
pub mod r2;
