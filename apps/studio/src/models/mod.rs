pub mod cv;
pub mod entries;
pub mod resume;
pub mod section;
pub mod server;
