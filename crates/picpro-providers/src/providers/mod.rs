//! Generation service implementations

pub mod google;

pub use google::GoogleImageProvider;
