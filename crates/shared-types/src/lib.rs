pub mod error;
pub mod models;

pub mod announcement;
pub mod archive;
pub mod calendar;
pub mod config;
pub mod listing;
pub mod navigation;
pub mod notification;

pub use error::*;
pub use models::*;

pub use announcement::*;
pub use archive::*;
pub use calendar::*;
pub use config::*;
pub use listing::*;
pub use navigation::*;
pub use notification::*;
