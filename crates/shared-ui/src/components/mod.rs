// Standalone components
pub mod badge;
pub mod button;
pub mod card;
pub mod data_table;
pub mod feedback;
pub mod input;
pub mod page_header;
pub mod pagination;
pub mod search_bar;
pub mod skeleton;
pub mod tabs;

// Primitive wrappers
pub mod toast;

pub use badge::*;
pub use button::*;
pub use card::*;
pub use data_table::*;
pub use feedback::*;
pub use input::*;
pub use page_header::*;
pub use pagination::*;
pub use search_bar::*;
pub use skeleton::*;
pub use tabs::*;
pub use toast::*;
