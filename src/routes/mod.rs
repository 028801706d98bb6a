pub mod faculty;
pub mod grid;
pub mod landing;
pub mod messages;
