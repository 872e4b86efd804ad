pub mod demographics;
pub mod source;

pub use demographics::AuthorProfile;
pub use source::RatingSource;
