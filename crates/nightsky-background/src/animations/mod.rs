pub mod meteors;
pub mod particles;
pub mod stars;
