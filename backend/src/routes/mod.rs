pub mod annotations;
pub mod landing;
pub mod metrics;
pub mod trends;
