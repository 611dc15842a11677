pub mod gallery;
pub mod inquiries;
pub mod media;
pub mod media_upload;
pub mod profile;
pub mod students;
pub mod testimonials;
