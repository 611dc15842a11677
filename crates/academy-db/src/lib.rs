//! Academy DB Library
//!
//! Postgres repositories for inquiries, students, media assets, testimonials,
//! and the academy profile. Lifecycle rules live in `academy-core`; repositories
//! enforce them inside transactions before mutating rows.

pub mod inquiry;
pub mod media;
pub mod profile;
pub mod student;
pub mod testimonial;

pub use inquiry::{EnrollmentOutcome, InquiryRepository};
pub use media::MediaRepository;
pub use profile::ProfileRepository;
pub use student::StudentRepository;
pub use testimonial::TestimonialRepository;
