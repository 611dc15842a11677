pub mod inquiry;
pub mod media;
pub mod profile;
pub mod student;
pub mod testimonial;

pub use inquiry::{
    ClassMode, EnrollmentStatus, Inquiry, InquiryBucket, LifecycleState, NewInquiry, ReviewStage,
};
pub use media::{MediaAsset, MediaAssetPublic, MediaKind, MediaUpdate, NewMediaAsset};
pub use profile::{AcademyProfile, ProfileUpdate};
pub use student::{NewStudent, Student};
pub use testimonial::{NewTestimonial, Testimonial, TestimonialStatus, TestimonialUpdate};
