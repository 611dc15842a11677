//! OpenAPI documentation.
//! API version is in `crate::constants::API_VERSION`.
//! Paths in handler annotations use placeholder /api/v0; they are transformed at runtime to the actual version.

use utoipa::OpenApi;

use crate::constants::API_VERSION;
use crate::error;
use crate::handlers;
use academy_core::models;

/// Placeholder version used in handler path annotations (utoipa requires compile-time literals).
/// Replaced at runtime in the served OpenAPI spec with API_VERSION.
const OPENAPI_PATH_PLACEHOLDER: &str = "/api/v0";

/// Transforms path keys in the OpenAPI spec from placeholder to actual API version.
fn transform_openapi_paths(spec: &mut utoipa::openapi::OpenApi, version: &str) {
    let replacement = format!("/api/{}", version);
    if OPENAPI_PATH_PLACEHOLDER == replacement {
        return;
    }
    let path_map = std::mem::take(&mut spec.paths.paths);
    for (key, item) in path_map {
        let new_key = key.replacen(OPENAPI_PATH_PLACEHOLDER, &replacement, 1);
        spec.paths.paths.insert(new_key, item);
    }
}

/// Returns the OpenAPI spec with path placeholders replaced by the current API version.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    let mut spec = ApiDoc::openapi();
    transform_openapi_paths(&mut spec, API_VERSION);
    spec
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dance Academy API",
        version = "0.1.0",
        description = "Backend for the academy marketing site and admin console: student inquiries with a review workflow, gallery media, testimonials, and the academy profile. All endpoints are versioned under /api/v0/; /admin routes require a Bearer API key."
    ),
    paths(
        // Inquiries
        handlers::inquiries::submit_inquiry,
        handlers::inquiries::list_inquiries,
        handlers::inquiries::get_inquiry,
        handlers::inquiries::set_review_stage,
        handlers::inquiries::set_enrollment_status,
        handlers::inquiries::delete_inquiry,
        // Students
        handlers::students::list_students,
        handlers::students::create_student,
        handlers::students::get_student,
        handlers::students::delete_student,
        // Media
        handlers::media_upload::upload_media,
        handlers::media::list_media,
        handlers::media::get_media,
        handlers::media::get_media_download_url,
        handlers::media::update_media,
        handlers::media::delete_media,
        // Gallery (public)
        handlers::gallery::list_photos,
        handlers::gallery::list_videos,
        // Testimonials
        handlers::testimonials::list_published,
        handlers::testimonials::list_testimonials,
        handlers::testimonials::create_testimonial,
        handlers::testimonials::update_testimonial,
        handlers::testimonials::delete_testimonial,
        // Profile
        handlers::profile::get_profile,
        handlers::profile::put_profile,
    ),
    components(
        schemas(
            models::Inquiry,
            models::NewInquiry,
            models::inquiry::ReviewStage,
            models::inquiry::EnrollmentStatus,
            models::inquiry::ClassMode,
            models::inquiry::InquiryBucket,
            models::Student,
            models::NewStudent,
            models::MediaAsset,
            models::MediaAssetPublic,
            models::MediaKind,
            models::MediaUpdate,
            models::Testimonial,
            models::NewTestimonial,
            models::TestimonialUpdate,
            models::testimonial::TestimonialStatus,
            models::AcademyProfile,
            models::ProfileUpdate,
            handlers::inquiries::InquiryView,
            handlers::inquiries::ReviewStageUpdate,
            handlers::inquiries::EnrollmentStatusUpdate,
            handlers::inquiries::EnrollmentDecisionResponse,
            handlers::media::MediaDownloadUrl,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "inquiries", description = "Student inquiries and the review workflow"),
        (name = "students", description = "Enrolled students"),
        (name = "media", description = "Gallery media administration"),
        (name = "gallery", description = "Public gallery"),
        (name = "testimonials", description = "Testimonials"),
        (name = "profile", description = "Academy profile")
    )
)]
pub struct ApiDoc;
