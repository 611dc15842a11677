//! Domain route groups (inquiries, students, media, testimonials, profile).

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{delete, get, post, put};
use axum::Router;
use std::sync::Arc;

/// Routes served without authentication: the marketing site surface.
pub fn public_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/inquiries", API_PREFIX),
            post(handlers::inquiries::submit_inquiry),
        )
        .route(
            &format!("{}/gallery/photos", API_PREFIX),
            get(handlers::gallery::list_photos),
        )
        .route(
            &format!("{}/gallery/videos", API_PREFIX),
            get(handlers::gallery::list_videos),
        )
        .route(
            &format!("{}/testimonials", API_PREFIX),
            get(handlers::testimonials::list_published),
        )
        .route(
            &format!("{}/profile", API_PREFIX),
            get(handlers::profile::get_profile),
        )
        .with_state(state)
}

/// Admin routes; wrapped in the API-key middleware by the caller.
pub fn admin_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .merge(inquiry_routes(state.clone()))
        .merge(student_routes(state.clone()))
        .merge(media_routes(state.clone()))
        .merge(testimonial_routes(state.clone()))
        .merge(profile_routes(state.clone()))
        .with_state(state)
}

fn inquiry_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/admin/inquiries", API_PREFIX),
            get(handlers::inquiries::list_inquiries),
        )
        .route(
            &format!("{}/admin/inquiries/{{id}}", API_PREFIX),
            get(handlers::inquiries::get_inquiry),
        )
        .route(
            &format!("{}/admin/inquiries/{{id}}/review", API_PREFIX),
            put(handlers::inquiries::set_review_stage),
        )
        .route(
            &format!("{}/admin/inquiries/{{id}}/status", API_PREFIX),
            put(handlers::inquiries::set_enrollment_status),
        )
        .route(
            &format!("{}/admin/inquiries/{{id}}", API_PREFIX),
            delete(handlers::inquiries::delete_inquiry),
        )
        .with_state(state)
}

fn student_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/admin/students", API_PREFIX),
            get(handlers::students::list_students),
        )
        .route(
            &format!("{}/admin/students", API_PREFIX),
            post(handlers::students::create_student),
        )
        .route(
            &format!("{}/admin/students/{{id}}", API_PREFIX),
            get(handlers::students::get_student),
        )
        .route(
            &format!("{}/admin/students/{{id}}", API_PREFIX),
            delete(handlers::students::delete_student),
        )
        .with_state(state)
}

fn media_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/admin/media", API_PREFIX),
            post(handlers::media_upload::upload_media),
        )
        .route(
            &format!("{}/admin/media", API_PREFIX),
            get(handlers::media::list_media),
        )
        .route(
            &format!("{}/admin/media/{{id}}", API_PREFIX),
            get(handlers::media::get_media),
        )
        .route(
            &format!("{}/admin/media/{{id}}/url", API_PREFIX),
            get(handlers::media::get_media_download_url),
        )
        .route(
            &format!("{}/admin/media/{{id}}", API_PREFIX),
            put(handlers::media::update_media),
        )
        .route(
            &format!("{}/admin/media/{{id}}", API_PREFIX),
            delete(handlers::media::delete_media),
        )
        .with_state(state)
}

fn testimonial_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/admin/testimonials", API_PREFIX),
            get(handlers::testimonials::list_testimonials),
        )
        .route(
            &format!("{}/admin/testimonials", API_PREFIX),
            post(handlers::testimonials::create_testimonial),
        )
        .route(
            &format!("{}/admin/testimonials/{{id}}", API_PREFIX),
            put(handlers::testimonials::update_testimonial),
        )
        .route(
            &format!("{}/admin/testimonials/{{id}}", API_PREFIX),
            delete(handlers::testimonials::delete_testimonial),
        )
        .with_state(state)
}

fn profile_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/admin/profile", API_PREFIX),
            put(handlers::profile::put_profile),
        )
        .with_state(state)
}
