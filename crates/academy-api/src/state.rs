//! Application state and sub-state extractors.
//!
//! AppState is split into domain sub-states so handlers can extract only what
//! they need via Axum's `FromRef` instead of depending on one god object.

use academy_core::models::MediaKind;
use academy_core::{Config, UploadValidator};
use academy_db::{
    InquiryRepository, MediaRepository, ProfileRepository, StudentRepository,
    TestimonialRepository,
};
use academy_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

use crate::services::email::EmailService;

// ----- Sub-state types -----

/// Database pool and the inquiry/student repositories.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub inquiries: InquiryRepository,
    pub students: StudentRepository,
}

/// Media repository, storage backend, and per-kind upload limits.
#[derive(Clone)]
pub struct MediaState {
    pub repository: MediaRepository,
    pub storage: Arc<dyn Storage>,
    pub photo_limits: MediaLimits,
    pub video_limits: MediaLimits,
}

/// Limits and allowlists for a single media kind.
#[derive(Clone, Debug)]
pub struct MediaLimits {
    pub max_file_size: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
}

impl MediaLimits {
    pub fn validator(&self) -> UploadValidator {
        UploadValidator::new(
            self.max_file_size,
            self.allowed_extensions.clone(),
            self.allowed_content_types.clone(),
        )
    }
}

impl MediaState {
    /// Return size limits and allowlists for the given media kind.
    pub fn limits_for(&self, kind: MediaKind) -> &MediaLimits {
        match kind {
            MediaKind::Photo => &self.photo_limits,
            MediaKind::Video => &self.video_limits,
        }
    }
}

/// Testimonial and profile repositories for the public site content.
#[derive(Clone)]
pub struct ContentState {
    pub testimonials: TestimonialRepository,
    pub profile: ProfileRepository,
}

// ----- AppState -----

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub media: MediaState,
    pub content: ContentState,
    pub email: Option<EmailService>,
    pub config: Config,
    pub is_production: bool,
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for MediaState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.media.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for ContentState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.content.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
