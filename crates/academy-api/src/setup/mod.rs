//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::services::email::EmailService;
use crate::state::{AppState, ContentState, DbState, MediaLimits, MediaState};
use academy_core::Config;
use academy_db::{
    InquiryRepository, MediaRepository, ProfileRepository, StudentRepository,
    TestimonialRepository,
};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let email = EmailService::from_config(&config);
    if email.is_none() {
        tracing::info!("Inquiry email notifications are disabled");
    }

    let state = Arc::new(AppState {
        db: DbState {
            pool: pool.clone(),
            inquiries: InquiryRepository::new(pool.clone()),
            students: StudentRepository::new(pool.clone()),
        },
        media: MediaState {
            repository: MediaRepository::new(pool.clone()),
            storage,
            photo_limits: MediaLimits {
                max_file_size: config.max_photo_size_bytes(),
                allowed_extensions: config.photo_allowed_extensions().to_vec(),
                allowed_content_types: config.photo_allowed_content_types().to_vec(),
            },
            video_limits: MediaLimits {
                max_file_size: config.max_video_size_bytes(),
                allowed_extensions: config.video_allowed_extensions().to_vec(),
                allowed_content_types: config.video_allowed_content_types().to_vec(),
            },
        },
        content: ContentState {
            testimonials: TestimonialRepository::new(pool.clone()),
            profile: ProfileRepository::new(pool),
        },
        email,
        is_production: config.is_production(),
        config,
    });

    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}
