//! Enrollment promotion tests against a real Postgres schema.
//!
//! These run with `#[sqlx::test]`, which provisions an isolated database per
//! test from `DATABASE_URL` and applies the workspace migrations.

use academy_core::models::{ClassMode, EnrollmentStatus, NewInquiry, ReviewStage};
use academy_core::AppError;
use academy_db::{EnrollmentOutcome, InquiryRepository, StudentRepository};
use sqlx::PgPool;

fn inquiry_payload(name: &str, email: &str) -> NewInquiry {
    NewInquiry {
        full_name: name.to_string(),
        email: email.to_string(),
        phone: "+91 98765 43210".to_string(),
        course: "Kathak".to_string(),
        class_mode: ClassMode::Offline,
        message: Some("Weekend batches?".to_string()),
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn promotion_moves_inquiry_into_students(pool: PgPool) {
    let inquiries = InquiryRepository::new(pool.clone());
    let students = StudentRepository::new(pool.clone());

    let inquiry = inquiries
        .create(&inquiry_payload("Meera Iyer", "meera@example.com"))
        .await
        .unwrap();
    inquiries
        .set_review_stage(inquiry.id, ReviewStage::Completed)
        .await
        .unwrap();

    let outcome = inquiries
        .set_enrollment_status(inquiry.id, EnrollmentStatus::Enrolled)
        .await
        .unwrap();

    let student = match outcome {
        EnrollmentOutcome::Promoted(student) => student,
        other => panic!("expected promotion, got {:?}", other),
    };
    assert_eq!(student.inquiry_id, Some(inquiry.id));
    assert_eq!(student.full_name, "Meera Iyer");

    // The inquiry row is gone; the student row is the only record left.
    assert!(inquiries.get_by_id(inquiry.id).await.unwrap().is_none());
    assert!(students.get_by_id(student.id).await.unwrap().is_some());

    let promoted_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE inquiry_id = $1")
            .bind(inquiry.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(promoted_count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn recorded_decision_cannot_be_changed(pool: PgPool) {
    let inquiries = InquiryRepository::new(pool.clone());

    let inquiry = inquiries
        .create(&inquiry_payload("Arjun Rao", "arjun@example.com"))
        .await
        .unwrap();
    inquiries
        .set_review_stage(inquiry.id, ReviewStage::Completed)
        .await
        .unwrap();
    inquiries
        .set_enrollment_status(inquiry.id, EnrollmentStatus::NotEnrolled)
        .await
        .unwrap();

    let err = inquiries
        .set_enrollment_status(inquiry.id, EnrollmentStatus::Enrolled)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)), "{:?}", err);
}

#[sqlx::test(migrations = "../../migrations")]
async fn concurrent_decisions_promote_exactly_once(pool: PgPool) {
    let inquiries = InquiryRepository::new(pool.clone());

    let inquiry = inquiries
        .create(&inquiry_payload("Lakshmi Menon", "lakshmi@example.com"))
        .await
        .unwrap();
    inquiries
        .set_review_stage(inquiry.id, ReviewStage::Completed)
        .await
        .unwrap();

    // Two admin sessions race on the same decision. The row lock serializes
    // them; the loser finds the inquiry already promoted away.
    let (first, second) = tokio::join!(
        inquiries.set_enrollment_status(inquiry.id, EnrollmentStatus::Enrolled),
        inquiries.set_enrollment_status(inquiry.id, EnrollmentStatus::Enrolled),
    );

    let results = [first, second];
    let promotions = results
        .iter()
        .filter(|r| matches!(r, Ok(EnrollmentOutcome::Promoted(_))))
        .count();
    let rejections = results
        .iter()
        .filter(|r| matches!(r, Err(AppError::NotFound(_))))
        .count();
    assert_eq!(promotions, 1, "exactly one session may promote");
    assert_eq!(rejections, 1, "the losing session must be told the row is gone");

    let student_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE inquiry_id = $1")
            .bind(inquiry.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(student_count, 1);
}
