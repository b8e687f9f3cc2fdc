//! Shared fixtures for unit tests.

use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::domain::{
    BroadcastReport, CreateUserDto, NewReport, Quality, User, UserRepositoryInterface, UserRole,
};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::repositories::UserRepository;

pub const TEST_PASSWORD: &str = "rahasia123";

/// Fresh in-memory database with all migrations applied.
pub async fn test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub fn create_dto(username: &str, email: &str, role: UserRole) -> CreateUserDto {
    CreateUserDto {
        name: format!("{} TVRI", username),
        username: username.to_string(),
        email: email.to_string(),
        // Low cost keeps the test suite fast.
        password_hash: bcrypt::hash(TEST_PASSWORD, 4).unwrap(),
        role,
        nip: None,
        position: None,
    }
}

/// Account + profile with email `<username>@tvri.local`.
pub async fn seed_user(db: &DatabaseConnection, username: &str, role: UserRole) -> User {
    UserRepository::new(db.clone())
        .create_user(create_dto(username, &format!("{}@tvri.local", username), role))
        .await
        .unwrap()
}

pub fn new_report(date: &str, program: &str) -> NewReport {
    NewReport {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        program: program.to_string(),
        video_quality: Quality::Baik,
        audio_quality: Quality::Baik,
        staff: vec!["Alan".to_string()],
        issue: None,
        remediation: None,
        notes: None,
        created_by: "tester".to_string(),
    }
}

pub fn report_fixture(id: &str, date: &str, program: &str, issue: Option<&str>) -> BroadcastReport {
    let r = new_report(date, program);
    let now = Utc::now();
    BroadcastReport {
        id: id.to_string(),
        date: r.date,
        start_time: r.start_time,
        end_time: r.end_time,
        program: r.program,
        video_quality: r.video_quality,
        audio_quality: r.audio_quality,
        staff: r.staff,
        issue: issue.map(str::to_string),
        remediation: r.remediation,
        notes: r.notes,
        created_by: r.created_by,
        created_at: now,
        updated_at: now,
    }
}
