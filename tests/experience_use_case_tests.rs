mod common;

use mockall::predicate::eq;
use uuid::Uuid;

use careerlog_backend::entities::experience::{CategoryCount, NewExperienceRequest};
use careerlog_backend::errors::AppError;
use careerlog_backend::use_cases::experience::ExperienceHandler;

use common::{claims_for, experience_for, MockExperienceRepo};

#[tokio::test]
async fn overview_aggregates_dashboard_stats() {
    let mut repo = MockExperienceRepo::new();
    let user_id = Uuid::new_v4();

    repo.expect_list_for_user()
        .with(eq(user_id), eq(true))
        .returning(move |id, _| Ok(vec![experience_for(*id), experience_for(*id)]));
    repo.expect_total_hours_for_user()
        .returning(|_| Ok(240));
    repo.expect_category_counts_for_user()
        .returning(|_| Ok(vec![CategoryCount { category: "Project".into(), count: 2 }]));

    let overview = ExperienceHandler::new(repo).overview(&user_id).await.unwrap();

    assert_eq!(overview.total_count, 2);
    assert_eq!(overview.total_hours, 240);
    assert_eq!(overview.categories.len(), 1);
    assert_eq!(overview.experiences.len(), 2);
}

#[tokio::test]
async fn create_persists_submitted_fields() {
    let mut repo = MockExperienceRepo::new();
    let user_id = Uuid::new_v4();
    let new_id = Uuid::new_v4();

    repo.expect_create()
        .withf(move |insert| {
            insert.user_id == user_id
                && insert.category == "Internship"
                && insert.title == "Backend intern"
                && insert.start_date.as_deref() == Some("2024-07-01")
                && insert.hours == 160
        })
        .returning(move |_| Ok(new_id));

    let response = ExperienceHandler::new(repo)
        .create(user_id, NewExperienceRequest {
            category: "Internship".into(),
            title: "Backend intern".into(),
            description: Some("API work".into()),
            start_date: Some("2024-07-01".into()),
            end_date: None,
            skills: Some("Rust".into()),
            hours: 160,
            link: None,
        })
        .await
        .unwrap();

    assert_eq!(response.id, new_id);
}

#[tokio::test]
async fn create_rejects_malformed_dates() {
    let repo = MockExperienceRepo::new();

    let result = ExperienceHandler::new(repo)
        .create(Uuid::new_v4(), NewExperienceRequest {
            category: "Internship".into(),
            title: "Backend intern".into(),
            description: None,
            start_date: Some("07/01/2024".into()),
            end_date: None,
            skills: None,
            hours: 0,
            link: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn non_owner_gets_not_found() {
    let mut repo = MockExperienceRepo::new();
    let owner_id = Uuid::new_v4();
    let entry = experience_for(owner_id);
    let entry_id = entry.id;

    repo.expect_get_by_id()
        .with(eq(entry_id))
        .returning(move |_| Ok(Some(entry.clone())));

    let stranger = claims_for(Uuid::new_v4(), false);
    let result = ExperienceHandler::new(repo).get(&entry_id, &stranger).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn admin_can_read_any_entry() {
    let mut repo = MockExperienceRepo::new();
    let owner_id = Uuid::new_v4();
    let entry = experience_for(owner_id);
    let entry_id = entry.id;

    repo.expect_get_by_id()
        .returning(move |_| Ok(Some(entry.clone())));

    let admin = claims_for(Uuid::new_v4(), true);
    let response = ExperienceHandler::new(repo).get(&entry_id, &admin).await.unwrap();

    assert_eq!(response.experience.id, entry_id);
}

#[tokio::test]
async fn owner_can_delete_entry() {
    let mut repo = MockExperienceRepo::new();
    let owner_id = Uuid::new_v4();
    let entry = experience_for(owner_id);
    let entry_id = entry.id;

    repo.expect_get_by_id()
        .returning(move |_| Ok(Some(entry.clone())));
    repo.expect_delete()
        .with(eq(entry_id))
        .times(1)
        .returning(|_| Ok(()));

    let owner = claims_for(owner_id, false);
    ExperienceHandler::new(repo).delete(&entry_id, &owner).await.unwrap();
}

#[tokio::test]
async fn missing_entry_is_not_found() {
    let mut repo = MockExperienceRepo::new();
    repo.expect_get_by_id().returning(|_| Ok(None));

    let claims = claims_for(Uuid::new_v4(), false);
    let result = ExperienceHandler::new(repo).get(&Uuid::new_v4(), &claims).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}
