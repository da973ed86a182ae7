//! Charity project lifecycle rules.

mod common;

use common::{donation_input, project_input, setup, user};
use qrkot_db::repositories::{ProjectError, UpdateProjectInput};

#[tokio::test]
async fn test_duplicate_name_rejected() {
    let t = setup().await;
    t.projects.create(project_input("Food", 100)).await.unwrap();

    let result = t.projects.create(project_input("Food", 50)).await;

    assert!(matches!(result, Err(ProjectError::DuplicateName(name)) if name == "Food"));
    assert_eq!(t.projects.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_rename_rules() {
    let t = setup().await;
    let food = t.projects.create(project_input("Food", 100)).await.unwrap();
    t.projects.create(project_input("Toys", 100)).await.unwrap();

    let same = t
        .projects
        .update(
            food.id,
            UpdateProjectInput {
                name: Some("Food".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(same.name, "Food");

    let taken = t
        .projects
        .update(
            food.id,
            UpdateProjectInput {
                name: Some("Toys".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(taken, Err(ProjectError::DuplicateName(_))));

    let renamed = t
        .projects
        .update(
            food.id,
            UpdateProjectInput {
                name: Some("Medicine".into()),
                description: Some("Vet bills".into()),
                full_amount: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Medicine");
    assert_eq!(renamed.description, "Vet bills");
    assert_eq!(renamed.full_amount, 100);
}

#[tokio::test]
async fn test_update_missing_project() {
    let t = setup().await;

    let result = t.projects.update(42, UpdateProjectInput::default()).await;

    assert!(matches!(result, Err(ProjectError::NotFound(42))));
}

#[tokio::test]
async fn test_empty_update_is_noop() {
    let t = setup().await;
    let project = t.projects.create(project_input("Beds", 100)).await.unwrap();

    let updated = t
        .projects
        .update(project.id, UpdateProjectInput::default())
        .await
        .unwrap();

    assert_eq!(updated, project);
}

#[tokio::test]
async fn test_closed_project_cannot_be_edited() {
    let t = setup().await;
    let project = t.projects.create(project_input("Closed", 10)).await.unwrap();
    t.donations.create(user(), donation_input(10)).await.unwrap();

    let result = t
        .projects
        .update(
            project.id,
            UpdateProjectInput {
                description: Some("changed".into()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ProjectError::Closed(id)) if id == project.id));
}

#[tokio::test]
async fn test_full_amount_below_invested_rejected() {
    let t = setup().await;
    let project = t.projects.create(project_input("Partial", 100)).await.unwrap();
    t.donations.create(user(), donation_input(60)).await.unwrap();

    let result = t
        .projects
        .update(
            project.id,
            UpdateProjectInput {
                full_amount: Some(59),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(ProjectError::CapacityBelowInvested {
            full_amount: 59,
            invested_amount: 60
        })
    ));
}

#[tokio::test]
async fn test_full_amount_equal_to_invested_closes_project() {
    let t = setup().await;
    let project = t.projects.create(project_input("Trim", 100)).await.unwrap();
    t.donations.create(user(), donation_input(60)).await.unwrap();

    let updated = t
        .projects
        .update(
            project.id,
            UpdateProjectInput {
                full_amount: Some(60),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.full_amount, 60);
    assert!(updated.fully_invested);
    assert!(updated.close_date.is_some());
}

#[tokio::test]
async fn test_raising_full_amount_does_not_reallocate() {
    let t = setup().await;
    let project = t.projects.create(project_input("Grow", 50)).await.unwrap();
    let donation = t.donations.create(user(), donation_input(80)).await.unwrap();
    assert_eq!(donation.invested_amount, 50);

    let updated = t
        .projects
        .update(
            project.id,
            UpdateProjectInput {
                full_amount: Some(50),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(updated, Err(ProjectError::Closed(_))));

    let other = t.projects.create(project_input("Other", 200)).await.unwrap();
    assert_eq!(other.invested_amount, 30);

    let raised = t
        .projects
        .update(
            other.id,
            UpdateProjectInput {
                full_amount: Some(300),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(raised.full_amount, 300);
    assert_eq!(raised.invested_amount, 30);
    assert!(!raised.fully_invested);
}

#[tokio::test]
async fn test_delete_rules() {
    let t = setup().await;
    let funded = t.projects.create(project_input("Funded", 100)).await.unwrap();
    t.donations.create(user(), donation_input(1)).await.unwrap();
    let fresh = t.projects.create(project_input("Fresh", 100)).await.unwrap();

    let result = t.projects.delete(funded.id).await;
    assert!(matches!(result, Err(ProjectError::AlreadyInvested(id)) if id == funded.id));

    let deleted = t.projects.delete(fresh.id).await.unwrap();
    assert_eq!(deleted.id, fresh.id);
    assert!(matches!(
        t.projects.get(fresh.id).await,
        Err(ProjectError::NotFound(_))
    ));

    assert!(matches!(
        t.projects.delete(fresh.id).await,
        Err(ProjectError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_completion_report_lists_closed_projects() {
    let t = setup().await;
    t.projects.create(project_input("Quick", 10)).await.unwrap();
    t.projects.create(project_input("Slow", 1000)).await.unwrap();
    t.donations.create(user(), donation_input(10)).await.unwrap();

    let report = t.projects.completion_report().await.unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report[0].name, "Quick");
    assert_eq!(report[0].description, "Quick description");
    assert!(report[0].gathering_time >= chrono::TimeDelta::zero());
}
