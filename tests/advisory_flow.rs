mod common;

use farmease_api::{
    dto::{
        advisory::{
            CreateCropRequest, CreateFeedbackRequest, CreateSolutionRequest,
            CreateTechniqueRequest, LinkTechniqueRequest,
        },
        auth::UpdateProfileRequest,
        schemes::SchemeRequest,
    },
    entity::users::UserType,
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::{Pagination, SchemeQuery},
    services::{advisory_service, auth_service, feedback_service, scheme_service},
};

// Integration flow: staff curates schemes and crop advice -> farmers read and comment.
#[tokio::test]
async fn schemes_crops_solutions_and_feedback_flow() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;

    let farmer = common::register(&state, UserType::Farmer, "ravi").await?;
    let staff_account = common::register(&state, UserType::User, "officer").await?;
    let staff = AuthUser {
        is_staff: true,
        ..staff_account
    };

    // Profile updates validate the phone number.
    let bad = auth_service::update_profile(
        &state,
        &farmer,
        UpdateProfileRequest {
            phone: Some("0123".into()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(bad, Err(AppError::Validation(_))));
    let profile = auth_service::update_profile(
        &state,
        &farmer,
        UpdateProfileRequest {
            location: Some("Nashik".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("profile");
    assert_eq!(profile.location.as_deref(), Some("Nashik"));
    assert_eq!(profile.phone.as_deref(), Some("9876543210"));

    // Schemes: staff only, filtered by inclusive age range.
    let request = || SchemeRequest {
        scheme_name: Some("Child nutrition".into()),
        start_age: Some(5),
        end_age: Some(12),
        description: None,
        link: None,
    };
    let denied = scheme_service::create_scheme(&state, &farmer, request()).await;
    assert!(matches!(denied, Err(AppError::Forbidden)));
    let scheme = scheme_service::create_scheme(&state, &staff, request())
        .await?
        .data
        .expect("scheme");

    let eligible = scheme_service::check_eligibility(&state, scheme.id, 10)
        .await?
        .data
        .expect("eligibility");
    assert!(eligible.eligible);
    let too_old = scheme_service::check_eligibility(&state, scheme.id, 13)
        .await?
        .data
        .expect("eligibility");
    assert!(!too_old.eligible);

    let listed = scheme_service::list_schemes(
        &state,
        SchemeQuery {
            age: Some(12),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(listed.data.expect("schemes").items.len(), 1);
    let listed = scheme_service::list_schemes(
        &state,
        SchemeQuery {
            age: Some(13),
            ..Default::default()
        },
    )
    .await?;
    assert!(listed.data.expect("schemes").items.is_empty());

    // Crops and techniques are linked many-to-many.
    let drip = advisory_service::create_technique(
        &state,
        &staff,
        CreateTechniqueRequest {
            title: "Drip irrigation".into(),
            description: "Water at the roots".into(),
        },
    )
    .await?
    .data
    .expect("technique");
    let mulch = advisory_service::create_technique(
        &state,
        &staff,
        CreateTechniqueRequest {
            title: "Mulching".into(),
            description: "Cover the soil".into(),
        },
    )
    .await?
    .data
    .expect("technique");

    let crop = advisory_service::create_crop(
        &state,
        &staff,
        CreateCropRequest {
            name: "Tomato".into(),
            description: "Warm season crop".into(),
            climate: "Warm".into(),
            growth_period: "90 days".into(),
            harvesting_time: "Summer".into(),
            technique_ids: vec![drip.id],
        },
    )
    .await?
    .data
    .expect("crop");
    assert_eq!(crop.techniques.len(), 1);

    for _ in 0..2 {
        advisory_service::link_technique(
            &state,
            &staff,
            crop.crop.id,
            LinkTechniqueRequest {
                technique_id: mulch.id,
            },
        )
        .await?;
    }
    let detail = advisory_service::get_crop(&state, crop.crop.id)
        .await?
        .data
        .expect("crop");
    assert_eq!(detail.techniques.len(), 2);

    // Images are stored below the media root.
    let uploaded = advisory_service::upload_technique_image(
        &state,
        &staff,
        drip.id,
        "drip line.png",
        b"\x89PNG fake",
    )
    .await?
    .data
    .expect("technique");
    let image = uploaded.image.expect("image path");
    assert!(image.starts_with("technique_images/"));
    assert!(image.ends_with("-dripline.png"));
    assert!(state.media_root.join(&image).exists());

    // Solutions are titled "{symptoms} - {crop}".
    let solution = advisory_service::create_solution(
        &state,
        &staff,
        CreateSolutionRequest {
            crop_id: crop.crop.id,
            symptoms: "Leaf curl".into(),
            solution: "Remove affected leaves".into(),
            description: "Caused by whiteflies".into(),
        },
    )
    .await?
    .data
    .expect("solution");
    assert_eq!(solution.title, "Leaf curl - Tomato");

    let feedback = feedback_service::create_feedback(
        &state,
        &farmer,
        solution.solution.id,
        CreateFeedbackRequest {
            content: "Worked for me".into(),
        },
    )
    .await?
    .data
    .expect("feedback");
    assert_eq!(feedback.author, "ravi");

    let list = feedback_service::list_feedback(&state, solution.solution.id, Pagination::default())
        .await?;
    assert_eq!(list.meta.expect("meta").total, Some(1));

    // Deleting the crop takes its solutions along.
    advisory_service::delete_crop(&state, &staff, crop.crop.id).await?;
    let gone = advisory_service::get_solution(&state, solution.solution.id).await;
    assert!(matches!(gone, Err(AppError::NotFound)));

    tokio::fs::remove_dir_all(&state.media_root).await?;
    Ok(())
}
