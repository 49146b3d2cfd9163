use api::{
    app::build_router,
    auth::{AuthConfig, PasswordService},
    AppConfig, AppState,
};
use client::{ApiClient, ClientError, ComplexSubmission};
use tempfile::TempDir;
use tokio::net::TcpListener;

const ADMIN_PASSWORD: &str = "tennisadmin";

/// Serve the real router over an in-memory store on an ephemeral port.
async fn spawn_server() -> (String, TempDir) {
    let pool = infra::db::connect_in_memory().await.unwrap();
    infra::db::init_schema(&pool).await.unwrap();

    let uploads = tempfile::tempdir().unwrap();
    let config = AppConfig {
        database_url: "sqlite::memory:".into(),
        port: 0,
        upload_dir: uploads.path().to_path_buf(),
        upload_max_bytes: 1024 * 1024,
        auth: AuthConfig {
            jwt_secret: "e2e-secret".into(),
            jwt_expiration_hours: 1,
            admin_password_hash: PasswordService::hash_password_with_cost(ADMIN_PASSWORD, 4)
                .unwrap(),
        },
    };
    let router = build_router(AppState::new(pool, &config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}"), uploads)
}

fn club_a() -> ComplexSubmission {
    ComplexSubmission {
        name: "Club A".into(),
        address: "1 Rue X".into(),
        surface: "clay".into(),
        court_count: 2,
        lat: Some(48.85),
        lng: Some(2.35),
        photo: None,
    }
}

#[tokio::test]
async fn test_public_and_admin_flow() {
    let (url, _uploads) = spawn_server().await;
    let mut api = ApiClient::new(url);

    let id = api.submit_complex(&club_a()).await.unwrap();
    assert!(api.list_complexes().await.unwrap().is_empty());

    api.login(ADMIN_PASSWORD).await.unwrap();
    let pending = api.list_all_complexes().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert!(!pending[0].validated);
    let numbers: Vec<i64> = pending[0].terrains.iter().map(|t| t.number).collect();
    assert_eq!(numbers, vec![1, 2]);

    api.validate_complex(id).await.unwrap();
    let public = api.list_complexes().await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].free_courts(), 2);

    let court = public[0].terrains[0].id;
    assert!(api.toggle_occupation(court).await.unwrap());
    assert_eq!(api.list_complexes().await.unwrap()[0].free_courts(), 1);
    assert!(!api.toggle_occupation(court).await.unwrap());

    api.delete_complex(id).await.unwrap();
    assert!(api.list_all_complexes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_keeps_photo_and_reports_missing_ids() {
    let (url, uploads) = spawn_server().await;
    let mut api = ApiClient::new(url);

    let photo_dir = tempfile::tempdir().unwrap();
    let photo_path = photo_dir.path().join("court.jpg");
    std::fs::write(&photo_path, b"jpeg-bytes").unwrap();

    let mut submission = club_a();
    submission.photo = Some(photo_path);
    let id = api.submit_complex(&submission).await.unwrap();

    api.login(ADMIN_PASSWORD).await.unwrap();
    let stored = api.list_all_complexes().await.unwrap().remove(0);
    let photo = stored.photo.clone().expect("photo stored");
    assert!(uploads.path().join(&photo).exists());

    let mut edit = ComplexSubmission::from_complex(&stored);
    edit.name = "Club A (renovated)".into();
    api.update_complex(id, &edit).await.unwrap();

    let edited = api.list_all_complexes().await.unwrap().remove(0);
    assert_eq!(edited.display_name(), "Club A (renovated)");
    assert_eq!(edited.photo.as_deref(), Some(photo.as_str()));

    let served = reqwest::get(api.photo_url(&photo)).await.unwrap();
    assert_eq!(served.bytes().await.unwrap().as_ref(), b"jpeg-bytes");

    let err = api.validate_complex(id + 10).await.unwrap_err();
    assert!(err.is_not_found(), "{err}");
    let err = api.toggle_occupation(999).await.unwrap_err();
    assert!(err.is_not_found(), "{err}");
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let (url, _uploads) = spawn_server().await;
    let mut api = ApiClient::new(url);

    let err = api.login("guess").await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 401, .. }), "{err}");
    assert!(!api.is_admin());
    assert!(matches!(
        api.list_all_complexes().await.unwrap_err(),
        ClientError::NotLoggedIn
    ));
}
