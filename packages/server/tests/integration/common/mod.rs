use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use common::storage::filesystem::FilesystemMediaStore;
use reqwest::Client;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tempfile::TempDir;

use server::config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, I18nConfig, ServerConfig, StorageConfig,
};
use server::state::AppState;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "test-admin-password";

pub mod routes {
    pub const LOGIN: &str = "/auth/login";
    pub const ME: &str = "/auth/me";
    pub const PROJECTS: &str = "/projects/";
    pub const CERTIFICATES: &str = "/certificates/";
    pub const TECHNOLOGIES: &str = "/technologies/";
    pub const TAGS: &str = "/tags/";
    pub const I18N: &str = "/i18n/";

    pub fn project(id: i32) -> String {
        format!("/projects/{id}")
    }

    pub fn certificate(id: i32) -> String {
        format!("/certificates/{id}")
    }

    pub fn technology(id: i32) -> String {
        format!("/technologies/{id}")
    }

    pub fn tag(id: i32) -> String {
        format!("/tags/{id}")
    }

    pub fn language(code: &str) -> String {
        format!("/i18n/{code}")
    }
}

/// A running test server backed by a tempdir-scoped SQLite database and
/// media/i18n directories.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    pub media_dir: PathBuf,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

/// A 1x1 red PNG, generated rather than hand-encoded.
pub fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 0, 0, 255]));
    let mut buf = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

impl TestApp {
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("test.db");
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let media_dir = dir.path().join("media");
        let i18n_dir = dir.path().join("i18n");

        let db = server::database::init_db(&db_url)
            .await
            .expect("Failed to initialize test database");

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig { url: db_url },
            auth: AuthConfig {
                jwt_secret: "test-secret-for-integration-tests".to_string(),
                token_ttl_minutes: 30,
                admin_username: ADMIN_USERNAME.to_string(),
                admin_password: ADMIN_PASSWORD.to_string(),
            },
            storage: StorageConfig {
                media_dir: media_dir.clone(),
                max_upload_size: 5 * 1024 * 1024,
            },
            i18n: I18nConfig {
                dir: i18n_dir,
            },
        };

        server::seed::ensure_admin_user(&db, &app_config.auth)
            .await
            .expect("Failed to seed admin user");

        let media = FilesystemMediaStore::new(media_dir.clone(), app_config.storage.max_upload_size)
            .await
            .expect("Failed to create media store");

        let state = AppState {
            db: db.clone(),
            config: app_config,
            media: Arc::new(media),
        };

        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
            media_dir,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Log in as the seeded admin and return the bearer token.
    pub async fn login_admin(&self) -> String {
        let res = self
            .client
            .post(self.url(routes::LOGIN))
            .form(&[("username", ADMIN_USERNAME), ("password", ADMIN_PASSWORD)])
            .send()
            .await
            .expect("Failed to send login request");
        let res = TestResponse::from_response(res).await;
        assert_eq!(res.status, 200, "Login failed: {}", res.text);

        res.body["access_token"]
            .as_str()
            .expect("Login response should contain an access_token")
            .to_string()
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");
        TestResponse::from_response(res).await
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send GET request");
        TestResponse::from_response(res).await
    }

    pub async fn post_json_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");
        TestResponse::from_response(res).await
    }

    pub async fn post_json_without_token(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");
        TestResponse::from_response(res).await
    }

    pub async fn put_json_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");
        TestResponse::from_response(res).await
    }

    pub async fn delete_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send DELETE request");
        TestResponse::from_response(res).await
    }

    pub async fn delete_without_token(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");
        TestResponse::from_response(res).await
    }

    /// POST a multipart form with optional text fields and file fields.
    pub async fn post_form_with_token(
        &self,
        path: &str,
        texts: &[(&str, &str)],
        files: &[(&str, &str, Vec<u8>)],
        token: &str,
    ) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .multipart(build_form(texts, files))
            .send()
            .await
            .expect("Failed to send multipart POST request");
        TestResponse::from_response(res).await
    }

    pub async fn post_form_without_token(
        &self,
        path: &str,
        texts: &[(&str, &str)],
        files: &[(&str, &str, Vec<u8>)],
    ) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .multipart(build_form(texts, files))
            .send()
            .await
            .expect("Failed to send multipart POST request");
        TestResponse::from_response(res).await
    }

    /// PUT a multipart form with optional text fields and file fields.
    pub async fn put_form_with_token(
        &self,
        path: &str,
        texts: &[(&str, &str)],
        files: &[(&str, &str, Vec<u8>)],
        token: &str,
    ) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .multipart(build_form(texts, files))
            .send()
            .await
            .expect("Failed to send multipart PUT request");
        TestResponse::from_response(res).await
    }

    /// Create a technology via the API and return its `id`.
    pub async fn create_technology(&self, token: &str, name: &str) -> i32 {
        let res = self
            .post_form_with_token(
                routes::TECHNOLOGIES,
                &[("name", name)],
                &[("icon", "icon.png", png_bytes())],
                token,
            )
            .await;
        assert_eq!(res.status, 201, "create_technology failed: {}", res.text);
        res.id()
    }

    /// Create a tag via the API and return its `id`.
    pub async fn create_tag(&self, token: &str, name: &str) -> i32 {
        let res = self
            .post_json_with_token(routes::TAGS, &serde_json::json!({ "name": name }), token)
            .await;
        assert_eq!(res.status, 201, "create_tag failed: {}", res.text);
        res.id()
    }

    /// Create a project via the API and return the response.
    pub async fn create_project(
        &self,
        token: &str,
        title: &str,
        technology_ids: &str,
        tag_ids: &str,
    ) -> TestResponse {
        self.post_form_with_token(
            routes::PROJECTS,
            &[
                ("title", title),
                ("description", "A test project"),
                ("technology_ids", technology_ids),
                ("tag_ids", tag_ids),
            ],
            &[("image", "cover.png", png_bytes())],
            token,
        )
        .await
    }

    /// Count files in the media directory, ignoring the write-temp dir.
    pub fn stored_asset_count(&self) -> usize {
        match std::fs::read_dir(&self.media_dir) {
            Ok(entries) => entries
                .filter_map(Result::ok)
                .filter(|e| e.file_name() != ".tmp")
                .count(),
            Err(_) => 0,
        }
    }
}

fn build_form(
    texts: &[(&str, &str)],
    files: &[(&str, &str, Vec<u8>)],
) -> reqwest::multipart::Form {
    let mut form = reqwest::multipart::Form::new();
    for (name, value) in texts {
        form = form.text(name.to_string(), value.to_string());
    }
    for (field, filename, bytes) in files {
        let part = reqwest::multipart::Part::bytes(bytes.clone())
            .file_name(filename.to_string())
            .mime_str("application/octet-stream")
            .expect("Failed to set MIME type");
        form = form.part(field.to_string(), part);
    }
    form
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    pub fn id(&self) -> i32 {
        self.body["id"]
            .as_i64()
            .expect("response body should contain 'id'") as i32
    }
}
