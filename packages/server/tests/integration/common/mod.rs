use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::Arc;

use common::storage::BlobStore;
use common::storage::filesystem::FilesystemBlobStore;
use common::{FilesystemConfig, StorageBackend, StorageConfig};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use reqwest::Client;
use reqwest::header::HeaderMap;
use reqwest::multipart::{Form, Part};
use tempfile::TempDir;

use server::config::{AppConfig, GalleryConfig, ServerConfig};
use server::state::AppState;

pub mod routes {
    pub const GALLERY: &str = "/";
    pub const UPLOAD: &str = "/upload";
    pub const OPENAPI: &str = "/api-docs/openapi.json";

    pub fn image(name: &str) -> String {
        format!("/image/{name}")
    }

    pub fn thumbnail(name: &str) -> String {
        format!("/thumbnail/{name}")
    }
}

/// A running test server backed by a temporary filesystem blob store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<dyn BlobStore>,
    pub gallery: GalleryConfig,
    _storage_dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub bytes: Vec<u8>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let storage_dir = tempfile::tempdir().expect("Failed to create storage dir");
        let root = storage_dir.path().join("blobs");

        let store: Arc<dyn BlobStore> = Arc::new(
            FilesystemBlobStore::new(root.clone())
                .await
                .expect("Failed to open blob store"),
        );

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                secret_key: "test-secret".to_string(),
                max_upload_bytes: 4 * 1024 * 1024,
            },
            gallery: GalleryConfig::default(),
            storage: StorageConfig {
                backend: StorageBackend::Filesystem,
                filesystem: FilesystemConfig { root },
                ..Default::default()
            },
        };
        let gallery = app_config.gallery.clone();

        let app = server::build_router(AppState::new(app_config, store.clone()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        Self {
            addr,
            client,
            store,
            gallery,
            _storage_dir: storage_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
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

    pub async fn post_form(&self, form: Form) -> TestResponse {
        let res = self
            .client
            .post(self.url(routes::UPLOAD))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    /// Upload `file_bytes` in the `file` field under `file_name`.
    pub async fn upload(&self, file_name: &str, file_bytes: Vec<u8>) -> TestResponse {
        let part = Part::bytes(file_bytes)
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")
            .expect("Failed to set MIME type");
        self.post_form(Form::new().part("file", part)).await
    }

    /// Upload and return the stored name of the new image.
    pub async fn upload_image(&self, file_name: &str, file_bytes: Vec<u8>) -> String {
        let before = self.image_names().await;
        let res = self.upload(file_name, file_bytes).await;
        assert_eq!(res.status, 302, "upload failed: {}", res.text());
        assert_eq!(res.location(), Some(routes::GALLERY));

        let mut added: Vec<_> = self
            .image_names()
            .await
            .into_iter()
            .filter(|name| !before.contains(name))
            .collect();
        assert_eq!(added.len(), 1, "expected exactly one new image");
        added.pop().unwrap()
    }

    /// Names currently stored in the image container.
    pub async fn image_names(&self) -> Vec<String> {
        self.store
            .list_blobs(&self.gallery.image_container)
            .await
            .unwrap_or_default()
    }

    pub async fn thumbnail_names(&self) -> Vec<String> {
        self.store
            .list_blobs(&self.gallery.thumbnail_container)
            .await
            .unwrap_or_default()
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let headers = res.headers().clone();
        let bytes = res.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        Self {
            status,
            headers,
            bytes,
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }
}

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format)
        .expect("Failed to encode fixture image");
    buf
}

/// Semi-transparent RGBA PNG.
pub fn rgba_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 90, 160])
    });
    encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)
}

pub fn rgb_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, 30, (y % 256) as u8])
    });
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg)
}

pub fn rgba_gif(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([250, 200, 0, 255]));
    encode(DynamicImage::ImageRgba8(img), ImageFormat::Gif)
}
