use axum::Router;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use mood_mirror::{
    config::{Config, ImageConfig, LlmConfig, LogsConfig, ServerConfig},
    llm::LlmClient,
    pipeline::Analyzer,
    server::{self, handlers::AppState},
};
use std::{io::Cursor, path::Path, sync::Arc};
use tempfile::TempDir;

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        llm: LlmConfig {
            base_url: "http://127.0.0.1:9/v1beta/openai".to_string(),
            api_key: Some("test-api-key".to_string()),
            model: "gemini-1.5-flash".to_string(),
            temperature: None,
            request_timeout_secs: Some(5),
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
            max_upload_bytes: 2 * 1024 * 1024,
            scratch_dir: None,
        },
        image: ImageConfig {
            max_dimension: 64,
            jpeg_quality: 70,
        },
    }
}

/// Create a temporary directory for scratch files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

pub fn create_analyzer(client: Arc<dyn LlmClient>, scratch_dir: &Path) -> Analyzer {
    Analyzer::new(
        client,
        create_test_config().image,
        scratch_dir.to_path_buf(),
    )
}

/// Build the real router around a substitute generation client
pub fn create_test_app(client: Arc<dyn LlmClient>, scratch_dir: &Path) -> Router {
    let state = AppState {
        analyzer: Arc::new(create_analyzer(client, scratch_dir)),
    };
    server::router(state, create_test_config().server.max_upload_bytes)
}

pub fn sample_image(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, format)
        .expect("Failed to encode sample image");
    out.into_inner()
}

pub fn sample_png() -> Vec<u8> {
    sample_image(ImageFormat::Png, 120, 80)
}

/// Hand-built multipart body for requests sent through `oneshot`.
/// Returns the content type header value and the body bytes.
pub fn multipart_body(fields: &[(&str, &str)], image: Option<&[u8]>) -> (String, Vec<u8>) {
    const BOUNDARY: &str = "mood-mirror-test-boundary";
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some(bytes) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"photo.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

pub fn count_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

pub const VALID_REPLY: &str = r#"{"response": "A calm afternoon light suits you."}"#;

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8080
  max_upload_bytes: 1048576
  scratch_dir: "/tmp/mood-mirror"
  logs:
    level: "debug"

llm:
  base_url: "http://localhost:4000/openai/"
  api_key: "file-api-key"
  model: "gemini-1.5-pro"
  temperature: 0.9

image:
  max_dimension: 256
  jpeg_quality: 90
"#;
