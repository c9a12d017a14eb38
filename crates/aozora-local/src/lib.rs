use std::io::Read;
use std::time::Duration;

use aozora_core::{Error, Result, TextSource};

pub mod clean;
pub mod loader;
pub mod passage;

pub use clean::clean;
pub use loader::TextLoader;
pub use passage::select_passage;

/// Applied to connect and to the whole download. Aozora mirrors are slow but
/// the archives are tiny; anything past this is treated as a dead source.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Downloads a catalog URL, unpacks the single `.txt` member of the ZIP body
/// and decodes it from Shift-JIS.
#[derive(Debug, Clone)]
pub struct ArchiveFetcher {
    client: reqwest::Client,
}

impl ArchiveFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("aozora-local/0.1")
            .redirect(reqwest::redirect::Policy::limited(10))
            .connect_timeout(FETCH_TIMEOUT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;
        Ok(Self { client })
    }
}

/// Pull the first `.txt` member out of a ZIP body and decode it.
///
/// Aozora archives carry exactly one text member next to optional images;
/// member name casing varies across works, so the suffix match is
/// case-insensitive. Undecodable byte sequences become U+FFFD instead of
/// failing the whole extraction.
fn extract_text_member(bytes: Vec<u8>) -> Result<String> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
        .map_err(|e| Error::Archive(format!("not a zip archive: {e}")))?;
    for i in 0..archive.len() {
        let mut member = archive
            .by_index(i)
            .map_err(|e| Error::Archive(e.to_string()))?;
        if !member.name().to_ascii_lowercase().ends_with(".txt") {
            continue;
        }
        let mut raw = Vec::new();
        member
            .read_to_end(&mut raw)
            .map_err(|e| Error::Archive(e.to_string()))?;
        let (text, _, _) = encoding_rs::SHIFT_JIS.decode(&raw);
        return Ok(text.into_owned());
    }
    Err(Error::Archive("no .txt member in archive".to_string()))
}

#[async_trait::async_trait]
impl TextSource for ArchiveFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let url = url::Url::parse(url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("unexpected status {status}")));
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?
            .to_vec();

        // Inflate + decode are synchronous; keep them off the async workers.
        tokio::task::spawn_blocking(move || extract_text_member(bytes))
            .await
            .map_err(|e| Error::Archive(format!("unzip join failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::header, http::StatusCode, routing::get, Router};
    use std::io::Write;
    use std::net::SocketAddr;

    fn zip_with_member(name: &str, bytes: &[u8]) -> Vec<u8> {
        let mut buf = std::io::Cursor::new(Vec::new());
        let mut w = zip::ZipWriter::new(&mut buf);
        w.start_file(name, zip::write::SimpleFileOptions::default())
            .unwrap();
        w.write_all(bytes).unwrap();
        w.finish().unwrap();
        buf.into_inner()
    }

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn fetches_and_decodes_shift_jis_text_member() {
        let body = "吾輩は猫である。名前はまだ無い。";
        let (sjis, _, _) = encoding_rs::SHIFT_JIS.encode(body);
        let zip_bytes = zip_with_member("789_ruby_5639.txt", &sjis);
        let app = Router::new().route(
            "/work.zip",
            get(move || {
                let body = zip_bytes.clone();
                async move { ([(header::CONTENT_TYPE, "application/zip")], body) }
            }),
        );
        let addr = serve(app).await;

        let fetcher = ArchiveFetcher::new().unwrap();
        let text = fetcher
            .fetch_text(&format!("http://{addr}/work.zip"))
            .await
            .unwrap();
        assert_eq!(text, body);
    }

    #[tokio::test]
    async fn picks_txt_member_regardless_of_name_casing() {
        let zip_bytes = zip_with_member("HASHIRE_MEROSU.TXT", "走れメロス".as_bytes());
        let app = Router::new().route(
            "/w.zip",
            get(move || {
                let body = zip_bytes.clone();
                async move { body }
            }),
        );
        let addr = serve(app).await;

        let fetcher = ArchiveFetcher::new().unwrap();
        let text = fetcher
            .fetch_text(&format!("http://{addr}/w.zip"))
            .await
            .unwrap();
        assert_eq!(text, "走れメロス");
    }

    #[tokio::test]
    async fn archive_without_txt_member_is_an_error() {
        let zip_bytes = zip_with_member("cover.png", b"\x89PNG");
        let app = Router::new().route(
            "/w.zip",
            get(move || {
                let body = zip_bytes.clone();
                async move { body }
            }),
        );
        let addr = serve(app).await;

        let fetcher = ArchiveFetcher::new().unwrap();
        let err = fetcher
            .fetch_text(&format!("http://{addr}/w.zip"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Archive(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn non_zip_body_is_an_archive_error() {
        let app = Router::new().route("/w.zip", get(|| async { "this is not a zip" }));
        let addr = serve(app).await;

        let fetcher = ArchiveFetcher::new().unwrap();
        let err = fetcher
            .fetch_text(&format!("http://{addr}/w.zip"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Archive(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_error() {
        let app = Router::new().route(
            "/missing.zip",
            get(|| async { (StatusCode::NOT_FOUND, "gone") }),
        );
        let addr = serve(app).await;

        let fetcher = ArchiveFetcher::new().unwrap();
        let err = fetcher
            .fetch_text(&format!("http://{addr}/missing.zip"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn malformed_url_is_rejected_before_any_network_io() {
        let fetcher = ArchiveFetcher::new().unwrap();
        let err = fetcher.fetch_text("not a url").await.unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)), "got {err:?}");
    }
}
