use std::path::{Path, PathBuf};

use futures_util::{Stream, StreamExt};
use tokio::io::AsyncWriteExt;

use crate::FetchError;
use crate::scrape::file_name;

/// Local path the file at `file_url` is saved to inside `destination_dir`.
///
/// The name is the decoded last URL path segment. Names that would leave the
/// directory are rejected.
pub fn target_path(file_url: &str, destination_dir: &Path) -> Result<PathBuf, FetchError> {
    let name =
        file_name(file_url).ok_or_else(|| FetchError::InvalidLocator(file_url.to_string()))?;
    if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
        return Err(FetchError::InvalidLocator(file_url.to_string()));
    }
    Ok(destination_dir.join(name))
}

/// Stream `chunks` into a freshly created file at `path`.
///
/// Returns the number of bytes written. If the stream or a write fails, the
/// partial file is removed before the error is returned.
pub async fn write_stream<S, B, E>(chunks: S, path: &Path) -> Result<u64, FetchError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<FetchError>,
{
    let file = tokio::fs::File::create(path)
        .await
        .map_err(|source| FetchError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    match copy_chunks(chunks, file, path).await {
        Ok(written) => Ok(written),
        Err(e) => {
            if let Err(rm) = tokio::fs::remove_file(path).await {
                tracing::warn!(path = %path.display(), error = %rm, "failed to remove partial download");
            }
            Err(e)
        }
    }
}

async fn copy_chunks<S, B, E>(
    chunks: S,
    mut file: tokio::fs::File,
    path: &Path,
) -> Result<u64, FetchError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<FetchError>,
{
    let write_err = |source: std::io::Error| FetchError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut chunks = std::pin::pin!(chunks);
    let mut written = 0u64;
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk.map_err(Into::into)?;
        let bytes = chunk.as_ref();
        file.write_all(bytes).await.map_err(write_err)?;
        written += bytes.len() as u64;
    }
    file.flush().await.map_err(write_err)?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    #[test]
    fn target_path_joins_decoded_file_name() {
        let dir = Path::new("/media/pen");
        let path = target_path("https://cdn.test/files/Wald%20Tiere.gme", dir).unwrap();
        assert_eq!(path, PathBuf::from("/media/pen/Wald Tiere.gme"));
    }

    #[test]
    fn target_path_rejects_missing_or_escaping_names() {
        let dir = Path::new("/tmp");
        assert!(matches!(
            target_path("https://cdn.test/files/", dir),
            Err(FetchError::InvalidLocator(_))
        ));
        assert!(matches!(
            target_path("https://cdn.test/files/..%2Fetc%2Fpasswd", dir),
            Err(FetchError::InvalidLocator(_))
        ));
    }

    #[tokio::test]
    async fn write_stream_writes_all_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.gme");
        let chunks = stream::iter(vec![
            Ok::<_, FetchError>(b"GME".to_vec()),
            Ok(vec![0u8; 5]),
        ]);

        let written = write_stream(chunks, &path).await.unwrap();

        assert_eq!(written, 8);
        let contents = std::fs::read(&path).unwrap();
        assert_eq!(&contents[..3], b"GME");
        assert_eq!(contents.len(), 8);
    }

    #[tokio::test]
    async fn write_stream_removes_partial_file_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("b.gme");
        let chunks = stream::iter(vec![
            Ok(b"partial".to_vec()),
            Err(FetchError::Task("connection reset".into())),
        ]);

        let err = write_stream(chunks, &path).await.unwrap_err();

        assert!(matches!(err, FetchError::Task(_)));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn write_stream_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("c.gme");
        let chunks = stream::iter(vec![Ok::<_, FetchError>(b"x".to_vec())]);

        let err = write_stream(chunks, &path).await.unwrap_err();
        assert!(matches!(err, FetchError::Write { .. }));
    }
}
