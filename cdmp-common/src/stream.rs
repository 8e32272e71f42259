//! Stream URLs served by the drive file endpoint

/// Path of the drive download endpoint
pub const DOWNLOAD_PATH: &str = "/api/driveapi/files/download";

/// Build the stream URL for a drive file
///
/// The token travels in the query string because audio elements cannot send
/// an Authorization header.
pub fn stream_url(token: &str, file_id: &str) -> String {
    format!("{}?token={}&fileid={}", DOWNLOAD_PATH, token, file_id)
}

/// Extract the `fileid` parameter from a stream URL
///
/// Returns `None` for URLs without a non-empty `fileid`.
pub fn file_id_from_stream_url(url: &str) -> Option<&str> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "fileid")
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_url_format() {
        assert_eq!(
            stream_url("tok", "abc"),
            "/api/driveapi/files/download?token=tok&fileid=abc"
        );
    }

    #[test]
    fn test_file_id_extraction() {
        let url = stream_url("tok", "abc");
        assert_eq!(file_id_from_stream_url(&url), Some("abc"));
        assert_eq!(file_id_from_stream_url(""), None);
        assert_eq!(file_id_from_stream_url("/x?token=t"), None);
        assert_eq!(file_id_from_stream_url("/x?fileid="), None);
    }
}
