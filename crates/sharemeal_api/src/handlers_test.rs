#[cfg(test)]
mod tests {
    use crate::handlers::{session_user, SESSION_HEADER};
    use axum::http::{HeaderMap, HeaderValue};

    #[test]
    fn test_session_user_reads_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_user(&headers), None);

        headers.insert(SESSION_HEADER, HeaderValue::from_static(" user-demo-1 "));
        assert_eq!(session_user(&headers).as_deref(), Some("user-demo-1"));
    }

    #[test]
    fn test_blank_session_is_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_static("   "));
        assert_eq!(session_user(&headers), None);
    }
}
