use http::StatusCode;
use login_flow::LoginError;

/// Helper trait for converting core errors into a response error tuple.
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

impl<T> IntoResponseError<T> for Result<T, LoginError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match e {
                LoginError::AlreadyAuthenticated => StatusCode::BAD_REQUEST,
                LoginError::FlowNotFound => StatusCode::NOT_FOUND,
                LoginError::FlowExpired { .. } => StatusCode::GONE,
                LoginError::FlowUnusable => StatusCode::GONE,
                LoginError::Crypto(_) | LoginError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (status, e.to_string())
        })
    }
}
