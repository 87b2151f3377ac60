use serde::Serialize;

/// Envelope for every JSON response of the API:
///
/// ```json
/// {
///   "success": true,
///   "data": { "code": "K3X9QZ", "expires_at": "2025-03-03T11:00:00Z" },
///   "message": "Session started"
/// }
/// ```
///
/// Error responses carry `success: false` and a default `data` value.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Error response; `data` is `T::default()`.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}
