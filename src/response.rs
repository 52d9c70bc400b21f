use axum::Json;
use serde::Serialize;

/// Uniform response body: `code` is 0 on success, a stable error code otherwise.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: u32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            code: 0,
            message: "success".into(),
            data: Some(data),
        })
    }
}

impl ApiResponse<()> {
    pub fn empty() -> Json<Self> {
        Json(Self {
            code: 0,
            message: "success".into(),
            data: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_has_code_zero() {
        let Json(body) = ApiResponse::ok(vec![1, 2, 3]);
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""code":0"#));
        assert!(json.contains(r#""data":[1,2,3]"#));
    }

    #[test]
    fn empty_envelope_omits_data() {
        let Json(body) = ApiResponse::empty();
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("data"));
    }
}
