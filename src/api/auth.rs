use crate::error::Error;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Header set by the upstream identity provider after it authenticates a request
pub const USER_ID_HEADER: &str = "x-user-id";

/// Opaque id of the authenticated user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub String);

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| Error::Unauthorized("Missing user identity".to_string()))?;

        let user_id = value
            .to_str()
            .map_err(|_| Error::Unauthorized("Malformed user identity".to_string()))?
            .trim();

        if user_id.is_empty() {
            return Err(Error::Unauthorized("Missing user identity".to_string()));
        }

        Ok(AuthUser(user_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<AuthUser, Error> {
        let (mut parts, _) = request.into_parts();
        AuthUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_user_header_present() {
        let request = Request::builder()
            .header(USER_ID_HEADER, " alice ")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await.unwrap().id(), "alice");
    }

    #[tokio::test]
    async fn test_user_header_missing_or_blank() {
        let request = Request::builder().body(()).unwrap();
        assert!(matches!(extract(request).await, Err(Error::Unauthorized(_))));

        let request = Request::builder()
            .header(USER_ID_HEADER, "   ")
            .body(())
            .unwrap();
        assert!(matches!(extract(request).await, Err(Error::Unauthorized(_))));
    }
}
