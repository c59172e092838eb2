use actix_web::dev::ServiceRequest;
use actix_web_httpauth::extractors::bearer::BearerAuth;
use tracing::warn;

use crate::config::config;
use crate::types::error::AppError;

/// Bearer check for the `/admin` scope against the configured admin key.
pub async fn validate_admin_token(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    match config() {
        Some(cfg) if tokens_match(credentials.token(), &cfg.admin_key) => Ok(req),
        Some(_) => {
            warn!("Rejected admin request to {}", req.path());
            Err((AppError::Unauthorized.into(), req))
        }
        None => {
            warn!("Admin request to {} before configuration was loaded", req.path());
            Err((AppError::Unauthorized.into(), req))
        }
    }
}

/// Length-independent comparison so response timing does not leak a key prefix.
fn tokens_match(given: &str, expected: &str) -> bool {
    let given = given.as_bytes();
    let expected = expected.as_bytes();
    let mut diff = given.len() ^ expected.len();
    for (i, b) in expected.iter().enumerate() {
        diff |= usize::from(given.get(i).copied().unwrap_or(0) ^ b);
    }
    diff == 0 && !expected.is_empty()
}

#[cfg(test)]
mod tests {
    use super::tokens_match;

    #[test]
    fn matching_tokens() {
        assert!(tokens_match("secret", "secret"));
        assert!(!tokens_match("secreT", "secret"));
        assert!(!tokens_match("secret-longer", "secret"));
        assert!(!tokens_match("", ""));
    }
}
