//! User-friendly login error messages

use clinic_core::callback::STORAGE_FAILED_CODE;

/// Convert an error code from the login redirect to a message
pub fn login_error_message(code: &str) -> String {
    match code {
        "google_auth_failed" => "Google sign-in failed. Please try again.".to_string(),
        STORAGE_FAILED_CODE => {
            "Signed in, but the session could not be saved in this browser.".to_string()
        }
        // Unknown codes come straight from the server
        other => format!("Sign-in failed ({other})."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_codes() {
        assert_eq!(
            login_error_message("google_auth_failed"),
            "Google sign-in failed. Please try again."
        );
        assert!(login_error_message(STORAGE_FAILED_CODE).contains("could not be saved"));
        assert_eq!(login_error_message("denied"), "Sign-in failed (denied).");
    }
}
