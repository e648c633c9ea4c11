use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use crate::navigation::Route;
use reelbox_models::{AuthResponse, LoginRequest, RegisterRequest};
use thiserror::Error;
use tracing::info;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// Sign-up input, checked locally before anything is sent.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if [&self.username, &self.email, &self.password, &self.confirm_password]
            .iter()
            .any(|field| field.is_empty())
        {
            return Err(ValidationError::MissingFields);
        }
        check_new_password(&self.password, &self.confirm_password)?;
        if !is_plausible_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

/// Confirmation must match and the length is counted in characters, not bytes.
pub fn check_new_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort { min: MIN_PASSWORD_LEN });
    }
    Ok(())
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain
                    .char_indices()
                    .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
        }
        _ => false,
    }
}

pub struct Auth<'a> {
    client: &'a ApiClient,
}

impl<'a> Auth<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchange username and password for a session and persist the pair.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.client.post(endpoints::users::login(), &body).await?;
        self.client.session().establish(&response.credentials()).await?;
        info!(user_id = %response.user_id, "Logged in");
        Ok(response)
    }

    /// Create an account; on success the new session is persisted.
    pub async fn register(&self, form: &RegistrationForm) -> Result<AuthResponse, ApiError> {
        form.validate()?;
        let body = RegisterRequest {
            username: form.username.clone(),
            email: form.email.clone(),
            password: form.password.clone(),
        };
        let response: AuthResponse = self.client.post(endpoints::users::create(), &body).await?;
        self.client.session().establish(&response.credentials()).await?;
        info!(user_id = %response.user_id, "Registered new account");
        Ok(response)
    }

    /// Forget the credential pair and go back to the login route.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client.session().clear().await?;
        self.client.navigator().replace(Route::Login);
        info!("Logged out");
        Ok(())
    }
}
