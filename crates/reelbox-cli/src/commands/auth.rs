use super::prompts::{confirm, prompt_password, value_or_prompt};
use super::{report, Context};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use reelbox_client::{ApiError, RegistrationForm};
use serde_json::json;

pub async fn run_login(username: Option<String>, output: &Output) -> Result<()> {
    let ctx = Context::load()?;
    let username = value_or_prompt(username, "Username")?;
    let password = prompt_password("Password")?;

    if username.is_empty() || password.is_empty() {
        return Err(eyre!("Please fill in all fields"));
    }

    let auth = ctx
        .client
        .auth()
        .login(&username, &password)
        .await
        .map_err(|e| match e {
            ApiError::Status { .. } => eyre!("Login failed. Please check your credentials."),
            other => report("Login failed", other),
        })?;

    output.success(format!("Signed in as {}", username));
    output.data(&json!({ "userId": auth.user_id, "user": auth.user }));
    Ok(())
}

pub async fn run_register(username: Option<String>, email: Option<String>, output: &Output) -> Result<()> {
    let ctx = Context::load()?;
    let form = RegistrationForm {
        username: value_or_prompt(username, "Username")?,
        email: value_or_prompt(email, "Email")?,
        password: prompt_password("Password")?,
        confirm_password: prompt_password("Confirm password")?,
    };

    // Checked locally first so a bad form never reaches the backend
    form.validate().map_err(|e| eyre!("{}", e))?;

    let auth = ctx
        .client
        .auth()
        .register(&form)
        .await
        .map_err(|e| report("Registration failed. Please try again.", e))?;

    output.success(format!("Account created. Signed in as {}", form.username));
    output.data(&json!({ "userId": auth.user_id, "user": auth.user }));
    Ok(())
}

pub async fn run_logout(yes: bool, output: &Output) -> Result<()> {
    let ctx = Context::load()?;

    // A half pair still gets cleared
    let stored = ctx
        .session()
        .has_stored_credentials()
        .await
        .map_err(|e| eyre!("Failed to read stored session: {}", e))?;
    if !stored {
        output.info("Not signed in");
        return Ok(());
    }

    if !confirm(yes, "Sign out?")? {
        output.info("Cancelled");
        return Ok(());
    }

    ctx.client.auth().logout().await.map_err(|e| report("Logout failed", e))?;
    output.success("Signed out");
    Ok(())
}
