use super::prompts::{confirm, prompt_password};
use super::{report, Context};
use crate::output::Output;
use crate::render;
use crate::ProfileCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use reelbox_client::{check_new_password, ApiError};
use reelbox_models::UserUpdate;

pub async fn run_profile(cmd: ProfileCommands, output: &Output) -> Result<()> {
    let ctx = Context::load()?;
    match cmd {
        ProfileCommands::Show => show(&ctx, output).await,
        ProfileCommands::Update { username, email, password } => update(&ctx, username, email, password, output).await,
        ProfileCommands::Delete { yes } => delete(&ctx, yes, output).await,
    }
}

async fn show(ctx: &Context, output: &Output) -> Result<()> {
    let user = ctx.client.users().me().await.map_err(|e| report("Failed to load profile", e))?;
    output.human(render::user_detail(&user));
    output.data(&user);
    Ok(())
}

async fn update(
    ctx: &Context,
    username: Option<String>,
    email: Option<String>,
    change_password: bool,
    output: &Output,
) -> Result<()> {
    let password = if change_password {
        let password = prompt_password("New password")?;
        let confirmation = prompt_password("Confirm new password")?;
        check_new_password(&password, &confirmation).map_err(|e| eyre!("{}", e))?;
        Some(password)
    } else {
        None
    };

    let update = UserUpdate { username, email, password };
    if update.username.is_none() && update.email.is_none() && update.password.is_none() {
        output.warn("Nothing to update. Pass --username, --email or --password");
        return Ok(());
    }

    let user_id = ctx.client.require_user_id().await.map_err(|e| report("Failed to update profile", e))?;
    let user = ctx
        .client
        .users()
        .update(&user_id, &update)
        .await
        .map_err(|e| report("Failed to update profile", e))?;

    output.success("Profile updated");
    output.human(render::user_detail(&user));
    output.data(&user);
    Ok(())
}

async fn delete(ctx: &Context, yes: bool, output: &Output) -> Result<()> {
    let user_id = ctx.client.require_user_id().await.map_err(|e| report("Failed to delete account", e))?;

    if !confirm(yes, "Delete your account? This cannot be undone.")? {
        output.info("Cancelled");
        return Ok(());
    }

    ctx.client
        .users()
        .delete(&user_id)
        .await
        .map_err(|e| report("Failed to delete account", e))?;

    // The account is gone, so the stored session is useless
    if let Err(e) = ctx.client.auth().logout().await {
        match e {
            ApiError::Storage(err) => output.warn(format!("Account deleted but the stored session could not be cleared: {}", err)),
            other => return Err(report("Failed to sign out", other)),
        }
    }

    output.success("Account deleted");
    Ok(())
}
