//! Profile commands.

use std::path::Path;

use tatame_app::profile::{AvatarImage, ProfileFields, load_profile, save_profile};
use tatame_app::{AppContext, ViewState};

use super::CliError;

/// Show the stored profile and whether the admin panel is unlocked.
pub async fn show(context: &AppContext) -> Result<(), CliError> {
    let client = context.client()?;
    let user_id = context.user_id()?;

    match load_profile(client, user_id).await? {
        None => println!("Nenhum perfil encontrado."),
        Some(profile) => {
            println!("Nome:  {}", profile.full_name.as_deref().unwrap_or("-"));
            println!("Fone:  {}", profile.phone.as_deref().unwrap_or("-"));
            println!("Faixa: {}", profile.belt.as_deref().unwrap_or("-"));
            println!("Foto:  {}", profile.avatar_url.as_deref().unwrap_or("-"));
            println!("Papel: {}", profile.role);
        }
    }

    if context.view_state() == (ViewState::Authenticated { admin_visible: true }) {
        println!("Painel admin: liberado");
    } else {
        println!("Painel admin: bloqueado 🔒");
    }
    Ok(())
}

/// Save profile fields, optionally replacing the avatar image.
pub async fn save(
    context: &AppContext,
    name: String,
    phone: String,
    belt: String,
    avatar_path: Option<&Path>,
) -> Result<(), CliError> {
    let client = context.client()?;
    let user_id = context.user_id()?;

    let avatar = match avatar_path {
        None => None,
        Some(path) => {
            let bytes = std::fs::read(path).map_err(|source| CliError::FileRead {
                path: path.display().to_string(),
                source,
            })?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            Some(AvatarImage::new(file_name, bytes))
        }
    };

    let fields = ProfileFields {
        full_name: name,
        phone,
        belt,
    };

    let saved = save_profile(client, user_id, fields, avatar).await?;
    println!("Perfil atualizado ✅");
    if let Some(profile) = saved
        && let Some(url) = profile.avatar_url
    {
        println!("Foto: {url}");
    }
    Ok(())
}
