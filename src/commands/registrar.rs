//! # Remote Registrar
//!
//! Pushes the full set of loaded command definitions to Discord as the
//! application's global commands. Every call replaces the whole remote set,
//! so commands whose files were deleted disappear remotely too.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::builder::{CreateApplicationCommand, CreateApplicationCommandOption};
use serenity::http::Http;
use serenity::model::application::command::{Command, CommandOptionType};
use std::sync::Arc;

use super::definition::{CommandDefinition, CommandOption, OptionKind};

/// Destination for the loaded command set
#[async_trait]
pub trait CommandRegistrar: Send + Sync {
    /// Replace the remote command set with exactly `definitions`
    async fn register(&self, definitions: &[CommandDefinition]) -> Result<()>;
}

/// Registers commands globally for the configured application
pub struct DiscordRegistrar {
    http: Arc<Http>,
}

impl DiscordRegistrar {
    /// `http` must carry the application id
    /// (see [`Http::new_with_application_id`])
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl CommandRegistrar for DiscordRegistrar {
    async fn register(&self, definitions: &[CommandDefinition]) -> Result<()> {
        info!(
            "Started refreshing {} application (/) commands.",
            definitions.len()
        );

        let remote = to_remote_commands(definitions);
        let registered = Command::set_global_application_commands(&self.http, |commands| {
            for command in remote {
                commands.add_application_command(command);
            }
            commands
        })
        .await?;

        info!(
            "Successfully reloaded {} application (/) commands.",
            registered.len()
        );
        Ok(())
    }
}

/// Build the serenity payloads for a set of definitions
pub fn to_remote_commands(definitions: &[CommandDefinition]) -> Vec<CreateApplicationCommand> {
    definitions.iter().map(to_remote_command).collect()
}

fn to_remote_command(definition: &CommandDefinition) -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name(&definition.name)
        .description(&definition.description);
    for option in &definition.options {
        command.create_option(|remote| fill_option(remote, option));
    }
    command
}

fn fill_option<'a>(
    remote: &'a mut CreateApplicationCommandOption,
    option: &CommandOption,
) -> &'a mut CreateApplicationCommandOption {
    remote
        .name(&option.name)
        .description(&option.description)
        .kind(option_type(option.kind))
        .required(option.required);

    for choice in &option.choices {
        match option.kind {
            OptionKind::Integer => {
                if let Some(value) = choice.value.as_i64().and_then(|v| i32::try_from(v).ok()) {
                    remote.add_int_choice(&choice.name, value);
                }
            }
            OptionKind::Number => {
                if let Some(value) = choice.value.as_f64() {
                    remote.add_number_choice(&choice.name, value);
                }
            }
            _ => {
                if let Some(value) = choice.value.as_str() {
                    remote.add_string_choice(&choice.name, value);
                }
            }
        }
    }
    remote
}

fn option_type(kind: OptionKind) -> CommandOptionType {
    match kind {
        OptionKind::String => CommandOptionType::String,
        OptionKind::Integer => CommandOptionType::Integer,
        OptionKind::Number => CommandOptionType::Number,
        OptionKind::Boolean => CommandOptionType::Boolean,
        OptionKind::User => CommandOptionType::User,
        OptionKind::Channel => CommandOptionType::Channel,
        OptionKind::Role => CommandOptionType::Role,
        OptionKind::Mentionable => CommandOptionType::Mentionable,
        OptionKind::Attachment => CommandOptionType::Attachment,
    }
}
