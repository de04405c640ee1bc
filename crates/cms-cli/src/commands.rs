//! Subcommands and their dispatch to resolvers.

use anyhow::{Context, Result};
use clap::Subcommand;
use cms_runtime::headless_cms::SettingsResolvers;
use cms_runtime::page_builder::{CategoryInput, CategoryResolvers};
use cms_runtime::{RequestContext, Response};
use serde::Serialize;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Page-builder categories (permission `pb.category`)
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Headless-CMS settings (permission `cms.manage.settings`)
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// Show one category
    Get { slug: String },

    /// Show one category without permission checks
    GetBySlug { slug: String },

    /// List visible categories
    List,

    /// Create a category owned by the acting identity
    Create {
        slug: String,
        #[command(flatten)]
        fields: CategoryFields,
    },

    /// Patch a category
    Update {
        slug: String,
        /// Rename the category
        #[arg(long, value_name = "SLUG")]
        new_slug: Option<String>,
        #[command(flatten)]
        fields: CategoryFields,
    },

    /// Delete a category and print it
    Delete { slug: String },
}

#[derive(clap::Args, Debug, Default)]
pub struct CategoryFields {
    /// Display name
    #[arg(long)]
    name: Option<String>,

    /// URL
    #[arg(long)]
    url: Option<String>,

    /// Layout as JSON
    #[arg(long, value_name = "JSON")]
    layout: Option<String>,
}

impl CategoryFields {
    fn into_input(self, slug: Option<String>) -> Result<CategoryInput> {
        let layout = self
            .layout
            .map(|raw| {
                serde_json::from_str::<serde_json::Value>(&raw)
                    .context("--layout is not valid JSON")
            })
            .transpose()?;

        Ok(CategoryInput {
            id: None,
            name: self.name,
            slug,
            url: self.url,
            layout,
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Report whether the CMS is installed
    IsInstalled,

    /// Install the CMS
    Install,
}

/// Runs `command` and prints its response.
///
/// Returns `true` for an `ok` response.
pub async fn run(command: Command, ctx: &RequestContext) -> Result<bool> {
    match command {
        Command::Category(cmd) => {
            let resolvers = CategoryResolvers::new();
            match cmd {
                CategoryCommand::Get { slug } => emit(resolvers.get_category(ctx, &slug).await),
                CategoryCommand::GetBySlug { slug } => {
                    emit(resolvers.get_category_by_slug(ctx, &slug).await)
                }
                CategoryCommand::List => emit(resolvers.list_categories(ctx).await),
                CategoryCommand::Create { slug, fields } => {
                    let input = fields.into_input(Some(slug))?;
                    emit(resolvers.create_category(ctx, input).await)
                }
                CategoryCommand::Update {
                    slug,
                    new_slug,
                    fields,
                } => {
                    let input = fields.into_input(new_slug)?;
                    emit(resolvers.update_category(ctx, &slug, input).await)
                }
                CategoryCommand::Delete { slug } => {
                    emit(resolvers.delete_category(ctx, &slug).await)
                }
            }
        }
        Command::Settings(cmd) => {
            let resolvers = SettingsResolvers::new();
            match cmd {
                SettingsCommand::IsInstalled => emit(resolvers.is_installed(ctx).await),
                SettingsCommand::Install => emit(resolvers.install(ctx).await),
            }
        }
    }
}

fn emit<T: Serialize>(response: Response<T>) -> Result<bool> {
    let json = serde_json::to_string_pretty(&response).context("failed to encode response")?;
    println!("{json}");
    Ok(response.is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_build_input() {
        let fields = CategoryFields {
            name: Some("News".to_string()),
            url: None,
            layout: Some(r#"{"name":"static"}"#.to_string()),
        };
        let input = fields.into_input(Some("news".to_string())).unwrap();

        assert_eq!(input.slug(), Some("news"));
        assert_eq!(input.name.as_deref(), Some("News"));
        assert_eq!(input.layout, Some(serde_json::json!({ "name": "static" })));
    }

    #[test]
    fn invalid_layout_is_rejected() {
        let fields = CategoryFields {
            layout: Some("{not json".to_string()),
            ..CategoryFields::default()
        };
        assert!(fields.into_input(None).is_err());
    }
}
