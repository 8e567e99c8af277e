use anyhow::Context;
use clap::Subcommand;
use tuki_core::{Category, CategoryInput};

use super::confirm;
use crate::app::App;
use crate::format::{plural, truncate};

/// Sub-commands available under `admin categories`.
#[derive(Debug, Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List,
    /// Create a category
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        image_url: String,
    },
    /// Update a category; omitted fields keep their current value
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Delete (deactivate) a category
    Delete { id: u64 },
    /// Reactivate a deleted category
    Restore { id: u64 },
}

pub(crate) async fn run_categories(app: &App, command: CategoryCommands) -> anyhow::Result<()> {
    match command {
        CategoryCommands::List => {
            let categories = app.api.categories().await?;
            render_categories(&categories);
        }
        CategoryCommands::Create {
            name,
            description,
            image_url,
        } => {
            let input = CategoryInput::new(&name, &description, &image_url)?;
            let created = app.api.create_category(&input).await?;
            match created {
                Some(category) => println!("Created category {} (#{})", category.name, category.id),
                None => println!("Created category {}", input.nombre),
            }
        }
        CategoryCommands::Update {
            id,
            name,
            description,
            image_url,
        } => {
            let categories = app.api.categories().await?;
            let current = categories
                .iter()
                .find(|c| c.id == id)
                .with_context(|| format!("category {id} not found"))?;
            let input = merged_input(current, name, description, image_url)?;
            app.api.update_category(id, &input).await?;
            println!("Updated category {} (#{id})", input.nombre);
        }
        CategoryCommands::Delete { id } => {
            let message = app.api.delete_category(id).await?;
            confirm(message, &format!("Deleted category #{id}"));
        }
        CategoryCommands::Restore { id } => {
            let message = app.api.restore_category(id).await?;
            confirm(message, &format!("Restored category #{id}"));
        }
    }
    Ok(())
}

/// Overlays the given fields on the current category and validates the result.
fn merged_input(
    current: &Category,
    name: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
) -> Result<CategoryInput, tuki_core::ValidationError> {
    let name = name.unwrap_or_else(|| current.name.clone());
    let description = description.unwrap_or_else(|| current.description.clone());
    let image_url = image_url
        .or_else(|| current.image_url.clone())
        .unwrap_or_default();
    CategoryInput::new(&name, &description, &image_url)
}

fn render_categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories yet.");
        return;
    }

    println!("{:<6}{:<24}{:<40}{}", "ID", "NAME", "DESCRIPTION", "IMAGE");
    for category in categories {
        println!(
            "{:<6}{:<24}{:<40}{}",
            category.id,
            truncate(&category.name, 21),
            truncate(&category.description, 37),
            category.image_url.as_deref().unwrap_or("-")
        );
    }
    println!("\n{}", plural(categories.len(), "category"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bebidas() -> Category {
        Category {
            id: 5,
            name: "Bebidas".into(),
            description: "Frías".into(),
            image_url: Some("https://cdn.tuki.com/bebidas.png".into()),
        }
    }

    #[test]
    fn update_keeps_omitted_fields() {
        let input = merged_input(&bebidas(), Some("Tragos".into()), None, None).unwrap();
        assert_eq!(input.nombre, "Tragos");
        assert_eq!(input.descripcion, "Frías");
        assert_eq!(input.url_imagen, "https://cdn.tuki.com/bebidas.png");
    }

    #[test]
    fn update_needs_an_image_somewhere() {
        let mut category = bebidas();
        category.image_url = None;
        assert!(merged_input(&category, None, None, None).is_err());
        let input = merged_input(&category, None, None, Some("https://cdn.tuki.com/b.png".into()));
        assert!(input.is_ok());
    }

    #[test]
    fn update_still_validates() {
        assert!(merged_input(&bebidas(), Some("  ".into()), None, None).is_err());
    }
}
