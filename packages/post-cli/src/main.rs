//! `lost-post`: compose and submit a lost item post from the terminal.
//!
//! Reads `POSTS_API_URL`, `POSTS_AUTH_TOKEN` and `POSTS_USER_ID` from the
//! environment (or a `.env` file).

mod config;

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use lost_post::{
    build, Attachment, Composer, CreatePostPipeline, DraftField, HttpTransport, Identity, Post,
    PostsStore, SharedPosts, SubmitError,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "lost-post")]
#[command(about = "Create a lost item post")]
struct Cli {
    /// Post title
    #[arg(long, default_value = "")]
    title: String,

    /// Lost status, e.g. "lost" or "found"
    #[arg(long, default_value = "")]
    status: String,

    /// When the item was lost
    #[arg(long, default_value = "")]
    date: String,

    /// Where the item was lost
    #[arg(long, default_value = "")]
    location: String,

    /// Picture path to send when no image is attached
    #[arg(long, default_value = "")]
    picture_path: String,

    /// Image file to attach; its file name becomes the picture path
    #[arg(long)]
    image: Option<PathBuf>,

    /// Print the assembled payload instead of sending it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lost_post=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(api_url = %config.api_url, user_id = %config.user_id, "Configuration loaded");

    let mut composer = compose(&cli).await?;

    composer.form.touch_all();
    if !composer.form.revalidate().is_empty() {
        print_field_errors(&composer);
        bail!("post is incomplete");
    }

    if cli.dry_run {
        // Nothing is sent, so no token is needed.
        let identity = Identity::new(config.user_id.clone(), "");
        let draft = composer
            .form
            .draft()
            .clone()
            .validated()
            .map_err(|errors| anyhow!("post is incomplete: {errors}"))?;
        let payload = build(&draft, composer.attachments.current(), &identity);
        println!("{}", "Payload (not sent):".bright_yellow().bold());
        for (name, value) in payload.fields() {
            println!("  {name} = {value}");
        }
        if let Some(part) = payload.attachment() {
            println!(
                "  picture = {} ({}, {} bytes)",
                part.file_name,
                part.mime,
                part.content.len()
            );
        }
        return Ok(());
    }

    let identity = Identity::new(config.user_id.clone(), config.auth_token()?);
    let pipeline = CreatePostPipeline::new(
        HttpTransport::new().with_base_url(&config.api_url),
        SharedPosts::new(),
    );

    match pipeline.submit(&mut composer, &identity).await {
        Ok(()) => {
            println!("{}", "✅ Post created".bright_green().bold());
            print_posts(&pipeline.store().posts());
            Ok(())
        }
        Err(SubmitError::Validation(_)) => {
            print_field_errors(&composer);
            bail!("post is incomplete");
        }
        Err(err) => Err(err).context("Failed to submit post"),
    }
}

async fn compose(cli: &Cli) -> Result<Composer> {
    let mut composer = Composer::new();
    composer.form.change(DraftField::Title, cli.title.as_str());
    composer.form.change(DraftField::LostStatus, cli.status.as_str());
    composer.form.change(DraftField::LostDate, cli.date.as_str());
    composer.form.change(DraftField::LostLocation, cli.location.as_str());
    composer.form.change(DraftField::PicturePath, cli.picture_path.as_str());

    if let Some(path) = &cli.image {
        let attachment = Attachment::from_path(path)
            .await
            .with_context(|| format!("Failed to load image {}", path.display()))?;
        attach_image(&mut composer, attachment);
    }

    Ok(composer)
}

/// Select `attachment` and open the panel. The attachment supplies the
/// picture path, so an empty typed one is filled from its file name rather
/// than blocking validation.
fn attach_image(composer: &mut Composer, attachment: Attachment) {
    composer.attachments.set_panel_visible(true);
    if composer.form.value(DraftField::PicturePath).is_empty() {
        composer
            .form
            .change(DraftField::PicturePath, attachment.file_name());
    }
    composer.attachments.select([attachment]);
}

fn print_field_errors(composer: &Composer) {
    println!("{}", "Post is incomplete:".bright_red().bold());
    for field in DraftField::ALL {
        if let Some(message) = composer.form.visible_error(field) {
            println!("  {} {}: {}", "✗".bright_red(), field.label(), message);
        }
    }
}

fn print_posts(posts: &[Post]) {
    println!("{} posts:", posts.len());
    for post in posts {
        println!(
            "  {} {} [{}] {} @ {}",
            "•".bright_cyan(),
            post.title.bold(),
            post.lost_status,
            post.lost_date,
            post.lost_location
        );
    }
}
