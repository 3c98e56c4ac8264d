//! CLI entry point for journal-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use journal_rs::{ContentLoader, Frontmatter, Post};

#[derive(Parser)]
#[command(name = "journal-rs")]
#[command(version)]
#[command(about = "A markdown renderer for journal-style blogs", long_about = None)]
struct Cli {
    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a markdown file to HTML
    Render {
        /// Markdown file to render
        file: PathBuf,
    },

    /// Print front-matter metadata of a markdown file
    Meta {
        /// Markdown file to inspect
        file: PathBuf,
    },

    /// List posts in a content directory
    List {
        /// Content directory (contains journals/)
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Emit the listing as a JSON manifest
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "journal_rs=debug,info"
    } else {
        "journal_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Render { file } => {
            let content = std::fs::read_to_string(&file)?;
            let name = file.to_string_lossy().replace('\\', "/");
            let post = Post::parse(&content, &name);
            println!("{}", post.content);
            for (num, note) in &post.footnotes {
                println!("<!-- footnote {}: {} -->", num, note);
            }
        }

        Commands::Meta { file } => {
            let content = std::fs::read_to_string(&file)?;
            let (meta, _) = Frontmatter::parse(&content);
            let mut keys: Vec<_> = meta.fields().keys().collect();
            keys.sort();
            for key in keys {
                println!("{} = \"{}\"", key, meta.fields()[key]);
            }
        }

        Commands::List { dir, json } => {
            let loader = ContentLoader::new(&dir);
            let posts = loader.load_posts()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else {
                println!("Posts ({}):", posts.len());
                for post in posts {
                    println!("  {} - {} [{}]", post.date_obj, post.title, post.slug);
                }
            }
        }
    }

    Ok(())
}
