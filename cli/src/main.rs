//! richpost CLI - render rich-text posts and work with a blog content API
//!
//! Renders stored document trees to HTML, text, Markdown, or JSON, and reads
//! or publishes posts through a GraphQL endpoint or a local JSON store.

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use richpost::render::{self, JsonFormat, RenderOptions};
use richpost::source::{
    ContentSource, GraphQlSource, InMemorySource, PageRequest, PostBody, PostDraft, SourceConfig,
    DEFAULT_PER_PAGE,
};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use time::OffsetDateTime;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Render rich-text blog posts and work with a content API
#[derive(Parser)]
#[command(
    name = "richpost",
    version,
    about = "Render rich-text blog posts",
    long_about = "richpost - rich-text document renderer and blog content client.\n\n\
                  Renders content API document trees to HTML, plain text, Markdown, or JSON,\n\
                  and lists, shows, or publishes posts."
)]
struct Cli {
    /// Log progress at info level (otherwise RUST_LOG decides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON document file
    Render {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "html")]
        format: OutputFormat,

        /// Omit class attributes from HTML
        #[arg(long)]
        no_classes: bool,

        /// Fail on node kinds without a rendering rule
        #[arg(long)]
        strict: bool,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Show a post by slug
    Show {
        /// Post slug
        slug: String,

        /// Body format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// List posts, newest first
    #[command(visible_alias = "ls")]
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Posts per page
        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        per_page: u32,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Create and publish a post
    Publish {
        /// Post title (the slug is derived from it)
        #[arg(long)]
        title: String,

        /// Author name
        #[arg(long)]
        author: String,

        /// Short summary shown in listings
        #[arg(long)]
        excerpt: String,

        /// Body text
        #[arg(long)]
        body: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show version information
    Version,
}

/// Where posts come from
#[derive(Args, Debug)]
struct SourceArgs {
    /// GraphQL endpoint of the content API
    #[arg(long, env = "RICHPOST_ENDPOINT")]
    endpoint: Option<String>,

    /// API token sent as a bearer token
    #[arg(long, env = "RICHPOST_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Local JSON store of posts (takes precedence over --endpoint)
    #[arg(long)]
    store: Option<PathBuf>,
}

/// Output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// HTML fragment
    Html,
    /// Plain text
    Text,
    /// Markdown
    #[value(alias = "md")]
    Markdown,
    /// Wire-format JSON
    Json,
}

/// An opened content source.
enum Backend {
    Remote(GraphQlSource),
    Local {
        source: InMemorySource,
        path: PathBuf,
    },
}

impl Backend {
    fn open(args: &SourceArgs) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(path) = &args.store {
            debug!("Using local store {}", path.display());
            return Ok(Backend::Local {
                source: InMemorySource::from_path(path)?,
                path: path.clone(),
            });
        }

        let endpoint = args
            .endpoint
            .as_deref()
            .ok_or("no content source: pass --endpoint (or set RICHPOST_ENDPOINT) or --store")?;
        let mut config = SourceConfig::new(endpoint)?;
        if let Some(token) = &args.token {
            config = config.with_token(token.as_str());
        }
        debug!("Using endpoint {}", config.endpoint());
        Ok(Backend::Remote(GraphQlSource::new(config)))
    }

    fn source(&self) -> &dyn ContentSource {
        match self {
            Backend::Remote(source) => source,
            Backend::Local { source, .. } => source,
        }
    }

    /// Write local changes back to disk.
    fn persist(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Backend::Local { source, path } = self {
            source.save(path)?;
        }
        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Render {
            input,
            output,
            format,
            no_classes,
            strict,
            compact,
        } => {
            let pb = create_spinner("Parsing document...");

            let doc = richpost::parse_file(&input)?;
            pb.set_message("Rendering...");

            let mut options = RenderOptions::new().with_classes(!no_classes);
            if strict {
                options = options.strict();
            }
            render::check_document(&doc, &options)?;

            let rendered = match format {
                OutputFormat::Json => {
                    let json_format = if compact {
                        JsonFormat::Compact
                    } else {
                        JsonFormat::Pretty
                    };
                    render::to_json(&doc, json_format)?
                }
                other => render_document(&doc, other, &options)?,
            };

            pb.finish_and_clear();
            write_output(output.as_ref(), &rendered)?;

            if let Some(path) = output {
                println!(
                    "{} Rendered to {:?}: {}",
                    "✓".green().bold(),
                    format,
                    path.display()
                );
            }
        }

        Commands::Show {
            slug,
            format,
            source,
        } => {
            let backend = Backend::open(&source)?;
            let pb = create_spinner("Fetching post...");
            let post = backend.source().fetch_post(&slug)?;
            pb.finish_and_clear();

            let Some(post) = post else {
                println!("{} Post not found.", "!".yellow().bold());
                return Ok(());
            };

            println!("{}", post.title.cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Author".bold(), post.author);
            println!("{}: {}", "Published".bold(), format_date(post.published_at));
            println!();

            let body = render_body(&post.body, format)?;
            write_output(None, &body)?;
        }

        Commands::List {
            page,
            per_page,
            json,
            source,
        } => {
            let backend = Backend::open(&source)?;
            let pb = create_spinner("Fetching posts...");
            let listing = backend
                .source()
                .fetch_posts(PageRequest::new(page, per_page))?;
            pb.finish_and_clear();

            if json {
                write_output(None, &serde_json::to_string_pretty(&listing.posts)?)?;
                return Ok(());
            }

            if listing.is_empty() {
                println!("{} No posts found", "!".yellow().bold());
            }

            for post in &listing.posts {
                println!("{}  {}", post.title.bold(), post.slug.dimmed());
                println!(
                    "  {} · {}",
                    post.author,
                    format_date(post.published_at).dimmed()
                );
                if !post.excerpt.is_empty() {
                    println!("  {}", post.excerpt);
                }
                println!();
            }

            println!(
                "Page {} of {} ({} posts)",
                listing.request.page(),
                listing.total_pages().max(1),
                listing.total
            );
        }

        Commands::Publish {
            title,
            author,
            excerpt,
            body,
            source,
        } => {
            let draft = PostDraft::new(title, author, excerpt, body)?;
            let backend = Backend::open(&source)?;

            let pb = create_spinner("Publishing post...");
            let published = backend.source().create_and_publish(&draft)?;
            backend.persist()?;
            pb.finish_and_clear();

            println!(
                "{} Published {} ({:?})",
                "✓".green().bold(),
                published.slug,
                published.stage
            );
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

/// Render a post body, preferring the structured document and falling back
/// to the representation the source already rendered.
fn render_body(body: &PostBody, format: OutputFormat) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(doc) = body.document() {
        let rendered = match format {
            OutputFormat::Json => render::to_json(doc, JsonFormat::Pretty)?,
            other => render_document(doc, other, &RenderOptions::new())?,
        };
        return Ok(rendered);
    }

    let fallback = match format {
        OutputFormat::Html => body.html.as_deref(),
        OutputFormat::Markdown => body.markdown.as_deref(),
        OutputFormat::Text | OutputFormat::Json => body.text.as_deref(),
    };
    Ok(fallback.unwrap_or_default().to_string())
}

fn render_document(
    doc: &richpost::RichText,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        OutputFormat::Html => render::try_render_html(doc, options)?,
        OutputFormat::Text => render::to_text(doc),
        OutputFormat::Markdown => render::to_markdown(doc),
        OutputFormat::Json => render::to_json(doc, JsonFormat::Pretty)?,
    })
}

fn format_date(date: Option<OffsetDateTime>) -> String {
    let format = time::macros::format_description!("[month repr:long] [day padding:none], [year]");
    date.and_then(|d| d.format(format).ok())
        .unwrap_or_else(|| "Not published".to_string())
}

fn print_version() {
    println!("{} {}", "richpost".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Rich-text blog post renderer and content API client");
    println!();
    println!("Output formats: HTML, text, Markdown, JSON");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use richpost::RichText;
    use time::macros::datetime;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_args() {
        let cli = Cli::try_parse_from([
            "richpost",
            "render",
            "post.json",
            "--format",
            "md",
            "--no-classes",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                input,
                format,
                no_classes,
                strict,
                ..
            } => {
                assert_eq!(input, PathBuf::from("post.json"));
                assert_eq!(format, OutputFormat::Markdown);
                assert!(no_classes);
                assert!(!strict);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_parse_list_defaults() {
        let cli = Cli::try_parse_from(["richpost", "list", "--store", "posts.json"]).unwrap();
        match cli.command {
            Commands::List {
                page,
                per_page,
                source,
                ..
            } => {
                assert_eq!(page, 1);
                assert_eq!(per_page, DEFAULT_PER_PAGE);
                assert_eq!(source.store, Some(PathBuf::from("posts.json")));
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_publish_requires_fields() {
        assert!(Cli::try_parse_from(["richpost", "publish", "--title", "T"]).is_err());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(
            format_date(Some(datetime!(2024-03-05 10:00 UTC))),
            "March 5, 2024"
        );
        assert_eq!(format_date(None), "Not published");
    }

    #[test]
    fn test_render_body_prefers_document() {
        let body = PostBody {
            json: Some(RichText::from_plain_text("from tree")),
            text: Some("from text".to_string()),
            ..Default::default()
        };
        assert_eq!(render_body(&body, OutputFormat::Text).unwrap(), "from tree");

        let body = PostBody {
            html: Some("<p>cached</p>".to_string()),
            ..Default::default()
        };
        assert_eq!(
            render_body(&body, OutputFormat::Html).unwrap(),
            "<p>cached</p>"
        );
        assert_eq!(render_body(&body, OutputFormat::Text).unwrap(), "");
    }

    #[test]
    fn test_strict_render_fails_for_every_format() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("post.json");
        fs::write(
            &input,
            r#"{"children": [{"type": "paragraph", "children": [{"type": "mention", "children": [{"text": "@sam"}]}]}]}"#,
        )
        .unwrap();

        for format in ["html", "text", "md", "json"] {
            let output = dir.path().join(format!("out.{format}"));
            let cli = Cli::try_parse_from([
                "richpost",
                "render",
                input.to_str().unwrap(),
                "--format",
                format,
                "--strict",
                "--output",
                output.to_str().unwrap(),
            ])
            .unwrap();
            let err = run(cli).unwrap_err();
            assert!(err.to_string().contains("mention"), "{format}: {err}");
            assert!(!output.exists());

            let cli = Cli::try_parse_from([
                "richpost",
                "render",
                input.to_str().unwrap(),
                "--format",
                format,
                "--output",
                output.to_str().unwrap(),
            ])
            .unwrap();
            run(cli).unwrap();
            assert!(output.exists());
        }
    }

    #[test]
    fn test_local_backend_publish_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        let args = SourceArgs {
            endpoint: None,
            token: None,
            store: Some(path.clone()),
        };

        let backend = Backend::open(&args).unwrap();
        let draft = PostDraft::new("Stored Post", "Sam", "e", "b").unwrap();
        backend.source().create_and_publish(&draft).unwrap();
        backend.persist().unwrap();

        let reopened = Backend::open(&args).unwrap();
        assert!(reopened.source().fetch_post("stored-post").unwrap().is_some());
    }

    #[test]
    fn test_backend_requires_a_source() {
        let args = SourceArgs {
            endpoint: None,
            token: None,
            store: None,
        };
        assert!(Backend::open(&args).is_err());
    }
}
