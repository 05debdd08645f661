use clap::{Parser, Subcommand};
use folio::config::{self, BuildPaths, SiteConfig};
use folio::{blog, output, resume, site};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Static site generator for a resume page and its blog")]
#[command(long_about = "\
Static site generator for a resume page and its blog

The resume is rendered from JSON into marked regions of a hand-written
index.html. Markdown posts become one HTML page each plus a posts.json
manifest for client-side search.

Project structure:

  ./
  ├── folio.toml                   # Optional config (see gen-config)
  ├── index.html                   # Host page with <!-- X_START --> markers
  ├── content/
  │   ├── resume.json              # Resume data
  │   └── posts/
  │       └── hello.md             # Post (YAML front matter + Markdown)
  └── blog/                        # Generated
      ├── posts.json
      └── posts/hello.html

Front matter (all optional):
  title:    defaults to the file name
  date:     normalized to YYYY-MM-DD when recognizable
  excerpt:  used for the page description and search
  tags:     list or comma-separated string

Run 'folio gen-config' to generate a documented folio.toml.")]
#[command(version)]
struct Cli {
    /// Project root (where folio.toml and index.html live)
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rebuild the resume and the blog
    Build,
    /// Render resume.json into the host page
    Resume,
    /// Render posts and the posts.json manifest
    Blog,
    /// Validate resume, host page and posts without writing
    Check,
    /// Print a stock folio.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let (site_config, paths) = load_project(&cli.root)?;
            println!("==> Building {}", paths.root.display());
            let report = site::build(&paths, &site_config)?;

            println!("==> Stage 1: Resume {}", paths.display(&paths.resume));
            output::print_resume_output(&report.resume, &paths);

            println!("==> Stage 2: Blog {}", paths.display(&paths.posts_dir));
            output::print_blog_output(&report.blog, &paths);

            println!("==> Build complete");
        }
        Command::Resume => {
            let (_, paths) = load_project(&cli.root)?;
            let report = resume::build(&paths)?;
            output::print_resume_output(&report, &paths);
        }
        Command::Blog => {
            let (site_config, paths) = load_project(&cli.root)?;
            let report = blog::build(&paths, &site_config)?;
            output::print_blog_output(&report, &paths);
        }
        Command::Check => {
            let (site_config, paths) = load_project(&cli.root)?;
            println!("==> Checking {}", paths.root.display());
            let report = site::check(&paths, &site_config)?;
            output::print_check_output(&report, &paths);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `folio.toml`, resolve paths and size the thread pool.
fn load_project(root: &Path) -> Result<(SiteConfig, BuildPaths), config::ConfigError> {
    let site_config = config::load_config(root)?;
    let paths = BuildPaths::resolve(root, &site_config.paths)?;
    init_thread_pool(&site_config.processing);
    Ok((site_config, paths))
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
