use anyhow::Result;
use clap::Parser;
use ghapi::commands::{self, Config};
use std::io::Write;
use std::path::PathBuf;

/// ghapi - minimal GitHub REST API client
///
/// Query repository metadata and releases, and download release assets.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
/// This is useful for accessing private repositories or avoiding rate limits.
///
/// Examples:
///   ghapi latest owner/repo                 # Show the latest release
///   ghapi download owner/repo tool.tar.gz   # Download an asset of the latest release
#[derive(Parser, Debug)]
#[command(author, version = env!("GHAPI_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GitHub token used for authentication
    #[arg(
        long = "token",
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        value_name = "TOKEN",
        global = true
    )]
    pub token: Option<String>,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print "owner/repo" for a GitHub URL (prints nothing for other URLs)
    Project(ProjectArgs),

    /// Show repository description and homepage
    Repo(RepoArgs),

    /// Show the latest release
    Latest(RepoArgs),

    /// List releases (first page only)
    Releases(RepoArgs),

    /// Download a release asset
    Download(DownloadArgs),
}

#[derive(clap::Args, Debug)]
pub struct ProjectArgs {
    /// Any URL
    #[arg(value_name = "URL")]
    pub url: String,
}

#[derive(clap::Args, Debug)]
pub struct RepoArgs {
    /// The GitHub repository in the format "owner/repo"
    #[arg(value_name = "OWNER/REPO")]
    pub repo: String,
}

#[derive(clap::Args, Debug)]
pub struct DownloadArgs {
    /// The GitHub repository in the format "owner/repo"
    #[arg(value_name = "OWNER/REPO")]
    pub repo: String,

    /// Name of the asset to download
    #[arg(value_name = "ASSET")]
    pub asset: String,

    /// Release tag to download from (defaults to the latest release)
    #[arg(long, short = 't', value_name = "TAG")]
    pub tag: Option<String>,

    /// Output file (defaults to the asset name in the current directory)
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = Config::new(cli.token, cli.api_url);
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Project(args) => commands::project(&config, &args.url, &mut stdout)?,
        Commands::Repo(args) => commands::repo(&config, &args.repo, &mut stdout).await?,
        Commands::Latest(args) => commands::latest(&config, &args.repo, &mut stdout).await?,
        Commands::Releases(args) => commands::releases(&config, &args.repo, &mut stdout).await?,
        Commands::Download(args) => {
            let path = commands::download(
                &config,
                &args.repo,
                &args.asset,
                args.tag.as_deref(),
                args.output,
            )
            .await?;
            writeln!(stdout, "{}", path.display())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_repo_parsing() {
        let cli = Cli::try_parse_from(["ghapi", "repo", "owner/repo"]).unwrap();
        match cli.command {
            Commands::Repo(args) => {
                assert_eq!(args.repo, "owner/repo");
            }
            _ => panic!("Expected Repo command"),
        }
        assert_eq!(cli.api_url, None);
    }

    #[test]
    fn test_cli_download_parsing() {
        let cli = Cli::try_parse_from([
            "ghapi", "download", "owner/repo", "tool.tar.gz", "--tag", "v1.0.0", "-o", "/tmp/t",
        ])
        .unwrap();
        match cli.command {
            Commands::Download(args) => {
                assert_eq!(args.repo, "owner/repo");
                assert_eq!(args.asset, "tool.tar.gz");
                assert_eq!(args.tag.as_deref(), Some("v1.0.0"));
                assert_eq!(args.output, Some(PathBuf::from("/tmp/t")));
            }
            _ => panic!("Expected Download command"),
        }
    }

    #[test]
    fn test_cli_global_options_parsing() {
        let cli = Cli::try_parse_from([
            "ghapi",
            "--api-url",
            "http://localhost:8080",
            "latest",
            "owner/repo",
            "--token",
            "abc",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(cli.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        let result = Cli::try_parse_from(["ghapi", "owner/repo"]);
        assert!(result.is_err());
    }
}
