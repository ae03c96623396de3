use anyhow::Result;
use bitbucket::commands::list::parse_param;
use bitbucket::{commands::*, config::Config, config::ConfigOverrides, constants, logging};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bitbucket")]
#[command(about = "A cli tool for the Bitbucket Server REST API")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
    config: String,

    /// Base URL of the REST API (overrides BITBUCKET_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Bearer token (overrides BITBUCKET_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Print body and headers of failed responses
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a pull request
    Pr {
        /// Project key
        #[arg(short, long)]
        project: String,

        /// Repository slug
        #[arg(short, long)]
        repo: String,

        /// Source branch
        #[arg(long)]
        from: String,

        /// Target branch
        #[arg(long, default_value = constants::pr::DEFAULT_TARGET_BRANCH)]
        to: String,

        /// Title for the pull request
        #[arg(short, long)]
        title: String,

        /// Description for the pull request
        #[arg(long, default_value = "")]
        description: String,
    },

    /// List every item of a paginated endpoint as JSON lines
    List {
        /// API path below the versioned root (e.g. `projects`) or an absolute URL
        path: String,

        /// Query parameter as key=value (can be specified multiple times)
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Maximum number of items to print
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose)?;

    let overrides = ConfigOverrides {
        url: cli.url,
        token: cli.token,
    };
    let config = Config::resolve(&cli.config, &overrides)?;
    let context = CommandContext::new(config, cli.debug);

    match cli.command {
        Commands::Pr {
            project,
            repo,
            from,
            to,
            title,
            description,
        } => {
            PrCommand {
                project,
                repository: repo,
                source_branch: from,
                target_branch: to,
                title,
                description,
            }
            .execute(&context)?;
        }
        Commands::List {
            path,
            params,
            limit,
        } => {
            ListCommand {
                path,
                params,
                limit,
            }
            .execute(&context)?;
        }
    }

    Ok(())
}
