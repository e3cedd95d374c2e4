use clap::{Parser, Subcommand};
use dotfiles_installer::repository::DEFAULT_HOST;
use dotfiles_installer::{
    Category, FailurePolicy, GitFetcher, InstallPaths, InstallPlan, InstallReport, Installer,
    InstallerConfig, Manifest, Outcome, Platform,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "dotfiles")]
#[command(about = "Clone editor libraries and fonts listed in a repositories manifest")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Clone every repository in the manifest into place
    Install {
        /// Manifest file with a `repositories:` mapping
        #[arg(short, long, default_value = "repos.yml")]
        config: PathBuf,

        /// Base install directory (defaults to ~/.emacs.d)
        #[arg(short, long)]
        target: Option<PathBuf>,

        /// Host prefix for short-form identifiers
        #[arg(long)]
        host: Option<String>,

        /// Abort on the first failure instead of collecting failures
        #[arg(long)]
        strict: bool,

        /// Kill a single clone after this many seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Platform to install for (linux, macos, windows). Detected if omitted
        #[arg(long)]
        platform: Option<Platform>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the installation plan for a manifest as JSON
    Plan {
        /// Manifest file with a `repositories:` mapping
        #[arg(short, long, default_value = "repos.yml")]
        config: PathBuf,

        /// Host prefix for short-form identifiers
        #[arg(long)]
        host: Option<String>,
    },

    /// Show resolved install locations
    Info {
        /// Base install directory (defaults to ~/.emacs.d)
        #[arg(short, long)]
        target: Option<PathBuf>,

        /// Platform to report for. Detected if omitted
        #[arg(long)]
        platform: Option<Platform>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether every requested item ended up in place
async fn run(cli: Cli) -> dotfiles_installer::Result<bool> {
    match cli.command {
        Commands::Install {
            config,
            target,
            host,
            strict,
            timeout,
            platform,
            json,
        } => {
            let manifest = Manifest::load(&config)?;
            let plan = InstallPlan::from_manifest(&manifest);

            let host_prefix = resolve_host(host, &manifest);
            let policy = if strict {
                FailurePolicy::FailFast
            } else {
                FailurePolicy::BestEffort
            };

            let paths = resolve_paths(target, platform)?;
            let fetcher = GitFetcher::new()
                .with_timeout(timeout.map(Duration::from_secs))
                .with_progress(!json);
            let installer = Installer::with_fetcher(
                paths,
                InstallerConfig {
                    host_prefix,
                    policy,
                },
                fetcher,
            );

            let report = installer.install_into(&plan).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_summary(installer.paths(), &report);
            }

            Ok(!report.has_failures())
        }

        Commands::Plan { config, host } => {
            let manifest = Manifest::load(&config)?;
            let plan = InstallPlan::from_manifest(&manifest);
            let host_prefix = resolve_host(host, &manifest);
            println!(
                "{}",
                serde_json::to_string_pretty(&plan.resolve(&host_prefix))?
            );
            Ok(true)
        }

        Commands::Info { target, platform } => {
            let paths = resolve_paths(target, platform)?;
            println!("Dotfiles Installer Information");
            println!("==============================");
            println!("Platform:         {}", paths.platform());
            println!("Home directory:   {}", paths.home().display());
            println!("Target directory: {}", paths.target().display());
            println!("Lisp directory:   {}", paths.lisp_dir().display());
            match paths.font_dir() {
                Some(dir) => println!("Font directory:   {}", dir.display()),
                None => println!("Font directory:   (unsupported)"),
            }
            println!("Default host:     {}", DEFAULT_HOST);
            println!();
            println!("Supported categories:");
            for category in Category::all() {
                println!("  - {} ({})", category.name(), category.display_name());
            }
            Ok(true)
        }
    }
}

/// `--host` wins over the manifest's `host`, which wins over the default
fn resolve_host(flag: Option<String>, manifest: &Manifest) -> String {
    flag.or_else(|| manifest.host.clone())
        .unwrap_or_else(|| DEFAULT_HOST.to_string())
}

fn resolve_paths(
    target: Option<PathBuf>,
    platform: Option<Platform>,
) -> dotfiles_installer::Result<InstallPaths> {
    let paths = InstallPaths::new(platform.unwrap_or_else(Platform::detect))?;
    Ok(match target {
        Some(target) => paths.with_target(target),
        None => paths,
    })
}

fn print_summary(paths: &InstallPaths, report: &InstallReport) {
    if report.target_missing {
        println!(
            "Target directory {} does not exist. Nothing installed.",
            paths.target().display()
        );
        return;
    }

    for notice in &report.notices {
        println!("{}", notice);
    }

    for item in &report.items {
        match &item.outcome {
            Outcome::Cloned => println!("  cloned   {} -> {}", item.id, item.destination.display()),
            Outcome::AlreadyPresent => {
                println!("  present  {} ({})", item.id, item.destination.display())
            }
            Outcome::Failed { message } => println!("  failed   {}: {}", item.id, message),
        }
    }

    for font in &report.fonts {
        println!("  font     {}", font.display());
    }

    let failed = report.failures().count();
    println!(
        "{} cloned, {} already present, {} failed, {} fonts installed",
        report.count(&Outcome::Cloned),
        report.count(&Outcome::AlreadyPresent),
        failed,
        report.fonts.len()
    );
}
