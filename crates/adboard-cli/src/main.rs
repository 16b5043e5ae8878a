mod dashboard;
mod session;

use adboard_client::EntityLevel;
use adboard_core::{DatePreset, DateRange, LocalConfig, Platform};
use adboard_dashboard::RouteGuard;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::session::Context;

#[derive(Debug, Parser)]
#[command(name = "adboard")]
#[command(about = "Marketing dashboard data from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Store a credential issued by the backend
    Login {
        /// Bearer token
        #[arg(long, env = "ADBOARD_TOKEN", hide_env_values = true)]
        token: String,
        #[arg(long)]
        user_id: String,
        /// Mark the session as an administrator
        #[arg(long)]
        admin: bool,
    },
    /// Forget the stored credential and user context
    Logout,
    /// Show which platforms the signed-in user has linked
    Status,
    /// List the ad accounts available on a platform
    Accounts {
        #[arg(long)]
        platform: Platform,
    },
    /// Choose the ad account the dashboard reports on
    SelectAccount {
        #[arg(long)]
        platform: Platform,
        account_id: String,
    },
    /// Show entities with their insights for a date range
    Entities {
        #[arg(long)]
        platform: Platform,
        /// Hierarchy level (ignored for shopify)
        #[arg(long, value_enum, default_value_t = LevelArg::Campaign)]
        level: LevelArg,
        #[command(flatten)]
        range: RangeArgs,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the daily aggregate series for a platform
    Overview {
        #[arg(long)]
        platform: Platform,
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long)]
        json: bool,
    },
    /// Ask the backend to resync a platform, then reload its entities
    Refresh {
        #[arg(long)]
        platform: Platform,
    },
    /// Check whether the stored session may open a route
    Guard {
        #[arg(long, value_enum, default_value_t = GuardArg::Authenticated)]
        route: GuardArg,
        /// Location being opened
        #[arg(default_value = "/")]
        path: String,
    },
}

/// Date selection shared by the reporting commands.
///
/// `--from`/`--to` select a custom range and take precedence over
/// `--preset`. Giving only one of them leaves the range incomplete, which
/// loads nothing.
#[derive(Debug, Clone, Args)]
struct RangeArgs {
    /// today, 7days, 30days, 90days or lifetime
    #[arg(long, default_value = "30days")]
    preset: DatePreset,
    /// Custom range start (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Custom range end (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl RangeArgs {
    fn date_range(&self) -> DateRange {
        if self.from.is_some() || self.to.is_some() {
            DateRange::Custom {
                from: self.from,
                to: self.to,
            }
        } else {
            DateRange::Preset(self.preset)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LevelArg {
    Campaign,
    #[value(alias = "adgroup", alias = "ad-group")]
    Adset,
    Ad,
}

impl From<LevelArg> for EntityLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Campaign => EntityLevel::Campaign,
            LevelArg::Adset => EntityLevel::AdSet,
            LevelArg::Ad => EntityLevel::Ad,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GuardArg {
    Authenticated,
    Admin,
}

impl From<GuardArg> for RouteGuard {
    fn from(guard: GuardArg) -> Self {
        match guard {
            GuardArg::Authenticated => RouteGuard::Authenticated,
            GuardArg::Admin => RouteGuard::Admin,
        }
    }
}

impl Commands {
    /// Commands that only read or write the stored session.
    fn is_local(&self) -> bool {
        matches!(
            self,
            Commands::Login { .. } | Commands::Logout | Commands::Guard { .. }
        )
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("adboard: no command given; see `adboard --help`");
        return Ok(());
    };

    let local = adboard_core::load_local_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(local.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if command.is_local() {
        return run_local(&local, command);
    }

    let ctx = Context::new(adboard_core::load_app_config()?)?;
    let result = match command {
        Commands::Status => dashboard::run_status(&ctx).await,
        Commands::Accounts { platform } => dashboard::run_accounts(&ctx, platform).await,
        Commands::SelectAccount {
            platform,
            account_id,
        } => dashboard::run_select_account(&ctx, platform, &account_id).await,
        Commands::Entities {
            platform,
            level,
            range,
            json,
        } => dashboard::run_entities(&ctx, platform, level.into(), range.date_range(), json).await,
        Commands::Overview {
            platform,
            range,
            json,
        } => dashboard::run_overview(&ctx, platform, range.date_range(), json).await,
        Commands::Refresh { platform } => dashboard::run_refresh(&ctx, platform).await,
        local_command @ (Commands::Login { .. } | Commands::Logout | Commands::Guard { .. }) => {
            run_local(&local, local_command)
        }
    };
    ctx.client.expiry().settle().await;
    result
}

fn run_local(local: &LocalConfig, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Login {
            token,
            user_id,
            admin,
        } => session::run_login(local, &token, &user_id, admin),
        Commands::Logout => session::run_logout(local),
        Commands::Guard { route, path } => session::run_guard(local, route.into(), &path),
        _ => anyhow::bail!("command needs the backend configuration"),
    }
}

#[cfg(test)]
mod tests;
