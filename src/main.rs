use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

// Use library instead of local modules
use account_acl::{
    AclConfig, AclError, ActorRole, PermissionEvaluator, Seniority, UserDirectory, UserId,
    UserPermissions,
};

#[derive(Parser)]
#[command(name = "account-acl", version, about = "Check edit/delete permissions between account users")]
struct Cli {
    /// JSON config file (defaults plus ACCOUNT_ACL_ADMIN_ROLE otherwise)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decide edit/delete for one actor and one target
    Check {
        /// Users file (.json or .csv)
        #[arg(long)]
        users: PathBuf,
        #[arg(long)]
        actor: u64,
        /// Role name of the actor (unset = default role)
        #[arg(long)]
        role: Option<String>,
        /// Role kind given directly: admin | member
        #[arg(long, conflicts_with = "role")]
        role_kind: Option<ActorRole>,
        #[arg(long)]
        target: u64,
    },
    /// Decide edit/delete for one actor against every loaded user
    Matrix {
        #[arg(long)]
        users: PathBuf,
        #[arg(long)]
        actor: u64,
        #[arg(long)]
        role: Option<String>,
        #[arg(long, conflicts_with = "role")]
        role_kind: Option<ActorRole>,
        /// Print the matrix as JSON
        #[arg(long)]
        json: bool,
    },
}

/// JSON shape of `matrix --json`
#[derive(Serialize)]
struct MatrixReport {
    actor: UserId,
    role: ActorRole,
    seniority: Seniority,
    permissions: Vec<UserPermissions>,
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = exit_code(&err);
            if code == 2 {
                eprintln!("❌ internal error: {:#}", err);
            } else {
                eprintln!("❌ {:#}", err);
            }
            ExitCode::from(code)
        }
    }
}

/// 2 for missing membership data (never a denial), 1 for everything else
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<AclError>() {
        Some(acl) if acl.is_precondition_violation() => 2,
        _ => 1,
    }
}

/// `--role-kind` wins; otherwise the role name goes through the config mapping
fn actor_role(config: &AclConfig, role: Option<&str>, role_kind: Option<ActorRole>) -> ActorRole {
    role_kind.unwrap_or_else(|| config.resolve_role(role))
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_acl=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Check { users, actor, role, role_kind, target } => {
            let directory = UserDirectory::from_path(&users)?;
            let actor = directory.require(UserId(actor))?;
            let target = directory.require(UserId(target))?;

            let acl = PermissionEvaluator::new(actor, actor_role(&config, role.as_deref(), role_kind));
            let perms = acl.permissions_for(target)?;

            println!("edit: {}", verdict(perms.can_edit));
            println!("delete: {}", verdict(perms.can_delete));
        }
        Command::Matrix { users, actor, role, role_kind, json } => {
            let directory = UserDirectory::from_path(&users)?;
            let actor = directory.require(UserId(actor))?;
            let acl = PermissionEvaluator::new(actor, actor_role(&config, role.as_deref(), role_kind));

            let mut permissions = Vec::with_capacity(directory.len());
            for target in directory.users() {
                let perms = acl
                    .permissions_for(target)
                    .with_context(|| format!("Failed to evaluate target {}", target.user_id))?;
                permissions.push(perms);
            }

            if json {
                let report = MatrixReport {
                    actor: acl.actor_id(),
                    role: acl.role(),
                    seniority: actor.seniority(),
                    permissions,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "actor {} ({}, {})",
                    acl.actor_id(),
                    acl.role().as_str(),
                    actor.seniority().as_str()
                );
                for perms in &permissions {
                    println!(
                        "  {:>8}  edit: {:<5}  delete: {}",
                        perms.target,
                        verdict(perms.can_edit),
                        verdict(perms.can_delete)
                    );
                }
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AclConfig> {
    match path {
        Some(path) => AclConfig::from_file(path),
        None => Ok(AclConfig::from_env()),
    }
}

fn verdict(allowed: bool) -> &'static str {
    if allowed {
        "allow"
    } else {
        "deny"
    }
}
