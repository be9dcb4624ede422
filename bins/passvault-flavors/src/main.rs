//! PassVault flavors CLI
//!
//! Creates the Xcode build configurations and shared schemes matching the
//! Android product flavors, and checks both platforms agree.

use anyhow::Result;
use clap::{Parser, Subcommand};
use passvault_android::{check_flavor_consistency, GradleBuild, KeystoreProperties};
use passvault_cli::output::{format_count, format_duration, Status};
use passvault_core::config::Config;
use passvault_core::error::{exit_codes, Error};
use passvault_telemetry::{level_for_verbosity, TelemetryConfig, Timer};
use passvault_xcode::sync::{ChangeKind, ConfigScope, SyncReport};
use passvault_xcode::{sync_project, ProjectStatus, SyncOptions, XcodeProject};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "passvault-flavors")]
#[command(about = "Xcode build configurations and schemes for PassVault flavors")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory containing the Xcode project
    #[arg(short = 'C', long, global = true, default_value = ".")]
    project_dir: PathBuf,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update flavor configurations and schemes (default)
    Sync {
        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report configurations and schemes that are missing or out of date
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare the Android flavor declarations with the iOS flavors
    #[command(name = "check-android")]
    CheckAndroid {
        /// Gradle build script of the app module
        #[arg(long)]
        gradle_file: Option<PathBuf>,
        /// Keystore properties file
        #[arg(long)]
        keystore: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let config = match Config::load_from(&cli.project_dir, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            Status::error(&e.to_string());
            std::process::exit(exit_codes::for_error(&e));
        }
    };

    let level = level_for_verbosity(cli.verbose, &config.schema.logging.level);
    passvault_telemetry::init_with_config(TelemetryConfig::with_level(level))?;
    match &config.path {
        Some(path) => tracing::debug!(config = %path.display(), "Loaded configuration"),
        None => tracing::debug!("No configuration file, using defaults"),
    }
    for warning in &config.warnings {
        Status::warning(&warning.to_string());
    }

    let command = cli.command.unwrap_or(Commands::Sync {
        dry_run: false,
        json: false,
    });

    let exit_code = match command {
        Commands::Sync { dry_run, json } => {
            run_sync(&cli.project_dir, &config, dry_run, json, cli.quiet)
        }
        Commands::Status { json } => {
            run_status(&cli.project_dir, &config, json)
        }
        Commands::CheckAndroid { gradle_file, keystore, json } => {
            run_check_android(
                &cli.project_dir,
                &config,
                gradle_file.as_deref(),
                keystore.as_deref(),
                json,
                cli.quiet,
            )
        }
    };

    std::process::exit(exit_code);
}

fn fail(e: &Error) -> i32 {
    Status::error(&e.to_string());
    exit_codes::for_error(e)
}

fn run_sync(project_dir: &Path, config: &Config, dry_run: bool, json: bool, quiet: bool) -> i32 {
    let options = match SyncOptions::from_config(&config.schema) {
        Ok(options) => options.with_dry_run(dry_run),
        Err(e) => return fail(&e),
    };
    let project_path = project_dir.join(&config.schema.xcode.project);

    let timer = Timer::start("sync");
    let report = match sync_project(&project_path, &options) {
        Ok(report) => report,
        Err(e) => return fail(&e),
    };
    let elapsed = timer.stop();

    if json {
        return match serde_json::to_string_pretty(&report) {
            Ok(out) => {
                println!("{}", out);
                exit_codes::SUCCESS
            }
            Err(e) => fail(&e.into()),
        };
    }

    if !quiet {
        Status::header(&format!("Synchronizing {}", project_path.display()));
        print_sync_report(&report);
        println!();
        if dry_run {
            Status::info(&format!(
                "Dry run: {} and {} would be created, nothing written",
                format_count(
                    report.file_references.len(),
                    "settings file reference",
                    "settings file references"
                ),
                format_count(report.created_schemes().count(), "scheme", "schemes"),
            ));
        } else if report.has_changes() {
            Status::success(&format!(
                "Build configurations and schemes created successfully! ({})",
                format_duration(elapsed)
            ));
        } else {
            Status::success("Build configurations and schemes already up to date");
        }
    }
    exit_codes::SUCCESS
}

fn print_sync_report(report: &SyncReport) {
    for change in &report.configurations {
        let verb = match change.kind {
            ChangeKind::Created => "Created",
            ChangeKind::Updated => "Updated",
        };
        let line = match &change.scope {
            ConfigScope::Project => format!("{} project configuration: {}", verb, change.name),
            ConfigScope::Target(target) => {
                format!("{} target configuration for {}: {}", verb, target, change.name)
            }
        };
        match change.kind {
            ChangeKind::Created => Status::created(&line),
            ChangeKind::Updated if change.is_change() => Status::updated(&line),
            ChangeKind::Updated => Status::skipped(&line),
        }
    }

    for scheme in &report.schemes {
        if scheme.created {
            Status::created(&format!("Created scheme: {}", scheme.flavor));
        } else {
            Status::skipped(&format!("Scheme {} already exists, skipping", scheme.flavor));
        }
    }
}

fn run_status(project_dir: &Path, config: &Config, json: bool) -> i32 {
    let options = match SyncOptions::from_config(&config.schema) {
        Ok(options) => options,
        Err(e) => return fail(&e),
    };
    let project_path = project_dir.join(&config.schema.xcode.project);

    let status = match XcodeProject::open(&project_path)
        .and_then(|project| ProjectStatus::inspect(&project, &options))
    {
        Ok(status) => status,
        Err(e) => return fail(&e),
    };

    if json {
        match status.to_json() {
            Ok(out) => println!("{}", out),
            Err(e) => return fail(&e),
        }
    } else {
        status.print();
        println!();
        if status.is_clean() {
            Status::success("Flavor configurations are in sync");
        } else {
            Status::warning("Project is out of sync. Run `passvault-flavors sync` to fix it.");
        }
    }

    if status.is_clean() {
        exit_codes::SUCCESS
    } else {
        exit_codes::VALIDATION_ERROR
    }
}

fn run_check_android(
    project_dir: &Path,
    config: &Config,
    gradle_file: Option<&Path>,
    keystore: Option<&Path>,
    json: bool,
    quiet: bool,
) -> i32 {
    use owo_colors::OwoColorize;

    let gradle_path = gradle_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| project_dir.join(&config.schema.android.gradle_file));
    let keystore_path = keystore
        .map(Path::to_path_buf)
        .unwrap_or_else(|| project_dir.join(&config.schema.android.keystore_properties));

    let build = match GradleBuild::load(&gradle_path) {
        Ok(build) => build,
        Err(e) => return fail(&e),
    };

    let consistency = check_flavor_consistency(&build.flavor_names(), &config.schema.flavors.names);
    let undeclared = build.undeclared_dimensions();
    let unknown_signing = build.undeclared_signing_configs();

    // Signing falls back to the debug key when the file is absent
    let required_keys = build.required_keystore_keys();
    let missing_keys = if keystore_path.is_file() {
        match KeystoreProperties::load(&keystore_path) {
            Ok(props) => Some(props.missing_keys(&required_keys)),
            Err(e) => return fail(&e),
        }
    } else {
        None
    };

    let consistent = consistency.is_consistent()
        && undeclared.is_empty()
        && unknown_signing.is_empty()
        && missing_keys.as_ref().is_none_or(Vec::is_empty);

    if json {
        let out = serde_json::json!({
            "gradle_file": gradle_path,
            "flavor_dimensions": build.flavor_dimensions,
            "product_flavors": build.product_flavors,
            "abi_filters": build.abi_filters,
            "build_types": build.build_types,
            "undeclared_signing_configs": unknown_signing,
            "consistency": consistency,
            "undeclared_dimensions": undeclared,
            "keystore_properties": keystore_path,
            "missing_keystore_keys": missing_keys,
            "consistent": consistent,
        });
        println!("{}", out);
    } else if !quiet {
        println!("{}", "Android Flavors".bold());
        println!();
        for flavor in &build.product_flavors {
            println!(
                "  {} {} {}",
                "•".blue(),
                flavor.name,
                flavor.app_name.as_deref().unwrap_or_default().dimmed()
            );
        }
        println!();
        for build_type in &build.build_types {
            println!(
                "  {} {} {}",
                "•".blue(),
                build_type.name,
                build_type
                    .signing_config
                    .as_deref()
                    .map(|c| format!("signed with {}", c))
                    .unwrap_or_default()
                    .dimmed()
            );
        }
        if !build.abi_filters.is_empty() {
            println!("  {} {}", "ABIs:".dimmed(), build.abi_filters.join(", "));
        }
        println!();

        for name in &consistency.missing_on_ios {
            Status::warning(&format!("Android flavor {} has no iOS configurations", name));
        }
        for name in &consistency.missing_on_android {
            Status::warning(&format!(
                "iOS flavor {} is not declared in {}",
                name,
                gradle_path.display()
            ));
        }
        for (flavor, dimension) in &undeclared {
            Status::warning(&format!(
                "Flavor {} uses undeclared dimension {}",
                flavor, dimension
            ));
        }
        for (build_type, config) in &unknown_signing {
            Status::warning(&format!(
                "Build type {} signs with undeclared signing config {}",
                build_type, config
            ));
        }
        match &missing_keys {
            Some(keys) if !keys.is_empty() => Status::warning(&format!(
                "{} missing in {}: {}",
                format_count(keys.len(), "keystore property", "keystore properties"),
                keystore_path.display(),
                keys.join(", ")
            )),
            Some(_) => {}
            None => Status::info(&format!(
                "{} not found, builds use the debug signing key",
                keystore_path.display()
            )),
        }

        if consistent {
            Status::success("Android and iOS flavors match");
        }
    }

    if consistent {
        exit_codes::SUCCESS
    } else {
        exit_codes::VALIDATION_ERROR
    }
}
