mod cmd;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, print_error};

/// subpack - per-user installer for prebuilt toolchains
#[derive(Parser)]
#[command(name = "subpack")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Log what each step is doing
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Install packages (`name` or `name@version`)
  Install {
    /// Packages to install; lists the catalog when empty
    packages: Vec<String>,
  },

  /// Remove packages and their PATH entries
  Remove {
    /// Packages to remove; lists the catalog when empty
    packages: Vec<String>,
  },

  /// Reinstall packages from a fresh download
  Update {
    /// Packages to update; lists the catalog when empty
    packages: Vec<String>,
  },

  /// Run a package's executable, installing it first if needed
  Run {
    /// Package to run (`name` or `name@version`)
    package: String,

    /// Arguments passed to the executable
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
  },

  /// Print a package's install directory
  Pwd {
    /// Package name (`name` or `name@version`)
    package: String,
  },

  /// List available packages and whether they are installed
  List {
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Show host and store information
  Info {
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },
}

fn init_tracing(verbose: bool) {
  let default_directives = if verbose {
    "warn,subpack_lib=info,subpack=info"
  } else {
    "warn"
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let result = match cli.command {
    Commands::Install { packages } => cmd::cmd_install(&packages).map(|_| ExitCode::SUCCESS),
    Commands::Remove { packages } => cmd::cmd_remove(&packages).map(|_| ExitCode::SUCCESS),
    Commands::Update { packages } => cmd::cmd_update(&packages).map(|_| ExitCode::SUCCESS),
    Commands::Run { package, args } => cmd::cmd_run(&package, &args),
    Commands::Pwd { package } => cmd::cmd_pwd(&package).map(|_| ExitCode::SUCCESS),
    Commands::List { output } => cmd::cmd_list(output).map(|_| ExitCode::SUCCESS),
    Commands::Info { output } => cmd::cmd_info(output).map(|_| ExitCode::SUCCESS),
  };

  match result {
    Ok(code) => code,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
