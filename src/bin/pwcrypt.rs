use pwcrypt::{unix, Algorithm};

use std::io;
use std::process::ExitCode;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
#[command(infer_subcommands = true)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hash a new password.
    Generate(GenerateArgs),
    /// Check a password against a hash.
    Validate(ValidateArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scheme {
    Md5,
    Apr1,
    Sha256,
    Sha512,
}

impl From<Scheme> for Algorithm {
    fn from(scheme: Scheme) -> Algorithm {
	match scheme {
	    Scheme::Md5 => Algorithm::Md5,
	    Scheme::Apr1 => Algorithm::Md5Apache,
	    Scheme::Sha256 => Algorithm::Sha256,
	    Scheme::Sha512 => Algorithm::Sha512,
	}
    }
}

#[derive(Clone, Debug, Args)]
struct GenerateArgs {
    #[arg(long, short)]
    password: Option<String>,
    #[arg(long, short, value_enum, default_value_t = Scheme::Sha512)]
    scheme: Scheme,
    /// Number of rounds, 0 for the default. Ignored by the MD5 schemes.
    #[arg(long, short, default_value_t = 0)]
    rounds: u32,
    /// Salt length, at most 16.
    #[arg(long, default_value_t = 16)]
    salt_size: usize,
}

#[derive(Clone, Debug, Args)]
struct ValidateArgs {
    #[arg(long, short)]
    password: Option<String>,
    hash: String
}

fn generate(GenerateArgs{ password, scheme, rounds, salt_size }: GenerateArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let pw = prompt_password(password, true)?;
    let hash = unix::create(pw, salt_size, scheme.into(), rounds)?;
    println!("{}", hash);
    Ok(ExitCode::SUCCESS)
}

fn validate(ValidateArgs{ password, hash }: ValidateArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let pw = prompt_password(password, false)?;
    if unix::verify(pw, &hash) {
	println!("valid");
	Ok(ExitCode::SUCCESS)
    } else {
	println!("not valid");
	Ok(ExitCode::FAILURE)
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
	.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
	.with_writer(io::stderr)
	.init();
    let cli = Cli::parse();
    let cmd = cli.command.unwrap_or(Commands::Generate(cli.generate));
    match cmd {
	Commands::Generate(args) => generate(args),
	Commands::Validate(args) => validate(args),
    }
}

fn prompt_password(password: Option<String>, confirm: bool) -> io::Result<String> {
    match password {
	Some(pw) => Ok(pw),
	None if !confirm => rpassword::prompt_password("Password: "),
	None => loop {
	    let pw = rpassword::prompt_password("Enter new password: ")?;
	    let confirmed = rpassword::prompt_password("Retype new password: ")?;
	    if pw == confirmed {
		return Ok(pw)
	    }
	    eprintln!("Error: Passwords don't match!")
	}
    }
}
