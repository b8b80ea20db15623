use clap::Parser;
use shader_prep::error::PrepError;
use shader_prep::models::config::PrepConfig;
use shader_prep::preprocessor::Preprocessor;
use shader_prep::shader::{
    assemble, compile_path, move_output, patch_header, ShaderType,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    about = "Expand #define/#include macros in a vertex or pixel shader and assemble it",
    long_about = None
)]
struct Cli {
    /// Shader source to process
    input: PathBuf,

    /// Where the assembled shader is moved to
    output: Option<PathBuf>,

    /// Assemble to a C header instead of a binary object
    #[arg(short = 'H', long)]
    header: bool,

    /// Only expand macros, writing the result to OUTPUT or stdout
    #[arg(short = 'E', long)]
    preprocess_only: bool,

    /// Path to a JSON file with preprocessor limits
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), PrepError> {
    if !cli.input.exists() {
        return Err(PrepError::error(&format!(
            "Input file at \"{}\" does not exist!",
            cli.input.display()
        )));
    }
    let config = PrepConfig::load_or_default(cli.config.as_deref())?;
    let mut preprocessor = Preprocessor::with_config(config);

    if cli.preprocess_only {
        return match &cli.output {
            Some(output) => Ok(preprocessor.expand_to_path(&cli.input, output)?),
            None => {
                let stdout = std::io::stdout();
                let mut lock = stdout.lock();
                preprocessor.expand(&cli.input, &mut lock)?;
                lock.flush()?;
                Ok(())
            }
        };
    }

    if let Some(output) = &cli.output {
        remove_stale_output(output);
    }

    let shader_type = ShaderType::detect(&cli.input)?
        .ok_or_else(|| PrepError::error("Invalid shader format specified."))?;
    let compiled = compile_path(&cli.input, shader_type, cli.header)?;

    preprocessor.expand_to_path(&cli.input, &compiled)?;
    assemble(&compiled, shader_type, cli.header)?;

    let output = match &cli.output {
        Some(output) => move_output(&compiled, output),
        None => compiled,
    };
    if cli.header {
        patch_header(&cli.input, &output, shader_type)?;
    }

    log::info!("Shader compiled and updated successfully!");
    Ok(())
}

/// Drop the previous build of this shader. Returns whether a file was removed.
fn remove_stale_output(output: &Path) -> bool {
    match std::fs::remove_file(output) {
        Ok(()) => true,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => {
            log::warn!("Could not remove \"{}\": {}", output.display(), e);
            false
        }
    }
}
