#![forbid(unsafe_code)]

use anyhow::{anyhow, bail, Context, Result};

use ftosnap::channel::{CaptureChannel, CommandChannel, ProcessChannel};
use ftosnap::cli::{self, CliOptions};
use ftosnap::config::{default_config_path, FtosnapConfig, OutputFormat};
use ftosnap::driver::FtosDriver;
use ftosnap::extract::TemplateExtractor;
use ftosnap::{logging, output};

/// Pick the command source: flags first, then the config file
fn open_channel(options: &CliOptions, config: &FtosnapConfig) -> Result<Box<dyn CommandChannel>> {
    if let Some(dir) = &options.captures {
        return Ok(Box::new(CaptureChannel::new(dir.clone())));
    }
    if let Some(argv) = &options.exec {
        let channel = ProcessChannel::from_argv(argv).ok_or_else(|| anyhow!("--exec needs a program to run"))?;
        return Ok(Box::new(channel));
    }

    let connection = &config.connection;
    if let Some(dir) = &connection.captures {
        cli::validate_capture_dir(dir)?;
        return Ok(Box::new(CaptureChannel::new(dir.clone())));
    }
    if let Some(argv) = &connection.program {
        let channel = ProcessChannel::from_argv(argv)
            .ok_or_else(|| anyhow!("connection.program must name a program"))?;
        return Ok(Box::new(channel));
    }

    let config_hint = options
        .config_path
        .clone()
        .or_else(default_config_path)
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "the config file".to_string());
    bail!(
        "No command source configured: pass --captures DIR or --exec PROGRAM, or set [connection] in {}",
        config_hint
    )
}

fn main() -> Result<()> {
    let options = cli::parse_args()?;
    logging::init_logging(options.quiet_mode, options.verbose);

    let config = FtosnapConfig::load(options.config_path.as_deref())?;
    let channel = open_channel(&options, &config)?;

    let lenient = options.lenient || config.output.lenient;
    let json_output = options.json_output || config.output.format == OutputFormat::Json;

    let mut driver = FtosDriver::new(channel, TemplateExtractor::new())
        .with_commands(config.commands.clone())
        .lenient(lenient);

    let mut reports = Vec::with_capacity(options.reports.len());
    for kind in &options.reports {
        let report = driver
            .report(*kind, options.interface.as_deref())
            .with_context(|| format!("Failed to collect {} report", kind))?;
        reports.push(report);
    }

    if json_output {
        println!("{}", output::format_json(&reports)?);
    } else {
        print!("{}", output::format_human(&reports));
    }

    Ok(())
}
