use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use cadoor_config::{AppConfig, ConfigError, OutputFormat};
use cadoor_engine::{DoorDetector, DoorParser, summarize_hardware};
use cadoor_io::DxfFacade;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

mod render;

#[derive(Debug, Parser)]
#[command(name = "cadoor", version, about = "从 DXF 建筑图纸中提取门的清单")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 解析一个 DXF 文件并输出识别到的门
    Run {
        /// DXF 文件路径
        path: PathBuf,
        /// 输出格式：`json` 或其他任意值（文字摘要）
        #[arg(long)]
        output: Option<String>,
        /// 配置文件路径
        #[arg(long)]
        config: Option<PathBuf>,
        /// 附带五金配件汇总
        #[arg(long)]
        hardware: bool,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help / --version 正常退出，其余用法错误一律返回 1
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let Command::Run {
        path,
        output,
        config: config_override,
        hardware,
    } = cli.command;

    let (config, config_error) = match load_configuration(config_override) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    init_logging(&config);
    if let Some(err) = config_error {
        report_config_error(&err);
    }

    let format = output
        .as_deref()
        .map_or(config.output.default_format, OutputFormat::from_flag);
    let include_hardware = hardware || config.output.include_hardware;

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        run(&path, &config, format, include_hardware)
    }));
    match outcome {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(err)) => {
            error!(path = %path.display(), error = %err, "解析图纸失败");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
        Err(_) => {
            error!(path = %path.display(), "解析过程中发生未预期的错误");
            eprintln!("Error: unexpected failure while parsing {}", path.display());
            ExitCode::FAILURE
        }
    }
}

fn run(path: &Path, config: &AppConfig, format: OutputFormat, include_hardware: bool) -> Result<()> {
    info!(path = %path.display(), ?format, "开始解析图纸");
    let parser = DoorParser::open(path, &DxfFacade::new())?;
    let detector = DoorDetector::with_defaults(config.detection.clone());

    let mut result = parser.run(&detector);
    if include_hardware {
        let lines = summarize_hardware(result.doors.iter().map(|door| door.door_type));
        result = result.with_hardware(lines);
    }

    println!("{}", render::render(&result, path, format)?);
    Ok(())
}

/// 显式路径优先，其次环境变量与默认位置。
fn load_configuration(override_path: Option<PathBuf>) -> Result<AppConfig, ConfigError> {
    match override_path {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::discover(),
    }
}

fn report_config_error(err: &ConfigError) {
    match err {
        ConfigError::Io { path, .. } | ConfigError::Parse { path, .. } => {
            warn!(path = %path.display(), error = %err, "加载配置失败，使用内建默认值");
        }
        ConfigError::Context { .. } => {
            warn!(error = %err, "加载配置失败，使用内建默认值");
        }
    }
}

fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if subscriber.try_init().is_err() {
        // 已初始化，忽略
    }
}
