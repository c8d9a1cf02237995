use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // 提前加载 .env，使得 RUST_LOG / CONFIG_PATH 等环境变量生效
    dotenv().ok();
    // LOG_FORMAT=json 时输出结构化日志
    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        common::utils::logging::init_logging_json();
    } else {
        common::utils::logging::init_logging_default();
    }
}

fn main() -> std::process::ExitCode {
    let cli = cli::Cli::parse();
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    // Panic 钩子：捕获异常并输出错误日志
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "petrack", event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "petrack", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(service = "petrack", event = "start", %service_id, pid, version, "command starting");

    // Ctrl+C 中止当前命令
    rt.block_on(async move {
        tokio::select! {
            res = cli::run(cli) => match res {
                Ok(()) => std::process::ExitCode::SUCCESS,
                Err(e) => {
                    error!(service = "petrack", event = "command_failed", error = %e, "command failed");
                    eprintln!("error: {e:#}");
                    std::process::ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "petrack", event = "interrupted", %service_id, pid, "received Ctrl+C, aborting");
                std::process::ExitCode::from(130)
            }
        }
    })
}
