//! 程序入口：初始化日志、解析参数并执行一次同步

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::fmt::SubscriberBuilder;

use locale_sync::cli::{render_file_report, Cli};
use locale_sync::run_sync;

#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 日志写到 stderr，stdout 只留给进度行或 JSON 汇总
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let _ = SubscriberBuilder::default()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();

    let config = cli.to_config();
    let summary = run_sync(&config, |report| {
        if !cli.json {
            for line in render_file_report(report) {
                println!("{}", line);
            }
        }
    })?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut {
                ok: true,
                data: &summary
            })?
        );
    }

    tracing::info!(
        "同步完成：更新 {}，无变更 {}，失败 {}",
        summary.updated,
        summary.unchanged,
        summary.failed
    );
    Ok(())
}
