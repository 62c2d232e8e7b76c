//! 日志工具模块
//!
//! 初始化订阅者，并提供启动 / 结束时的汇总输出

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::orchestrator::CrawlStats;

/// 初始化日志（默认 info，可通过 RUST_LOG 覆盖）
///
/// 重复调用不会报错，方便测试里多次初始化。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题库抓取模式");
    info!("🌐 站点: {}", config.base_url);
    info!("📂 数据目录: {}", config.data_dir.display());
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &CrawlStats, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 抓取完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!(
        "📁 分类: {} (失败 {})",
        stats.categories, stats.failed_categories
    );
    info!("🔹 主题: {}", stats.topics);
    info!("✅ 已保存: {}", stats.saved);
    info!("⚠️ 跳过: {}", stats.skipped);
    info!("{}", "=".repeat(60));
    info!("\n数据已保存至: {}", config.data_dir.display());
}
