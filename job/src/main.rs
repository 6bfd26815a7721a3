use common::utils::redis_util::RedisUtil;
use common::AppConfig;
use ledger::AppState;

mod scheduler;
mod tasks;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 嵌入配置文件（编译时加载）
    const DEFAULT_CONFIG: &str = include_str!("../config.toml");

    let config = AppConfig::from_file_or_embedded("job/config", DEFAULT_CONFIG)
        .or_else(|_| AppConfig::from_env())
        .expect("配置加载失败");

    // 初始化日志（使用配置的日志级别）
    std::env::set_var("RUST_LOG", &config.log.level);
    common::init_logger();

    log::info!("启动定时任务服务...");

    // 初始化数据库连接
    let rb = common::connect_db(&config.database).expect("数据库连接池初始化失败");
    if let Err(e) = common::config::db_conf::test_connection(&rb).await {
        log::error!("数据库连接测试失败: {}", e);
    }

    // 初始化 Redis 连接池
    let redis = RedisUtil::from_url(&config.redis.url).expect("Redis初始化失败");

    // 显式构造上下文, 传入各任务
    let state = AppState::new(config, rb, redis);

    let (handle, shutdown) = scheduler::shutdown_channel();
    let order_task = tokio::spawn(tasks::order_expire_task::run(
        state.clone(),
        shutdown.clone(),
    ));
    let vip_task = tokio::spawn(tasks::vip_expire_task::run(state.clone(), shutdown));

    // 等待退出信号
    tokio::signal::ctrl_c().await?;
    log::info!("收到退出信号，正在关闭服务...");
    handle.shutdown();

    // 等任务在各自的等待边界观察到信号后退出
    let _ = order_task.await;
    let _ = vip_task.await;

    log::info!("定时任务服务已退出");
    Ok(())
}
