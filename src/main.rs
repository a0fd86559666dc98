use anyhow::Result;
use spr_gwa::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();
    let serve = std::env::args().skip(1).any(|a| a == "--serve");

    // 初始化日志
    logger::init_with_verbose(config.verbose_logging);

    // 初始化并运行应用
    let app = App::initialize(config).await?;
    if serve {
        app.serve_messages().await?;
    } else {
        app.run().await?;
    }

    Ok(())
}
