use anyhow::Context;

use bookstall_app::modules;
use bookstall_kernel::settings::Settings;
use bookstall_kernel::{InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookstall settings")?;

    bookstall_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "bookstall bootstrap starting"
    );

    let pool = bookstall_db::connect(&settings.database).await?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);

    let ctx = InitCtx {
        settings: &settings,
        db: &pool,
    };

    registry.init_modules(&ctx).await?;
    bookstall_db::apply_migrations(&pool, &registry.collect_migrations()).await?;
    registry.start_modules(&ctx).await?;

    bookstall_http::start_server(&registry, &ctx).await?;

    registry.stop_modules().await?;

    Ok(())
}
