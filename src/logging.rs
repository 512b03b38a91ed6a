use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Инициализирует вывод логов в stderr.
///
/// Уровень задаётся `RUST_LOG` (по умолчанию `info`). Повторная инициализация,
/// например из тестов, не считается ошибкой.
pub fn init() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init()
    {
        if e.to_string().contains("already been set") {
            return Ok(());
        }
        return Err(e.into());
    }

    Ok(())
}
