use anyhow::Result;
use clap::Parser;
use glasswindow::debug_if_enabled;
use glasswindow::plugin::{GlassPlugin, PLUGIN_NAME};
use glasswindow::services::{ChannelNotificationSink, DryRunRenderer};
use glasswindow::{Config, FileConfigSource, WindowInfo};
use std::sync::Arc;
use tokio::signal;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::{error, info, warn};

/// Окна по умолчанию, если хост не передал ни одного заголовка
const DRY_RUN_WINDOWS: &[&str] = &[
    "Terminal - dry_run",
    "Browser - dry_run",
    "Editor - dry_run",
    "Game - dry_run",
];

#[derive(Parser, Debug)]
#[command(name = "glasswindow-host")]
#[command(about = "Симулятор хоста для плагина glasswindow: проходы рендера и перезагрузка правил по SIGHUP")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "glasswindow.toml")]
    config: String,

    /// Заголовок окна для проходов рендера (можно указать несколько раз)
    #[arg(short, long = "window")]
    windows: Vec<String>,

    /// Интервал между проходами рендера
    #[arg(long, default_value_t = 1000)]
    frame_interval_ms: u64,

    /// Уровень логирования (по умолчанию из конфигурации)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(&args.config)?;
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, &config.logging.format)?;

    info!("Запуск glasswindow-host v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {}", args.config);

    // Хост показывает уведомления сам
    let (notification_tx, mut notification_rx) = mpsc::unbounded_channel();
    let notification_handle = tokio::spawn(async move {
        while let Some(notification) = notification_rx.recv().await {
            warn!("[уведомление] {}", notification);
        }
    });

    let renderer = Arc::new(DryRunRenderer::new());
    let plugin = Arc::new(GlassPlugin::load(
        Box::new(FileConfigSource::new(&args.config)),
        Arc::new(ChannelNotificationSink::new(notification_tx)),
        renderer.clone(),
    )?);

    let windows: Vec<WindowInfo> = if args.windows.is_empty() {
        warn!("Заголовки окон не заданы - используем окна dry-run");
        DRY_RUN_WINDOWS
            .iter()
            .map(|title| WindowInfo::new(*title).with_class("DryRun"))
            .collect()
    } else {
        args.windows.iter().map(WindowInfo::new).collect()
    };

    let render_plugin = plugin.clone();
    let frame_interval = Duration::from_millis(args.frame_interval_ms.max(1));
    let render_handle = tokio::spawn(async move {
        let mut ticker = interval(frame_interval);
        loop {
            ticker.tick().await;
            let mut applied = 0usize;
            for window in &windows {
                if render_plugin.on_render_trigger(window).apply {
                    applied += 1;
                }
            }
            debug_if_enabled!("Проход рендера: эффект для {} из {} окон", applied, windows.len());
        }
    });

    let reload_handle = spawn_reload_listener(plugin.clone());

    info!("{} загружен, ожидание Ctrl+C", PLUGIN_NAME);

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Получен сигнал завершения (Ctrl+C)");
        }
        Err(err) => {
            error!("Ошибка при ожидании сигнала завершения: {}", err);
        }
    }

    info!("Завершение работы...");

    render_handle.abort();
    reload_handle.abort();

    let shutdown_timeout = Duration::from_secs(5);
    let shutdown_result = tokio::time::timeout(shutdown_timeout, async {
        let _ = render_handle.await;
        let _ = reload_handle.await;
    })
    .await;

    match shutdown_result {
        Ok(_) => info!("Все задачи завершили работу корректно"),
        Err(_) => warn!("Таймаут при завершении задач"),
    }

    info!("Эффект применён {} раз", renderer.applied_count());

    drop(plugin);
    notification_handle.abort();

    info!("glasswindow-host завершил работу");
    Ok(())
}

/// Перезагрузка конфигурации по SIGHUP
#[cfg(unix)]
fn spawn_reload_listener(plugin: Arc<GlassPlugin>) -> tokio::task::JoinHandle<()> {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut hangup = match signal(SignalKind::hangup()) {
            Ok(hangup) => hangup,
            Err(e) => {
                error!("Не удалось подписаться на SIGHUP: {}", e);
                return;
            }
        };

        while hangup.recv().await.is_some() {
            info!("Получен SIGHUP - перезагрузка конфигурации");
            if let Err(e) = plugin.reload_from_source() {
                error!("Перезагрузка не удалась, остаются прежние правила: {}", e);
            }
        }
    })
}

#[cfg(not(unix))]
fn spawn_reload_listener(_plugin: Arc<GlassPlugin>) -> tokio::task::JoinHandle<()> {
    warn!("Перезагрузка по SIGHUP недоступна на этой платформе");
    tokio::spawn(async {})
}

fn init_tracing(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    let json = format == "json";

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer().compact()))
        .init();

    Ok(())
}
