mod app;
mod cli;
mod controller;
mod error;
mod event;
mod logging;
mod model;
mod service;
mod storage;
mod theme;
mod ui;

use std::io;
use std::panic;
use std::sync::Arc;

use clap::Parser;
use ratatui::DefaultTerminal;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use app::App;
use cli::{Cli, Commands};
use controller::TaskListController;
use logging::LogTarget;
use service::{HttpTaskService, TaskService};
use storage::config::{self, Settings};
use theme::Theme;

/// 启动 TUI 界面
fn run_tui(settings: &Settings, service: Arc<dyn TaskService>) -> io::Result<()> {
    let runtime = Runtime::new()?;

    let controller = TaskListController::new(service);
    let mut app = App::new(
        controller,
        runtime.handle().clone(),
        Theme::from_name(&settings.theme),
        settings.api_base.as_str(),
    );

    // 初始化终端
    let mut terminal = ratatui::init();

    // 运行主循环
    let result = run(&mut terminal, &mut app);

    // 恢复终端
    ratatui::restore();

    // 未返回的请求直接丢弃
    runtime.shutdown_background();
    info!("Task tracker exited");

    result
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> io::Result<()> {
    loop {
        // 应用已返回的请求结果
        app.poll_outcomes();

        // 渲染界面
        terminal.draw(|frame| ui::tasks::render(frame, app))?;

        // 处理事件
        if !event::handle_events(app)? {
            break;
        }
    }

    Ok(())
}

/// 执行一次性的任务子命令
fn run_command(command: Commands, service: Arc<dyn TaskService>) -> io::Result<i32> {
    let runtime = Runtime::new()?;
    let code = runtime.block_on(async move {
        match command {
            Commands::List { json } => cli::tasks::list(service, json).await,
            Commands::Add { title } => cli::tasks::add(service, &title.join(" ")).await,
            Commands::Complete { id } => cli::tasks::complete(service, &id).await,
            Commands::Tui | Commands::Config { .. } => 0,
        }
    });
    Ok(code)
}

fn main() -> io::Result<()> {
    // Set up panic hook to restore terminal state on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    // 解析命令行参数
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    // config 命令在配置无效时也要能运行
    if let Commands::Config { set_url } = &command {
        std::process::exit(cli::config::execute(
            cli.backend_url.as_deref(),
            set_url.as_deref(),
        ));
    }

    let settings = match config::load_config()
        .and_then(|config| Settings::from_env(&config, cli.backend_url.as_deref()))
    {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run `task-tracker config` to inspect the configuration.");
            std::process::exit(1);
        }
    };

    let target = match command {
        Commands::Tui => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    if let Err(e) = logging::init(target, &settings.log_level) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }
    info!(api_base = %settings.api_base, ?command, "Starting task tracker");

    let service: Arc<dyn TaskService> = match HttpTaskService::new(&settings) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            warn!(error = %e, "Failed to build HTTP client");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match command {
        Commands::Tui => run_tui(&settings, service),
        other => {
            let code = run_command(other, service)?;
            std::process::exit(code);
        }
    }
}
