use clap::ArgMatches;
use std::error::Error;

use academic_portal::comm::config_validator::AppConfiguration;
use academic_portal::comm::enhanced_config::EnhancedConfigManager;
use academic_portal::modules::functions::db_test::DbProbe;
use academic_portal::{handle_version_command, init_commands, init_tracing, AppBootstrap, AppConfig};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // 初始化所有模块的命令
    let registry = init_commands();

    // 构建命令行应用
    let matches: ArgMatches = registry.build_app().get_matches();

    match matches.subcommand() {
        Some(("server", sub_matches)) => {
            handle_server_command(sub_matches).await?;
        }
        Some(("version", _)) => {
            handle_version_command();
        }
        Some(("probe-db", _)) => {
            handle_probe_command().await?;
        }
        Some((command_name, sub_matches)) => {
            // 尝试使用模块处理命令
            if let Err(e) = registry.handle_command(command_name, sub_matches) {
                eprintln!("处理命令 '{}' 时出错: {}", command_name, e);
                std::process::exit(1);
            }
        }
        _ => {
            // subcommand_required(true) 已保证不会走到这里
            eprintln!("未知命令，请使用 --help 查看可用命令");
            std::process::exit(1);
        }
    }

    Ok(())
}

fn load_config() -> Result<AppConfiguration, Box<dyn Error>> {
    let config_manager = EnhancedConfigManager::new()?;
    let app_config = config_manager.get_app_config().clone();
    init_tracing(&app_config);
    config_manager.print_config_summary();
    Ok(app_config)
}

async fn handle_server_command(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let app_config = load_config()?;

    // 命令行参数覆盖配置文件
    let mut config = AppConfig::from(&app_config);
    if let Some(host) = matches.get_one::<String>("host") {
        config.host = host.clone();
    }
    if let Some(port) = matches.get_one::<u16>("port") {
        config.port = *port;
    }
    if let Some(workers) = matches.get_one::<usize>("workers") {
        config.workers = Some(*workers);
    }
    config.debug |= matches.get_flag("debug");

    // 启动应用
    AppBootstrap::new(app_config).with_config(config).run().await?;

    Ok(())
}

async fn handle_probe_command() -> Result<(), Box<dyn Error>> {
    let app_config = load_config()?;
    let report = DbProbe::from_config(&app_config).run().await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
