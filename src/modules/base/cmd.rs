use clap::{Arg, ArgMatches, Command};
use serde_json::json;

use crate::command_registry::{CommandModule, CommandResult};
use crate::modules::auth::session::SHARED_PASSWORD;
use crate::modules::base::seed;
use crate::route_registry::RouteRegistry;

/// Base模块的命令处理器
pub struct PortalCommands;

impl PortalCommands {
    fn users(format: &str) -> CommandResult {
        match format {
            "json" => {
                let users: Vec<_> = seed::USERS
                    .iter()
                    .map(|user| json!({ "email": user.email, "name": user.name, "role": user.role }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&users)?);
            }
            "text" => {
                println!("演示账号 (密码均为 \"{}\"):", SHARED_PASSWORD);
                for user in seed::USERS.iter() {
                    println!("  {:<8} {:<24} {}", user.role, user.email, user.name);
                }
            }
            _ => return Err(format!("不支持的格式: {}", format).into()),
        }
        Ok(())
    }
}

impl CommandModule for PortalCommands {
    fn module_name(&self) -> &'static str {
        "base"
    }

    fn register_commands(&self) -> Vec<Command> {
        vec![
            Command::new("users")
                .about("列出演示账号 / list demo accounts")
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_name("FORMAT")
                        .help("输出格式 (json|text)")
                        .default_value("text"),
                ),
            Command::new("routes").about("显示路由注册信息"),
        ]
    }

    fn handle_command(&self, command_name: &str, matches: &ArgMatches) -> CommandResult {
        match command_name {
            "users" => {
                let format = matches
                    .get_one::<String>("format")
                    .map(String::as_str)
                    .unwrap_or("text");
                Self::users(format)
            }
            "routes" => {
                RouteRegistry::portal().print_routes_info();
                Ok(())
            }
            _ => Err(format!("未知命令: {}", command_name).into()),
        }
    }
}
