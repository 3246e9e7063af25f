use clap::{Arg, ArgMatches, Command};

pub const APP_NAME: &str = "academic-portal";

pub type CommandResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// 命令注册器特trait，各模块实现此trait来注册命令
pub trait CommandModule {
    /// 获取模块名称
    fn module_name(&self) -> &'static str;

    /// 注册模块的子命令
    fn register_commands(&self) -> Vec<Command>;

    /// 处理模块命令
    fn handle_command(&self, command_name: &str, matches: &ArgMatches) -> CommandResult;
}

/// 命令注册器
#[derive(Default)]
pub struct CommandRegistry {
    modules: Vec<Box<dyn CommandModule + Send + Sync>>,
}

impl CommandRegistry {
    /// 创建新的命令注册器
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册模块
    pub fn register_module(&mut self, module: Box<dyn CommandModule + Send + Sync>) -> &mut Self {
        self.modules.retain(|m| m.module_name() != module.module_name());
        self.modules.push(module);
        self
    }

    /// 构建完整的命令行应用
    pub fn build_app(&self) -> Command {
        let mut app = Command::new(APP_NAME)
            .version(env!("CARGO_PKG_VERSION"))
            .about("Campus Connect 学术门户服务 / academic portal server")
            .subcommand_required(true)
            .arg_required_else_help(true);

        // 添加内置的server命令；未给出的参数沿用配置文件
        app = app.subcommand(
            Command::new("server")
                .about("启动 Web 服务器")
                .arg(
                    Arg::new("host")
                        .long("host")
                        .value_name("HOST")
                        .help("设置服务器主机地址"),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .value_parser(clap::value_parser!(u16))
                        .help("设置服务器端口"),
                )
                .arg(
                    Arg::new("workers")
                        .short('w')
                        .long("workers")
                        .value_name("WORKERS")
                        .value_parser(clap::value_parser!(usize))
                        .help("设置工作线程数"),
                )
                .arg(
                    Arg::new("debug")
                        .short('d')
                        .long("debug")
                        .help("启用调试模式")
                        .action(clap::ArgAction::SetTrue),
                ),
        );

        app = app
            .subcommand(Command::new("version").about("显示版本信息"))
            .subcommand(Command::new("probe-db").about("测试数据库连接 / run the database probe once"));

        // 添加各模块注册的命令
        for module in &self.modules {
            for command in module.register_commands() {
                app = app.subcommand(command);
            }
        }

        app
    }

    /// 处理命令
    pub fn handle_command(&self, command_name: &str, matches: &ArgMatches) -> CommandResult {
        // 查找对应的模块来处理命令
        for module in &self.modules {
            if module
                .register_commands()
                .iter()
                .any(|command| command.get_name() == command_name)
            {
                return module.handle_command(command_name, matches);
            }
        }

        Err(format!("未找到处理命令 '{}' 的模块", command_name).into())
    }

    /// 获取所有注册的模块名称
    pub fn get_registered_modules(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.module_name()).collect()
    }
}

/// 版本信息
pub fn handle_version_command() {
    println!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl CommandModule for Echo {
        fn module_name(&self) -> &'static str {
            "echo"
        }

        fn register_commands(&self) -> Vec<Command> {
            vec![Command::new("echo")]
        }

        fn handle_command(&self, command_name: &str, _matches: &ArgMatches) -> CommandResult {
            match command_name {
                "echo" => Ok(()),
                _ => Err("unexpected".into()),
            }
        }
    }

    #[test]
    fn test_builtin_and_module_commands() {
        let mut registry = CommandRegistry::new();
        registry.register_module(Box::new(Echo));

        let matches = registry
            .build_app()
            .try_get_matches_from([APP_NAME, "server", "-p", "9000"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "server");
        assert_eq!(sub.get_one::<u16>("port"), Some(&9000));
        assert_eq!(sub.get_one::<String>("host"), None);

        let matches = registry.build_app().try_get_matches_from([APP_NAME, "echo"]).unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert!(registry.handle_command(name, sub).is_ok());
        assert!(registry.handle_command("missing", sub).is_err());
        assert_eq!(registry.get_registered_modules(), vec!["echo"]);
    }
}
