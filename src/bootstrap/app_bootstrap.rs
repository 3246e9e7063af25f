use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing::{error, info, instrument};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::api::openapi;
use crate::comm::config_validator::AppConfiguration;
use crate::command_registry::APP_NAME;
use crate::conf::init_portal_state;
use crate::error::{AppError, AppResult};
use crate::middleware::RouteGuardMiddleware;
use crate::modules::base::state::PortalState;
use crate::modules::functions::db_test::DbProbe;
use crate::route_registry::RouteRegistry;

/// 应用配置结构体
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from(&AppConfiguration::default())
    }
}

impl From<&AppConfiguration> for AppConfig {
    fn from(config: &AppConfiguration) -> Self {
        Self {
            host: config.server_host.clone(),
            port: config.server_port,
            workers: config.server_workers,
            debug: config.server_debug,
        }
    }
}

/// 初始化日志
/// `RUST_LOG` 优先，其次 `logging.level`；`logging.json_format` 切换 bunyan 输出
pub fn init_tracing(config: &AppConfiguration) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging_level));

    let result = if config.logging_json_format {
        let formatting_layer = BunyanFormattingLayer::new(APP_NAME.into(), std::io::stdout);
        Registry::default()
            .with(env_filter)
            .with(JsonStorageLayer)
            .with(formatting_layer)
            .try_init()
    } else {
        Registry::default()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("日志初始化失败 / tracing already initialised: {}", e);
    }
}

/// 挂载门户全部路由：OpenAPI 文档、接口、函数与页面
pub fn configure_portal(cfg: &mut web::ServiceConfig) {
    openapi::register(cfg);
    RouteRegistry::portal().configure(cfg);
}

/// 应用启动器
pub struct AppBootstrap {
    config: AppConfig,
    settings: AppConfiguration,
}

impl AppBootstrap {
    /// 创建新的应用启动器
    pub fn new(settings: AppConfiguration) -> Self {
        Self {
            config: AppConfig::from(&settings),
            settings,
        }
    }

    /// 设置配置
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// 运行应用服务器
    #[instrument(skip(self))]
    pub async fn run(self) -> AppResult<()> {
        info!("启动应用服务器，配置: {:?}", self.config);

        let state = web::Data::new(init_portal_state(&self.settings)?);
        let probe = web::Data::new(DbProbe::from_config(&self.settings));

        match self.start_http_server(state, probe).await {
            Ok(_) => {
                info!("服务器已停止");
                Ok(())
            }
            Err(e) => {
                error!("服务器启动失败: {}", e);
                Err(e)
            }
        }
    }

    /// 启动HTTP服务器
    async fn start_http_server(
        &self,
        state: web::Data<PortalState>,
        probe: web::Data<DbProbe>,
    ) -> AppResult<()> {
        let config = &self.config;
        if config.debug {
            info!("调试模式已启用，OpenAPI 文档: {}", openapi::OPENAPI_PATH);
        }

        let mut server = HttpServer::new(move || {
            App::new()
                .wrap(RouteGuardMiddleware::new())
                .wrap(Logger::default())
                .app_data(state.clone())
                .app_data(probe.clone())
                .configure(configure_portal)
        });
        if let Some(workers) = config.workers {
            server = server.workers(workers);
        }

        info!("服务器将在 {}:{} 上启动", config.host, config.port);
        server
            .bind((config.host.as_str(), config.port))
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?
            .run()
            .await
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;

        Ok(())
    }
}
