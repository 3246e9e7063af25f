use actix_web::web;
use std::collections::BTreeSet;

use crate::modules::auth::configure_auth_routes;
use crate::modules::base::configure_page_routes;
use crate::modules::calendar::controller::configure_calendar_routes;
use crate::modules::dashboard::controller::configure_dashboard_routes;
use crate::modules::exams::controller::configure_exam_routes;
use crate::modules::functions::configure_function_routes;
use crate::modules::holidays::controller::configure_holiday_routes;
use crate::modules::notices::controller::configure_notice_routes;
use crate::modules::settings::controller::configure_settings_routes;

/// 路由配置函数类型
pub type RouteConfigFn = fn(&mut web::ServiceConfig);

/// 路由信息结构
#[derive(Debug, Clone)]
pub struct RouteInfo {
    pub name: String,
    pub description: String,
    pub module: String,
    pub config_fn: RouteConfigFn,
}

impl RouteInfo {
    pub fn new(name: &str, description: &str, module: &str, config_fn: RouteConfigFn) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            module: module.to_string(),
            config_fn,
        }
    }
}

/// 路由注册器，按注册顺序配置
#[derive(Debug, Default)]
pub struct RouteRegistry {
    routes: Vec<RouteInfo>,
}

impl RouteRegistry {
    /// 创建新的路由注册器
    pub fn new() -> Self {
        Self::default()
    }

    /// 门户全部路由；页面路由是 default service，放在最后
    pub fn portal() -> Self {
        let mut registry = Self::new();
        registry
            .register_route(RouteInfo::new("auth", "登录、演示登录、登出、当前用户", "auth", configure_auth_routes))
            .register_route(RouteInfo::new("dashboard", "仪表盘摘要与导航菜单", "dashboard", configure_dashboard_routes))
            .register_route(RouteInfo::new("calendar", "校历事件与日历视图", "calendar", configure_calendar_routes))
            .register_route(RouteInfo::new("notices", "公告板", "notices", configure_notice_routes))
            .register_route(RouteInfo::new("exams", "考试安排", "exams", configure_exam_routes))
            .register_route(RouteInfo::new("holidays", "假期列表", "holidays", configure_holiday_routes))
            .register_route(RouteInfo::new("settings", "门户设置（管理员）", "settings", configure_settings_routes))
            .register_route(RouteInfo::new("functions", "hello-world 与数据库探测", "functions", configure_function_routes))
            .register_route(RouteInfo::new("pages", "客户端页面与 404", "base", configure_page_routes));
        registry
    }

    /// 注册路由，同名覆盖并保持原位置
    pub fn register_route(&mut self, route_info: RouteInfo) -> &mut Self {
        match self.routes.iter_mut().find(|route| route.name == route_info.name) {
            Some(existing) => *existing = route_info,
            None => self.routes.push(route_info),
        }
        self
    }

    /// 获取所有路由
    pub fn get_routes(&self) -> &[RouteInfo] {
        &self.routes
    }

    /// 获取指定模块的路由
    pub fn get_routes_by_module(&self, module: &str) -> Vec<&RouteInfo> {
        self.routes
            .iter()
            .filter(|route| route.module == module)
            .collect()
    }

    /// 配置所有路由到 ServiceConfig
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        for route_info in &self.routes {
            (route_info.config_fn)(cfg);
        }
    }

    /// 获取路由统计信息
    pub fn get_stats(&self) -> (usize, Vec<String>) {
        let modules: BTreeSet<String> = self.routes.iter().map(|route| route.module.clone()).collect();
        (self.routes.len(), modules.into_iter().collect())
    }

    /// 打印路由信息
    pub fn print_routes_info(&self) {
        println!("路由注册信息:");
        println!("============");

        let (total, modules) = self.get_stats();
        for module in modules {
            let module_routes = self.get_routes_by_module(&module);
            println!("模块: {} ({} 个路由)", module, module_routes.len());
            for route in module_routes {
                println!("  - {}: {}", route.name, route.description);
            }
        }

        println!("总计: {} 个路由", total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut web::ServiceConfig) {}

    #[test]
    fn test_pages_registered_last() {
        let registry = RouteRegistry::portal();
        let names: Vec<&str> = registry.get_routes().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.last(), Some(&"pages"));
        assert_eq!(names.len(), 9);
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut registry = RouteRegistry::new();
        registry
            .register_route(RouteInfo::new("a", "first", "m1", noop))
            .register_route(RouteInfo::new("b", "second", "m2", noop))
            .register_route(RouteInfo::new("a", "replaced", "m1", noop));

        let routes = registry.get_routes();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].description, "replaced");
        assert_eq!(registry.get_stats().1, vec!["m1".to_string(), "m2".to_string()]);
    }
}
