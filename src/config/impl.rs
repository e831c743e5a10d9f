use config::{Config, ConfigError, Environment, File, FileFormat, Map};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 编译进二进制的默认配置，磁盘上的配置文件只需写出要覆盖的项
const DEFAULTS: &str = include_str!("../../config.toml");

/// 常用配置项的短环境变量，优先级高于 `PORTAL_*`
const SHORT_ENV_OVERRIDES: [(&str, &str); 9] = [
    ("APP_ENV", "app.environment"),
    ("RUST_LOG", "app.log_level"),
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("UNIX_SOCKET", "server.unix_socket_path"),
    ("CPU_COUNT", "server.workers"),
    ("API_BASE_URL", "api.base_url"),
    ("SESSION_SECRET", "session.secret"),
    ("SESSION_COOKIE_NAME", "session.cookie_name"),
];

/// `PORTAL_<SECTION>__<KEY>`，如 `PORTAL_API__BASE_URL` 对应 `api.base_url`
fn portal_env(source: Option<Map<String, String>>) -> Environment {
    Environment::with_prefix("PORTAL")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .source(source)
}

impl AppConfig {
    /// 从进程环境加载配置
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|name| std::env::var(name).ok(), None)
    }

    /// 按 默认值 → `config.toml` → `config.<APP_ENV>.toml` → `PORTAL_*` → 短环境变量 的顺序合并
    ///
    /// `env_source` 为 `None` 时 `PORTAL_*` 读取进程环境。
    fn load_from(
        lookup: impl Fn(&str) -> Option<String>,
        env_source: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let environment = lookup("APP_ENV").unwrap_or_else(|| "development".into());

        let mut builder = Config::builder()
            .add_source(File::from_str(DEFAULTS, FileFormat::Toml))
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{environment}")).required(false))
            .add_source(portal_env(env_source));

        for (var, key) in SHORT_ENV_OVERRIDES {
            builder = builder.set_override_option(key, lookup(var))?;
        }

        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;
        app_config.normalize();
        Ok(app_config)
    }

    fn normalize(&mut self) {
        if self.server.workers == 0 {
            self.server.workers = num_cpus::get().min(self.server.max_workers);
        }
        // 拼接上游路径时不再关心末尾斜杠
        self.api.base_url = self.api.base_url.trim_end_matches('/').to_string();
    }

    /// 全局配置，未初始化时就地加载，失败则退出进程
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 启动时调用一次
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        Some(self.server.unix_socket_path.as_str()).filter(|path| !path.is_empty())
    }
}
