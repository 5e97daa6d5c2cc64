/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- 模型服务配置 ---
    pub model_name: String,
    pub api_base_url: String,
    /// 读取 API 凭证的环境变量名（每次分析时重新读取）
    pub credential_env_var: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    // --- 输入配置 ---
    /// 待分析的试卷图片目录
    pub upload_folder: String,
    /// 自定义考纲 TOML 文件，为空时使用内置考纲
    pub syllabus_file: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_name: "gemini-3-pro-preview".to_string(),
            api_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            credential_env_var: "API_KEY".to_string(),
            request_timeout_secs: 300,
            upload_folder: "uploads".to_string(),
            syllabus_file: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            model_name: std::env::var("MODEL_NAME").unwrap_or(default.model_name),
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            credential_env_var: std::env::var("CREDENTIAL_ENV_VAR").unwrap_or(default.credential_env_var),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            upload_folder: std::env::var("UPLOAD_FOLDER").unwrap_or(default.upload_folder),
            syllabus_file: std::env::var("SYLLABUS_FILE").ok().filter(|v| !v.trim().is_empty()).or(default.syllabus_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
