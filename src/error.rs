use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 输入数据错误
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 启动浏览器失败
    #[error("启动浏览器失败: {source}")]
    LaunchFailed {
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 浏览器配置失败
    #[error("浏览器配置失败: {0}")]
    ConfigurationFailed(String),
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed {
        url: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 页面元素不存在
    #[error("页面元素不存在: {locator}")]
    ElementNotFound { locator: String },
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回错误响应
    #[error("API返回错误响应 ({endpoint}): code={code:?}, message={message:?}")]
    BadResponse {
        endpoint: String,
        code: Option<u64>,
        message: Option<String>,
    },
    /// 响应中缺少任务 ID
    #[error("API未返回任务ID: {endpoint}")]
    MissingTaskId { endpoint: String },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 图片解码或编码失败
    #[error("图片处理失败 ({path}): {source}")]
    ImageFailed {
        path: String,
        #[source]
        source: image::ImageError,
    },
    /// 文档打包失败
    #[error("文档打包失败 ({path}): {source}")]
    ArchiveFailed {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 输入数据错误
#[derive(Debug, Error)]
pub enum InputError {
    /// 读取标准输入失败
    #[error("读取标准输入失败: {0}")]
    StdinFailed(#[source] std::io::Error),
    /// base64 解码失败
    #[error("base64 解码失败: {0}")]
    Base64Failed(#[from] base64::DecodeError),
    /// 解码后的内容不是 UTF-8
    #[error("输入内容不是合法的 UTF-8: {0}")]
    Utf8Failed(#[from] std::string::FromUtf8Error),
    /// JSON 解析失败
    #[error("JSON解析失败: {0}")]
    JsonFailed(#[from] serde_json::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建页面元素不存在错误
    pub fn element_not_found(locator: impl ToString) -> Self {
        AppError::Browser(BrowserError::ElementNotFound {
            locator: locator.to_string(),
        })
    }

    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建图片处理错误
    pub fn image_failed(path: impl Into<String>, source: image::ImageError) -> Self {
        AppError::File(FileError::ImageFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
