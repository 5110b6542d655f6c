use std::{collections::BTreeMap, fmt, io, sync::Arc};

#[derive(Debug, Clone)]
pub struct AppError {
    pub key: &'static str,
    pub args: BTreeMap<&'static str, String>,
    pub causes: Vec<AppCause>,
}

#[derive(Debug, Clone)]
pub enum AppCause {
    App(Box<AppError>),
    Std(Arc<dyn std::error::Error + Send + Sync>),
}

impl AppError {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            args: BTreeMap::new(),
            causes: Vec::new(),
        }
    }

    pub fn with_arg(mut self, k: &'static str, v: impl ToString) -> Self {
        self.args.insert(k, v.to_string());
        self
    }

    pub fn push_app(mut self, cause: AppError) -> Self {
        self.causes.push(AppCause::App(Box::new(cause)));
        self
    }

    pub fn push_std(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.causes.push(AppCause::Std(Arc::new(cause)));
        self
    }

    /// One-line message including the first cause, for status labels.
    pub fn summary(&self) -> String {
        match self.causes.first() {
            Some(AppCause::App(e)) => format!("{self}: {}", e.summary()),
            Some(AppCause::Std(e)) => format!("{self}: {e}"),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.key)?;
        let mut first = true;
        for (k, v) in &self.args {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{k}={v}")?;
        }
        write!(f, ")")
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.causes.iter().find_map(|c| match c {
            AppCause::App(e) => Some(e.as_ref() as &dyn std::error::Error),
            AppCause::Std(e) => Some(e.as_ref() as &(dyn std::error::Error + 'static)),
        })
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::new("io-error").push_std(err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let mut e = AppError::new("reqwest::Error");
        if let Some(status) = err.status() {
            e = e.with_arg("status", status.as_u16());
        }
        e.push_std(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::new("json-error").push_std(err)
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::new("image-error").push_std(err)
    }
}

impl From<base64::DecodeError> for AppError {
    fn from(err: base64::DecodeError) -> Self {
        AppError::new("base64-error").push_std(err)
    }
}

impl From<crate::generation::GenerationError> for AppError {
    fn from(err: crate::generation::GenerationError) -> Self {
        AppError::new("generation-error").push_std(err)
    }
}

impl From<wgpu::CreateSurfaceError> for AppError {
    fn from(err: wgpu::CreateSurfaceError) -> Self {
        AppError::new("wgpu::CreateSurfaceError").push_std(err)
    }
}

impl From<wgpu::RequestAdapterError> for AppError {
    fn from(err: wgpu::RequestAdapterError) -> Self {
        AppError::new("wgpu::RequestAdapterError").push_std(err)
    }
}

impl From<wgpu::RequestDeviceError> for AppError {
    fn from(err: wgpu::RequestDeviceError) -> Self {
        AppError::new("wgpu::RequestDeviceError").push_std(err)
    }
}

impl From<winit::error::OsError> for AppError {
    fn from(err: winit::error::OsError) -> Self {
        AppError::new("winit::error::OsError").push_std(err)
    }
}
