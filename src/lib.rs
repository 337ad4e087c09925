#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, form::StaticForm, Settings};

pub use self::core::{
    download::{DownloadLink, ObjectUrlRegistry},
    handler::{Submission, SubmitEvent, SubmitHandler},
    service::HttpLayoutService,
};
pub use utils::error::{BoxLayoutError, Result};
