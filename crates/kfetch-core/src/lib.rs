pub mod config;
pub mod logging;

pub mod archive;
pub mod downloader;
pub mod layout;
pub mod manifest;
pub mod pipeline;
pub mod progress;
pub mod storage;
pub mod url_model;
