pub mod ai;
pub mod completion;
pub mod config;
pub mod library;
pub mod present;
pub mod preview;
pub mod wizard;

use anyhow::{Context, Result};
use colored::Colorize;
use inquire::InquireError;

use crate::config::Config;
use crate::library::LectureLibrary;
use crate::workflow::{Notice, NoticeLevel};

/// Open the library configured in `config`.
pub fn open_library(config: &Config) -> Result<LectureLibrary> {
    let dir = config.library_dir()?;
    LectureLibrary::open(&dir).with_context(|| format!("Failed to open library in {}", dir.display()))
}

/// Turn a cancelled prompt (Esc or Ctrl+C) into `None`.
pub fn answered<T>(result: std::result::Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Info => println!("{}", notice.message.green()),
        NoticeLevel::Error => eprintln!("{} {}", "Error:".red().bold(), notice.message),
    }
}
