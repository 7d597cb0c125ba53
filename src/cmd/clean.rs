use crate::config::Config;
use crate::error::{Error, Result};
use std::io::ErrorKind;
use tokio::fs;

pub async fn clean(config: &Config) -> Result<()> {
    match fs::remove_dir_all(config.build.out_dir.as_str()).await {
        Ok(()) => {
            log::info!("removed {}", config.build.out_dir);
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Io(e)),
    }
}
