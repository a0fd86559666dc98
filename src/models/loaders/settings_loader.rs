use crate::error::SettingsError;
use crate::models::settings::Settings;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// 基于 TOML 文件的设置存储
///
/// 只负责读写，不参与提取流程
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取设置，文件不存在时返回 `None`
    pub async fn load(&self) -> Result<Option<Settings>, SettingsError> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(None);
        }

        let content =
            fs::read_to_string(&self.path)
                .await
                .map_err(|source| SettingsError::ReadFailed {
                    path: self.display(),
                    source,
                })?;

        let settings: Settings =
            toml::from_str(&content).map_err(|source| SettingsError::TomlParseFailed {
                path: self.display(),
                source,
            })?;

        debug!("已读取设置: {:?}", settings);
        Ok(Some(settings))
    }

    /// 读取设置；首次运行时写入安装默认值
    ///
    /// 文件无法解析时记录警告，用默认值覆盖
    pub async fn load_or_install(&self) -> Result<Settings, SettingsError> {
        match self.load().await {
            Ok(Some(settings)) => return Ok(settings),
            Ok(None) => {}
            Err(e @ SettingsError::TomlParseFailed { .. }) => {
                warn!("⚠️ {}，将重新写入默认设置", e);
            }
            Err(e) => return Err(e),
        }

        let settings = Settings::installed_now();
        self.save(&settings).await?;
        info!("✓ 已创建默认设置: {}", self.display());
        Ok(settings)
    }

    /// 读取已有的安装元数据，文件损坏时视为没有
    async fn existing_metadata(&self) -> Result<Option<Settings>, SettingsError> {
        match self.load().await {
            Err(SettingsError::TomlParseFailed { .. }) => {
                warn!("⚠️ 设置文件无法解析，将被覆盖: {}", self.display());
                Ok(None)
            }
            other => other,
        }
    }

    /// 保存设置
    ///
    /// 只覆盖用户开关，保留文件中已有的安装元数据
    pub async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let mut to_write = settings.clone();
        if to_write.install_date.is_none() {
            if let Some(existing) = self.existing_metadata().await? {
                to_write.version = to_write.version.or(existing.version);
                to_write.install_date = existing.install_date;
            }
        }

        let content = toml::to_string_pretty(&to_write)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| SettingsError::WriteFailed {
                    path: self.display(),
                    source,
                })?;
        }

        fs::write(&self.path, content)
            .await
            .map_err(|source| SettingsError::WriteFailed {
                path: self.display(),
                source,
            })?;

        debug!("设置已保存至: {}", self.display());
        Ok(())
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "spr_gwa_{}_{}_{}.toml",
            name,
            std::process::id(),
            nanos
        ))
    }

    #[tokio::test]
    async fn test_load_missing_file_returns_none() {
        let store = SettingsStore::new(temp_path("missing"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_or_install_writes_defaults() {
        let path = temp_path("install");
        let store = SettingsStore::new(&path);

        let settings = store.load_or_install().await.unwrap();
        assert!(!settings.exclude_pe);
        assert!(!settings.exclude_nstp);
        assert!(settings.install_date.is_some());

        let reloaded = store.load().await.unwrap().unwrap();
        assert_eq!(reloaded, settings);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_save_keeps_install_metadata() {
        let path = temp_path("save");
        let store = SettingsStore::new(&path);

        tokio_test::block_on(async {
            let installed = store.load_or_install().await.unwrap();

            let update = Settings {
                exclude_pe: true,
                ..Default::default()
            };
            store.save(&update).await.unwrap();

            let reloaded = store.load().await.unwrap().unwrap();
            assert!(reloaded.exclude_pe);
            assert!(!reloaded.exclude_nstp);
            assert_eq!(reloaded.install_date, installed.install_date);
            assert_eq!(reloaded.version, installed.version);
        });

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_corrupted_file_is_reinstalled() {
        let path = temp_path("corrupted_install");
        std::fs::write(&path, "exclude_pe = maybe").unwrap();

        let store = SettingsStore::new(&path);
        let settings = store.load_or_install().await.unwrap();
        assert!(!settings.exclude_pe);
        assert!(settings.install_date.is_some());
        assert_eq!(store.load().await.unwrap(), Some(settings));

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_save_overwrites_corrupted_file() {
        let path = temp_path("corrupted_save");
        std::fs::write(&path, "[[[ not toml").unwrap();

        let store = SettingsStore::new(&path);
        let update = Settings {
            exclude_nstp: true,
            ..Default::default()
        };
        store.save(&update).await.unwrap();

        let reloaded = store.load().await.unwrap().unwrap();
        assert!(reloaded.exclude_nstp);
        assert!(reloaded.install_date.is_none());
        assert_eq!(store.path(), path.as_path());

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_parse_error_is_reported() {
        let path = temp_path("broken");
        std::fs::write(&path, "exclude_pe = maybe").unwrap();

        let store = SettingsStore::new(&path);
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, SettingsError::TomlParseFailed { .. }));

        let _ = std::fs::remove_file(path);
    }
}
