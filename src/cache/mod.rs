use anyhow::Result;
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

use crate::config::CacheConfig;

/// 缓存管理器
pub struct CacheManager {
    config: CacheConfig,
}

/// 缓存条目
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    pub created_at: DateTime<Utc>,
    /// prompt的MD5哈希值，用于缓存键的生成和验证
    pub prompt_hash: String,
    /// 使用的模型名称（可选）
    pub model_name: Option<String>,
}

impl CacheManager {
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    /// 生成prompt的MD5哈希
    pub fn hash_prompt(&self, prompt: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(prompt.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// 获取缓存文件路径
    fn get_cache_path(&self, category: &str, hash: &str) -> PathBuf {
        self.config
            .cache_dir
            .join(category)
            .join(format!("{}.json", hash))
    }

    /// 检查缓存是否过期
    fn is_expired(&self, created_at: DateTime<Utc>) -> bool {
        let expire_seconds = (self.config.expire_hours * 3600) as i64;
        Utc::now().signed_duration_since(created_at).num_seconds() > expire_seconds
    }

    /// 获取缓存
    pub async fn get<T>(&self, category: &str, prompt: &str) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        if !self.config.enabled {
            return Ok(None);
        }

        let hash = self.hash_prompt(prompt);
        let cache_path = self.get_cache_path(category, &hash);

        if !cache_path.exists() {
            return Ok(None);
        }

        match fs::read_to_string(&cache_path).await {
            Ok(content) => match serde_json::from_str::<CacheEntry<T>>(&content) {
                Ok(entry) => {
                    if self.is_expired(entry.created_at) {
                        // 删除过期缓存
                        let _ = fs::remove_file(&cache_path).await;
                        return Ok(None);
                    }
                    Ok(Some(entry.data))
                }
                // 损坏的缓存按未命中处理
                Err(_) => Ok(None),
            },
            Err(_) => Ok(None),
        }
    }

    /// 写入缓存
    pub async fn store<T>(
        &self,
        category: &str,
        prompt: &str,
        data: T,
        model_name: Option<String>,
    ) -> Result<()>
    where
        T: Serialize,
    {
        if !self.config.enabled {
            return Ok(());
        }

        let hash = self.hash_prompt(prompt);
        let cache_path = self.get_cache_path(category, &hash);

        if let Some(parent) = cache_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let entry = CacheEntry {
            data,
            created_at: Utc::now(),
            prompt_hash: hash,
            model_name,
        };

        let content = serde_json::to_string_pretty(&entry)?;
        fs::write(&cache_path, content).await?;
        Ok(())
    }

    /// 清空指定分类的缓存
    pub async fn clear(&self, category: &str) -> Result<()> {
        let dir = self.config.cache_dir.join(category);
        if dir.exists() {
            fs::remove_dir_all(&dir).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn cache_in(dir: &TempDir) -> CacheManager {
        CacheManager::new(CacheConfig {
            enabled: true,
            cache_dir: dir.path().to_path_buf(),
            expire_hours: 1,
        })
    }

    #[test]
    fn test_hash_prompt_stable() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        assert_eq!(cache.hash_prompt("abc"), cache.hash_prompt("abc"));
        assert_ne!(cache.hash_prompt("abc"), cache.hash_prompt("abd"));
    }

    #[tokio::test]
    async fn test_store_and_get_roundtrip() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        cache
            .store(
                "answers",
                "prompt-a",
                "battery is fine".to_string(),
                Some("exaone3.5:7.8b".to_string()),
            )
            .await
            .unwrap();

        let hit: Option<String> = cache.get("answers", "prompt-a").await.unwrap();
        assert_eq!(hit, Some("battery is fine".to_string()));

        let miss: Option<String> = cache.get("answers", "prompt-b").await.unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_disabled_cache_never_hits() {
        let dir = TempDir::new().unwrap();
        let cache = CacheManager::new(CacheConfig {
            enabled: false,
            cache_dir: dir.path().to_path_buf(),
            expire_hours: 1,
        });

        cache
            .store("answers", "prompt-a", "x".to_string(), None)
            .await
            .unwrap();
        let hit: Option<String> = cache.get("answers", "prompt-a").await.unwrap();
        assert!(hit.is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_is_dropped() {
        let dir = TempDir::new().unwrap();
        let cache = CacheManager::new(CacheConfig {
            enabled: true,
            cache_dir: dir.path().to_path_buf(),
            expire_hours: 0,
        });

        cache
            .store("answers", "prompt-a", "x".to_string(), None)
            .await
            .unwrap();

        // expire_hours为0时，把写入时间拨回10秒即视为过期
        let entry_dir = dir.path().join("answers");
        let file = std::fs::read_dir(&entry_dir)
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        let mut entry: CacheEntry<String> = serde_json::from_str(&content).unwrap();
        entry.created_at = entry.created_at - Duration::seconds(10);
        std::fs::write(file.path(), serde_json::to_string(&entry).unwrap()).unwrap();

        let hit: Option<String> = cache.get("answers", "prompt-a").await.unwrap();
        assert!(hit.is_none());
    }

    #[tokio::test]
    async fn test_corrupted_entry_treated_as_miss() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        cache
            .store("answers", "prompt-a", "x".to_string(), None)
            .await
            .unwrap();

        let entry_dir = dir.path().join("answers");
        let file = std::fs::read_dir(&entry_dir)
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        std::fs::write(file.path(), "{not json").unwrap();

        let hit: Option<String> = cache.get("answers", "prompt-a").await.unwrap();
        assert!(hit.is_none());
    }

    #[tokio::test]
    async fn test_clear_category() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        cache
            .store("answers", "prompt-a", "x".to_string(), None)
            .await
            .unwrap();
        cache.clear("answers").await.unwrap();

        let hit: Option<String> = cache.get("answers", "prompt-a").await.unwrap();
        assert!(hit.is_none());
    }
}
