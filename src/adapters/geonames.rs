use crate::domain::ports::{ConfigProvider, LocalityResolver};
use crate::utils::error::{Result, WizardError};
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// GeoNames 每個國家一個 `<CC>.zip`，裡面是 `<CC>.txt`
pub const DEFAULT_DOWNLOAD_URL: &str = "https://download.geonames.org/export/zip";
const DOWNLOAD_TIMEOUT_SECONDS: u64 = 60;

/// 離線時使用的比利時郵遞區號子集（GeoNames 格式）
const BUNDLED_BE: &str = include_str!("../../data/BE.txt");

// GeoNames postal code dump: country, postal code, place name, admin1..3, lat, lon, accuracy
const COUNTRY_COLUMN: usize = 0;
const POSTAL_CODE_COLUMN: usize = 1;
const PLACE_NAME_COLUMN: usize = 2;

/// 以 GeoNames 郵遞區號表查地名
#[derive(Debug, Clone)]
pub struct GeoNamesResolver {
    country_code: String,
    places: HashMap<String, String>,
}

impl GeoNamesResolver {
    /// 讀取 tab 分隔的 GeoNames 資料，只保留指定國家的列；
    /// 同一郵遞區號有多個地名時依檔案順序以 ", " 合併
    pub fn from_reader<R: Read>(reader: R, country_code: &str) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
        let mut skipped = 0usize;

        for row in csv_reader.records() {
            let row = row?;
            let (Some(country), Some(postal_code), Some(place)) = (
                row.get(COUNTRY_COLUMN),
                row.get(POSTAL_CODE_COLUMN),
                row.get(PLACE_NAME_COLUMN),
            ) else {
                skipped += 1;
                continue;
            };

            if !country.trim().eq_ignore_ascii_case(country_code) {
                continue;
            }

            let postal_code = postal_code.trim();
            let place = place.trim();
            if postal_code.is_empty() || place.is_empty() {
                skipped += 1;
                continue;
            }

            let names = grouped.entry(postal_code.to_string()).or_default();
            if !names.iter().any(|name| name == place) {
                names.push(place.to_string());
            }
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} incomplete GeoNames rows", skipped);
        }

        let places = grouped
            .into_iter()
            .map(|(postal_code, names)| (postal_code, names.join(", ")))
            .collect::<HashMap<_, _>>();

        tracing::debug!(
            "Loaded {} postal codes for country {}",
            places.len(),
            country_code
        );

        Ok(Self {
            country_code: country_code.to_ascii_uppercase(),
            places,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P, country_code: &str) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file, country_code)
    }

    pub fn bundled() -> Result<Self> {
        Self::from_reader(BUNDLED_BE.as_bytes(), "BE")
    }

    /// 載入順序：指定檔案、快取、下載完整資料；比利時資料下載失敗時退回內建子集
    pub async fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let country_code = config.country_code().to_ascii_uppercase();

        if let Some(path) = config.geonames_path() {
            tracing::info!("📁 Loading GeoNames data from: {}", path);
            return Self::from_file(path, &country_code);
        }

        let cache_file = config
            .cache_dir()
            .map(PathBuf::from)
            .unwrap_or_else(default_cache_dir)
            .join(format!("{}.txt", country_code));

        if cache_file.is_file() {
            tracing::info!("📁 Loading cached GeoNames data from: {}", cache_file.display());
            return Self::from_file(&cache_file, &country_code);
        }

        match Self::download(config.geonames_url(), &country_code, &cache_file).await {
            Ok(resolver) => Ok(resolver),
            Err(e) if country_code == "BE" => {
                tracing::warn!(
                    "⚠️ Could not download GeoNames data ({}), only the bundled Belgian subset is available",
                    e
                );
                Self::bundled()
            }
            Err(e) => Err(e),
        }
    }

    /// 下載 `<base_url>/<CC>.zip`，解出 `<CC>.txt` 並寫入快取檔
    pub async fn download(base_url: &str, country_code: &str, cache_file: &Path) -> Result<Self> {
        let url = format!("{}/{}.zip", base_url.trim_end_matches('/'), country_code);
        tracing::info!("📥 Downloading GeoNames data from: {}", url);

        let client = Client::builder()
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECONDS))
            .build()?;
        let response = client.get(&url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(WizardError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let archive = response.bytes().await?;
        let dump = unpack(&archive, country_code)?;
        let resolver = Self::from_reader(dump.as_bytes(), country_code)?;

        // 快取失敗不影響這次使用
        if let Err(e) = write_cache(cache_file, &dump) {
            tracing::warn!(
                "⚠️ Could not cache GeoNames data at {}: {}",
                cache_file.display(),
                e
            );
        }

        Ok(resolver)
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

fn default_cache_dir() -> PathBuf {
    std::env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))
        .unwrap_or_else(std::env::temp_dir)
        .join("immo-wizard")
}

fn unpack(archive: &[u8], country_code: &str) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(archive))?;
    let mut entry = archive.by_name(&format!("{}.txt", country_code))?;
    let mut dump = String::new();
    entry.read_to_string(&mut dump)?;
    Ok(dump)
}

fn write_cache(cache_file: &Path, dump: &str) -> Result<()> {
    if let Some(dir) = cache_file.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(cache_file, dump)?;
    tracing::debug!("Cached GeoNames data at {}", cache_file.display());
    Ok(())
}

impl LocalityResolver for GeoNamesResolver {
    fn resolve(&self, postal_code: u32) -> Option<String> {
        if postal_code == 0 {
            return None;
        }
        self.places.get(&postal_code.to_string()).cloned()
    }
}
