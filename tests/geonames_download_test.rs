use anyhow::Result;
use httpmock::prelude::*;
use immo_wizard::config::AppConfig;
use immo_wizard::core::LocalityResolver;
use immo_wizard::{GeoNamesResolver, WizardError};
use std::io::{Cursor, Write};
use tempfile::{NamedTempFile, TempDir};
use zip::write::{FileOptions, ZipWriter};

const BE_DUMP: &str = "\
BE\t1000\tBruxelles\tBruxelles-Capitale\tBRU\t\t\t\t21000\t50.8466\t4.3528\t4
BE\t2600\tBerchem\tVlaanderen\tVLG\tAntwerpen\tVAN\tAntwerpen\t11000\t51.1922\t4.4325\t4
BE\t3001\tHeverlee\tVlaanderen\tVLG\tVlaams-Brabant\tVBR\tLeuven\t24000\t50.8631\t4.6956\t4
BE\t3018\tWijgmaal\tVlaanderen\tVLG\tVlaams-Brabant\tVBR\tLeuven\t24000\t50.9278\t4.6992\t4
BE\t8300\tKnokke\tVlaanderen\tVLG\tWest-Vlaanderen\tVWV\tBrugge\t31000\t51.35\t3.2833\t4
BE\t8300\tWestkapelle\tVlaanderen\tVLG\tWest-Vlaanderen\tVWV\tBrugge\t31000\t51.3167\t3.3\t4
";

/// 模擬 GeoNames 的 `<CC>.zip`
fn geonames_archive(country_code: &str, dump: &str) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file::<_, ()>(format!("{}.txt", country_code), FileOptions::default())?;
    zip.write_all(dump.as_bytes())?;
    zip.start_file::<_, ()>("readme.txt", FileOptions::default())?;
    zip.write_all(b"postal codes from geonames.org")?;
    Ok(zip.finish()?.into_inner())
}

fn config_for(server: &MockServer, cache_dir: &TempDir) -> AppConfig {
    AppConfig {
        geonames_url: server.base_url(),
        cache_dir: Some(cache_dir.path().to_string_lossy().into_owned()),
        ..AppConfig::default()
    }
}

#[tokio::test]
async fn test_full_dump_is_downloaded_and_cached() -> Result<()> {
    let server = MockServer::start();
    let archive = geonames_archive("BE", BE_DUMP)?;
    let zip_mock = server.mock(|when, then| {
        when.method(GET).path("/BE.zip");
        then.status(200).body(archive);
    });
    let cache_dir = tempfile::tempdir()?;
    let config = config_for(&server, &cache_dir);

    let resolver = GeoNamesResolver::from_config(&config).await?;

    assert_eq!(resolver.resolve(3001).as_deref(), Some("Heverlee"));
    assert_eq!(resolver.resolve(3018).as_deref(), Some("Wijgmaal"));
    assert_eq!(resolver.resolve(8300).as_deref(), Some("Knokke, Westkapelle"));
    assert_eq!(resolver.len(), 5);
    assert!(cache_dir.path().join("BE.txt").is_file());

    // 第二次直接讀快取，不再下載
    let cached = GeoNamesResolver::from_config(&config).await?;
    assert_eq!(cached.resolve(2600).as_deref(), Some("Berchem"));
    zip_mock.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_failed_download_falls_back_to_bundled_subset() -> Result<()> {
    let server = MockServer::start();
    let zip_mock = server.mock(|when, then| {
        when.method(GET).path("/BE.zip");
        then.status(503).body("maintenance");
    });
    let cache_dir = tempfile::tempdir()?;

    let resolver = GeoNamesResolver::from_config(&config_for(&server, &cache_dir)).await?;

    zip_mock.assert();
    assert_eq!(resolver.resolve(1000).as_deref(), Some("Bruxelles"));
    assert!(!cache_dir.path().join("BE.txt").exists());
    Ok(())
}

#[tokio::test]
async fn test_failed_download_outside_belgium_is_an_error() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/NL.zip");
        then.status(404).body("not found");
    });
    let cache_dir = tempfile::tempdir()?;
    let config = AppConfig {
        country_code: "NL".to_string(),
        ..config_for(&server, &cache_dir)
    };

    let err = GeoNamesResolver::from_config(&config).await.unwrap_err();
    assert!(matches!(err, WizardError::BadStatus { status: 404, .. }));
    Ok(())
}

#[tokio::test]
async fn test_archive_without_country_file_falls_back() -> Result<()> {
    let server = MockServer::start();
    let archive = geonames_archive("NL", "NL\t1012\tAmsterdam\n")?;
    server.mock(|when, then| {
        when.method(GET).path("/BE.zip");
        then.status(200).body(archive);
    });
    let cache_dir = tempfile::tempdir()?;

    let resolver = GeoNamesResolver::from_config(&config_for(&server, &cache_dir)).await?;

    assert_eq!(resolver.resolve(1000).as_deref(), Some("Bruxelles"));
    assert_eq!(resolver.resolve(1012), None);
    Ok(())
}

#[tokio::test]
async fn test_local_file_skips_the_download() -> Result<()> {
    let server = MockServer::start();
    let zip_mock = server.mock(|when, then| {
        when.method(GET).path("/BE.zip");
        then.status(200);
    });
    let mut file = NamedTempFile::new()?;
    write!(file, "{}", BE_DUMP)?;
    let cache_dir = tempfile::tempdir()?;
    let config = AppConfig {
        geonames_path: Some(file.path().to_string_lossy().into_owned()),
        ..config_for(&server, &cache_dir)
    };

    let resolver = GeoNamesResolver::from_config(&config).await?;

    assert_eq!(resolver.resolve(3001).as_deref(), Some("Heverlee"));
    zip_mock.assert_hits(0);
    Ok(())
}
