use crate::decompress;
use aurbump_common::config::IndexConfig;
use aurbump_common::errors::*;
use aurbump_common::http;
use aurbump_common::Version;
use std::collections::BTreeMap;
use std::fs;
use url::Url;

/// One stanza of a debian `Packages` file
pub type Record = BTreeMap<String, String>;

pub fn fetch_url_or_path(client: &http::Client, location: &str) -> Result<Vec<u8>> {
    let bytes = match Url::parse(location) {
        Ok(url) if url.scheme() == "https" || url.scheme() == "http" => {
            info!("Downloading {:?}...", location);
            client
                .get(url)
                .send()?
                .error_for_status()?
                .bytes()?
                .to_vec()
        }
        _ => {
            info!("Reading {:?}...", location);
            fs::read(location).with_context(|| anyhow!("Failed to read index {:?}", location))?
        }
    };

    Ok(bytes)
}

pub fn parse_records(text: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut record = Record::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !record.is_empty() {
                records.push(record);
                record = Record::new();
            }
            continue;
        }

        // folded continuation of the previous field, eg. Description
        if line.starts_with(' ') || line.starts_with('\t') {
            continue;
        }

        let (key, value) = line.split_once(':').unwrap_or((line, ""));
        record.insert(key.to_string(), value.trim().to_string());
    }

    if !record.is_empty() {
        records.push(record);
    }

    records
}

pub fn latest_version(records: &[Record], package: Option<&str>) -> Result<Version> {
    let mut latest: Option<Version> = None;

    for record in records {
        if let Some(package) = package {
            if record.get("Package").map(String::as_str) != Some(package) {
                continue;
            }
        }

        let Some(version) = record.get("Version") else {
            trace!("Skipping record without version: {:?}", record);
            continue;
        };
        let version = Version::parse(version)
            .with_context(|| anyhow!("Failed to parse version of {:?}", record.get("Package")))?;

        if latest.map_or(true, |latest| version > latest) {
            latest = Some(version);
        }
    }

    latest.ok_or_else(|| format_err!("Package index does not contain any matching version"))
}

pub fn latest(config: &IndexConfig) -> Result<Version> {
    let client = http::client(config.user_agent())?;
    let bytes = fetch_url_or_path(&client, config.url())?;

    info!("Parsing index ({} bytes)...", bytes.len());
    let text = decompress::to_text(&bytes)?;
    let records = parse_records(&text);
    debug!("Found {} records in index", records.len());

    let version = latest_version(&records, config.package.as_deref())?;
    info!("Latest version in index: {}", version);
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PACKAGES: &str = "\
Package: nordvpn
Version: 3.7.0-3
Architecture: amd64
Filename: pool/main/nordvpn_3.7.0-3_amd64.deb
Description: NordVPN client
 A longer description
 spanning multiple lines: with colons

Package: nordvpn
Version: 3.10.0-1
Architecture: amd64
Filename: pool/main/nordvpn_3.10.0-1_amd64.deb

Package: nordvpn-release
Version: 1.0.0
Architecture: all

Package: nordvpn
Version: 3.9.2-1
Architecture: amd64
";

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_parse_records() {
        let records = parse_records(PACKAGES);
        assert_eq!(records.len(), 4);
        assert_eq!(records[0]["Package"], "nordvpn");
        assert_eq!(records[0]["Version"], "3.7.0-3");
        assert_eq!(records[0]["Description"], "NordVPN client");
        assert_eq!(records[0].len(), 5);
        assert_eq!(records[2]["Package"], "nordvpn-release");
    }

    #[test]
    fn test_parse_records_crlf_and_extra_blank_lines() {
        let records = parse_records("Package: a\r\nVersion: 1.0.0\r\n\r\n\r\n\nPackage: b\r\n\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Version"], "1.0.0");
        assert_eq!(records[1]["Package"], "b");
    }

    #[test]
    fn test_parse_records_value_with_colon() {
        let records = parse_records("Homepage: https://nordvpn.com/\n");
        assert_eq!(records[0]["Homepage"], "https://nordvpn.com/");
    }

    #[test]
    fn test_latest_is_semantic_not_lexicographic() {
        let records = parse_records(PACKAGES);
        assert_eq!(latest_version(&records, None).unwrap(), v("3.10.0-1"));
    }

    #[test]
    fn test_latest_with_package_filter() {
        let records = parse_records(PACKAGES);
        let version = latest_version(&records, Some("nordvpn-release")).unwrap();
        assert_eq!(version, v("1.0.0"));
    }

    #[test]
    fn test_latest_skips_records_without_version() {
        let records = parse_records("Package: a\n\nPackage: b\nVersion: 2.0.1-4\n");
        assert_eq!(latest_version(&records, None).unwrap(), v("2.0.1-4"));
    }

    #[test]
    fn test_latest_no_candidates() {
        let records = parse_records(PACKAGES);
        assert!(latest_version(&records, Some("openvpn")).is_err());
        assert!(latest_version(&[], None).is_err());
    }

    #[test]
    fn test_latest_unparsable_version() {
        let records = parse_records("Package: nordvpn\nVersion: 3.7.0-3\n\nPackage: nordvpn\nVersion: nightly\n");
        assert!(latest_version(&records, None).is_err());
    }

    #[test]
    fn test_latest_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PACKAGES.as_bytes()).unwrap();

        let config = IndexConfig {
            url: Some(file.path().to_str().unwrap().to_string()),
            user_agent: None,
            package: Some("nordvpn".to_string()),
        };
        assert_eq!(latest(&config).unwrap(), v("3.10.0-1"));
    }

    #[test]
    fn test_missing_path() {
        let client = http::client("Mozilla/5.0").unwrap();
        assert!(fetch_url_or_path(&client, "/nonexistent/Packages").is_err());
    }
}
