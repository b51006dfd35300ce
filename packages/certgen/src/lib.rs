//! ローカルネットワーク用の自己署名証明書の生成
//!
//! ブラウザはカメラ・マイクを安全なオリジンでしか許可しないため、
//! LAN 内のスマートフォンから使うにも HTTPS が必要になる。
//! `localhost`・ループバックアドレス・このホストの外向き IPv4 アドレスに有効な証明書を作成する。

use std::{
    net::{IpAddr, Ipv4Addr},
    path::{Path, PathBuf},
};

use chrono::{Datelike, Days, NaiveDate};
use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair, date_time_ymd};
use thiserror::Error;

pub const CERT_FILE: &str = "cert.pem";
pub const KEY_FILE: &str = "key.pem";
pub const DEFAULT_VALIDITY_DAYS: u32 = 365;

#[derive(Debug, Error)]
pub enum CertgenError {
    #[error("Certificate generation failed: {0}")]
    Generation(#[from] rcgen::Error),

    #[error("Validity period of {0} days is out of range")]
    InvalidValidity(u32),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// PEM 形式の証明書と秘密鍵
#[derive(Debug, Clone)]
pub struct GeneratedCertificate {
    pub cert_pem: String,
    pub key_pem: String,
}

/// SAN（`localhost`・ループバック・`local_ip`。重複は除く）
pub fn subject_alt_names(local_ip: Ipv4Addr) -> Vec<String> {
    let mut names = vec!["localhost".to_string(), Ipv4Addr::LOCALHOST.to_string()];
    let local_ip = IpAddr::V4(local_ip).to_string();
    if !names.contains(&local_ip) {
        names.push(local_ip);
    }
    names
}

/// `valid_from` から `validity_days` 日間有効な証明書パラメータ
pub fn certificate_params(
    local_ip: Ipv4Addr,
    valid_from: NaiveDate,
    validity_days: u32,
) -> Result<CertificateParams, CertgenError> {
    let valid_until = valid_from
        .checked_add_days(Days::new(u64::from(validity_days)))
        .ok_or(CertgenError::InvalidValidity(validity_days))?;

    let mut params = CertificateParams::new(subject_alt_names(local_ip))?;

    let mut distinguished_name = DistinguishedName::new();
    distinguished_name.push(DnType::CountryName, "US");
    distinguished_name.push(DnType::StateOrProvinceName, "Home");
    distinguished_name.push(DnType::LocalityName, "LocalNetwork");
    distinguished_name.push(DnType::OrganizationName, "Secure Chat App");
    distinguished_name.push(DnType::CommonName, "localhost");
    params.distinguished_name = distinguished_name;

    let (year, month, day) = ymd(valid_from);
    params.not_before = date_time_ymd(year, month, day);
    let (year, month, day) = ymd(valid_until);
    params.not_after = date_time_ymd(year, month, day);

    Ok(params)
}

fn ymd(date: NaiveDate) -> (i32, u8, u8) {
    // month() は 1..=12、day() は 1..=31
    (date.year(), date.month() as u8, date.day() as u8)
}

/// 鍵ペアを生成し、その鍵で自己署名する
pub fn generate(params: CertificateParams) -> Result<GeneratedCertificate, CertgenError> {
    let key_pair = KeyPair::generate()?;
    let cert = params.self_signed(&key_pair)?;

    Ok(GeneratedCertificate {
        cert_pem: cert.pem(),
        key_pem: key_pair.serialize_pem(),
    })
}

/// `out_dir` に `cert.pem` と `key.pem` を書き込む（既存のファイルは上書き）
///
/// 書き込んだパスを証明書・秘密鍵の順で返す。
pub fn write_files(
    generated: &GeneratedCertificate,
    out_dir: &Path,
) -> Result<(PathBuf, PathBuf), CertgenError> {
    let cert_path = out_dir.join(CERT_FILE);
    let key_path = out_dir.join(KEY_FILE);

    write_file(&cert_path, &generated.cert_pem)?;
    write_file(&key_path, &generated.key_pem)?;

    Ok((cert_path, key_path))
}

fn write_file(path: &Path, contents: &str) -> Result<(), CertgenError> {
    std::fs::write(path, contents).map_err(|source| CertgenError::Write {
        path: path.to_path_buf(),
        source,
    })
}
