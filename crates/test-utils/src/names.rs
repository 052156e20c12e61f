//! Builders for NOAA GOES object names and listing paths.

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

/// `sYYYYJJJHHMMSSt` style timestamp with tenths of a second.
pub fn goes_timestamp(dt: &DateTime<Utc>) -> String {
    format!(
        "{:04}{:03}{:02}{:02}{:02}{}",
        dt.year(),
        dt.ordinal(),
        dt.hour(),
        dt.minute(),
        dt.second(),
        dt.timestamp_subsec_millis() / 100
    )
}

/// Hourly listing directory: `{root}/{YYYY}/{JJJ}/{HH}`.
pub fn partition_dir(root: &str, dt: &DateTime<Utc>) -> String {
    format!("{}/{:04}/{:03}/{:02}", root, dt.year(), dt.ordinal(), dt.hour())
}

/// Full object path of an ABI Cloud and Moisture Imagery file.
///
/// `sector` is `C`, `M1` or `M2`; `mode` is `M3` or `M6`; `sat` is `G16` etc.
pub fn abi_object_path(sector: &str, mode: &str, band: u8, sat: &str, scan: &DateTime<Utc>) -> String {
    let root = if sector == "C" { "ABI-L2-CMIPC" } else { "ABI-L2-CMIPM" };
    let end = *scan + Duration::seconds(150);
    let created = *scan + Duration::seconds(200);
    format!(
        "{}/OR_ABI-L2-CMIP{}-{}C{:02}_{}_s{}_e{}_c{}.nc",
        partition_dir(root, scan),
        sector,
        mode,
        band,
        sat,
        goes_timestamp(scan),
        goes_timestamp(&end),
        goes_timestamp(&created)
    )
}

/// Full object path of a GLM Level 2 lightning file.
pub fn glm_object_path(sat: &str, scan: &DateTime<Utc>) -> String {
    let end = *scan + Duration::seconds(20);
    format!(
        "{}/OR_GLM-L2-LCFA_{}_s{}_e{}_c{}.nc",
        partition_dir("GLM-L2-LCFA", scan),
        sat,
        goes_timestamp(scan),
        goes_timestamp(&end),
        goes_timestamp(&end)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_abi_object_path() {
        let scan = Utc.with_ymd_and_hms(2020, 5, 23, 12, 1, 16).unwrap();
        let path = abi_object_path("C", "M6", 2, "G16", &scan);
        assert!(path.starts_with("ABI-L2-CMIPC/2020/144/12/OR_ABI-L2-CMIPC-M6C02_G16_s20201441201160_"));
        assert!(path.ends_with(".nc"));
    }

    #[test]
    fn test_glm_object_path() {
        let scan = Utc.with_ymd_and_hms(2020, 5, 23, 12, 0, 0).unwrap();
        assert_eq!(
            glm_object_path("G16", &scan),
            "GLM-L2-LCFA/2020/144/12/OR_GLM-L2-LCFA_G16_s20201441200000_e20201441200200_c20201441200200.nc"
        );
    }
}
