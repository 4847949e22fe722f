//! Entry metadata for archive members.
//!
//! Selected entries get a synthesized record: the current local time and a
//! fixed regular-file mode. Every other entry carries the timestamp and
//! permission bits of the file on disk.

use chrono::DateTime as ChronoDateTime;
use chrono::Datelike;
use chrono::Local;
use chrono::Timelike;
use std::fs::Metadata;
use std::time::SystemTime;
use zip::DateTime;
use zip::write::SimpleFileOptions;

/// Unix mode of a regular file with `rwxr-xr-x` permissions (`S_IFREG | 0755`).
pub const REGULAR_FILE_MODE_0755: u32 = 0o100_755;

/// Packs Unix mode bits into a ZIP external-attributes value.
///
/// ZIP archives created on Unix store `st_mode` in the upper 16 bits of the
/// 32-bit external-attributes field of the central directory; the lower 16
/// bits hold MS-DOS attributes and are left zero.
///
/// # Examples
///
/// ```
/// use wspack_core::stamp::REGULAR_FILE_MODE_0755;
/// use wspack_core::stamp::external_attributes;
///
/// assert_eq!(external_attributes(REGULAR_FILE_MODE_0755), 0x81ED_0000);
/// ```
#[must_use]
pub const fn external_attributes(mode: u32) -> u32 {
    mode << 16
}

/// Metadata policy for one archive entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryStamp {
    /// Synthesized modification time and mode.
    Stamped {
        /// Modification time recorded in the entry.
        modified: DateTime,
        /// Unix mode recorded in the entry.
        mode: u32,
    },

    /// Timestamp and permissions taken from the file on disk.
    Preserved,
}

impl EntryStamp {
    /// Stamps the current local time with [`REGULAR_FILE_MODE_0755`].
    #[must_use]
    pub fn stamped_now() -> Self {
        Self::Stamped {
            modified: zip_datetime(&Local::now()),
            mode: REGULAR_FILE_MODE_0755,
        }
    }

    /// Returns `true` for synthesized metadata.
    #[must_use]
    pub const fn is_stamped(&self) -> bool {
        matches!(self, Self::Stamped { .. })
    }

    /// Applies this policy to base file options.
    ///
    /// For [`EntryStamp::Preserved`] the file's own metadata is consulted; a
    /// platform that cannot report modification time or mode keeps the
    /// corresponding base option.
    #[must_use]
    pub fn apply(&self, options: SimpleFileOptions, metadata: &Metadata) -> SimpleFileOptions {
        match *self {
            Self::Stamped { modified, mode } => options
                .last_modified_time(modified)
                .unix_permissions(mode),
            Self::Preserved => {
                let options = match metadata.modified() {
                    Ok(mtime) => options.last_modified_time(zip_datetime_from_system(mtime)),
                    Err(_) => options,
                };
                with_disk_permissions(options, metadata)
            }
        }
    }
}

#[cfg(unix)]
fn with_disk_permissions(options: SimpleFileOptions, metadata: &Metadata) -> SimpleFileOptions {
    use std::os::unix::fs::PermissionsExt;
    options.unix_permissions(metadata.permissions().mode())
}

#[cfg(not(unix))]
fn with_disk_permissions(options: SimpleFileOptions, _metadata: &Metadata) -> SimpleFileOptions {
    options
}

/// Converts a local timestamp to a ZIP (MS-DOS) timestamp.
///
/// MS-DOS time covers 1980-2107 with two-second resolution; timestamps
/// outside that range fall back to the ZIP default (1980-01-01 00:00:00).
#[must_use]
pub fn zip_datetime(time: &ChronoDateTime<Local>) -> DateTime {
    let year = u16::try_from(time.year()).unwrap_or(0);
    #[allow(clippy::cast_possible_truncation)]
    let converted = DateTime::from_date_and_time(
        year,
        time.month() as u8,
        time.day() as u8,
        time.hour() as u8,
        time.minute() as u8,
        time.second() as u8,
    );
    converted.unwrap_or_default()
}

/// Converts a filesystem timestamp to a ZIP timestamp in local time.
#[must_use]
pub fn zip_datetime_from_system(time: SystemTime) -> DateTime {
    zip_datetime(&ChronoDateTime::<Local>::from(time))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;

    #[test]
    fn test_external_attributes_layout() {
        assert_eq!(external_attributes(REGULAR_FILE_MODE_0755) >> 16, 0o100_755);
        assert_eq!(external_attributes(REGULAR_FILE_MODE_0755) & 0xFFFF, 0);
        assert_eq!(external_attributes(0o100_644), 0o100_644 << 16);
    }

    #[test]
    fn test_zip_datetime_fields() {
        let local = Local.with_ymd_and_hms(2024, 3, 9, 14, 25, 36).unwrap();
        let dt = zip_datetime(&local);
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 3);
        assert_eq!(dt.day(), 9);
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.minute(), 25);
        assert_eq!(dt.second(), 36);
    }

    #[test]
    fn test_zip_datetime_out_of_range_falls_back() {
        let local = Local.with_ymd_and_hms(1975, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(zip_datetime(&local), DateTime::default());
    }

    #[test]
    fn test_zip_datetime_from_system() {
        // 2001-06-15 in every time zone
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(992_606_400);
        let dt = zip_datetime_from_system(time);
        assert_eq!(dt.year(), 2001);
        assert_eq!(dt.month(), 6);
    }

    #[test]
    fn test_stamped_now_uses_fixed_mode() {
        let stamp = EntryStamp::stamped_now();
        assert!(stamp.is_stamped());
        match stamp {
            EntryStamp::Stamped { modified, mode } => {
                assert_eq!(mode, REGULAR_FILE_MODE_0755);
                assert_eq!(i32::from(modified.year()), Local::now().year());
            }
            EntryStamp::Preserved => unreachable!(),
        }
        assert!(!EntryStamp::Preserved.is_stamped());
    }
}
