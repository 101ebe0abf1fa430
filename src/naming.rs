use chrono::NaiveDate;

/// Compound suffix every daily flat file carries.
pub const FLAT_FILE_SUFFIX: &str = ".csv.gz";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Extracts the date stamp from a flat-file name such as
/// `2024-01-02.csv.gz`. Returns `None` for anything that is not a
/// strictly formed `YYYY-MM-DD` stem under the expected suffix.
pub fn date_stamp(file_name: &str) -> Option<NaiveDate> {
    let stem = file_name.strip_suffix(FLAT_FILE_SUFFIX)?;
    // chrono accepts single-digit months and days, the naming contract
    // does not.
    if !is_date_shaped(stem) {
        return None;
    }
    NaiveDate::parse_from_str(stem, DATE_FORMAT).ok()
}

fn is_date_shaped(stem: &str) -> bool {
    let bytes = stem.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
