//! Parser for the device's container image listing text.
//!
//! The device returns the raw output of its image listing command: a
//! fixed-width table, often preceded by unrelated diagnostic noise (shell
//! banners, warnings). The parser skips everything up to the header line
//! and is strict about the table body from there on.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One container image on the device.
///
/// Built only from a well-formed table row, and rebuilt fresh on every
/// listing - never cached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerImage {
    pub name: String,
    pub tag: String,
    pub image_id: String,
}

lazy_static! {
    static ref HEADER_PATTERN: Regex =
        Regex::new(r"^REPOSITORY\s{2,}TAG\s{2,}IMAGE ID\s{2,}.*$").unwrap();
    static ref ROW_PATTERN: Regex =
        Regex::new(r"^(?P<name>\S+)\s{2,}(?P<tag>\S+)\s{2,}(?P<id>\S+)").unwrap();
}

/// Parse container image listing text into records.
///
/// Lines before the `REPOSITORY  TAG  IMAGE ID  ...` header are ignored,
/// whatever they contain. After the header every non-blank line must be a
/// row of at least three columns separated by two or more whitespace
/// characters (trailing columns such as CREATED and SIZE are ignored);
/// anything else fails with [`Error::MalformedRow`]. Blank lines inside
/// the table are skipped, not treated as terminators.
///
/// A header with no rows yields an empty list. So does fully empty input -
/// the only case where the header requirement is waived.
pub fn parse_image_table(text: &str) -> Result<Vec<ContainerImage>, Error> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut images = Vec::new();
    let mut found_header = false;
    for line in text.trim().lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !found_header {
            found_header = HEADER_PATTERN.is_match(line);
            continue;
        }

        let row = ROW_PATTERN.captures(line).ok_or_else(|| Error::MalformedRow {
            line: line.to_string(),
        })?;
        images.push(ContainerImage {
            name: row["name"].to_string(),
            tag: row["tag"].to_string(),
            image_id: row["id"].to_string(),
        });
    }

    if !found_header {
        return Err(Error::MissingHeader {
            text: text.to_string(),
        });
    }
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "REPOSITORY                   TAG         IMAGE ID      CREATED       SIZE";
    const ROW0: &str =
        "docker.io/library/alpine0  3.18.0.0  5e2b554c1c450  40 weeks ago  7.620 MB";
    const ROW1: &str =
        "docker.io/library/alpine1  3.18.0.1  5e2b554c1c451  41 weeks ago  7.621 MB";

    #[test]
    fn empty_input_is_an_empty_listing() {
        assert_eq!(parse_image_table("").unwrap(), Vec::new());
    }

    #[test]
    fn parses_rows_after_header() {
        let images = parse_image_table(&format!("{HEADER}\n{ROW0}\n{ROW1}")).unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(
            images[0],
            ContainerImage {
                name: "docker.io/library/alpine0".to_string(),
                tag: "3.18.0.0".to_string(),
                image_id: "5e2b554c1c450".to_string(),
            }
        );
        assert_eq!(images[1].name, "docker.io/library/alpine1");
        assert_eq!(images[1].tag, "3.18.0.1");
        assert_eq!(images[1].image_id, "5e2b554c1c451");
    }

    #[test]
    fn header_with_no_rows_is_an_empty_listing() {
        assert_eq!(parse_image_table(HEADER).unwrap(), Vec::new());
    }

    #[test]
    fn noise_before_header_is_skipped() {
        // Everything before the header is ignored, including lines that
        // would parse as rows.
        let text = format!("bogus\n \n\n{ROW0}\n{HEADER}\n{ROW0}\n\n\n{ROW1}");
        let images = parse_image_table(&text).unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].name, "docker.io/library/alpine0");
        assert_eq!(images[1].name, "docker.io/library/alpine1");
    }

    #[test]
    fn blank_lines_inside_the_table_are_skipped() {
        let images = parse_image_table(&format!("{HEADER}\n{ROW0}\n\n{ROW1}\n")).unwrap();
        assert_eq!(images.len(), 2);
    }

    #[test]
    fn missing_header_fails() {
        let err = parse_image_table(&format!("{ROW0}\n{ROW1}")).unwrap_err();
        assert!(matches!(err, Error::MissingHeader { .. }));
        assert!(err.to_string().contains("container image header"));
    }

    #[test]
    fn whitespace_only_input_fails_like_missing_header() {
        assert!(matches!(
            parse_image_table(" \n "),
            Err(Error::MissingHeader { .. })
        ));
    }

    #[test]
    fn row_with_too_few_columns_fails() {
        let err =
            parse_image_table(&format!("{HEADER}\ndocker.io/library/alpine0  3.18.0.0"))
                .unwrap_err();
        assert!(matches!(err, Error::MalformedRow { .. }));
        assert!(err.to_string().contains("docker.io/library/alpine0"));
    }

    #[test]
    fn garbage_row_fails() {
        let err = parse_image_table(&format!("{HEADER}\n$")).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { line } if line == "$"));
    }

    #[test]
    fn single_spaced_columns_are_not_column_breaks() {
        // "IMAGE ID" itself contains a single space; single spaces inside
        // a field must not split it.
        let err = parse_image_table(&format!("{HEADER}\nalpine 3.18 abc123")).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { .. }));
    }
}
