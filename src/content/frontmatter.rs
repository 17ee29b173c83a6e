//! Front-matter parsing
//!
//! Documents open with a YAML block fenced by `---` lines. Each content kind
//! has its own schema; fields missing from a schema's required set make the
//! whole document invalid.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::path::Path;

use super::ContentError;

/// Comma-separated string (or YAML list) into trimmed, non-empty tokens
fn comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct CommaList;

    impl<'de> Visitor<'de> for CommaList {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a comma-separated string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(split_comma_list(value))
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                let item = item.trim();
                if !item.is_empty() {
                    vec.push(item.to_string());
                }
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(CommaList)
}

/// Any YAML scalar as its string form (`date: 2024` is a number in YAML)
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct Scalar;

    impl<'de> Visitor<'de> for Scalar {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(Scalar)
}

/// Split a comma-joined metadata field
pub fn split_comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Post front-matter
#[derive(Debug, Clone, Deserialize)]
pub struct PostFrontMatter {
    pub title: String,
    #[serde(deserialize_with = "scalar_string")]
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "comma_list")]
    pub tags: Vec<String>,
}

/// Work item front-matter
#[derive(Debug, Clone, Deserialize)]
pub struct WorkFrontMatter {
    pub title: String,
    pub order: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "comma_list")]
    pub technologies: Vec<String>,
}

/// Split a document into its YAML block and body
///
/// Returns `None` when the document does not open with a closed `---` block.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let content = content.trim_start_matches('\u{feff}').trim_start();
    let rest = content.strip_prefix("---")?;
    let rest = rest.trim_start_matches([' ', '\t']);
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    // Closing fence is a line holding only `---`
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parse a document's front-matter against schema `T`
pub fn parse<'a, T: DeserializeOwned>(
    path: &Path,
    content: &'a str,
) -> Result<(T, &'a str), ContentError> {
    let (yaml, body) = split(content).ok_or_else(|| ContentError::MissingFrontMatter {
        path: path.to_path_buf(),
    })?;

    let front_matter = serde_yaml::from_str(yaml).map_err(|source| ContentError::FrontMatter {
        path: path.to_path_buf(),
        source,
    })?;

    Ok((front_matter, body))
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> &'static Path {
        Path::new("test.mdx")
    }

    #[test]
    fn test_parse_post_frontmatter() {
        let content = r#"---
title: Speeding up WordPress
date: 2024-01-15
description: Caching tips
tags: wordpress, performance ,  php
---

This is the content.
"#;

        let (fm, body) = parse::<PostFrontMatter>(path(), content).unwrap();
        assert_eq!(fm.title, "Speeding up WordPress");
        assert_eq!(fm.date, "2024-01-15");
        assert_eq!(fm.description.as_deref(), Some("Caching tips"));
        assert_eq!(fm.tags, vec!["wordpress", "performance", "php"]);
        assert!(fm.image.is_none());
        assert!(body.contains("This is the content."));
        assert!(!body.contains("---"));
    }

    #[test]
    fn test_missing_tags_is_empty() {
        let content = "---\ntitle: A\ndate: 2024-01-01\ntags:\n---\nbody";
        let (fm, body) = parse::<PostFrontMatter>(path(), content).unwrap();
        assert!(fm.tags.is_empty());
        assert!(fm.description.is_none());
        assert_eq!(body, "body");

        let content = "---\ntitle: A\ndate: 2024-01-01\n---\n";
        let (fm, _) = parse::<PostFrontMatter>(path(), content).unwrap();
        assert!(fm.tags.is_empty());
    }

    #[test]
    fn test_yaml_list_tags() {
        let content = "---\ntitle: A\ndate: 2024-01-01\ntags:\n  - rust\n  - ' web '\n---\n";
        let (fm, _) = parse::<PostFrontMatter>(path(), content).unwrap();
        assert_eq!(fm.tags, vec!["rust", "web"]);
    }

    #[test]
    fn test_parse_work_frontmatter() {
        let content = r#"---
title: Coffee Shop
order: 4
image: /images/coffee.png
link: https://coffee.example.com
technologies: WordPress,WooCommerce
description: Online store
---
"#;
        let (fm, _) = parse::<WorkFrontMatter>(path(), content).unwrap();
        assert_eq!(fm.order, 4);
        assert_eq!(fm.link.as_deref(), Some("https://coffee.example.com"));
        assert_eq!(fm.technologies, vec!["WordPress", "WooCommerce"]);
    }

    #[test]
    fn test_work_without_order_is_rejected() {
        let content = "---\ntitle: No order\n---\n";
        let err = parse::<WorkFrontMatter>(path(), content).unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
        assert!(err.to_string().contains("order"));
    }

    #[test]
    fn test_missing_front_matter() {
        let err = parse::<PostFrontMatter>(path(), "# Just markdown\n").unwrap_err();
        assert!(matches!(err, ContentError::MissingFrontMatter { .. }));

        let unclosed = "---\ntitle: A\n\nno closing fence";
        assert!(split(unclosed).is_none());
    }

    #[test]
    fn test_split_crlf_and_empty_block() {
        let (yaml, body) = split("---\r\ntitle: A\r\n---\r\nBody").unwrap();
        assert_eq!(yaml.trim(), "title: A");
        assert_eq!(body, "Body");

        let (yaml, body) = split("---\n---\nBody").unwrap();
        assert_eq!(yaml, "");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_needs_a_bare_closing_fence() {
        let content = "---\ntitle: A\ndescription: |\n  ----\n  ---notes\n---  \nBody\n";
        let (yaml, body) = split(content).unwrap();
        assert!(yaml.contains("---notes"));
        assert_eq!(body, "Body\n");

        let (fm, _) = parse::<WorkFrontMatter>(path(), "---\ntitle: W\norder: 2\ndescription: ----\n---\n").unwrap();
        assert_eq!(fm.description.as_deref(), Some("----"));

        assert!(split("---\ntitle: A\n---- not a fence\n").is_none());
    }

    #[test]
    fn test_numeric_date_is_kept_as_text() {
        let content = "---\ntitle: A\ndate: 2024\n---\n";
        let (fm, _) = parse::<PostFrontMatter>(path(), content).unwrap();
        assert_eq!(fm.date, "2024");
        assert!(parse_date_string(&fm.date).is_none());
    }

    #[test]
    fn test_parse_date_formats() {
        let dt = parse_date_string("2024-01-15 10:30:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");
        assert!(parse_date_string("2024/03/02").is_some());
        assert!(parse_date_string("2024-03-02T08:00:00+02:00").is_some());
        assert!(parse_date_string("last tuesday").is_none());
    }
}
