use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

pub const ROLE_LEADER: &str = "Leader";
pub const ROLE_MEMBER: &str = "Member";

pub const PLACEHOLDER_HREF: &str = "#";
pub const PLACEHOLDER_PICTURE: &str = "https://via.placeholder.com/150";

/// One row of the published roster sheet.
///
/// Columns are positional: name, profile link, role, picture URL. Every field is
/// stored trimmed; missing columns are empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MemberRecord {
    pub name: String,
    pub profile_link: String,
    pub role: String,
    pub picture_url: String,
}

impl MemberRecord {
    pub fn new(name: &str, profile_link: &str, role: &str, picture_url: &str) -> Self {
        Self {
            name: name.to_string(),
            profile_link: profile_link.to_string(),
            role: role.to_string(),
            picture_url: picture_url.to_string(),
        }
    }

    pub fn is_leader(&self) -> bool {
        self.role == ROLE_LEADER
    }

    pub fn is_member(&self) -> bool {
        self.role == ROLE_MEMBER
    }

    pub fn profile_href(&self) -> &str {
        if self.profile_link.is_empty() {
            PLACEHOLDER_HREF
        } else {
            &self.profile_link
        }
    }

    pub fn picture_src(&self) -> &str {
        if self.picture_url.is_empty() {
            PLACEHOLDER_PICTURE
        } else {
            &self.picture_url
        }
    }

    /// Link text shown on a card: the href without its scheme and `www.` prefix.
    pub fn short_link(&self) -> String {
        short_link(self.profile_href())
    }

    /// `needle` must already be lower-cased.
    pub fn matches_filter(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || (!self.role.is_empty() && self.role.to_lowercase().contains(needle))
    }
}

fn link_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https?://(www\.)?").expect("static regex"))
}

pub fn short_link(href: &str) -> String {
    link_prefix_re().replace(href, "").into_owned()
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub rows: usize,
    pub dropped_unnamed: usize,
    pub short_rows: usize,
}

/// Decodes the sheet export. The first line is a header and is always skipped.
///
/// Fields are split on every `,`; quoted fields are not understood.
pub fn decode(text: &str) -> Vec<MemberRecord> {
    decode_with_report(text).0
}

pub fn decode_with_report(text: &str) -> (Vec<MemberRecord>, DecodeReport) {
    let mut report = DecodeReport::default();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return (Vec::new(), report);
    }

    let mut out: Vec<MemberRecord> = Vec::new();
    for line in trimmed.split('\n').skip(1) {
        let line = line.strip_suffix('\r').unwrap_or(line);
        report.rows += 1;

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 4 {
            report.short_rows += 1;
        }
        let field = |idx: usize| fields.get(idx).map(|f| f.trim()).unwrap_or("");

        let name = field(0);
        if name.is_empty() {
            report.dropped_unnamed += 1;
            continue;
        }
        out.push(MemberRecord::new(name, field(1), field(2), field(3)));
    }
    (out, report)
}

pub fn leaders(all: &[MemberRecord]) -> Vec<MemberRecord> {
    all.iter().filter(|m| m.is_leader()).cloned().collect()
}

pub fn default_members(all: &[MemberRecord]) -> Vec<MemberRecord> {
    all.iter().filter(|m| m.is_member()).cloned().collect()
}

/// Search over every record, leaders included. The filter is lower-cased but not trimmed.
pub fn filter_members(all: &[MemberRecord], filter_text: &str) -> Vec<MemberRecord> {
    let needle = filter_text.to_lowercase();
    all.iter()
        .filter(|m| m.matches_filter(&needle))
        .cloned()
        .collect()
}
