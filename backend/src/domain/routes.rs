//! Application route table.
//!
//! Maps a location path onto the page to mount and the guard protecting it.
//! Patterns are matched segment by segment; `:name` captures exactly one
//! non-empty segment. Segments are percent-decoded before matching, so
//! captured values arrive decoded. Anything unmatched is the not-found page,
//! which is never guarded.

use std::borrow::Cow;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use super::Guard;
use super::guard::{HOME_PATH, LOGIN_PATH};

/// Page components mounted by the shell. Their bodies live elsewhere; the
/// route table only names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Login,
    Dashboard,
    CreateReport,
    EditReport,
    ReportDetail,
    UserManagement,
    LocationManagement,
    NotFound,
}

impl PageKind {
    /// Page title as shown in the browser tab.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "Masuk",
            Self::Dashboard => "Beranda",
            Self::CreateReport => "Buat Laporan",
            Self::EditReport => "Ubah Laporan",
            Self::ReportDetail => "Detail Laporan",
            Self::UserManagement => "Manajemen Akun",
            Self::LocationManagement => "Manajemen Lokasi",
            Self::NotFound => "Halaman Tidak Ditemukan",
        }
    }
}

/// One row of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub pattern: &'static str,
    pub guard: Option<Guard>,
    pub page: PageKind,
}

/// The fixed route table, in match order.
pub const ROUTES: [RouteEntry; 7] = [
    RouteEntry {
        pattern: LOGIN_PATH,
        guard: None,
        page: PageKind::Login,
    },
    RouteEntry {
        pattern: HOME_PATH,
        guard: Some(Guard::Protected),
        page: PageKind::Dashboard,
    },
    RouteEntry {
        pattern: "/create-report",
        guard: Some(Guard::Protected),
        page: PageKind::CreateReport,
    },
    RouteEntry {
        pattern: "/edit-report/:id",
        guard: Some(Guard::Protected),
        page: PageKind::EditReport,
    },
    RouteEntry {
        pattern: "/report/:id",
        guard: Some(Guard::Protected),
        page: PageKind::ReportDetail,
    },
    RouteEntry {
        pattern: "/admin/users",
        guard: Some(Guard::Admin),
        page: PageKind::UserManagement,
    },
    RouteEntry {
        pattern: "/admin/locations",
        guard: Some(Guard::Admin),
        page: PageKind::LocationManagement,
    },
];

/// Parameters captured from `:name` segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(Vec<(&'static str, String)>);

impl RouteParams {
    /// Value captured for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RouteParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Result of matching a path against [`ROUTES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub page: PageKind,
    pub guard: Option<Guard>,
    pub params: RouteParams,
}

impl RouteMatch {
    fn not_found() -> Self {
        Self {
            page: PageKind::NotFound,
            guard: None,
            params: RouteParams::default(),
        }
    }
}

/// Match `path` (without query string) against the route table.
///
/// # Examples
/// ```
/// use portal::domain::{Guard, PageKind, match_route};
///
/// let hit = match_route("/report/42");
/// assert_eq!(hit.page, PageKind::ReportDetail);
/// assert_eq!(hit.guard, Some(Guard::Protected));
/// assert_eq!(hit.params.get("id"), Some("42"));
///
/// assert_eq!(match_route("/some/unknown/path").page, PageKind::NotFound);
/// ```
#[must_use]
pub fn match_route(path: &str) -> RouteMatch {
    let Some(segments) = decode_segments(normalise(path)) else {
        return RouteMatch::not_found();
    };
    ROUTES
        .iter()
        .find_map(|entry| {
            capture(entry.pattern, &segments).map(|params| RouteMatch {
                page: entry.page,
                guard: entry.guard,
                params,
            })
        })
        .unwrap_or_else(RouteMatch::not_found)
}

/// Drop one trailing slash, keeping the root intact.
fn normalise(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(rest) if !rest.is_empty() => rest,
        _ => path,
    }
}

/// Percent-decode each segment. `None` if any segment is not UTF-8.
fn decode_segments(path: &str) -> Option<Vec<Cow<'_, str>>> {
    path.split('/')
        .map(|segment| urlencoding::decode(segment).ok())
        .collect()
}

fn capture(pattern: &'static str, given: &[Cow<'_, str>]) -> Option<RouteParams> {
    if pattern.split('/').count() != given.len() {
        return None;
    }
    let mut params = Vec::new();
    for (expected, actual) in pattern.split('/').zip(given) {
        if let Some(name) = expected.strip_prefix(':') {
            if actual.is_empty() {
                return None;
            }
            params.push((name, actual.to_string()));
        } else if expected != actual {
            return None;
        }
    }
    Some(RouteParams(params))
}
