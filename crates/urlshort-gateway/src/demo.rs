//! Demo data served when no mapping documents are configured.

use urlshort_core::Mapping;

pub const YAML: &str = "\
- path: /urlshort
  url: https://github.com/gophercises/urlshort
- path: /urlshort-final
  url: https://github.com/gophercises/urlshort/tree/solution
";

pub const JSON: &str = r#"[
    {
        "path": "/testeseufdp",
        "url": "https://google.com/"
    },
    {
        "path": "/meugithub",
        "url": "https://github.com/vncsb"
    }
]"#;

/// Entries written into the persistent store at startup.
pub fn store_seed() -> Mapping {
    [
        ("/bolt", "https://github.com/boltdb/bolt"),
        ("/bolt-buckets", "https://github.com/boltdb/bolt#using-buckets"),
    ]
    .into_iter()
    .collect()
}

/// The in-memory table consulted just before the default handler.
pub fn table() -> Mapping {
    [
        ("/urlshort-godoc", "https://godoc.org/github.com/gophercises/urlshort"),
        ("/yaml-godoc", "https://godoc.org/gopkg.in/yaml.v2"),
    ]
    .into_iter()
    .collect()
}
