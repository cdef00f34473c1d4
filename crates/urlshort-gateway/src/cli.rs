use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "URLSHORT_LISTEN_ADDR";
pub const DB_PATH_ENV: &str = "URLSHORT_DB_PATH";
pub const YAML_FILE_ENV: &str = "URLSHORT_YAML_FILE";
pub const JSON_FILE_ENV: &str = "URLSHORT_JSON_FILE";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DB_PATH: &str = urlshort_storage::DEFAULT_STORE_PATH;

#[derive(Debug, Parser)]
#[command(name = "urlshort", about = "Redirects request paths to their mapped URLs")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Directory of the persistent redirect store.
    #[arg(long, env = DB_PATH_ENV, default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// YAML mapping document; the built-in demo document is used when absent.
    #[arg(long, env = YAML_FILE_ENV)]
    pub yaml_file: Option<PathBuf>,

    /// JSON mapping document; the built-in demo document is used when absent.
    #[arg(long, env = JSON_FILE_ENV)]
    pub json_file: Option<PathBuf>,
}
