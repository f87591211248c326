use std::sync::Arc;

use axum::Router;

use danki::config::Config;
use danki::routes::build_router;
use danki::state::AppState;
use danki::vocab::VocabTable;

use super::fixtures::verb_table;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
}

// Config is built directly; set_var would race between parallel tests.
fn test_config(max_rank: Option<u32>, max_sessions: usize) -> Config {
    Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 3000,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        vocab_path: "unused.tsv".to_string(),
        max_rank,
        max_sessions,
        cors_origin: "http://localhost:5173".to_string(),
        static_dir: "./static".to_string(),
    }
}

pub fn spawn_with(table: VocabTable, max_rank: Option<u32>, max_sessions: usize) -> TestApp {
    let config = test_config(max_rank, max_sessions);
    let state = AppState::new(Arc::new(table), &config);
    let app = build_router(state.clone());

    TestApp { app, state, config }
}

pub fn spawn_test_app() -> TestApp {
    spawn_with(verb_table(), None, 16)
}
