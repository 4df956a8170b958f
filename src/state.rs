use rollcall_config::CorsConfig;

use crate::repositories::Repositories;

#[derive(Clone, Debug)]
pub struct AppState {
    pub repos: Repositories,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(repos: Repositories, cors_config: CorsConfig) -> Self {
        Self { repos, cors_config }
    }
}
