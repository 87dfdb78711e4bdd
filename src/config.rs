use std::path::PathBuf;

use color_eyre::eyre::Context;
use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Config {
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub hf_token: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_org")]
    pub org: String,
    #[serde(default = "default_watched_space")]
    pub watched_space: String,
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
}

fn default_api_base() -> String {
    "https://huggingface.co/api".into()
}

fn default_org() -> String {
    "jane-street".into()
}

fn default_watched_space() -> String {
    "jane-street/puzzle".into()
}

fn default_state_file() -> PathBuf {
    "state.json".into()
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenvy::dotenv().ok();
    envy::from_env::<Config>()
        .wrap_err("failed to load config")
        .unwrap()
});
