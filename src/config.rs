use std::env;
use std::path::PathBuf;

/// Credential value that keeps a gateway in offline/demo mode.
///
/// Shipping configs use this placeholder so the server comes up with zero
/// external dependencies; replacing it with a real key enables the gateway.
pub const DEMO_CREDENTIAL: &str = "demo_key_please_replace";

const DEFAULT_INDEX_NAME: &str = "personal-assistant";
const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";
const DEFAULT_PORT: u16 = 8000;

/// Which vector index backs the knowledge store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Pinecone,
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Pinecone => "pinecone",
            StoreBackend::Memory => "memory",
        }
    }
}

/// Process-wide settings, read from the environment once at startup and
/// shared immutably afterwards.
#[derive(Debug, Clone)]
pub struct Settings {
    pub pinecone_api_key: Option<String>,
    pub pinecone_environment: String,
    pub pinecone_index_name: String,
    pub pinecone_index_host: Option<String>,
    pub store_backend: StoreBackend,
    pub llm_api_url: Option<String>,
    pub llm_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub embedding_model: String,
    pub embedding_api_url: Option<String>,
    pub port: u16,
    pub log_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        let llm_api_url = read_opt("LLM_API_URL");
        let embedding_api_url = read_opt("EMBEDDING_API_URL").or_else(|| llm_api_url.clone());
        let store_backend = match read_opt("STORE_BACKEND").as_deref() {
            Some("memory") => StoreBackend::Memory,
            _ => StoreBackend::Pinecone,
        };

        Settings {
            pinecone_api_key: read_opt("PINECONE_API_KEY"),
            pinecone_environment: read_opt("PINECONE_ENVIRONMENT").unwrap_or_default(),
            pinecone_index_name: read_opt("PINECONE_INDEX_NAME")
                .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            pinecone_index_host: read_opt("PINECONE_INDEX_HOST"),
            store_backend,
            llm_api_url,
            llm_api_key: read_opt("LLM_API_KEY"),
            openai_api_key: read_opt("OPENAI_API_KEY"),
            embedding_model: read_opt("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            embedding_api_url,
            port: read_opt("PORT")
                .and_then(|val| val.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
            log_dir: read_opt("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("logs")),
        }
    }

    /// True when the Pinecone backend has no usable credential.
    ///
    /// The memory backend never counts as offline: it needs no credentials.
    pub fn store_offline(&self) -> bool {
        if self.store_backend == StoreBackend::Memory {
            return false;
        }
        match self.pinecone_api_key.as_deref() {
            None | Some("") | Some(DEMO_CREDENTIAL) => true,
            Some(_) => false,
        }
    }

    /// True when no generation provider is usable.
    ///
    /// The sentinel OpenAI key forces demo mode even if a self-hosted URL is
    /// set, matching the behavior operators already rely on.
    pub fn generation_offline(&self) -> bool {
        if self.openai_api_key.as_deref() == Some(DEMO_CREDENTIAL) {
            return true;
        }
        self.llm_api_url.is_none() && self.openai_api_key.is_none()
    }

    /// Resolved host for the Pinecone index.
    ///
    /// `PINECONE_INDEX_HOST` wins; otherwise the legacy
    /// `{index}.svc.{environment}.pinecone.io` form is derived.
    pub fn pinecone_host(&self) -> String {
        if let Some(host) = &self.pinecone_index_host {
            return host.trim_end_matches('/').to_string();
        }
        format!(
            "https://{}.svc.{}.pinecone.io",
            self.pinecone_index_name, self.pinecone_environment
        )
    }
}

fn read_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|val| !val.trim().is_empty())
}
