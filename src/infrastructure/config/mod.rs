use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub max_upload_bytes: usize,
    // Synthesis backend
    pub tts_backend: TtsBackend,
    // AWS Polly
    pub aws_region: String,
    pub polly_voice_id: String,
    pub polly_engine: String,
    // OpenAI
    pub openai_api_key: Option<String>,
    pub openai_tts_model: String,
    pub openai_tts_voice: String,
    // espeak-ng
    pub espeak_path: PathBuf,
    pub espeak_voice: Option<String>,
    pub espeak_rate: Option<u32>,
    pub tts_temp_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Which synthesis strategy serves every request of this process
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TtsBackend {
    Espeak,
    Polly,
    OpenAi,
}

impl std::str::FromStr for TtsBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "espeak" | "local" => Ok(TtsBackend::Espeak),
            "polly" => Ok(TtsBackend::Polly),
            "openai" => Ok(TtsBackend::OpenAi),
            other => Err(format!(
                "Unknown TTS_BACKEND '{}', expected espeak, polly or openai",
                other
            )),
        }
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| (10 * 1024 * 1024).to_string())
                .parse()?,
            tts_backend: env::var("TTS_BACKEND")
                .unwrap_or_else(|_| "espeak".to_string())
                .parse()?,
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            polly_voice_id: env::var("POLLY_VOICE_ID").unwrap_or_else(|_| "Joanna".to_string()),
            polly_engine: env::var("POLLY_ENGINE").unwrap_or_else(|_| "neural".to_string()),
            openai_api_key: optional("OPENAI_API_KEY"),
            openai_tts_model: env::var("OPENAI_TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string()),
            openai_tts_voice: env::var("OPENAI_TTS_VOICE").unwrap_or_else(|_| "alloy".to_string()),
            espeak_path: env::var("ESPEAK_PATH")
                .unwrap_or_else(|_| "espeak-ng".to_string())
                .into(),
            espeak_voice: optional("ESPEAK_VOICE"),
            espeak_rate: optional("ESPEAK_RATE").map(|rate| rate.parse()).transpose()?,
            tts_temp_dir: optional("TTS_TEMP_DIR").map(PathBuf::from),
        };

        if config.tts_backend == TtsBackend::OpenAi && config.openai_api_key.is_none() {
            return Err("OPENAI_API_KEY is required when TTS_BACKEND=openai".into());
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
