//! sd-dispatch: secure an envelope and deliver it, or print it.
//!
//! Security switches and the secret key come from the environment:
//! `SD_CRYPTO_SUPPORT_SIGNATURE`, `SD_CRYPTO_SUPPORT_ENCRYPTION`,
//! `SD_CRYPTO_SECRET_KEY`.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use sd_01_token_cache::{ClientCredentials, TokenCacheConfig};
use sd_02_envelope_security::{
    CryptoConfig, EnvelopeBuilder, EnvelopeSecurityApi, SecurityConfig, SecurityPolicyEngine,
};
use sd_03_dispatcher::{DispatchConfig, Dispatcher, ReqwestTransport};
use sd_telemetry::{init_logging, TelemetryConfig};
use shared_crypto::AesGcmSha256Provider;
use shared_types::{generate_unique_id, Envelope, Header, Message, TrackerState};

/// Secure Dispatch CLI
#[derive(Parser, Debug)]
#[command(name = "sd-dispatch")]
#[command(about = "Secure message envelopes and deliver them to a remote party")]
struct Cli {
    /// Log level filter, overriding SD_LOG_LEVEL
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Secure the envelope and POST it to the destination
    Send {
        #[command(flatten)]
        envelope: EnvelopeArgs,

        /// Destination URI
        #[arg(long)]
        uri: String,

        /// OAuth2 client id
        #[arg(long, env = "SD_CLIENT_ID")]
        client_id: String,

        /// OAuth2 client secret
        #[arg(long, env = "SD_CLIENT_SECRET", hide_env_values = true)]
        client_secret: String,

        /// Identity provider token endpoint
        #[arg(long, env = "SD_TOKEN_ENDPOINT")]
        token_endpoint: String,
    },

    /// Secure the envelope and print it without sending
    Render {
        #[command(flatten)]
        envelope: EnvelopeArgs,

        /// Pretty-print the envelope
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Args, Debug)]
struct EnvelopeArgs {
    /// File holding the JSON message body ("-" for stdin)
    #[arg(short, long)]
    message: PathBuf,

    /// Protocol version
    #[arg(long, default_value = "1.0.0")]
    protocol_version: String,

    /// Message id (generated when omitted)
    #[arg(long)]
    message_id: Option<String>,

    /// Action
    #[arg(long, default_value = "on-search")]
    action: String,

    /// Sender id
    #[arg(long, default_value = "")]
    sender_id: String,

    /// Receiver id
    #[arg(long, default_value = "")]
    receiver_id: String,

    /// Status
    #[arg(long, default_value = "succ")]
    status: String,

    /// Total record count
    #[arg(long)]
    total_count: Option<u32>,

    /// Completed record count
    #[arg(long)]
    completed_count: Option<u32>,
}

impl EnvelopeArgs {
    fn header(&self) -> Header {
        EnvelopeBuilder::build_header(&TrackerState {
            version: self.protocol_version.clone(),
            message_id: self
                .message_id
                .clone()
                .unwrap_or_else(|| generate_unique_id("M")),
            message_ts: chrono::Utc::now().to_rfc3339(),
            action: self.action.clone(),
            sender_id: self.sender_id.clone(),
            receiver_id: self.receiver_id.clone(),
            status: self.status.clone(),
            total_count: self.total_count,
            completed_count: self.completed_count,
            ..TrackerState::default()
        })
    }

    fn read_message(&self) -> Result<Message> {
        let text = if self.message.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read message from stdin")?;
            buf
        } else {
            std::fs::read_to_string(&self.message)
                .with_context(|| format!("Failed to read {}", self.message.display()))?
        };
        Message::plaintext(text.trim()).context("Message body is not a JSON object or array")
    }

    fn envelope(&self) -> Result<Envelope> {
        Ok(EnvelopeBuilder::build_envelope(
            self.header(),
            self.read_message()?,
        ))
    }
}

fn security_engine() -> Result<Arc<SecurityPolicyEngine>> {
    let config = SecurityConfig::from_env();
    let key = CryptoConfig::from_env()
        .secret_key()
        .context("Invalid SD_CRYPTO_SECRET_KEY")?;
    let engine = SecurityPolicyEngine::new(config, Arc::new(AesGcmSha256Provider), key)
        .context("Failed to configure envelope security")?;
    info!(policy = %engine.policy(), "Envelope security configured");
    Ok(Arc::new(engine))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let telemetry = TelemetryConfig::from_env().with_log_level(cli.log_level.as_deref());
    init_logging(&telemetry).context("Failed to initialize logging")?;

    let security = security_engine()?;

    match cli.command {
        Command::Render { envelope, pretty } => {
            let secured = security.secure(envelope.envelope()?)?;
            println!("{}", EnvelopeBuilder::render(&secured, pretty)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Send {
            envelope,
            uri,
            client_id,
            client_secret,
            token_endpoint,
        } => {
            let token_config = TokenCacheConfig::from_env()?;
            let dispatch_config = DispatchConfig::from_env()?;

            let tokens = sd_01_token_cache::default_cache(&token_config)?;
            let transport = ReqwestTransport::new(&dispatch_config)?;
            let dispatcher = Dispatcher::new(security, Arc::new(tokens), Arc::new(transport));

            let credentials = ClientCredentials::new(client_id, client_secret, token_endpoint);
            match dispatcher.send(envelope.envelope()?, &uri, &credentials).await {
                Ok(status) => {
                    println!("{}", status);
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    error!(code = err.code(), error = %err, "Dispatch failed");
                    eprintln!("{}", serde_json::to_string(&err.to_payload())?);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
