use std::path::{Path, PathBuf};

use anyhow::Context;
use chat_message_model::config::Config;
use chat_message_model::message::MessageModel;
use chat_message_model::resolver::{MessageResolver, NameCache};
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde_json::{Value, json};
use tracing::{debug, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "chat-message-model")]
#[command(version)]
#[command(about = "Inspect chat messages: delivery status, mentions and rich payloads")]
struct CliArgs {
    /// Path to config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Generate example config and exit
    #[arg(long)]
    generate_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the derived delivery status
    Status(MessageInput),
    /// Print mentioned user ids, and the styled text when names are given
    Mentions(MentionsCommand),
    /// Print the decoded rich-message payload
    Payload(MessageInput),
}

#[derive(ClapArgs, Debug)]
struct MessageInput {
    /// JSON file holding one message record
    message: PathBuf,
}

#[derive(ClapArgs, Debug)]
struct MentionsCommand {
    #[command(flatten)]
    input: MessageInput,
    /// JSON object mapping user ids to display names
    #[arg(long)]
    names: Option<PathBuf>,
}

const EXAMPLE_CONFIG: &str = include_str!("../example-config.yaml");
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.generate_config {
        println!("{}", EXAMPLE_CONFIG);
        return Ok(());
    }

    let config = load_config(&args.config)?;
    init_logging(&config);

    let Some(command) = args.command else {
        info!("no command given; see --help");
        return Ok(());
    };

    let resolver = MessageResolver::from_config(&config);
    let output = run_command(command, &resolver)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config_path = path.to_string_lossy().to_string();
    if uses_builtin_defaults(path, std::env::var_os("CONFIG_PATH").is_some()) {
        let config = Config::default();
        config.validate()?;
        return Ok(config);
    }

    Config::load(&config_path).with_context(|| {
        format!(
            "Failed to load config at '{}'; use --generate-config to print a template",
            config_path
        )
    })
}

/// Only the implicit `config.yaml` may be missing; a path given with
/// `--config` or `CONFIG_PATH` has to exist.
fn uses_builtin_defaults(path: &Path, config_path_env: bool) -> bool {
    !config_path_env && path == Path::new(DEFAULT_CONFIG_PATH) && !path.exists()
}

fn init_logging(config: &Config) {
    let builder = FmtSubscriber::builder()
        .with_env_filter(config.logging.env_filter())
        .with_writer(std::io::stderr);
    if config.logging.pretty {
        builder.pretty().init();
    } else {
        builder.init();
    }
}

fn run_command(command: Command, resolver: &MessageResolver) -> anyhow::Result<Value> {
    match command {
        Command::Status(input) => {
            let message = read_message(&input.message)?;
            let status = resolver.derive_status(&message);
            Ok(json!({
                "identifier": message.identifier,
                "status": status,
            }))
        }
        Command::Mentions(cmd) => {
            let message = read_message(&cmd.input.message)?;
            let parsed = match (message.text.as_deref(), message.metadata.as_ref()) {
                (Some(text), Some(metadata)) => resolver.parse_mentions(text, metadata),
                _ => Default::default(),
            };
            let mut ids: Vec<&String> = parsed.mentioned_user_ids.iter().collect();
            ids.sort();

            let rendered = match &cmd.names {
                Some(path) => {
                    let names: NameCache = read_json(path)?;
                    resolver
                        .render_with_mentions(&message, &"default", &"mention", &names)
                        .map(|styled| {
                            let segments: Vec<Value> = styled
                                .segments()
                                .map(|(text, span)| {
                                    json!({
                                        "text": text,
                                        "style": span.style,
                                        "mentionOf": span.mention_of,
                                    })
                                })
                                .collect();
                            json!({ "text": styled.text, "segments": segments })
                        })
                }
                None => None,
            };

            Ok(json!({
                "identifier": message.identifier,
                "containsMentions": resolver.contains_mentions(&message),
                "mentionedUserIds": ids,
                "rendered": rendered,
            }))
        }
        Command::Payload(input) => {
            let message = read_message(&input.message)?;
            let payload = message
                .metadata
                .as_ref()
                .and_then(|metadata| resolver.extract_payload_array(metadata));
            Ok(json!({
                "identifier": message.identifier,
                "kind": message.kind,
                "payload": payload,
            }))
        }
    }
}

fn read_message(path: &Path) -> anyhow::Result<MessageModel> {
    let message: MessageModel = read_json(path)?;
    debug!(id = %message.identifier, kind = message.kind.as_str(), "loaded message");
    Ok(message)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse JSON in '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{DEFAULT_CONFIG_PATH, load_config, uses_builtin_defaults};

    #[test]
    fn only_missing_default_path_falls_back() {
        let missing = PathBuf::from(format!("missing-{}.yaml", uuid::Uuid::new_v4()));
        assert!(!uses_builtin_defaults(&missing, false));
        assert!(!uses_builtin_defaults(Path::new(DEFAULT_CONFIG_PATH), true));

        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        assert_eq!(uses_builtin_defaults(default_path, false), !default_path.exists());
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        if std::env::var_os("CONFIG_PATH").is_some() {
            return;
        }
        let missing =
            std::env::temp_dir().join(format!("missing-{}.yaml", uuid::Uuid::new_v4()));
        let err = load_config(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
