use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use converter_core::normalize::{is_uuid_shaped, normalize_uuid};
use shortuuid::ShortUuid;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "shortuuid-tools", about = "ShortUUID conversions from the shell")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a UUID (dashes optional) as a ShortUUID.
    Encode {
        uuid: String,
        #[arg(long)]
        legacy: bool,
    },
    /// Decode a ShortUUID back to a hyphenated UUID.
    Decode {
        short: String,
        #[arg(long)]
        legacy: bool,
    },
    /// Print fresh ShortUUIDs.
    Generate {
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Print the canonical hyphenated form of a UUID.
    Normalize { uuid: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    for line in run(cli.command)? {
        println!("{line}");
    }
    Ok(())
}

fn run(command: Command) -> Result<Vec<String>> {
    let codec = ShortUuid::new();

    match command {
        Command::Encode { uuid, legacy } => {
            let uuid = parse_uuid(&uuid)?;
            let short = if legacy {
                codec.legacy_encode(&uuid)
            } else {
                codec.encode(&uuid)
            };
            Ok(vec![short])
        }
        Command::Decode { short, legacy } => {
            let uuid = codec
                .decode(short.trim(), legacy)
                .with_context(|| format!("invalid ShortUUID '{short}'"))?;
            Ok(vec![uuid.hyphenated().to_string()])
        }
        Command::Generate { count } => Ok((0..count).map(|_| codec.random()).collect()),
        Command::Normalize { uuid } => Ok(vec![parse_uuid(&uuid)?.hyphenated().to_string()]),
    }
}

fn parse_uuid(text: &str) -> Result<Uuid> {
    if !is_uuid_shaped(text) {
        bail!("'{text}' must be 32 hexadecimal characters (with or without dashes)");
    }
    let canonical = normalize_uuid(text);
    Uuid::parse_str(&canonical).with_context(|| format!("invalid UUID '{text}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_UUID: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn encode_accepts_undashed_uppercase_input() {
        let out = run(Command::Encode {
            uuid: "550E8400E29B41D4A716446655440000".into(),
            legacy: false,
        })
        .expect("encode");
        assert_eq!(out, vec!["H9cNmGXLEc8NWcZzSThA9S".to_string()]);
    }

    #[test]
    fn legacy_decode_reads_reversed_form() {
        let out = run(Command::Decode {
            short: "S9AhTSzZcWN8cELXGmNc9H".into(),
            legacy: true,
        })
        .expect("decode");
        assert_eq!(out, vec![SAMPLE_UUID.to_string()]);
    }

    #[test]
    fn generate_honours_count() {
        let out = run(Command::Generate { count: 3 }).expect("generate");
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|short| short.len() == 22));
    }

    #[test]
    fn malformed_inputs_fail() {
        assert!(run(Command::Normalize {
            uuid: "not-a-uuid".into()
        })
        .is_err());
        assert!(run(Command::Decode {
            short: "0OIl".into(),
            legacy: false
        })
        .is_err());
    }
}
