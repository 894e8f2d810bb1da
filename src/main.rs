use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use rbedit::constants::ANNOUNCE_LIST_KEY;
use rbedit::{
    decode, Action, EncodeOutput, Encoder, ErrorKind, InvocationContext, KeyPath, Output,
    ResultTarget, Value,
};

#[derive(Parser)]
#[command(name = "rbedit", version, about = "Inspect and edit bencoded torrent files")]
struct Cli {
    /// Torrent file to read (defaults to stdin)
    #[arg(short = 'i', long = "input", global = true, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Where to write the result (defaults to stdout)
    #[arg(short = 'o', long = "output", global = true, value_name = "PATH")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the value at KEY/INDEX ...
    Get {
        keys: Vec<String>,
        /// bencode, torrent, print, list, list-of-lists or hex
        #[arg(short = 'f', long = "format", default_value = "print")]
        format: Encoder,
    },
    /// Print the SHA1 of the canonical encoding at KEY/INDEX ...
    Hash { keys: Vec<String> },
    /// Print the torrent's info hash
    InfoHash,
    /// Print the announce-list tiers as `<tier>: <url>` lines
    AnnounceList,
    /// Print the list of strings at KEY/INDEX ..., one per line
    List { keys: Vec<String> },
    /// Set the value at KEY/INDEX ... to a string
    SetString {
        #[arg(required = true)]
        keys: Vec<String>,
        #[arg(long)]
        value: String,
        #[command(flatten)]
        edit: EditArgs,
    },
    /// Set the value at KEY/INDEX ... to an integer
    SetInt {
        #[arg(required = true)]
        keys: Vec<String>,
        #[arg(long, allow_hyphen_values = true)]
        value: i64,
        #[command(flatten)]
        edit: EditArgs,
    },
    /// Set the value at KEY/INDEX ... to a bencoded literal
    SetBencode {
        #[arg(required = true)]
        keys: Vec<String>,
        #[arg(long)]
        value: String,
        #[command(flatten)]
        edit: EditArgs,
    },
}

#[derive(Args)]
struct EditArgs {
    /// Create the final key if it does not exist
    #[arg(long)]
    create: bool,
    /// Write plain bencode without checking the torrent structure
    #[arg(long = "no-verify")]
    no_verify: bool,
}

impl EditArgs {
    fn action<O: Output>(&self, keys: Vec<String>, value: Value, sink: O) -> Action<O> {
        let path = KeyPath::from(keys);
        if self.create {
            Action::insert(path, value, sink)
        } else {
            Action::replace(path, value, sink)
        }
    }

    fn encoder(&self) -> Encoder {
        if self.no_verify {
            Encoder::Bencode
        } else {
            Encoder::Torrent
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(usage_exit_code(&err));
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", report(&err));
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = read_input(cli.input.as_deref())?;
    let mut buffer = Vec::new();

    // Everything is encoded into memory first so a failed edit never
    // truncates the destination, which may be the input file itself.
    match cli.command {
        Command::Get { keys, format } => execute(
            Action::get(keys.into(), EncodeOutput::new(format, &mut buffer)),
            root,
        )?,
        Command::Hash { keys } => execute(
            Action::sha1(
                keys.into(),
                ResultTarget::Object,
                EncodeOutput::new(Encoder::HexString, &mut buffer),
            ),
            root,
        )?,
        Command::InfoHash => execute(
            Action::calculate_info_hash(Action::cached_info_hash(EncodeOutput::new(
                Encoder::HexString,
                &mut buffer,
            ))),
            root,
        )?,
        Command::AnnounceList => execute(
            Action::get(
                KeyPath::parse(ANNOUNCE_LIST_KEY),
                EncodeOutput::new(Encoder::PrintListOfLists, &mut buffer),
            ),
            root,
        )?,
        Command::List { keys } => execute(
            Action::get(
                keys.into(),
                EncodeOutput::new(Encoder::PrintList, &mut buffer),
            ),
            root,
        )?,
        Command::SetString { keys, value, edit } => {
            let sink = EncodeOutput::new(edit.encoder(), &mut buffer);
            execute(edit.action(keys, Value::string(&value), sink), root)?
        }
        Command::SetInt { keys, value, edit } => {
            let sink = EncodeOutput::new(edit.encoder(), &mut buffer);
            execute(edit.action(keys, Value::Integer(value), sink), root)?
        }
        Command::SetBencode { keys, value, edit } => {
            let value = decode(value.as_bytes())
                .map_err(rbedit::Error::from)
                .context("invalid --value")?;
            let sink = EncodeOutput::new(edit.encoder(), &mut buffer);
            execute(edit.action(keys, value, sink), root)?
        }
    }

    write_output(cli.output.as_deref(), &buffer)
}

fn execute(mut stage: impl Output, root: Value) -> Result<(), rbedit::Error> {
    stage.execute(InvocationContext::new(), root)
}

fn read_input(path: Option<&Path>) -> Result<Value> {
    let data = match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        None => {
            let mut data = Vec::new();
            io::stdin()
                .read_to_end(&mut data)
                .context("failed to read stdin")?;
            data
        }
    };

    decode(&data)
        .map_err(rbedit::Error::from)
        .context("failed to decode input")
}

fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// `--help` and `--version` exit 0; malformed command lines are usage
/// errors and share the configuration code.
fn usage_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Joins the context layers down to the first library error. The library
/// error's own message already includes its sources.
fn report(err: &anyhow::Error) -> String {
    let mut parts = Vec::new();
    for cause in err.chain() {
        parts.push(cause.to_string());
        if cause.is::<rbedit::Error>() {
            break;
        }
    }
    parts.join(": ")
}

fn exit_code(err: &anyhow::Error) -> u8 {
    let kind = err
        .chain()
        .find_map(|e| e.downcast_ref::<rbedit::Error>())
        .map(rbedit::Error::kind);

    match kind {
        Some(ErrorKind::Configuration) => 1,
        Some(ErrorKind::Parse) => 2,
        Some(ErrorKind::Path) => 3,
        Some(ErrorKind::Validation) => 4,
        Some(ErrorKind::State) => 5,
        Some(ErrorKind::Encoding) => 6,
        Some(ErrorKind::Io) => 7,
        Some(ErrorKind::DepthExceeded) => 8,
        None if err.chain().any(|e| e.is::<io::Error>()) => 7,
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rbedit::{MetainfoError, PathError, PathErrorKind, StateError};

    fn wrapped(err: impl Into<rbedit::Error>) -> anyhow::Error {
        anyhow::Error::from(err.into()).context("while editing")
    }

    #[test]
    fn test_exit_code_per_error_kind() {
        let parse = decode(b"i1").unwrap_err();
        assert_eq!(exit_code(&wrapped(parse)), 2);

        let missing = PathError::new(PathErrorKind::NotFound, KeyPath::parse("info/x"));
        assert_eq!(exit_code(&wrapped(missing)), 3);

        let too_deep = PathError::new(PathErrorKind::DepthExceeded, KeyPath::parse("a"));
        assert_eq!(exit_code(&wrapped(too_deep)), 8);

        let invalid = MetainfoError::MissingField("info");
        assert_eq!(exit_code(&wrapped(invalid)), 4);

        assert_eq!(exit_code(&wrapped(StateError::NotComputed)), 5);

        let config = rbedit::Error::Configuration("unknown target".into());
        assert_eq!(exit_code(&anyhow::Error::from(config)), 1);

        let io = rbedit::Error::from(io::Error::other("disk"));
        assert_eq!(exit_code(&anyhow::Error::from(io)), 7);
    }

    #[test]
    fn test_exit_code_without_library_error() {
        let io = anyhow::Error::from(io::Error::new(io::ErrorKind::NotFound, "gone"))
            .context("failed to read in.torrent");
        assert_eq!(exit_code(&io), 7);
        assert_eq!(exit_code(&anyhow::anyhow!("other")), 1);
    }

    #[test]
    fn test_usage_errors_do_not_share_parse_code() {
        let err = Cli::try_parse_from(["rbedit", "--bogus"])
            .err()
            .expect("unknown flag is rejected");
        assert_eq!(usage_exit_code(&err), 1);

        let err = Cli::try_parse_from(["rbedit", "set-int", "announce"])
            .err()
            .expect("missing --value is rejected");
        assert_eq!(usage_exit_code(&err), 1);

        let help = Cli::try_parse_from(["rbedit", "--help"])
            .err()
            .expect("help short-circuits parsing");
        assert_eq!(usage_exit_code(&help), 0);
    }

    #[test]
    fn test_report_prints_each_message_once() {
        let missing = PathError::new(PathErrorKind::NotFound, KeyPath::parse("info/x"));
        let message = missing.to_string();
        let text = report(&wrapped(missing));

        assert_eq!(text, format!("while editing: {message}"));
        assert_eq!(text.matches(&message).count(), 1);

        let parse = decode(b"i1").unwrap_err();
        let inner = parse.to_string();
        let text = report(&wrapped(parse));
        assert_eq!(text.matches(&inner).count(), 1);
        assert!(text.starts_with("while editing: bencode error: "));
    }
}
