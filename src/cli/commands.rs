use crate::core::EventKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "chain-economics")]
pub struct Opt {
    #[arg(
        long = "config",
        global = true,
        help = "TOML file with fork schedule overrides"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = "schedule", about = "Print the fork eras and their base rewards")]
    Schedule,
    #[command(name = "block", about = "Show issuance and burn for block payloads")]
    Block {
        #[arg(help = "JSON file with one block object or an array of blocks")]
        path: PathBuf,
    },
    #[command(name = "uncle", about = "Show rewards for uncle payloads")]
    Uncle {
        #[arg(help = "JSON file with the uncles of one block, in index order")]
        path: PathBuf,
        #[arg(long = "included-in", help = "Height of the block that included the uncles")]
        included_in: u64,
    },
    #[command(name = "events", about = "Show fees and values for explorer events")]
    Events {
        #[arg(help = "JSON file with explorer results")]
        path: PathBuf,
        #[arg(
            long = "kind",
            default_value = "normal",
            help = "Event shape (normal, internal, erc20, erc721, erc1155)"
        )]
        kind: EventKind,
    },
    #[command(name = "summary", about = "Summarize issuance and burn over a block range")]
    Summary {
        #[arg(help = "JSON file with block payloads")]
        blocks: PathBuf,
        #[arg(long = "uncles", requires = "included_in", help = "JSON file with uncle payloads")]
        uncles: Option<PathBuf>,
        #[arg(long = "included-in", help = "Height of the block that included the uncles")]
        included_in: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Opt::command().debug_assert();
    }

    #[test]
    fn test_parse_events_command() {
        let opt = Opt::parse_from([
            "chain-economics",
            "--config",
            "econ.toml",
            "events",
            "tokentx.json",
            "--kind",
            "erc20",
        ]);

        assert_eq!(opt.config, Some(PathBuf::from("econ.toml")));
        match opt.command {
            Command::Events { path, kind } => {
                assert_eq!(path, PathBuf::from("tokentx.json"));
                assert_eq!(kind, EventKind::Erc20);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_summary_uncles_need_height() {
        let result = Opt::try_parse_from(["chain-economics", "summary", "b.json", "--uncles", "u.json"]);
        assert!(result.is_err());
    }
}
