//! Command-line interface for snatch.

use crate::game::validation::MIN_WORD_LENGTH;
use crate::game::ScoringRule;
use crate::network::DEFAULT_PORT;
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Snatch - two-player anagram word game over a room relay
#[derive(Parser, Debug)]
#[command(name = "snatch")]
#[command(about = "Flip tiles, claim words, steal your opponent's", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the room relay
    Relay {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind to (the next free port is used if taken)
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Play in the terminal
    Play {
        /// Relay address (HOST:PORT, or HOST for the default port)
        #[arg(short, long, default_value_t = format!("127.0.0.1:{}", DEFAULT_PORT))]
        server: String,

        /// Word list: a file path or an http(s) URL
        #[arg(short, long)]
        dictionary: Option<String>,

        /// Open this room directly instead of showing the lobby
        #[arg(short, long)]
        room: Option<String>,

        /// Shortest word that may be claimed (3, 4 or 5)
        #[arg(
            long,
            default_value_t = MIN_WORD_LENGTH,
            value_parser = RangedU64ValueParser::<usize>::new().range(3..=5)
        )]
        min_word_length: usize,

        /// Scoring rule
        #[arg(long, default_value_t = ScoringRule::default())]
        scoring: ScoringRule,

        /// Log file (the terminal is taken by the UI)
        #[arg(long, default_value = "snatch.log")]
        log_file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_play_defaults() {
        let cli = Cli::try_parse_from(["snatch", "play"]).unwrap();
        match cli.command {
            Command::Play {
                server,
                dictionary,
                room,
                min_word_length,
                scoring,
                log_file,
            } => {
                assert_eq!(server, "127.0.0.1:55333");
                assert!(dictionary.is_none());
                assert!(room.is_none());
                assert_eq!(min_word_length, 3);
                assert_eq!(scoring, ScoringRule::MinusMinimum);
                assert_eq!(log_file, PathBuf::from("snatch.log"));
            }
            _ => panic!("expected play"),
        }
    }

    #[test]
    fn test_play_options() {
        let cli = Cli::try_parse_from([
            "snatch",
            "play",
            "--room",
            "417",
            "--scoring",
            "raw-length",
            "--min-word-length",
            "4",
            "--dictionary",
            "words.txt",
        ])
        .unwrap();
        match cli.command {
            Command::Play {
                room,
                scoring,
                min_word_length,
                dictionary,
                ..
            } => {
                assert_eq!(room.as_deref(), Some("417"));
                assert_eq!(scoring, ScoringRule::RawLength);
                assert_eq!(min_word_length, 4);
                assert_eq!(dictionary.as_deref(), Some("words.txt"));
            }
            _ => panic!("expected play"),
        }
    }

    #[test]
    fn test_min_word_length_outside_lobby_choices() {
        for bad in ["2", "6", "abc"] {
            assert!(
                Cli::try_parse_from(["snatch", "play", "--min-word-length", bad]).is_err(),
                "accepted {}",
                bad
            );
        }
        assert!(Cli::try_parse_from(["snatch", "play", "--min-word-length", "5"]).is_ok());
    }

    #[test]
    fn test_bad_scoring_rule() {
        assert!(Cli::try_parse_from(["snatch", "play", "--scoring", "double"]).is_err());
    }

    #[test]
    fn test_relay_defaults() {
        let cli = Cli::try_parse_from(["snatch", "relay"]).unwrap();
        match cli.command {
            Command::Relay { host, port } => {
                assert_eq!(host, "0.0.0.0");
                assert_eq!(port, DEFAULT_PORT);
            }
            _ => panic!("expected relay"),
        }
    }
}
